//! Surface rendering: token streams, vocabularies and pretty printing.
//!
//! Two token-level grammars render the same AST, mirroring the two surface
//! languages the dataset is published in:
//!
//! - `curly`: C-style source, `def run ( ) { move ( ) ; }`
//! - `synthesis`: bracketed token stream, `DEF run m( move m)`
//!
//! Token streams are archived as indices into a fixed per-grammar
//! vocabulary; a program's token length is the length of that stream.

use super::ast::{Action, Cond, Program, Stmt};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Smallest repeat count the grammar can express.
pub const REPEAT_MIN: u8 = 2;
/// Largest repeat count the grammar can express.
pub const REPEAT_MAX: u8 = 8;

/// Which surface grammar to render and tokenize with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrammarVariant {
    Curly,
    Synthesis,
}

impl fmt::Display for GrammarVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarVariant::Curly => write!(f, "curly"),
            GrammarVariant::Synthesis => write!(f, "synthesis"),
        }
    }
}

impl FromStr for GrammarVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "curly" => Ok(GrammarVariant::Curly),
            "synthesis" => Ok(GrammarVariant::Synthesis),
            other => Err(format!(
                "unknown grammar `{}` (expected `curly` or `synthesis`)",
                other
            )),
        }
    }
}

const CURLY_VOCAB: &[&str] = &[
    "def",
    "run",
    "(",
    ")",
    "{",
    "}",
    ";",
    "move",
    "turnLeft",
    "turnRight",
    "pickMarker",
    "putMarker",
    "repeat",
    "while",
    "if",
    "else",
    "not",
    "frontIsClear",
    "leftIsClear",
    "rightIsClear",
    "markersPresent",
    "noMarkersPresent",
    "2",
    "3",
    "4",
    "5",
    "6",
    "7",
    "8",
];

const SYNTHESIS_VOCAB: &[&str] = &[
    "DEF",
    "run",
    "m(",
    "m)",
    "move",
    "turnLeft",
    "turnRight",
    "pickMarker",
    "putMarker",
    "REPEAT",
    "r(",
    "r)",
    "R=2",
    "R=3",
    "R=4",
    "R=5",
    "R=6",
    "R=7",
    "R=8",
    "WHILE",
    "w(",
    "w)",
    "IF",
    "IFELSE",
    "ELSE",
    "i(",
    "i)",
    "e(",
    "e)",
    "c(",
    "c)",
    "not",
    "frontIsClear",
    "leftIsClear",
    "rightIsClear",
    "markersPresent",
    "noMarkersPresent",
];

/// The fixed vocabulary of one grammar, in index order.
pub fn vocab(variant: GrammarVariant) -> &'static [&'static str] {
    match variant {
        GrammarVariant::Curly => CURLY_VOCAB,
        GrammarVariant::Synthesis => SYNTHESIS_VOCAB,
    }
}

fn action_name(action: Action) -> &'static str {
    match action {
        Action::Move => "move",
        Action::TurnLeft => "turnLeft",
        Action::TurnRight => "turnRight",
        Action::PickMarker => "pickMarker",
        Action::PutMarker => "putMarker",
    }
}

fn cond_name(cond: &Cond) -> &'static str {
    match cond {
        Cond::FrontIsClear => "frontIsClear",
        Cond::LeftIsClear => "leftIsClear",
        Cond::RightIsClear => "rightIsClear",
        Cond::MarkersPresent => "markersPresent",
        Cond::NoMarkersPresent => "noMarkersPresent",
        Cond::Not(_) => "not",
    }
}

/// Repeat counts outside the grammar range are clamped to it.
fn clamp_count(n: u8) -> u8 {
    n.clamp(REPEAT_MIN, REPEAT_MAX)
}

fn count_token(n: u8) -> &'static str {
    match clamp_count(n) {
        2 => "2",
        3 => "3",
        4 => "4",
        5 => "5",
        6 => "6",
        7 => "7",
        _ => "8",
    }
}

fn repeat_token(n: u8) -> &'static str {
    match clamp_count(n) {
        2 => "R=2",
        3 => "R=3",
        4 => "R=4",
        5 => "R=5",
        6 => "R=6",
        7 => "R=7",
        _ => "R=8",
    }
}

/// Render a program to its token stream under the given grammar.
pub fn tokens(program: &Program, variant: GrammarVariant) -> Vec<&'static str> {
    let mut out = Vec::new();
    match variant {
        GrammarVariant::Curly => {
            out.extend(["def", "run", "(", ")", "{"]);
            curly_block(&program.body, &mut out);
            out.push("}");
        }
        GrammarVariant::Synthesis => {
            out.extend(["DEF", "run", "m("]);
            synthesis_block(&program.body, &mut out);
            out.push("m)");
        }
    }
    out
}

fn curly_block(stmts: &[Stmt], out: &mut Vec<&'static str>) {
    for stmt in stmts {
        match stmt {
            Stmt::Action(a) => out.extend([action_name(*a), "(", ")", ";"]),
            Stmt::Repeat(n, body) => {
                out.extend(["repeat", "(", count_token(*n), ")", "{"]);
                curly_block(body, out);
                out.push("}");
            }
            Stmt::While(cond, body) => {
                out.extend(["while", "("]);
                curly_cond(cond, out);
                out.extend([")", "{"]);
                curly_block(body, out);
                out.push("}");
            }
            Stmt::If(cond, body) => {
                out.extend(["if", "("]);
                curly_cond(cond, out);
                out.extend([")", "{"]);
                curly_block(body, out);
                out.push("}");
            }
            Stmt::IfElse(cond, then_body, else_body) => {
                out.extend(["if", "("]);
                curly_cond(cond, out);
                out.extend([")", "{"]);
                curly_block(then_body, out);
                out.extend(["}", "else", "{"]);
                curly_block(else_body, out);
                out.push("}");
            }
        }
    }
}

fn curly_cond(cond: &Cond, out: &mut Vec<&'static str>) {
    match cond {
        Cond::Not(inner) => {
            out.extend(["not", "("]);
            curly_cond(inner, out);
            out.push(")");
        }
        base => out.extend([cond_name(base), "(", ")"]),
    }
}

fn synthesis_block(stmts: &[Stmt], out: &mut Vec<&'static str>) {
    for stmt in stmts {
        match stmt {
            Stmt::Action(a) => out.push(action_name(*a)),
            Stmt::Repeat(n, body) => {
                out.extend(["REPEAT", repeat_token(*n), "r("]);
                synthesis_block(body, out);
                out.push("r)");
            }
            Stmt::While(cond, body) => {
                out.push("WHILE");
                synthesis_cond(cond, out);
                out.push("w(");
                synthesis_block(body, out);
                out.push("w)");
            }
            Stmt::If(cond, body) => {
                out.push("IF");
                synthesis_cond(cond, out);
                out.push("i(");
                synthesis_block(body, out);
                out.push("i)");
            }
            Stmt::IfElse(cond, then_body, else_body) => {
                out.push("IFELSE");
                synthesis_cond(cond, out);
                out.push("i(");
                synthesis_block(then_body, out);
                out.extend(["i)", "ELSE", "e("]);
                synthesis_block(else_body, out);
                out.push("e)");
            }
        }
    }
}

fn synthesis_cond(cond: &Cond, out: &mut Vec<&'static str>) {
    out.push("c(");
    if let Cond::Not(inner) = cond {
        out.push("not");
        synthesis_cond(inner, out);
    } else {
        out.push(cond_name(cond));
    }
    out.push("c)");
}

/// One-line source text: the token stream joined by spaces.
pub fn to_source(program: &Program, variant: GrammarVariant) -> String {
    tokens(program, variant).join(" ")
}

/// Map a program's token stream onto vocabulary indices.
pub fn lex_to_indices(program: &Program, variant: GrammarVariant) -> Vec<u16> {
    let vocab = vocab(variant);
    tokens(program, variant)
        .iter()
        .map(|token| {
            // The renderer emits only vocabulary tokens.
            vocab
                .iter()
                .position(|v| v == token)
                .expect("token missing from vocabulary") as u16
        })
        .collect()
}

/// Human-readable multi-line rendering in the curly surface syntax,
/// regardless of the archival grammar.
pub fn pretty(program: &Program) -> String {
    let mut out = String::from("def run() {\n");
    pretty_block(&program.body, 1, &mut out);
    out.push('}');
    out
}

fn pretty_block(stmts: &[Stmt], level: usize, out: &mut String) {
    let pad = "    ".repeat(level);
    for stmt in stmts {
        match stmt {
            Stmt::Action(a) => {
                out.push_str(&format!("{}{}();\n", pad, action_name(*a)));
            }
            Stmt::Repeat(n, body) => {
                out.push_str(&format!("{}repeat ({}) {{\n", pad, clamp_count(*n)));
                pretty_block(body, level + 1, out);
                out.push_str(&format!("{}}}\n", pad));
            }
            Stmt::While(cond, body) => {
                out.push_str(&format!("{}while ({}) {{\n", pad, pretty_cond(cond)));
                pretty_block(body, level + 1, out);
                out.push_str(&format!("{}}}\n", pad));
            }
            Stmt::If(cond, body) => {
                out.push_str(&format!("{}if ({}) {{\n", pad, pretty_cond(cond)));
                pretty_block(body, level + 1, out);
                out.push_str(&format!("{}}}\n", pad));
            }
            Stmt::IfElse(cond, then_body, else_body) => {
                out.push_str(&format!("{}if ({}) {{\n", pad, pretty_cond(cond)));
                pretty_block(then_body, level + 1, out);
                out.push_str(&format!("{}}} else {{\n", pad));
                pretty_block(else_body, level + 1, out);
                out.push_str(&format!("{}}}\n", pad));
            }
        }
    }
}

fn pretty_cond(cond: &Cond) -> String {
    match cond {
        Cond::Not(inner) => format!("not ({})", pretty_cond(inner)),
        base => format!("{}()", cond_name(base)),
    }
}
