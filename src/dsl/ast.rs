//! Program AST.
//!
//! The whole language: five primitive actions, four control forms, five
//! world predicates plus negation. Repeat counts are grammar-bounded (see
//! [`crate::dsl::format::REPEAT_MIN`] and [`crate::dsl::format::REPEAT_MAX`]).

/// A primitive robot action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Move,
    TurnLeft,
    TurnRight,
    PickMarker,
    PutMarker,
}

/// A world predicate, evaluated against the hero's current pose.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cond {
    FrontIsClear,
    LeftIsClear,
    RightIsClear,
    MarkersPresent,
    NoMarkersPresent,
    Not(Box<Cond>),
}

/// A single statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Stmt {
    Action(Action),
    Repeat(u8, Vec<Stmt>),
    While(Cond, Vec<Stmt>),
    If(Cond, Vec<Stmt>),
    IfElse(Cond, Vec<Stmt>, Vec<Stmt>),
}

/// A complete program: the body of the single `run` routine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Program {
    pub body: Vec<Stmt>,
}

impl Program {
    pub fn new(body: Vec<Stmt>) -> Self {
        Self { body }
    }

    /// Number of statements, counted recursively.
    pub fn stmt_count(&self) -> usize {
        fn count(stmts: &[Stmt]) -> usize {
            stmts
                .iter()
                .map(|s| match s {
                    Stmt::Action(_) => 1,
                    Stmt::Repeat(_, b) | Stmt::While(_, b) | Stmt::If(_, b) => 1 + count(b),
                    Stmt::IfElse(_, t, e) => 1 + count(t) + count(e),
                })
                .sum()
        }
        count(&self.body)
    }

    /// Maximum statement nesting depth. A flat body has depth 1.
    pub fn depth(&self) -> usize {
        fn depth(stmts: &[Stmt]) -> usize {
            stmts
                .iter()
                .map(|s| match s {
                    Stmt::Action(_) => 1,
                    Stmt::Repeat(_, b) | Stmt::While(_, b) | Stmt::If(_, b) => 1 + depth(b),
                    Stmt::IfElse(_, t, e) => 1 + depth(t).max(depth(e)),
                })
                .max()
                .unwrap_or(0)
        }
        depth(&self.body)
    }
}
