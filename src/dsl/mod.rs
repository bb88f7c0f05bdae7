//! The Karel DSL: program AST, random generation and surface rendering.
//!
//! Programs are born as ASTs from the depth-bounded random generator and
//! never re-parsed from text. The [`format`] module renders a program to one
//! of two token-level surface grammars and maps token streams onto a fixed
//! per-grammar vocabulary for archival.

pub mod ast;
pub mod format;
pub mod generate;

pub use ast::{Action, Cond, Program, Stmt};
pub use format::{lex_to_indices, pretty, to_source, tokens, vocab, GrammarVariant};
pub use generate::random_code;
