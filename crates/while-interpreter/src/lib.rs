//! The interpreter: runs a *pure* WHILE AST
//! against a binary-tree input and produces a binary-tree output. Takes
//! only a [`while_ast::Program`] that already parsed cleanly — rejecting
//! an incomplete program is the caller's job upstream (the linter), this
//! crate just refuses to guess.

mod runner;
mod store;

pub use runner::run;
pub use store::Store;
