//! Token and AST models shared by the lexer, parser, linter, program
//! manager, interpreter, and PAD codec. A plain data crate: no lexing or
//! parsing logic lives here, only the shapes those stages pass around.

mod ast;
mod token;

pub use ast::{Block, Command, Expr, OpKind, Program, SwitchCase};
pub use token::{Keyword, Op, Symbol, Token, TokenKind};
