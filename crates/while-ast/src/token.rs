//! The token model: a tagged variant plus its span.
//! The lexer is the only producer of [`Token`]s; the parser is the only
//! consumer. Kept free of any lexing machinery (that lives in
//! `while-lexer`, the crate that actually depends on `logos`) so the token
//! shapes can be shared without pulling a lexer generator into every
//! downstream crate.

use std::fmt;

use serde::{Deserialize, Serialize};
use while_span::Span;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    Semicolon,
    Assign,
    LBrace,
    RBrace,
    LParen,
    RParen,
    /// extended only
    Equals,
    /// extended only
    Comma,
    /// extended only
    Dot,
    /// extended only
    Colon,
    /// extended only
    LBracket,
    /// extended only
    RBracket,
    /// extended only
    LAngle,
    /// extended only
    RAngle,
}

impl Symbol {
    pub fn as_str(self) -> &'static str {
        match self {
            Symbol::Semicolon => ";",
            Symbol::Assign => ":=",
            Symbol::LBrace => "{",
            Symbol::RBrace => "}",
            Symbol::LParen => "(",
            Symbol::RParen => ")",
            Symbol::Equals => "=",
            Symbol::Comma => ",",
            Symbol::Dot => ".",
            Symbol::Colon => ":",
            Symbol::LBracket => "[",
            Symbol::RBracket => "]",
            Symbol::LAngle => "<",
            Symbol::RAngle => ">",
        }
    }

    /// Symbols only recognised outside `pure_only` mode.
    pub fn is_extended(self) -> bool {
        !matches!(self, Symbol::Semicolon | Symbol::Assign | Symbol::LBrace | Symbol::RBrace | Symbol::LParen | Symbol::RParen)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Keyword {
    If,
    Else,
    While,
    Read,
    Write,
    /// extended only
    Switch,
    /// extended only
    Case,
    /// extended only
    Default,
}

impl Keyword {
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::If => "if",
            Keyword::Else => "else",
            Keyword::While => "while",
            Keyword::Read => "read",
            Keyword::Write => "write",
            Keyword::Switch => "switch",
            Keyword::Case => "case",
            Keyword::Default => "default",
        }
    }

    pub fn is_extended(self) -> bool {
        matches!(self, Keyword::Switch | Keyword::Case | Keyword::Default)
    }

    /// Reverse lookup used by the lexer's identifier re-classification
    /// step.
    pub fn from_str(word: &str) -> Option<Keyword> {
        Some(match word {
            "if" => Keyword::If,
            "else" => Keyword::Else,
            "while" => Keyword::While,
            "read" => Keyword::Read,
            "write" => Keyword::Write,
            "switch" => Keyword::Switch,
            "case" => Keyword::Case,
            "default" => Keyword::Default,
            _ => return None,
        })
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Op {
    Cons,
    Hd,
    Tl,
    /// extended only
    True,
    /// extended only
    False,
}

impl Op {
    pub fn as_str(self) -> &'static str {
        match self {
            Op::Cons => "cons",
            Op::Hd => "hd",
            Op::Tl => "tl",
            Op::True => "true",
            Op::False => "false",
        }
    }

    pub fn is_extended(self) -> bool {
        matches!(self, Op::True | Op::False)
    }

    pub fn from_str(word: &str) -> Option<Op> {
        Some(match word {
            "cons" => Op::Cons,
            "hd" => Op::Hd,
            "tl" => Op::Tl,
            "true" => Op::True,
            "false" => Op::False,
            _ => return None,
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum TokenKind {
    Symbol(Symbol),
    Keyword(Keyword),
    Op(Op),
    Identifier(String),
    /// extended only
    Number(u64),
    /// any single unrecognised character
    Unknown(char),
    /// emitted once at the end of the token stream so the parser's
    /// lookahead never has to special-case running off the end of a slice
    Eof,
}

impl TokenKind {
    pub fn is_extended_only(&self) -> bool {
        match self {
            TokenKind::Symbol(s) => s.is_extended(),
            TokenKind::Keyword(k) => k.is_extended(),
            TokenKind::Op(o) => o.is_extended(),
            TokenKind::Number(_) => true,
            _ => false,
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Symbol(s) => write!(f, "{}", s.as_str()),
            TokenKind::Keyword(k) => write!(f, "{}", k.as_str()),
            TokenKind::Op(o) => write!(f, "{}", o.as_str()),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Unknown(c) => write!(f, "{c}"),
            TokenKind::Eof => write!(f, "<eof>"),
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)
    }
}
