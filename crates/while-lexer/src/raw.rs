//! The `logos`-generated lexical automaton. Produces raw lexemes only;
//! `while-lexer`'s driver in `lib.rs` reclassifies words into
//! keywords/ops/identifiers depending on `pure_only` and converts byte
//! spans into row/column positions. Modelled on `LogosToken` + manual
//! `comment_block` callback (`compiler/parser-rowan/src/lexer.rs`).

use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Raw {
    // Matches on any single Unicode `White_Space` character (the ASCII run
    // plus NEL/NBSP/line/paragraph separators and the other spacing marks
    // `char::is_whitespace` recognises), then the callback consumes the
    // rest of the run so a whitespace character outside ASCII is discarded
    // rather than falling through to `emit_unknown`.
    #[regex(r"[ \t\r\n\x0B\x0C\u{85}\u{A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}]", whitespace_run)]
    WhitespaceMarker,

    #[regex(r"//[^\n]*", logos::skip)]
    LineCommentMarker,

    /// `(* … *)`, possibly multi-line. Unterminated comments consume to
    /// end of input rather than erroring.
    #[token("(*", comment_block)]
    BlockCommentMarker,

    #[regex(r"[A-Za-z_][A-Za-z0-9_]*")]
    Word,

    #[regex(r"[0-9]+")]
    Number,

    #[token(":=")]
    Assign,
    #[token(";")]
    Semicolon,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("=")]
    Equals,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(":")]
    Colon,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
}

fn comment_block(lex: &mut logos::Lexer<Raw>) -> logos::Skip {
    let remainder = lex.remainder();
    match remainder.find("*)") {
        Some(offset) => lex.bump(offset + 2),
        None => lex.bump(remainder.len()),
    }
    logos::Skip
}

/// Consumes every further `char::is_whitespace` codepoint immediately
/// following the single whitespace character the regex already matched, so
/// a run of mixed ASCII/Unicode whitespace is discarded as one token.
fn whitespace_run(lex: &mut logos::Lexer<Raw>) -> logos::Skip {
    let remainder = lex.remainder();
    let extra: usize = remainder.chars().take_while(|c| c.is_whitespace()).map(|c| c.len_utf8()).sum();
    if extra > 0 {
        lex.bump(extra);
    }
    logos::Skip
}
