//! Source text → token sequence.
//!
//! The lexer never aborts: every byte of input is accounted for, either as
//! a token, as discarded whitespace/comment, or as an `unknown` token with
//! a companion diagnostic. Built on `logos` the way
//! `compiler/parser-rowan/src/lexer.rs` is, with the same manual
//! block-comment callback; unlike the non-recovering
//! `compiler/parser/src/tokenizer/lexer.rs`, nothing here ever returns
//! early on a bad character.

mod position;
mod raw;

use logos::Logos;
use while_ast::{Keyword, Op, Symbol, Token, TokenKind};
use while_errors::{Diagnostic, DiagnosticReport};
use while_span::{Position, Span};

use position::LineIndex;
use raw::Raw;

/// Lexes `source`, returning every token (including a trailing `Eof`) and
/// the diagnostics collected along the way. `pure_only` selects which
/// reserved words and symbols are recognised as keywords/ops/symbols
/// rather than identifiers or unknown characters.
pub fn lex(source: &str, pure_only: bool) -> (Vec<Token>, DiagnosticReport) {
    let diagnostics = DiagnosticReport::new();
    let mut tokens = Vec::new();
    let index = LineIndex::new(source);
    let mut lexer = Raw::lexer(source);

    while let Some(result) = lexer.next() {
        let byte_span = lexer.span();
        let text = lexer.slice();
        let start = index.position(source, byte_span.start);

        match result {
            Ok(Raw::Word) => push_word(&mut tokens, text, start, pure_only),
            Ok(Raw::Number) => push_number(&mut tokens, &diagnostics, text, start, pure_only),
            Ok(Raw::LineCommentMarker) | Ok(Raw::BlockCommentMarker) | Ok(Raw::WhitespaceMarker) => {
                unreachable!("comment and whitespace markers are consumed by their own skip callbacks")
            }
            Ok(raw_symbol) => push_symbol(&mut tokens, &diagnostics, &raw_symbol, text, start, pure_only),
            Err(()) => {
                for (offset, ch) in text.char_indices() {
                    let position = index.position(source, byte_span.start + offset);
                    emit_unknown(&mut tokens, &diagnostics, ch, position);
                }
            }
        }
    }

    let eof_position = index.position(source, source.len());
    tokens.push(Token::new(TokenKind::Eof, Span::at(eof_position)));

    tracing::debug!(tokens = tokens.len(), diagnostics = diagnostics.len(), pure_only, "lexed source");
    (tokens, diagnostics)
}

fn push_word(tokens: &mut Vec<Token>, text: &str, start: Position, pure_only: bool) {
    let span = Span::new(start, start.advance(text.chars().count()));

    if let Some(keyword) = Keyword::from_str(text) {
        if !pure_only || !keyword.is_extended() {
            tokens.push(Token::new(TokenKind::Keyword(keyword), span));
            return;
        }
    }
    if let Some(op) = Op::from_str(text) {
        if !pure_only || !op.is_extended() {
            tokens.push(Token::new(TokenKind::Op(op), span));
            return;
        }
    }
    tokens.push(Token::new(TokenKind::Identifier(text.to_string()), span));
}

/// In pure mode a numeric literal has no meaning; each digit becomes its
/// own `unknown` token and diagnostic, rather than one
/// diagnostic for the whole run of digits.
fn push_number(tokens: &mut Vec<Token>, diagnostics: &DiagnosticReport, text: &str, start: Position, pure_only: bool) {
    if pure_only {
        for (i, ch) in text.chars().enumerate() {
            emit_unknown(tokens, diagnostics, ch, start.advance(i));
        }
        return;
    }
    let span = Span::new(start, start.advance(text.chars().count()));
    let value: u64 = text.parse().expect("the `[0-9]+` regex only matches ASCII digits");
    tokens.push(Token::new(TokenKind::Number(value), span));
}

fn push_symbol(tokens: &mut Vec<Token>, diagnostics: &DiagnosticReport, raw: &Raw, text: &str, start: Position, pure_only: bool) {
    let symbol = match raw {
        Raw::Assign => Symbol::Assign,
        Raw::Semicolon => Symbol::Semicolon,
        Raw::LBrace => Symbol::LBrace,
        Raw::RBrace => Symbol::RBrace,
        Raw::LParen => Symbol::LParen,
        Raw::RParen => Symbol::RParen,
        Raw::Equals => Symbol::Equals,
        Raw::Comma => Symbol::Comma,
        Raw::Dot => Symbol::Dot,
        Raw::Colon => Symbol::Colon,
        Raw::LBracket => Symbol::LBracket,
        Raw::RBracket => Symbol::RBracket,
        Raw::LAngle => Symbol::LAngle,
        Raw::RAngle => Symbol::RAngle,
        Raw::Word | Raw::Number | Raw::LineCommentMarker | Raw::BlockCommentMarker | Raw::WhitespaceMarker => {
            unreachable!("handled by their own match arms")
        }
    };

    if pure_only && symbol.is_extended() {
        for (offset, ch) in text.char_indices() {
            emit_unknown(tokens, diagnostics, ch, start.advance(offset));
        }
        return;
    }
    let span = Span::new(start, start.advance(text.chars().count()));
    tokens.push(Token::new(TokenKind::Symbol(symbol), span));
}

fn emit_unknown(tokens: &mut Vec<Token>, diagnostics: &DiagnosticReport, ch: char, position: Position) {
    let span = Span::new(position, position.advance(1));
    tokens.push(Token::new(TokenKind::Unknown(ch), span));
    diagnostics.emit(Diagnostic::new(format!("Unknown token \"{ch}\""), span));
}

#[cfg(test)]
mod tests {
    use super::*;
    use expect_test::{Expect, expect};

    fn kinds(source: &str, pure_only: bool) -> (Vec<TokenKind>, usize) {
        let (tokens, diagnostics) = lex(source, pure_only);
        (tokens.into_iter().map(|t| t.kind).collect(), diagnostics.len())
    }

    fn check(actual: impl std::fmt::Debug, expected: Expect) {
        expected.assert_eq(&format!("{actual:#?}"));
    }

    #[test]
    fn pure_program_skeleton() {
        let (kinds, diagnostic_count) = kinds("ident read X { } write X", true);
        assert_eq!(diagnostic_count, 0);
        check(
            kinds,
            expect![[r#"
                [
                    Identifier(
                        "ident",
                    ),
                    Keyword(
                        Read,
                    ),
                    Identifier(
                        "X",
                    ),
                    Symbol(
                        LBrace,
                    ),
                    Symbol(
                        RBrace,
                    ),
                    Keyword(
                        Write,
                    ),
                    Identifier(
                        "X",
                    ),
                    Eof,
                ]"#]],
        );
    }

    #[test]
    fn unterminated_block_comment_consumes_to_eof_without_diagnostic() {
        let (tokens, diagnostics) = lex("a (* never closed", true);
        assert!(diagnostics.is_empty());
        assert_eq!(tokens.len(), 2); // the identifier `a`, then Eof
    }

    #[test]
    fn line_comment_stops_at_newline() {
        let (kinds, _) = kinds("a // comment\nb", true);
        assert_eq!(kinds, vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Identifier("b".into()),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn pure_mode_degrades_extended_words_to_identifiers() {
        let (kinds, diagnostic_count) = kinds("switch true", true);
        assert_eq!(diagnostic_count, 0);
        assert_eq!(kinds, vec![
            TokenKind::Identifier("switch".into()),
            TokenKind::Identifier("true".into()),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn extended_mode_recognises_switch_and_true() {
        let (kinds, _) = kinds("switch true", false);
        assert_eq!(kinds, vec![TokenKind::Keyword(Keyword::Switch), TokenKind::Op(Op::True), TokenKind::Eof]);
    }

    #[test]
    fn pure_mode_splits_digits_into_unknown_tokens() {
        let (tokens, diagnostics) = lex("12", true);
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(tokens[0].kind, TokenKind::Unknown('1'));
        assert_eq!(tokens[1].kind, TokenKind::Unknown('2'));
    }

    #[test]
    fn extended_mode_reads_a_number() {
        let (kinds, _) = kinds("42", false);
        assert_eq!(kinds, vec![TokenKind::Number(42), TokenKind::Eof]);
    }

    #[test]
    fn pure_mode_rejects_equals_as_unknown() {
        let (tokens, diagnostics) = lex("=", true);
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Unknown('='));
    }

    #[test]
    fn assign_is_matched_before_colon() {
        let (kinds, _) = kinds(":=", false);
        assert_eq!(kinds, vec![TokenKind::Symbol(Symbol::Assign), TokenKind::Eof]);
    }

    #[test]
    fn unknown_non_ascii_character_is_reported() {
        let (tokens, diagnostics) = lex("\u{2603}", true); // snowman
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(tokens[0].kind, TokenKind::Unknown('\u{2603}'));
    }

    #[test]
    fn unicode_whitespace_is_discarded_like_ascii_whitespace() {
        // non-breaking space, em space, line separator
        let (kinds, diagnostics) = kinds("a\u{A0}b\u{2003}c\u{2028}d", true);
        assert_eq!(diagnostics, 0);
        assert_eq!(kinds, vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Identifier("b".into()),
            TokenKind::Identifier("c".into()),
            TokenKind::Identifier("d".into()),
            TokenKind::Eof,
        ]);
    }

    #[test]
    fn mixed_ascii_and_unicode_whitespace_run_is_a_single_gap() {
        let (kinds, _) = kinds("a \t\u{A0}\u{3000} b", true);
        assert_eq!(kinds, vec![
            TokenKind::Identifier("a".into()),
            TokenKind::Identifier("b".into()),
            TokenKind::Eof,
        ]);
    }
}
