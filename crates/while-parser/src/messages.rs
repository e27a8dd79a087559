//! Diagnostic message builders. Kept separate from the parsing logic so the
//! exact wording lives in one place; every call site names the
//! grammar slot it failed to fill, not the wording.

use while_ast::Token;
use while_errors::Diagnostic;

fn is_eof(token: &Token) -> bool {
    matches!(token.kind, while_ast::TokenKind::Eof)
}

/// `Unexpected token "<actual>": Expected "<expected>"` /
/// `Unexpected end of input: Expected "<expected>"`.
pub fn unexpected_token(token: &Token, expected: &str) -> Diagnostic {
    let message = if is_eof(token) {
        format!("Unexpected end of input: Expected \"{expected}\"")
    } else {
        format!("Unexpected token \"{}\": Expected \"{expected}\"", token.kind)
    };
    Diagnostic::new(message, token.span)
}

/// The `Expected one of "x", "y", …` variant of [`unexpected_token`].
pub fn unexpected_token_one_of(token: &Token, expected: &[&str]) -> Diagnostic {
    let list = expected.iter().map(|e| format!("\"{e}\"")).collect::<Vec<_>>().join(", ");
    let message = if is_eof(token) {
        format!("Unexpected end of input: Expected one of {list}")
    } else {
        format!("Unexpected token \"{}\": Expected one of {list}", token.kind)
    };
    Diagnostic::new(message, token.span)
}

/// `Unexpected token: Missing program name` / `Unexpected end of input:
/// Missing program name`. Unlike the generic template, the non-eof wording
/// never quotes the offending token.
pub fn missing_program_name(token: &Token) -> Diagnostic {
    let message = if is_eof(token) {
        "Unexpected end of input: Missing program name".to_string()
    } else {
        "Unexpected token: Missing program name".to_string()
    };
    Diagnostic::new(message, token.span)
}

/// `Unexpected token "X": Missing input variable` / `Unexpected end of
/// input: Missing input variable`.
pub fn missing_input_variable(token: &Token) -> Diagnostic {
    let message = if is_eof(token) {
        "Unexpected end of input: Missing input variable".to_string()
    } else {
        format!("Unexpected token \"{}\": Missing input variable", token.kind)
    };
    Diagnostic::new(message, token.span)
}

/// `Unexpected token "X": Expected an expression or an identifier`.
pub fn expected_expression_or_identifier(token: &Token) -> Diagnostic {
    let message = if is_eof(token) {
        "Unexpected end of input: Expected an expression or an identifier".to_string()
    } else {
        format!("Unexpected token \"{}\": Expected an expression or an identifier", token.kind)
    };
    Diagnostic::new(message, token.span)
}

/// Not one of the bespoke message templates elsewhere in this module; a
/// command always opens with an identifier or `if`/`while`/`switch`, so
/// this reuses the generic `Expected "<expected>"` shape with
/// `expected = "a command"`.
pub fn expected_command(token: &Token) -> Diagnostic {
    unexpected_token(token, "a command")
}

pub fn switch_case_empty_body(span: while_span::Span) -> Diagnostic {
    Diagnostic::new("Switch cases may not have empty bodies", span)
}

pub fn switch_default_not_last(span: while_span::Span) -> Diagnostic {
    Diagnostic::new("The 'default' case should be the last case in the block", span)
}
