//! Runs the lexer then the parser and merges their diagnostics into one
//! report, following the `Linter::lint` shape
//! (`compiler/linter/src/linter.rs`) minus its style-lint passes — this
//! toolchain has no lint rules of its own, only the lex/parse diagnostics
//! every stage already produces.

use while_ast::Program;
use while_errors::Diagnostic;

pub struct LintResult {
    pub program: Program,
    pub diagnostics: Vec<Diagnostic>,
}

impl LintResult {
    /// Whether `program` may be handed to the interpreter: no diagnostics
    /// were reported, and every node parsed completely.
    pub fn is_accepted(&self) -> bool {
        self.diagnostics.is_empty() && self.program.is_complete()
    }
}

pub fn lint(source: &str, pure_only: bool) -> LintResult {
    let (tokens, lex_diagnostics) = while_lexer::lex(source, pure_only);
    let (program, parse_diagnostics) = while_parser::parse(tokens, pure_only);
    lex_diagnostics.extend(parse_diagnostics);
    let diagnostics = lex_diagnostics.consume();

    tracing::debug!(accepted = diagnostics.is_empty() && program.is_complete(), diagnostic_count = diagnostics.len(), "linted program");
    LintResult { program, diagnostics }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn well_formed_program_is_accepted() {
        let result = lint("ident read X { } write X", true);
        assert!(result.is_accepted());
    }

    #[test]
    fn lex_and_parse_diagnostics_are_both_surfaced() {
        // `=` is unknown in pure mode (a lex error) and then breaks the
        // enclosing block's closing brace (a parse error).
        let result = lint("p read X { Y := X = X } write Y", true);
        assert!(!result.is_accepted());
        assert!(result.diagnostics.iter().any(|d| d.message.starts_with("Unknown token")));
        assert!(result.diagnostics.iter().any(|d| d.message.starts_with("Unexpected token")));
    }

    #[test]
    fn empty_source_is_rejected() {
        let result = lint("", true);
        assert!(!result.is_accepted());
    }
}
