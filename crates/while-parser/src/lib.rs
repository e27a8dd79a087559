//! Token sequence → AST. Recursive-descent,
//! built on the [`state::StateManager`] lookahead abstraction — following
//! the `ParserContext` cursor shape
//! (`compiler/parser/src/parser/context.rs`) — and never aborts: every
//! entry point returns a [`while_ast::Program`], marking nodes incomplete
//! rather than refusing to produce one.

mod expr;
mod messages;
mod parser;
mod state;

use while_ast::{Program, Token};
use while_errors::DiagnosticReport;

pub use parser::Parser;

/// Parses a complete token stream (including its trailing `Eof`, as
/// produced by `while_lexer::lex`) into a program AST plus diagnostics.
pub fn parse(tokens: Vec<Token>, pure_only: bool) -> (Program, DiagnosticReport) {
    let parser = Parser::new(tokens, pure_only);
    let (program, diagnostics) = parser.parse();
    tracing::debug!(complete = program.is_complete(), diagnostics = diagnostics.len(), "parsed program");
    (program, diagnostics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use while_ast::{Command, Expr, OpKind};

    fn parse_pure(source: &str) -> (Program, DiagnosticReport) {
        let (tokens, lex_diagnostics) = while_lexer::lex(source, true);
        assert!(lex_diagnostics.is_empty(), "unexpected lex diagnostics: {lex_diagnostics:?}");
        parse(tokens, true)
    }

    fn parse_extended(source: &str) -> (Program, DiagnosticReport) {
        let (tokens, lex_diagnostics) = while_lexer::lex(source, false);
        assert!(lex_diagnostics.is_empty(), "unexpected lex diagnostics: {lex_diagnostics:?}");
        parse(tokens, false)
    }

    #[test]
    fn s1_ident_program_parses_clean() {
        let (program, diagnostics) = parse_pure("ident read X { } write X");
        assert!(diagnostics.is_empty());
        assert!(program.is_complete());
        assert_eq!(program.name.as_deref(), Some("ident"));
        assert_eq!(program.input_var.as_deref(), Some("X"));
        assert_eq!(program.output_var.as_deref(), Some("X"));
        assert!(program.body.commands.is_empty());
    }

    #[test]
    fn s3_reverse_program_parses_clean() {
        let source = "reverse read X { while X { Y := cons (hd X) Y; X := tl X } } write Y";
        let (program, diagnostics) = parse_pure(source);
        assert!(diagnostics.is_empty());
        assert!(program.is_complete());
        assert_eq!(program.body.commands.len(), 1);
        let Command::Loop { body, .. } = &program.body.commands[0] else { panic!("expected a loop") };
        assert_eq!(body.commands.len(), 2);
    }

    #[test]
    fn cons_binds_two_fixed_arguments() {
        let (program, diagnostics) = parse_pure("p read X { Y := cons X X } write Y");
        assert!(diagnostics.is_empty());
        let Command::Assign { value: Some(Expr::Op { kind, args, .. }), .. } = &program.body.commands[0] else {
            panic!("expected an assign of an op")
        };
        assert_eq!(*kind, OpKind::Cons);
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn empty_input_reports_missing_program_name_at_eof() {
        let (program, diagnostics) = parse_pure("");
        assert!(!program.is_complete());
        assert_eq!(program.name, None);
        assert_eq!(program.input_var, None);
        assert_eq!(program.output_var, None);
        let diagnostics = diagnostics.consume();
        assert!(diagnostics.iter().any(|d| d.message == "Unexpected end of input: Missing program name"));
    }

    #[test]
    fn missing_name_and_read_emits_both_overlapping_diagnostics() {
        // No name, no `read` either — both diagnostics should fire rather
        // than the second being swallowed by the first's recovery.
        let (program, diagnostics) = parse_pure("{ } write X");
        assert!(!program.is_complete());
        let messages: Vec<_> = diagnostics.consume().into_iter().map(|d| d.message).collect();
        assert!(messages.iter().any(|m| m == "Unexpected token: Missing program name"));
        assert!(messages.iter().any(|m| m.starts_with("Unexpected token \"{\": Expected \"read\"")));
    }

    #[test]
    fn missing_name_but_read_present_emits_only_one_diagnostic() {
        let (program, diagnostics) = parse_pure("read X { } write X");
        assert!(!program.is_complete());
        assert_eq!(program.input_var.as_deref(), Some("X"));
        let messages: Vec<_> = diagnostics.consume().into_iter().map(|d| d.message).collect();
        assert_eq!(messages, vec!["Unexpected token: Missing program name".to_string()]);
    }

    #[test]
    fn unterminated_block_recovers_at_brace() {
        let (program, diagnostics) = parse_pure("p read X { Y := } write Y");
        assert!(!program.is_complete());
        assert!(!diagnostics.is_empty());
        // recovery must still find the closing `}` and the outro
        assert_eq!(program.output_var.as_deref(), Some("Y"));
    }

    #[test]
    fn switch_rejects_empty_case_body() {
        let source = "p read X { switch X { case 1: default: Y := nil } } write Y";
        let (program, diagnostics) = parse_extended(source);
        assert!(!program.is_complete());
        let messages: Vec<_> = diagnostics.consume().into_iter().map(|d| d.message).collect();
        assert!(messages.iter().any(|m| m == "Switch cases may not have empty bodies"));
    }

    #[test]
    fn switch_rejects_default_before_case() {
        let source = "p read X { switch X { default: Y := nil case 1: Y := X } } write Y";
        let (program, diagnostics) = parse_extended(source);
        assert!(!program.is_complete());
        let messages: Vec<_> = diagnostics.consume().into_iter().map(|d| d.message).collect();
        assert!(messages.iter().any(|m| m == "The 'default' case should be the last case in the block"));
    }

    #[test]
    fn switch_parses_cleanly_when_well_formed() {
        let source = "p read X { switch X { case 1: Y := X case 2: Y := nil default: Y := X } } write Y";
        let (program, diagnostics) = parse_extended(source);
        assert!(diagnostics.is_empty());
        assert!(program.is_complete());
        let Command::Switch { cases, default_body, .. } = &program.body.commands[0] else { panic!("expected switch") };
        assert_eq!(cases.len(), 2);
        assert!(default_body.is_some());
    }

    #[test]
    fn macro_call_and_tree_expr_are_disambiguated() {
        let (program, diagnostics) = parse_extended("p read X { Y := <Foo> X; Z := <X.Y> } write Z");
        assert!(diagnostics.is_empty());
        let Command::Assign { value: Some(Expr::MacroCall { program_name, .. }), .. } = &program.body.commands[0]
        else {
            panic!("expected a macro call")
        };
        assert_eq!(program_name, "Foo");
        let Command::Assign { value: Some(Expr::TreeExpr { .. }), .. } = &program.body.commands[1] else {
            panic!("expected a tree expression")
        };
    }

    #[test]
    fn list_literal_parses_elements() {
        let (program, diagnostics) = parse_extended("p read X { Y := [1, 2, 3] } write Y");
        assert!(diagnostics.is_empty());
        let Command::Assign { value: Some(Expr::List { elements, .. }), .. } = &program.body.commands[0] else {
            panic!("expected a list")
        };
        assert_eq!(elements.len(), 3);
    }

    #[test]
    fn nil_identifier_parses_as_tree_literal() {
        let (program, diagnostics) = parse_pure("p read X { Y := nil } write Y");
        assert!(diagnostics.is_empty());
        let Command::Assign { value: Some(Expr::TreeLiteral { value, .. }), .. } = &program.body.commands[0] else {
            panic!("expected a tree literal")
        };
        assert!(value.is_nil());
    }

    #[test]
    fn pure_mode_rejects_equality_symbol_as_unknown_not_as_grammar() {
        // `=` lexes to `unknown` in pure mode, so this never reaches the
        // parser as a genuine equality expression.
        let (tokens, lex_diagnostics) = while_lexer::lex("p read X { Y := X = X } write Y", true);
        assert_eq!(lex_diagnostics.len(), 1);
        let (_, parse_diagnostics) = parse(tokens, true);
        assert!(!parse_diagnostics.is_empty());
    }

    #[test]
    fn empty_body_block_is_valid_and_complete() {
        let (program, diagnostics) = parse_pure("p read X { } write X");
        assert!(diagnostics.is_empty());
        assert!(program.body.complete);
        assert!(program.body.commands.is_empty());
    }
}
