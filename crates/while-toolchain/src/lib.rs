//! The toolchain facade: one crate a host program can depend on instead of
//! wiring up `while-lexer`/`while-parser`/… individually. A library only —
//! no `[[bin]]`, no file I/O, no CLI; those are left to a caller.

pub use while_ast::{Block, Command, Expr, OpKind, Program};
pub use while_errors::{Diagnostic, DiagnosticReport, Result, ToolchainError};
pub use while_interpreter::run as interpret;
pub use while_lexer::lex;
pub use while_linter::{lint, LintResult};
pub use while_namespace::NamespaceManager;
pub use while_pad::{decode as from_pad, encode as to_pad, parse_pad, render_hwhile, render_pure};
pub use while_parser::parse;
pub use while_program::{MacroManager, ProgramManager};
pub use while_tree::Tree;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lint_interpret_and_pad_compose_end_to_end() {
        let result = lint("reverse read X { while X { Y := cons (hd X) Y; X := tl X } } write Y", true);
        assert!(result.is_accepted());

        let input = Tree::list(vec![Tree::encode_nat(1), Tree::encode_nat(2), Tree::encode_nat(3)]);
        let output = interpret(&result.program, input).unwrap();
        assert_eq!(output, Tree::list(vec![Tree::encode_nat(3), Tree::encode_nat(2), Tree::encode_nat(1)]));

        let pad = to_pad(&result.program).unwrap();
        let decoded = from_pad(&pad).unwrap();
        let redecoded_output =
            interpret(&decoded, Tree::list(vec![Tree::encode_nat(1), Tree::encode_nat(2), Tree::encode_nat(3)])).unwrap();
        assert_eq!(redecoded_output, Tree::list(vec![Tree::encode_nat(3), Tree::encode_nat(2), Tree::encode_nat(1)]));
    }

    #[test]
    fn extended_program_lowers_and_runs_through_the_facade() {
        let result = lint("p read X { Y := X = 3 } write Y", false);
        assert!(result.is_accepted());

        let macros = MacroManager::new();
        let mut manager = ProgramManager::new(result.program);
        manager.to_pure(&macros).unwrap();
        let pure = manager.into_program();
        assert!(pure.is_pure());

        assert!(!interpret(&pure, Tree::encode_nat(3)).unwrap().is_nil());
        assert!(interpret(&pure, Tree::encode_nat(4)).unwrap().is_nil());
    }
}
