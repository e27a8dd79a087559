//! Components C10/C11: variable/macro occurrence
//! analysis, atomic renaming, macro inlining, and `toPure` lowering, tied
//! together behind a `ProgramManager` that owns one program plus the
//! namespace and macro registries its transforms draw fresh names from.

mod inliner;
mod lowering;
mod occurrences;
mod rename;

pub use inliner::MacroManager;
pub use occurrences::{collect_macro_calls, collect_variables, MacroOccurrence, VariableOccurrence};
pub use rename::rename_variable;
pub use while_namespace::NamespaceManager;

use while_ast::Program;
use while_errors::Result;

/// Owns a program's AST plus the namespace manager its own transforms (and
/// any macro it inlines) draw fresh variable names from. Transforms are
/// destructive: each one consumes `self` and returns the rewritten form, so
/// callers must re-acquire references after `rename`/`inline_macros`/
/// `to_pure`.
pub struct ProgramManager {
    program: Program,
    namespace: NamespaceManager,
}

impl ProgramManager {
    /// Seeds the namespace manager with every variable already live in
    /// `program`, each mapped to itself in the default namespace, before
    /// any transform runs. Without this, a macro inlined later would draw
    /// fresh names from `"A"` with no awareness of the host program's own
    /// variables, and could mint a name that collides with one already in
    /// use (e.g. a host variable literally named `A`), silently clobbering
    /// it.
    pub fn new(program: Program) -> Self {
        let namespace = NamespaceManager::new();
        for occurrence in collect_variables(&program) {
            namespace.add(&occurrence.name, None, Some(occurrence.name.clone()), false);
        }
        Self { program, namespace }
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn into_program(self) -> Program {
        self.program
    }

    pub fn variables(&self) -> Vec<VariableOccurrence> {
        collect_variables(&self.program)
    }

    pub fn macro_calls(&self) -> Vec<MacroOccurrence> {
        collect_macro_calls(&self.program)
    }

    /// Renames `old` to `new` across every occurrence.
    pub fn rename(&mut self, old: &str, new: &str) {
        let program = std::mem::replace(&mut self.program, placeholder());
        self.program = rename_variable(program, old, new);
    }

    /// Inlines every macro call in the program against `macros` (the
    /// macro-inlining algorithm). Leaves the program pure only if every
    /// registered macro it (transitively) calls already is.
    pub fn inline_macros(&mut self, macros: &MacroManager) -> Result<()> {
        let program = std::mem::replace(&mut self.program, placeholder());
        self.program = inliner::inline_all(program, macros, &self.namespace, false)?;
        Ok(())
    }

    /// Converts the program to semantically equivalent pure WHILE: unfolds
    /// `true`/`false`/numeric literals/lists/tree expressions, lowers `=`
    /// via the equality macro, and `switch` into nested `if`s, inlining
    /// away every macro call that remains.
    pub fn to_pure(&mut self, macros: &MacroManager) -> Result<()> {
        let program = std::mem::replace(&mut self.program, placeholder());
        self.program = lowering::to_pure(program, macros, &self.namespace)?;
        Ok(())
    }
}

fn placeholder() -> Program {
    Program {
        name: None,
        input_var: None,
        body: while_ast::Block::new(vec![], true, while_span::Span::dummy()),
        output_var: None,
        complete: false,
        span: while_span::Span::dummy(),
    }
}

#[cfg(test)]
mod tests {
    use while_tree::Tree;

    use super::*;

    fn parse_extended(source: &str) -> Program {
        let (tokens, lex_diagnostics) = while_lexer::lex(source, false);
        assert!(lex_diagnostics.is_empty());
        let (program, parse_diagnostics) = while_parser::parse(tokens, false);
        assert!(parse_diagnostics.is_empty());
        assert!(program.is_complete());
        program
    }

    #[test]
    fn rename_preserves_observable_output() {
        let program = parse_extended("p read X { Y := cons X nil } write Y");
        let mut manager = ProgramManager::new(program.clone());
        manager.rename("X", "INPUT");
        let renamed = manager.into_program();

        let input = Tree::encode_nat(4);
        let before = while_interpreter::run(&program, input.clone()).unwrap();
        let after = while_interpreter::run(&renamed, input).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn inlining_a_macro_call_preserves_output() {
        // `double` doubles its input by consing it onto nil twice via tl-free arithmetic
        // stand-in: a macro that just returns `cons nil input`.
        let double = parse_extended("double read N { R := cons nil N } write R");
        let caller = parse_extended("caller read X { Y := <double> X } write Y");

        let macros = MacroManager::new();
        macros.register("double", double);

        let mut manager = ProgramManager::new(caller.clone());
        manager.inline_macros(&macros).unwrap();
        let inlined = manager.into_program();
        assert!(collect_macro_calls(&inlined).is_empty());

        let input = Tree::encode_nat(9);
        let output = while_interpreter::run(&inlined, input.clone()).unwrap();
        assert_eq!(output, Tree::cons(Tree::Nil, input));
    }

    #[test]
    fn undefined_macro_is_reported_before_inlining() {
        let caller = parse_extended("caller read X { Y := <missing> X } write Y");
        let macros = MacroManager::new();
        assert_eq!(macros.undefined_references(&caller), vec!["missing".to_string()]);
    }

    #[test]
    fn inlining_never_clobbers_a_host_variable_sharing_a_freshened_name() {
        // The macro's own variable `N` would be the first name the namespace
        // manager mints on a blank slate ("A") — which must not collide with
        // the caller's own pre-existing variable `A`.
        let double = parse_extended("double read N { R := cons nil N } write R");
        let caller = parse_extended("p read X { A := cons X X; Y := <double> X; Z := A } write Z");

        let macros = MacroManager::new();
        macros.register("double", double);

        let mut manager = ProgramManager::new(caller);
        manager.inline_macros(&macros).unwrap();
        let inlined = manager.into_program();

        let input = Tree::encode_nat(5);
        let output = while_interpreter::run(&inlined, input.clone()).unwrap();
        assert_eq!(output, Tree::cons(input.clone(), input));
    }
}
