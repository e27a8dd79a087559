//! Component C10(c) / C11. Follows `FunctionInliner`'s shape
//! (`compiler/passes/src/function_inlining/inline_expression.rs`): a
//! macro call reconstructs to a plain identifier plus a list of
//! "additional" statements the caller splices in just before the
//! enclosing command — here those are the freshened input-assignment and
//! body of the inlined copy.

use std::cell::RefCell;

use indexmap::IndexMap;
use while_ast::{Block, Command, Expr, Program};
use while_errors::{Result, ToolchainError};
use while_namespace::NamespaceManager;

use crate::occurrences::collect_variables;
use crate::rename::rename_variable;

/// Holds every macro program callable by name, and answers dependency
/// queries for macros referenced but not yet registered (C11).
/// `RefCell`-wrapped, like [`while_namespace::NamespaceManager`], so a
/// lowering pass can register the synthesised equality macro through a shared `&MacroManager` without a separate `&mut`
/// threaded down through every recursive call.
#[derive(Default)]
pub struct MacroManager {
    programs: RefCell<IndexMap<String, Program>>,
}

impl MacroManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, name: impl Into<String>, program: Program) {
        self.programs.borrow_mut().insert(name.into(), program);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.programs.borrow().contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Program> {
        self.programs.borrow().get(name).cloned()
    }

    /// Every macro name referenced anywhere in `program` that has not been
    /// registered here, in order of first appearance.
    pub fn undefined_references(&self, program: &Program) -> Vec<String> {
        let mut seen = Vec::new();
        for occurrence in crate::occurrences::collect_macro_calls(program) {
            if !self.contains(&occurrence.program_name) && !seen.contains(&occurrence.program_name) {
                seen.push(occurrence.program_name);
            }
        }
        seen
    }
}

/// Inlines every macro call in `program`'s body.
/// When `to_pure` is set, each macro's copied body is lowered to pure
/// WHILE before its variables are freshened, so nested macro calls
/// introduced by that lowering (the synthesised `=` equality calls) are
/// inlined too, in the same pass.
pub fn inline_all(program: Program, macros: &MacroManager, namespace: &NamespaceManager, to_pure: bool) -> Result<Program> {
    let body = inline_block(program.body, macros, namespace, to_pure)?;
    Ok(Program { body, ..program })
}

fn inline_block(block: Block, macros: &MacroManager, namespace: &NamespaceManager, to_pure: bool) -> Result<Block> {
    let mut commands = Vec::with_capacity(block.commands.len());
    for command in block.commands {
        let (command, prelude) = inline_command(command, macros, namespace, to_pure)?;
        commands.extend(prelude);
        commands.push(command);
    }
    Ok(Block { commands, ..block })
}

fn inline_command(
    command: Command,
    macros: &MacroManager,
    namespace: &NamespaceManager,
    to_pure: bool,
) -> Result<(Command, Vec<Command>)> {
    Ok(match command {
        Command::Assign { target, value, complete, span } => {
            let (value, prelude) = inline_expr_opt(value, macros, namespace, to_pure)?;
            (Command::Assign { target, value, complete, span }, prelude)
        }
        Command::Cond { condition, then_body, else_body, complete, span } => {
            let (condition, prelude) = inline_expr_opt(condition, macros, namespace, to_pure)?;
            let then_body = inline_block(then_body, macros, namespace, to_pure)?;
            let else_body = else_body.map(|b| inline_block(b, macros, namespace, to_pure)).transpose()?;
            (Command::Cond { condition, then_body, else_body, complete, span }, prelude)
        }
        Command::Loop { condition, body, complete, span } => {
            let (condition, prelude) = inline_expr_opt(condition, macros, namespace, to_pure)?;
            let body = inline_block(body, macros, namespace, to_pure)?;
            (Command::Loop { condition, body, complete, span }, prelude)
        }
        Command::Switch { condition, cases, default_body, complete, span } => {
            let (condition, prelude) = inline_expr_opt(condition, macros, namespace, to_pure)?;
            let mut new_cases = Vec::with_capacity(cases.len());
            for mut case in cases {
                case.body = inline_block(case.body, macros, namespace, to_pure)?;
                new_cases.push(case);
            }
            let default_body = default_body.map(|b| inline_block(b, macros, namespace, to_pure)).transpose()?;
            (Command::Switch { condition, cases: new_cases, default_body, complete, span }, prelude)
        }
    })
}

fn inline_expr_opt(
    expr: Option<Expr>,
    macros: &MacroManager,
    namespace: &NamespaceManager,
    to_pure: bool,
) -> Result<(Option<Expr>, Vec<Command>)> {
    match expr {
        Some(expr) => {
            let (expr, prelude) = inline_expr(expr, macros, namespace, to_pure)?;
            Ok((Some(expr), prelude))
        }
        None => Ok((None, Vec::new())),
    }
}

fn inline_expr(expr: Expr, macros: &MacroManager, namespace: &NamespaceManager, to_pure: bool) -> Result<(Expr, Vec<Command>)> {
    match expr {
        Expr::Op { kind, args, complete, span } => {
            let mut prelude = Vec::new();
            let mut new_args = Vec::with_capacity(args.len());
            for arg in args {
                let (arg, mut arg_prelude) = inline_expr(arg, macros, namespace, to_pure)?;
                prelude.append(&mut arg_prelude);
                new_args.push(arg);
            }
            Ok((Expr::Op { kind, args: new_args, complete, span }, prelude))
        }
        Expr::Equal { left, right, complete, span } => {
            let (left, mut left_prelude) = inline_expr(*left, macros, namespace, to_pure)?;
            let (right, mut right_prelude) = inline_expr(*right, macros, namespace, to_pure)?;
            left_prelude.append(&mut right_prelude);
            Ok((Expr::Equal { left: Box::new(left), right: Box::new(right), complete, span }, left_prelude))
        }
        Expr::List { elements, complete, span } => {
            let mut prelude = Vec::new();
            let mut new_elements = Vec::with_capacity(elements.len());
            for element in elements {
                let (element, mut element_prelude) = inline_expr(element, macros, namespace, to_pure)?;
                prelude.append(&mut element_prelude);
                new_elements.push(element);
            }
            Ok((Expr::List { elements: new_elements, complete, span }, prelude))
        }
        Expr::TreeExpr { left, right, complete, span } => {
            let (left, mut left_prelude) = inline_expr(*left, macros, namespace, to_pure)?;
            let (right, mut right_prelude) = inline_expr(*right, macros, namespace, to_pure)?;
            left_prelude.append(&mut right_prelude);
            Ok((Expr::TreeExpr { left: Box::new(left), right: Box::new(right), complete, span }, left_prelude))
        }
        Expr::MacroCall { program_name, input, span, .. } => {
            let (input, mut prelude) = inline_expr(*input, macros, namespace, to_pure)?;
            let macro_program = macros
                .get(&program_name)
                .ok_or_else(|| ToolchainError::UnsupportedFeature { construct: format!("undefined macro '{program_name}'") })?;

            // Step 1: a fresh namespace for this copy of the macro.
            let ns = if namespace.namespace_exists(&program_name) { namespace.get_new_namespace() } else { program_name.clone() };

            // Step 2: a private copy, lowered first if the caller wants pure output.
            let mut copy = macro_program;
            if to_pure {
                copy = crate::lowering::to_pure(copy, macros, namespace)?;
            }

            // Step 3: freshen every variable in the copy under the chosen namespace.
            let mut names: Vec<String> = Vec::new();
            for occurrence in collect_variables(&copy) {
                if !names.contains(&occurrence.name) {
                    names.push(occurrence.name);
                }
            }
            for old_name in names {
                let fresh = namespace.add(&old_name, Some(&ns), None, false);
                copy = rename_variable(copy, &old_name, &fresh);
            }

            let copy_input_var = copy.input_var.clone().expect("complete macro has an input variable");
            let copy_output_var = copy.output_var.clone().expect("complete macro has an output variable");

            // Step 4: M_input := e, just before the call's enclosing command.
            prelude.push(Command::Assign {
                target: Some(copy_input_var),
                value: Some(input),
                complete: true,
                span,
            });

            // Step 5: splice the copy's (renamed, and now recursively inlined) body in.
            let inlined_body = inline_block(copy.body, macros, namespace, to_pure)?;
            prelude.extend(inlined_body.commands);

            // Step 6: the call expression becomes a reference to the copy's output.
            Ok((Expr::Ident { name: copy_output_var, span }, prelude))
        }
        other => Ok((other, Vec::new())),
    }
}
