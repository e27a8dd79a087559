//! Component C10(a): walks an AST collecting every variable
//! and macro reference together with its source span, for reporting and
//! for macro dependency discovery (C11). Renaming and inlining themselves
//! are implemented as direct structural rewrites (see `rename.rs` and
//! `inliner.rs`) rather than by replaying these occurrence lists, the same
//! way `FunctionInliner` rebuilds the tree in one pass instead of indexing
//! back into a separately recorded position table.

use while_ast::{Block, Command, Expr, Program};
use while_span::Span;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableOccurrence {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MacroOccurrence {
    pub program_name: String,
    pub span: Span,
}

/// Every identifier reference and assignment target in `program`, in
/// left-to-right, top-to-bottom order.
pub fn collect_variables(program: &Program) -> Vec<VariableOccurrence> {
    let mut out = Vec::new();
    if let Some(name) = &program.input_var {
        out.push(VariableOccurrence { name: name.clone(), span: program.span });
    }
    walk_block(&program.body, &mut out);
    if let Some(name) = &program.output_var {
        out.push(VariableOccurrence { name: name.clone(), span: program.span });
    }
    out
}

fn walk_block(block: &Block, out: &mut Vec<VariableOccurrence>) {
    for command in &block.commands {
        walk_command(command, out);
    }
}

fn walk_command(command: &Command, out: &mut Vec<VariableOccurrence>) {
    match command {
        Command::Assign { target, value, span, .. } => {
            if let Some(target) = target {
                out.push(VariableOccurrence { name: target.clone(), span: *span });
            }
            if let Some(value) = value {
                walk_expr(value, out);
            }
        }
        Command::Cond { condition, then_body, else_body, .. } => {
            if let Some(condition) = condition {
                walk_expr(condition, out);
            }
            walk_block(then_body, out);
            if let Some(else_body) = else_body {
                walk_block(else_body, out);
            }
        }
        Command::Loop { condition, body, .. } => {
            if let Some(condition) = condition {
                walk_expr(condition, out);
            }
            walk_block(body, out);
        }
        Command::Switch { condition, cases, default_body, .. } => {
            if let Some(condition) = condition {
                walk_expr(condition, out);
            }
            for case in cases {
                if let Some(value) = &case.value {
                    walk_expr(value, out);
                }
                walk_block(&case.body, out);
            }
            if let Some(default_body) = default_body {
                walk_block(default_body, out);
            }
        }
    }
}

fn walk_expr(expr: &Expr, out: &mut Vec<VariableOccurrence>) {
    match expr {
        Expr::Ident { name, span } => out.push(VariableOccurrence { name: name.clone(), span: *span }),
        Expr::Op { args, .. } => args.iter().for_each(|a| walk_expr(a, out)),
        Expr::TreeLiteral { .. } | Expr::Missing { .. } => {}
        Expr::Equal { left, right, .. } => {
            walk_expr(left, out);
            walk_expr(right, out);
        }
        Expr::List { elements, .. } => elements.iter().for_each(|e| walk_expr(e, out)),
        Expr::TreeExpr { left, right, .. } => {
            walk_expr(left, out);
            walk_expr(right, out);
        }
        Expr::MacroCall { input, .. } => walk_expr(input, out),
    }
}

/// Every `macro_call` reference in `program`, used by the macro dependency
/// manager (C11) to discover undefined macro references before they are
/// registered.
pub fn collect_macro_calls(program: &Program) -> Vec<MacroOccurrence> {
    let mut out = Vec::new();
    walk_block_macros(&program.body, &mut out);
    out
}

fn walk_block_macros(block: &Block, out: &mut Vec<MacroOccurrence>) {
    for command in &block.commands {
        walk_command_macros(command, out);
    }
}

fn walk_command_macros(command: &Command, out: &mut Vec<MacroOccurrence>) {
    match command {
        Command::Assign { value: Some(value), .. } => walk_expr_macros(value, out),
        Command::Assign { value: None, .. } => {}
        Command::Cond { condition, then_body, else_body, .. } => {
            if let Some(condition) = condition {
                walk_expr_macros(condition, out);
            }
            walk_block_macros(then_body, out);
            if let Some(else_body) = else_body {
                walk_block_macros(else_body, out);
            }
        }
        Command::Loop { condition, body, .. } => {
            if let Some(condition) = condition {
                walk_expr_macros(condition, out);
            }
            walk_block_macros(body, out);
        }
        Command::Switch { condition, cases, default_body, .. } => {
            if let Some(condition) = condition {
                walk_expr_macros(condition, out);
            }
            for case in cases {
                if let Some(value) = &case.value {
                    walk_expr_macros(value, out);
                }
                walk_block_macros(&case.body, out);
            }
            if let Some(default_body) = default_body {
                walk_block_macros(default_body, out);
            }
        }
    }
}

fn walk_expr_macros(expr: &Expr, out: &mut Vec<MacroOccurrence>) {
    match expr {
        Expr::MacroCall { program_name, input, span, .. } => {
            out.push(MacroOccurrence { program_name: program_name.clone(), span: *span });
            walk_expr_macros(input, out);
        }
        Expr::Op { args, .. } => args.iter().for_each(|a| walk_expr_macros(a, out)),
        Expr::Equal { left, right, .. } | Expr::TreeExpr { left, right, .. } => {
            walk_expr_macros(left, out);
            walk_expr_macros(right, out);
        }
        Expr::List { elements, .. } => elements.iter().for_each(|e| walk_expr_macros(e, out)),
        Expr::Ident { .. } | Expr::TreeLiteral { .. } | Expr::Missing { .. } => {}
    }
}
