//! Component C10(d). Each extended
//! construct rewrites to a structural equivalent built from `cons`/`hd`/
//! `tl`/`ident`/`nil`; `=` and `switch` additionally route through the
//! macro inliner (C13's equality program, and nested `if`s, respectively).
//! Follows the `Reconstructor` family's shape
//! (`compiler/passes/src/function_inlining/*`): one rewrite rule per
//! extended node, same shape as `AssignmentRenamer`/`FunctionInliner`.

use while_ast::{Block, Command, Expr, OpKind, Program, SwitchCase};
use while_errors::Result;
use while_namespace::NamespaceManager;
use while_span::Span;
use while_tree::Tree;

use crate::inliner::{inline_all, MacroManager};

/// Lowers `program` to semantically equivalent pure WHILE.
/// Idempotent on an already-pure program. Registers the canonical
/// equality macro with `macros` on demand, under
/// [`while_pad::EQUALITY_MACRO_NAME`], and relies on the caller's `macros`
/// for any user-defined macros the program itself calls.
pub fn to_pure(program: Program, macros: &MacroManager, namespace: &NamespaceManager) -> Result<Program> {
    if !macros.contains(while_pad::EQUALITY_MACRO_NAME) {
        macros.register(while_pad::EQUALITY_MACRO_NAME, while_pad::reference_equality_program().clone());
    }
    let body = lower_block(program.body)?;
    let lowered = Program { body, ..program };
    inline_all(lowered, macros, namespace, true)
}

fn lower_block(block: Block) -> Result<Block> {
    let mut commands = Vec::with_capacity(block.commands.len());
    for command in block.commands {
        commands.extend(lower_command(command)?);
    }
    Ok(Block { commands, ..block })
}

fn lower_command(command: Command) -> Result<Vec<Command>> {
    Ok(match command {
        Command::Assign { target, value, complete, span } => {
            vec![Command::Assign { target, value: value.map(lower_expr).transpose()?, complete, span }]
        }
        Command::Cond { condition, then_body, else_body, complete, span } => vec![Command::Cond {
            condition: condition.map(lower_expr).transpose()?,
            then_body: lower_block(then_body)?,
            else_body: else_body.map(lower_block).transpose()?,
            complete,
            span,
        }],
        Command::Loop { condition, body, complete, span } => vec![Command::Loop {
            condition: condition.map(lower_expr).transpose()?,
            body: lower_block(body)?,
            complete,
            span,
        }],
        Command::Switch { condition, cases, default_body, span, .. } => {
            let condition = condition.map(lower_expr).transpose()?.expect("complete switch has a condition");
            let default_body = match default_body {
                Some(body) => lower_block(body)?,
                None => Block::new(vec![], true, span),
            };
            let mut else_block = default_body;
            for case in cases.into_iter().rev() {
                else_block = lower_case(case, &condition, span, else_block)?;
            }
            // An empty cases list degenerates to an unconditional branch onto the default body.
            else_block.commands
        }
    })
}

fn lower_case(case: SwitchCase, condition: &Expr, span: Span, else_block: Block) -> Result<Block> {
    let value = lower_expr(case.value.expect("complete switch case has a value"))?;
    let then_body = lower_block(case.body)?;
    let equality = Expr::Equal { left: Box::new(condition.clone()), right: Box::new(value), complete: true, span };
    let cond_command =
        Command::Cond { condition: Some(equality), then_body, else_body: Some(else_block), complete: true, span };
    Ok(Block::new(vec![cond_command], true, span))
}

fn lower_expr(expr: Expr) -> Result<Expr> {
    Ok(match expr {
        Expr::Ident { .. } => expr,
        Expr::TreeLiteral { value, span } => tree_to_pure_expr(&value, span),
        Expr::Op { kind, args, complete, span } => {
            Expr::Op { kind, args: args.into_iter().map(lower_expr).collect::<Result<_>>()?, complete, span }
        }
        Expr::Equal { left, right, span, .. } => {
            let left = lower_expr(*left)?;
            let right = lower_expr(*right)?;
            let input = Expr::Op { kind: OpKind::Cons, args: vec![left, right], complete: true, span };
            Expr::MacroCall {
                program_name: while_pad::EQUALITY_MACRO_NAME.to_string(),
                input: Box::new(input),
                complete: true,
                span,
            }
        }
        Expr::List { elements, span, .. } => {
            let elements = elements.into_iter().map(lower_expr).collect::<Result<Vec<_>>>()?;
            elements.into_iter().rev().fold(Expr::TreeLiteral { value: Tree::Nil, span }, |tail, head| Expr::Op {
                kind: OpKind::Cons,
                args: vec![head, tail],
                complete: true,
                span,
            })
        }
        Expr::TreeExpr { left, right, span, .. } => {
            Expr::Op { kind: OpKind::Cons, args: vec![lower_expr(*left)?, lower_expr(*right)?], complete: true, span }
        }
        Expr::MacroCall { program_name, input, complete, span } => {
            Expr::MacroCall { program_name, input: Box::new(lower_expr(*input)?), complete, span }
        }
        Expr::Missing { .. } => expr,
    })
}

/// Unfolds an already-encoded tree value (from a numeric or boolean
/// literal, eagerly encoded at parse time) into the equivalent pure
/// `cons`/`nil` expression tree.
fn tree_to_pure_expr(tree: &Tree, span: Span) -> Expr {
    if tree.is_nil() {
        Expr::TreeLiteral { value: Tree::Nil, span }
    } else {
        let left = tree_to_pure_expr(&tree.hd(), span);
        let right = tree_to_pure_expr(&tree.tl(), span);
        Expr::Op { kind: OpKind::Cons, args: vec![left, right], complete: true, span }
    }
}
