//! Statement execution and the iterative expression evaluator. Block/command execution recurses on the host stack —
//! its depth is bounded by the program's lexical nesting, which is fine.
//! Expression evaluation never does: WHILE numbers are cons towers that
//! can be arbitrarily deep, and loop bodies are the same AST node
//! revisited every iteration, so nothing here may mutate the AST itself.

use while_ast::{Block, Command, Expr, OpKind, Program};
use while_errors::{Result, ToolchainError};
use while_tree::Tree;

use crate::store::Store;

/// Runs `program` against `input`, returning the value bound to its output
/// variable when the program terminates.
pub fn run(program: &Program, input: Tree) -> Result<Tree> {
    if !program.is_complete() {
        return Err(ToolchainError::ProgramNotAccepted);
    }
    let input_var = program.input_var.as_deref().expect("complete program has an input variable");
    let output_var = program.output_var.as_deref().expect("complete program has an output variable");

    let mut store = Store::new();
    store.bind(input_var, input);

    run_block(&program.body, &mut store)?;

    let output = store.lookup(output_var);
    tracing::trace!(output_var, "program run complete");
    Ok(output)
}

fn run_block(block: &Block, store: &mut Store) -> Result<()> {
    for command in &block.commands {
        run_command(command, store)?;
    }
    Ok(())
}

fn run_command(command: &Command, store: &mut Store) -> Result<()> {
    match command {
        Command::Assign { target, value, .. } => {
            let target = target.as_deref().expect("complete assign has a target");
            let value = value.as_ref().expect("complete assign has a value");
            let result = eval_expr(value, store)?;
            store.bind(target, result);
            Ok(())
        }
        Command::Cond { condition, then_body, else_body, .. } => {
            let condition = condition.as_ref().expect("complete cond has a condition");
            if eval_expr(condition, store)?.is_truthy() {
                run_block(then_body, store)
            } else if let Some(else_body) = else_body {
                run_block(else_body, store)
            } else {
                Ok(())
            }
        }
        Command::Loop { condition, body, .. } => {
            let condition = condition.as_ref().expect("complete loop has a condition");
            loop {
                if !eval_expr(condition, store)?.is_truthy() {
                    break;
                }
                run_block(body, store)?;
                tracing::trace!("loop iteration complete");
            }
            Ok(())
        }
        // `switch` only ever reaches the interpreter through a bug
        // upstream: `toPure` lowers every switch away, and `run` only
        // accepts a pure AST.
        Command::Switch { .. } => Err(ToolchainError::UnknownToken { kind: "command", tag: "switch".to_string() }),
    }
}

/// One in-progress `op` application: its kind, a borrow of its (unchanged)
/// argument expressions, and the locally accumulated resolved values.
/// `resolved` is a fresh `Vec` per frame — never a view into the AST —
/// which is what keeps a shared loop-body node untouched across
/// iterations.
struct Frame<'e> {
    kind: OpKind,
    args: &'e [Expr],
    resolved: Vec<Tree>,
}

enum Step<'e> {
    Descend(&'e Expr),
    Bubble(Tree),
}

/// Evaluates `expr` without recursing on the host call stack. Maintains an
/// explicit stack of [`Frame`]s; each iteration either descends into the
/// next unresolved argument of the frame on top, or — once a frame's
/// argument list is fully resolved — applies its operation and bubbles the
/// result up to its parent's next slot.
fn eval_expr(root: &Expr, store: &Store) -> Result<Tree> {
    let mut stack: Vec<Frame> = Vec::new();
    let mut step = Step::Descend(root);

    loop {
        step = match step {
            Step::Descend(expr) => match expr {
                Expr::Ident { name, .. } => Step::Bubble(store.lookup(name)),
                Expr::TreeLiteral { value, .. } => Step::Bubble(value.clone()),
                Expr::Op { kind, args, .. } => {
                    stack.push(Frame { kind: *kind, args, resolved: Vec::with_capacity(args.len()) });
                    Step::Descend(&args[0])
                }
                other => return Err(ToolchainError::UnknownToken { kind: "expression", tag: tag_of(other) }),
            },
            Step::Bubble(value) => match stack.last_mut() {
                None => return Ok(value),
                Some(frame) => {
                    frame.resolved.push(value);
                    if frame.resolved.len() == frame.args.len() {
                        let frame = stack.pop().expect("just matched Some(frame) above");
                        Step::Bubble(apply_op(frame.kind, frame.resolved)?)
                    } else {
                        let next = frame.resolved.len();
                        Step::Descend(&frame.args[next])
                    }
                }
            },
        };
    }
}

fn apply_op(kind: OpKind, mut resolved: Vec<Tree>) -> Result<Tree> {
    if resolved.len() != kind.arity() {
        return Err(ToolchainError::UnknownToken {
            kind: "operator arity",
            tag: format!("{} expected {} argument(s), got {}", kind.as_str(), kind.arity(), resolved.len()),
        });
    }
    Ok(match kind {
        OpKind::Cons => {
            let right = resolved.pop().expect("arity checked above");
            let left = resolved.pop().expect("arity checked above");
            Tree::cons(left, right)
        }
        OpKind::Hd => resolved.pop().expect("arity checked above").hd(),
        OpKind::Tl => resolved.pop().expect("arity checked above").tl(),
    })
}

fn tag_of(expr: &Expr) -> String {
    match expr {
        Expr::Ident { .. } => "ident",
        Expr::Op { .. } => "op",
        Expr::TreeLiteral { .. } => "tree_literal",
        Expr::Equal { .. } => "equal",
        Expr::List { .. } => "list",
        Expr::TreeExpr { .. } => "tree_expr",
        Expr::MacroCall { .. } => "macro_call",
        Expr::Missing { .. } => "missing",
    }
    .to_string()
}
