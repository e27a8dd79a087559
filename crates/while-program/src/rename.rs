//! Component C10(b): atomic rename of a variable across every
//! occurrence. Follows `AssignmentRenamer`'s shape
//! (`compiler/passes/src/function_inlining/assignment_renamer.rs`):
//! rebuilds the tree, substituting a matched name wherever it appears, as
//! one pass rather than mutating positions looked up by index.

use while_ast::{Block, Command, Expr, Program, SwitchCase};

/// Renames every occurrence of `old` to `new` — as an assignment target, an
/// identifier reference, `input_var`, and `output_var` — leaving everything
/// else untouched. A no-op if `old` does not occur.
pub fn rename_variable(program: Program, old: &str, new: &str) -> Program {
    Program {
        input_var: program.input_var.map(|v| if v == old { new.to_string() } else { v }),
        body: rename_block(program.body, old, new),
        output_var: program.output_var.map(|v| if v == old { new.to_string() } else { v }),
        ..program
    }
}

fn rename_block(block: Block, old: &str, new: &str) -> Block {
    Block { commands: block.commands.into_iter().map(|c| rename_command(c, old, new)).collect(), ..block }
}

fn rename_command(command: Command, old: &str, new: &str) -> Command {
    match command {
        Command::Assign { target, value, complete, span } => Command::Assign {
            target: target.map(|t| if t == old { new.to_string() } else { t }),
            value: value.map(|v| rename_expr(v, old, new)),
            complete,
            span,
        },
        Command::Cond { condition, then_body, else_body, complete, span } => Command::Cond {
            condition: condition.map(|c| rename_expr(c, old, new)),
            then_body: rename_block(then_body, old, new),
            else_body: else_body.map(|b| rename_block(b, old, new)),
            complete,
            span,
        },
        Command::Loop { condition, body, complete, span } => Command::Loop {
            condition: condition.map(|c| rename_expr(c, old, new)),
            body: rename_block(body, old, new),
            complete,
            span,
        },
        Command::Switch { condition, cases, default_body, complete, span } => Command::Switch {
            condition: condition.map(|c| rename_expr(c, old, new)),
            cases: cases
                .into_iter()
                .map(|case| SwitchCase {
                    value: case.value.map(|v| rename_expr(v, old, new)),
                    body: rename_block(case.body, old, new),
                    ..case
                })
                .collect(),
            default_body: default_body.map(|b| rename_block(b, old, new)),
            complete,
            span,
        },
    }
}

fn rename_expr(expr: Expr, old: &str, new: &str) -> Expr {
    match expr {
        Expr::Ident { name, span } => Expr::Ident { name: if name == old { new.to_string() } else { name }, span },
        Expr::Op { kind, args, complete, span } => {
            Expr::Op { kind, args: args.into_iter().map(|a| rename_expr(a, old, new)).collect(), complete, span }
        }
        Expr::TreeLiteral { .. } | Expr::Missing { .. } => expr,
        Expr::Equal { left, right, complete, span } => Expr::Equal {
            left: Box::new(rename_expr(*left, old, new)),
            right: Box::new(rename_expr(*right, old, new)),
            complete,
            span,
        },
        Expr::List { elements, complete, span } => {
            Expr::List { elements: elements.into_iter().map(|e| rename_expr(e, old, new)).collect(), complete, span }
        }
        Expr::TreeExpr { left, right, complete, span } => Expr::TreeExpr {
            left: Box::new(rename_expr(*left, old, new)),
            right: Box::new(rename_expr(*right, old, new)),
            complete,
            span,
        },
        Expr::MacroCall { program_name, input, complete, span } => {
            Expr::MacroCall { program_name, input: Box::new(rename_expr(*input, old, new)), complete, span }
        }
    }
}

#[cfg(test)]
mod tests {
    use while_ast::OpKind;
    use while_span::Span;

    use super::*;

    fn ident(name: &str) -> Expr {
        Expr::Ident { name: name.to_string(), span: Span::dummy() }
    }

    #[test]
    fn renames_target_and_references() {
        let program = Program {
            name: Some("p".to_string()),
            input_var: Some("X".to_string()),
            body: Block::new(
                vec![Command::Assign {
                    target: Some("X".to_string()),
                    value: Some(Expr::Op { kind: OpKind::Hd, args: vec![ident("X")], complete: true, span: Span::dummy() }),
                    complete: true,
                    span: Span::dummy(),
                }],
                true,
                Span::dummy(),
            ),
            output_var: Some("X".to_string()),
            complete: true,
            span: Span::dummy(),
        };

        let renamed = rename_variable(program, "X", "FRESH");
        assert_eq!(renamed.input_var.as_deref(), Some("FRESH"));
        assert_eq!(renamed.output_var.as_deref(), Some("FRESH"));
        match &renamed.body.commands[0] {
            Command::Assign { target, value, .. } => {
                assert_eq!(target.as_deref(), Some("FRESH"));
                match value.as_ref().unwrap() {
                    Expr::Op { args, .. } => assert!(matches!(&args[0], Expr::Ident { name, .. } if name == "FRESH")),
                    _ => panic!("expected an op"),
                }
            }
            _ => panic!("expected an assign"),
        }
    }

    #[test]
    fn leaves_unrelated_names_untouched() {
        let program = Program {
            name: Some("p".to_string()),
            input_var: Some("X".to_string()),
            body: Block::new(vec![], true, Span::dummy()),
            output_var: Some("Y".to_string()),
            complete: true,
            span: Span::dummy(),
        };
        let renamed = rename_variable(program, "X", "FRESH");
        assert_eq!(renamed.output_var.as_deref(), Some("Y"));
    }
}
