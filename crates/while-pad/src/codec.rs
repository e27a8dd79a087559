//! Component C12: pure AST <-> nested-list encoding, using
//! `serde_json::Value` as the carrier the way other crates in this family
//! reach for `serde_json` whenever they need an untyped tree shape rather
//! than a fixed schema.

use indexmap::IndexMap;
use serde_json::{json, Value};
use while_ast::{Block, Command, Expr, OpKind, Program};
use while_errors::{Result, ToolchainError};
use while_span::Span;
use while_tree::Tree;

fn non_pure(construct: &str) -> ToolchainError {
    ToolchainError::UnsupportedFeature { construct: construct.to_string() }
}

fn malformed(message: impl Into<String>) -> ToolchainError {
    ToolchainError::MalformedPad(message.into())
}

/// Assigns each variable name an index in order of first textual
/// appearance, the input variable always taking index 0.
fn assign_indices(program: &Program) -> Result<IndexMap<String, usize>> {
    fn ensure(indices: &mut IndexMap<String, usize>, name: &str) {
        if !indices.contains_key(name) {
            let next = indices.len();
            indices.insert(name.to_string(), next);
        }
    }

    fn visit_expr(expr: &Expr, indices: &mut IndexMap<String, usize>) -> Result<()> {
        match expr {
            Expr::Ident { name, .. } => {
                ensure(indices, name);
                Ok(())
            }
            Expr::TreeLiteral { value, .. } if value.is_nil() => Ok(()),
            Expr::Op { args, .. } => {
                for arg in args {
                    visit_expr(arg, indices)?;
                }
                Ok(())
            }
            other => Err(non_pure(tag_of(other))),
        }
    }

    fn visit_block(block: &Block, indices: &mut IndexMap<String, usize>) -> Result<()> {
        for command in &block.commands {
            match command {
                Command::Assign { target, value, .. } => {
                    let target = target.as_deref().ok_or_else(|| malformed("assign with no target"))?;
                    ensure(indices, target);
                    visit_expr(value.as_ref().ok_or_else(|| malformed("assign with no value"))?, indices)?;
                }
                Command::Cond { condition, then_body, else_body, .. } => {
                    visit_expr(condition.as_ref().ok_or_else(|| malformed("cond with no condition"))?, indices)?;
                    visit_block(then_body, indices)?;
                    if let Some(else_body) = else_body {
                        visit_block(else_body, indices)?;
                    }
                }
                Command::Loop { condition, body, .. } => {
                    visit_expr(condition.as_ref().ok_or_else(|| malformed("loop with no condition"))?, indices)?;
                    visit_block(body, indices)?;
                }
                Command::Switch { .. } => return Err(non_pure("switch")),
            }
        }
        Ok(())
    }

    let mut indices = IndexMap::new();
    let input_var = program.input_var.as_deref().ok_or_else(|| malformed("program with no input variable"))?;
    ensure(&mut indices, input_var);
    visit_block(&program.body, &mut indices)?;
    let output_var = program.output_var.as_deref().ok_or_else(|| malformed("program with no output variable"))?;
    ensure(&mut indices, output_var);
    Ok(indices)
}

fn tag_of(expr: &Expr) -> &'static str {
    match expr {
        Expr::Ident { .. } => "ident",
        Expr::Op { .. } => "op",
        Expr::TreeLiteral { .. } => "numeric or boolean literal",
        Expr::Equal { .. } => "=",
        Expr::List { .. } => "list",
        Expr::TreeExpr { .. } => "tree expression",
        Expr::MacroCall { .. } => "macro call",
        Expr::Missing { .. } => "incomplete expression",
    }
}

fn encode_expr(expr: &Expr, indices: &IndexMap<String, usize>) -> Result<Value> {
    match expr {
        Expr::Ident { name, .. } => Ok(json!(["var", indices[name]])),
        Expr::TreeLiteral { value, .. } if value.is_nil() => Ok(json!(["quote", "nil"])),
        Expr::Op { kind: OpKind::Cons, args, .. } => {
            Ok(json!(["cons", encode_expr(&args[0], indices)?, encode_expr(&args[1], indices)?]))
        }
        Expr::Op { kind: OpKind::Hd, args, .. } => Ok(json!(["hd", encode_expr(&args[0], indices)?])),
        Expr::Op { kind: OpKind::Tl, args, .. } => Ok(json!(["tl", encode_expr(&args[0], indices)?])),
        other => Err(non_pure(tag_of(other))),
    }
}

fn encode_command(command: &Command, indices: &IndexMap<String, usize>) -> Result<Value> {
    match command {
        Command::Assign { target, value, .. } => {
            let target = indices[target.as_deref().expect("validated by assign_indices")];
            Ok(json!([":=", target, encode_expr(value.as_ref().expect("validated by assign_indices"), indices)?]))
        }
        Command::Cond { condition, then_body, else_body, .. } => {
            let condition = encode_expr(condition.as_ref().expect("validated by assign_indices"), indices)?;
            let then_body = encode_block(then_body, indices)?;
            let else_body = match else_body {
                Some(block) => encode_block(block, indices)?,
                None => json!([]),
            };
            Ok(json!(["if", condition, then_body, else_body]))
        }
        Command::Loop { condition, body, .. } => {
            let condition = encode_expr(condition.as_ref().expect("validated by assign_indices"), indices)?;
            Ok(json!(["while", condition, encode_block(body, indices)?]))
        }
        Command::Switch { .. } => Err(non_pure("switch")),
    }
}

fn encode_block(block: &Block, indices: &IndexMap<String, usize>) -> Result<Value> {
    let commands: Result<Vec<Value>> = block.commands.iter().map(|c| encode_command(c, indices)).collect();
    Ok(Value::Array(commands?))
}

/// Encodes a complete, pure program as PAD. Fails at the first non-pure
/// node encountered.
pub fn encode(program: &Program) -> Result<Value> {
    if !program.is_complete() {
        return Err(malformed("program is incomplete"));
    }
    let indices = assign_indices(program)?;
    let input_index = indices[program.input_var.as_deref().expect("checked above")];
    let body = encode_block(&program.body, &indices)?;
    let output_index = indices[program.output_var.as_deref().expect("checked above")];
    tracing::debug!(variables = indices.len(), "encoded program to PAD");
    Ok(json!([input_index, body, output_index]))
}

fn var_name(index: u64) -> String {
    format!("V{index}")
}

fn decode_expr(value: &Value) -> Result<Expr> {
    let arr = value.as_array().filter(|a| !a.is_empty()).ok_or_else(|| malformed("expected a non-empty list"))?;
    let tag = arr[0].as_str().ok_or_else(|| malformed("expected a tag string"))?;
    match tag {
        "var" => {
            let index = arr.get(1).and_then(Value::as_u64).ok_or_else(|| malformed("'var' missing an index"))?;
            Ok(Expr::Ident { name: var_name(index), span: Span::dummy() })
        }
        "quote" if arr.get(1).and_then(Value::as_str) == Some("nil") => {
            Ok(Expr::TreeLiteral { value: Tree::Nil, span: Span::dummy() })
        }
        "cons" => {
            let left = decode_expr(arr.get(1).ok_or_else(|| malformed("'cons' missing its left operand"))?)?;
            let right = decode_expr(arr.get(2).ok_or_else(|| malformed("'cons' missing its right operand"))?)?;
            Ok(Expr::Op { kind: OpKind::Cons, args: vec![left, right], complete: true, span: Span::dummy() })
        }
        "hd" => {
            let arg = decode_expr(arr.get(1).ok_or_else(|| malformed("'hd' missing its operand"))?)?;
            Ok(Expr::Op { kind: OpKind::Hd, args: vec![arg], complete: true, span: Span::dummy() })
        }
        "tl" => {
            let arg = decode_expr(arr.get(1).ok_or_else(|| malformed("'tl' missing its operand"))?)?;
            Ok(Expr::Op { kind: OpKind::Tl, args: vec![arg], complete: true, span: Span::dummy() })
        }
        other => Err(malformed(format!("unrecognised expression tag '{other}'"))),
    }
}

fn decode_command(value: &Value) -> Result<Command> {
    let arr = value.as_array().filter(|a| !a.is_empty()).ok_or_else(|| malformed("expected a non-empty list"))?;
    let tag = arr[0].as_str().ok_or_else(|| malformed("expected a tag string"))?;
    match tag {
        ":=" => {
            let index = arr.get(1).and_then(Value::as_u64).ok_or_else(|| malformed("':=' missing its target"))?;
            let value = decode_expr(arr.get(2).ok_or_else(|| malformed("':=' missing its value"))?)?;
            Ok(Command::Assign { target: Some(var_name(index)), value: Some(value), complete: true, span: Span::dummy() })
        }
        "while" => {
            let condition = decode_expr(arr.get(1).ok_or_else(|| malformed("'while' missing its condition"))?)?;
            let body = decode_block(arr.get(2).ok_or_else(|| malformed("'while' missing its body"))?)?;
            Ok(Command::Loop { condition: Some(condition), body, complete: true, span: Span::dummy() })
        }
        "if" => {
            let condition = decode_expr(arr.get(1).ok_or_else(|| malformed("'if' missing its condition"))?)?;
            let then_body = decode_block(arr.get(2).ok_or_else(|| malformed("'if' missing its then-branch"))?)?;
            let else_value = arr.get(3).ok_or_else(|| malformed("'if' missing its else-branch"))?;
            let else_array = else_value.as_array().ok_or_else(|| malformed("'if' else-branch is not a list"))?;
            let else_body = if else_array.is_empty() { None } else { Some(decode_block(else_value)?) };
            Ok(Command::Cond { condition: Some(condition), then_body, else_body, complete: true, span: Span::dummy() })
        }
        other => Err(malformed(format!("unrecognised command tag '{other}'"))),
    }
}

fn decode_block(value: &Value) -> Result<Block> {
    let arr = value.as_array().ok_or_else(|| malformed("expected a command list"))?;
    let commands: Result<Vec<Command>> = arr.iter().map(decode_command).collect();
    Ok(Block::new(commands?, true, Span::dummy()))
}

/// Decodes PAD back into a program. The decoded program's variables are
/// named `V0, V1, …` by index; PAD carries no program name, so a synthetic
/// one is assigned.
pub fn decode(value: &Value) -> Result<Program> {
    let arr = value.as_array().ok_or_else(|| malformed("expected a 3-element program list"))?;
    if arr.len() != 3 {
        return Err(malformed(format!("expected a 3-element program list, got {} elements", arr.len())));
    }
    let input_index = arr[0].as_u64().ok_or_else(|| malformed("program's input index must be a number"))?;
    let body = decode_block(&arr[1])?;
    let output_index = arr[2].as_u64().ok_or_else(|| malformed("program's output index must be a number"))?;

    Ok(Program {
        name: Some("pad".to_string()),
        input_var: Some(var_name(input_index)),
        body,
        output_var: Some(var_name(output_index)),
        complete: true,
        span: Span::dummy(),
    })
}

#[cfg(test)]
mod tests {
    use while_ast::{Block, Command, Expr, OpKind, Program};

    use super::*;

    fn span() -> Span {
        Span::dummy()
    }

    #[test]
    fn encodes_a_trivial_copy_program() {
        // prog read X { Y := X } write Y
        let program = Program {
            name: Some("prog".to_string()),
            input_var: Some("X".to_string()),
            body: Block::new(
                vec![Command::Assign {
                    target: Some("Y".to_string()),
                    value: Some(Expr::Ident { name: "X".to_string(), span: span() }),
                    complete: true,
                    span: span(),
                }],
                true,
                span(),
            ),
            output_var: Some("Y".to_string()),
            complete: true,
            span: span(),
        };

        let encoded = encode(&program).unwrap();
        assert_eq!(encoded, json!([0, [[":=", 1, ["var", 0]]], 1]));
    }

    #[test]
    fn rejects_a_switch_command() {
        let program = Program {
            name: Some("p".to_string()),
            input_var: Some("X".to_string()),
            body: Block::new(
                vec![Command::Switch {
                    condition: Some(Expr::Ident { name: "X".to_string(), span: span() }),
                    cases: vec![],
                    default_body: Some(Block::new(vec![], true, span())),
                    complete: true,
                    span: span(),
                }],
                true,
                span(),
            ),
            output_var: Some("X".to_string()),
            complete: true,
            span: span(),
        };
        assert!(encode(&program).is_err());
    }

    #[test]
    fn round_trips_through_decode() {
        let program = Program {
            name: Some("prog".to_string()),
            input_var: Some("X".to_string()),
            body: Block::new(
                vec![Command::Assign {
                    target: Some("Y".to_string()),
                    value: Some(Expr::Op {
                        kind: OpKind::Hd,
                        args: vec![Expr::Ident { name: "X".to_string(), span: span() }],
                        complete: true,
                        span: span(),
                    }),
                    complete: true,
                    span: span(),
                }],
                true,
                span(),
            ),
            output_var: Some("Y".to_string()),
            complete: true,
            span: span(),
        };

        let encoded = encode(&program).unwrap();
        let decoded = decode(&encoded).unwrap();
        let reencoded = encode(&decoded).unwrap();
        assert_eq!(encoded, reencoded);
    }

    #[test]
    fn decode_rejects_malformed_tags() {
        assert!(decode(&json!([0, [["nope", 1]], 1])).is_err());
    }
}
