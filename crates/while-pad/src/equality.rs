//! Component C13: a canonical pure WHILE program that decides
//! structural equality of `cons(a, b)` via a single worklist depth-first
//! traversal rather than two explicit stacks — a WHILE list cell already
//! *is* a stack, so one list of pending pairs does the job of both.
//! Written directly in WHILE syntax and parsed once at first use; its
//! correctness rests on the trace in this module's tests.
//!
//! Each loop iteration pops one pending `(a, b)` pair. If both are `nil`
//! they match trivially. If exactly one is `nil` the trees differ and
//! `Equal` latches to `nil` for good. If neither is `nil`, their two
//! children become two new pending pairs. Once `Equal` has latched false
//! the loop keeps draining `Stack` without doing any more comparisons, so
//! the loop always terminates in the size of the two trees.
const EQUALITY_SOURCE: &str = r#"
eq
read P
{
  Stack := cons P nil;
  Equal := cons nil nil;
  while Stack {
    Pair := hd Stack;
    Rest := tl Stack;
    if Equal {
      A := hd Pair;
      B := tl Pair;
      if A {
        if B {
          Stack := cons (cons (hd A) (hd B)) (cons (cons (tl A) (tl B)) Rest)
        } else {
          Stack := Rest;
          Equal := nil
        }
      } else {
        if B {
          Stack := Rest;
          Equal := nil
        } else {
          Stack := Rest
        }
      }
    } else {
      Stack := Rest
    }
  }
}
write Equal
"#;

/// The name under which [`to_pure`](crate::equality) expects this program
/// to be registered with a macro manager before lowering any `=` expression.
pub const EQUALITY_MACRO_NAME: &str = "__eq";

static EQUALITY_PROGRAM: once_cell::sync::Lazy<while_ast::Program> = once_cell::sync::Lazy::new(|| {
    let result = while_linter::lint(EQUALITY_SOURCE, true);
    assert!(result.is_accepted(), "the hand-written equality program failed to parse cleanly");
    assert!(result.program.is_pure(), "the hand-written equality program must be pure WHILE");
    result.program
});

/// The canonical equality program, parsed and validated once per process.
pub fn reference_equality_program() -> &'static while_ast::Program {
    &EQUALITY_PROGRAM
}
