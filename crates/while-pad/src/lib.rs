//! Programs-as-data: encodes a
//! pure WHILE AST as a nested-list value and back, plus two textual
//! renderings of that value, and the canonical equality program used by
//! `while-program`'s `=` lowering.

mod codec;
mod equality;
mod text;

pub use codec::{decode, encode};
pub use equality::{reference_equality_program, EQUALITY_MACRO_NAME};
pub use text::{parse_pad, render_hwhile, render_pure};
