//! Diagnostics and hard errors for the WHILE toolchain.
//!
//! Two different error shapes are used throughout the toolchain:
//!
//! - [`Diagnostic`]s are *collected* by the lexer and parser as they keep
//!   going past a problem; [`DiagnosticReport`] is the `RefCell`-backed
//!   collector, following the `DiagnosticReport`/`DiagnosticReportInner`
//!   split of `compiler/linter/src/diagnostics.rs`, which itself follows
//!   the interior-mutability idiom used by `NodeBuilder`/`Assigner` so a
//!   collector can be threaded through shared references instead of
//!   `&mut self` everywhere.
//! - [`ToolchainError`] is a `thiserror`-derived enum for *hard* failures:
//!   conditions that abort an operation outright (lowering/PAD encoding of
//!   a non-pure construct, an interpreter invariant violation).

use std::cell::RefCell;
use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Serialize};
use while_span::{Position, Span};

/// A single positioned diagnostic.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub message: String,
    pub start: Position,
    pub end: Option<Position>,
}

impl Diagnostic {
    pub fn new(message: impl Into<String>, span: Span) -> Self {
        Self { message: message.into(), start: span.start, end: Some(span.end) }
    }

    /// A diagnostic anchored to a single point, with no end position.
    pub fn at_point(message: impl Into<String>, start: Position) -> Self {
        Self { message: message.into(), start, end: None }
    }

    pub fn span(&self) -> Span {
        Span { start: self.start, end: self.end.unwrap_or(self.start) }
    }

    /// Render a one-line, human readable form, e.g.
    /// `2:8: Unexpected token "}": Expected ";"`.
    pub fn format(&self) -> String {
        let location = format!("{}", self.start).bold();
        format!("{location}: {}", self.message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format())
    }
}

/// Collects diagnostics produced while lexing or parsing.
///
/// Shared by `&self` reference across recursive-descent calls; the `RefCell`
/// means callers never need a `&mut` chain just to report an error deep in
/// the call stack.
#[derive(Default)]
pub struct DiagnosticReport {
    inner: RefCell<Vec<Diagnostic>>,
}

impl DiagnosticReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&self, diagnostic: Diagnostic) {
        self.inner.borrow_mut().push(diagnostic);
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Consumes the report, returning the diagnostics in emission order.
    pub fn consume(self) -> Vec<Diagnostic> {
        self.inner.into_inner()
    }

    /// Appends another report's diagnostics onto this one, preserving order.
    pub fn extend(&self, other: DiagnosticReport) {
        self.inner.borrow_mut().extend(other.consume());
    }
}

impl fmt::Debug for DiagnosticReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.inner.borrow().iter()).finish()
    }
}

/// Hard failures: conditions where the operation cannot continue and must
/// abort rather than degrade to a best-effort partial result.
#[derive(thiserror::Error, Debug, Clone, Eq, PartialEq)]
pub enum ToolchainError {
    /// `to_pad`/`to_pure` encountered a construct it cannot express purely.
    #[error("Unsupported feature '{construct}'. Ensure the program is in pure WHILE.")]
    UnsupportedFeature { construct: String },

    /// The interpreter encountered an AST tag it does not recognise. This is
    /// an internal invariant violation (a bug), never a user error.
    #[error("internal error: unknown {kind} token '{tag}'")]
    UnknownToken { kind: &'static str, tag: String },

    /// The caller asked to run a program that was never accepted by `lint`
    /// (diagnostics were reported, or the AST was left incomplete).
    #[error("cannot run a program with outstanding diagnostics or an incomplete AST")]
    ProgramNotAccepted,

    /// A PAD list did not match the expected grammar.
    #[error("malformed PAD data: {0}")]
    MalformedPad(String),
}

pub type Result<T, E = ToolchainError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_preserves_emission_order() {
        let report = DiagnosticReport::new();
        report.emit(Diagnostic::at_point("first", Position::new(0, 0)));
        report.emit(Diagnostic::at_point("second", Position::new(0, 1)));
        let diagnostics = report.consume();
        assert_eq!(diagnostics[0].message, "first");
        assert_eq!(diagnostics[1].message, "second");
    }

    #[test]
    fn extend_appends_in_order() {
        let a = DiagnosticReport::new();
        a.emit(Diagnostic::at_point("a", Position::new(0, 0)));
        let b = DiagnosticReport::new();
        b.emit(Diagnostic::at_point("b", Position::new(0, 0)));
        a.extend(b);
        let diagnostics = a.consume();
        assert_eq!(diagnostics.len(), 2);
        assert_eq!(diagnostics[1].message, "b");
    }
}
