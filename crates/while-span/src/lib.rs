//! Source position and span types, shared by every other crate in the
//! toolchain. Kept dependency-light and standalone, the way `leo-span` is
//! the one crate every other `leo-*` crate depends on.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A zero-indexed `(row, column)` pair in the source text.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }

    /// The position one past this one on the same row.
    pub const fn advance(self, columns: usize) -> Self {
        Self { row: self.row, column: self.column + columns }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.column)
    }
}

/// A `(start, end)` pair of positions, referring to the same logical source.
///
/// Invariant: `start <= end`.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Span {
    pub start: Position,
    pub end: Position,
}

impl Span {
    pub const fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }

    /// A zero-length span at a single position, used for "expected X here"
    /// diagnostics that do not wrap any consumed token.
    pub const fn at(position: Position) -> Self {
        Self { start: position, end: position }
    }

    /// A dummy span for synthesized nodes that have no real source location
    /// (e.g. an absent marker filled in by error recovery).
    pub const fn dummy() -> Self {
        Self::at(Position::new(0, 0))
    }

    /// Returns the smallest span covering both `self` and `other`.
    pub fn merge(self, other: Span) -> Span {
        let start = if self.start.row < other.start.row
            || (self.start.row == other.start.row && self.start.column <= other.start.column)
        {
            self.start
        } else {
            other.start
        };
        let end = if self.end.row > other.end.row || (self.end.row == other.end.row && self.end.column >= other.end.column)
        {
            self.end
        } else {
            other.end
        };
        Span { start, end }
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}
