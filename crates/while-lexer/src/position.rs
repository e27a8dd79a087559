//! Byte offset → `(row, column)` conversion. `logos` reports spans as byte
//! offsets into the source, but diagnostics are reported as row/column
//! pairs, so every emitted token is translated through this index.

use while_span::Position;

pub struct LineIndex {
    /// Byte offset of the first character of each row.
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(source: &str) -> Self {
        let mut starts = vec![0];
        for (offset, ch) in source.char_indices() {
            if ch == '\n' {
                starts.push(offset + 1);
            }
        }
        Self { starts }
    }

    pub fn position(&self, source: &str, byte_offset: usize) -> Position {
        let row = match self.starts.binary_search(&byte_offset) {
            Ok(row) => row,
            Err(row) => row - 1,
        };
        let line_start = self.starts[row];
        let column = source[line_start..byte_offset].chars().count();
        Position::new(row, column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracks_rows_after_newlines() {
        let source = "ab\ncd\nef";
        let index = LineIndex::new(source);
        assert_eq!(index.position(source, 0), Position::new(0, 0));
        assert_eq!(index.position(source, 3), Position::new(1, 0));
        assert_eq!(index.position(source, 6), Position::new(2, 0));
    }
}
