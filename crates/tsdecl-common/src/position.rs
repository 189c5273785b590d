//! Line/column positions.
//!
//! Positions are 0-based, with `character` counted in bytes from the start
//! of the line. `LineMap` converts byte offsets to positions with a binary
//! search over the recorded line starts.

use serde::Serialize;

/// A 0-based line/column position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Position {
    pub line: u32,
    pub character: u32,
}

impl Position {
    #[must_use]
    pub const fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Byte offsets of every line start in a source text.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineMap {
    line_starts: Vec<u32>,
}

impl LineMap {
    /// Build a line map by scanning `source` for line terminators.
    ///
    /// `\r\n` counts as a single terminator.
    #[must_use]
    pub fn build(source: &str) -> Self {
        let bytes = source.as_bytes();
        let mut line_starts = vec![0u32];
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\r' => {
                    if bytes.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                    line_starts.push(to_offset(i + 1));
                }
                b'\n' => line_starts.push(to_offset(i + 1)),
                _ => {}
            }
            i += 1;
        }
        Self { line_starts }
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Convert a byte offset to a line/column position.
    #[must_use]
    pub fn offset_to_position(&self, offset: u32) -> Position {
        let line = match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next.saturating_sub(1),
        };
        let line_start = self.line_starts.get(line).copied().unwrap_or(0);
        Position::new(to_offset(line), offset.saturating_sub(line_start))
    }

    /// Convert a position back to a byte offset, clamped to the last line.
    #[must_use]
    pub fn position_to_offset(&self, position: Position) -> u32 {
        let idx = (position.line as usize).min(self.line_starts.len().saturating_sub(1));
        self.line_starts.get(idx).copied().unwrap_or(0).saturating_add(position.character)
    }
}

/// Saturating `usize` to `u32` conversion, so line starts stay monotonic
/// past 4 GiB.
fn to_offset(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_map_to_lines_and_columns() {
        let map = LineMap::build("ab\ncd\r\nef");
        assert_eq!(map.line_count(), 3);
        assert_eq!(map.offset_to_position(0), Position::new(0, 0));
        assert_eq!(map.offset_to_position(4), Position::new(1, 1));
        assert_eq!(map.offset_to_position(7), Position::new(2, 0));
        assert_eq!(map.position_to_offset(Position::new(2, 1)), 8);
    }

    #[test]
    fn oversized_offsets_saturate() {
        assert_eq!(to_offset(7), 7);
        assert_eq!(to_offset(usize::MAX), u32::MAX);
        let map = LineMap {
            line_starts: vec![0, 10, u32::MAX],
        };
        assert_eq!(map.offset_to_position(u32::MAX), Position::new(2, 0));
    }
}
