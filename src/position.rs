//! Byte offset to line/column translation.

/// Start offsets of every line in a source text. Line 1 always starts at 0.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineIndex {
    starts: Vec<usize>,
}

/// 1-based line, 0-based byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl LineIndex {
    pub fn build(text: &str) -> LineIndex {
        let starts = std::iter::once(0)
            .chain(
                text.bytes()
                    .enumerate()
                    .filter(|(_, b)| *b == b'\n')
                    .map(|(i, _)| i + 1),
            )
            .collect();

        LineIndex { starts }
    }

    pub fn line_count(&self) -> usize {
        self.starts.len()
    }

    /// Byte offset of a 1-based line and 0-based character column.
    /// Lines are clamped to the index, columns to the end of their line.
    pub fn offset_of(&self, text: &str, line: usize, char_column: usize) -> usize {
        let start = self.starts[line.clamp(1, self.starts.len()) - 1].min(text.len());
        let line_text = text[start..].split('\n').next().unwrap_or_default();

        let column = line_text
            .char_indices()
            .nth(char_column)
            .map_or(line_text.len(), |(i, _)| i);
        start + column
    }

    /// Offsets past the end of the text land on the last line.
    pub fn resolve(&self, offset: usize) -> Position {
        let line = self.starts.partition_point(|&start| start <= offset);
        let start = self.starts[line - 1];

        Position {
            line,
            column: offset - start,
        }
    }
}
