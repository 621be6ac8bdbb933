use std::fmt;

use serde::Serialize;
use sqlparser::tokenizer::{Location, Span};

/// Half-open byte range `[start, end)` into the original source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ByteSpan {
    /// Offset of the first byte.
    pub start: usize,
    /// Offset one past the last byte.
    pub end: usize,
}

impl ByteSpan {
    /// Create a span from its offsets.
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn cover(self, other: ByteSpan) -> ByteSpan {
        ByteSpan::new(self.start.min(other.start), self.end.max(other.end))
    }
}

impl fmt::Display for ByteSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Translates sqlparser's 1-based line/column locations into byte offsets.
///
/// Columns count characters, not bytes, so multi-byte text before a token
/// shifts its byte offset but not its column.
#[derive(Debug, Clone)]
pub struct LocationTranslator<'a> {
    sql: &'a str,
    line_starts: Vec<usize>,
}

impl<'a> LocationTranslator<'a> {
    /// Index the line starts of `sql`.
    pub fn new(sql: &'a str) -> Self {
        let line_starts = std::iter::once(0)
            .chain(sql.match_indices('\n').map(|(idx, _)| idx + 1))
            .collect();
        Self { sql, line_starts }
    }

    /// Byte offset of `location`, or `None` for the empty location or one
    /// outside the text.
    pub fn byte_offset(&self, location: Location) -> Option<usize> {
        let line = usize::try_from(location.line).ok()?.checked_sub(1)?;
        let column = usize::try_from(location.column).ok()?.checked_sub(1)?;
        let line_start = *self.line_starts.get(line)?;
        let line_end = self
            .line_starts
            .get(line + 1)
            .map_or(self.sql.len(), |next| next - 1);
        let text = &self.sql[line_start..line_end];

        let mut chars = text.char_indices().map(|(idx, _)| idx);
        match chars.nth(column) {
            Some(idx) => Some(line_start + idx),
            None if text.chars().count() == column => Some(line_end),
            None => None,
        }
    }

    /// Byte range of `span`, or `None` when either end cannot be located or
    /// the range is empty.
    pub fn byte_span(&self, span: Span) -> Option<ByteSpan> {
        let start = self.byte_offset(span.start)?;
        let end = self.byte_offset(span.end)?;
        (start < end).then_some(ByteSpan::new(start, end))
    }
}
