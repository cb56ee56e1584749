//! The character buffer plus its line-offset index.

use crate::line_index::LineIndex;
use crate::position::{Position, PositionRange};
use ropey::Rope;

/// A single content change: replace `[start, end)` with `text`.
#[derive(Debug, Clone)]
pub struct TextChange {
    pub start: Position,
    pub end: Position,
    pub text: String,
}

/// Owns a URI, a character buffer, and the buffer's line-offset index.
///
/// Edits are idempotent when `text` is empty and `start == end`.
#[derive(Debug, Clone)]
pub struct TextModel {
    uri: String,
    rope: Rope,
    lines: LineIndex,
}

impl TextModel {
    pub fn new(uri: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        let lines = LineIndex::from_text(&text);
        Self { uri: uri.into(), rope: Rope::from_str(&text), lines }
    }

    pub fn uri(&self) -> &str {
        &self.uri
    }

    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    pub fn len(&self) -> usize {
        self.rope.len_bytes()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    pub fn line_count(&self) -> usize {
        self.lines.line_count()
    }

    /// Sort multiple changes into the order `apply_edit` expects them in:
    /// descending end position, so earlier ranges' offsets stay valid as
    /// later (in document order) edits are applied first.
    pub fn sort_changes_descending(changes: &mut [TextChange]) {
        changes.sort_by(|a, b| b.end.cmp(&a.end));
    }

    /// Replace `[offset(start), offset(end))` with `text` and rebuild the
    /// line-offset index.
    pub fn apply_edit(&mut self, start: Position, end: Position, text: &str) {
        let len = self.rope.len_bytes();
        let effect = self.lines.apply_edit(start, end, text, len);
        let start_char = self.rope.byte_to_char(effect.start_offset);
        let end_char = self.rope.byte_to_char(effect.end_offset);
        self.rope.remove(start_char..end_char);
        if !text.is_empty() {
            self.rope.insert(start_char, text);
        }
    }

    /// Apply several changes from one request, in submission order,
    /// internally reordering by descending end position.
    pub fn apply_changes(&mut self, changes: &[TextChange]) {
        let mut sorted: Vec<TextChange> = changes.to_vec();
        Self::sort_changes_descending(&mut sorted);
        for change in &sorted {
            self.apply_edit(change.start, change.end, &change.text);
        }
    }

    pub fn position_at_offset(&self, offset: usize) -> Position {
        self.lines.position_at_offset(offset, self.rope.len_bytes())
    }

    pub fn offset_at_position(&self, pos: Position) -> usize {
        self.lines.offset_at_position(pos, self.rope.len_bytes())
    }

    pub fn range_text(&self, range: PositionRange) -> String {
        let start = self.offset_at_position(range.start);
        let end = self.offset_at_position(range.end);
        let start_char = self.rope.byte_to_char(start);
        let end_char = self.rope.byte_to_char(end);
        self.rope.slice(start_char..end_char).to_string()
    }

    /// The maximal `[a, b)` around `offset` matching the identifier
    /// grammar: a letter, underscore, or non-ASCII byte starts an
    /// identifier; the same set plus digits continues one.
    pub fn word_at_offset(&self, offset: usize) -> Option<PositionRange> {
        let text = self.text();
        let offset = offset.min(text.len());
        let is_start = |c: char| c.is_alphabetic() || c == '_' || !c.is_ascii();
        let is_cont = |c: char| is_start(c) || c.is_ascii_digit();

        let mut a = offset;
        for (i, c) in text[..offset].char_indices().rev() {
            if is_cont(c) {
                a = i;
            } else {
                break;
            }
        }
        let mut b = offset;
        for (i, c) in text[offset..].char_indices() {
            if is_cont(c) {
                b = offset + i + c.len_utf8();
            } else {
                break;
            }
        }
        if a >= b {
            return None;
        }
        // Reject a pure digit run that never reached a starting char.
        if !text[a..b].chars().any(is_start) {
            return None;
        }
        Some(PositionRange::new(self.position_at_offset(a), self.position_at_offset(b)))
    }
}
