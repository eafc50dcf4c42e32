//! Structured text change deltas.
//!
//! A reconciliation pass edits the render surface with at most one deletion followed by a run
//! of insertions at the end of the document. Consumers that mirror the surface elsewhere (a
//! second view, an accessibility tree, a test harness) can replay the [`TextDelta`] instead of
//! diffing old and new text.
//!
//! Offsets are character offsets (Unicode scalar values).

/// A single text edit expressed in character offsets.
///
/// Semantics:
/// - `start` is a character offset in the document **at the time this edit is applied**.
/// - `deleted_len` characters starting at `start` are removed, then `inserted_text` is inserted
///   at `start`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Number of deleted characters (may be zero).
    pub deleted_len: usize,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        crate::symbol::char_len(&self.inserted_text)
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len)
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered list of edits that transforms the "before" document into the "after" document.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply the delta to a string holding the "before" document.
    pub fn apply_to(&self, text: &str) -> String {
        let mut chars: Vec<char> = text.chars().collect();
        for edit in &self.edits {
            let end = edit.end().min(chars.len());
            let start = edit.start.min(end);
            chars.splice(start..end, edit.inserted_text.chars());
        }
        chars.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_suffix_replacement() {
        let delta = TextDelta {
            before_char_count: 10,
            after_char_count: 8,
            edits: vec![TextDeltaEdit {
                start: 5,
                deleted_len: 5,
                inserted_text: "xyz".to_string(),
            }],
        };
        assert_eq!(delta.apply_to("abcd efghi"), "abcd xyz");
        assert_eq!(delta.edits[0].end(), 10);
        assert_eq!(delta.edits[0].inserted_len(), 3);
    }

    #[test]
    fn test_empty_delta_is_identity() {
        let delta = TextDelta::default();
        assert!(delta.is_empty());
        assert_eq!(delta.apply_to("1. e4 e5"), "1. e4 e5");
    }
}
