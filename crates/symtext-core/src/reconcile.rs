//! Reconciliation of a symbol index against a freshly produced symbol sequence.
//!
//! Producers regenerate their whole symbol sequence on every change. Between two runs the
//! sequences usually share a long prefix (navigating within an unchanged game, appending a
//! move, editing the last setting), so the reconciler only compares element-wise from the start,
//! cuts the index at the first disagreement and re-renders the suffix. The surface edit costs
//! O(changed suffix), not O(document).
//!
//! A pass is all-or-nothing: the new suffix is rendered and validated before the surface or
//! the index are touched.

use crate::delta::{TextDelta, TextDeltaEdit};
use crate::element::{ElementHandle, TextElement};
use crate::error::IndexError;
use crate::index::{MAX_ELEMENTS, TerminalSymbolIndex};
use crate::surface::RenderSurface;
use crate::symbol::{TerminalSymbol, char_len};
use std::ops::Range;

/// What a reconciliation pass did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconcileOutcome {
    /// Length of the common prefix between the old and new sequences.
    pub agree_index: usize,
    /// Character range deleted from the surface (pre-edit offsets), if any.
    pub removed: Option<Range<usize>>,
    /// Number of elements appended.
    pub inserted_elements: usize,
    /// Number of characters inserted.
    pub inserted_chars: usize,
    /// The first element satisfying the active predicate, if any.
    pub active: Option<ElementHandle>,
    /// Caret offset after the pass.
    pub caret: usize,
    /// The surface edit as a structured delta.
    pub delta: TextDelta,
}

impl ReconcileOutcome {
    /// Returns `true` if the pass did not edit the surface text.
    pub fn is_noop(&self) -> bool {
        self.delta.is_empty()
    }
}

/// Update `index` and `surface` so they represent `updated`.
///
/// `is_active` is evaluated against the kept prefix and the appended elements, in document
/// order; the first match becomes the active element and the caret is placed at its end.
/// Without a match the caret goes to the start of the document.
///
/// When `updated` equals the current sequence no text is edited, and the caret is only moved
/// if it is not already at its target.
///
/// # Example
///
/// ```rust
/// use symtext_core::{RopeSurface, TerminalSymbolIndex, reconcile};
///
/// let mut index = TerminalSymbolIndex::new();
/// let mut surface = RopeSurface::new();
///
/// reconcile(&mut index, &mut surface, vec!["abcd", " ", "efghi"], |_| false).unwrap();
/// let outcome = reconcile(&mut index, &mut surface, vec!["abcd", " ", "xyz"], |s| *s == "xyz")
///     .unwrap();
///
/// assert_eq!(surface.text(), "abcd xyz");
/// assert_eq!(outcome.agree_index, 2);
/// assert_eq!(outcome.removed, Some(5..10));
/// assert_eq!(outcome.caret, 8);
/// ```
pub fn reconcile<T, S, F>(
    index: &mut TerminalSymbolIndex<T>,
    surface: &mut S,
    mut updated: Vec<T>,
    mut is_active: F,
) -> Result<ReconcileOutcome, IndexError>
where
    T: TerminalSymbol,
    S: RenderSurface + ?Sized,
    F: FnMut(&T) -> bool,
{
    let _span =
        tracing::debug_span!("reconcile", current = index.len(), updated = updated.len())
            .entered();

    let before_char_count = index.text_len();
    let shared = index.len().min(updated.len());
    let mut active = None;

    let mut agree_index = 0;
    while agree_index < shared {
        let element = &index.elements()[agree_index];
        if updated[agree_index] != *element.symbol() {
            break;
        }
        if active.is_none() && is_active(element.symbol()) {
            active = Some(element.handle());
        }
        agree_index += 1;
    }

    let suffix = updated.split_off(agree_index);
    drop(updated);

    if agree_index.saturating_add(suffix.len()) > MAX_ELEMENTS {
        return Err(IndexError::TooManyElements { max: MAX_ELEMENTS });
    }

    let mut rendered = Vec::with_capacity(suffix.len());
    for (offset, symbol) in suffix.into_iter().enumerate() {
        let text = symbol.text().into_owned();
        let len = char_len(&text);
        if len == 0 {
            tracing::warn!(
                ordinal = agree_index + offset,
                "rejecting reconciliation: symbol renders to empty text"
            );
            return Err(IndexError::ZeroLengthSymbol);
        }
        rendered.push((symbol, text, len));
    }

    let mut removed = None;
    if agree_index < index.len() {
        let text_start = index.elements()[agree_index].start();
        surface.remove_text(text_start, before_char_count - text_start);
        index.remove_from(agree_index)?;
        removed = Some(text_start..before_char_count);
    }

    let edit_start = index.text_len();
    let inserted_elements = rendered.len();
    let mut inserted_text = String::new();
    for (symbol, text, len) in rendered {
        surface.insert_text(index.text_len(), &text);
        let matches = active.is_none() && is_active(&symbol);
        let handle = index.append_terminal_symbol(symbol, len)?;
        if matches {
            active = Some(handle);
        }
        inserted_text.push_str(&text);
    }

    let inserted_chars = index.text_len() - edit_start;
    let mut delta = TextDelta {
        before_char_count,
        after_char_count: index.text_len(),
        edits: Vec::new(),
    };
    if removed.is_some() || !inserted_text.is_empty() {
        delta.edits.push(TextDeltaEdit {
            start: edit_start,
            deleted_len: before_char_count - edit_start,
            inserted_text,
        });
    }

    let caret = match active {
        Some(handle) => index.element(handle)?.end(),
        None => index.elements().first().map_or(0, TextElement::start),
    };
    if !delta.is_empty() || surface.caret_position() != caret {
        surface.set_caret_position(caret);
    }

    debug_assert!(
        index.validate().is_ok(),
        "index invariant broken after reconciliation: {:?}",
        index.validate()
    );
    tracing::debug!(
        agree_index,
        removed = ?removed,
        inserted_elements,
        inserted_chars,
        caret,
        "reconciled"
    );

    Ok(ReconcileOutcome {
        agree_index,
        removed,
        inserted_elements,
        inserted_chars,
        active,
        caret,
        delta,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{RecordingSurface, RopeSurface, SurfaceCall};
    use pretty_assertions::assert_eq;

    fn seeded(symbols: Vec<&'static str>) -> (TerminalSymbolIndex<&'static str>, RecordingSurface) {
        let mut index = TerminalSymbolIndex::new();
        let mut surface = RecordingSurface::new(RopeSurface::new());
        reconcile(&mut index, &mut surface, symbols, |_| false).unwrap();
        surface.take_calls();
        (index, surface)
    }

    #[test]
    fn test_initial_fill() {
        let mut index = TerminalSymbolIndex::new();
        let mut surface = RecordingSurface::new(RopeSurface::new());
        let outcome =
            reconcile(&mut index, &mut surface, vec!["abcd", " ", "efghi"], |_| false).unwrap();

        assert_eq!(outcome.agree_index, 0);
        assert_eq!(outcome.removed, None);
        assert_eq!(outcome.inserted_elements, 3);
        assert_eq!(outcome.inserted_chars, 10);
        assert_eq!(surface.inner().text(), "abcd efghi");
        assert_eq!(
            surface.calls(),
            &[
                SurfaceCall::Insert {
                    position: 0,
                    text: "abcd".to_string()
                },
                SurfaceCall::Insert {
                    position: 4,
                    text: " ".to_string()
                },
                SurfaceCall::Insert {
                    position: 5,
                    text: "efghi".to_string()
                },
                SurfaceCall::SetCaret(0),
            ]
        );
    }

    #[test]
    fn test_suffix_replacement() {
        let (mut index, mut surface) = seeded(vec!["abcd", " ", "efghi"]);
        let outcome =
            reconcile(&mut index, &mut surface, vec!["abcd", " ", "xyz"], |_| false).unwrap();

        assert_eq!(outcome.agree_index, 2);
        assert_eq!(outcome.removed, Some(5..10));
        assert_eq!(index.text_len(), 8);
        assert_eq!(
            surface.take_calls(),
            vec![
                SurfaceCall::Remove { start: 5, len: 5 },
                SurfaceCall::Insert {
                    position: 5,
                    text: "xyz".to_string()
                },
                SurfaceCall::SetCaret(0),
            ]
        );
        assert_eq!(
            outcome.delta.edits,
            vec![TextDeltaEdit {
                start: 5,
                deleted_len: 5,
                inserted_text: "xyz".to_string()
            }]
        );
    }

    #[test]
    fn test_identical_sequence_is_noop() {
        let (mut index, mut surface) = seeded(vec!["abcd", " ", "efghi"]);
        let handles: Vec<_> = index.elements().iter().map(|e| e.handle()).collect();

        let outcome =
            reconcile(&mut index, &mut surface, vec!["abcd", " ", "efghi"], |_| false).unwrap();

        assert!(outcome.is_noop());
        assert_eq!(outcome.agree_index, 3);
        assert!(surface.calls().is_empty());
        // Elements survive untouched.
        assert!(handles.iter().all(|h| index.is_attached(*h)));
    }

    #[test]
    fn test_empty_update_clears() {
        let (mut index, mut surface) = seeded(vec!["abcd", " ", "efghi"]);
        let outcome = reconcile(&mut index, &mut surface, Vec::new(), |_| false).unwrap();

        assert_eq!(outcome.removed, Some(0..10));
        assert!(index.is_empty());
        assert_eq!(outcome.caret, 0);
        assert_eq!(surface.inner().text(), "");
        assert_eq!(
            surface.take_calls(),
            vec![
                SurfaceCall::Remove { start: 0, len: 10 },
                SurfaceCall::SetCaret(0)
            ]
        );
    }

    #[test]
    fn test_active_element_moves_to_replacement() {
        let (mut index, mut surface) = seeded(vec!["abcd", " ", "efghi"]);
        let first =
            reconcile(&mut index, &mut surface, vec!["abcd", " ", "efghi"], |s| *s == "efghi")
                .unwrap();
        assert_eq!(first.caret, 10);
        let old_active = first.active.unwrap();

        let second =
            reconcile(&mut index, &mut surface, vec!["abcd", " ", "xyz"], |s| *s == "xyz")
                .unwrap();

        assert_eq!(second.caret, 8);
        assert_eq!(surface.inner().caret_position(), 8);
        assert!(!index.is_attached(old_active));
        let active = index.element(second.active.unwrap()).unwrap();
        assert_eq!(active.symbol(), &"xyz");
    }

    #[test]
    fn test_active_element_in_kept_prefix() {
        let (mut index, mut surface) = seeded(vec!["1.", " ", "e4", " ", "e5"]);
        let outcome =
            reconcile(&mut index, &mut surface, vec!["1.", " ", "e4", " ", "c5"], |s| *s == "e4")
                .unwrap();

        assert_eq!(outcome.caret, 5);
        assert_eq!(outcome.active.map(|h| h.ordinal()), Some(2));
        // Caret move caused by the active element is part of the same pass.
        assert_eq!(surface.take_calls().last(), Some(&SurfaceCall::SetCaret(5)));
    }

    #[test]
    fn test_first_match_wins() {
        let (mut index, mut surface) = seeded(vec![]);
        let outcome = reconcile(&mut index, &mut surface, vec!["a", " ", "a"], |s| *s == "a")
            .unwrap();
        assert_eq!(outcome.active.map(|h| h.ordinal()), Some(0));
        assert_eq!(outcome.caret, 1);
    }

    #[test]
    fn test_zero_length_symbol_rejects_whole_pass() {
        let (mut index, mut surface) = seeded(vec!["abcd", " ", "efghi"]);
        let err = reconcile(&mut index, &mut surface, vec!["abcd", "x", ""], |_| false)
            .unwrap_err();

        assert_eq!(err, IndexError::ZeroLengthSymbol);
        assert!(surface.calls().is_empty());
        assert_eq!(index.len(), 3);
        assert_eq!(surface.inner().text(), "abcd efghi");
    }

    #[test]
    fn test_navigation_only_pass_moves_caret() {
        let (mut index, mut surface) = seeded(vec!["1.", " ", "e4", " ", "e5"]);
        reconcile(&mut index, &mut surface, vec!["1.", " ", "e4", " ", "e5"], |s| *s == "e4")
            .unwrap();
        assert_eq!(surface.take_calls(), vec![SurfaceCall::SetCaret(5)]);

        // Same active element again: nothing to do.
        reconcile(&mut index, &mut surface, vec!["1.", " ", "e4", " ", "e5"], |s| *s == "e4")
            .unwrap();
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn test_multibyte_lengths() {
        let (mut index, mut surface) = seeded(vec!["♘f3", " ", "♞c6"]);
        assert_eq!(index.text_len(), 7);
        reconcile(&mut index, &mut surface, vec!["♘f3", " ", "♞f6"], |_| false).unwrap();
        assert_eq!(surface.take_calls()[0], SurfaceCall::Remove { start: 4, len: 3 });
        assert_eq!(surface.inner().text(), "♘f3 ♞f6");
    }
}
