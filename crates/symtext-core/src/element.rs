//! Text elements and the handles that refer to them.

use std::ops::Range;

/// A stable, copyable reference to a [`TextElement`] owned by a
/// [`TerminalSymbolIndex`](crate::TerminalSymbolIndex).
///
/// Handles do not keep the element alive. Once the element is removed (via
/// [`remove_from`](crate::TerminalSymbolIndex::remove_from) or
/// [`clear`](crate::TerminalSymbolIndex::clear)) every navigation through the handle fails with
/// [`IndexError::Detached`](crate::IndexError::Detached), even if a new element later occupies
/// the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementHandle {
    pub(crate) index_id: u64,
    pub(crate) ordinal: usize,
    pub(crate) serial: u64,
}

impl ElementHandle {
    /// Ordinal of the element at the time the handle was issued.
    ///
    /// This is only meaningful while the handle is attached.
    pub fn ordinal(&self) -> usize {
        self.ordinal
    }
}

/// One terminal symbol bound to a contiguous character range.
///
/// Elements are immutable once created; the owning index hands out shared references only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextElement<T> {
    symbol: T,
    start: usize,
    length: usize,
    handle: ElementHandle,
}

impl<T> TextElement<T> {
    pub(crate) fn new(symbol: T, start: usize, length: usize, handle: ElementHandle) -> Self {
        debug_assert!(length > 0);
        Self {
            symbol,
            start,
            length,
            handle,
        }
    }

    /// The terminal symbol this element represents.
    pub fn symbol(&self) -> &T {
        &self.symbol
    }

    /// Offset of the first character owned by this element.
    pub fn start(&self) -> usize {
        self.start
    }

    /// Number of characters owned by this element (always `> 0`).
    pub fn length(&self) -> usize {
        self.length
    }

    /// Exclusive end offset (`start + length`).
    pub fn end(&self) -> usize {
        self.start + self.length
    }

    /// The half-open character range `start..end`.
    pub fn range(&self) -> Range<usize> {
        self.start..self.end()
    }

    /// Check whether the character at `position` belongs to this element.
    pub fn contains(&self, position: usize) -> bool {
        self.start <= position && position < self.end()
    }

    /// Handle for later navigation through the owning index.
    pub fn handle(&self) -> ElementHandle {
        self.handle
    }

    /// Position of this element in document order.
    pub fn ordinal(&self) -> usize {
        self.handle.ordinal
    }
}
