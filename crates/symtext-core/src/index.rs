//! Terminal symbol index
//!
//! An ordered list of [`TextElement`]s that exactly partitions the character range
//! `[0, text_len)`, plus a per-character owner lookup for O(1) position queries.
//!
//! The index only grows at the end ([`append_terminal_symbol`](TerminalSymbolIndex::append_terminal_symbol))
//! and only shrinks from a given element to the end ([`remove_from`](TerminalSymbolIndex::remove_from)).
//! Elements before the cut keep their ranges, which is what makes suffix reconciliation cheap.
//!
//! The owner lookup costs one `u32` per character. This is fine for move lists and settings
//! files; a document in the tens of megabytes would want an interval structure instead.

use crate::element::{ElementHandle, TextElement};
use crate::error::IndexError;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_INDEX_ID: AtomicU64 = AtomicU64::new(1);

/// Maximum number of elements an index can hold (owners are stored as `u32`).
pub const MAX_ELEMENTS: usize = u32::MAX as usize;

/// Ordered collection of terminal symbols bound to character ranges.
///
/// # Example
///
/// ```rust
/// use symtext_core::TerminalSymbolIndex;
///
/// let mut index = TerminalSymbolIndex::new();
/// index.append_terminal_symbol("abcd", 4).unwrap();
/// let space = index.append_terminal_symbol(" ", 1).unwrap();
/// index.append_terminal_symbol("efghi", 5).unwrap();
///
/// assert_eq!(index.text_len(), 10);
/// assert_eq!(index.element_after(4).unwrap().map(|e| e.handle()), Some(space));
/// assert_eq!(index.element_before(5).unwrap().map(|e| e.handle()), Some(space));
/// assert!(index.element_before(0).unwrap().is_none());
/// ```
#[derive(Debug)]
pub struct TerminalSymbolIndex<T> {
    /// Distinguishes handles issued by different indexes.
    id: u64,
    /// Elements in document order.
    elements: Vec<TextElement<T>>,
    /// `owners[p]` is the ordinal of the element owning character `p`.
    owners: Vec<u32>,
    /// Serial for the next appended element; never reused.
    next_serial: u64,
}

impl<T> Default for TerminalSymbolIndex<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> TerminalSymbolIndex<T> {
    /// Create an empty index.
    pub fn new() -> Self {
        Self {
            id: NEXT_INDEX_ID.fetch_add(1, Ordering::Relaxed),
            elements: Vec::new(),
            owners: Vec::new(),
            next_serial: 0,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the index holds no elements.
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Total number of characters covered by the elements.
    pub fn text_len(&self) -> usize {
        self.elements.last().map_or(0, TextElement::end)
    }

    /// All elements in document order.
    pub fn elements(&self) -> &[TextElement<T>] {
        &self.elements
    }

    /// Element at `ordinal`, if any.
    pub fn get(&self, ordinal: usize) -> Option<&TextElement<T>> {
        self.elements.get(ordinal)
    }

    /// Append `symbol` as a new element of `length` characters at the end of the document.
    ///
    /// The new element starts at the current [`text_len`](Self::text_len).
    pub fn append_terminal_symbol(
        &mut self,
        symbol: T,
        length: usize,
    ) -> Result<ElementHandle, IndexError> {
        if length == 0 {
            return Err(IndexError::ZeroLengthSymbol);
        }

        let ordinal = self.elements.len();
        if ordinal >= MAX_ELEMENTS {
            return Err(IndexError::TooManyElements { max: MAX_ELEMENTS });
        }
        let owner = ordinal as u32;

        let start = self.text_len();
        let handle = ElementHandle {
            index_id: self.id,
            ordinal,
            serial: self.next_serial,
        };
        self.next_serial += 1;

        self.owners.resize(start + length, owner);
        self.elements.push(TextElement::new(symbol, start, length, handle));

        debug_assert_eq!(self.owners.len(), self.text_len());
        debug_assert!(
            self.owners[start..].iter().all(|&o| o == owner),
            "owner entries of element {ordinal} do not cover {start}..{}",
            start + length
        );
        Ok(handle)
    }

    /// Remove every element from `index` to the end, inclusive.
    ///
    /// Removed elements are detached: their handles fail with [`IndexError::Detached`].
    pub fn remove_from(&mut self, index: usize) -> Result<(), IndexError> {
        let Some(first_removed) = self.elements.get(index) else {
            return Err(IndexError::IndexOutOfRange {
                index,
                len: self.elements.len(),
            });
        };

        let cut = first_removed.start();
        self.elements.truncate(index);
        self.owners.truncate(cut);

        debug_assert_eq!(self.owners.len(), self.text_len());
        debug_assert!(
            self.elements.last().is_none_or(|last| last.end() == cut),
            "last kept element does not end at the cut {cut}"
        );
        tracing::trace!(index, cut, "removed trailing elements");
        Ok(())
    }

    /// Remove all elements. No-op when already empty.
    pub fn clear(&mut self) {
        if !self.elements.is_empty() {
            self.elements.clear();
            self.owners.clear();
        }
    }

    /// The element owning character `position - 1`, or `None` at position 0.
    pub fn element_before(&self, position: usize) -> Result<Option<&TextElement<T>>, IndexError> {
        self.check_position(position)?;
        if position == 0 {
            return Ok(None);
        }
        Ok(Some(self.owner_of(position - 1)))
    }

    /// The element owning character `position`, or `None` at the end of the text.
    pub fn element_after(&self, position: usize) -> Result<Option<&TextElement<T>>, IndexError> {
        self.check_position(position)?;
        if position == self.text_len() {
            return Ok(None);
        }
        Ok(Some(self.owner_of(position)))
    }

    /// Hit test: the element whose range contains `position`, `None` when outside the text.
    pub fn element_containing(&self, position: usize) -> Option<&TextElement<T>> {
        self.owners
            .get(position)
            .map(|&owner| &self.elements[owner as usize])
    }

    /// Resolve a handle to its element.
    pub fn element(&self, handle: ElementHandle) -> Result<&TextElement<T>, IndexError> {
        if handle.index_id != self.id {
            return Err(IndexError::Detached);
        }
        self.elements
            .get(handle.ordinal)
            .filter(|element| element.handle().serial == handle.serial)
            .ok_or(IndexError::Detached)
    }

    /// Check whether `handle` still refers to an element of this index.
    pub fn is_attached(&self, handle: ElementHandle) -> bool {
        self.element(handle).is_ok()
    }

    /// Current ordinal of the element behind `handle`.
    pub fn position_of(&self, handle: ElementHandle) -> Result<usize, IndexError> {
        self.element(handle).map(TextElement::ordinal)
    }

    /// The element following `handle` in document order.
    pub fn next_element(
        &self,
        handle: ElementHandle,
    ) -> Result<Option<&TextElement<T>>, IndexError> {
        let ordinal = self.position_of(handle)?;
        Ok(self.elements.get(ordinal + 1))
    }

    /// The element preceding `handle` in document order.
    pub fn previous_element(
        &self,
        handle: ElementHandle,
    ) -> Result<Option<&TextElement<T>>, IndexError> {
        let ordinal = self.position_of(handle)?;
        Ok(ordinal
            .checked_sub(1)
            .and_then(|previous| self.elements.get(previous)))
    }

    /// Verify the partition invariant and the owner lookup.
    ///
    /// This walks every character, so it is meant for tests and debugging.
    pub fn validate(&self) -> Result<(), IndexError> {
        let mut expected_start = 0;
        for (ordinal, element) in self.elements.iter().enumerate() {
            if element.start() != expected_start {
                return Err(IndexError::InvariantViolation(format!(
                    "element {ordinal} starts at {} but previous element ends at {expected_start}",
                    element.start()
                )));
            }
            if element.length() == 0 {
                return Err(IndexError::InvariantViolation(format!(
                    "element {ordinal} is empty"
                )));
            }
            if element.ordinal() != ordinal {
                return Err(IndexError::InvariantViolation(format!(
                    "element {ordinal} carries ordinal {}",
                    element.ordinal()
                )));
            }
            for position in element.range() {
                match self.owners.get(position) {
                    Some(&owner) if owner as usize == ordinal => {}
                    other => {
                        return Err(IndexError::InvariantViolation(format!(
                            "character {position} maps to {other:?}, expected element {ordinal}"
                        )));
                    }
                }
            }
            expected_start = element.end();
        }

        if self.owners.len() != expected_start {
            return Err(IndexError::InvariantViolation(format!(
                "owner lookup has {} entries but text length is {expected_start}",
                self.owners.len()
            )));
        }
        Ok(())
    }

    fn check_position(&self, position: usize) -> Result<(), IndexError> {
        let text_len = self.text_len();
        if position > text_len {
            return Err(IndexError::PositionOutOfRange { position, text_len });
        }
        Ok(())
    }

    fn owner_of(&self, position: usize) -> &TextElement<T> {
        &self.elements[self.owners[position] as usize]
    }
}
