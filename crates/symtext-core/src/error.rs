//! Errors raised by the symbol index and the reconciler.

use thiserror::Error;

/// Coarse classification of an [`IndexError`].
///
/// None of these are transient: every kind indicates either a caller bug or a defect in the
/// index itself, so callers should propagate them instead of retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// An index or position was outside the valid range.
    InvalidArgument,
    /// A handle referred to an element that is no longer attached to its index.
    InvalidState,
    /// The request cannot be represented (for example a zero-width symbol).
    UnsupportedOperation,
    /// The partition or owner lookup is inconsistent.
    InvariantViolation,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Errors produced by [`TerminalSymbolIndex`](crate::TerminalSymbolIndex) and
/// [`reconcile`](crate::reconcile()).
pub enum IndexError {
    #[error("element index {index} out of range (element count {len})")]
    /// An element ordinal was `>= len`.
    IndexOutOfRange {
        /// The requested ordinal.
        index: usize,
        /// Number of elements in the index.
        len: usize,
    },

    #[error("position {position} out of range (text length {text_len})")]
    /// A character position was `> text_len`.
    PositionOutOfRange {
        /// The requested character position.
        position: usize,
        /// Current text length of the index.
        text_len: usize,
    },

    #[error("zero-length terminal symbols are not supported")]
    /// A symbol with an empty rendering was appended.
    ZeroLengthSymbol,

    #[error("index cannot hold more than {max} elements")]
    /// The owner lookup stores element ordinals as `u32`.
    TooManyElements {
        /// Maximum number of elements.
        max: usize,
    },

    #[error("text element is detached from its index")]
    /// The handle's element was removed (or belongs to another index).
    Detached,

    #[error("index invariant violated: {0}")]
    /// The partition invariant or the owner lookup is broken.
    InvariantViolation(String),
}

impl IndexError {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::IndexOutOfRange { .. } | Self::PositionOutOfRange { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::ZeroLengthSymbol | Self::TooManyElements { .. } => {
                ErrorKind::UnsupportedOperation
            }
            Self::Detached => ErrorKind::InvalidState,
            Self::InvariantViolation(_) => ErrorKind::InvariantViolation,
        }
    }
}
