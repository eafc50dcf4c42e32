#![warn(missing_docs)]
//! `symtext-movelist` - a move tree rendered as a live move list.
//!
//! [`MoveTree`] stores plies with variations, [`MoveListWalker`] renders it as [`MoveSymbol`]s
//! for a `symtext-core` view, and [`MoveCursor`] tracks which ply is highlighted.
//!
//! Moves are opaque strings: legality is the caller's concern.
//!
//! ```rust
//! use symtext_core::{DocumentView, RenderSurface, RopeSurface};
//! use symtext_movelist::{MoveCursor, MoveListWalker, MoveTree};
//!
//! let mut walker = MoveListWalker::new(MoveTree::new());
//! let mut cursor = MoveCursor::new(walker.tree());
//! let mut view = DocumentView::new(RopeSurface::new());
//!
//! for san in ["e4", "e5", "Nf3"] {
//!     cursor.play(walker.tree_mut(), san).unwrap();
//!     view.refresh_from(&mut walker, cursor.is_active()).unwrap();
//! }
//! assert_eq!(view.surface().text(), "1. e4 e5 2. Nf3");
//! assert_eq!(view.surface().caret_position(), 15);
//!
//! cursor.back(walker.tree()).unwrap();
//! let outcome = view.refresh_from(&mut walker, cursor.is_active()).unwrap();
//! assert!(outcome.is_noop());
//! assert_eq!(view.surface().caret_position(), 8);
//! ```

mod cursor;
mod error;
mod symbol;
mod tree;
mod walker;

pub use cursor::MoveCursor;
pub use error::MoveTreeError;
pub use symbol::MoveSymbol;
pub use tree::{MoveTree, NodeId};
pub use walker::{MoveListOptions, MoveListWalker};
