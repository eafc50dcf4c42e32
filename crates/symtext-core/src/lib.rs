#![warn(missing_docs)]
//! symtext-core - Incremental Terminal-Symbol Text Index
//!
//! # Overview
//!
//! `symtext-core` models a read-only formatted document (a move list, a settings file) as an
//! ordered sequence of opaque, producer-defined *terminal symbols*, each owning a contiguous
//! run of characters in the rendered text. When the producer's model changes, the freshly
//! produced symbol sequence is **reconciled** against the displayed one: only the suffix after
//! the first disagreement is deleted and re-rendered, and the active element (the current move,
//! the selected setting) is relocated so the caret follows it.
//!
//! The crate does not render anything itself. It drives a host text control through the
//! [`RenderSurface`] capability (insert text, remove text, move caret).
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  DocumentView (version, notifications)      │  ← Public API
//! ├─────────────────────────────────────────────┤
//! │  Reconciler (prefix agreement + suffix edit)│  ← Diff & patch
//! ├─────────────────────────────────────────────┤
//! │  TerminalSymbolIndex (elements + owners)    │  ← Position lookup
//! ├─────────────────────────────────────────────┤
//! │  RenderSurface (host text control)          │  ← External
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use symtext_core::{DocumentView, RenderSurface, RopeSurface};
//!
//! let mut view = DocumentView::new(RopeSurface::new());
//!
//! // A producer regenerates the whole sequence on every change.
//! view.refresh(vec!["1.", " ", "e4", " ", "e5"], |s| *s == "e5").unwrap();
//! assert_eq!(view.surface().text(), "1. e4 e5");
//!
//! // Black plays c5 instead: only the last ply is re-rendered.
//! let outcome = view.refresh(vec!["1.", " ", "e4", " ", "c5"], |s| *s == "c5").unwrap();
//! assert_eq!(outcome.agree_index, 4);
//! assert_eq!(outcome.removed, Some(6..8));
//! assert_eq!(view.surface().caret_position(), 8);
//! ```
//!
//! # Module Description
//!
//! - [`index`] - element storage and O(1) position lookup
//! - [`element`] - text elements and generation-checked handles
//! - [`reconcile`](mod@reconcile) - the diff-and-patch pass
//! - [`surface`] - the render surface capability and reference surfaces
//! - [`view`] - document view with caret suppression and change notifications
//! - [`producer`] - symbol producer interface
//! - [`delta`] - structured description of surface edits
//!
//! # Threading
//!
//! Everything here is single-threaded and synchronous. The owner of a view serializes all
//! calls; nothing blocks and a reconciliation pass cannot be partially applied.

pub mod delta;
pub mod element;
pub mod error;
pub mod index;
pub mod producer;
pub mod reconcile;
pub mod surface;
pub mod symbol;
pub mod view;

pub use delta::{TextDelta, TextDeltaEdit};
pub use element::{ElementHandle, TextElement};
pub use error::{ErrorKind, IndexError};
pub use index::{MAX_ELEMENTS, TerminalSymbolIndex};
pub use producer::SymbolProducer;
pub use reconcile::{ReconcileOutcome, reconcile};
pub use surface::{CaretListener, RecordingSurface, RenderSurface, RopeSurface, SurfaceCall};
pub use symbol::{TerminalSymbol, char_len};
pub use view::{
    CaretSuppression, DocumentView, SuppressionGuard, ViewChange, ViewChangeCallback,
    ViewChangeKind,
};
