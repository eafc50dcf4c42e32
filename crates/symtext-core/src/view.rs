//! Document view: an index bound to a render surface.
//!
//! [`DocumentView`] owns a [`TerminalSymbolIndex`], the [`RenderSurface`] displaying it, and the
//! active-element pointer, and keeps them consistent across refreshes:
//!
//! 1. The host asks its producer for the current symbol sequence.
//! 2. [`DocumentView::refresh`] reconciles the index and the surface against it while caret
//!    notifications are suppressed.
//! 3. The view bumps its version and notifies subscribers.
//!
//! Caret moves reported by the surface while a refresh is running are synthetic: hosts check
//! [`CaretSuppression::is_suppressed`] (or route them through [`DocumentView::caret_moved`])
//! so a refresh never triggers another refresh.

use crate::element::{ElementHandle, TextElement};
use crate::error::IndexError;
use crate::index::TerminalSymbolIndex;
use crate::producer::SymbolProducer;
use crate::reconcile::{ReconcileOutcome, reconcile};
use crate::surface::RenderSurface;
use crate::symbol::TerminalSymbol;
use std::cell::Cell;
use std::ops::Range;
use std::rc::Rc;

/// Shared flag marking caret notifications as synthetic.
///
/// Clones share the same flag, so a clone can be moved into a surface callback.
#[derive(Debug, Clone, Default)]
pub struct CaretSuppression {
    flag: Rc<Cell<bool>>,
}

impl CaretSuppression {
    /// Create a flag that is not suppressing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` while a suppression guard is alive.
    pub fn is_suppressed(&self) -> bool {
        self.flag.get()
    }

    /// Suppress caret notifications until the returned guard is dropped.
    ///
    /// Guards nest: dropping an inner guard restores the outer state.
    pub fn suppress(&self) -> SuppressionGuard {
        let previous = self.flag.replace(true);
        SuppressionGuard {
            flag: Rc::clone(&self.flag),
            previous,
        }
    }
}

/// Scope guard returned by [`CaretSuppression::suppress`].
#[derive(Debug)]
#[must_use = "suppression ends when the guard is dropped"]
pub struct SuppressionGuard {
    flag: Rc<Cell<bool>>,
    previous: bool,
}

impl Drop for SuppressionGuard {
    fn drop(&mut self) {
        self.flag.set(self.previous);
    }
}

/// Kind of view change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewChangeKind {
    /// The displayed text was edited.
    DocumentModified,
    /// The document became empty.
    Cleared,
    /// The active element changed (including to or from none).
    ActiveElementChanged,
}

/// View change record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewChange {
    /// Change kind
    pub kind: ViewChangeKind,
    /// Old version number
    pub old_version: u64,
    /// New version number
    pub new_version: u64,
    /// Affected region (post-edit character offsets)
    pub affected_region: Option<Range<usize>>,
}

/// View change callback function type
pub type ViewChangeCallback = Box<dyn FnMut(&ViewChange)>;

/// A terminal symbol index displayed on a render surface.
///
/// # Example
///
/// ```rust
/// use symtext_core::{DocumentView, RenderSurface, RopeSurface};
///
/// let mut view = DocumentView::new(RopeSurface::new());
/// view.refresh(vec!["1.", " ", "e4", " ", "e5"], |s| *s == "e4").unwrap();
///
/// assert_eq!(view.surface().text(), "1. e4 e5");
/// assert_eq!(view.active_element().map(|e| e.range()), Some(3..5));
/// assert_eq!(view.surface().caret_position(), 5);
/// ```
pub struct DocumentView<T, S> {
    index: TerminalSymbolIndex<T>,
    surface: S,
    active: Option<ElementHandle>,
    suppression: CaretSuppression,
    version: u64,
    callbacks: Vec<ViewChangeCallback>,
}

impl<T, S> std::fmt::Debug for DocumentView<T, S>
where
    T: std::fmt::Debug,
    S: std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentView")
            .field("index", &self.index)
            .field("surface", &self.surface)
            .field("active", &self.active)
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl<T, S> DocumentView<T, S>
where
    T: TerminalSymbol,
    S: RenderSurface,
{
    /// Bind an empty index to `surface`.
    ///
    /// The surface is expected to be empty; the view only edits text it produced itself.
    pub fn new(surface: S) -> Self {
        Self::with_suppression(surface, CaretSuppression::new())
    }

    /// Bind an empty index to `surface`, sharing an existing suppression flag.
    ///
    /// Use this when surface callbacks were registered (with a clone of `suppression`) before
    /// the view was built.
    pub fn with_suppression(surface: S, suppression: CaretSuppression) -> Self {
        Self {
            index: TerminalSymbolIndex::new(),
            surface,
            active: None,
            suppression,
            version: 0,
            callbacks: Vec::new(),
        }
    }

    /// The symbol index.
    pub fn index(&self) -> &TerminalSymbolIndex<T> {
        &self.index
    }

    /// The render surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The render surface, mutably.
    ///
    /// Text edits made through this reference desynchronize the index; use it for
    /// presentation-only state such as scrolling or user caret moves.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Handle of the active element, if any.
    pub fn active_handle(&self) -> Option<ElementHandle> {
        self.active
    }

    /// The active element, if any.
    pub fn active_element(&self) -> Option<&TextElement<T>> {
        self.active.and_then(|handle| self.index.element(handle).ok())
    }

    /// State version, incremented by every refresh that changed something.
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Check if the view has changed since `version`.
    pub fn has_changed_since(&self, version: u64) -> bool {
        self.version > version
    }

    /// A clone of the shared suppression flag.
    pub fn suppression(&self) -> CaretSuppression {
        self.suppression.clone()
    }

    /// Returns `true` while a refresh is editing the surface.
    pub fn is_reconciling(&self) -> bool {
        self.suppression.is_suppressed()
    }

    /// Subscribe to view change notifications.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&ViewChange) + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Reconcile the view against `symbols`.
    ///
    /// On error neither the surface, the index nor the active element change.
    pub fn refresh<F>(
        &mut self,
        symbols: Vec<T>,
        is_active: F,
    ) -> Result<ReconcileOutcome, IndexError>
    where
        F: FnMut(&T) -> bool,
    {
        let was_empty = self.index.is_empty();
        let outcome = {
            let _guard = self.suppression.suppress();
            reconcile(&mut self.index, &mut self.surface, symbols, is_active)?
        };

        let previous_active = std::mem::replace(&mut self.active, outcome.active);

        if !outcome.is_noop() {
            if self.index.is_empty() && !was_empty {
                self.notify(ViewChangeKind::Cleared, None);
            } else {
                let start = outcome.removed.as_ref().map_or(
                    self.index.text_len() - outcome.inserted_chars,
                    |removed| removed.start,
                );
                self.notify(
                    ViewChangeKind::DocumentModified,
                    Some(start..self.index.text_len()),
                );
            }
        }
        if previous_active != outcome.active {
            let region = self.active_element().map(TextElement::range);
            self.notify(ViewChangeKind::ActiveElementChanged, region);
        }

        Ok(outcome)
    }

    /// Ask `producer` for the current symbols and reconcile against them.
    pub fn refresh_from<P, F>(
        &mut self,
        producer: &mut P,
        is_active: F,
    ) -> Result<ReconcileOutcome, P::Error>
    where
        P: SymbolProducer<Symbol = T> + ?Sized,
        P::Error: From<IndexError>,
        F: FnMut(&T) -> bool,
    {
        let symbols = producer.produce()?;
        Ok(self.refresh(symbols, is_active)?)
    }

    /// Remove every element and its text.
    pub fn clear(&mut self) -> Result<ReconcileOutcome, IndexError> {
        self.refresh(Vec::new(), |_| false)
    }

    /// Map a caret position reported by the surface to the element it touches.
    ///
    /// The caret belongs to the element ending at it (the element before the caret); at the
    /// start of the document it belongs to the first element. Returns `None` while a refresh is
    /// running, since such moves are side effects of the refresh itself.
    pub fn caret_moved(&self, position: usize) -> Option<ElementHandle> {
        if self.suppression.is_suppressed() {
            tracing::trace!(position, "ignoring synthetic caret move");
            return None;
        }
        let position = position.min(self.index.text_len());
        let element = match self.index.element_before(position) {
            Ok(Some(element)) => Some(element),
            Ok(None) => self.index.element_containing(position),
            Err(_) => None,
        };
        element.map(TextElement::handle)
    }

    /// Consume the view and return its surface; every element is detached.
    pub fn into_surface(self) -> S {
        self.surface
    }

    fn notify(&mut self, kind: ViewChangeKind, affected_region: Option<Range<usize>>) {
        let old_version = self.version;
        self.version += 1;
        let change = ViewChange {
            kind,
            old_version,
            new_version: self.version,
            affected_region,
        };
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }
}
