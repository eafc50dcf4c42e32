//! Render surfaces.
//!
//! The reconciler drives the visible text through the [`RenderSurface`] capability only, so any
//! host that can insert and delete character ranges and move a caret (a terminal widget, a
//! canvas text layout, a native rich-text control) can sit behind it.
//!
//! Two implementations ship with the crate:
//! - [`RopeSurface`]: an in-memory surface backed by a [`ropey::Rope`], with caret listeners.
//! - [`RecordingSurface`]: wraps another surface and records every mutating call.

use ropey::Rope;

/// The text-rendering capability consumed by the reconciler.
///
/// All positions are character offsets.
pub trait RenderSurface {
    /// Insert literal `text` at `position`.
    fn insert_text(&mut self, position: usize, text: &str);

    /// Delete `len` characters starting at `start`.
    fn remove_text(&mut self, start: usize, len: usize);

    /// Current caret offset.
    fn caret_position(&self) -> usize;

    /// Move the caret to `position` and bring it into view.
    fn set_caret_position(&mut self, position: usize);
}

impl<S: RenderSurface + ?Sized> RenderSurface for &mut S {
    fn insert_text(&mut self, position: usize, text: &str) {
        (**self).insert_text(position, text);
    }

    fn remove_text(&mut self, start: usize, len: usize) {
        (**self).remove_text(start, len);
    }

    fn caret_position(&self) -> usize {
        (**self).caret_position()
    }

    fn set_caret_position(&mut self, position: usize) {
        (**self).set_caret_position(position);
    }
}

impl<S: RenderSurface + ?Sized> RenderSurface for Box<S> {
    fn insert_text(&mut self, position: usize, text: &str) {
        (**self).insert_text(position, text);
    }

    fn remove_text(&mut self, start: usize, len: usize) {
        (**self).remove_text(start, len);
    }

    fn caret_position(&self) -> usize {
        (**self).caret_position()
    }

    fn set_caret_position(&mut self, position: usize) {
        (**self).set_caret_position(position);
    }
}

/// Caret listener callback type.
///
/// Invoked with the new caret offset every time the caret moves, whether the move was requested
/// explicitly or caused by a text edit.
pub type CaretListener = Box<dyn FnMut(usize)>;

/// In-memory render surface backed by a rope.
///
/// Edits shift the caret the way a text control does: inserting at or before the caret pushes it
/// right, deleting a range before it pulls it left, deleting a range containing it collapses it to
/// the range start.
#[derive(Default)]
pub struct RopeSurface {
    rope: Rope,
    caret: usize,
    /// Number of times the caret was explicitly placed (and so scrolled into view).
    reveal_count: usize,
    listeners: Vec<CaretListener>,
}

impl std::fmt::Debug for RopeSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RopeSurface")
            .field("text", &self.rope.to_string())
            .field("caret", &self.caret)
            .field("reveal_count", &self.reveal_count)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl RopeSurface {
    /// Create an empty surface.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a surface pre-filled with `text` (caret at 0).
    pub fn from_text(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
            ..Self::default()
        }
    }

    /// Full text content.
    pub fn text(&self) -> String {
        self.rope.to_string()
    }

    /// Text in the character range `start..end` (clamped to the document).
    pub fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.rope.len_chars());
        let start = start.min(end);
        self.rope.slice(start..end).to_string()
    }

    /// Number of characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Number of lines (an empty document has one line).
    pub fn line_count(&self) -> usize {
        self.rope.len_lines()
    }

    /// Text of `line` without its line terminator.
    pub fn line_text(&self, line: usize) -> Option<String> {
        if line >= self.rope.len_lines() {
            return None;
        }
        let mut text = self.rope.line(line).to_string();
        if text.ends_with('\n') {
            text.pop();
        }
        if text.ends_with('\r') {
            text.pop();
        }
        Some(text)
    }

    /// Convert a character offset to `(line, column)`.
    pub fn offset_to_position(&self, offset: usize) -> (usize, usize) {
        let offset = offset.min(self.rope.len_chars());
        let line = self.rope.char_to_line(offset);
        (line, offset - self.rope.line_to_char(line))
    }

    /// Character offset of the first character of `line` (clamped).
    pub fn line_to_offset(&self, line: usize) -> usize {
        if line >= self.rope.len_lines() {
            return self.rope.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// How many times the caret has been explicitly placed and revealed.
    pub fn reveal_count(&self) -> usize {
        self.reveal_count
    }

    /// Register a caret listener.
    pub fn on_caret_changed<F>(&mut self, listener: F)
    where
        F: FnMut(usize) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    fn move_caret(&mut self, position: usize) {
        if self.caret == position {
            return;
        }
        self.caret = position;
        for listener in &mut self.listeners {
            listener(position);
        }
    }
}

impl RenderSurface for RopeSurface {
    fn insert_text(&mut self, position: usize, text: &str) {
        let position = position.min(self.rope.len_chars());
        self.rope.insert(position, text);
        if position <= self.caret {
            let shifted = self.caret + crate::symbol::char_len(text);
            self.move_caret(shifted);
        }
    }

    fn remove_text(&mut self, start: usize, len: usize) {
        let end = start.saturating_add(len).min(self.rope.len_chars());
        let start = start.min(end);
        if start == end {
            return;
        }
        self.rope.remove(start..end);

        if self.caret >= end {
            let shifted = self.caret - (end - start);
            self.move_caret(shifted);
        } else if self.caret > start {
            self.move_caret(start);
        }
    }

    fn caret_position(&self) -> usize {
        self.caret
    }

    fn set_caret_position(&mut self, position: usize) {
        let position = position.min(self.rope.len_chars());
        self.reveal_count += 1;
        self.move_caret(position);
    }
}

/// A mutating call made against a [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceCall {
    /// `insert_text(position, text)`
    Insert {
        /// Insertion offset.
        position: usize,
        /// Inserted text.
        text: String,
    },
    /// `remove_text(start, len)`
    Remove {
        /// Start offset.
        start: usize,
        /// Number of removed characters.
        len: usize,
    },
    /// `set_caret_position(position)`
    SetCaret(usize),
}

/// Surface wrapper that records every mutating call before forwarding it.
#[derive(Debug, Default)]
pub struct RecordingSurface<S = RopeSurface> {
    inner: S,
    calls: Vec<SurfaceCall>,
}

impl<S: RenderSurface> RecordingSurface<S> {
    /// Wrap `inner`.
    pub fn new(inner: S) -> Self {
        Self {
            inner,
            calls: Vec::new(),
        }
    }

    /// Calls recorded so far.
    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    /// Take and reset the recorded calls.
    pub fn take_calls(&mut self) -> Vec<SurfaceCall> {
        std::mem::take(&mut self.calls)
    }

    /// The wrapped surface.
    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// The wrapped surface, mutably. Calls made through it are not recorded.
    pub fn inner_mut(&mut self) -> &mut S {
        &mut self.inner
    }

    /// Unwrap the inner surface.
    pub fn into_inner(self) -> S {
        self.inner
    }
}

impl<S: RenderSurface> RenderSurface for RecordingSurface<S> {
    fn insert_text(&mut self, position: usize, text: &str) {
        self.calls.push(SurfaceCall::Insert {
            position,
            text: text.to_string(),
        });
        self.inner.insert_text(position, text);
    }

    fn remove_text(&mut self, start: usize, len: usize) {
        self.calls.push(SurfaceCall::Remove { start, len });
        self.inner.remove_text(start, len);
    }

    fn caret_position(&self) -> usize {
        self.inner.caret_position()
    }

    fn set_caret_position(&mut self, position: usize) {
        self.calls.push(SurfaceCall::SetCaret(position));
        self.inner.set_caret_position(position);
    }
}
