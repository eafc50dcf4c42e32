//! The terminal symbol abstraction.
//!
//! A terminal symbol is an indivisible, producer-defined token (a chess ply, a space, a JSON
//! token). The index never inspects symbols beyond equality; the reconciler additionally needs
//! each symbol's text form to know how many characters it occupies.

use std::borrow::Cow;

/// A producer-defined token that renders to a non-empty run of characters.
///
/// Equality is *value* equality: two independently constructed symbols that compare equal are
/// treated as "the same token as before" during reconciliation, even though producers build a
/// fresh sequence on every change.
pub trait TerminalSymbol: PartialEq {
    /// The characters this symbol occupies in the rendered document.
    ///
    /// An empty rendering is rejected when the symbol is appended.
    fn text(&self) -> Cow<'_, str>;
}

impl TerminalSymbol for String {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl TerminalSymbol for &str {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl TerminalSymbol for char {
    fn text(&self) -> Cow<'_, str> {
        Cow::Owned(self.to_string())
    }
}

/// Length of a rendered symbol in characters (Unicode scalar values).
pub fn char_len(text: &str) -> usize {
    if text.is_ascii() {
        text.len()
    } else {
        text.chars().count()
    }
}
