//! JSON terminal symbols.

use std::borrow::Cow;
use symtext_core::TerminalSymbol;

/// Lexical class of a [`JsonToken`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JsonTokenKind {
    /// `{`
    BeginObject,
    /// `}`
    EndObject,
    /// `[`
    BeginArray,
    /// `]`
    EndArray,
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// An object member name (only distinguished by [`SettingsDocument`](crate::SettingsDocument)).
    Key,
    /// A string value.
    String,
    /// A number.
    Number,
    /// `true` or `false`.
    Boolean,
    /// `null`
    Null,
    /// A run of whitespace.
    Whitespace,
}

impl JsonTokenKind {
    /// Returns `true` for tokens that carry a value (or a member name).
    pub fn is_value(self) -> bool {
        matches!(
            self,
            Self::Key | Self::String | Self::Number | Self::Boolean | Self::Null
        )
    }
}

/// One JSON token with its exact text.
///
/// `pointer` is the JSON pointer (RFC 6901) of the member or element the token belongs to, when
/// the producer knows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonToken {
    /// Lexical class.
    pub kind: JsonTokenKind,
    /// Exact rendered text.
    pub text: String,
    /// JSON pointer of the owning member/element.
    pub pointer: Option<String>,
}

impl JsonToken {
    /// Create a token without a pointer.
    pub fn new(kind: JsonTokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
            pointer: None,
        }
    }

    /// Attach a JSON pointer.
    pub fn with_pointer(mut self, pointer: impl Into<String>) -> Self {
        self.pointer = Some(pointer.into());
        self
    }
}

impl TerminalSymbol for JsonToken {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }
}

/// Active-element predicate matching the member-name token at `pointer`.
pub fn key_at(pointer: &str) -> impl Fn(&JsonToken) -> bool + '_ {
    move |token: &JsonToken| {
        token.kind == JsonTokenKind::Key && token.pointer.as_deref() == Some(pointer)
    }
}

/// Active-element predicate matching the first value token at `pointer`.
pub fn value_at(pointer: &str) -> impl Fn(&JsonToken) -> bool + '_ {
    move |token: &JsonToken| {
        token.kind.is_value()
            && token.kind != JsonTokenKind::Key
            && token.pointer.as_deref() == Some(pointer)
    }
}

/// Escape one reference token for use in a JSON pointer.
pub fn escape_pointer_segment(segment: &str) -> Cow<'_, str> {
    if segment.contains(['~', '/']) {
        Cow::Owned(segment.replace('~', "~0").replace('/', "~1"))
    } else {
        Cow::Borrowed(segment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_escaping() {
        assert_eq!(escape_pointer_segment("fontSize"), "fontSize");
        assert_eq!(escape_pointer_segment("a/b"), "a~1b");
        assert_eq!(escape_pointer_segment("m~n"), "m~0n");
    }

    #[test]
    fn test_predicates() {
        let key = JsonToken::new(JsonTokenKind::Key, "\"tabSize\"").with_pointer("/tabSize");
        let value = JsonToken::new(JsonTokenKind::Number, "4").with_pointer("/tabSize");
        assert!(key_at("/tabSize")(&key));
        assert!(!key_at("/tabSize")(&value));
        assert!(value_at("/tabSize")(&value));
        assert!(!value_at("/other")(&value));
    }
}
