//! Verbatim JSON tokenizer.
//!
//! Splits JSON text into [`JsonToken`]s without reformatting: concatenating the token texts
//! reproduces the input exactly, whitespace included. This is a lexer, not a validator; a
//! structurally invalid document (`{]`) tokenizes fine.

use crate::error::JsonTokenizeError;
use crate::token::{JsonToken, JsonTokenKind};
use regex::Regex;
use symtext_core::{SymbolProducer, char_len};

/// One alternative per token class, anchored at the start of the remaining input.
const TOKEN_PATTERN: &str = concat!(
    r#"\A(?:"#,
    r#"(?P<ws>[ \t\r\n]+)"#,
    r#"|(?P<string>"(?:[^"\\\x00-\x1f]|\\["\\/bfnrt]|\\u[0-9a-fA-F]{4})*")"#,
    r#"|(?P<number>-?(?:0|[1-9][0-9]*)(?:\.[0-9]+)?(?:[eE][+-]?[0-9]+)?)"#,
    r#"|(?P<literal>true|false|null)"#,
    r#"|(?P<punct>[{}\[\]:,])"#,
    r#")"#,
);

/// Regex-based JSON lexer and symbol producer.
#[derive(Debug, Clone)]
pub struct JsonTokenizer {
    regex: Regex,
    source: String,
}

impl JsonTokenizer {
    /// Create a tokenizer with empty source text.
    pub fn new() -> Result<Self, JsonTokenizeError> {
        Self::with_source(String::new())
    }

    /// Create a tokenizer producing tokens for `source`.
    pub fn with_source(source: impl Into<String>) -> Result<Self, JsonTokenizeError> {
        Ok(Self {
            regex: Regex::new(TOKEN_PATTERN)?,
            source: source.into(),
        })
    }

    /// Replace the source text.
    pub fn set_source(&mut self, source: impl Into<String>) {
        self.source = source.into();
    }

    /// The current source text.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Tokenize `text`.
    pub fn tokenize(&self, text: &str) -> Result<Vec<JsonToken>, JsonTokenizeError> {
        let mut tokens = Vec::new();
        let mut rest = text;
        let mut offset = 0;

        while !rest.is_empty() {
            let Some(caps) = self.regex.captures(rest) else {
                let character = rest.chars().next().unwrap_or_default();
                tracing::debug!(offset, ?character, "unexpected character in JSON input");
                return Err(JsonTokenizeError::UnexpectedCharacter { offset, character });
            };

            let matched = &caps[0];
            let kind = if caps.name("ws").is_some() {
                JsonTokenKind::Whitespace
            } else if caps.name("string").is_some() {
                JsonTokenKind::String
            } else if caps.name("number").is_some() {
                JsonTokenKind::Number
            } else if caps.name("literal").is_some() {
                if matched == "null" {
                    JsonTokenKind::Null
                } else {
                    JsonTokenKind::Boolean
                }
            } else {
                match matched {
                    "{" => JsonTokenKind::BeginObject,
                    "}" => JsonTokenKind::EndObject,
                    "[" => JsonTokenKind::BeginArray,
                    "]" => JsonTokenKind::EndArray,
                    ":" => JsonTokenKind::Colon,
                    _ => JsonTokenKind::Comma,
                }
            };

            tokens.push(JsonToken::new(kind, matched));
            offset += char_len(matched);
            rest = &rest[matched.len()..];
        }

        Ok(tokens)
    }
}

impl SymbolProducer for JsonTokenizer {
    type Symbol = JsonToken;
    type Error = JsonTokenizeError;

    fn produce(&mut self) -> Result<Vec<JsonToken>, JsonTokenizeError> {
        self.tokenize(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(text: &str) -> Vec<JsonTokenKind> {
        let tokenizer = JsonTokenizer::new().unwrap();
        tokenizer
            .tokenize(text)
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_tokenize_object() {
        use JsonTokenKind::*;
        assert_eq!(
            kinds(r#"{"a": [1, -2.5e3, true, null]}"#),
            vec![
                BeginObject, String, Colon, Whitespace, BeginArray, Number, Comma, Whitespace,
                Number, Comma, Whitespace, Boolean, Comma, Whitespace, Null, EndArray, EndObject,
            ]
        );
    }

    #[test]
    fn test_round_trips_text() {
        let text = "{\n  \"naïve\": \"a\\\"b\\u00e9\",\r\n\t\"n\": 0\n}\n";
        let tokenizer = JsonTokenizer::new().unwrap();
        let tokens = tokenizer.tokenize(text).unwrap();
        let joined: std::string::String = tokens.iter().map(|t| t.text.as_str()).collect();
        assert_eq!(joined, text);
    }

    #[test]
    fn test_unexpected_character_offset_is_in_chars() {
        let tokenizer = JsonTokenizer::new().unwrap();
        let err = tokenizer.tokenize("[\"é\", @]").unwrap_err();
        match err {
            JsonTokenizeError::UnexpectedCharacter { offset, character } => {
                assert_eq!(offset, 6);
                assert_eq!(character, '@');
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unterminated_string_is_rejected() {
        let tokenizer = JsonTokenizer::new().unwrap();
        assert!(tokenizer.tokenize("\"abc").is_err());
    }

    #[test]
    fn test_produce_uses_source() {
        let mut tokenizer = JsonTokenizer::with_source("[1]").unwrap();
        assert_eq!(tokenizer.produce().unwrap().len(), 3);
        tokenizer.set_source("[]");
        assert_eq!(tokenizer.produce().unwrap().len(), 2);
        assert_eq!(tokenizer.source(), "[]");
    }
}
