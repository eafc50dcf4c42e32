//! Pretty-printed settings documents.
//!
//! [`SettingsDocument`] holds a parsed JSON value and renders it in a canonical layout, one
//! member per line. Every token carries the JSON pointer of the member it belongs to, so a view
//! can highlight "the setting at `/editor/tabSize`" with [`key_at`](crate::key_at).
//!
//! Because the layout is canonical, changing one setting only changes the tokens from that
//! setting onwards; everything before it reconciles as an unchanged prefix.

use crate::error::SettingsError;
use crate::token::{JsonToken, JsonTokenKind, escape_pointer_segment};
use serde_json::Value;
use symtext_core::SymbolProducer;

/// Layout options for [`SettingsDocument`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JsonFormatOptions {
    /// Spaces per nesting level.
    pub indent: usize,
    /// Emit a space after each `:`.
    pub space_after_colon: bool,
}

impl Default for JsonFormatOptions {
    fn default() -> Self {
        Self {
            indent: 2,
            space_after_colon: true,
        }
    }
}

/// A JSON settings value rendered as pretty-printed tokens.
#[derive(Debug, Clone)]
pub struct SettingsDocument {
    value: Value,
    options: JsonFormatOptions,
}

impl SettingsDocument {
    /// Wrap a parsed value.
    pub fn new(value: Value) -> Self {
        Self {
            value,
            options: JsonFormatOptions::default(),
        }
    }

    /// Parse settings text.
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        Ok(Self::new(serde_json::from_str(text)?))
    }

    /// Use custom layout options.
    pub fn with_options(mut self, options: JsonFormatOptions) -> Self {
        self.options = options;
        self
    }

    /// Layout options.
    pub fn options(&self) -> &JsonFormatOptions {
        &self.options
    }

    /// The settings value.
    pub fn value(&self) -> &Value {
        &self.value
    }

    /// The value at `pointer`, if any.
    pub fn get(&self, pointer: &str) -> Option<&Value> {
        self.value.pointer(pointer)
    }

    /// Replace the value at an existing `pointer`.
    pub fn set(&mut self, pointer: &str, value: Value) -> Result<(), SettingsError> {
        let slot = self
            .value
            .pointer_mut(pointer)
            .ok_or_else(|| SettingsError::UnknownSetting(pointer.to_string()))?;
        *slot = value;
        Ok(())
    }

    /// JSON pointers of every object member, in document order.
    pub fn member_pointers(&self) -> Vec<String> {
        let mut pointers = Vec::new();
        collect_members(&self.value, "", &mut pointers);
        pointers
    }

    /// Render the canonical token sequence.
    pub fn to_tokens(&self) -> Vec<JsonToken> {
        let mut emitter = Emitter {
            options: &self.options,
            tokens: Vec::new(),
        };
        emitter.value(&self.value, "", 0);
        emitter.tokens
    }

    /// Render the canonical text.
    pub fn to_text(&self) -> String {
        self.to_tokens().iter().map(|t| t.text.as_str()).collect()
    }
}

impl SymbolProducer for SettingsDocument {
    type Symbol = JsonToken;
    type Error = SettingsError;

    fn produce(&mut self) -> Result<Vec<JsonToken>, SettingsError> {
        Ok(self.to_tokens())
    }
}

fn collect_members(value: &Value, pointer: &str, out: &mut Vec<String>) {
    match value {
        Value::Object(map) => {
            for (key, child) in map {
                let child_pointer = format!("{pointer}/{}", escape_pointer_segment(key));
                out.push(child_pointer.clone());
                collect_members(child, &child_pointer, out);
            }
        }
        Value::Array(items) => {
            for (i, child) in items.iter().enumerate() {
                collect_members(child, &format!("{pointer}/{i}"), out);
            }
        }
        _ => {}
    }
}

struct Emitter<'a> {
    options: &'a JsonFormatOptions,
    tokens: Vec<JsonToken>,
}

impl Emitter<'_> {
    fn push(&mut self, kind: JsonTokenKind, text: impl Into<String>, pointer: &str) {
        self.tokens
            .push(JsonToken::new(kind, text).with_pointer(pointer));
    }

    fn newline(&mut self, depth: usize, pointer: &str) {
        let text = format!("\n{}", " ".repeat(depth * self.options.indent));
        self.push(JsonTokenKind::Whitespace, text, pointer);
    }

    fn value(&mut self, value: &Value, pointer: &str, depth: usize) {
        match value {
            Value::Null => self.push(JsonTokenKind::Null, "null", pointer),
            Value::Bool(b) => self.push(JsonTokenKind::Boolean, b.to_string(), pointer),
            Value::Number(n) => self.push(JsonTokenKind::Number, n.to_string(), pointer),
            Value::String(s) => self.push(JsonTokenKind::String, quote(s), pointer),
            Value::Array(items) => {
                self.push(JsonTokenKind::BeginArray, "[", pointer);
                for (i, item) in items.iter().enumerate() {
                    let child = format!("{pointer}/{i}");
                    if i > 0 {
                        self.push(JsonTokenKind::Comma, ",", pointer);
                    }
                    self.newline(depth + 1, &child);
                    self.value(item, &child, depth + 1);
                }
                if !items.is_empty() {
                    self.newline(depth, pointer);
                }
                self.push(JsonTokenKind::EndArray, "]", pointer);
            }
            Value::Object(map) => {
                self.push(JsonTokenKind::BeginObject, "{", pointer);
                for (i, (key, item)) in map.iter().enumerate() {
                    let child = format!("{pointer}/{}", escape_pointer_segment(key));
                    if i > 0 {
                        self.push(JsonTokenKind::Comma, ",", pointer);
                    }
                    self.newline(depth + 1, &child);
                    self.push(JsonTokenKind::Key, quote(key), &child);
                    self.push(JsonTokenKind::Colon, ":", &child);
                    if self.options.space_after_colon {
                        self.push(JsonTokenKind::Whitespace, " ", &child);
                    }
                    self.value(item, &child, depth + 1);
                }
                if !map.is_empty() {
                    self.newline(depth, pointer);
                }
                self.push(JsonTokenKind::EndObject, "}", pointer);
            }
        }
    }
}

fn quote(s: &str) -> String {
    Value::String(s.to_string()).to_string()
}
