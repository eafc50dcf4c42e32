#![warn(missing_docs)]
//! `symtext-json` - JSON token producers for `symtext-core`.
//!
//! Two producers are provided:
//!
//! - [`JsonTokenizer`]: a regex-based lexer that reproduces its input verbatim, whitespace
//!   included. Use it to display a JSON file as the user wrote it.
//! - [`SettingsDocument`]: a parsed settings value rendered in a canonical pretty-printed
//!   layout, with each token tagged by the JSON pointer of its member. Use it to display typed
//!   settings and highlight the one being edited.
//!
//! Neither validates against a schema.
//!
//! ```rust
//! use serde_json::json;
//! use symtext_core::{DocumentView, RopeSurface};
//! use symtext_json::{SettingsDocument, key_at};
//!
//! let mut settings = SettingsDocument::new(json!({ "tabSize": 4, "wordWrap": false }));
//! let mut view = DocumentView::new(RopeSurface::new());
//! view.refresh_from(&mut settings, key_at("/wordWrap")).unwrap();
//!
//! settings.set("/wordWrap", json!(true)).unwrap();
//! let outcome = view.refresh_from(&mut settings, key_at("/wordWrap")).unwrap();
//!
//! // Only the changed value was re-rendered.
//! assert_eq!(outcome.delta.edits[0].inserted_text, "true\n}");
//! ```

mod error;
mod settings;
mod token;
mod tokenizer;

pub use error::{JsonTokenizeError, SettingsError};
pub use settings::{JsonFormatOptions, SettingsDocument};
pub use token::{JsonToken, JsonTokenKind, escape_pointer_segment, key_at, value_at};
pub use tokenizer::JsonTokenizer;
