use symtext_core::IndexError;
use thiserror::Error;

#[derive(Debug, Error)]
/// Errors produced by [`JsonTokenizer`](crate::JsonTokenizer).
pub enum JsonTokenizeError {
    #[error("unexpected character {character:?} at offset {offset}")]
    /// The input contains a character that starts no JSON token.
    UnexpectedCharacter {
        /// Character offset of the offending character.
        offset: usize,
        /// The offending character.
        character: char,
    },

    #[error("regex compile error: {0}")]
    /// The token grammar failed to compile.
    Regex(#[from] regex::Error),

    #[error(transparent)]
    /// Reconciling the produced tokens failed.
    Index(#[from] IndexError),
}

#[derive(Debug, Error)]
/// Errors produced by [`SettingsDocument`](crate::SettingsDocument).
pub enum SettingsError {
    #[error("JSON parse error: {0}")]
    /// The settings text is not valid JSON.
    Json(#[from] serde_json::Error),

    #[error("unknown setting: {0}")]
    /// No value exists at the given JSON pointer.
    UnknownSetting(String),

    #[error(transparent)]
    /// Reconciling the produced tokens failed.
    Index(#[from] IndexError),
}
