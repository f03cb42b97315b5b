//! Decode failures.
//!
//! Every variant names the response section and the entry inside it, so a
//! caller can tell which accessor's data was malformed. Errors are `Clone`
//! because a failed section is cached and handed out on every access.

use crate::named_list::Value;

/// Error raised while turning a raw response into typed values.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DecodeError {
    /// A required key is absent (or `null`).
    #[error("{section}/{entry}: missing required field `{key}`")]
    MissingField {
        section: &'static str,
        entry: String,
        key: &'static str,
    },

    /// A key is present but its value cannot be read as the expected type.
    #[error("{section}/{entry}: field `{key}` is not a valid {expected} (found {found})")]
    InvalidField {
        section: &'static str,
        entry: String,
        key: String,
        expected: &'static str,
        found: String,
    },

    /// An entry matches none of the structural shapes the decoder knows.
    #[error("{section}/{entry}: unrecognized shape: {reason}")]
    UnrecognizedShape {
        section: &'static str,
        entry: String,
        reason: &'static str,
    },

    /// Nested group commands go deeper than the configured limit.
    #[error("{section}/{entry}: nesting exceeds the maximum depth of {limit}")]
    TooDeep {
        section: &'static str,
        entry: String,
        limit: usize,
    },

    /// The JSON adapter was handed something other than a JSON object.
    #[error("invalid JSON payload: {0}")]
    Json(String),

    #[error("invalid decoder configuration: {0}")]
    InvalidConfig(String),
}

impl DecodeError {
    pub(crate) fn missing(section: &'static str, entry: &str, key: &'static str) -> Self {
        Self::MissingField {
            section,
            entry: entry.to_owned(),
            key,
        }
    }

    pub(crate) fn invalid(
        section: &'static str,
        entry: &str,
        key: impl Into<String>,
        expected: &'static str,
        found: &Value,
    ) -> Self {
        Self::InvalidField {
            section,
            entry: entry.to_owned(),
            key: key.into(),
            expected,
            found: found.describe(),
        }
    }

    pub(crate) fn unrecognized(section: &'static str, entry: &str, reason: &'static str) -> Self {
        Self::UnrecognizedShape {
            section,
            entry: entry.to_owned(),
            reason,
        }
    }

    /// Section the error was raised in, if it came from a section decoder.
    #[must_use]
    pub fn section(&self) -> Option<&'static str> {
        match self {
            Self::MissingField { section, .. }
            | Self::InvalidField { section, .. }
            | Self::UnrecognizedShape { section, .. }
            | Self::TooDeep { section, .. } => Some(section),
            Self::Json(_) | Self::InvalidConfig(_) => None,
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}
