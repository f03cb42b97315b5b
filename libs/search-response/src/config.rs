//! Decoder configuration and safety limits
//!
//! The defaults decode every response the server emits; the knobs exist to
//! bound recursion on hostile payloads and to turn off JSON flat-list support
//! for callers that only ever feed parser-produced named lists.

use serde::Deserialize;

use crate::error::DecodeError;

/// Configuration for [`QueryResponse`](crate::QueryResponse) decoding.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct DecoderConfig {
    /// Maximum nesting of group commands inside groups (default: 8)
    pub max_group_depth: usize,
    /// Accept `[label, value, label, value, ...]` lists wherever a named list
    /// is expected (default: true)
    pub flat_named_lists: bool,
}

impl Default for DecoderConfig {
    fn default() -> Self {
        Self {
            max_group_depth: 8,
            flat_named_lists: true,
        }
    }
}

impl DecoderConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum group nesting depth
    #[must_use]
    pub fn with_max_group_depth(mut self, depth: usize) -> Self {
        self.max_group_depth = depth;
        self
    }

    /// Enable or disable flat named list support
    #[must_use]
    pub fn with_flat_named_lists(mut self, enabled: bool) -> Self {
        self.flat_named_lists = enabled;
        self
    }

    /// Check the configuration for values that would make every decode fail.
    ///
    /// # Errors
    /// Returns `DecodeError::InvalidConfig` if `max_group_depth` is zero.
    pub fn validate(&self) -> Result<(), DecodeError> {
        if self.max_group_depth == 0 {
            return Err(DecodeError::InvalidConfig(
                "max_group_depth must be at least 1".to_owned(),
            ));
        }
        Ok(())
    }
}
