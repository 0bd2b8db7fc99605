//! Identity key module - the exact-match duplicate key

use serde::{Deserialize, Serialize};
use std::fmt;

/// Normalized fingerprint identifying a real-world product
///
/// Built by the normalizer from (brand, product line, core type, target user).
/// Two items with equal keys are considered the same product. The empty key is
/// valid: it is what an extraction with no identity signal produces, and all
/// such items collide on it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdentityKey(String);

impl IdentityKey {
    /// Separator placed between key components
    ///
    /// Keys are compared whole; a component may be empty (`"|shoe"`).
    pub const SEPARATOR: char = '|';

    /// Wrap an already-normalized key string
    ///
    /// No normalization happens here; use the extractor's normalizer to build
    /// keys from extracted attributes.
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Get the key as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// True for the degenerate key produced when no identity field was extracted
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for IdentityKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}
