//! Configuration for the submission pipeline

use serde::{Deserialize, Serialize};

/// Message returned when the model rejects a URL without explaining why
pub const DEFAULT_UNSUPPORTED_MESSAGE: &str = "🎯 We're focusing on physical products right now!";

/// Policy settings for the submission pipeline
///
/// Built once at startup and handed to the `ItemSubmitter`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SubmissionConfig {
    /// Confidence assigned to a submission that becomes canonical
    pub canonical_confidence: f64,

    /// Confidence assigned to an exact normalized-key match
    pub duplicate_confidence: f64,

    /// Rejection message used when the model gives none
    pub unsupported_fallback_message: String,
}

impl SubmissionConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [
            ("canonical_confidence", self.canonical_confidence),
            ("duplicate_confidence", self.duplicate_confidence),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} must be within [0, 1], got {}", name, value));
            }
        }
        if self.unsupported_fallback_message.trim().is_empty() {
            return Err("unsupported_fallback_message must not be empty".to_string());
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for SubmissionConfig {
    fn default() -> Self {
        Self {
            canonical_confidence: 1.0,
            duplicate_confidence: 0.95,
            unsupported_fallback_message: DEFAULT_UNSUPPORTED_MESSAGE.to_string(),
        }
    }
}
