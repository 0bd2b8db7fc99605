//! Deduplication policy: canonical linkage and confidence

use crate::config::SubmissionConfig;
use crate::error::ExtractorError;
use crate::types::Resolution;
use minidna_domain::traits::ItemRepository;
use minidna_domain::{IdentityKey, Item};
use tracing::debug;

/// Decides whether a new submission duplicates an existing item
///
/// Matching is exact on the identity key. A match always links to the
/// original canonical item, so duplicate chains stay one level deep.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolver {
    canonical_confidence: f64,
    duplicate_confidence: f64,
}

impl Resolver {
    /// Create a resolver from the pipeline policy
    pub fn new(config: &SubmissionConfig) -> Self {
        Self {
            canonical_confidence: config.canonical_confidence,
            duplicate_confidence: config.duplicate_confidence,
        }
    }

    /// Decide linkage given the first stored item with the same key, if any
    pub fn decide(&self, existing: Option<&Item>) -> Resolution {
        match existing {
            None => Resolution {
                canonical_id: None,
                confidence_score: self.canonical_confidence,
            },
            Some(item) => Resolution {
                canonical_id: Some(item.canonical_root()),
                confidence_score: self.duplicate_confidence,
            },
        }
    }

    /// Look up the key in the repository and decide linkage
    ///
    /// The empty key is resolved like any other.
    pub async fn resolve<R>(
        &self,
        repository: &R,
        key: &IdentityKey,
    ) -> Result<Resolution, ExtractorError>
    where
        R: ItemRepository,
    {
        let existing = repository
            .find_first_by_fingerprint(key)
            .await
            .map_err(|e| ExtractorError::Repository(e.to_string()))?;

        let resolution = self.decide(existing.as_ref());
        debug!(
            fingerprint = %key,
            duplicate = resolution.is_duplicate(),
            "Fingerprint resolved"
        );
        Ok(resolution)
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::new(&SubmissionConfig::default())
    }
}
