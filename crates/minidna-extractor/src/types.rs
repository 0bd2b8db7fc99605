//! Request and response types for item submission

use minidna_domain::{Item, ItemId};
use serde::{Deserialize, Serialize};

/// Request to catalogue a product page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitRequest {
    /// Product page URL; required and non-blank
    #[serde(default)]
    pub url: Option<String>,
}

impl SubmitRequest {
    /// Request for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
        }
    }
}

/// Result of a successful submission
///
/// Serializes as the stored item's fields plus the duplicate metadata.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitOutcome {
    /// The persisted item
    #[serde(flatten)]
    pub item: Item,

    /// True when an existing item matched the computed fingerprint
    pub is_duplicate: bool,

    /// Canonical item this submission was linked to
    pub canonical_item_id: Option<ItemId>,
}

/// Canonical linkage decided for a new submission
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Resolution {
    /// Canonical item to link to, `None` if the submission becomes canonical
    pub canonical_id: Option<ItemId>,

    /// Confidence in the linkage
    pub confidence_score: f64,
}

impl Resolution {
    /// True when an existing item matched
    pub fn is_duplicate(&self) -> bool {
        self.canonical_id.is_some()
    }
}
