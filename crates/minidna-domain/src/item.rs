//! Item module - the persisted catalogue entry

use crate::extraction::{KeyAttributes, ProductDetails, VariantAttributes};
use crate::identity::IdentityKey;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for an item based on UUIDv7
///
/// UUIDv7 keeps identifiers chronologically sortable, matching the order in
/// which the repository stores items. Ids are assigned by the repository,
/// never by the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(uuid::Uuid);

impl ItemId {
    /// Generate a new UUIDv7-based ItemId
    ///
    /// # Examples
    ///
    /// ```
    /// use minidna_domain::ItemId;
    ///
    /// let a = ItemId::new();
    /// let b = ItemId::new();
    /// assert_ne!(a, b);
    /// ```
    pub fn new() -> Self {
        Self(uuid::Uuid::now_v7())
    }

    /// Parse an ItemId from its hyphenated string form
    ///
    /// # Examples
    ///
    /// ```
    /// use minidna_domain::ItemId;
    ///
    /// let id = ItemId::new();
    /// let parsed = ItemId::from_string(&id.to_string()).unwrap();
    /// assert_eq!(id, parsed);
    /// ```
    pub fn from_string(s: &str) -> Result<Self, String> {
        uuid::Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| format!("Invalid item id '{}': {}", s, e))
    }

    /// Create an ItemId from a raw u128 value
    ///
    /// This is primarily for storage layer deserialization.
    pub fn from_value(value: u128) -> Self {
        Self(uuid::Uuid::from_u128(value))
    }

    /// Get the raw u128 value
    pub fn value(&self) -> u128 {
        self.0.as_u128()
    }

    /// Get the underlying UUID
    pub fn as_uuid(&self) -> uuid::Uuid {
        self.0
    }
}

impl Default for ItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ItemId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_string(s)
    }
}

/// Attribute bundle stored with every item
///
/// Keeps the snake_case keys of the extraction schema on the wire.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributes {
    /// Manufacturer brand
    pub brand: Option<String>,
    /// Product line or model name
    pub product_line: Option<String>,
    /// Intended user
    pub target_user: Option<String>,
    /// Identity-defining attributes
    #[serde(default)]
    pub key_attributes: KeyAttributes,
    /// Variant attributes (color, size)
    #[serde(default)]
    pub variant_attributes: VariantAttributes,
}

impl ItemAttributes {
    /// Copy the attribute bundle out of an extraction
    pub fn from_details(details: &ProductDetails) -> Self {
        Self {
            brand: details.brand.clone(),
            product_line: details.product_line.clone(),
            target_user: details.target_user.clone(),
            key_attributes: details.key_attributes.clone(),
            variant_attributes: details.variant_attributes.clone(),
        }
    }
}

/// Fields of an item before the repository stores it
///
/// The repository assigns `id` and `created_at` when it persists one.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    /// URL the item was submitted from
    pub source_url: String,
    /// Display title
    pub title: Option<String>,
    /// Description from the product page
    pub description: Option<String>,
    /// Category (the extracted core type)
    pub category: Option<String>,
    /// Extracted attribute bundle
    pub attributes: ItemAttributes,
    /// Identity key used for duplicate matching
    pub fingerprint: IdentityKey,
    /// Canonical item this one duplicates, `None` if it is canonical itself
    pub canonical_id: Option<ItemId>,
    /// How certain the system is about the canonical link, in [0, 1]
    pub confidence_score: f64,
}

impl NewItem {
    /// Attach repository-assigned fields, producing the stored item
    pub fn into_item(self, id: ItemId, created_at: u64) -> Item {
        Item {
            id,
            source_url: self.source_url,
            title: self.title,
            description: self.description,
            category: self.category,
            attributes: self.attributes,
            fingerprint: self.fingerprint,
            canonical_id: self.canonical_id,
            confidence_score: self.confidence_score,
            created_at,
        }
    }
}

/// A catalogued product submission
///
/// Items are created once per accepted submission and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    /// Unique identifier
    pub id: ItemId,
    /// URL the item was submitted from
    pub source_url: String,
    /// Display title
    pub title: Option<String>,
    /// Description from the product page
    pub description: Option<String>,
    /// Category (the extracted core type)
    pub category: Option<String>,
    /// Extracted attribute bundle
    pub attributes: ItemAttributes,
    /// Identity key used for duplicate matching
    pub fingerprint: IdentityKey,
    /// Canonical item this one duplicates, `None` if it is canonical itself
    pub canonical_id: Option<ItemId>,
    /// How certain the system is about the canonical link, in [0, 1]
    pub confidence_score: f64,
    /// When the item was stored (unix seconds)
    pub created_at: u64,
}

impl Item {
    /// True when this item is the canonical record for its fingerprint
    pub fn is_canonical(&self) -> bool {
        self.canonical_id.is_none()
    }

    /// Id of the canonical record this item belongs to
    ///
    /// Canonical links are always flat, so this is either the item's own id
    /// or the id it points at; never an intermediate duplicate.
    pub fn canonical_root(&self) -> ItemId {
        self.canonical_id.unwrap_or(self.id)
    }
}
