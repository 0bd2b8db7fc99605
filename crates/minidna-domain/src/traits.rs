//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Both collaborators may suspend (network or storage I/O), so the seams are
//! async. Infrastructure implementations live in other crates.

use crate::{IdentityKey, Item, ItemId, NewItem};
use async_trait::async_trait;

/// Trait for storing and retrieving items
///
/// Implemented by the infrastructure layer (minidna-store)
///
/// Implementations must assign ids atomically in `create_item`, and
/// `find_first_by_fingerprint` must observe previously committed creates.
/// No uniqueness of canonical items per fingerprint is required here.
#[async_trait]
pub trait ItemRepository: Send + Sync {
    /// Error type for repository operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Find the earliest stored item carrying the given fingerprint
    async fn find_first_by_fingerprint(
        &self,
        key: &IdentityKey,
    ) -> Result<Option<Item>, Self::Error>;

    /// Persist a new item, assigning it a fresh id
    async fn create_item(&self, item: NewItem) -> Result<Item, Self::Error>;

    /// Get an item by id
    async fn get_item(&self, id: ItemId) -> Result<Option<Item>, Self::Error>;
}

/// Trait for completion service operations
///
/// Implemented by the infrastructure layer (minidna-llm)
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Error type for completion operations
    type Error: std::error::Error + Send + Sync + 'static;

    /// Generate a text completion for a single user prompt
    ///
    /// A provider that receives no content returns an empty string.
    async fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Name of the model serving completions, for logging
    fn model_name(&self) -> &str;
}
