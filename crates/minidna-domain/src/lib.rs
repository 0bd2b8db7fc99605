//! MiniDNA Domain Layer
//!
//! Core value types and trait seams for the product catalogue. Every other
//! crate in the workspace depends on this one; it holds no infrastructure.
//!
//! ## Key Concepts
//!
//! - **Item**: a catalogued product submission, immutable once stored
//! - **Identity Key**: the normalized fingerprint used for exact duplicate matching
//! - **Canonical Item**: the first item stored for a fingerprint; later duplicates point at it
//! - **Extracted Product**: what the language model made of a product page
//!
//! ## Architecture
//!
//! - Pure value types plus serde wire representations
//! - Trait definitions for the completion service and the item repository
//! - Implementations live in `minidna-llm` and `minidna-store`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod extraction;
pub mod identity;
pub mod item;
pub mod traits;

// Re-exports for convenience
pub use extraction::{ExtractedProduct, KeyAttributes, ProductDetails, VariantAttributes};
pub use identity::IdentityKey;
pub use item::{Item, ItemAttributes, ItemId, NewItem};
