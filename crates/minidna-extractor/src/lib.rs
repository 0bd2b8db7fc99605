//! MiniDNA Extractor
//!
//! Turns a product page URL into a catalogued item using a language model,
//! and merges duplicate submissions onto one canonical record.
//!
//! # Architecture
//!
//! ```text
//! URL → PromptBuilder → CompletionProvider → parse_extraction → normalize
//!     → Resolver → ItemRepository::create_item
//! ```
//!
//! # Key Features
//!
//! - **Strict Extraction**: the model's JSON is validated against a tagged
//!   union (supported product vs unsupported page) right after parsing
//! - **Identity Keys**: brand, product line, core type and target user are
//!   normalized into an exact-match fingerprint
//! - **Canonical Linkage**: duplicates always point at the first item stored
//!   for their fingerprint, with a configurable confidence score
//!
//! # Example Usage
//!
//! ```no_run
//! use minidna_extractor::{ItemSubmitter, SubmissionConfig, SubmitRequest};
//! use minidna_llm::MockProvider;
//! use minidna_store::MemoryStore;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let llm = MockProvider::new(r#"{"supported": true, "brand": "Nike"}"#);
//! let submitter = ItemSubmitter::new(llm, MemoryStore::new(), SubmissionConfig::default());
//!
//! let outcome = submitter
//!     .submit(SubmitRequest::new("https://www.nike.com/t/pegasus-40"))
//!     .await?;
//!
//! println!("Stored {} (duplicate: {})", outcome.item.id, outcome.is_duplicate);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod normalizer;
mod parser;
mod prompt;
mod resolver;
mod submitter;
mod types;


pub use config::{SubmissionConfig, DEFAULT_UNSUPPORTED_MESSAGE};
pub use error::ExtractorError;
pub use normalizer::normalize;
pub use parser::parse_extraction;
pub use prompt::{PromptBuilder, UNSUPPORTED_PROMPT_MESSAGE};
pub use resolver::Resolver;
pub use submitter::ItemSubmitter;
pub use types::{Resolution, SubmitOutcome, SubmitRequest};
