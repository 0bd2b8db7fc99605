//! Core submission pipeline: URL in, catalogued item out

use crate::config::SubmissionConfig;
use crate::error::ExtractorError;
use crate::normalizer::normalize;
use crate::parser::parse_extraction;
use crate::prompt::PromptBuilder;
use crate::resolver::Resolver;
use crate::types::{SubmitOutcome, SubmitRequest};
use minidna_domain::traits::{CompletionProvider, ItemRepository};
use minidna_domain::{ExtractedProduct, Item, ItemAttributes, ItemId, NewItem, ProductDetails};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns product URLs into catalogued items
///
/// Each submission runs prompt → completion → parse → normalize → resolve →
/// create, one awaited step at a time. Nothing is stored unless every step
/// before the create succeeds. The repository is the only shared state.
pub struct ItemSubmitter<L, R>
where
    L: CompletionProvider,
    R: ItemRepository,
{
    llm_provider: Arc<L>,
    repository: Arc<R>,
    resolver: Resolver,
    config: SubmissionConfig,
}

impl<L, R> ItemSubmitter<L, R>
where
    L: CompletionProvider,
    R: ItemRepository,
{
    /// Create a new ItemSubmitter
    pub fn new(llm_provider: L, repository: R, config: SubmissionConfig) -> Self {
        Self::with_shared(Arc::new(llm_provider), Arc::new(repository), config)
    }

    /// Create an ItemSubmitter over collaborators shared with other owners
    pub fn with_shared(llm_provider: Arc<L>, repository: Arc<R>, config: SubmissionConfig) -> Self {
        Self {
            llm_provider,
            repository,
            resolver: Resolver::new(&config),
            config,
        }
    }

    /// Catalogue the product page named in the request
    pub async fn submit(&self, request: SubmitRequest) -> Result<SubmitOutcome, ExtractorError> {
        let url = validate_url(request.url)?;

        info!(url = %url, model = self.llm_provider.model_name(), "Starting item submission");

        let details = self.extract(&url).await?;

        let fingerprint = normalize(&details);
        debug!(fingerprint = %fingerprint, "Fingerprint computed");

        let resolution = self
            .resolver
            .resolve(self.repository.as_ref(), &fingerprint)
            .await?;

        let new_item = NewItem {
            source_url: url,
            title: display_title(&details),
            description: details.description.clone(),
            category: details.core_type.clone(),
            attributes: ItemAttributes::from_details(&details),
            fingerprint,
            canonical_id: resolution.canonical_id,
            confidence_score: resolution.confidence_score,
        };

        let item = self
            .repository
            .create_item(new_item)
            .await
            .map_err(|e| ExtractorError::Repository(e.to_string()))?;

        info!(
            item_id = %item.id,
            duplicate = resolution.is_duplicate(),
            confidence = item.confidence_score,
            "Item submission complete"
        );

        Ok(SubmitOutcome {
            is_duplicate: resolution.is_duplicate(),
            canonical_item_id: resolution.canonical_id,
            item,
        })
    }

    /// Get a stored item by id
    pub async fn get_item(&self, id: ItemId) -> Result<Option<Item>, ExtractorError> {
        self.repository
            .get_item(id)
            .await
            .map_err(|e| ExtractorError::Repository(e.to_string()))
    }

    /// Run the completion service over the URL and keep supported extractions
    async fn extract(&self, url: &str) -> Result<ProductDetails, ExtractorError> {
        let prompt = PromptBuilder::new(url).build();
        debug!("Prompt length: {} chars", prompt.len());

        let response = self
            .llm_provider
            .generate(&prompt)
            .await
            .map_err(|e| ExtractorError::Completion(e.to_string()))?;
        debug!("LLM response length: {} chars", response.len());

        match parse_extraction(&response) {
            Ok(ExtractedProduct::Supported(details)) => Ok(details),
            Ok(ExtractedProduct::Unsupported { message }) => {
                let message =
                    message.unwrap_or_else(|| self.config.unsupported_fallback_message.clone());
                info!(url = %url, "URL rejected as unsupported");
                Err(ExtractorError::UnsupportedSubject(message))
            }
            Err(e) => {
                warn!(url = %url, error = %e, "Extraction failed");
                Err(e)
            }
        }
    }
}

/// Require a non-blank URL, returning it trimmed
fn validate_url(url: Option<String>) -> Result<String, ExtractorError> {
    match url {
        Some(url) if !url.trim().is_empty() => Ok(url.trim().to_string()),
        _ => Err(ExtractorError::Validation("url is required".to_string())),
    }
}

/// Extracted title, falling back to "brand product_line"
fn display_title(details: &ProductDetails) -> Option<String> {
    if let Some(title) = details.title.as_deref().filter(|t| !t.trim().is_empty()) {
        return Some(title.to_string());
    }

    let fallback = [details.brand.as_deref(), details.product_line.as_deref()]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    (!fallback.is_empty()).then_some(fallback)
}
