//! Error types for the submission pipeline

use thiserror::Error;

/// Errors that can occur while turning a URL into a catalogued item
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Submitted request is malformed (missing or blank URL)
    #[error("{0}")]
    Validation(String),

    /// The model decided the URL is not a physical-product page
    #[error("{0}")]
    UnsupportedSubject(String),

    /// Completion service returned no content
    #[error("Empty LLM response")]
    EmptyResponse,

    /// Completion output was not a valid extraction after fence stripping
    #[error("Malformed extraction: {0}")]
    MalformedExtraction(String),

    /// Completion service call failed
    #[error("LLM error: {0}")]
    Completion(String),

    /// Item repository lookup or create failed
    #[error("Repository error: {0}")]
    Repository(String),
}

impl ExtractorError {
    /// True for errors caused by the caller's request rather than the system
    ///
    /// Client errors are answered with a rejection; everything else is a
    /// processing failure.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ExtractorError::Validation(_) | ExtractorError::UnsupportedSubject(_)
        )
    }
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::MalformedExtraction(e.to_string())
    }
}
