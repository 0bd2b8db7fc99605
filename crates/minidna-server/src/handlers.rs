//! HTTP request handlers for the catalogue service.
//!
//! Implements item submission, item lookup and the health check using axum.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router as AxumRouter,
};
use minidna_domain::traits::{CompletionProvider, ItemRepository};
use minidna_domain::{Item, ItemId};
use minidna_extractor::{ExtractorError, ItemSubmitter, SubmitOutcome, SubmitRequest};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, warn};

/// Fixed liveness payload
pub const HEALTH_STATUS: &str = "MiniDNA backend running 🚀";

/// Shared application state
pub struct AppState<L, R>
where
    L: CompletionProvider,
    R: ItemRepository,
{
    /// Submission pipeline
    pub submitter: Arc<ItemSubmitter<L, R>>,
}

impl<L, R> AppState<L, R>
where
    L: CompletionProvider,
    R: ItemRepository,
{
    /// Wrap a submitter for sharing across requests
    pub fn new(submitter: ItemSubmitter<L, R>) -> Self {
        Self {
            submitter: Arc::new(submitter),
        }
    }
}

impl<L, R> Clone for AppState<L, R>
where
    L: CompletionProvider,
    R: ItemRepository,
{
    fn clone(&self) -> Self {
        Self {
            submitter: Arc::clone(&self.submitter),
        }
    }
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthCheckResponse {
    /// Static status line
    pub status: String,
}

/// Error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
}

/// Application error type
#[derive(Debug)]
pub enum AppError {
    /// Submission pipeline error
    Submission(ExtractorError),
    /// Requested item does not exist
    NotFound(String),
    /// Request path or body is unusable
    BadRequest(String),
    /// Body was not a JSON submission (wrong content type, syntax, field types)
    InvalidBody(JsonRejection),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::Submission(e) if e.is_client_error() => {
                warn!(error = %e, "Submission rejected");
                (StatusCode::BAD_REQUEST, e.to_string())
            }
            AppError::Submission(e) => {
                error!(error = %e, "Submission failed");
                (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::InvalidBody(rejection) => {
                warn!(error = %rejection.body_text(), "Request body rejected");
                (rejection.status(), rejection.body_text())
            }
        };

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

impl From<ExtractorError> for AppError {
    fn from(e: ExtractorError) -> Self {
        AppError::Submission(e)
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection)
    }
}

/// POST /items - Submit a product URL
///
/// Returns the stored item with `isDuplicate` and `canonicalItemId`.
async fn submit_item<L, R>(
    State(state): State<AppState<L, R>>,
    body: Result<Json<SubmitRequest>, JsonRejection>,
) -> Result<Json<SubmitOutcome>, AppError>
where
    L: CompletionProvider + 'static,
    R: ItemRepository + 'static,
{
    let Json(request) = body?;
    let outcome = state.submitter.submit(request).await?;
    Ok(Json(outcome))
}

/// GET /items/:id - Fetch one stored item
async fn get_item<L, R>(
    State(state): State<AppState<L, R>>,
    Path(id): Path<String>,
) -> Result<Json<Item>, AppError>
where
    L: CompletionProvider + 'static,
    R: ItemRepository + 'static,
{
    let item_id = ItemId::from_string(&id).map_err(AppError::BadRequest)?;
    match state.submitter.get_item(item_id).await? {
        Some(item) => Ok(Json(item)),
        None => Err(AppError::NotFound(format!("Item not found: {}", item_id))),
    }
}

/// GET /health - Liveness probe
async fn health_check() -> Json<HealthCheckResponse> {
    Json(HealthCheckResponse {
        status: HEALTH_STATUS.to_string(),
    })
}

/// Create the axum router with all routes
pub fn create_router<L, R>(state: AppState<L, R>) -> AxumRouter
where
    L: CompletionProvider + 'static,
    R: ItemRepository + 'static,
{
    AxumRouter::new()
        .route("/health", get(health_check))
        .route("/items", post(submit_item::<L, R>))
        .route("/items/:id", get(get_item::<L, R>))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use minidna_extractor::SubmissionConfig;
    use minidna_llm::MockProvider;
    use minidna_store::MemoryStore;
    use tower::ServiceExt; // for oneshot

    fn create_test_state(response: &str) -> AppState<MockProvider, MemoryStore> {
        AppState::new(ItemSubmitter::new(
            MockProvider::new(response),
            MemoryStore::new(),
            SubmissionConfig::default(),
        ))
    }

    #[tokio::test]
    async fn test_health_check() {
        let app = create_router(create_test_state("{}"));

        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_submit_item() {
        let app = create_router(create_test_state(
            r#"{"supported": true, "brand": "Nike", "core_type": "Running Shoe"}"#,
        ));

        let request = Request::builder()
            .method("POST")
            .uri("/items")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"url": "https://nike.com/p"}"#))
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_item_malformed_id() {
        let app = create_router(create_test_state("{}"));

        let request = Request::builder()
            .uri("/items/not-a-uuid")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                AppError::Submission(ExtractorError::Validation("url is required".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Submission(ExtractorError::UnsupportedSubject("no".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                AppError::Submission(ExtractorError::EmptyResponse),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                AppError::Submission(ExtractorError::Repository("down".to_string())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::NotFound("gone".to_string()), StatusCode::NOT_FOUND),
        ];

        for (error, expected) in cases {
            assert_eq!(error.into_response().status(), expected);
        }
    }
}
