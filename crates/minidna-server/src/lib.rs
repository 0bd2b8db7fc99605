//! MiniDNA Server
//!
//! HTTP front end for the product catalogue: accepts product URLs, runs them
//! through the extraction pipeline and returns the stored item with its
//! duplicate metadata.

#![warn(missing_docs)]

pub mod config;
pub mod handlers;

use config::ServerConfig;
use handlers::{create_router, AppState};
use minidna_extractor::ItemSubmitter;
use minidna_llm::GroqProvider;
use minidna_store::SqliteStore;
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Server error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Item store could not be opened
    #[error("Store error: {0}")]
    Store(#[from] minidna_store::StoreError),

    /// Completion provider could not be built
    #[error("LLM error: {0}")]
    Llm(#[from] minidna_llm::LlmError),

    /// Server binding error
    #[error("Failed to bind server: {0}")]
    Bind(#[from] std::io::Error),

    /// Server error
    #[error("Server error: {0}")]
    Server(String),
}

/// Install the global tracing subscriber
///
/// Honors `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Start the HTTP server
///
/// Validates configuration, opens the item store, builds the completion
/// provider and serves until the listener fails.
pub async fn start_server(config: ServerConfig) -> Result<(), ServerError> {
    config.validate()?;

    info!("Starting MiniDNA server");
    info!("Bind address: {}", config.bind_addr());
    info!("Database: {}", config.database_path);
    info!("Model: {}", config.llm.model);

    let store = SqliteStore::new(&config.database_path)?;
    let llm = GroqProvider::new(config.llm.clone())?;
    let submitter = ItemSubmitter::new(llm, store, config.submission.clone());

    let app = create_router(AppState::new(submitter));

    let listener = TcpListener::bind(&config.bind_addr()).await?;
    info!("Server listening on {}", config.bind_addr());

    axum::serve(listener, app)
        .await
        .map_err(|e| ServerError::Server(e.to_string()))?;

    Ok(())
}
