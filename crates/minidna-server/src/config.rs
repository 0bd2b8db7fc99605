//! Configuration file parsing for the server.
//!
//! Settings come from an optional TOML file; `PORT` and `GROQ_API_KEY` from
//! the environment override it. The result is built once at startup and
//! passed down explicitly.

use minidna_extractor::SubmissionConfig;
use minidna_llm::GroqConfig;
use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// Missing required field
    #[error("Missing required configuration field: {0}")]
    MissingField(String),

    /// Field present but unusable
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
}

/// Server configuration loaded from TOML
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (default: 8080)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// SQLite database file (":memory:" for a throwaway catalogue)
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Completion service settings
    #[serde(default)]
    pub llm: GroqConfig,

    /// Duplicate-matching policy
    #[serde(default)]
    pub submission: SubmissionConfig,
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

/// Default port: 8080
fn default_bind_port() -> u16 {
    8080
}

fn default_database_path() -> String {
    "minidna.db".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            database_path: default_database_path(),
            llm: GroqConfig::default(),
            submission: SubmissionConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Apply overrides from the process environment
    pub fn with_process_env(self) -> Result<Self, ConfigError> {
        self.with_env_overrides(|name| std::env::var(name).ok())
    }

    /// Apply `PORT` and `GROQ_API_KEY` overrides from the given lookup
    pub fn with_env_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT") {
            self.bind_port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::InvalidValue(format!("PORT={}", port)))?;
        }
        if let Some(api_key) = lookup("GROQ_API_KEY").filter(|key| !key.trim().is_empty()) {
            self.llm.api_key = api_key;
        }
        Ok(self)
    }

    /// Check the configuration is complete enough to serve requests
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.llm.api_key.trim().is_empty() {
            return Err(ConfigError::MissingField(
                "llm.api_key (or GROQ_API_KEY)".to_string(),
            ));
        }
        self.submission
            .validate()
            .map_err(ConfigError::InvalidValue)?;
        Ok(())
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
