//! Sitegrist: turn a website into a retrievable knowledge corpus
//!
//! This crate implements the ingestion path for a website knowledge base:
//! a depth- and budget-bounded crawler that stays on a single host, extracts
//! titled text sections from noisy markup, persists one JSONL record per
//! page, and splits the accumulated text into overlapping chunks ready for
//! downstream indexing.

pub mod config;
pub mod corpus;
pub mod crawler;
pub mod output;
pub mod splitter;
pub mod storage;
pub mod url;

use thiserror::Error;

/// Main error type for sitegrist operations
#[derive(Debug, Error)]
pub enum SitegristError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Storage error: {0}")]
    Storage(#[from] storage::StorageError),

    #[error("URL error: {0}")]
    Url(#[from] UrlError),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Document output error: {0}")]
    Corpus(#[from] corpus::SinkError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// URL-specific errors
#[derive(Debug, Error)]
pub enum UrlError {
    #[error("Failed to parse URL: {0}")]
    Parse(String),

    #[error("Invalid URL scheme: {0}")]
    InvalidScheme(String),

    #[error("Missing host in URL")]
    MissingHost,
}

/// Result type alias for sitegrist operations
pub type Result<T> = std::result::Result<T, SitegristError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Result type alias for URL operations
pub type UrlResult<T> = std::result::Result<T, UrlError>;

// Re-export commonly used types
pub use config::Config;
pub use corpus::{Document, DocumentMetadata};
pub use storage::{CrawlRecord, Section};
pub use url::{extract_host, normalize_url};
