//! Storage traits and error types

use crate::storage::CrawlRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Failed to serialize record: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Trait for record sink implementations
///
/// A sink receives exactly one call per successfully scraped page. A failed
/// append loses that page for corpus purposes but must leave the sink usable
/// for subsequent records; the crawler logs the failure and continues.
pub trait RecordSink {
    /// Appends one record to durable storage
    fn append(&mut self, record: &CrawlRecord) -> StorageResult<()>;
}
