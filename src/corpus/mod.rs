//! Corpus module: the document interface to the indexing collaborator
//!
//! Chunks become immutable `Document` values here, in emission order (page
//! order, then within-page chunk order). The `DocumentSink` trait is the
//! seam to the external embedding/indexing side: it accepts documents in
//! batches of whatever size the caller chooses.

use crate::splitter::Chunk;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Source metadata attached to every document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Normalized URL of the page the content came from
    pub source: String,
    /// Title of that page
    pub title: String,
}

/// The externally visible unit handed to the indexing collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub content: String,
    pub metadata: DocumentMetadata,
}

impl Document {
    pub fn new(
        content: impl Into<String>,
        source: impl Into<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            content: content.into(),
            metadata: DocumentMetadata {
                source: source.into(),
                title: title.into(),
            },
        }
    }
}

/// Wraps chunks as documents, preserving emission order
pub fn assemble(chunks: Vec<Chunk>) -> Vec<Document> {
    chunks
        .into_iter()
        .map(|chunk| Document::new(chunk.content, chunk.source_url, chunk.title))
        .collect()
}

/// Errors from document sinks
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("Failed to serialize document: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Interface to the external embedding/indexing collaborator
///
/// Implementations must accept batches of any size; this core makes no
/// batching promises beyond preserving document order across calls.
pub trait DocumentSink {
    fn accept(&mut self, batch: &[Document]) -> Result<(), SinkError>;
}

/// Writes documents as JSON lines, one per document
///
/// The file is truncated on creation: the document corpus is a derived
/// artifact, regenerated from the record store on each run.
pub struct JsonlDocumentSink {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlDocumentSink {
    pub fn create(path: &Path) -> Result<Self, SinkError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(path)?);
        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DocumentSink for JsonlDocumentSink {
    fn accept(&mut self, batch: &[Document]) -> Result<(), SinkError> {
        for document in batch {
            let line = serde_json::to_string(document)?;
            self.writer.write_all(line.as_bytes())?;
            self.writer.write_all(b"\n")?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
