//! Splitter module: persisted records → bounded, overlapping chunks
//!
//! This is the second pass of the pipeline. It runs after (and independently
//! of) the crawl, reading the JSONL record store and producing the chunk
//! sequence that the document assembler wraps for the indexing collaborator.

mod json;
mod text;

pub use json::JsonSplitter;
pub use text::TextSplitter;

use crate::config::ChunkingConfig;
use crate::storage::{self, CrawlRecord, StorageResult};
use serde_json::Value;
use std::path::Path;

/// A bounded slice of one page's text, tagged with its origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    pub content: String,
    pub source_url: String,
    pub title: String,
}

/// Splits crawl records into chunks
pub struct Splitter {
    text_splitter: TextSplitter,
    json_splitter: JsonSplitter,
}

impl Splitter {
    pub fn new(config: &ChunkingConfig) -> Self {
        Self {
            text_splitter: TextSplitter::new(config),
            json_splitter: JsonSplitter::new(config.max_chunk_size),
        }
    }

    /// Chunks one record's page text
    ///
    /// Section texts are joined with newlines and split; every chunk carries
    /// the record's URL and title. Records with no text produce no chunks.
    pub fn chunk_record(&self, record: &CrawlRecord) -> Vec<Chunk> {
        let page_text = record.page_text();
        if page_text.is_empty() {
            tracing::debug!("No text content in record for {}", record.url);
            return Vec::new();
        }

        self.text_splitter
            .split(&page_text)
            .into_iter()
            .map(|content| Chunk {
                content,
                source_url: record.url.clone(),
                title: record.title.clone(),
            })
            .collect()
    }

    /// Reads a JSONL record file and chunks every valid record
    ///
    /// Malformed lines are skipped (with a warning) by the reader; chunk
    /// order is page order within the file, then chunk order within a page.
    pub fn split_records_file(&self, path: &Path) -> StorageResult<Vec<Chunk>> {
        let records = storage::read_records(path)?;

        let mut chunks = Vec::new();
        for (idx, record) in records.iter().enumerate() {
            let record_chunks = self.chunk_record(record);
            tracing::debug!(
                "Record {} ({}): {} chunks",
                idx + 1,
                record.url,
                record_chunks.len()
            );
            chunks.extend(record_chunks);
        }

        tracing::info!("Split {} records into {} chunks", records.len(), chunks.len());
        Ok(chunks)
    }

    /// Reads a JSONL file of arbitrary JSON payloads and subdivides each at
    /// its structural boundaries
    ///
    /// This is the non-prose path: record shapes are preserved instead of
    /// flattened to text.
    pub fn split_structured_file(&self, path: &Path) -> StorageResult<Vec<Value>> {
        let values = storage::read_raw_values(path)?;

        let mut fragments = Vec::new();
        for value in &values {
            fragments.extend(self.json_splitter.split(value));
        }

        Ok(fragments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Section;

    fn splitter() -> Splitter {
        Splitter::new(&ChunkingConfig {
            max_chunk_size: 100,
            chunk_overlap: 20,
        })
    }

    fn record_with_text(url: &str, text: String) -> CrawlRecord {
        CrawlRecord::new(url, 0, "A Title", vec![Section::new("S", text)])
    }

    #[test]
    fn test_chunk_record_tags_chunks_with_source() {
        let record = record_with_text("https://example.com/p", "small text".to_string());
        let chunks = splitter().chunk_record(&record);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].source_url, "https://example.com/p");
        assert_eq!(chunks[0].title, "A Title");
        assert_eq!(chunks[0].content, "small text");
    }

    #[test]
    fn test_chunk_record_joins_sections_with_newlines() {
        let record = CrawlRecord::new(
            "https://example.com/p",
            0,
            "T",
            vec![Section::new("A", "one"), Section::new("B", "two")],
        );
        let chunks = splitter().chunk_record(&record);
        assert_eq!(chunks[0].content, "one\ntwo");
    }

    #[test]
    fn test_chunk_record_splits_long_pages() {
        let record = record_with_text("https://example.com/p", "word ".repeat(100));
        let chunks = splitter().chunk_record(&record);
        assert!(chunks.len() > 1);
        assert!(chunks.iter().all(|c| c.content.chars().count() <= 100));
        assert!(chunks.iter().all(|c| c.source_url == "https://example.com/p"));
    }

    #[test]
    fn test_record_without_text_yields_no_chunks() {
        let record = CrawlRecord::new("https://example.com/p", 0, "Only a title", vec![]);
        assert!(splitter().chunk_record(&record).is_empty());
    }

    #[test]
    fn test_split_structured_file_subdivides_each_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("payloads.jsonl");
        let big_field = "x".repeat(80);
        std::fs::write(
            &path,
            format!(
                "{{\"a\":\"{}\",\"b\":\"{}\"}}\nnot json\n{{\"c\":1}}\n",
                big_field, big_field
            ),
        )
        .unwrap();

        let fragments = splitter().split_structured_file(&path).unwrap();
        // the oversize object splits in two, the bad line is skipped,
        // the small object passes through whole
        assert_eq!(fragments.len(), 3);
        assert!(fragments
            .iter()
            .all(|f| serde_json::to_string(f).unwrap().len() <= 100));
    }
}
