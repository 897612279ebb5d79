//! Storage module for persisting crawl records
//!
//! This module handles the durable side of a crawl:
//! - The `CrawlRecord`/`Section` value types written once per scraped page
//! - The `RecordSink` trait and its JSONL implementation (one UTF-8 JSON
//!   object per line, file opened in append mode)
//! - Reading records back for the splitter stage, skipping malformed lines

mod jsonl;
mod records;
mod traits;

pub use jsonl::{read_raw_values, read_records, JsonlStore};
pub use records::{CrawlRecord, Section};
pub use traits::{RecordSink, StorageError, StorageResult};
