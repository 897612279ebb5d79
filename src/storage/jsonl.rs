//! Line-delimited JSON record store
//!
//! One serialized `CrawlRecord` per line, UTF-8, file opened in append mode.
//! One `append` call is one line write followed by a flush, so a crash loses
//! at most the record being written. Reads tolerate malformed lines: each
//! bad line is logged and skipped, and ingestion continues.

use crate::storage::{CrawlRecord, RecordSink, StorageResult};
use serde_json::Value;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::{Path, PathBuf};

/// Append-only JSONL record store
pub struct JsonlStore {
    path: PathBuf,
    file: File,
}

impl JsonlStore {
    /// Opens (or creates) the store at `path` in append mode
    pub fn open(path: &Path) -> StorageResult<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            file,
        })
    }

    /// The path this store writes to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for JsonlStore {
    fn append(&mut self, record: &CrawlRecord) -> StorageResult<()> {
        let line = serde_json::to_string(record)?;
        self.file.write_all(line.as_bytes())?;
        self.file.write_all(b"\n")?;
        self.file.flush()?;
        Ok(())
    }
}

/// Reads all records from a JSONL file
///
/// Malformed lines are skipped with a warning; the returned records preserve
/// file order. An unreadable file is an error, a partially-bad file is not.
pub fn read_records(path: &Path) -> StorageResult<Vec<CrawlRecord>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut records = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<CrawlRecord>(&line) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed record at {}:{}: {}",
                    path.display(),
                    line_num + 1,
                    e
                );
            }
        }
    }

    Ok(records)
}

/// Reads each line of a JSONL file as a raw JSON value
///
/// Used by the structured-payload splitter, which operates on record shapes
/// rather than typed records. Malformed lines are skipped with a warning.
pub fn read_raw_values(path: &Path) -> StorageResult<Vec<Value>> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    let mut values = Vec::new();
    for (line_num, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<Value>(&line) {
            Ok(value) => values.push(value),
            Err(e) => {
                tracing::warn!(
                    "Skipping malformed line at {}:{}: {}",
                    path.display(),
                    line_num + 1,
                    e
                );
            }
        }
    }

    Ok(values)
}
