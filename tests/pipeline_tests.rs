//! Integration tests for the splitting stage
//!
//! These tests exercise the record-file-to-documents pipeline end-to-end:
//! JSONL records in, ordered overlapping `Document`s out.

use sitegrist::config::ChunkingConfig;
use sitegrist::corpus::{assemble, Document, DocumentSink, JsonlDocumentSink};
use sitegrist::splitter::Splitter;
use sitegrist::storage::{CrawlRecord, JsonlStore, RecordSink, Section};
use tempfile::TempDir;

fn write_records(dir: &TempDir, records: &[CrawlRecord]) -> std::path::PathBuf {
    let path = dir.path().join("records.jsonl");
    let mut store = JsonlStore::open(&path).unwrap();
    for record in records {
        store.append(record).unwrap();
    }
    path
}

fn chunking(max: usize, overlap: usize) -> ChunkingConfig {
    ChunkingConfig {
        max_chunk_size: max,
        chunk_overlap: overlap,
    }
}

#[test]
fn test_records_become_documents_in_order() {
    let dir = TempDir::new().unwrap();
    let path = write_records(
        &dir,
        &[
            CrawlRecord::new(
                "https://example.com/a",
                0,
                "Page A",
                vec![Section::new("S", "alpha text")],
            ),
            CrawlRecord::new(
                "https://example.com/b",
                1,
                "Page B",
                vec![Section::new("S", "beta text")],
            ),
        ],
    );

    let splitter = Splitter::new(&chunking(2000, 200));
    let documents = assemble(splitter.split_records_file(&path).unwrap());

    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].content, "alpha text");
    assert_eq!(documents[0].metadata.source, "https://example.com/a");
    assert_eq!(documents[0].metadata.title, "Page A");
    assert_eq!(documents[1].metadata.source, "https://example.com/b");
}

#[test]
fn test_long_page_fans_out_into_overlapping_documents() {
    let dir = TempDir::new().unwrap();
    let long_text = "lorem ipsum dolor sit amet ".repeat(40); // ~1080 chars
    let path = write_records(
        &dir,
        &[CrawlRecord::new(
            "https://example.com/long",
            0,
            "Long",
            vec![Section::new("Body", long_text)],
        )],
    );

    let splitter = Splitter::new(&chunking(300, 50));
    let documents = assemble(splitter.split_records_file(&path).unwrap());

    assert!(documents.len() > 1);
    for document in &documents {
        assert!(document.content.chars().count() <= 300);
        assert_eq!(document.metadata.source, "https://example.com/long");
        assert_eq!(document.metadata.title, "Long");
    }

    // Consecutive documents of the same page share at least the overlap
    for pair in documents.windows(2) {
        let a: Vec<char> = pair[0].content.chars().collect();
        let b: Vec<char> = pair[1].content.chars().collect();
        let shared = (1..=a.len().min(b.len()))
            .filter(|&n| a[a.len() - n..] == b[..n])
            .max()
            .unwrap_or(0);
        assert!(shared >= 50, "expected >= 50 shared characters, got {}", shared);
    }
}

#[test]
fn test_malformed_lines_are_skipped_and_processing_continues() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("records.jsonl");

    let good = serde_json::to_string(&CrawlRecord::new(
        "https://example.com/good",
        0,
        "Good",
        vec![Section::new("S", "valid content")],
    ))
    .unwrap();

    std::fs::write(
        &path,
        format!(
            "{}\n{{not json at all\n{}\n",
            good,
            good.replace("/good", "/also-good")
        ),
    )
    .unwrap();

    let splitter = Splitter::new(&chunking(2000, 200));
    let documents = assemble(splitter.split_records_file(&path).unwrap());

    // The bad line is dropped; both valid lines survive
    assert_eq!(documents.len(), 2);
    assert_eq!(documents[0].metadata.source, "https://example.com/good");
    assert_eq!(documents[1].metadata.source, "https://example.com/also-good");
}

#[test]
fn test_title_only_records_produce_no_documents() {
    let dir = TempDir::new().unwrap();
    let path = write_records(
        &dir,
        &[
            CrawlRecord::new("https://example.com/empty", 0, "Only Title", vec![]),
            CrawlRecord::new(
                "https://example.com/full",
                0,
                "Full",
                vec![Section::new("S", "has text")],
            ),
        ],
    );

    let splitter = Splitter::new(&chunking(2000, 200));
    let documents = assemble(splitter.split_records_file(&path).unwrap());

    assert_eq!(documents.len(), 1);
    assert_eq!(documents[0].metadata.source, "https://example.com/full");
}

#[test]
fn test_documents_round_trip_through_the_sink() {
    let dir = TempDir::new().unwrap();
    let records_path = write_records(
        &dir,
        &[CrawlRecord::new(
            "https://example.com/p",
            0,
            "P",
            vec![
                Section::new("One", "first section"),
                Section::new("Two", "second section"),
            ],
        )],
    );

    let splitter = Splitter::new(&chunking(2000, 200));
    let documents = assemble(splitter.split_records_file(&records_path).unwrap());

    let documents_path = dir.path().join("documents.jsonl");
    let mut sink = JsonlDocumentSink::create(&documents_path).unwrap();
    sink.accept(&documents).unwrap();
    drop(sink);

    let content = std::fs::read_to_string(&documents_path).unwrap();
    let parsed: Vec<Document> = content
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect();

    assert_eq!(parsed, documents);
    assert_eq!(parsed[0].content, "first section\nsecond section");
}
