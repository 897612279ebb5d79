//! Sitegrist main entry point
//!
//! Command-line interface for the sitegrist ingestion pipeline: crawl a
//! website into a JSONL record store, then split the records into
//! overlapping document chunks for downstream indexing.

use anyhow::Context;
use clap::Parser;
use sitegrist::config::{load_config_with_hash, Config};
use sitegrist::corpus::{assemble, DocumentSink, JsonlDocumentSink};
use sitegrist::output::print_report;
use sitegrist::splitter::Splitter;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Sitegrist: turn a website into a retrievable knowledge corpus
///
/// Sitegrist crawls a single host breadth-first within configurable depth,
/// time, and page budgets, persists one structured record per page, and
/// splits the accumulated text into overlapping chunks suitable for an
/// embedding/indexing pipeline.
#[derive(Parser, Debug)]
#[command(name = "sitegrist")]
#[command(version = "1.0.0")]
#[command(about = "Website-to-corpus ingestion pipeline", long_about = None)]
struct Cli {
    /// Path to TOML configuration file
    #[arg(value_name = "CONFIG")]
    config: PathBuf,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Validate config and show what would be crawled without crawling
    #[arg(long, conflicts_with_all = ["crawl_only", "split_only"])]
    dry_run: bool,

    /// Crawl and persist records, but skip the splitting stage
    #[arg(long, conflicts_with = "split_only")]
    crawl_only: bool,

    /// Skip the crawl and split an existing record file
    #[arg(long, conflicts_with = "crawl_only")]
    split_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    tracing::info!("Loading configuration from: {}", cli.config.display());
    let (config, config_hash) = load_config_with_hash(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    tracing::info!("Configuration loaded (hash: {})", config_hash);

    if cli.dry_run {
        handle_dry_run(&config);
        return Ok(());
    }

    if !cli.split_only {
        handle_crawl(&config).await?;
    }

    if !cli.crawl_only {
        handle_split(&config)?;
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("sitegrist=info,warn"),
            1 => EnvFilter::new("sitegrist=debug,info"),
            2 => EnvFilter::new("sitegrist=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles --dry-run: validates config and shows what would be crawled
fn handle_dry_run(config: &Config) {
    println!("=== Sitegrist Dry Run ===\n");

    println!("Crawler Configuration:");
    println!("  Base URL: {}", config.crawler.base_url);
    println!("  Max depth: {}", config.crawler.max_depth);
    match config.crawler.max_crawl_duration {
        Some(seconds) => println!("  Time limit: {} seconds", seconds),
        None => println!("  Time limit: unbounded"),
    }
    match config.crawler.max_pages_to_scrape {
        Some(pages) => println!("  Page limit: {} pages", pages),
        None => println!("  Page limit: unbounded"),
    }
    println!("  Politeness delay: {}s", config.crawler.politeness_delay);

    println!("\nFilter:");
    println!(
        "  Ignored keywords: {} entries",
        config.filter.ignored_keywords.len()
    );
    println!(
        "  Ignored extensions: {} entries",
        config.filter.ignored_extensions.len()
    );

    println!("\nOutput:");
    println!("  Records: {}", config.output.records_path);
    println!("  Documents: {}", config.output.documents_path);

    println!("\nChunking:");
    println!("  Max chunk size: {}", config.chunking.max_chunk_size);
    println!("  Chunk overlap: {}", config.chunking.chunk_overlap);

    println!("\n✓ Configuration is valid");
}

/// Handles the crawl stage
async fn handle_crawl(config: &Config) -> anyhow::Result<()> {
    // Records accumulate by appending; a new crawl starts from a clean file
    let records_path = Path::new(&config.output.records_path);
    if records_path.exists() {
        tracing::info!("Removing previous record file {}", records_path.display());
        std::fs::remove_file(records_path)
            .with_context(|| format!("failed to remove {}", records_path.display()))?;
    }

    let report = sitegrist::crawler::crawl(config.clone()).await?;
    print_report(&report);
    Ok(())
}

/// Handles the splitting stage: records -> chunks -> documents
fn handle_split(config: &Config) -> anyhow::Result<()> {
    let records_path = Path::new(&config.output.records_path);
    if !records_path.exists() {
        println!(
            "No record file at {}; nothing to split",
            records_path.display()
        );
        return Ok(());
    }

    let splitter = Splitter::new(&config.chunking);
    let chunks = splitter
        .split_records_file(records_path)
        .with_context(|| format!("failed to split {}", records_path.display()))?;
    let documents = assemble(chunks);

    if documents.is_empty() {
        println!("No documents produced; corpus is empty");
        return Ok(());
    }

    let documents_path = Path::new(&config.output.documents_path);
    let mut sink = JsonlDocumentSink::create(documents_path)?;
    sink.accept(&documents)?;

    println!(
        "✓ {} documents written to {}",
        documents.len(),
        documents_path.display()
    );
    Ok(())
}
