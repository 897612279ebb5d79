//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching with error classification
//! - Section and link extraction from HTML
//! - Scope and blocklist filtering
//! - Frontier scheduling and budget enforcement
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod filter;
mod scheduler;

pub use coordinator::{crawl, Coordinator};
pub use extractor::{extract_links, extract_page, ExtractedPage};
pub use fetcher::{build_http_client, fetch_page, FetchError, FetchOutcome};
pub use filter::LinkFilter;
pub use scheduler::{CrawlScheduler, FrontierEntry, NextStep, StopReason};
