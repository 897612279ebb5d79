//! Output module for crawl reporting
//!
//! The finalize step of every crawl, normal or interrupted, produces a
//! `CrawlReport`. Printing is separated from the data so library callers can
//! consume the report programmatically.

use crate::crawler::StopReason;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Summary of one finished crawl
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// The normalized seed URL
    pub base_url: String,

    /// Why the crawl stopped
    pub stop_reason: StopReason,

    /// Pages that yielded content and were counted against the page budget
    pub pages_scraped: u64,

    /// URLs visited or skipped (size of the visited set)
    pub urls_visited: usize,

    /// Wall-clock crawl duration
    pub elapsed: Duration,

    /// When the crawl started
    pub started_at: DateTime<Utc>,

    /// When the finalize step ran
    pub finished_at: DateTime<Utc>,
}

/// Prints a report to stdout in a human-readable form
pub fn print_report(report: &CrawlReport) {
    println!("\nCrawl finished for {}", report.base_url);
    println!("  Stop reason: {}", report.stop_reason);
    println!("  Total pages scraped: {}", report.pages_scraped);
    println!("  Total URLs visited: {}", report.urls_visited);
    println!(
        "  Total time taken: {:.2} seconds",
        report.elapsed.as_secs_f64()
    );
    println!(
        "  Started: {} / Finished: {}",
        report.started_at.format("%Y-%m-%d %H:%M:%S UTC"),
        report.finished_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_fields() {
        let report = CrawlReport {
            base_url: "https://example.com/".to_string(),
            stop_reason: StopReason::FrontierExhausted,
            pages_scraped: 12,
            urls_visited: 30,
            elapsed: Duration::from_secs(5),
            started_at: Utc::now(),
            finished_at: Utc::now(),
        };

        assert_eq!(report.pages_scraped, 12);
        assert_eq!(report.stop_reason.to_string(), "frontier_exhausted");
    }
}
