//! Crawler coordinator - main crawl orchestration logic
//!
//! One iteration of the loop: check for an interrupt, ask the scheduler for
//! the next URL, fetch it, extract sections, persist the record, offer the
//! page's links back to the scheduler, then observe the politeness delay.
//! Every fault inside an iteration is recovered locally; the only exits are
//! the scheduler's stop reasons and the interrupt flag, and the finalize
//! path runs on all of them.

use crate::config::Config;
use crate::crawler::extractor::{extract_links, extract_page};
use crate::crawler::fetcher::{build_http_client, fetch_page, FetchOutcome};
use crate::crawler::filter::LinkFilter;
use crate::crawler::scheduler::{CrawlScheduler, FrontierEntry, NextStep, StopReason};
use crate::output::CrawlReport;
use crate::storage::{CrawlRecord, JsonlStore, RecordSink};
use crate::url::{extract_host, normalize_url};
use crate::{Result, UrlError};
use chrono::Utc;
use reqwest::Client;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Main crawler coordinator structure
pub struct Coordinator {
    base_url: String,
    scheduler: CrawlScheduler,
    client: Client,
    store: JsonlStore,
    politeness_delay: Duration,
    interrupted: Arc<AtomicBool>,
}

impl Coordinator {
    /// Creates a new coordinator instance
    ///
    /// Normalizes the seed URL, derives the crawl scope from its host, and
    /// opens the record store in append mode.
    pub fn new(config: Config) -> Result<Self> {
        let seed = normalize_url(&config.crawler.base_url)?;
        let base_host = extract_host(&seed).ok_or(UrlError::MissingHost)?;

        let filter = LinkFilter::new(base_host, &config.filter);
        let scheduler = CrawlScheduler::new(&config.crawler, filter, &seed);
        let client = build_http_client(&config.crawler.user_agent)?;
        let store = JsonlStore::open(Path::new(&config.output.records_path))?;

        Ok(Self {
            base_url: seed.to_string(),
            scheduler,
            client,
            store,
            politeness_delay: Duration::from_secs_f64(config.crawler.politeness_delay),
            interrupted: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Returns the flag an external signal handler sets to interrupt the
    /// crawl; it is observed once per loop iteration
    pub fn interrupt_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.interrupted)
    }

    /// Runs the crawl loop to completion and returns the final report
    ///
    /// Never fails: fetch, extraction, and persist faults each cost one page
    /// at most. Whatever was persisted before a stop or interrupt stays on
    /// disk.
    pub async fn run(&mut self) -> CrawlReport {
        let started_at = Utc::now();
        tracing::info!("Starting crawl for {}", self.base_url);

        let stop_reason = loop {
            if self.interrupted.load(Ordering::SeqCst) {
                tracing::info!("Crawl interrupted");
                break StopReason::Interrupted;
            }

            let entry = match self.scheduler.next() {
                NextStep::Stop(reason) => break reason,
                NextStep::Fetch(entry) => entry,
            };

            tracing::info!(
                "Processing (depth: {}, scraped: {}): {}",
                entry.depth,
                self.scheduler.pages_scraped(),
                entry.url
            );

            match fetch_page(&self.client, &entry.url).await {
                FetchOutcome::Html { body, .. } => {
                    self.process_page(&entry, &body);
                    tokio::time::sleep(self.politeness_delay).await;
                }
                FetchOutcome::NonHtml { content_type } => {
                    tracing::info!(
                        "Skipping non-HTML content at {} (Content-Type: {})",
                        entry.url,
                        content_type
                    );
                }
                FetchOutcome::Failed(error) => {
                    tracing::warn!("{}", error);
                }
            }
        };

        let report = CrawlReport {
            base_url: self.base_url.clone(),
            stop_reason,
            pages_scraped: self.scheduler.pages_scraped(),
            urls_visited: self.scheduler.visited_count(),
            elapsed: self.scheduler.elapsed(),
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            "Crawl finished for {}: {} pages scraped, {} URLs visited in {:.2}s ({})",
            report.base_url,
            report.pages_scraped,
            report.urls_visited,
            report.elapsed.as_secs_f64(),
            report.stop_reason
        );

        report
    }

    /// Extracts, persists, and expands one successfully fetched page
    fn process_page(&mut self, entry: &FrontierEntry, body: &str) {
        let page = extract_page(body);
        let record = CrawlRecord::new(entry.url.clone(), entry.depth, page.title, page.sections);

        if record.has_content() {
            if let Err(e) = self.store.append(&record) {
                // The page is lost for corpus purposes; the crawl goes on
                tracing::error!("Failed to persist record for {}: {}", entry.url, e);
            }
            self.scheduler.record_scraped();
            tracing::info!("Scraped and saved: {}", entry.url);
        } else {
            tracing::info!("No meaningful text content extracted from {}", entry.url);
        }

        if self.scheduler.should_expand(entry.depth) {
            let page_url = match Url::parse(&entry.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::warn!("Cannot resolve links against {}: {}", entry.url, e);
                    return;
                }
            };

            let mut accepted = 0;
            for link in extract_links(body, &page_url) {
                if self.scheduler.offer(&link, entry.depth + 1) {
                    accepted += 1;
                }
            }
            tracing::debug!(
                "Enqueued {} links from {} ({} now in frontier)",
                accepted,
                entry.url,
                self.scheduler.frontier_size()
            );
        }
    }
}

/// Runs a complete crawl with Ctrl-C handling
///
/// The interrupt is caught exactly once: the flag flips, the loop notices it
/// at the top of the next iteration, and the finalize path produces the
/// report as usual.
pub async fn crawl(config: Config) -> Result<CrawlReport> {
    let mut coordinator = Coordinator::new(config)?;

    let flag = coordinator.interrupt_flag();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current page");
            flag.store(true, Ordering::SeqCst);
        }
    });

    Ok(coordinator.run().await)
}
