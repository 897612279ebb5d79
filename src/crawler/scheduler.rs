//! Scheduler owning the crawl frontier, visited set, and budgets
//!
//! The scheduler is the crawl's state machine, kept free of I/O so it can be
//! exercised directly in tests. The coordinator asks it what to do next;
//! fetching, extraction, and persistence happen elsewhere.
//!
//! Budget checks run once per `next()` call, in a fixed priority order:
//! duration, then page count, then frontier exhaustion. Skips (already
//! visited, past max depth, blocklisted) consume no budget.

use crate::config::CrawlerConfig;
use crate::crawler::LinkFilter;
use crate::url::normalize_url;
use std::collections::{HashSet, VecDeque};
use std::fmt;
use std::time::{Duration, Instant};
use url::Url;

/// A not-yet-processed URL with its discovery depth
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontierEntry {
    /// Normalized URL
    pub url: String,
    /// Link distance from the seed
    pub depth: u32,
}

/// Why a crawl stopped; always a normal termination, never an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    DurationExceeded,
    PageLimitReached,
    FrontierExhausted,
    Interrupted,
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::DurationExceeded => "duration_exceeded",
            Self::PageLimitReached => "page_limit_reached",
            Self::FrontierExhausted => "frontier_exhausted",
            Self::Interrupted => "interrupted",
        };
        f.write_str(label)
    }
}

/// What the coordinator should do next
#[derive(Debug, PartialEq, Eq)]
pub enum NextStep {
    /// Fetch this entry; it has been marked visited
    Fetch(FrontierEntry),
    /// Stop the crawl
    Stop(StopReason),
}

/// Breadth-first crawl scheduler
///
/// The frontier is FIFO: insertion order is discovery order. The visited set
/// holds normalized URLs and only ever grows; no URL is handed out for
/// fetching twice. A parallel queued set indexes frontier membership so
/// `offer` can reject duplicates without scanning the queue.
pub struct CrawlScheduler {
    frontier: VecDeque<FrontierEntry>,
    visited: HashSet<String>,
    queued: HashSet<String>,
    filter: LinkFilter,
    max_depth: u32,
    max_duration: Option<Duration>,
    max_pages: Option<u64>,
    started_at: Instant,
    pages_scraped: u64,
}

impl CrawlScheduler {
    /// Creates a scheduler seeded with the (already normalized) base URL
    pub fn new(config: &CrawlerConfig, filter: LinkFilter, seed: &Url) -> Self {
        let seed = seed.to_string();
        let mut frontier = VecDeque::new();
        let mut queued = HashSet::new();
        queued.insert(seed.clone());
        frontier.push_back(FrontierEntry { url: seed, depth: 0 });

        Self {
            frontier,
            visited: HashSet::new(),
            queued,
            filter,
            max_depth: config.max_depth,
            max_duration: config.max_crawl_duration.map(Duration::from_secs),
            max_pages: config.max_pages_to_scrape,
            started_at: Instant::now(),
            pages_scraped: 0,
        }
    }

    /// Advances the crawl state machine by one decision
    ///
    /// Loops over skip-only entries internally, so the returned value is
    /// always either a fetchable entry or a stop.
    pub fn next(&mut self) -> NextStep {
        loop {
            if let Some(max) = self.max_duration {
                if self.started_at.elapsed() >= max {
                    return NextStep::Stop(StopReason::DurationExceeded);
                }
            }

            if let Some(max) = self.max_pages {
                if self.pages_scraped >= max {
                    return NextStep::Stop(StopReason::PageLimitReached);
                }
            }

            let Some(entry) = self.frontier.pop_front() else {
                return NextStep::Stop(StopReason::FrontierExhausted);
            };
            self.queued.remove(&entry.url);

            let url = match normalize_url(&entry.url) {
                Ok(url) => url,
                Err(e) => {
                    tracing::debug!("Dropping unparseable frontier entry {}: {}", entry.url, e);
                    continue;
                }
            };
            let key = url.to_string();

            if self.visited.contains(&key) {
                continue;
            }

            if entry.depth > self.max_depth {
                tracing::debug!(
                    "Skipping {}: exceeds max depth ({} > {})",
                    key,
                    entry.depth,
                    self.max_depth
                );
                self.visited.insert(key);
                continue;
            }

            if self.filter.should_ignore(&url) {
                self.visited.insert(key);
                continue;
            }

            self.visited.insert(key.clone());
            return NextStep::Fetch(FrontierEntry {
                url: key,
                depth: entry.depth,
            });
        }
    }

    /// Offers a discovered link for future crawling
    ///
    /// The link is normalized, then enqueued only if it is in scope, not
    /// blocklisted, not visited, and not already queued. Returns whether the
    /// link was accepted.
    pub fn offer(&mut self, link: &Url, depth: u32) -> bool {
        let normalized = match normalize_url(link.as_str()) {
            Ok(url) => url,
            Err(_) => return false,
        };

        if !self.filter.is_in_scope(&normalized) {
            return false;
        }
        if self.filter.should_ignore(&normalized) {
            return false;
        }

        let key = normalized.to_string();
        if self.visited.contains(&key) || self.queued.contains(&key) {
            return false;
        }

        self.queued.insert(key.clone());
        self.frontier.push_back(FrontierEntry { url: key, depth });
        true
    }

    /// Whether links found at `depth` should be followed
    pub fn should_expand(&self, depth: u32) -> bool {
        depth < self.max_depth
    }

    /// Records one successfully scraped page against the page budget
    pub fn record_scraped(&mut self) {
        self.pages_scraped += 1;
    }

    /// Pages scraped so far
    pub fn pages_scraped(&self) -> u64 {
        self.pages_scraped
    }

    /// Number of URLs visited (or skipped) so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    /// Number of entries waiting in the frontier
    pub fn frontier_size(&self) -> usize {
        self.frontier.len()
    }

    /// Time since the crawl started
    pub fn elapsed(&self) -> Duration {
        self.started_at.elapsed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FilterConfig;

    fn test_config(base: &str) -> CrawlerConfig {
        CrawlerConfig::new(base)
    }

    fn scheduler_for(base: &str) -> CrawlScheduler {
        let seed = normalize_url(base).unwrap();
        let filter = LinkFilter::new(seed.host_str().unwrap(), &FilterConfig::default());
        CrawlScheduler::new(&test_config(base), filter, &seed)
    }

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_seed_is_first_fetch() {
        let mut scheduler = scheduler_for("https://example.com");
        match scheduler.next() {
            NextStep::Fetch(entry) => {
                assert_eq!(entry.url, "https://example.com/");
                assert_eq!(entry.depth, 0);
            }
            other => panic!("expected Fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_frontier_is_fifo() {
        let mut scheduler = scheduler_for("https://example.com");
        let _ = scheduler.next();
        assert!(scheduler.offer(&url("https://example.com/a"), 1));
        assert!(scheduler.offer(&url("https://example.com/b"), 1));

        match scheduler.next() {
            NextStep::Fetch(entry) => assert_eq!(entry.url, "https://example.com/a"),
            other => panic!("expected Fetch, got {:?}", other),
        }
        match scheduler.next() {
            NextStep::Fetch(entry) => assert_eq!(entry.url, "https://example.com/b"),
            other => panic!("expected Fetch, got {:?}", other),
        }
    }

    #[test]
    fn test_no_url_is_fetched_twice() {
        let mut scheduler = scheduler_for("https://example.com");
        let _ = scheduler.next();
        // second copy of the seed is refused at offer time
        assert!(!scheduler.offer(&url("https://example.com/"), 1));

        assert!(scheduler.offer(&url("https://example.com/a"), 1));
        let _ = scheduler.next();
        // already visited now, refused again
        assert!(!scheduler.offer(&url("https://example.com/a"), 2));
        assert_eq!(scheduler.next(), NextStep::Stop(StopReason::FrontierExhausted));
    }

    #[test]
    fn test_offer_dedups_normalized_forms() {
        let mut scheduler = scheduler_for("https://example.com");
        assert!(scheduler.offer(&url("https://example.com/page/"), 1));
        // same page after normalization
        assert!(!scheduler.offer(&url("https://example.com/page#intro"), 1));
        assert_eq!(scheduler.frontier_size(), 2); // seed + /page
    }

    #[test]
    fn test_offer_rejects_out_of_scope() {
        let mut scheduler = scheduler_for("https://example.com");
        assert!(!scheduler.offer(&url("https://other.com/page"), 1));
        assert!(!scheduler.offer(&url("https://sub.example.com/page"), 1));
    }

    #[test]
    fn test_mailto_is_never_enqueued() {
        let mut scheduler = scheduler_for("https://example.com");
        assert!(!scheduler.offer(&url("mailto:admin@example.com"), 1));
        // keyword also fires when the host matches the base domain
        assert!(!scheduler.offer(&url("https://example.com/contact?mailto:x"), 1));
    }

    #[test]
    fn test_blocklisted_frontier_entry_is_skipped_and_marked_visited() {
        let mut scheduler = scheduler_for("https://example.com/login");
        // the seed itself hits the keyword blocklist at dequeue time
        assert_eq!(scheduler.next(), NextStep::Stop(StopReason::FrontierExhausted));
        assert_eq!(scheduler.visited_count(), 1);
        assert_eq!(scheduler.pages_scraped(), 0);
    }

    #[test]
    fn test_depth_beyond_max_is_skipped_not_fetched() {
        let seed = normalize_url("https://example.com").unwrap();
        let filter = LinkFilter::new("example.com", &FilterConfig::default());
        let mut config = test_config("https://example.com");
        config.max_depth = 1;
        let mut scheduler = CrawlScheduler::new(&config, filter, &seed);

        let _ = scheduler.next();
        // frontier entries deeper than max_depth are marked visited, never fetched
        scheduler.frontier.push_back(FrontierEntry {
            url: "https://example.com/too-deep".to_string(),
            depth: 2,
        });
        assert_eq!(scheduler.next(), NextStep::Stop(StopReason::FrontierExhausted));
        assert!(scheduler.visited.contains("https://example.com/too-deep"));
    }

    #[test]
    fn test_max_depth_zero_never_expands() {
        let seed = normalize_url("https://example.com").unwrap();
        let filter = LinkFilter::new("example.com", &FilterConfig::default());
        let mut config = test_config("https://example.com");
        config.max_depth = 0;
        let scheduler = CrawlScheduler::new(&config, filter, &seed);

        assert!(!scheduler.should_expand(0));
    }

    #[test]
    fn test_page_limit_stops_the_crawl() {
        let seed = normalize_url("https://example.com").unwrap();
        let filter = LinkFilter::new("example.com", &FilterConfig::default());
        let mut config = test_config("https://example.com");
        config.max_pages_to_scrape = Some(1);
        let mut scheduler = CrawlScheduler::new(&config, filter, &seed);

        let _ = scheduler.next();
        scheduler.record_scraped();
        scheduler.offer(&url("https://example.com/next"), 1);

        assert_eq!(scheduler.next(), NextStep::Stop(StopReason::PageLimitReached));
    }

    #[test]
    fn test_duration_budget_stops_the_crawl() {
        let seed = normalize_url("https://example.com").unwrap();
        let filter = LinkFilter::new("example.com", &FilterConfig::default());
        let mut config = test_config("https://example.com");
        config.max_crawl_duration = Some(0);
        let mut scheduler = CrawlScheduler::new(&config, filter, &seed);

        assert_eq!(scheduler.next(), NextStep::Stop(StopReason::DurationExceeded));
    }

    #[test]
    fn test_duration_wins_over_page_limit() {
        let seed = normalize_url("https://example.com").unwrap();
        let filter = LinkFilter::new("example.com", &FilterConfig::default());
        let mut config = test_config("https://example.com");
        config.max_crawl_duration = Some(0);
        config.max_pages_to_scrape = Some(1);
        let mut scheduler = CrawlScheduler::new(&config, filter, &seed);
        scheduler.record_scraped();

        // both budgets are exhausted; duration is checked first
        assert_eq!(scheduler.next(), NextStep::Stop(StopReason::DurationExceeded));
    }

    #[test]
    fn test_visited_set_only_grows() {
        let mut scheduler = scheduler_for("https://example.com");
        let _ = scheduler.next();
        let before = scheduler.visited_count();

        scheduler.offer(&url("https://example.com/a"), 1);
        let _ = scheduler.next();
        assert!(scheduler.visited_count() > before);
    }

    #[test]
    fn test_skips_consume_no_page_budget() {
        let seed = normalize_url("https://example.com").unwrap();
        let filter = LinkFilter::new("example.com", &FilterConfig::default());
        let mut config = test_config("https://example.com");
        config.max_pages_to_scrape = Some(5);
        let mut scheduler = CrawlScheduler::new(&config, filter, &seed);

        let _ = scheduler.next();
        // a blocklisted entry smuggled into the frontier is skipped silently
        scheduler.frontier.push_back(FrontierEntry {
            url: "https://example.com/login".to_string(),
            depth: 1,
        });
        assert_eq!(scheduler.next(), NextStep::Stop(StopReason::FrontierExhausted));
        assert_eq!(scheduler.pages_scraped(), 0);
    }
}
