//! Link filtering: crawl scope and blocklists
//!
//! A link survives filtering only if it is in scope (http/https on the
//! crawl's base host) and matches neither blocklist. The blocklists are
//! fixed at filter construction from configuration; there are no module
//! globals.

use crate::config::FilterConfig;
use crate::url::extract_host;
use url::Url;

/// Decides which discovered links are worth fetching
#[derive(Debug, Clone)]
pub struct LinkFilter {
    base_host: String,
    ignored_keywords: Vec<String>,
    ignored_extensions: Vec<String>,
}

impl LinkFilter {
    /// Builds a filter scoped to `base_host` with the configured blocklists
    pub fn new(base_host: impl Into<String>, config: &FilterConfig) -> Self {
        Self {
            base_host: base_host.into().to_lowercase(),
            ignored_keywords: config
                .ignored_keywords
                .iter()
                .map(|k| k.to_lowercase())
                .collect(),
            ignored_extensions: config
                .ignored_extensions
                .iter()
                .map(|e| e.to_lowercase())
                .collect(),
        }
    }

    /// True when the link's scheme is http/https and its host exactly equals
    /// the crawl's base host (no subdomain or cross-domain following)
    pub fn is_in_scope(&self, url: &Url) -> bool {
        if url.scheme() != "http" && url.scheme() != "https" {
            return false;
        }
        match extract_host(url) {
            Some(host) => host == self.base_host,
            None => false,
        }
    }

    /// True when the URL matches either blocklist
    ///
    /// The keyword list matches anywhere in the lowercased URL string; the
    /// extension list matches the end of the lowercased path. The two checks
    /// are independent: either one rejects the link.
    pub fn should_ignore(&self, url: &Url) -> bool {
        let lowered = url.as_str().to_lowercase();
        if self
            .ignored_keywords
            .iter()
            .any(|keyword| lowered.contains(keyword))
        {
            return true;
        }

        let path = url.path().to_lowercase();
        self.ignored_extensions
            .iter()
            .any(|ext| path.ends_with(ext))
    }
}
