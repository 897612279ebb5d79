//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler, including:
//! - Building the HTTP client with a realistic user agent
//! - Bounded GET requests with redirect following
//! - Content-Type validation (only HTML is scraped)
//! - Error classification
//!
//! Every failure here is recoverable: it costs the crawl exactly one URL.

use reqwest::{redirect::Policy, Client};
use std::time::Duration;
use thiserror::Error;

/// Fixed per-request timeout
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Maximum redirect hops before a fetch is abandoned
const MAX_REDIRECTS: usize = 10;

/// Classified fetch failures
///
/// Callers branch on the kind; none of these abort the crawl.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error {status} fetching {url}")]
    Http { url: String, status: u16 },

    #[error("Connection error fetching {url}")]
    Connection { url: String },

    #[error("Timeout fetching {url}")]
    Timeout { url: String },

    #[error("Error fetching {url}: {message}")]
    Other { url: String, message: String },
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchOutcome {
    /// A 2xx HTML response
    Html {
        /// Final URL after redirects
        final_url: String,
        /// Content-Type header value (lowercased)
        content_type: String,
        /// Decoded response body
        body: String,
    },

    /// A 2xx response that is not HTML; skipped without error
    NonHtml {
        /// The actual Content-Type received
        content_type: String,
    },

    /// A classified failure; the URL is skipped
    Failed(FetchError),
}

/// Builds the crawler's HTTP client
///
/// The client follows redirects (up to a fixed hop count), applies the fixed
/// request timeout, and identifies itself with the configured user agent on
/// every request.
pub fn build_http_client(user_agent: &str) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent)
        .timeout(FETCH_TIMEOUT)
        .redirect(Policy::limited(MAX_REDIRECTS))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Fetches one page
///
/// # Outcome rules
///
/// - Transport failures are classified as `Timeout`, `Connection`, or
///   `Other`
/// - Non-2xx statuses (after redirects) become `FetchError::Http`
/// - 2xx responses whose Content-Type does not include `text/html` are a
///   non-error skip (`NonHtml`)
/// - Everything else is an `Html` success carrying the body
pub async fn fetch_page(client: &Client, url: &str) -> FetchOutcome {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return FetchOutcome::Failed(classify_error(url, &e)),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchOutcome::Failed(FetchError::Http {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let final_url = response.url().to_string();
    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_lowercase();

    if !content_type.contains("text/html") {
        return FetchOutcome::NonHtml { content_type };
    }

    match response.text().await {
        Ok(body) => FetchOutcome::Html {
            final_url,
            content_type,
            body,
        },
        Err(e) => FetchOutcome::Failed(classify_error(url, &e)),
    }
}

fn classify_error(url: &str, e: &reqwest::Error) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout {
            url: url.to_string(),
        }
    } else if e.is_connect() {
        FetchError::Connection {
            url: url.to_string(),
        }
    } else {
        FetchError::Other {
            url: url.to_string(),
            message: e.to_string(),
        }
    }
}
