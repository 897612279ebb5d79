//! URL handling module for sitegrist
//!
//! This module provides URL normalization and host extraction. The
//! normalized string form of a URL is the sole deduplication key used by the
//! crawler's visited set and frontier.

mod domain;
mod normalize;

// Re-export main functions
pub use domain::extract_host;
pub use normalize::normalize_url;
