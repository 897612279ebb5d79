use crate::UrlError;
use url::Url;

/// Normalizes a URL according to sitegrist's normalization rules
///
/// # Normalization Steps
///
/// 1. Parse the URL; reject if malformed
/// 2. Remove the fragment (everything after #)
/// 3. Normalize the path:
///    - Empty path becomes /
///    - Trailing slashes are stripped from any non-root path
///
/// The scheme, host, port, and query string are left untouched; scheme and
/// host policy belong to the link filter, not the normalizer. The operation
/// is idempotent: normalizing an already-normalized URL is a no-op.
///
/// # Arguments
///
/// * `url_str` - The URL string to normalize
///
/// # Returns
///
/// * `Ok(Url)` - Normalized URL
/// * `Err(UrlError)` - Failed to parse the URL
///
/// # Examples
///
/// ```
/// use sitegrist::url::normalize_url;
///
/// let url = normalize_url("https://example.com/page/#intro").unwrap();
/// assert_eq!(url.as_str(), "https://example.com/page");
/// ```
pub fn normalize_url(url_str: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(url_str).map_err(|e| UrlError::Parse(e.to_string()))?;

    url.set_fragment(None);

    // Opaque URLs (mailto:, javascript:, data:) have no path hierarchy to
    // normalize; they pass through fragment-stripped and the link filter
    // rejects them by scheme.
    if url.cannot_be_a_base() {
        return Ok(url);
    }

    let path = url.path();
    if path.is_empty() {
        url.set_path("/");
    } else if path != "/" && path.ends_with('/') {
        let trimmed = path.trim_end_matches('/').to_string();
        if trimmed.is_empty() {
            url.set_path("/");
        } else {
            url.set_path(&trimmed);
        }
    }

    Ok(url)
}
