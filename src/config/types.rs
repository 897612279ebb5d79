use serde::Deserialize;

/// Main configuration structure for sitegrist
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub crawler: CrawlerConfig,
    #[serde(default)]
    pub filter: FilterConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub chunking: ChunkingConfig,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CrawlerConfig {
    /// The seed URL; its host defines the crawl scope
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Maximum link depth from the seed URL (inclusive)
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Wall-clock budget for the whole crawl, in seconds (unset = unbounded)
    #[serde(rename = "max-crawl-duration", default)]
    pub max_crawl_duration: Option<u64>,

    /// Budget of successfully scraped pages (unset = unbounded)
    #[serde(rename = "max-pages-to-scrape", default)]
    pub max_pages_to_scrape: Option<u64>,

    /// Pause between successfully fetched pages, in seconds
    #[serde(rename = "politeness-delay", default = "default_politeness_delay")]
    pub politeness_delay: f64,

    /// User-Agent header sent with every request
    #[serde(rename = "user-agent", default = "default_user_agent")]
    pub user_agent: String,
}

/// Link blocklist configuration
///
/// Both lists default to the stock lists below; a config file may replace
/// them wholesale. Matching is case-insensitive: keywords match anywhere in
/// the URL string, extensions match the end of the URL path.
#[derive(Debug, Clone, Deserialize)]
pub struct FilterConfig {
    #[serde(rename = "ignored-keywords", default = "default_ignored_keywords")]
    pub ignored_keywords: Vec<String>,

    #[serde(rename = "ignored-extensions", default = "default_ignored_extensions")]
    pub ignored_extensions: Vec<String>,
}

/// Output file configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path of the JSONL file receiving one record per scraped page
    #[serde(rename = "records-path", default = "default_records_path")]
    pub records_path: String,

    /// Path of the JSONL file receiving the assembled documents
    #[serde(rename = "documents-path", default = "default_documents_path")]
    pub documents_path: String,
}

/// Chunking configuration for the splitter stage
#[derive(Debug, Clone, Deserialize)]
pub struct ChunkingConfig {
    /// Upper bound on chunk length, in characters
    #[serde(rename = "max-chunk-size", default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Characters shared between consecutive chunks of the same page
    #[serde(rename = "chunk-overlap", default = "default_chunk_overlap")]
    pub chunk_overlap: usize,
}

fn default_max_depth() -> u32 {
    3
}

fn default_politeness_delay() -> f64 {
    1.0
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/91.0.4472.124 Safari/537.36"
        .to_string()
}

fn default_ignored_keywords() -> Vec<String> {
    [
        "login",
        "signup",
        "register",
        "signin",
        "auth",
        "account",
        "cart",
        "checkout",
        "javascript:",
        "mailto:",
        "tel:",
        ".pdf",
        ".doc",
        ".docx",
        ".xls",
        ".xlsx",
        ".ppt",
        ".pptx",
        ".zip",
        ".rar",
        ".exe",
        ".dmg",
        ".pkg",
        "twitter.com",
        "facebook.com",
        "instagram.com",
        "linkedin.com",
        "youtube.com",
        "google.com/maps",
        "googleusercontent.com",
        "t.me",
        "whatsapp.com",
        "pinterest.com",
        "reddit.com",
        "vimeo.com",
        "flickr.com",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_ignored_extensions() -> Vec<String> {
    [
        ".png", ".jpg", ".jpeg", ".gif", ".css", ".js", ".ico", ".svg", ".webp", ".mp4", ".mp3",
        ".avi", ".mov", ".pdf", ".doc", ".docx", ".xls", ".xlsx", ".ppt", ".pptx", ".zip", ".tar",
        ".gz", ".rar", ".7z",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect()
}

fn default_records_path() -> String {
    "./scraped_data.jsonl".to_string()
}

fn default_documents_path() -> String {
    "./documents.jsonl".to_string()
}

fn default_max_chunk_size() -> usize {
    2000
}

fn default_chunk_overlap() -> usize {
    200
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            ignored_keywords: default_ignored_keywords(),
            ignored_extensions: default_ignored_extensions(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            records_path: default_records_path(),
            documents_path: default_documents_path(),
        }
    }
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: default_max_chunk_size(),
            chunk_overlap: default_chunk_overlap(),
        }
    }
}

impl CrawlerConfig {
    /// Convenience constructor used by tests and library callers
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            max_depth: default_max_depth(),
            max_crawl_duration: None,
            max_pages_to_scrape: None,
            politeness_delay: default_politeness_delay(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    /// Builds a configuration with defaults for everything but the seed URL
    pub fn for_base_url(base_url: impl Into<String>) -> Self {
        Self {
            crawler: CrawlerConfig::new(base_url),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
            chunking: ChunkingConfig::default(),
        }
    }
}
