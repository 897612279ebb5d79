use crate::config::types::{ChunkingConfig, Config, CrawlerConfig, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_crawler_config(&config.crawler)?;
    validate_output_config(&config.output)?;
    validate_chunking_config(&config.chunking)?;
    Ok(())
}

/// Validates crawler configuration
fn validate_crawler_config(config: &CrawlerConfig) -> Result<(), ConfigError> {
    let url = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url '{}': {}", config.base_url, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use http or https, got '{}'",
            url.scheme()
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::Validation(format!(
            "base-url '{}' has no host",
            config.base_url
        )));
    }

    if !config.politeness_delay.is_finite() || config.politeness_delay < 0.0 {
        return Err(ConfigError::Validation(format!(
            "politeness-delay must be a non-negative number of seconds, got {}",
            config.politeness_delay
        )));
    }

    if let Some(duration) = config.max_crawl_duration {
        if duration < 1 {
            return Err(ConfigError::Validation(
                "max-crawl-duration must be >= 1 second when set".to_string(),
            ));
        }
    }

    if let Some(pages) = config.max_pages_to_scrape {
        if pages < 1 {
            return Err(ConfigError::Validation(
                "max-pages-to-scrape must be >= 1 when set".to_string(),
            ));
        }
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.records_path.is_empty() {
        return Err(ConfigError::Validation(
            "records-path cannot be empty".to_string(),
        ));
    }

    if config.documents_path.is_empty() {
        return Err(ConfigError::Validation(
            "documents-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates chunking configuration
fn validate_chunking_config(config: &ChunkingConfig) -> Result<(), ConfigError> {
    if config.max_chunk_size < 1 {
        return Err(ConfigError::Validation(
            "max-chunk-size must be >= 1".to_string(),
        ));
    }

    if config.chunk_overlap >= config.max_chunk_size {
        return Err(ConfigError::Validation(format!(
            "chunk-overlap ({}) must be smaller than max-chunk-size ({})",
            config.chunk_overlap, config.max_chunk_size
        )));
    }

    Ok(())
}
