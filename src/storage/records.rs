//! Value types for persisted crawl data

use serde::{Deserialize, Serialize};

/// A titled span of extracted page text, delimited by heading boundaries in
/// the source markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub section_title: String,
    pub text: String,
}

impl Section {
    pub fn new(section_title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            section_title: section_title.into(),
            text: text.into(),
        }
    }
}

/// One persisted record per successfully scraped page
///
/// Immutable once written. The URL is stored in normalized form and is
/// unique within a crawl (the visited set guarantees it).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CrawlRecord {
    pub url: String,
    pub depth: u32,
    pub title: String,
    pub sections: Vec<Section>,
}

impl CrawlRecord {
    /// Builds a record, dropping any section whose trimmed text is empty
    pub fn new(
        url: impl Into<String>,
        depth: u32,
        title: impl Into<String>,
        sections: Vec<Section>,
    ) -> Self {
        let sections = sections
            .into_iter()
            .filter(|s| !s.text.trim().is_empty())
            .collect();
        Self {
            url: url.into(),
            depth,
            title: title.into(),
            sections,
        }
    }

    /// True when the page yielded anything worth persisting: at least one
    /// section, or a non-empty title
    pub fn has_content(&self) -> bool {
        !self.sections.is_empty() || !self.title.is_empty()
    }

    /// The page's section texts joined with newlines, trimmed
    ///
    /// This is the input handed to the text chunker.
    pub fn page_text(&self) -> String {
        self.sections
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
            .trim()
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_drops_empty_sections() {
        let record = CrawlRecord::new(
            "https://example.com/page",
            1,
            "Title",
            vec![
                Section::new("Keep", "some text"),
                Section::new("Drop", "   "),
                Section::new("Drop too", ""),
            ],
        );
        assert_eq!(record.sections.len(), 1);
        assert_eq!(record.sections[0].section_title, "Keep");
    }

    #[test]
    fn test_has_content_with_sections_only() {
        let record = CrawlRecord::new(
            "https://example.com/",
            0,
            "",
            vec![Section::new("Introduction", "hello")],
        );
        assert!(record.has_content());
    }

    #[test]
    fn test_has_content_with_title_only() {
        let record = CrawlRecord::new("https://example.com/", 0, "Just a title", vec![]);
        assert!(record.has_content());
    }

    #[test]
    fn test_no_content() {
        let record = CrawlRecord::new("https://example.com/", 0, "", vec![]);
        assert!(!record.has_content());
    }

    #[test]
    fn test_page_text_joins_with_newlines() {
        let record = CrawlRecord::new(
            "https://example.com/",
            0,
            "T",
            vec![
                Section::new("A", "first part"),
                Section::new("B", "second part"),
            ],
        );
        assert_eq!(record.page_text(), "first part\nsecond part");
    }

    #[test]
    fn test_serde_round_trip_shape() {
        let record = CrawlRecord::new(
            "https://example.com/docs",
            2,
            "Docs",
            vec![Section::new("Intro", "words")],
        );
        let line = serde_json::to_string(&record).unwrap();
        assert!(line.contains("\"url\":\"https://example.com/docs\""));
        assert!(line.contains("\"depth\":2"));
        assert!(line.contains("\"section_title\":\"Intro\""));

        let parsed: CrawlRecord = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed, record);
    }
}
