//! Section and link extraction from raw HTML
//!
//! Boilerplate removal is a filtering pass, not tree surgery: elements and
//! text with an ancestor in `BOILERPLATE_TAGS` are simply invisible to the
//! walk. The remaining block-level elements are visited in document order
//! and folded into heading-delimited sections.
//!
//! Link extraction deliberately looks at the *whole* document, boilerplate
//! included: navigation menus are exactly where site structure lives.

use crate::storage::Section;
use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::{ElementRef, Html};
use std::collections::HashSet;
use url::Url;

/// Subtrees rooted at these tags contribute neither sections nor text
const BOILERPLATE_TAGS: &[&str] = &[
    "nav", "footer", "aside", "script", "style", "header", "form", "button", "iframe",
];

/// Heading tags open a new section
const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];

/// Tags that disqualify a div/span from being treated as a text leaf
const BLOCK_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "div"];

/// Structured content extracted from one page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedPage {
    /// Text of the `<title>` element, trimmed; empty when absent
    pub title: String,
    /// Heading-delimited sections in document order, all non-empty
    pub sections: Vec<Section>,
}

/// Extracts the title and titled text sections from raw HTML
pub fn extract_page(html: &str) -> ExtractedPage {
    let document = Html::parse_document(html);
    ExtractedPage {
        title: extract_title(&document),
        sections: extract_sections(&document),
    }
}

fn extract_title(document: &Html) -> String {
    document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "title")
        .map(|e| element_text(&e))
        .unwrap_or_default()
}

fn extract_sections(document: &Html) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut current_title: Option<String> = None;
    let mut current_text: Vec<String> = Vec::new();

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if is_hidden(&node) {
            continue;
        }

        let tag = element.value().name();
        if HEADING_TAGS.contains(&tag) {
            // A heading with accumulated text below the previous heading
            // closes that section; a heading with nothing accumulated just
            // replaces the pending title.
            if current_title.is_some() && !current_text.is_empty() {
                flush_section(&mut sections, &current_title, &mut current_text);
            }
            current_title = Some(element_text(&element));
        } else if carries_text(&element, tag) {
            let text = element_text(&element);
            if !text.is_empty() {
                current_text.push(text);
                if current_title.is_none() && sections.is_empty() {
                    current_title = Some("Introduction".to_string());
                }
            }
        }
    }

    if current_title.is_some() && !current_text.is_empty() {
        flush_section(&mut sections, &current_title, &mut current_text);
    }

    // Pages with no block structure at all still contribute their body text
    if sections.is_empty() {
        let body = body_text(document);
        if !body.is_empty() {
            sections.push(Section::new("Full Page Content", body));
        }
    }

    sections.retain(|s| !s.text.trim().is_empty());
    sections
}

/// Extracts every anchor href in document order, resolved against the page
/// URL, with order-preserving deduplication
///
/// Scope and blocklist decisions belong to the link filter; this function
/// only resolves. Unresolvable hrefs are dropped.
pub fn extract_links(html: &str, page_url: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for node in document.root_element().descendants() {
        let Some(element) = ElementRef::wrap(node) else {
            continue;
        };
        if element.value().name() != "a" {
            continue;
        }
        let Some(href) = element.value().attr("href") else {
            continue;
        };
        let href = href.trim();
        if href.is_empty() {
            continue;
        }
        if let Ok(resolved) = page_url.join(href) {
            if seen.insert(resolved.to_string()) {
                links.push(resolved);
            }
        }
    }

    links
}

fn flush_section(sections: &mut Vec<Section>, title: &Option<String>, text: &mut Vec<String>) {
    if let Some(title) = title {
        sections.push(Section::new(title.clone(), text.join(" ").trim().to_string()));
    }
    text.clear();
}

/// True for elements whose text feeds the current section: p and li always,
/// div and span only when they are leaves (no block-level descendants)
fn carries_text(element: &ElementRef, tag: &str) -> bool {
    match tag {
        "p" | "li" => true,
        "div" | "span" => !has_block_descendants(element),
        _ => false,
    }
}

fn has_block_descendants(element: &ElementRef) -> bool {
    element
        .descendants()
        .skip(1)
        .filter(|n| !is_hidden(n))
        .filter_map(ElementRef::wrap)
        .any(|e| BLOCK_TAGS.contains(&e.value().name()))
}

/// True when any ancestor is a boilerplate tag
fn is_hidden(node: &NodeRef<'_, Node>) -> bool {
    node.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| BOILERPLATE_TAGS.contains(&a.value().name()))
}

/// Visible text of an element with whitespace collapsed
///
/// Text under boilerplate descendants is excluded, mirroring the filtering
/// pass of the section walk.
fn element_text(element: &ElementRef) -> String {
    let mut raw = String::new();
    for node in element.descendants() {
        if let Some(text) = node.value().as_text() {
            if is_hidden(&node) {
                continue;
            }
            raw.push_str(text);
            raw.push(' ');
        }
    }
    collapse_whitespace(&raw)
}

/// All visible text under `<body>`, used for the whole-page fallback section
fn body_text(document: &Html) -> String {
    let Some(body) = document
        .root_element()
        .descendants()
        .filter_map(ElementRef::wrap)
        .find(|e| e.value().name() == "body")
    else {
        return String::new();
    };

    element_text(&body)
}

fn collapse_whitespace(input: &str) -> String {
    let mut buf = String::with_capacity(input.len());
    let mut last_space = false;
    for ch in input.chars() {
        if ch.is_whitespace() {
            if !last_space && !buf.is_empty() {
                buf.push(' ');
            }
            last_space = true;
        } else {
            buf.push(ch);
            last_space = false;
        }
    }
    buf.trim_end().to_string()
}
