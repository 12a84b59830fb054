//! Representative page excerpts.

use std::collections::HashSet;

use super::config::AnalysisConfig;
use crate::error::Result;
use crate::model::SubsectionSnippet;

/// Something that can produce the plain text of a page on demand.
pub trait PageTextSource {
    /// Number of pages.
    fn page_count(&self) -> u32;

    /// Plain text of a page (1-indexed), lines separated by `\n`.
    fn page_text(&self, page: u32) -> Result<String>;
}

/// Collects at most one snippet per (document, page) over a whole run.
#[derive(Debug, Clone)]
pub struct SnippetSelector {
    max_chars: usize,
    seen: HashSet<(String, u32)>,
    snippets: Vec<SubsectionSnippet>,
}

impl SnippetSelector {
    /// Create an empty selector.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            max_chars: config.snippet_max_chars,
            seen: HashSet::new(),
            snippets: Vec::new(),
        }
    }

    /// Try to record the first line of `page` in `document`.
    ///
    /// Returns `true` if a snippet was emitted. A pair is marked as seen only
    /// when a snippet is emitted, so a page that failed or had no text is
    /// attempted again for the next heading on it.
    pub fn select(&mut self, document: &str, page: u32, source: &dyn PageTextSource) -> bool {
        let key = (document.to_string(), page);
        if self.seen.contains(&key) {
            return false;
        }
        if page == 0 || page > source.page_count() {
            log::debug!("{}: page {} is out of range, no snippet", document, page);
            return false;
        }

        let text = match source.page_text(page) {
            Ok(text) => text,
            Err(e) => {
                log::warn!(
                    "Error extracting text from page {} in {}: {}",
                    page,
                    document,
                    e
                );
                return false;
            }
        };

        let refined = first_line(&text, self.max_chars);
        if refined.is_empty() {
            return false;
        }

        self.snippets.push(SubsectionSnippet {
            document: document.to_string(),
            refined_text: refined,
            page_number: page,
        });
        self.seen.insert(key);
        true
    }

    /// Snippets emitted so far.
    pub fn snippets(&self) -> &[SubsectionSnippet] {
        &self.snippets
    }

    /// Consume the selector, returning snippets in emission order.
    pub fn into_snippets(self) -> Vec<SubsectionSnippet> {
        self.snippets
    }
}

/// Text before the first line break of the trimmed page text, at most
/// `max_chars` characters long.
pub fn first_line(page_text: &str, max_chars: usize) -> String {
    page_text
        .trim()
        .split('\n')
        .next()
        .unwrap_or_default()
        .chars()
        .take(max_chars)
        .collect()
}
