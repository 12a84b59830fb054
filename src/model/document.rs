//! Document-level types.

use super::{Page, Span};
use serde::{Deserialize, Serialize};

/// A parsed PDF document reduced to the typography the analysis needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// Pages in the document
    pub pages: Vec<Page>,
}

impl Document {
    /// Create a new empty document.
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// Create a document from pages.
    pub fn with_pages(pages: Vec<Page>) -> Self {
        Self { pages }
    }

    /// Get the number of pages in the document.
    pub fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    /// Get a page by number (1-indexed).
    pub fn get_page(&self, page_num: u32) -> Option<&Page> {
        if page_num == 0 {
            return None;
        }
        self.pages.get((page_num - 1) as usize)
    }

    /// The first page, if any.
    pub fn first_page(&self) -> Option<&Page> {
        self.pages.first()
    }

    /// Add a page to the document.
    pub fn add_page(&mut self, page: Page) {
        self.pages.push(page);
    }

    /// Check if the document has any pages.
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Every span in scan order, paired with its page number.
    pub fn spans(&self) -> impl Iterator<Item = (u32, &Span)> {
        self.pages.iter().flat_map(|page| {
            page.lines
                .iter()
                .flat_map(move |line| line.spans.iter().map(move |span| (page.number, span)))
        })
    }
}
