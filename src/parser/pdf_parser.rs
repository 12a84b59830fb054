//! PDF document parser.

use std::path::Path;

use crate::analysis::PageTextSource;
use crate::detect::pdf_version_from_path;
use crate::error::Result;
use crate::model::{Document, Line, Page};

use super::backend::{LopdfBackend, PdfBackend};
use super::layout::LayoutAnalyzer;
use super::options::ParseOptions;

/// PDF document parser.
///
/// Holds the loaded file; [`PdfParser::parse`] walks every page, while
/// [`PdfParser::page_text`] re-extracts a single page on demand.
pub struct PdfParser {
    backend: LopdfBackend,
    options: ParseOptions,
}

impl PdfParser {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::open_with_options(path, ParseOptions::default())
    }

    /// Open a PDF file with custom options.
    pub fn open_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Self> {
        let path = path.as_ref();

        // Reject non-PDF files before handing them to lopdf
        let version = pdf_version_from_path(path)?;
        log::debug!("Opening {} (PDF {})", path.display(), version);

        let backend = LopdfBackend::load_file(path)?;
        Ok(Self { backend, options })
    }

    /// Parse a PDF from bytes.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_options(data, ParseOptions::default())
    }

    /// Parse a PDF from bytes with custom options.
    pub fn from_bytes_with_options(data: &[u8], options: ParseOptions) -> Result<Self> {
        let backend = LopdfBackend::load_bytes(data)?;
        Ok(Self { backend, options })
    }

    /// Parse every page into the document model.
    pub fn parse(&self) -> Result<Document> {
        let mut document = Document::new();

        for page_num in self.backend.pages().into_keys() {
            let lines = match self.page_lines(page_num) {
                Ok(lines) => lines,
                Err(e) if !self.options.is_strict() => {
                    log::warn!("Failed to extract text from page {}: {}", page_num, e);
                    Vec::new()
                }
                Err(e) => return Err(e),
            };
            document.add_page(Page::with_lines(page_num, lines));
        }

        log::debug!(
            "Parsed {} pages (PDF {})",
            document.page_count(),
            self.backend.version()
        );
        Ok(document)
    }

    /// Extract the visual lines of one page (1-indexed).
    pub fn page_lines(&self, page_num: u32) -> Result<Vec<Line>> {
        LayoutAnalyzer::new(&self.backend).page_lines(page_num)
    }

    /// Plain text of one page (1-indexed), one visual line per text line.
    pub fn page_text(&self, page_num: u32) -> Result<String> {
        let lines = self.page_lines(page_num)?;
        Ok(Page::with_lines(page_num, lines).plain_text())
    }

    /// Get the number of pages.
    pub fn page_count(&self) -> u32 {
        self.backend.page_count()
    }

    /// Get PDF version.
    pub fn version(&self) -> String {
        self.backend.version()
    }
}

impl PageTextSource for PdfParser {
    fn page_count(&self) -> u32 {
        PdfParser::page_count(self)
    }

    fn page_text(&self, page: u32) -> Result<String> {
        PdfParser::page_text(self, page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    #[test]
    fn test_open_rejects_non_pdf() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"this is plain text, not a pdf").unwrap();

        let result = PdfParser::open(&path);
        assert!(matches!(result, Err(Error::UnknownFormat)));
    }

    #[test]
    fn test_open_missing_file() {
        let result = PdfParser::open("/definitely/not/here.pdf");
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
