//! Title and heading extraction.

use super::classify::classify;
use super::config::{AnalysisConfig, UNKNOWN_TITLE};
use super::typography::max_font_size;
use crate::model::{Document, HeadingRecord, Line, OutlineResult, Page};

/// Builds an [`OutlineResult`] from a parsed document.
#[derive(Debug, Clone)]
pub struct OutlineBuilder<'a> {
    config: &'a AnalysisConfig,
}

impl<'a> OutlineBuilder<'a> {
    /// Create a builder using the given configuration.
    pub fn new(config: &'a AnalysisConfig) -> Self {
        Self { config }
    }

    /// Extract the title and headings of a document.
    pub fn build(&self, doc: &Document) -> OutlineResult {
        let max_font = max_font_size(doc, self.config.fallback_font_size);
        let title_cutoff = max_font * self.config.thresholds.h1;

        let title = doc
            .first_page()
            .map(|page| title_from_page(page, title_cutoff))
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string());

        let mut outline = Vec::new();
        for (index, page) in doc.pages.iter().enumerate() {
            for line in &page.lines {
                if index == 0
                    && self.config.exclude_title_lines
                    && is_title_line(line, title_cutoff)
                {
                    continue;
                }
                if let Some(record) = self.heading_for_line(line, page.number, max_font) {
                    outline.push(record);
                }
            }
        }

        log::debug!(
            "Outline: title {:?}, {} headings (max font {:.1})",
            title,
            outline.len(),
            max_font
        );

        OutlineResult { title, outline }
    }

    /// Classify one line, or `None` if it is not a heading.
    fn heading_for_line(&self, line: &Line, page: u32, max_font: f32) -> Option<HeadingRecord> {
        let text = line.full_text();
        if text.is_empty() || line.word_count() > self.config.max_heading_words {
            return None;
        }

        let size = line.dominant_font_size()?;
        let level = classify(size, max_font, &self.config.thresholds)?;
        Some(HeadingRecord::new(level, text, page))
    }
}

/// Join every first-page span at or above the title cutoff.
fn title_from_page(page: &Page, cutoff: f32) -> String {
    page.lines
        .iter()
        .flat_map(|line| line.non_blank_spans())
        .filter(|span| span.font_size >= cutoff)
        .map(|span| span.trimmed())
        .collect::<Vec<_>>()
        .join(" ")
        .trim()
        .to_string()
}

/// A line whose visible spans all reached the title cutoff.
fn is_title_line(line: &Line, cutoff: f32) -> bool {
    !line.is_blank() && line.non_blank_spans().all(|span| span.font_size >= cutoff)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{HeadingLevel, Span};

    fn line(spans: &[(&str, f32)]) -> Line {
        Line::new(spans.iter().map(|(t, s)| Span::new(*t, *s)).collect())
    }

    fn page(number: u32, lines: Vec<Line>) -> Page {
        Page::with_lines(number, lines)
    }

    #[test]
    fn test_title_line_is_not_repeated_as_heading() {
        let doc = Document::with_pages(vec![page(
            1,
            vec![line(&[("Annual Report 2024", 24.0)]), line(&[("Body", 10.0)])],
        )]);
        let config = AnalysisConfig::default();

        let result = OutlineBuilder::new(&config).build(&doc);
        assert_eq!(result.title, "Annual Report 2024");
        assert!(result.outline.is_empty());
    }

    #[test]
    fn test_title_lines_kept_when_configured() {
        let doc = Document::with_pages(vec![page(1, vec![line(&[("Annual Report 2024", 24.0)])])]);
        let config = AnalysisConfig::default().with_exclude_title_lines(false);

        let result = OutlineBuilder::new(&config).build(&doc);
        assert_eq!(result.title, "Annual Report 2024");
        assert_eq!(
            result.outline,
            vec![HeadingRecord::new(HeadingLevel::H1, "Annual Report 2024", 1)]
        );
    }

    #[test]
    fn test_title_joins_qualifying_spans_across_lines() {
        let doc = Document::with_pages(vec![page(
            1,
            vec![
                line(&[(" Request ", 30.0), ("for", 12.0)]),
                line(&[("Proposal", 29.0)]),
            ],
        )]);
        let config = AnalysisConfig::default();

        let result = OutlineBuilder::new(&config).build(&doc);
        assert_eq!(result.title, "Request Proposal");
        // The mixed-size line is not entirely title text
        assert_eq!(result.outline.len(), 1);
        assert_eq!(result.outline[0].text, "Request for");
    }

    #[test]
    fn test_unknown_title() {
        let config = AnalysisConfig::default();
        let empty = OutlineBuilder::new(&config).build(&Document::new());
        assert_eq!(empty.title, UNKNOWN_TITLE);
        assert!(empty.outline.is_empty());

        // Largest text lives on page 2 only
        let doc = Document::with_pages(vec![
            page(1, vec![line(&[("small", 10.0)])]),
            page(2, vec![line(&[("Big Heading", 20.0)])]),
        ]);
        let result = OutlineBuilder::new(&config).build(&doc);
        assert_eq!(result.title, UNKNOWN_TITLE);
        assert_eq!(
            result.outline,
            vec![HeadingRecord::new(HeadingLevel::H1, "Big Heading", 2)]
        );
    }

    #[test]
    fn test_levels_and_scan_order() {
        let doc = Document::with_pages(vec![
            page(
                1,
                vec![
                    line(&[("Title", 20.0)]),
                    line(&[("Section A", 16.0)]),
                    line(&[("Detail", 12.0)]),
                    line(&[("body text", 10.0)]),
                ],
            ),
            page(2, vec![line(&[("Section B", 19.0)]), line(&[("Section C", 15.0)])]),
        ]);
        let config = AnalysisConfig::default();

        let result = OutlineBuilder::new(&config).build(&doc);
        let got: Vec<_> = result
            .outline
            .iter()
            .map(|h| (h.level, h.text.as_str(), h.page))
            .collect();
        assert_eq!(
            got,
            vec![
                (HeadingLevel::H2, "Section A", 1),
                (HeadingLevel::H3, "Detail", 1),
                (HeadingLevel::H1, "Section B", 2),
                (HeadingLevel::H2, "Section C", 2),
            ]
        );
    }

    #[test]
    fn test_long_lines_are_never_headings() {
        let sixteen = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen sixteen";
        let fifteen = "one two three four five six seven eight nine ten eleven twelve thirteen fourteen fifteen";
        let doc = Document::with_pages(vec![
            page(1, vec![line(&[("Title", 20.0)])]),
            page(2, vec![line(&[(sixteen, 20.0)]), line(&[(fifteen, 20.0)])]),
        ]);
        let config = AnalysisConfig::default();

        let result = OutlineBuilder::new(&config).build(&doc);
        assert_eq!(result.outline.len(), 1);
        assert_eq!(result.outline[0].text, fifteen);
    }

    #[test]
    fn test_dominant_size_decides_level() {
        let doc = Document::with_pages(vec![
            page(1, vec![line(&[("Title", 20.0)])]),
            page(2, vec![line(&[("Chapter", 16.0), ("one", 8.0), ("  ", 40.0)])]),
        ]);
        let config = AnalysisConfig::default();

        let result = OutlineBuilder::new(&config).build(&doc);
        assert_eq!(
            result.outline,
            vec![HeadingRecord::new(HeadingLevel::H2, "Chapter one", 2)]
        );
    }
}
