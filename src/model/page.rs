//! Page-level types: pages, visual lines and styled spans.

use serde::{Deserialize, Serialize};

/// A run of text sharing one font size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    /// Raw text content (may carry surrounding whitespace)
    pub text: String,

    /// Effective font size in points
    pub font_size: f32,
}

impl Span {
    /// Create a new span.
    pub fn new(text: impl Into<String>, font_size: f32) -> Self {
        Self {
            text: text.into(),
            font_size,
        }
    }

    /// Text with surrounding whitespace removed.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the span carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.trimmed().is_empty()
    }
}

/// Spans rendered on one visual line, in reading order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Line {
    /// The spans of this line
    pub spans: Vec<Span>,
}

impl Line {
    /// Create a line from spans.
    pub fn new(spans: Vec<Span>) -> Self {
        Self { spans }
    }

    /// Iterate over spans with visible text.
    pub fn non_blank_spans(&self) -> impl Iterator<Item = &Span> {
        self.spans.iter().filter(|s| !s.is_blank())
    }

    /// Trimmed span texts joined by single spaces, skipping blank spans.
    pub fn full_text(&self) -> String {
        self.non_blank_spans()
            .map(Span::trimmed)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Largest font size among non-blank spans.
    ///
    /// Returns `None` when the line has no visible text.
    pub fn dominant_font_size(&self) -> Option<f32> {
        self.non_blank_spans()
            .map(|s| s.font_size)
            .fold(None, |max, size| match max {
                Some(m) if m >= size => Some(m),
                _ => Some(size),
            })
    }

    /// Number of whitespace-separated tokens in [`Line::full_text`].
    pub fn word_count(&self) -> usize {
        self.non_blank_spans()
            .map(|s| s.text.split_whitespace().count())
            .sum()
    }

    /// Check if the line has no visible text.
    pub fn is_blank(&self) -> bool {
        self.non_blank_spans().next().is_none()
    }
}

/// A single page in the document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Page number (1-indexed)
    pub number: u32,

    /// Visual lines, top to bottom
    pub lines: Vec<Line>,
}

impl Page {
    /// Create an empty page.
    pub fn new(number: u32) -> Self {
        Self {
            number,
            lines: Vec::new(),
        }
    }

    /// Create a page with the given lines.
    pub fn with_lines(number: u32, lines: Vec<Line>) -> Self {
        Self { number, lines }
    }

    /// Add a line to the page.
    pub fn add_line(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Plain text of the page, one visual line per text line.
    pub fn plain_text(&self) -> String {
        self.lines
            .iter()
            .filter(|l| !l.is_blank())
            .map(Line::full_text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Check if the page has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
