//! Tunable thresholds for outline extraction and section ranking.

/// Title used when no first-page span reaches the title cutoff.
pub const UNKNOWN_TITLE: &str = "Unknown Title";

/// Font-size ratios (relative to the document's largest font) that open
/// each heading tier. Lower bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeadingThresholds {
    /// Minimum ratio for H1; also the title cutoff
    pub h1: f32,
    /// Minimum ratio for H2
    pub h2: f32,
    /// Minimum ratio for H3
    pub h3: f32,
}

impl Default for HeadingThresholds {
    fn default() -> Self {
        Self {
            h1: 0.95,
            h2: 0.75,
            h3: 0.55,
        }
    }
}

/// Configuration of the analysis pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisConfig {
    /// Heading tier ratios
    pub thresholds: HeadingThresholds,

    /// Lines with more whitespace-separated tokens are never headings
    pub max_heading_words: usize,

    /// Minimum relevance score (exclusive) for a heading to be retained
    pub relevance_threshold: f64,

    /// Maximum number of ranked sections in the result
    pub max_sections: usize,

    /// Maximum snippet length in characters
    pub snippet_max_chars: usize,

    /// Normalization anchor for documents without visible text
    pub fallback_font_size: f32,

    /// Skip first-page lines already consumed by the title
    pub exclude_title_lines: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            thresholds: HeadingThresholds::default(),
            max_heading_words: 15,
            relevance_threshold: 0.3,
            max_sections: 25,
            snippet_max_chars: 300,
            fallback_font_size: 12.0,
            exclude_title_lines: true,
        }
    }
}

impl AnalysisConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the heading tier ratios.
    pub fn with_thresholds(mut self, thresholds: HeadingThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Set the maximum word count of a heading line.
    pub fn with_max_heading_words(mut self, words: usize) -> Self {
        self.max_heading_words = words;
        self
    }

    /// Set the relevance cutoff.
    pub fn with_relevance_threshold(mut self, threshold: f64) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    /// Set the maximum number of ranked sections.
    pub fn with_max_sections(mut self, max: usize) -> Self {
        self.max_sections = max;
        self
    }

    /// Set the maximum snippet length in characters.
    pub fn with_snippet_max_chars(mut self, chars: usize) -> Self {
        self.snippet_max_chars = chars;
        self
    }

    /// Set the fallback font size.
    pub fn with_fallback_font_size(mut self, size: f32) -> Self {
        self.fallback_font_size = size;
        self
    }

    /// Choose whether title lines are also reported as headings.
    pub fn with_exclude_title_lines(mut self, exclude: bool) -> Self {
        self.exclude_title_lines = exclude;
        self
    }
}
