//! Lexical keyword-overlap relevance.
//!
//! Deliberately simple: keywords are the whitespace-separated tokens of the
//! lowercased task, and a keyword matches when it occurs anywhere inside the
//! lowercased heading. There is no stemming and no word-boundary check, so
//! short keywords such as "a" match inside longer words.

/// Lowercased job keywords, duplicates and punctuation preserved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Keywords {
    words: Vec<String>,
}

impl Keywords {
    /// Split a task description into keywords.
    pub fn from_task(task: &str) -> Self {
        Self {
            words: task
                .to_lowercase()
                .split_whitespace()
                .map(str::to_string)
                .collect(),
        }
    }

    /// The keywords in task order.
    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    /// Number of keywords, counting duplicates.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if there are no keywords.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Fraction of keywords contained in `text`, in `[0, 1]`.
    ///
    /// Every keyword occurrence counts separately, so a keyword repeated in
    /// the task weighs more. Returns `0.0` when there are no keywords.
    pub fn score(&self, text: &str) -> f64 {
        if self.words.is_empty() {
            return 0.0;
        }

        let text = text.to_lowercase();
        let matches = self
            .words
            .iter()
            .filter(|keyword| text.contains(keyword.as_str()))
            .count();
        matches as f64 / self.words.len() as f64
    }
}
