//! Cross-document section ranking.

use super::config::AnalysisConfig;
use crate::model::{HeadingRecord, RankedSection, ScoredSection};

/// Accumulates relevant headings across documents and ranks them.
#[derive(Debug, Clone)]
pub struct SectionRanker {
    threshold: f64,
    max_sections: usize,
    candidates: Vec<ScoredSection>,
}

impl SectionRanker {
    /// Create an empty ranker.
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            threshold: config.relevance_threshold,
            max_sections: config.max_sections,
            candidates: Vec::new(),
        }
    }

    /// Offer a scored heading; returns `true` if it was retained.
    ///
    /// A heading is retained only when its score is strictly above the
    /// relevance threshold.
    pub fn offer(&mut self, document: &str, heading: &HeadingRecord, score: f64) -> bool {
        if score <= self.threshold {
            return false;
        }

        self.candidates.push(ScoredSection {
            document: document.to_string(),
            page_number: heading.page,
            section_title: heading.text.clone(),
            score,
        });
        true
    }

    /// Number of retained headings.
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Check if nothing was retained.
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Sort by score, keep the best `max_sections`, and assign dense ranks.
    ///
    /// The sort is stable: equal scores keep their offer order.
    pub fn finish(self) -> Vec<RankedSection> {
        let mut sections = self.candidates;
        sections.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        sections.truncate(self.max_sections);

        sections
            .into_iter()
            .zip(1u32..)
            .map(|(section, rank)| RankedSection::from_scored(section, rank))
            .collect()
    }
}
