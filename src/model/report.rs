//! Result records written at the end of a ranking run.

use serde::{Deserialize, Serialize};

/// A retained heading together with its raw relevance score.
///
/// This is the pre-ranking form; [`RankedSection`] replaces the score with a
/// dense rank once all documents have been scored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredSection {
    /// Source file name
    pub document: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Heading text
    pub section_title: String,

    /// Keyword overlap score in [0, 1]
    pub score: f64,
}

/// A heading in the final, ranked selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedSection {
    /// Source file name
    pub document: String,

    /// Page number (1-indexed)
    pub page_number: u32,

    /// Heading text
    pub section_title: String,

    /// Dense 1-based rank (1 = most relevant)
    pub importance_rank: u32,
}

impl RankedSection {
    /// Rank a scored section.
    pub fn from_scored(section: ScoredSection, rank: u32) -> Self {
        Self {
            document: section.document,
            page_number: section.page_number,
            section_title: section.section_title,
            importance_rank: rank,
        }
    }
}

/// The first line of a relevant page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubsectionSnippet {
    /// Source file name
    pub document: String,

    /// Excerpt text
    pub refined_text: String,

    /// Page number (1-indexed)
    pub page_number: u32,
}

/// Run metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunMetadata {
    /// File names of every PDF found in the input directory
    pub input_documents: Vec<String>,

    /// Persona role
    pub persona: String,

    /// Job-to-be-done task
    pub job_to_be_done: String,

    /// Local time the run finished, ISO-8601
    pub processing_timestamp: String,
}

/// Complete output of one ranking run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultRecord {
    /// Run metadata
    pub metadata: RunMetadata,

    /// Top sections, best first
    pub extracted_sections: Vec<RankedSection>,

    /// One excerpt per relevant (document, page)
    pub sub_section_analysis: Vec<SubsectionSnippet>,
}
