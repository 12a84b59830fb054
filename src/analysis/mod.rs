//! Outline extraction and task-driven section ranking.
//!
//! The stages run in this order for every document:
//!
//! 1. [`max_font_size`] finds the document's reference font size.
//! 2. [`OutlineBuilder`] classifies each line with [`classify`] into a
//!    title and a list of headings.
//! 3. [`Keywords::score`] rates each heading against the job's task.
//! 4. [`SectionRanker`] keeps the relevant headings across documents, and
//!    [`SnippetSelector`] records one page excerpt per retained page.
//!
//! [`Pipeline`] drives the stages over a directory of PDFs.

mod classify;
mod config;
mod outline;
mod pipeline;
mod ranker;
mod relevance;
mod snippet;
mod typography;

pub use classify::classify;
pub use config::{AnalysisConfig, HeadingThresholds, UNKNOWN_TITLE};
pub use outline::OutlineBuilder;
pub use pipeline::{Pipeline, RunState};
pub use ranker::SectionRanker;
pub use relevance::Keywords;
pub use snippet::{first_line, PageTextSource, SnippetSelector};
pub use typography::max_font_size;
