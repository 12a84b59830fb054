//! Document model types.
//!
//! The PDF layer produces a [`Document`] of pages, visual lines and styled
//! spans; the analysis layer turns it into an [`OutlineResult`] and, across
//! documents, into a [`ResultRecord`]. Nothing here depends on lopdf.

mod document;
mod outline;
mod page;
mod report;

pub use document::Document;
pub use outline::{HeadingLevel, HeadingRecord, OutlineResult};
pub use page::{Line, Page, Span};
pub use report::{RankedSection, ResultRecord, RunMetadata, ScoredSection, SubsectionSnippet};
