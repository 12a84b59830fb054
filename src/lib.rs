//! # pdfsift
//!
//! Heading outlines and persona-driven section ranking for PDF collections.
//!
//! Each document's title and H1/H2/H3 headings are inferred from font size
//! relative to the largest font in the document. Headings are then scored
//! against the words of a task description, and the most relevant ones
//! across all documents are ranked together with a short excerpt of the
//! page they appear on.
//!
//! ## Quick Start
//!
//! ```no_run
//! use pdfsift::{analyze_directory, render, JobDescription};
//!
//! fn main() -> pdfsift::Result<()> {
//!     let job = JobDescription::new("Travel Planner", "Plan a trip of 4 days");
//!     let record = analyze_directory("pdfs", &job)?;
//!
//!     render::write_json("output.json", &record, render::JsonFormat::Pretty)?;
//!     Ok(())
//! }
//! ```
//!
//! ## Outline only
//!
//! ```no_run
//! let outline = pdfsift::extract_outline("report.pdf").unwrap();
//! println!("{}", outline.title);
//! for heading in &outline.outline {
//!     println!("{} {} (p. {})", heading.level, heading.text, heading.page);
//! }
//! ```

pub mod analysis;
pub mod detect;
pub mod error;
pub mod job;
pub mod model;
pub mod parser;
pub mod render;

// Re-export commonly used types
pub use analysis::{
    AnalysisConfig, HeadingThresholds, Keywords, OutlineBuilder, PageTextSource, Pipeline,
    RunState, SectionRanker, SnippetSelector,
};
pub use detect::{has_pdf_extension, is_pdf_bytes, list_pdf_files, pdf_version_from_path};
pub use error::{Error, Result};
pub use job::JobDescription;
pub use model::{
    Document, HeadingLevel, HeadingRecord, Line, OutlineResult, Page, RankedSection,
    ResultRecord, RunMetadata, ScoredSection, Span, SubsectionSnippet,
};
pub use parser::{ErrorMode, ParseOptions, PdfParser};
pub use render::JsonFormat;

use std::path::Path;

/// Parse a PDF file and return its page lines.
///
/// # Example
///
/// ```no_run
/// let doc = pdfsift::parse_file("document.pdf").unwrap();
/// println!("Pages: {}", doc.page_count());
/// ```
pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Document> {
    let parser = PdfParser::open(path)?;
    parser.parse()
}

/// Parse a PDF file with custom options.
pub fn parse_file_with_options<P: AsRef<Path>>(path: P, options: ParseOptions) -> Result<Document> {
    let parser = PdfParser::open_with_options(path, options)?;
    parser.parse()
}

/// Extract the title and heading outline of a PDF file.
pub fn extract_outline<P: AsRef<Path>>(path: P) -> Result<OutlineResult> {
    extract_outline_with_config(path, &AnalysisConfig::default(), ParseOptions::default())
}

/// Extract the outline of a PDF file with custom configuration.
pub fn extract_outline_with_config<P: AsRef<Path>>(
    path: P,
    config: &AnalysisConfig,
    options: ParseOptions,
) -> Result<OutlineResult> {
    let doc = parse_file_with_options(path, options)?;
    Ok(OutlineBuilder::new(config).build(&doc))
}

/// Rank the sections of every PDF in `pdf_dir` against `job` with default
/// settings.
pub fn analyze_directory<P: AsRef<Path>>(pdf_dir: P, job: &JobDescription) -> Result<ResultRecord> {
    Pipeline::default().run(pdf_dir, job)
}

/// Read a job description from `json_path` and rank the PDFs in `pdf_dir`.
pub fn run_from_json<P, Q>(json_path: P, pdf_dir: Q) -> Result<ResultRecord>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let job = JobDescription::from_json_file(json_path)?;
    analyze_directory(pdf_dir, &job)
}
