//! Directory-level orchestration: outline, score, rank, excerpt.

use std::path::Path;

use super::config::AnalysisConfig;
use super::outline::OutlineBuilder;
use super::ranker::SectionRanker;
use super::relevance::Keywords;
use super::snippet::{PageTextSource, SnippetSelector};
use crate::detect::list_pdf_files;
use crate::error::Result;
use crate::job::JobDescription;
use crate::model::{Document, OutlineResult, ResultRecord, RunMetadata};
use crate::parser::{ParseOptions, PdfParser};

/// Accumulators for one run, shared by every document of that run.
#[derive(Debug, Clone)]
pub struct RunState {
    keywords: Keywords,
    ranker: SectionRanker,
    snippets: SnippetSelector,
}

impl RunState {
    /// Start a run for the given job.
    pub fn new(config: &AnalysisConfig, job: &JobDescription) -> Self {
        Self {
            keywords: job.keywords(),
            ranker: SectionRanker::new(config),
            snippets: SnippetSelector::new(config),
        }
    }

    /// Ranking keywords of this run.
    pub fn keywords(&self) -> &Keywords {
        &self.keywords
    }

    /// Headings retained so far, before ranking.
    pub fn ranker(&self) -> &SectionRanker {
        &self.ranker
    }

    /// Snippet selector of this run.
    pub fn snippets(&self) -> &SnippetSelector {
        &self.snippets
    }

    /// Rank the retained headings and assemble the result record.
    pub fn into_record(self, input_documents: Vec<String>, job: &JobDescription) -> ResultRecord {
        ResultRecord {
            metadata: RunMetadata {
                input_documents,
                persona: job.persona.clone(),
                job_to_be_done: job.task.clone(),
                processing_timestamp: processing_timestamp(),
            },
            extracted_sections: self.ranker.finish(),
            sub_section_analysis: self.snippets.into_snippets(),
        }
    }
}

/// Runs outline extraction and ranking over a directory of PDFs.
#[derive(Debug, Clone, Default)]
pub struct Pipeline {
    config: AnalysisConfig,
    parse_options: ParseOptions,
}

impl Pipeline {
    /// Create a pipeline.
    pub fn new(config: AnalysisConfig, parse_options: ParseOptions) -> Self {
        Self {
            config,
            parse_options,
        }
    }

    /// The analysis configuration.
    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Process every PDF in `pdf_dir` against `job`.
    ///
    /// Documents that fail to open or parse are logged and skipped; they
    /// still appear in `input_documents`. Only an unreadable directory is
    /// an error.
    pub fn run<P: AsRef<Path>>(&self, pdf_dir: P, job: &JobDescription) -> Result<ResultRecord> {
        let pdf_dir = pdf_dir.as_ref();
        let files = list_pdf_files(pdf_dir)?;
        log::info!("Found {} PDF files in {}", files.len(), pdf_dir.display());

        let mut state = RunState::new(&self.config, job);
        for (name, path) in &files {
            if let Err(e) = self.process_file(name, path, &mut state) {
                log::error!("Error processing {}: {}", name, e);
            }
        }

        let names = files.into_iter().map(|(name, _)| name).collect();
        let record = state.into_record(names, job);
        log::info!(
            "Ranked {} sections, {} snippets",
            record.extracted_sections.len(),
            record.sub_section_analysis.len()
        );
        Ok(record)
    }

    /// Open, parse and process a single file.
    fn process_file(&self, name: &str, path: &Path, state: &mut RunState) -> Result<()> {
        let parser = PdfParser::open_with_options(path, self.parse_options.clone())?;
        let doc = parser.parse()?;
        self.process_document(name, &doc, &parser, state);
        Ok(())
    }

    /// Build the outline of one document and feed its headings to the run.
    ///
    /// Every retained heading asks for a snippet of its page, whether or not
    /// it survives the final truncation.
    pub fn process_document(
        &self,
        name: &str,
        doc: &Document,
        source: &dyn PageTextSource,
        state: &mut RunState,
    ) -> OutlineResult {
        let outline = OutlineBuilder::new(&self.config).build(doc);

        let mut retained = 0;
        for heading in &outline.outline {
            let score = state.keywords.score(&heading.text);
            if state.ranker.offer(name, heading, score) {
                retained += 1;
                state.snippets.select(name, heading.page, source);
            }
        }

        log::debug!(
            "{}: {} headings, {} relevant",
            name,
            outline.outline.len(),
            retained
        );
        outline
    }
}

/// Local time with microseconds, without offset.
fn processing_timestamp() -> String {
    chrono::Local::now()
        .format("%Y-%m-%dT%H:%M:%S%.6f")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{Error, Result};
    use crate::model::{Line, Page, Span};

    /// Serves page text from the in-memory document.
    struct InMemory<'a> {
        doc: &'a Document,
        broken_page: Option<u32>,
    }

    impl PageTextSource for InMemory<'_> {
        fn page_count(&self) -> u32 {
            self.doc.page_count()
        }

        fn page_text(&self, page: u32) -> Result<String> {
            if self.broken_page == Some(page) {
                return Err(Error::TextExtract("broken".to_string()));
            }
            self.doc
                .get_page(page)
                .map(Page::plain_text)
                .ok_or(Error::PageOutOfRange(page, self.doc.page_count()))
        }
    }

    fn page(number: u32, lines: &[(&str, f32)]) -> Page {
        Page::with_lines(
            number,
            lines
                .iter()
                .map(|(t, s)| Line::new(vec![Span::new(*t, *s)]))
                .collect(),
        )
    }

    fn guide() -> Document {
        Document::with_pages(vec![
            page(1, &[("Budget Guide", 24.0), ("intro", 10.0)]),
            page(2, &[("Budget Overview", 18.0), ("Budget Tips", 18.0), ("rent", 10.0)]),
            page(3, &[("Conclusion", 18.0)]),
        ])
    }

    #[test]
    fn test_process_document_ranks_and_excerpts() {
        let pipeline = Pipeline::default();
        let job = JobDescription::new("Student", "prepare a budget");
        let mut state = RunState::new(pipeline.config(), &job);
        let doc = guide();
        let source = InMemory {
            doc: &doc,
            broken_page: None,
        };

        let outline = pipeline.process_document("guide.pdf", &doc, &source, &mut state);
        assert_eq!(outline.title, "Budget Guide");
        assert_eq!(outline.outline.len(), 3);

        assert_eq!(state.ranker().len(), 2);
        assert_eq!(state.snippets().snippets().len(), 1);

        let record = state.into_record(vec!["guide.pdf".to_string()], &job);
        let titles: Vec<_> = record
            .extracted_sections
            .iter()
            .map(|s| (s.section_title.as_str(), s.importance_rank))
            .collect();
        assert_eq!(titles, vec![("Budget Overview", 1), ("Budget Tips", 2)]);
        assert_eq!(record.sub_section_analysis[0].refined_text, "Budget Overview");
        assert_eq!(record.metadata.persona, "Student");
        assert_eq!(record.metadata.job_to_be_done, "prepare a budget");
    }

    #[test]
    fn test_broken_page_skipped_other_pages_excerpted() {
        let pipeline = Pipeline::default();
        let job = JobDescription::new("Student", "budget");
        let mut state = RunState::new(pipeline.config(), &job);
        let doc = Document::with_pages(vec![
            page(1, &[("Budget Guide", 24.0), ("intro", 10.0)]),
            page(2, &[("Budget Overview", 18.0), ("rent", 10.0)]),
            page(3, &[("Budget Summary", 18.0), ("totals", 10.0)]),
        ]);
        let source = InMemory {
            doc: &doc,
            broken_page: Some(2),
        };

        pipeline.process_document("guide.pdf", &doc, &source, &mut state);
        assert_eq!(state.ranker().len(), 2);

        let snippets = state.snippets().snippets();
        assert_eq!(snippets.len(), 1);
        assert_eq!(snippets[0].page_number, 3);
        assert_eq!(snippets[0].refined_text, "Budget Summary");
        assert_eq!(snippets[0].document, "guide.pdf");
    }

    #[test]
    fn test_timestamp_format() {
        let ts = processing_timestamp();
        assert!(chrono::NaiveDateTime::parse_from_str(&ts, "%Y-%m-%dT%H:%M:%S%.f").is_ok());
    }
}
