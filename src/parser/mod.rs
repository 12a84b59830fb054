//! PDF parsing module.

mod backend;
mod layout;
mod options;
mod pdf_parser;

pub use backend::{decode_text_simple, ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
pub use layout::{group_spans_into_lines, LayoutAnalyzer, TextLine, TextSpan};
pub use options::{ErrorMode, ParseOptions};
pub use pdf_parser::PdfParser;
