//! Document-wide font statistics.

use crate::model::Document;

/// Largest font size among spans with visible text.
///
/// Returns `fallback` when the document has no visible text at all.
pub fn max_font_size(doc: &Document, fallback: f32) -> f32 {
    doc.spans()
        .filter(|(_, span)| !span.is_blank())
        .map(|(_, span)| span.font_size)
        .fold(None, |max: Option<f32>, size| match max {
            Some(m) if m >= size => Some(m),
            _ => Some(size),
        })
        .unwrap_or(fallback)
}
