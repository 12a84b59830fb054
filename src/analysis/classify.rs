//! Heading level classification by relative font size.

use super::config::HeadingThresholds;
use crate::model::HeadingLevel;

/// Map a font size to a heading level relative to the document's largest font.
///
/// Each tier's lower bound is inclusive, so a size exactly on a threshold
/// belongs to the higher tier. Returns `None` for body text.
pub fn classify(
    font_size: f32,
    max_font: f32,
    thresholds: &HeadingThresholds,
) -> Option<HeadingLevel> {
    if font_size >= max_font * thresholds.h1 {
        Some(HeadingLevel::H1)
    } else if font_size >= max_font * thresholds.h2 {
        Some(HeadingLevel::H2)
    } else if font_size >= max_font * thresholds.h3 {
        Some(HeadingLevel::H3)
    } else {
        None
    }
}
