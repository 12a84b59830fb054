//! Layout analysis for PDF pages.
//!
//! Interprets the graphics and text operators of a page's content stream
//! into positioned spans in default user space, then groups spans sharing a
//! baseline into visual lines.

use crate::error::Result;
use crate::model::{Line, Span};

use super::backend::{ContentOp, PageId, PdfBackend, PdfValue};

/// Default text leading when no `TL` operator was seen.
const DEFAULT_LEADING: f32 = 12.0;

/// `TJ` adjustment (thousandths of an em) treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Advance per character, in ems, when the font has no width table.
const APPROX_CHAR_WIDTH: f32 = 0.5;

/// Horizontal gap between fragments, in ems, read as a word space.
const WORD_GAP_RATIO: f32 = 0.15;

/// Font sizes closer than this are the same size.
const SIZE_EPSILON: f32 = 0.05;

/// A text span with position and style information.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    /// The text content
    pub text: String,
    /// X position (left edge)
    pub x: f32,
    /// Y position (baseline)
    pub y: f32,
    /// Font size in points, text and current transformation matrices applied
    pub font_size: f32,
    /// Advance width in points
    pub width: f32,
}

impl TextSpan {
    /// Create a new text span.
    pub fn new(text: impl Into<String>, x: f32, y: f32, font_size: f32, width: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            font_size,
            width,
        }
    }

    /// Right edge of the span.
    pub fn end_x(&self) -> f32 {
        self.x + self.width
    }

    /// Whether `next` can be merged into this span.
    fn continues_with(&self, next: &TextSpan) -> bool {
        (self.font_size - next.font_size).abs() <= SIZE_EPSILON
    }

    /// Append a fragment that follows on the same line.
    ///
    /// A space goes between the two only when the gap reads as a word break.
    fn append(&mut self, next: TextSpan) {
        let gap = next.x - self.end_x();
        if gap > WORD_GAP_RATIO * self.font_size && needs_space_between(&self.text, &next.text) {
            self.text.push(' ');
        }
        self.text.push_str(&next.text);
        self.width = self.width.max(next.end_x() - self.x);
    }
}

impl From<TextSpan> for Span {
    fn from(span: TextSpan) -> Self {
        Span::new(span.text, span.font_size)
    }
}

/// A text line composed of spans on the same baseline.
#[derive(Debug, Clone)]
pub struct TextLine {
    /// The spans in this line, left to right, adjacent same-size fragments merged
    pub spans: Vec<TextSpan>,
}

impl TextLine {
    /// Create a new text line from spans.
    pub fn from_spans(mut spans: Vec<TextSpan>) -> Self {
        spans.sort_by(|a, b| a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal));

        let mut merged: Vec<TextSpan> = Vec::with_capacity(spans.len());
        for span in spans {
            match merged.last_mut() {
                Some(prev) if prev.continues_with(&span) => prev.append(span),
                _ => merged.push(span),
            }
        }

        Self { spans: merged }
    }
}

impl From<TextLine> for Line {
    fn from(line: TextLine) -> Self {
        Line::new(line.spans.into_iter().map(Span::from).collect())
    }
}

/// Layout analyzer for extracting lines from PDF pages.
pub struct LayoutAnalyzer<'a, B: PdfBackend> {
    backend: &'a B,
}

impl<'a, B: PdfBackend> LayoutAnalyzer<'a, B> {
    /// Create a new layout analyzer.
    pub fn new(backend: &'a B) -> Self {
        Self { backend }
    }

    /// Extract the visual lines of a page (1-indexed), top to bottom.
    pub fn page_lines(&self, page_num: u32) -> Result<Vec<Line>> {
        let spans = self.extract_page_spans(page_num)?;
        Ok(group_spans_into_lines(spans)
            .into_iter()
            .map(Line::from)
            .collect())
    }

    /// Extract text spans from a page with position and font information.
    ///
    /// Positions are in default user space: the current transformation
    /// matrix set by `cm` and saved by `q`/`Q` is applied.
    pub fn extract_page_spans(&self, page_num: u32) -> Result<Vec<TextSpan>> {
        let page_id = self.backend.page_id(page_num)?;
        let content = self.backend.page_content(page_id)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }
        let ops = self.backend.decode_content(&content)?;
        Ok(self.interpret(page_id, &ops))
    }

    /// Run the graphics and text operators of a content stream.
    fn interpret(&self, page_id: PageId, ops: &[ContentOp]) -> Vec<TextSpan> {
        let mut spans = Vec::new();
        let mut ctm = Matrix::IDENTITY;
        let mut state = TextState::default();
        let mut saved: Vec<(Matrix, TextState)> = Vec::new();

        for op in ops {
            match op.operator.as_str() {
                "q" => saved.push((ctm, state.clone())),
                "Q" => match saved.pop() {
                    Some((saved_ctm, saved_state)) => {
                        ctm = saved_ctm;
                        state.restore(saved_state);
                    }
                    None => log::trace!("Unbalanced Q on page {:?}", page_id),
                },
                "cm" => {
                    if let Some(m) = Matrix::from_operands(op) {
                        ctm = m.then(&ctm);
                    }
                }
                "BT" => {
                    state.in_text_block = true;
                    state.set_matrix(Matrix::IDENTITY);
                }
                "ET" => {
                    state.in_text_block = false;
                }
                "Tf" => {
                    if let Some(PdfValue::Name(font_name)) = op.operands.first() {
                        state.font_name = font_name.clone();
                    }
                    state.font_size = op.number(1).unwrap_or(12.0);
                }
                "TL" => {
                    state.leading = op.number(0).unwrap_or(DEFAULT_LEADING);
                }
                "Tc" => {
                    state.char_spacing = op.number(0).unwrap_or(0.0);
                }
                "Tw" => {
                    state.word_spacing = op.number(0).unwrap_or(0.0);
                }
                "Tz" => {
                    state.horizontal_scaling = op.number(0).unwrap_or(100.0) / 100.0;
                }
                "Td" => {
                    let tx = op.number(0).unwrap_or(0.0);
                    let ty = op.number(1).unwrap_or(0.0);
                    state.move_line(tx, ty);
                }
                "TD" => {
                    let tx = op.number(0).unwrap_or(0.0);
                    let ty = op.number(1).unwrap_or(0.0);
                    state.leading = -ty;
                    state.move_line(tx, ty);
                }
                "Tm" => {
                    if let Some(m) = Matrix::from_operands(op) {
                        state.set_matrix(m);
                    }
                }
                "T*" => {
                    state.next_line();
                }
                "Tj" => {
                    if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                        self.show(page_id, &ctm, &mut state, bytes, &mut spans);
                    }
                }
                "TJ" => {
                    if let Some(PdfValue::Array(items)) = op.operands.first() {
                        self.show_array(page_id, &ctm, &mut state, items, &mut spans);
                    }
                }
                "'" => {
                    state.next_line();
                    if let Some(PdfValue::Str(bytes)) = op.operands.first() {
                        self.show(page_id, &ctm, &mut state, bytes, &mut spans);
                    }
                }
                "\"" => {
                    state.word_spacing = op.number(0).unwrap_or(state.word_spacing);
                    state.char_spacing = op.number(1).unwrap_or(state.char_spacing);
                    state.next_line();
                    if let Some(PdfValue::Str(bytes)) = op.operands.get(2) {
                        self.show(page_id, &ctm, &mut state, bytes, &mut spans);
                    }
                }
                _ => {}
            }
        }

        spans
    }

    fn decode(&self, page_id: PageId, state: &TextState, bytes: &[u8]) -> String {
        self.backend.decode_text(page_id, &state.font_name, bytes)
    }

    /// Advance of a shown string in unscaled text space units.
    fn advance(&self, page_id: PageId, state: &TextState, text: &str, bytes: &[u8]) -> f32 {
        let glyphs = self
            .backend
            .text_width(page_id, &state.font_name, bytes)
            .map(|w| w / 1000.0 * state.font_size)
            .unwrap_or_else(|| text.chars().count() as f32 * APPROX_CHAR_WIDTH * state.font_size);
        glyphs + state.spacing(text)
    }

    /// Show a `Tj` string.
    fn show(
        &self,
        page_id: PageId,
        ctm: &Matrix,
        state: &mut TextState,
        bytes: &[u8],
        spans: &mut Vec<TextSpan>,
    ) {
        let text = self.decode(page_id, state, bytes);
        let advance = self.advance(page_id, state, &text, bytes) * state.horizontal_scaling;
        state.emit(text, advance, ctm, spans);
    }

    /// Show a `TJ` array, turning large negative adjustments into spaces.
    fn show_array(
        &self,
        page_id: PageId,
        ctm: &Matrix,
        state: &mut TextState,
        items: &[PdfValue],
        spans: &mut Vec<TextSpan>,
    ) {
        let mut combined = String::new();
        let mut advance = 0.0;

        for item in items {
            match item {
                PdfValue::Str(bytes) => {
                    let text = self.decode(page_id, state, bytes);
                    advance += self.advance(page_id, state, &text, bytes);
                    combined.push_str(&text);
                }
                other => {
                    let Some(n) = other.as_number() else {
                        continue;
                    };
                    // Negative values advance the pen to the right.
                    if -n > TJ_SPACE_THRESHOLD && needs_space_after(&combined) {
                        combined.push(' ');
                    }
                    advance -= n / 1000.0 * state.font_size;
                }
            }
        }

        let advance = advance * state.horizontal_scaling;
        state.emit(combined, advance, ctm, spans);
    }
}

/// Text-related part of the graphics state.
#[derive(Debug, Clone)]
struct TextState {
    in_text_block: bool,
    font_name: Vec<u8>,
    font_size: f32,
    leading: f32,
    char_spacing: f32,
    word_spacing: f32,
    horizontal_scaling: f32,
    text_matrix: Matrix,
    line_matrix: Matrix,
}

impl Default for TextState {
    fn default() -> Self {
        Self {
            in_text_block: false,
            font_name: Vec::new(),
            font_size: 12.0,
            leading: DEFAULT_LEADING,
            char_spacing: 0.0,
            word_spacing: 0.0,
            horizontal_scaling: 1.0,
            text_matrix: Matrix::IDENTITY,
            line_matrix: Matrix::IDENTITY,
        }
    }
}

impl TextState {
    /// Take back the parameters saved by `q`.
    ///
    /// Text object state (matrices, `BT` nesting) is not part of the saved
    /// graphics state and stays as it is.
    fn restore(&mut self, saved: TextState) {
        *self = TextState {
            in_text_block: self.in_text_block,
            text_matrix: self.text_matrix,
            line_matrix: self.line_matrix,
            ..saved
        };
    }

    fn set_matrix(&mut self, m: Matrix) {
        self.text_matrix = m;
        self.line_matrix = m;
    }

    /// Start a new line offset from the start of the current one.
    fn move_line(&mut self, tx: f32, ty: f32) {
        self.set_matrix(Matrix::translation(tx, ty).then(&self.line_matrix));
    }

    fn next_line(&mut self) {
        self.move_line(0.0, -self.leading);
    }

    /// Extra advance from `Tc` and `Tw` for the characters of `text`.
    fn spacing(&self, text: &str) -> f32 {
        let chars = text.chars().count() as f32;
        let spaces = text.chars().filter(|&c| c == ' ').count() as f32;
        chars * self.char_spacing + spaces * self.word_spacing
    }

    /// Record shown text as a span and move the pen past it.
    ///
    /// `advance` is in text space, horizontal scaling included.
    fn emit(&mut self, text: String, advance: f32, ctm: &Matrix, spans: &mut Vec<TextSpan>) {
        if self.in_text_block && !text.trim().is_empty() {
            let rendering = self.text_matrix.then(ctm);
            let (x, y) = rendering.apply(0.0, 0.0);
            let size = self.font_size * rendering.vertical_scale();
            let width = advance * rendering.horizontal_scale();
            spans.push(TextSpan::new(text, x, y, size, width));
        }
        self.text_matrix = Matrix::translation(advance, 0.0).then(&self.text_matrix);
    }
}

/// Affine transform `[a b c d e f]`, applied to row vectors as PDF does.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Matrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
}

impl Matrix {
    const IDENTITY: Matrix = Matrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    fn translation(tx: f32, ty: f32) -> Self {
        Self {
            e: tx,
            f: ty,
            ..Self::IDENTITY
        }
    }

    /// Six numeric operands of `cm` or `Tm`.
    fn from_operands(op: &ContentOp) -> Option<Self> {
        Some(Self {
            a: op.number(0)?,
            b: op.number(1)?,
            c: op.number(2)?,
            d: op.number(3)?,
            e: op.number(4)?,
            f: op.number(5)?,
        })
    }

    /// `self × other`: apply `self` first, then `other`.
    fn then(&self, other: &Matrix) -> Matrix {
        Matrix {
            a: self.a * other.a + self.b * other.c,
            b: self.a * other.b + self.b * other.d,
            c: self.c * other.a + self.d * other.c,
            d: self.c * other.b + self.d * other.d,
            e: self.e * other.a + self.f * other.c + other.e,
            f: self.e * other.b + self.f * other.d + other.f,
        }
    }

    fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Length of the transformed unit vertical vector.
    fn vertical_scale(&self) -> f32 {
        (self.c * self.c + self.d * self.d).sqrt()
    }

    /// Length of the transformed unit horizontal vector.
    fn horizontal_scale(&self) -> f32 {
        (self.a * self.a + self.b * self.b).sqrt()
    }
}

/// Group spans into lines by baseline, top to bottom, left to right.
pub fn group_spans_into_lines(mut spans: Vec<TextSpan>) -> Vec<TextLine> {
    if spans.is_empty() {
        return vec![];
    }

    // Default user space Y grows upwards
    spans.sort_by(|a, b| {
        b.y.partial_cmp(&a.y)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then(a.x.partial_cmp(&b.x).unwrap_or(std::cmp::Ordering::Equal))
    });

    let mut lines: Vec<TextLine> = Vec::new();
    let mut current: Vec<TextSpan> = Vec::new();
    let mut current_y: Option<f32> = None;

    for span in spans {
        let tolerance = span.font_size * 0.3;
        match current_y {
            Some(y) if (span.y - y).abs() <= tolerance => current.push(span),
            _ => {
                if !current.is_empty() {
                    lines.push(TextLine::from_spans(std::mem::take(&mut current)));
                }
                current_y = Some(span.y);
                current.push(span);
            }
        }
    }

    if !current.is_empty() {
        lines.push(TextLine::from_spans(current));
    }

    log::trace!("Grouped spans into {} lines", lines.len());
    lines
}

/// Whether two fragments separated by a word gap should get a space.
fn needs_space_between(prev: &str, next: &str) -> bool {
    needs_space_after(prev) && next.chars().next().is_some_and(|c| !c.is_whitespace())
}

/// Whether a word-break adjustment after `text` should become a space.
fn needs_space_after(text: &str) -> bool {
    match text.chars().last() {
        Some(c) => !c.is_whitespace() && c != '\u{00A0}' && !is_spaceless_script_char(c),
        None => false,
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and Extension A
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    // Extensions B-F
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana and Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
