//! Shared helpers: synthesize small text PDFs with lopdf.

#![allow(dead_code)]

use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

const TOP: i64 = 760;
const LINE_GAP: i64 = 40;
const PAGE_HEIGHT: i64 = 842;

/// Builds a PDF whose pages are lists of `(text, font size)` lines.
#[derive(Default)]
pub struct PdfBuilder {
    pages: Vec<Vec<(String, f32)>>,
    flipped: bool,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page; each line is drawn in its own text object.
    pub fn page(mut self, lines: &[(&str, f32)]) -> Self {
        self.pages
            .push(lines.iter().map(|(t, s)| (t.to_string(), *s)).collect());
        self
    }

    /// Draw through a top-down coordinate system (`1 0 0 -1 0 842 cm`),
    /// the way many generators emit pages.
    pub fn flipped(mut self) -> Self {
        self.flipped = true;
        self
    }

    pub fn build(&self) -> Document {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
            "Encoding" => "WinAnsiEncoding",
        });

        let mut kids = Vec::new();
        for lines in &self.pages {
            let mut operations = Vec::new();
            if self.flipped {
                operations.push(Operation::new("q", vec![]));
                operations.push(Operation::new(
                    "cm",
                    vec![1.into(), 0.into(), 0.into(), (-1).into(), 0.into(), PAGE_HEIGHT.into()],
                ));
            }
            for (i, (text, size)) in lines.iter().enumerate() {
                let y = TOP - LINE_GAP * i as i64;
                operations.push(Operation::new("BT", vec![]));
                operations.push(Operation::new("Tf", vec!["F1".into(), Object::Real(*size)]));
                if self.flipped {
                    // Mirror the text back upright, y measured from the top
                    operations.push(Operation::new(
                        "Tm",
                        vec![
                            1.into(),
                            0.into(),
                            0.into(),
                            (-1).into(),
                            72.into(),
                            (PAGE_HEIGHT - y).into(),
                        ],
                    ));
                } else {
                    operations.push(Operation::new("Td", vec![72.into(), y.into()]));
                }
                operations.push(Operation::new("Tj", vec![Object::string_literal(text.as_str())]));
                operations.push(Operation::new("ET", vec![]));
            }
            if self.flipped {
                operations.push(Operation::new("Q", vec![]));
            }
            let content = Content { operations };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => dictionary! {
                    "Font" => dictionary! { "F1" => font_id },
                },
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
            });
            kids.push(Object::Reference(page_id));
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }

    /// Write the PDF to `path`.
    pub fn save(&self, path: &Path) {
        self.build().save(path).unwrap();
    }

    /// Serialize the PDF to memory.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        self.build().save_to(&mut bytes).unwrap();
        bytes
    }
}

/// A file with a valid header that lopdf cannot load.
pub fn write_corrupt_pdf(path: &Path) {
    std::fs::write(path, b"%PDF-1.4\nthis is not a pdf body\n").unwrap();
}
