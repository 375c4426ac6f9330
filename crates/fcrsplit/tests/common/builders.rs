//! Builder for receipt PDFs.
//!
//! Text pages carry a real text layer. Scanned pages carry no content stream;
//! the text a stub OCR engine should "see" is stored in the page dictionary
//! under [`OCR_TEXT_KEY`] and survives page extraction.

#![allow(dead_code)]

use lopdf::{dictionary, Document, Object, Stream};

pub const OCR_TEXT_KEY: &[u8] = b"TestOcrText";

enum PageSpec {
    Text(String),
    Scanned(Option<String>),
}

pub struct PdfBuilder {
    pages: Vec<PageSpec>,
}

impl PdfBuilder {
    pub fn new() -> Self {
        Self { pages: Vec::new() }
    }

    /// A page with a text layer.
    pub fn text_page(mut self, text: &str) -> Self {
        self.pages.push(PageSpec::Text(text.to_string()));
        self
    }

    /// A page without a text layer whose image would OCR to `text`.
    pub fn scanned_page(mut self, text: &str) -> Self {
        self.pages.push(PageSpec::Scanned(Some(text.to_string())));
        self
    }

    /// A page without a text layer and nothing on it.
    pub fn blank_page(mut self) -> Self {
        self.pages.push(PageSpec::Scanned(None));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for spec in &self.pages {
            let mut page = dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
                "Resources" => resources_id,
            };
            match spec {
                PageSpec::Text(text) => {
                    let content = format!("BT /F1 11 Tf 40 780 Td ({}) Tj ET", text);
                    let content_id =
                        doc.add_object(Stream::new(dictionary! {}, content.into_bytes()));
                    page.set("Contents", content_id);
                }
                PageSpec::Scanned(Some(text)) => {
                    page.set(OCR_TEXT_KEY, Object::string_literal(text.as_str()));
                }
                PageSpec::Scanned(None) => {}
            }
            kids.push(doc.add_object(page).into());
        }

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Count" => kids.len() as i64,
                "Kids" => kids,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes).expect("Failed to serialize test PDF");
        bytes
    }
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Page count and per-page text layer of a PDF, for checking split outputs.
pub fn inspect_pdf(bytes: &[u8]) -> (usize, Vec<String>) {
    let doc = Document::load_mem(bytes).expect("Output is not a valid PDF");
    let numbers: Vec<u32> = doc.get_pages().into_keys().collect();
    let texts = numbers
        .iter()
        .map(|n| doc.extract_text(&[*n]).unwrap_or_default())
        .collect();
    (numbers.len(), texts)
}
