pub mod ocr;
pub mod render;

use serde::Serialize;
use tracing::{debug, info_span, warn};

use crate::config::OcrEngineKind;
use crate::document::PdfDocument;
use crate::error::{DocumentError, ProcessError};
use crate::pipeline::PipelineConfig;
use crate::segment::PageRange;

pub use ocr::{TesseractCommand, TextRecognizer};
pub use render::{PageRenderer, PdftoppmRenderer};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TextOrigin {
    TextLayer,
    Ocr,
    /// OCR was needed but failed; text is empty.
    Unavailable,
}

/// Best-effort text of one page. Extraction failures land in `diagnostic`
/// instead of propagating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageText {
    pub text: String,
    pub origin: TextOrigin,
    pub diagnostic: Option<String>,
}

impl PageText {
    pub fn from_text_layer(text: String) -> Self {
        Self {
            text,
            origin: TextOrigin::TextLayer,
            diagnostic: None,
        }
    }

    pub fn from_ocr(text: String) -> Self {
        Self {
            text,
            origin: TextOrigin::Ocr,
            diagnostic: None,
        }
    }

    pub fn unavailable(diagnostic: String) -> Self {
        Self {
            text: String::new(),
            origin: TextOrigin::Unavailable,
            diagnostic: Some(diagnostic),
        }
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// What the extractor needs from a document.
pub trait PageSource {
    fn direct_text(&self, index: usize) -> Result<String, DocumentError>;
    fn single_page_pdf(&self, index: usize) -> Result<Vec<u8>, DocumentError>;
}

impl PageSource for PdfDocument {
    fn direct_text(&self, index: usize) -> Result<String, DocumentError> {
        PdfDocument::direct_text(self, index)
    }

    fn single_page_pdf(&self, index: usize) -> Result<Vec<u8>, DocumentError> {
        self.extract_pages(PageRange::single(index))
            .map(|output| output.bytes)
    }
}

pub struct PageTextExtractor {
    renderer: Box<dyn PageRenderer>,
    recognizer: Box<dyn TextRecognizer>,
    dpi: u32,
}

impl PageTextExtractor {
    pub fn new(
        renderer: Box<dyn PageRenderer>,
        recognizer: Box<dyn TextRecognizer>,
        dpi: u32,
    ) -> Self {
        Self {
            renderer,
            recognizer,
            dpi,
        }
    }

    pub fn from_config(config: &PipelineConfig) -> Result<Self, ProcessError> {
        let renderer = Box::new(PdftoppmRenderer::new(config.renderer_command.clone()));

        let recognizer: Box<dyn TextRecognizer> = match config.ocr_engine {
            OcrEngineKind::Command => Box::new(TesseractCommand::new(
                config.ocr_command.clone(),
                config.ocr_languages.clone(),
            )),
            #[cfg(feature = "library-ocr")]
            OcrEngineKind::Library => Box::new(ocr::LeptessRecognizer::new(
                None,
                config.ocr_languages.clone(),
            )),
            #[cfg(not(feature = "library-ocr"))]
            OcrEngineKind::Library => {
                return Err(ProcessError::EngineUnavailable(
                    "the library OCR engine requires building with the `library-ocr` feature"
                        .to_string(),
                ))
            }
        };

        Ok(Self::new(renderer, recognizer, config.ocr_dpi))
    }

    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Text layer first; OCR of the rasterized page only when the text layer
    /// is blank. Never fails: OCR errors come back as a diagnostic.
    pub fn extract(&self, source: &dyn PageSource, index: usize) -> PageText {
        let _span = info_span!("processor.page", page = index).entered();

        match source.direct_text(index) {
            Ok(text) if !text.trim().is_empty() => return PageText::from_text_layer(text),
            Ok(_) => debug!("Text layer empty, falling back to OCR"),
            Err(e) => debug!(error = %e, "Text layer unreadable, falling back to OCR"),
        }

        let _ocr_span = info_span!("processor.ocr_fallback", dpi = self.dpi).entered();
        match self.ocr_page(source, index) {
            Ok(text) => PageText::from_ocr(text),
            Err(e) => {
                let diagnostic = format!("Error extracting text from page {}: {}", index + 1, e);
                warn!("{}", diagnostic);
                PageText::unavailable(diagnostic)
            }
        }
    }

    fn ocr_page(&self, source: &dyn PageSource, index: usize) -> Result<String, ProcessError> {
        let pdf_bytes = source.single_page_pdf(index)?;

        // Dropped (and deleted) when this function returns
        let work_dir = tempfile::Builder::new()
            .prefix("fcrsplit-page-")
            .tempdir()
            .map_err(ProcessError::Temporary)?;
        let pdf_path = work_dir.path().join("page.pdf");
        std::fs::write(&pdf_path, &pdf_bytes).map_err(ProcessError::Temporary)?;

        let image = self.renderer.render(&pdf_path, self.dpi, work_dir.path())?;
        self.recognizer.recognize(&image)
    }
}
