//! Test harness for isolated pipeline runs.
//!
//! The real renderer and OCR engine are replaced with stubs that read the
//! text stored on scanned pages by `PdfBuilder`, so no external tools are
//! needed.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use tempfile::TempDir;

use fcrsplit::error::ProcessError;
use fcrsplit::pipeline::{CollectingProgress, PipelineConfig};
use fcrsplit::processor::{PageRenderer, TextRecognizer};
use fcrsplit::{
    IdentifierMatcher, OutputWriter, PageTextExtractor, Pipeline, PipelineError, SplitOutcome,
};

use super::builders::OCR_TEXT_KEY;

const IMAGE_PREFIX: &[u8] = b"stub-image:";

/// "Renders" a single-page PDF by reading the OCR text stored on its page.
struct DictionaryRenderer {
    fail: bool,
}

impl PageRenderer for DictionaryRenderer {
    fn render(&self, pdf_path: &Path, _dpi: u32, _work_dir: &Path) -> Result<Vec<u8>, ProcessError> {
        if self.fail {
            return Err(ProcessError::Render("renderer not installed".to_string()));
        }

        let doc = lopdf::Document::load(pdf_path).map_err(|e| ProcessError::Render(e.to_string()))?;
        let pages = doc.get_pages();
        if pages.len() != 1 {
            return Err(ProcessError::Render(format!(
                "expected a single-page PDF, got {} pages",
                pages.len()
            )));
        }

        let page_id = pages.values().next().copied().unwrap();
        let text = doc
            .get_dictionary(page_id)
            .ok()
            .and_then(|dict| dict.get(OCR_TEXT_KEY).ok())
            .and_then(|obj| obj.as_str().ok())
            .map(|bytes| bytes.to_vec())
            .unwrap_or_default();

        let mut image = IMAGE_PREFIX.to_vec();
        image.extend_from_slice(&text);
        Ok(image)
    }
}

/// Decodes stub images and counts how often OCR ran.
pub struct CountingRecognizer {
    pub calls: Arc<AtomicUsize>,
}

impl TextRecognizer for CountingRecognizer {
    fn recognize(&self, image_data: &[u8]) -> Result<String, ProcessError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let text = image_data
            .strip_prefix(IMAGE_PREFIX)
            .ok_or_else(|| ProcessError::OcrFailed("not a stub image".to_string()))?;
        Ok(String::from_utf8_lossy(text).into_owned())
    }
}

pub struct TestHarness {
    temp_dir: TempDir,
    pub output_dir: PathBuf,
    pub ocr_calls: Arc<AtomicUsize>,
    pub progress: CollectingProgress,
    fail_render: bool,
}

impl TestHarness {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let output_dir = temp_dir.path().join("output");
        Self {
            temp_dir,
            output_dir,
            ocr_calls: Arc::new(AtomicUsize::new(0)),
            progress: CollectingProgress::new(),
            fail_render: false,
        }
    }

    /// Every render attempt fails, as when the renderer is missing.
    pub fn with_failing_renderer() -> Self {
        Self {
            fail_render: true,
            ..Self::new()
        }
    }

    pub fn temp_path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn pipeline(&self) -> Pipeline {
        let extractor = PageTextExtractor::new(
            Box::new(DictionaryRenderer {
                fail: self.fail_render,
            }),
            Box::new(CountingRecognizer {
                calls: Arc::clone(&self.ocr_calls),
            }),
            300,
        );
        Pipeline::new(
            Arc::new(PipelineConfig::default()),
            extractor,
            IdentifierMatcher::new(),
        )
    }

    pub fn run(&self, pdf: &[u8]) -> Result<SplitOutcome, PipelineError> {
        self.pipeline().run(pdf, &self.progress)
    }

    /// Runs the pipeline and writes everything into `output_dir`.
    pub fn run_and_write(&self, pdf: &[u8]) -> Result<(SplitOutcome, Vec<PathBuf>), PipelineError> {
        let outcome = self.run(pdf)?;
        let written = outcome.write_to(&OutputWriter::new(&self.output_dir), true)?;
        Ok((outcome, written))
    }

    pub fn ocr_call_count(&self) -> usize {
        self.ocr_calls.load(Ordering::SeqCst)
    }

    /// Sorted file names in the output directory.
    pub fn output_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.output_dir)
            .map(|entries| {
                entries
                    .filter_map(|e| e.ok())
                    .map(|e| e.file_name().to_string_lossy().into_owned())
                    .collect()
            })
            .unwrap_or_default();
        names.sort();
        names
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}
