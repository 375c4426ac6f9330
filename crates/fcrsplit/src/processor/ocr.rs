use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ProcessError;

pub trait TextRecognizer: Send + Sync {
    fn recognize(&self, image_data: &[u8]) -> Result<String, ProcessError>;
}

/// Decodes any supported raster format and re-encodes it as PNG, which both
/// tesseract front ends accept.
pub fn normalize_to_png(image_data: &[u8]) -> Result<Vec<u8>, ProcessError> {
    let img = image::load_from_memory(image_data)
        .map_err(|e| ProcessError::OcrFailed(format!("Failed to load image: {}", e)))?;

    let mut png_data = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)
        .map_err(|e| ProcessError::OcrFailed(format!("Failed to convert image: {}", e)))?;

    Ok(png_data)
}

/// Runs the tesseract executable as a child process.
pub struct TesseractCommand {
    command: PathBuf,
    languages: String,
}

impl TesseractCommand {
    /// `languages` is passed to `-l` as given, see `OcrConfig::language_arg`.
    pub fn new<P: Into<PathBuf>, L: Into<String>>(command: P, languages: L) -> Self {
        Self {
            command: command.into(),
            languages: languages.into(),
        }
    }

    pub fn command(&self) -> &Path {
        &self.command
    }

    pub fn languages(&self) -> &str {
        &self.languages
    }
}

impl TextRecognizer for TesseractCommand {
    fn recognize(&self, image_data: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::debug_span!("processor.ocr", languages = %self.languages).entered();

        let png_data = normalize_to_png(image_data)?;

        let work_dir = tempfile::Builder::new()
            .prefix("fcrsplit-ocr-")
            .tempdir()
            .map_err(ProcessError::Temporary)?;
        let image_path = work_dir.path().join("page.png");
        std::fs::write(&image_path, &png_data).map_err(ProcessError::Temporary)?;

        let output = Command::new(&self.command)
            .arg(&image_path)
            .arg("stdout")
            .arg("-l")
            .arg(&self.languages)
            .output()
            .map_err(|e| {
                ProcessError::OcrFailed(format!(
                    "Failed to run {}: {}. Make sure tesseract is installed.",
                    self.command.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(ProcessError::OcrFailed(format!(
                "tesseract exited with {}: {}",
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// In-process libtesseract through `leptess`.
#[cfg(feature = "library-ocr")]
pub struct LeptessRecognizer {
    data_path: Option<String>,
    languages: String,
}

#[cfg(feature = "library-ocr")]
impl LeptessRecognizer {
    pub fn new<L: Into<String>>(data_path: Option<String>, languages: L) -> Self {
        Self {
            data_path,
            languages: languages.into(),
        }
    }
}

#[cfg(feature = "library-ocr")]
impl TextRecognizer for LeptessRecognizer {
    fn recognize(&self, image_data: &[u8]) -> Result<String, ProcessError> {
        let _span = tracing::debug_span!("processor.ocr", languages = %self.languages).entered();

        let png_data = normalize_to_png(image_data)?;

        let mut lt = leptess::LepTess::new(self.data_path.as_deref(), &self.languages)
            .map_err(|e| {
                ProcessError::OcrFailed(format!("Failed to initialize Tesseract: {}", e))
            })?;

        lt.set_image_from_mem(&png_data)
            .map_err(|e| ProcessError::OcrFailed(format!("Failed to set image for OCR: {}", e)))?;

        lt.get_utf8_text()
            .map_err(|e| ProcessError::OcrFailed(format!("OCR failed: {}", e)))
    }
}
