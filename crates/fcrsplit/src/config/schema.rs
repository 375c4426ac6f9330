use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Executable name looked up on PATH when `renderer_path` is unset, or joined
/// onto it when it points at a directory.
pub const RENDERER_BINARY: &str = "pdftoppm";

pub const OCR_BINARY: &str = "tesseract";

/// Unknown keys are rejected so a misspelt option is not silently ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Poppler `bin` directory, or the `pdftoppm` executable itself.
    #[serde(default)]
    pub renderer_path: Option<PathBuf>,
    /// The `tesseract` executable.
    #[serde(default)]
    pub ocr_engine_path: Option<PathBuf>,
    #[serde(default)]
    pub ocr: OcrConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Config {
    pub fn renderer_command(&self) -> PathBuf {
        match &self.renderer_path {
            Some(path) if path.is_dir() => path.join(RENDERER_BINARY),
            Some(path) => path.clone(),
            None => PathBuf::from(RENDERER_BINARY),
        }
    }

    pub fn ocr_command(&self) -> PathBuf {
        self.ocr_engine_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(OCR_BINARY))
    }

    pub fn with_renderer_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.renderer_path = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn with_ocr_engine_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.ocr_engine_path = Some(path.as_ref().to_path_buf());
        self
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OcrConfig {
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
    #[serde(default = "default_dpi")]
    pub dpi: u32,
    #[serde(default)]
    pub engine: OcrEngineKind,
}

fn default_languages() -> Vec<String> {
    vec!["eng".to_string(), "ara".to_string()]
}

fn default_dpi() -> u32 {
    300
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            languages: default_languages(),
            dpi: default_dpi(),
            engine: OcrEngineKind::default(),
        }
    }
}

impl OcrConfig {
    /// Language set in tesseract's `-l` syntax, e.g. `eng+ara`. Falls back
    /// to `eng` when no language is configured.
    pub fn language_arg(&self) -> String {
        if self.languages.is_empty() {
            return "eng".to_string();
        }
        self.languages.join("+")
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OcrEngineKind {
    /// Spawn the tesseract executable at `ocr_engine_path`.
    #[default]
    Command,
    /// Link libtesseract in-process (requires the `library-ocr` feature).
    Library,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    #[serde(default = "default_archive_name")]
    pub archive_name: String,
}

fn default_archive_name() -> String {
    "extracted_fcrs.zip".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            archive_name: default_archive_name(),
        }
    }
}
