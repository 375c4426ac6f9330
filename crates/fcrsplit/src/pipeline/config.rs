use std::path::PathBuf;

use crate::config::{Config, OcrEngineKind};

pub struct PipelineConfig {
    pub renderer_command: PathBuf,
    pub ocr_command: PathBuf,
    pub ocr_engine: OcrEngineKind,
    /// Tesseract `-l` argument, e.g. `eng+ara`.
    pub ocr_languages: String,
    pub ocr_dpi: u32,
    pub archive_name: String,
}

impl PipelineConfig {
    pub fn from_config(config: &Config) -> Self {
        Self {
            renderer_command: config.renderer_command(),
            ocr_command: config.ocr_command(),
            ocr_engine: config.ocr.engine,
            ocr_languages: config.ocr.language_arg(),
            ocr_dpi: config.ocr.dpi,
            archive_name: config.output.archive_name.clone(),
        }
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}
