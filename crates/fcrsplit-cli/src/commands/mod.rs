pub mod scan;
pub mod split;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use fcrsplit::pipeline::PipelineWarning;
use fcrsplit::sanitize::redact_path;
use fcrsplit::{load_config, validate_config, Config, Pipeline, PipelineConfig, RangeMap};
use fcrsplit::{ProgressEvent, ProgressReporter};
use serde::Serialize;

use crate::cli::EngineArgs;

const CONFIG_DIR_NAME: &str = "fcrsplit";
const CONFIG_FILE_NAMES: [&str; 3] = ["config.json", "config.yaml", "config.yml"];

/// Explicit `--config`, else the first config file found in the user config
/// directory, else built-in defaults. CLI path overrides are applied last.
pub fn resolve_config(args: &EngineArgs) -> Result<Config> {
    let mut config = match config_path(args) {
        Some(path) => {
            log::info!("Loading config from {}", path.display());
            load_config(&path).with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => Config::default(),
    };

    if let Some(path) = &args.renderer_path {
        config = config.with_renderer_path(path);
    }
    if let Some(path) = &args.ocr_engine_path {
        config = config.with_ocr_engine_path(path);
    }

    validate_config(&config)?;
    Ok(config)
}

fn config_path(args: &EngineArgs) -> Option<PathBuf> {
    if let Some(path) = &args.config {
        return Some(path.clone());
    }

    let dir = dirs::config_dir()?.join(CONFIG_DIR_NAME);
    CONFIG_FILE_NAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let pipeline_config = Arc::new(PipelineConfig::from_config(config));
    Ok(Pipeline::from_config(pipeline_config)?)
}

pub fn read_input(path: &Path) -> Result<Vec<u8>> {
    let _span = tracing::info_span!("read_input", file = %redact_path(path)).entered();
    std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))
}

pub fn print_ranges(ranges: &RangeMap) {
    println!("Found {} FCR receipts in the document", ranges.len());
    for (identifier, range) in ranges {
        println!("- {}: {}", identifier, range);
    }
}

#[derive(Serialize)]
pub struct WarningSummary<'a> {
    pub page: usize,
    pub message: &'a str,
}

pub fn warning_summaries(warnings: &[PipelineWarning]) -> Vec<WarningSummary<'_>> {
    warnings
        .iter()
        .map(|w| match w {
            PipelineWarning::PageExtraction { page, message } => WarningSummary {
                page: page + 1,
                message: message.as_str(),
            },
        })
        .collect()
}

/// Forwards pipeline events into the log.
pub struct LogProgress;

impl ProgressReporter for LogProgress {
    fn report(&self, event: ProgressEvent) {
        match event {
            ProgressEvent::PageScanned {
                index,
                total,
                identifier,
                ..
            } => match identifier {
                Some(id) => log::info!("Page {}/{}: FCR {}", index + 1, total, id),
                None => log::debug!("Page {}/{}: no FCR number", index + 1, total),
            },
            ProgressEvent::PageDiagnostic { message, .. } => log::warn!("{}", message),
            ProgressEvent::RangesResolved { count } => log::debug!("Resolved {} ranges", count),
            ProgressEvent::Completed { outputs } => log::debug!("Built {} outputs", outputs),
            ProgressEvent::Failed { error } => log::debug!("Run failed: {}", error),
        }
    }
}
