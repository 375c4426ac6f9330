use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::ProcessError;

pub trait PageRenderer: Send + Sync {
    /// Renders page 1 of the single-page PDF at `pdf_path` and returns the
    /// encoded image. Scratch files go in `work_dir`.
    fn render(&self, pdf_path: &Path, dpi: u32, work_dir: &Path) -> Result<Vec<u8>, ProcessError>;
}

/// Rasterizes through poppler's `pdftoppm`.
pub struct PdftoppmRenderer {
    command: PathBuf,
}

impl PdftoppmRenderer {
    pub fn new<P: Into<PathBuf>>(command: P) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &Path {
        &self.command
    }
}

impl PageRenderer for PdftoppmRenderer {
    fn render(&self, pdf_path: &Path, dpi: u32, work_dir: &Path) -> Result<Vec<u8>, ProcessError> {
        let _span = tracing::debug_span!("processor.render", dpi).entered();

        let output_prefix = work_dir.join("page");

        // -singlefile drops pdftoppm's page-number suffix: output is <prefix>.png
        let output = Command::new(&self.command)
            .arg("-png")
            .arg("-r")
            .arg(dpi.to_string())
            .args(["-f", "1", "-l", "1", "-singlefile"])
            .arg(pdf_path)
            .arg(&output_prefix)
            .output()
            .map_err(|e| {
                ProcessError::Render(format!(
                    "Failed to run {}: {}. Make sure poppler-utils is installed.",
                    self.command.display(),
                    e
                ))
            })?;

        if !output.status.success() {
            return Err(ProcessError::Render(format!(
                "pdftoppm failed: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let image_path = output_prefix.with_extension("png");
        std::fs::read(&image_path).map_err(|e| {
            ProcessError::Render(format!("Failed to read rendered image: {}", e))
        })
    }
}
