use std::path::PathBuf;

use serde::Serialize;

use crate::error::StorageError;
use crate::identifier::Identifier;
use crate::processor::TextOrigin;
use crate::segment::RangeMap;
use crate::storage::archive::dedupe_by_name;
use crate::storage::{NamedOutput, OutputWriter};

use super::error::PipelineWarning;

/// What was learned about one page during the scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageObservation {
    pub index: usize,
    pub origin: TextOrigin,
    pub identifier: Option<Identifier>,
}

/// Result of extraction + matching + segmentation, before any output exists.
#[derive(Debug, Clone)]
pub struct ScanReport {
    pub pages: Vec<PageObservation>,
    pub ranges: RangeMap,
    pub warnings: Vec<PipelineWarning>,
}

impl ScanReport {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn ocr_page_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|p| p.origin != TextOrigin::TextLayer)
            .count()
    }
}

pub struct SplitOutcome {
    pub scan: ScanReport,
    pub outputs: Vec<NamedOutput>,
    pub archive: Vec<u8>,
    pub archive_name: String,
}

impl SplitOutcome {
    pub fn ranges(&self) -> &RangeMap {
        &self.scan.ranges
    }

    /// File name → PDF bytes, with colliding names resolved to the later
    /// receipt.
    pub fn files(&self) -> Vec<(&str, &[u8])> {
        dedupe_by_name(&self.outputs)
            .into_iter()
            .map(|o| (o.name.as_str(), o.document.bytes.as_slice()))
            .collect()
    }

    pub fn write_to(
        &self,
        writer: &OutputWriter,
        include_archive: bool,
    ) -> Result<Vec<PathBuf>, StorageError> {
        let archive =
            include_archive.then(|| (self.archive_name.as_str(), self.archive.as_slice()));
        writer.write_outputs(&self.outputs, archive)
    }
}
