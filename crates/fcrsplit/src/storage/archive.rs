use std::io::{Cursor, Write};

use indexmap::IndexMap;
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::error::StorageError;

use super::splitter::NamedOutput;

/// Packs split outputs into one zip, built entirely in memory so a failure
/// never leaves a partial archive behind.
pub struct ArchiveBuilder {
    options: SimpleFileOptions,
}

impl ArchiveBuilder {
    pub fn new() -> Self {
        Self {
            options: SimpleFileOptions::default(),
        }
    }

    pub fn build(&self, outputs: &[NamedOutput]) -> Result<Vec<u8>, StorageError> {
        let _span = tracing::info_span!("storage.archive", entries = outputs.len()).entered();

        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        for output in dedupe_by_name(outputs) {
            writer.start_file(output.name.as_str(), self.options)?;
            writer
                .write_all(&output.document.bytes)
                .map_err(|e| StorageError::ArchiveEntry {
                    name: output.name.clone(),
                    source: e,
                })?;
        }

        Ok(writer.finish()?.into_inner())
    }
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Colliding names keep the later output, at the earlier one's position.
pub(crate) fn dedupe_by_name(outputs: &[NamedOutput]) -> Vec<&NamedOutput> {
    let mut kept: IndexMap<&str, &NamedOutput> = IndexMap::with_capacity(outputs.len());

    for output in outputs {
        if let Some(replaced) = kept.insert(output.name.as_str(), output) {
            warn!(
                name = %output.name,
                replaced = %replaced.identifier,
                by = %output.identifier,
                "Output name collision; later receipt overwrites earlier"
            );
        }
    }

    kept.into_values().collect()
}
