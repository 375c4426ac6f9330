use tracing::debug;

use crate::document::{OutputDocument, PdfDocument};
use crate::error::DocumentError;
use crate::identifier::Identifier;
use crate::sanitize;
use crate::segment::{PageRange, RangeMap};

pub const OUTPUT_EXTENSION: &str = "pdf";

#[derive(Debug, Clone)]
pub struct NamedOutput {
    /// File name including extension, e.g. `FCR_12345.pdf`.
    pub name: String,
    pub identifier: Identifier,
    pub range: PageRange,
    pub document: OutputDocument,
}

pub struct DocumentSplitter;

impl DocumentSplitter {
    pub fn new() -> Self {
        Self
    }

    /// One output per range, in range-map order.
    pub fn split(
        &self,
        document: &PdfDocument,
        ranges: &RangeMap,
    ) -> Result<Vec<NamedOutput>, DocumentError> {
        let _span = tracing::info_span!("storage.split", ranges = ranges.len()).entered();

        ranges
            .iter()
            .map(|(identifier, range)| {
                let name = format!("{}.{}", sanitize::output_stem(identifier), OUTPUT_EXTENSION);
                let output = document.extract_pages(range)?;
                debug!(name = %name, %range, "Split output");
                Ok(NamedOutput {
                    name,
                    identifier: identifier.clone(),
                    range,
                    document: output,
                })
            })
            .collect()
    }
}

impl Default for DocumentSplitter {
    fn default() -> Self {
        Self::new()
    }
}
