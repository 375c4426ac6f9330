use std::sync::Arc;

use tracing::{debug, info, info_span, warn};

use crate::document::PdfDocument;
use crate::identifier::IdentifierMatcher;
use crate::processor::PageTextExtractor;
use crate::segment::RangeSegmenter;
use crate::storage::{ArchiveBuilder, DocumentSplitter};

use super::config::PipelineConfig;
use super::error::{PipelineError, PipelineWarning};
use super::progress::{ProgressEvent, ProgressReporter};
use super::report::{PageObservation, ScanReport, SplitOutcome};

pub struct Pipeline {
    config: Arc<PipelineConfig>,
    extractor: PageTextExtractor,
    matcher: IdentifierMatcher,
    splitter: DocumentSplitter,
    archiver: ArchiveBuilder,
}

impl Pipeline {
    /// Builds every sub-component from config.
    pub fn from_config(config: Arc<PipelineConfig>) -> Result<Self, PipelineError> {
        let extractor = PageTextExtractor::from_config(&config)?;
        Ok(Self::new(config, extractor, IdentifierMatcher::new()))
    }

    /// Inject a specific extractor and matcher.
    pub fn new(
        config: Arc<PipelineConfig>,
        extractor: PageTextExtractor,
        matcher: IdentifierMatcher,
    ) -> Self {
        Self {
            config,
            extractor,
            matcher,
            splitter: DocumentSplitter::new(),
            archiver: ArchiveBuilder::new(),
        }
    }

    /// Extract, match and segment every page in order. Page-level failures
    /// are reported and recorded as warnings; they never stop the scan.
    pub fn scan(&self, document: &PdfDocument, progress: &dyn ProgressReporter) -> ScanReport {
        let total = document.page_count();
        let mut segmenter = RangeSegmenter::new();
        let mut pages = Vec::with_capacity(total);
        let mut warnings = Vec::new();

        for page in document.pages() {
            let index = page.index();
            let text = page.text_or_extract(|| self.extractor.extract(document, index));

            if let Some(message) = &text.diagnostic {
                progress.report(ProgressEvent::PageDiagnostic {
                    index,
                    message: message.clone(),
                });
                warnings.push(PipelineWarning::PageExtraction {
                    page: index,
                    message: message.clone(),
                });
            }

            let identifier = if text.is_blank() {
                None
            } else {
                self.matcher.find(&text.text)
            };
            debug!(page = index, origin = ?text.origin, identifier = ?identifier, "Scanned page");

            segmenter.observe(index, identifier.as_ref());

            progress.report(ProgressEvent::PageScanned {
                index,
                total,
                origin: text.origin,
                identifier: identifier.clone(),
            });
            pages.push(PageObservation {
                index,
                origin: text.origin,
                identifier,
            });
        }

        let ranges = segmenter.finish();
        progress.report(ProgressEvent::RangesResolved {
            count: ranges.len(),
        });

        ScanReport {
            pages,
            ranges,
            warnings,
        }
    }

    /// Run the full pipeline for one PDF held in memory.
    pub fn run(
        &self,
        pdf_bytes: &[u8],
        progress: &dyn ProgressReporter,
    ) -> Result<SplitOutcome, PipelineError> {
        let run_id = uuid::Uuid::new_v4();
        let _pipeline_span = info_span!("pipeline", run_id = %run_id, bytes = pdf_bytes.len()).entered();

        let result = self.run_steps(pdf_bytes, progress);
        match &result {
            Ok(outcome) => progress.report(ProgressEvent::Completed {
                outputs: outcome.outputs.len(),
            }),
            Err(e) => progress.report(ProgressEvent::Failed {
                error: e.to_string(),
            }),
        }
        result
    }

    fn run_steps(
        &self,
        pdf_bytes: &[u8],
        progress: &dyn ProgressReporter,
    ) -> Result<SplitOutcome, PipelineError> {
        // Step 1: Load document
        let document = {
            let _step = info_span!("load_document").entered();
            PdfDocument::load(pdf_bytes)?
        };

        // Step 2: Extract text, match identifiers, segment
        let scan = {
            let _step = info_span!("scan_pages", pages = document.page_count()).entered();
            self.scan(&document, progress)
        };

        if scan.ranges.is_empty() {
            warn!(pages = scan.page_count(), "No FCR numbers found in the document");
            return Err(PipelineError::NoIdentifiers {
                pages: scan.page_count(),
            });
        }

        info!(
            receipts = scan.ranges.len(),
            pages = scan.page_count(),
            ocr_pages = scan.ocr_page_count(),
            "Found FCR receipts in the document"
        );

        // Step 3: Split
        let outputs = {
            let _step = info_span!("split").entered();
            self.splitter.split(&document, &scan.ranges)?
        };

        // Step 4: Archive
        let archive = {
            let _step = info_span!("archive").entered();
            self.archiver.build(&outputs)?
        };

        Ok(SplitOutcome {
            scan,
            outputs,
            archive,
            archive_name: self.config.archive_name.clone(),
        })
    }
}
