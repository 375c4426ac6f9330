use anyhow::Result;
use fcrsplit::pipeline::PipelineError;
use fcrsplit::PdfDocument;
use serde::Serialize;

use crate::cli::ScanArgs;

use super::{
    build_pipeline, print_ranges, read_input, resolve_config, warning_summaries, LogProgress,
    WarningSummary,
};

#[derive(Serialize)]
struct ScanSummary<'a> {
    receipts: Vec<ReceiptRange<'a>>,
    pages: Vec<PageSummary<'a>>,
    warnings: Vec<WarningSummary<'a>>,
}

#[derive(Serialize)]
struct ReceiptRange<'a> {
    identifier: &'a str,
    first_page: usize,
    last_page: usize,
}

#[derive(Serialize)]
struct PageSummary<'a> {
    page: usize,
    origin: fcrsplit::TextOrigin,
    identifier: Option<&'a str>,
}

pub fn run(args: ScanArgs) -> Result<()> {
    let config = resolve_config(&args.engine)?;
    let pipeline = build_pipeline(&config)?;
    let bytes = read_input(&args.input)?;

    let document = PdfDocument::load(&bytes).map_err(PipelineError::from)?;
    let report = pipeline.scan(&document, &LogProgress);

    if args.engine.json {
        let summary = ScanSummary {
            receipts: report
                .ranges
                .iter()
                .map(|(id, range)| ReceiptRange {
                    identifier: id.as_str(),
                    first_page: range.start() + 1,
                    last_page: range.end() + 1,
                })
                .collect(),
            pages: report
                .pages
                .iter()
                .map(|p| PageSummary {
                    page: p.index + 1,
                    origin: p.origin,
                    identifier: p.identifier.as_ref().map(|id| id.as_str()),
                })
                .collect(),
            warnings: warning_summaries(&report.warnings),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else if !report.ranges.is_empty() {
        print_ranges(&report.ranges);
    }

    if report.ranges.is_empty() {
        return Err(PipelineError::NoIdentifiers {
            pages: report.page_count(),
        }
        .into());
    }

    Ok(())
}
