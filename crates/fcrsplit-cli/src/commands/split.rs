use anyhow::Result;
use fcrsplit::OutputWriter;
use serde::Serialize;
use tracing::info;

use crate::cli::SplitArgs;

use super::{
    build_pipeline, print_ranges, read_input, resolve_config, warning_summaries, LogProgress,
    WarningSummary,
};

#[derive(Serialize)]
struct SplitSummary<'a> {
    receipts: Vec<ReceiptFile<'a>>,
    archive: Option<String>,
    pages: usize,
    ocr_pages: usize,
    warnings: Vec<WarningSummary<'a>>,
}

#[derive(Serialize)]
struct ReceiptFile<'a> {
    identifier: &'a str,
    first_page: usize,
    last_page: usize,
    file: &'a str,
}

pub fn run(args: SplitArgs) -> Result<()> {
    let config = resolve_config(&args.engine)?;
    let pipeline = build_pipeline(&config)?;
    let bytes = read_input(&args.input)?;

    let outcome = pipeline.run(&bytes, &LogProgress)?;

    let writer = OutputWriter::new(&args.output_dir);
    let written = outcome.write_to(&writer, !args.no_archive)?;
    info!(
        files = written.len(),
        output_dir = %args.output_dir.display(),
        "Wrote output files"
    );

    if args.engine.json {
        let summary = SplitSummary {
            receipts: outcome
                .outputs
                .iter()
                .map(|o| ReceiptFile {
                    identifier: o.identifier.as_str(),
                    first_page: o.range.start() + 1,
                    last_page: o.range.end() + 1,
                    file: o.name.as_str(),
                })
                .collect(),
            archive: (!args.no_archive).then(|| outcome.archive_name.clone()),
            pages: outcome.scan.page_count(),
            ocr_pages: outcome.scan.ocr_page_count(),
            warnings: warning_summaries(&outcome.scan.warnings),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_ranges(outcome.ranges());
        if !args.no_archive {
            println!(
                "Archive: {}",
                writer.output_directory().join(&outcome.archive_name).display()
            );
        }
    }

    Ok(())
}
