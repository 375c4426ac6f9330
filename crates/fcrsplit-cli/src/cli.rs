use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "fcrsplit",
    version,
    about = "Split a multi-receipt PDF into one file per FCR number"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write one PDF per receipt plus a zip of all of them.
    Split(SplitArgs),
    /// Detect receipt ranges without writing anything.
    Scan(ScanArgs),
}

#[derive(Args, Debug, Clone)]
pub struct EngineArgs {
    /// JSON or YAML config file. Defaults to the user config directory.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Poppler `bin` directory or the `pdftoppm` executable.
    #[arg(long)]
    pub renderer_path: Option<PathBuf>,

    /// The `tesseract` executable.
    #[arg(long)]
    pub ocr_engine_path: Option<PathBuf>,

    /// Print a JSON summary to stdout instead of text.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

#[derive(Args, Debug, Clone)]
pub struct SplitArgs {
    pub input: PathBuf,

    #[arg(long = "out", short = 'o')]
    pub output_dir: PathBuf,

    /// Skip writing the zip archive next to the PDFs.
    #[arg(long, default_value_t = false)]
    pub no_archive: bool,

    #[command(flatten)]
    pub engine: EngineArgs,
}

#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    pub input: PathBuf,

    #[command(flatten)]
    pub engine: EngineArgs,
}
