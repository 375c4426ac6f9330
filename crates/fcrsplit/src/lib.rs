pub mod config;
pub mod document;
pub mod error;
pub mod identifier;
pub mod pipeline;
pub mod processor;
pub mod sanitize;
pub mod segment;
pub mod storage;

pub use config::{load_config, validate_config, Config, OcrEngineKind};
pub use document::{OutputDocument, PdfDocument};
pub use error::{ConfigError, DocumentError, ProcessError, StorageError};
pub use identifier::{Identifier, IdentifierMatcher};
pub use pipeline::{
    Pipeline, PipelineConfig, PipelineError, ProgressEvent, ProgressReporter, ScanReport,
    SplitOutcome,
};
pub use processor::{PageText, PageTextExtractor, TextOrigin};
pub use segment::{segment, PageRange, RangeMap, RangeSegmenter};
pub use storage::{ArchiveBuilder, DocumentSplitter, NamedOutput, OutputWriter};
