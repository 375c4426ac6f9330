pub mod config;
pub mod error;
pub mod progress;
pub mod report;
pub mod runner;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineWarning};
pub use progress::{CollectingProgress, NoopProgress, ProgressEvent, ProgressReporter};
pub use report::{PageObservation, ScanReport, SplitOutcome};
pub use runner::Pipeline;
