use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Failed to read document: {0}")]
    Document(#[from] crate::error::DocumentError),

    #[error("Failed to set up text extraction: {0}")]
    Setup(#[from] crate::error::ProcessError),

    #[error("No FCR numbers found in the document ({pages} pages scanned)")]
    NoIdentifiers { pages: usize },

    #[error("Storage failed: {0}")]
    Storage(#[from] crate::error::StorageError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineWarning {
    PageExtraction { page: usize, message: String },
}
