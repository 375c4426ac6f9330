use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config JSON: {0}")]
    ParseJson(#[from] serde_json::Error),

    #[error("Failed to parse config YAML: {0}")]
    ParseYaml(#[from] serde_yaml::Error),

    #[error("Config validation failed: {message}")]
    Validation { message: String },
}

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to parse PDF: {0}")]
    Parse(#[source] lopdf::Error),

    #[error("PDF is encrypted")]
    Encrypted,

    #[error("Page {index} is out of range (document has {count} pages)")]
    PageOutOfRange { index: usize, count: usize },

    #[error("Failed to extract text from page {index}: {source}")]
    TextLayer {
        index: usize,
        #[source]
        source: lopdf::Error,
    },

    #[error("Failed to serialize PDF: {0}")]
    Serialize(String),
}

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to render page: {0}")]
    Render(String),

    #[error("OCR failed: {0}")]
    OcrFailed(String),

    #[error("OCR engine unavailable: {0}")]
    EngineUnavailable(String),

    #[error("Failed to prepare page temporaries: {0}")]
    Temporary(#[source] std::io::Error),

    #[error(transparent)]
    Document(#[from] DocumentError),
}

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to create directory '{path}': {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write file '{path}': {source}")]
    WriteFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to move file from '{from}' to '{to}': {source}")]
    MoveFile {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to build archive: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Failed to write archive entry '{name}': {source}")]
    ArchiveEntry {
        name: String,
        #[source]
        source: std::io::Error,
    },
}
