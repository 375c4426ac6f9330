pub mod archive;
pub mod filesystem;
pub mod splitter;

pub use archive::ArchiveBuilder;
pub use filesystem::OutputWriter;
pub use splitter::{DocumentSplitter, NamedOutput};
