//! Shared test utilities for fcrsplit integration tests.
//!
//! This module provides:
//! - `PdfBuilder` for creating receipt PDFs with or without a text layer
//! - `TestHarness` wiring the pipeline to stub OCR engines and a temp output dir

pub mod builders;
pub mod harness;

pub use builders::*;
pub use harness::{CountingRecognizer, TestHarness};
