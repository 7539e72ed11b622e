//! URL discovery and file processing
//!
//! This module turns a list of file paths into a stream of links
//! found inside those files.

pub mod extractor;
pub mod path_utils;

// Re-export commonly used items
pub use extractor::{ExtractionSummary, Extractor, LinkSink, PathScan, find_urls};
pub use path_utils::absolute_path;
