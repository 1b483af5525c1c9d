//! The matching and result-shaping engine.
//!
//! Data flows one directory at a time, one file at a time, one line at a time:
//!
//! 1. [`engine`] lists a directory, skips subdirectories and files rejected by the
//!    extension filter, and hands each remaining file to the processor.
//! 2. [`processor`] reads and decodes the file, splits it with [`lines`], runs each line
//!    through the [`matcher`], drops excluded hits, and attaches [`context`] lines.
//! 3. [`engine`] folds per-file scans into a `DirectoryResult`, and per-directory
//!    results into a `SearchResult` in request order.
//!
//! Everything runs on the calling thread. Nothing is cached between calls.
pub mod context;
pub mod engine;
pub mod lines;
pub mod matcher;
pub mod processor;

pub use engine::{scan_all, scan_all as search, scan_directory};
pub use matcher::{matches, LineMatcher};
pub use processor::{FileProcessor, FileScan};
