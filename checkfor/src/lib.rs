pub mod config;
pub mod errors;
pub mod filters;
pub mod mcp;
pub mod results;
pub mod search;

pub use config::{EncodingMode, SearchRequest, Settings};
pub use errors::{Result, SearchError};
pub use results::{DirectoryResult, FileResult, Match, SearchResult};
pub use search::{scan_all, scan_directory, search};
