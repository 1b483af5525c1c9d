/// Error types for checkfor.
///
/// Errors fall into four groups, and each group is handled differently by the caller:
///
/// 1. **Configuration errors** (`ConfigError`): a missing or empty search term, or a
///    config file that cannot be loaded. Reported before any scan starts.
/// 2. **Listing errors** (`DirectoryRead`): a requested directory cannot be enumerated.
///    Fatal to the whole multi-directory scan.
/// 3. **Per-file errors** (`FileNotFound`, `PermissionDenied`, `IoError`,
///    `EncodingError`): the file is skipped with a warning and the scan continues.
/// 4. **Protocol errors** are not represented here; the JSON-RPC front-end maps
///    failures onto its own error codes (see `mcp::types::RpcError`).
///
/// ```rust,ignore
/// match scan_all(&request) {
///     Ok(result) => // Emit result,
///     Err(SearchError::DirectoryRead { path, .. }) => // Whole batch failed,
///     Err(e) => // Configuration or serialization problem
/// }
/// ```
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Result type for search operations
pub type Result<T, E = SearchError> = std::result::Result<T, E>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("File not found: {0}")]
    FileNotFound(PathBuf),
    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Invalid UTF-8 in file {path}: {source}")]
    EncodingError {
        path: PathBuf,
        source: std::str::Utf8Error,
    },
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SearchError {
    pub fn file_not_found(path: impl Into<PathBuf>) -> Self {
        Self::FileNotFound(path.into())
    }

    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        Self::PermissionDenied(path.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    pub fn encoding_error(path: impl Into<PathBuf>, source: std::str::Utf8Error) -> Self {
        Self::EncodingError {
            path: path.into(),
            source,
        }
    }

    /// Maps an error from opening or reading `path` onto the matching variant
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => Self::file_not_found(path),
            std::io::ErrorKind::PermissionDenied => Self::permission_denied(path),
            _ => Self::IoError(err),
        }
    }
}
