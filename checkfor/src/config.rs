use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{Result, SearchError};

/// How invalid UTF-8 in a scanned file is handled
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EncodingMode {
    /// Replace invalid sequences with U+FFFD and keep scanning
    #[default]
    Lossy,
    /// Treat the file as unreadable; it is skipped with a warning
    FailFast,
}

impl std::str::FromStr for EncodingMode {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "lossy" => Ok(Self::Lossy),
            "failfast" | "fail-fast" => Ok(Self::FailFast),
            other => Err(SearchError::config_error(format!(
                "unknown encoding mode '{}' (expected lossy or failfast)",
                other
            ))),
        }
    }
}

/// Persistent defaults for search requests.
///
/// # Configuration Locations
///
/// Settings are merged from the following files, later entries taking precedence:
/// 1. Global `checkfor/config.yaml` under the platform config directory
/// 2. Local `.checkfor.yaml` in the current directory
/// 3. Custom config file specified via `--config`
///
/// # Configuration Format
///
/// ```yaml
/// # Only look at files ending in this suffix
/// ext: ".rs"
///
/// # Drop matching lines that also contain any of these strings
/// exclude:
///   - "// ignore"
///
/// case_insensitive: false
/// whole_word: true
///
/// # Lines of context before and after each match
/// context: 2
///
/// # Omit original_matches / filtered_matches from the output
/// hide_filter_stats: false
///
/// # lossy | failfast
/// encoding: lossy
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// Command line flags and JSON-RPC arguments override these values field by field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default file-name suffix filter
    pub ext: Option<String>,
    /// Default exclusion terms
    pub exclude: Vec<String>,
    pub case_insensitive: bool,
    pub whole_word: bool,
    /// Default number of context lines
    pub context: usize,
    pub hide_filter_stats: bool,
    pub encoding: EncodingMode,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ext: None,
            exclude: Vec::new(),
            case_insensitive: false,
            whole_word: false,
            context: 0,
            hide_filter_stats: false,
            encoding: EncodingMode::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Loads settings from the default locations plus an explicit file.
    ///
    /// Missing default files are skipped; a missing explicit file is an error.
    pub fn load_from(config_path: Option<&Path>) -> std::result::Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            dirs::config_dir().map(|p| p.join("checkfor/config.yaml")),
            Some(PathBuf::from(".checkfor.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder.build()?.try_deserialize()
    }

    /// Creates a request for `search` seeded with these defaults
    pub fn request(&self, search: impl Into<String>) -> SearchRequest {
        SearchRequest {
            dirs: vec![PathBuf::from(".")],
            search: search.into(),
            ext: self.ext.clone(),
            exclude: self.exclude.clone(),
            case_insensitive: self.case_insensitive,
            whole_word: self.whole_word,
            context: self.context,
            hide_filter_stats: self.hide_filter_stats,
            encoding: self.encoding,
        }
    }
}

/// A single, immutable search invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Directories to scan, in output order. Empty means the current directory.
    pub dirs: Vec<PathBuf>,
    /// The literal term to look for
    pub search: String,
    /// Exact file-name suffix filter (e.g. ".go")
    pub ext: Option<String>,
    /// Lines containing any of these are filtered out of the results
    pub exclude: Vec<String>,
    pub case_insensitive: bool,
    pub whole_word: bool,
    /// Context lines before and after each match
    pub context: usize,
    /// Suppress raw/filtered counters in directory results
    pub hide_filter_stats: bool,
    pub encoding: EncodingMode,
}

impl SearchRequest {
    /// Creates a request with default options over the current directory
    pub fn new(search: impl Into<String>) -> Self {
        Settings::default().request(search)
    }

    /// Rejects requests that cannot be scanned
    pub fn validate(&self) -> Result<()> {
        if self.search.is_empty() {
            return Err(SearchError::config_error("search term must not be empty"));
        }
        Ok(())
    }

    /// The suffix filter, if one is set to a non-empty value
    pub fn extension_filter(&self) -> Option<&str> {
        self.ext.as_deref().filter(|ext| !ext.is_empty())
    }

    /// Exclusion terms that can actually match; empty terms are ignored
    pub fn exclusion_terms(&self) -> Vec<String> {
        self.exclude
            .iter()
            .filter(|term| !term.is_empty())
            .cloned()
            .collect()
    }

    /// Directories to scan, falling back to the current directory
    pub fn target_dirs(&self) -> Vec<PathBuf> {
        if self.dirs.is_empty() {
            vec![PathBuf::from(".")]
        } else {
            self.dirs.clone()
        }
    }

    /// Whether directory results carry raw/filtered counters
    pub fn reports_filter_stats(&self) -> bool {
        !self.hide_filter_stats && self.exclude.iter().any(|term| !term.is_empty())
    }
}
