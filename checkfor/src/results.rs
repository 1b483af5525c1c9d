/// Result model for a search, shaped the way callers receive it.
///
/// A [`SearchResult`] holds one [`DirectoryResult`] per requested directory, in request
/// order. Each directory lists the files that produced at least one reported match, and
/// each [`FileResult`] lists its [`Match`]es in line order.
///
/// Serialized as JSON:
/// ```json
/// {
///   "directories": [{
///     "dir": "src",
///     "matches_found": 1,
///     "original_matches": 2,
///     "filtered_matches": 1,
///     "files": [{
///       "path": "main.go",
///       "matches": [{ "line": 3, "content": "target", "context_before": ["line2"] }]
///     }]
///   }]
/// }
/// ```
///
/// `original_matches` and `filtered_matches` appear only when exclusions were configured
/// and stats were not hidden. `context_before` and `context_after` appear only when a
/// positive context window was requested.
use serde::{Deserialize, Serialize};

/// A single reported hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    /// 1-based line number within the file
    #[serde(rename = "line")]
    pub line_number: usize,
    /// The original line, before any case folding
    #[serde(rename = "content")]
    pub line_content: String,
    /// Lines preceding the match, oldest first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_before: Option<Vec<String>>,
    /// Lines following the match
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub context_after: Option<Vec<String>>,
}

impl Match {
    pub fn new(line_number: usize, line_content: impl Into<String>) -> Self {
        Self {
            line_number,
            line_content: line_content.into(),
            context_before: None,
            context_after: None,
        }
    }
}

/// All reported matches in a single file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileResult {
    /// File name relative to its directory
    pub path: String,
    pub matches: Vec<Match>,
}

/// Matches and counters for one scanned directory
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryResult {
    /// The directory as it was requested
    pub dir: String,
    /// Number of reported matches across all files
    pub matches_found: usize,
    /// Raw hits before exclusion filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_matches: Option<usize>,
    /// Raw hits dropped by exclusion filtering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filtered_matches: Option<usize>,
    pub files: Vec<FileResult>,
}

impl DirectoryResult {
    /// Creates an empty result for `dir`
    pub fn new(dir: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            ..Default::default()
        }
    }

    /// Enables the raw/filtered counters, starting at zero
    pub fn with_filter_stats(mut self) -> Self {
        self.original_matches = Some(0);
        self.filtered_matches = Some(0);
        self
    }

    /// Adds a file's matches. Files without matches are not recorded.
    pub fn add_file_result(&mut self, file_result: FileResult) {
        if file_result.matches.is_empty() {
            return;
        }
        self.matches_found += file_result.matches.len();
        self.files.push(file_result);
    }

    /// Accumulates raw/filtered counters if they are enabled
    pub fn record_filter_stats(&mut self, original: usize, filtered: usize) {
        if let Some(total) = self.original_matches.as_mut() {
            *total += original;
        }
        if let Some(total) = self.filtered_matches.as_mut() {
            *total += filtered;
        }
    }
}

/// The complete multi-directory result
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub directories: Vec<DirectoryResult>,
}

impl SearchResult {
    /// Creates a new empty search result
    pub fn new() -> Self {
        Default::default()
    }

    /// Total reported matches across every directory
    pub fn total_matches(&self) -> usize {
        self.directories.iter().map(|d| d.matches_found).sum()
    }

    /// Total files with at least one reported match
    pub fn files_with_matches(&self) -> usize {
        self.directories.iter().map(|d| d.files.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, lines: &[usize]) -> FileResult {
        FileResult {
            path: path.to_string(),
            matches: lines.iter().map(|&n| Match::new(n, "hit")).collect(),
        }
    }

    #[test]
    fn test_add_file_result_skips_empty_files() {
        let mut dir = DirectoryResult::new("src");
        dir.add_file_result(file("a.txt", &[1, 4]));
        dir.add_file_result(file("b.txt", &[]));
        dir.add_file_result(file("c.txt", &[2]));

        assert_eq!(dir.matches_found, 3);
        assert_eq!(dir.files.len(), 2);
        assert_eq!(dir.files[0].path, "a.txt");
        assert_eq!(dir.files[1].path, "c.txt");
    }

    #[test]
    fn test_filter_stats_only_when_enabled() {
        let mut plain = DirectoryResult::new(".");
        plain.record_filter_stats(3, 1);
        assert_eq!(plain.original_matches, None);
        assert_eq!(plain.filtered_matches, None);

        let mut stats = DirectoryResult::new(".").with_filter_stats();
        stats.record_filter_stats(3, 1);
        stats.record_filter_stats(2, 0);
        assert_eq!(stats.original_matches, Some(5));
        assert_eq!(stats.filtered_matches, Some(1));
    }

    #[test]
    fn test_search_result_totals() {
        let mut first = DirectoryResult::new("a");
        first.add_file_result(file("x", &[1, 2]));
        let mut second = DirectoryResult::new("b");
        second.add_file_result(file("y", &[3]));
        second.add_file_result(file("z", &[7]));

        let result = SearchResult {
            directories: vec![first, second],
        };
        assert_eq!(result.total_matches(), 4);
        assert_eq!(result.files_with_matches(), 3);
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut dir = DirectoryResult::new("src");
        dir.add_file_result(file("main.go", &[42]));
        let json = serde_json::to_value(SearchResult {
            directories: vec![dir],
        })
        .unwrap();

        let dir = &json["directories"][0];
        assert_eq!(dir["dir"], "src");
        assert_eq!(dir["matches_found"], 1);
        assert!(dir.get("original_matches").is_none());
        assert!(dir.get("filtered_matches").is_none());

        let m = &dir["files"][0]["matches"][0];
        assert_eq!(m["line"], 42);
        assert_eq!(m["content"], "hit");
        assert!(m.get("context_before").is_none());
        assert!(m.get("context_after").is_none());
    }

    #[test]
    fn test_edge_context_and_zero_counts_are_explicit() {
        let mut dir = DirectoryResult::new("src").with_filter_stats();
        dir.record_filter_stats(1, 0);
        dir.add_file_result(FileResult {
            path: "a.txt".to_string(),
            matches: vec![Match {
                context_before: Some(vec![]),
                context_after: Some(vec!["next".to_string()]),
                ..Match::new(1, "hit")
            }],
        });
        let json = serde_json::to_value(&dir).unwrap();

        assert_eq!(json["original_matches"], 1);
        assert_eq!(json["filtered_matches"], 0);
        assert_eq!(json["files"][0]["matches"][0]["context_before"], serde_json::json!([]));

        let parsed: DirectoryResult = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, dir);
    }

    #[test]
    fn test_round_trip_preserves_structure() {
        let mut dir = DirectoryResult::new("/tmp/project").with_filter_stats();
        dir.record_filter_stats(2, 1);
        dir.add_file_result(FileResult {
            path: "test.go".to_string(),
            matches: vec![Match {
                line_number: 42,
                line_content: "target line".to_string(),
                context_before: Some(vec!["line before".to_string()]),
                context_after: Some(vec![]),
            }],
        });
        let result = SearchResult {
            directories: vec![dir, DirectoryResult::new("empty")],
        };

        let data = serde_json::to_string(&result).unwrap();
        let decoded: SearchResult = serde_json::from_str(&data).unwrap();
        assert_eq!(decoded, result);
    }
}
