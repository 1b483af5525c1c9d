use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::trace;

use super::context;
use super::lines::{decode, split_lines};
use super::matcher::LineMatcher;
use crate::config::{EncodingMode, SearchRequest};
use crate::errors::{Result, SearchError};
use crate::filters::is_excluded;
use crate::results::Match;

const BUFFER_CAPACITY: usize = 65536;

/// Matches and counters produced by scanning one file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    /// Reported matches, in line order
    pub matches: Vec<Match>,
    /// Lines that matched the search term, excluded or not
    pub raw_matches: usize,
    /// Lines that matched but were dropped by an exclusion term
    pub filtered_matches: usize,
}

/// Scans single files for one request
#[derive(Debug, Clone)]
pub struct FileProcessor {
    matcher: LineMatcher,
    exclude: Vec<String>,
    context: usize,
    encoding_mode: EncodingMode,
}

impl FileProcessor {
    pub fn new(request: &SearchRequest) -> Self {
        Self {
            matcher: LineMatcher::new(
                &request.search,
                request.whole_word,
                request.case_insensitive,
            ),
            exclude: request.exclusion_terms(),
            context: request.context,
            encoding_mode: request.encoding,
        }
    }

    /// Reads a file and scans its contents
    pub fn process_file(&self, path: &Path) -> Result<FileScan> {
        trace!("Processing file: {}", path.display());

        let file = File::open(path).map_err(|e| SearchError::from_io(path, e))?;
        let mut reader = BufReader::with_capacity(BUFFER_CAPACITY, file);
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .map_err(|e| SearchError::from_io(path, e))?;

        let contents = decode(&bytes, path, self.encoding_mode)?;
        Ok(self.process_text(&contents))
    }

    /// Scans already decoded text
    pub fn process_text(&self, contents: &str) -> FileScan {
        let lines = split_lines(contents);
        let mut scan = FileScan::default();

        for (index, line) in lines.iter().enumerate() {
            let normalized = self.matcher.normalize(line);
            if !self.matcher.is_match_normalized(&normalized) {
                continue;
            }

            scan.raw_matches += 1;
            if is_excluded(
                line,
                &normalized,
                &self.exclude,
                self.matcher.is_case_insensitive(),
            ) {
                trace!("Excluded match at line {}", index + 1);
                scan.filtered_matches += 1;
                continue;
            }

            let mut m = Match::new(index + 1, *line);
            if self.context > 0 {
                let before = context::before(&lines, index, self.context);
                let after = context::after(&lines, index, self.context);
                m.context_before = Some(to_owned_lines(before));
                m.context_after = Some(to_owned_lines(after));
            }
            scan.matches.push(m);
        }

        scan
    }
}

fn to_owned_lines(lines: &[&str]) -> Vec<String> {
    lines.iter().map(|line| line.to_string()).collect()
}
