use std::fs::{self, DirEntry};
use std::path::Path;
use tracing::{debug, info, trace, warn};

use super::processor::FileProcessor;
use crate::config::SearchRequest;
use crate::errors::{Result, SearchError};
use crate::filters::has_valid_extension;
use crate::results::{DirectoryResult, FileResult, SearchResult};

/// Scans every requested directory in order.
///
/// Fails on the first directory that cannot be listed; no partial result is returned.
/// Files that cannot be read are skipped with a warning.
pub fn scan_all(request: &SearchRequest) -> Result<SearchResult> {
    request.validate()?;
    info!("Starting search for: {}", request.search);

    let processor = FileProcessor::new(request);
    let mut result = SearchResult::new();
    for dir in request.target_dirs() {
        result
            .directories
            .push(scan_directory_with(&dir, request, &processor)?);
    }

    info!(
        "Search complete. Found {} matches in {} files",
        result.total_matches(),
        result.files_with_matches()
    );
    Ok(result)
}

/// Scans the immediate entries of a single directory
pub fn scan_directory(dir: &Path, request: &SearchRequest) -> Result<DirectoryResult> {
    request.validate()?;
    scan_directory_with(dir, request, &FileProcessor::new(request))
}

fn scan_directory_with(
    dir: &Path,
    request: &SearchRequest,
    processor: &FileProcessor,
) -> Result<DirectoryResult> {
    debug!("Scanning directory: {}", dir.display());

    let mut entries = fs::read_dir(dir)
        .and_then(|entries| entries.collect::<std::io::Result<Vec<_>>>())
        .map_err(|e| SearchError::directory_read(dir, e))?;
    entries.sort_by_key(|entry| entry.file_name());

    let mut result = DirectoryResult::new(dir.to_string_lossy());
    if request.reports_filter_stats() {
        result = result.with_filter_stats();
    }

    let ext = request.extension_filter();
    for entry in entries {
        let path = entry.path();
        if is_directory(&entry) {
            trace!("Skipping directory: {}", path.display());
            continue;
        }

        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !has_valid_extension(&file_name, ext) {
            continue;
        }

        match processor.process_file(&path) {
            Ok(scan) => {
                result.record_filter_stats(scan.raw_matches, scan.filtered_matches);
                result.add_file_result(FileResult {
                    path: file_name,
                    matches: scan.matches,
                });
            }
            Err(e) => warn!("Failed to search {}: {}", path.display(), e),
        }
    }

    debug!(
        "Found {} matches in {} files under {}",
        result.matches_found,
        result.files.len(),
        dir.display()
    );
    Ok(result)
}

/// Directories and symlinks to directories are never scanned
fn is_directory(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Ok(ft) if ft.is_dir() => true,
        Ok(ft) if ft.is_symlink() => entry.path().is_dir(),
        _ => false,
    }
}
