//! File and line filters applied around the matcher.
//!
//! Two filters live here:
//!
//! - the **extension filter**, applied to directory entries before any content is read.
//!   It is an exact suffix test on the file name, so `".go"` accepts `main.go` and
//!   rejects `main.GO`.
//! - the **exclusion filter**, applied to lines that already matched the search term.
//!   It is always a substring test, even when the search itself is whole-word.
//!
//! Both are free functions; they hold no state and never fail.

/// Checks if a file name passes the suffix filter. `None` accepts every file.
pub fn has_valid_extension(file_name: &str, ext: Option<&str>) -> bool {
    match ext {
        None => true,
        Some(suffix) => file_name.ends_with(suffix),
    }
}

/// Checks if a matched line contains any exclusion term.
///
/// `normalized` is the line as the matcher saw it (lowercased when `case_insensitive`).
/// Terms are folded the same way as the search term, and compared against the
/// normalized line in case-insensitive mode or the original line otherwise.
pub fn is_excluded(
    original: &str,
    normalized: &str,
    terms: &[String],
    case_insensitive: bool,
) -> bool {
    if case_insensitive {
        terms
            .iter()
            .any(|term| normalized.contains(term.to_lowercase().as_str()))
    } else {
        terms.iter().any(|term| original.contains(term.as_str()))
    }
}
