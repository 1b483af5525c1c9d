use std::borrow::Cow;
use std::path::Path;
use tracing::warn;

use crate::config::EncodingMode;
use crate::errors::{Result, SearchError};

/// Decodes raw file bytes according to the encoding mode
pub fn decode<'a>(
    bytes: &'a [u8],
    path: &Path,
    encoding_mode: EncodingMode,
) -> Result<Cow<'a, str>> {
    match encoding_mode {
        EncodingMode::FailFast => std::str::from_utf8(bytes)
            .map(Cow::Borrowed)
            .map_err(|e| SearchError::encoding_error(path, e)),
        EncodingMode::Lossy => {
            let text = String::from_utf8_lossy(bytes);
            // Owned means at least one invalid sequence was replaced
            if let Cow::Owned(_) = text {
                warn!("Invalid UTF-8 replaced in file: {}", path.display());
            }
            Ok(text)
        }
    }
}

/// Splits text into lines.
///
/// Lines end at `\n`; one trailing `\r` is dropped from each line. Text after the last
/// newline forms a final line only if it is non-empty, so `"a\n"` is one line and
/// `"a\n\nb"` is three.
pub fn split_lines(text: &str) -> Vec<&str> {
    if text.is_empty() {
        return Vec::new();
    }

    let body = text.strip_suffix('\n').unwrap_or(text);
    body.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect()
}
