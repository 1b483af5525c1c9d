use std::borrow::Cow;

/// Checks if a byte is a word character (`[A-Za-z0-9_]`)
pub fn is_word_char(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

/// Checks if `word` occurs in `text` with a non-word character (or the line edge) on
/// both sides.
///
/// Every occurrence is tried left to right, including ones that overlap a rejected
/// candidate, so `"log"` is found in `"logger log"` but not in `"catalog"`.
pub fn contains_whole_word(text: &str, word: &str) -> bool {
    let Some(first) = word.chars().next() else {
        return true;
    };
    let bytes = text.as_bytes();

    let mut start = 0;
    while let Some(offset) = text[start..].find(word) {
        let index = start + offset;
        let end = index + word.len();

        let before_ok = index == 0 || !is_word_char(bytes[index - 1]);
        let after_ok = end >= bytes.len() || !is_word_char(bytes[end]);
        if before_ok && after_ok {
            return true;
        }

        start = index + first.len_utf8();
    }
    false
}

/// Tests a single line for the search term.
///
/// The term is folded once on construction; lines are folded per call when
/// `case_insensitive` is set. Case folding uses Unicode lowercase.
#[derive(Debug, Clone)]
pub struct LineMatcher {
    term: String,
    whole_word: bool,
    case_insensitive: bool,
}

impl LineMatcher {
    pub fn new(term: &str, whole_word: bool, case_insensitive: bool) -> Self {
        let term = if case_insensitive {
            term.to_lowercase()
        } else {
            term.to_string()
        };
        Self {
            term,
            whole_word,
            case_insensitive,
        }
    }

    /// The term as it is compared against normalized lines
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn is_case_insensitive(&self) -> bool {
        self.case_insensitive
    }

    /// Folds a line the same way the term was folded
    pub fn normalize<'a>(&self, line: &'a str) -> Cow<'a, str> {
        if self.case_insensitive {
            Cow::Owned(line.to_lowercase())
        } else {
            Cow::Borrowed(line)
        }
    }

    /// Tests an already normalized line
    pub fn is_match_normalized(&self, normalized: &str) -> bool {
        if self.whole_word {
            contains_whole_word(normalized, &self.term)
        } else {
            normalized.contains(self.term.as_str())
        }
    }

    /// Tests an original line
    pub fn is_match(&self, line: &str) -> bool {
        self.is_match_normalized(&self.normalize(line))
    }
}

/// Checks if `term` occurs in `line` under the given options.
///
/// An empty term matches every line; callers reject empty search terms upstream.
pub fn matches(line: &str, term: &str, whole_word: bool, case_insensitive: bool) -> bool {
    LineMatcher::new(term, whole_word, case_insensitive).is_match(line)
}
