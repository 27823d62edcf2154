//! Line shapes of a goroutine dump.
//!
//! A dump is a sequence of blocks separated by blank lines:
//!
//! ```text
//! goroutine 7 [chan receive]:
//! main.worker(...)
//!         /src/main.go:42 +0x1d
//! ```
//!
//! Only the header and the first frame line of each block matter here.

use crate::utils::config::{HEADER_DELIMITER, HEADER_MARKER};

/// Classification of a line against the header pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderLine<'a> {
    /// Not a header; fall through to block handling
    NotHeader,

    /// Looks like a header but has no usable state label
    Malformed,

    /// Header carrying a blocking-state label
    Header(&'a str),
}

impl<'a> HeaderLine<'a> {
    /// Classify a raw line
    ///
    /// A header contains both "goroutine" and ":". It is split on spaces
    /// into at most three tokens; the third is the bracketed state, e.g.
    /// `[chan receive, 5 minutes]:`, from which one leading and two
    /// trailing characters are stripped.
    pub fn classify(line: &'a str) -> Self {
        if !line.contains(HEADER_MARKER) || !line.contains(HEADER_DELIMITER) {
            return HeaderLine::NotHeader;
        }

        let mut tokens = line.splitn(3, ' ');
        match tokens.nth(2).and_then(strip_label) {
            Some(label) => HeaderLine::Header(label),
            None => HeaderLine::Malformed,
        }
    }
}

/// Drop one leading and two trailing characters
///
/// Returns `None` when the token is too short to strip.
fn strip_label(token: &str) -> Option<&str> {
    let start = token.chars().next()?.len_utf8();
    let (end, _) = token.char_indices().rev().nth(1)?;
    (start <= end).then(|| &token[start..end])
}

/// One goroutine occurrence: state label plus leading frame name
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Block {
    /// Blocking-state label of the most recent header, possibly empty
    pub state: String,

    /// Leading frame name, empty when the frame line had spaces
    pub name: String,
}

impl Block {
    /// Build a block from a leading frame line
    pub fn from_frame(state: &str, line: &str) -> Self {
        Self {
            state: state.to_string(),
            name: frame_name(line).to_string(),
        }
    }
}

/// Name captured from a leading frame line
///
/// Only lines that split into a single space-separated token keep their
/// text; anything with a space yields an empty name.
pub fn frame_name(line: &str) -> &str {
    if line.contains(' ') {
        ""
    } else {
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_header() {
        assert_eq!(
            HeaderLine::classify("goroutine 1 [running]:"),
            HeaderLine::Header("running")
        );
    }

    #[test]
    fn test_classify_header_with_spaces_in_state() {
        assert_eq!(
            HeaderLine::classify("goroutine 33 [chan receive, 12 minutes]:"),
            HeaderLine::Header("chan receive, 12 minutes")
        );
    }

    #[test]
    fn test_classify_not_header() {
        assert_eq!(HeaderLine::classify("main.main()"), HeaderLine::NotHeader);
        assert_eq!(
            HeaderLine::classify("created by main.main in goroutine 1"),
            HeaderLine::NotHeader
        );
        assert_eq!(
            HeaderLine::classify("\t/src/main.go:42 +0x1d"),
            HeaderLine::NotHeader
        );
    }

    #[test]
    fn test_classify_too_few_tokens() {
        assert_eq!(HeaderLine::classify("goroutine:"), HeaderLine::Malformed);
        assert_eq!(HeaderLine::classify("goroutine 1:"), HeaderLine::Malformed);
    }

    #[test]
    fn test_classify_short_state_token() {
        assert_eq!(HeaderLine::classify("goroutine 1 x:"), HeaderLine::Malformed);
        assert_eq!(HeaderLine::classify("goroutine 1 []:"), HeaderLine::Header(""));
    }

    #[test]
    fn test_strip_label_multibyte() {
        assert_eq!(strip_label("«état»:"), Some("état"));
    }

    #[test]
    fn test_frame_name_single_token() {
        assert_eq!(frame_name("foo.Bar(...)"), "foo.Bar(...)");
    }

    #[test]
    fn test_frame_name_multi_token() {
        assert_eq!(frame_name("main.work(0xc000010000, 0x1)"), "");
    }
}
