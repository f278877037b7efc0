use regex::{NoExpand, Regex};
use std::ops::Range;

use crate::core::{PatchError, PatchResult};

/// A compiled structural pattern used to locate an insertion point.
///
/// Lookups never fail: a pattern that does not occur in the buffer yields
/// `None`, and callers decide what a miss means.
#[derive(Debug, Clone)]
pub struct Anchor {
    regex: Regex,
}

/// Byte spans of one anchor match and its capture groups
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnchorMatch {
    pub start: usize,
    pub end: usize,
    groups: Vec<Option<Range<usize>>>,
}

impl AnchorMatch {
    fn from_captures(caps: &regex::Captures<'_>) -> Self {
        let whole = caps.get(0).map(|m| m.range()).unwrap_or(0..0);
        Self {
            start: whole.start,
            end: whole.end,
            groups: caps.iter().map(|g| g.map(|m| m.range())).collect(),
        }
    }

    /// Span of capture group `index` (0 is the whole match)
    pub fn group(&self, index: usize) -> Option<Range<usize>> {
        self.groups.get(index).cloned().flatten()
    }

    /// Shift every span by `offset`, for matches found in a sub-slice
    fn offset_by(mut self, offset: usize) -> Self {
        self.start += offset;
        self.end += offset;
        for group in self.groups.iter_mut().flatten() {
            *group = (group.start + offset)..(group.end + offset);
        }
        self
    }
}

impl Anchor {
    pub fn new(step: &'static str, pattern: &str) -> PatchResult<Self> {
        let regex =
            Regex::new(pattern).map_err(|source| PatchError::InvalidPattern { step, source })?;
        Ok(Self { regex })
    }

    pub fn is_match(&self, buffer: &str) -> bool {
        self.regex.is_match(buffer)
    }

    /// Topmost match. Later occurrences are ignored.
    pub fn first(&self, buffer: &str) -> Option<AnchorMatch> {
        self.regex
            .captures(buffer)
            .map(|caps| AnchorMatch::from_captures(&caps))
    }

    /// Topmost match at or after byte offset `from`, limited to `buffer[from..until]`.
    /// Spans are reported relative to the full buffer.
    pub fn first_within(&self, buffer: &str, from: usize, until: usize) -> Option<AnchorMatch> {
        let region = buffer.get(from..until)?;
        self.first(region).map(|m| m.offset_by(from))
    }

    /// Bottom-most match
    pub fn last(&self, buffer: &str) -> Option<AnchorMatch> {
        self.regex
            .captures_iter(buffer)
            .last()
            .map(|caps| AnchorMatch::from_captures(&caps))
    }

    /// Replace every occurrence with `replacement` taken literally.
    /// Returns `None` when nothing matched.
    pub fn replace_all_literal(&self, buffer: &str, replacement: &str) -> Option<String> {
        if !self.is_match(buffer) {
            return None;
        }
        Some(
            self.regex
                .replace_all(buffer, NoExpand(replacement))
                .into_owned(),
        )
    }
}

/// Return a copy of `buffer` with `text` spliced in at byte offset `at`
pub fn insert_at(buffer: &str, at: usize, text: &str) -> String {
    let mut out = String::with_capacity(buffer.len() + text.len());
    out.push_str(&buffer[..at]);
    out.push_str(text);
    out.push_str(&buffer[at..]);
    out
}

/// Return a copy of `buffer` with `range` replaced by `text`
pub fn splice(buffer: &str, range: Range<usize>, text: &str) -> String {
    let mut out = String::with_capacity(buffer.len() + text.len());
    out.push_str(&buffer[..range.start]);
    out.push_str(text);
    out.push_str(&buffer[range.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_picks_topmost_match() {
        let anchor = Anchor::new("test", r"item(\d)").unwrap();
        let m = anchor.first("item1 item2 item3").unwrap();

        assert_eq!(m.start, 0);
        assert_eq!(m.group(1), Some(4..5));
    }

    #[test]
    fn test_last_picks_bottom_match() {
        let anchor = Anchor::new("test", r"item(\d)").unwrap();
        let m = anchor.last("item1 item2 item3").unwrap();

        assert_eq!(m.start, 12);
        assert_eq!(m.end, 17);
    }

    #[test]
    fn test_no_match_is_none() {
        let anchor = Anchor::new("test", r"missing").unwrap();

        assert!(anchor.first("nothing here").is_none());
        assert!(anchor.last("nothing here").is_none());
        assert!(anchor.replace_all_literal("nothing here", "x").is_none());
    }

    #[test]
    fn test_first_within_reports_absolute_offsets() {
        let anchor = Anchor::new("test", r"(b+)").unwrap();
        let m = anchor.first_within("bb aa bbb", 3, 9).unwrap();

        assert_eq!(m.start, 6);
        assert_eq!(m.group(1), Some(6..9));
        assert!(anchor.first_within("bb aa", 3, 5).is_none());
    }

    #[test]
    fn test_replace_all_literal_does_not_expand_dollars() {
        let anchor = Anchor::new("test", r"x").unwrap();
        let out = anchor.replace_all_literal("x-x", "$1").unwrap();

        assert_eq!(out, "$1-$1");
    }

    #[test]
    fn test_invalid_pattern_is_reported() {
        let err = Anchor::new("broken-step", r"(unclosed").unwrap_err();
        assert!(err.to_string().contains("broken-step"));
    }

    #[test]
    fn test_insert_and_splice() {
        assert_eq!(insert_at("ac", 1, "b"), "abc");
        assert_eq!(splice("a--c", 1..3, "b"), "abc");
    }
}
