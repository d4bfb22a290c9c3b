//! Parsed representation of dot-paths.

use std::fmt;

/// Separator between segments.
pub const SEPARATOR: char = '.';

/// Token that matches every key at its depth.
pub const WILDCARD: &str = "*";

/// A segment in a dot-path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// A literal mapping key, field name, or sequence position.
    Literal(String),
    /// `*` - all current children.
    Wildcard,
}

impl Segment {
    /// Returns the literal key, or `None` for a wildcard.
    pub fn as_literal(&self) -> Option<&str> {
        match self {
            Segment::Literal(key) => Some(key),
            Segment::Wildcard => None,
        }
    }

    /// Returns the sequence position this segment names, if it is a plain decimal integer.
    pub fn as_index(&self) -> Option<usize> {
        self.as_literal().and_then(parse_index)
    }

    pub fn is_wildcard(&self) -> bool {
        matches!(self, Segment::Wildcard)
    }
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Literal(key) => f.write_str(key),
            Segment::Wildcard => f.write_str(WILDCARD),
        }
    }
}

/// A complete dot-path.
///
/// An empty segment list is the identity path: reads return the target itself
/// and writes leave it untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DotPath {
    /// Segments that make up the path.
    pub segments: Vec<Segment>,
}

impl DotPath {
    /// Creates a new path with the given segments.
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn is_identity(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns true if any segment is a wildcard.
    pub fn has_wildcard(&self) -> bool {
        has_wildcard(&self.segments)
    }
}

impl fmt::Display for DotPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", SEPARATOR)?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

pub(crate) fn has_wildcard(segments: &[Segment]) -> bool {
    segments.iter().any(Segment::is_wildcard)
}

/// Parses a canonical decimal position: `"0"`, `"17"`, but not `"007"`, `"-1"` or `"+3"`.
pub(crate) fn parse_index(key: &str) -> Option<usize> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_index() {
        assert_eq!(parse_index("0"), Some(0));
        assert_eq!(parse_index("42"), Some(42));
        assert_eq!(parse_index("007"), None);
        assert_eq!(parse_index("-1"), None);
        assert_eq!(parse_index("+1"), None);
        assert_eq!(parse_index("name"), None);
        assert_eq!(parse_index(""), None);
    }

    #[test]
    fn test_display_round_trips_segments() {
        let path = DotPath::new(vec![
            Segment::Literal("users".to_string()),
            Segment::Wildcard,
            Segment::Literal("name".to_string()),
        ]);
        assert_eq!(path.to_string(), "users.*.name");
        assert!(path.has_wildcard());
    }
}
