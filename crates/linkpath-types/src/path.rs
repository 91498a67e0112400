use std::fmt;
use std::str::FromStr;

use crate::error::PathError;

/// A validated dotted field path.
///
/// A path is a non-empty, ordered list of non-empty segments. `"owner.name"`
/// has two segments; `""`, `"a..b"`, `".a"` and `"a."` are rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FieldPath {
    segments: Vec<String>,
}

impl FieldPath {
    /// Separator between segments.
    pub const SEPARATOR: char = '.';

    /// Parse a dotted path.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }
        let segments = raw
            .split(Self::SEPARATOR)
            .enumerate()
            .map(|(position, segment)| {
                if segment.is_empty() {
                    Err(PathError::EmptySegment { position })
                } else {
                    Ok(segment.to_string())
                }
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { segments })
    }

    /// The segments, in traversal order.
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of segments. Always at least one.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Always `false`; a parsed path has at least one segment.
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }
}

impl FromStr for FieldPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.segments.join("."))
    }
}

/// Check that an object identifier is usable as a starting point.
pub fn validate_id(id: &str) -> Result<&str, PathError> {
    if id.trim().is_empty() {
        return Err(PathError::EmptyId);
    }
    Ok(id)
}
