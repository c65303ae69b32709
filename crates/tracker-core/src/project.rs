//! Project references.

use std::fmt;

/// Identifies the tracker project a mutation targets.
///
/// Either a numeric id (`"42"`) or a full path (`"ops/alerts"`). Always
/// non-empty and trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectRef(String);

impl ProjectRef {
    /// Parse a project reference, rejecting empty or whitespace-only input.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The reference as given.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Percent-encoded form for use as a single URL path segment.
    pub fn url_segment(&self) -> String {
        urlencoding::encode(&self.0).into_owned()
    }
}

impl fmt::Display for ProjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_trims() {
        let project = ProjectRef::parse("  ops/alerts ").unwrap();
        assert_eq!(project.as_str(), "ops/alerts");
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert!(ProjectRef::parse("").is_none());
        assert!(ProjectRef::parse("   ").is_none());
    }

    #[test]
    fn test_url_segment_encodes_path() {
        let project = ProjectRef::parse("ops/alerts").unwrap();
        assert_eq!(project.url_segment(), "ops%2Falerts");

        let numeric = ProjectRef::parse("42").unwrap();
        assert_eq!(numeric.url_segment(), "42");
    }
}
