//! Rendered issue text.

/// Title, description and comment produced for one alert.
///
/// The title is trimmed on construction; it is the identity key used to
/// find an existing issue.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RenderedContent {
    pub title: String,
    pub description: String,
    pub comment: String,
}

impl RenderedContent {
    /// Create rendered content, trimming the title.
    pub fn new(
        title: impl AsRef<str>,
        description: impl Into<String>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            title: title.as_ref().trim().to_string(),
            description: description.into(),
            comment: comment.into(),
        }
    }

    /// Returns true if the title is empty after trimming.
    pub fn has_empty_title(&self) -> bool {
        self.title.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_is_trimmed() {
        let content = RenderedContent::new("  HighCPU - host1\n", "desc", "again");
        assert_eq!(content.title, "HighCPU - host1");
        assert!(!content.has_empty_title());
    }

    #[test]
    fn test_blank_title_detected() {
        assert!(RenderedContent::new(" \n\t", "desc", "again").has_empty_title());
    }
}
