//! Line-level keyword filtering.
//!
//! Matching is a case-sensitive substring test per line. No tokenization.

/// Result of cleaning one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CleanedText {
    pub content: String,
    /// Nothing but whitespace survived.
    pub is_empty: bool,
}

#[derive(Debug, Clone, Default)]
pub struct LineFilter {
    keywords: Vec<String>,
}

impl LineFilter {
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    pub fn is_enabled(&self) -> bool {
        !self.keywords.is_empty()
    }

    pub fn is_forbidden(&self, line: &str) -> bool {
        self.keywords.iter().any(|kw| line.contains(kw.as_str()))
    }

    /// Drop every line containing a keyword and rejoin the rest.
    /// With no keywords the text passes through and is never empty.
    pub fn clean(&self, content: &str) -> CleanedText {
        if !self.is_enabled() {
            return CleanedText {
                content: content.to_string(),
                is_empty: false,
            };
        }
        let content = content
            .split('\n')
            .filter(|line| !self.is_forbidden(line))
            .collect::<Vec<_>>()
            .join("\n");
        let is_empty = content.trim().is_empty();
        CleanedText { content, is_empty }
    }
}
