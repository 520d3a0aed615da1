use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DocumentError {
    #[error("document content is empty")]
    Empty,

    #[error("document link is not a valid URL: {reason}")]
    InvalidLink { reason: String },
}

/// How the source document was supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Link,
    Text,
}

/// The user-supplied source material a session is seeded from.
///
/// Immutable once created; session engines only ever read it as a label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionDocument {
    kind: DocumentKind,
    content: String,
}

impl SessionDocument {
    /// Creates a link document, validating the URL.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Empty` for blank input and
    /// `DocumentError::InvalidLink` when the URL does not parse.
    pub fn link(url: impl Into<String>) -> Result<Self, DocumentError> {
        let content = url.into();
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(DocumentError::Empty);
        }
        Url::parse(trimmed).map_err(|e| DocumentError::InvalidLink {
            reason: e.to_string(),
        })?;
        Ok(Self {
            kind: DocumentKind::Link,
            content: trimmed.to_string(),
        })
    }

    /// Creates a free-text document.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Empty` for blank input.
    pub fn text(content: impl Into<String>) -> Result<Self, DocumentError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DocumentError::Empty);
        }
        Ok(Self {
            kind: DocumentKind::Text,
            content,
        })
    }

    /// Rehydrate a document from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError` if the content fails validation for its kind.
    pub fn from_persisted(kind: DocumentKind, content: String) -> Result<Self, DocumentError> {
        match kind {
            DocumentKind::Link => Self::link(content),
            DocumentKind::Text => Self::text(content),
        }
    }

    #[must_use]
    pub fn kind(&self) -> DocumentKind {
        self.kind
    }

    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// A short label for lists, truncated on a character boundary.
    #[must_use]
    pub fn preview(&self, max_chars: usize) -> String {
        if self.content.chars().count() <= max_chars {
            return self.content.clone();
        }
        let truncated: String = self.content.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn link_document_requires_valid_url() {
        let doc = SessionDocument::link("https://example.com/notes").unwrap();
        assert_eq!(doc.kind(), DocumentKind::Link);

        let err = SessionDocument::link("not a url").unwrap_err();
        assert!(matches!(err, DocumentError::InvalidLink { .. }));
    }

    #[test]
    fn blank_input_is_rejected() {
        assert!(matches!(
            SessionDocument::text("   "),
            Err(DocumentError::Empty)
        ));
        assert!(matches!(
            SessionDocument::link(""),
            Err(DocumentError::Empty)
        ));
    }

    #[test]
    fn preview_truncates_long_content() {
        let doc = SessionDocument::text("a".repeat(150)).unwrap();
        let preview = doc.preview(100);
        assert_eq!(preview.chars().count(), 103);
        assert!(preview.ends_with("..."));
    }

    #[test]
    fn preview_keeps_short_content() {
        let doc = SessionDocument::text("short note").unwrap();
        assert_eq!(doc.preview(100), "short note");
    }
}
