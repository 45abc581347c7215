use std::fmt;

use thiserror::Error;

/// HTML that went through the sanitiser and may be embedded verbatim.
///
/// Only the markdown module can construct values of this type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SafeMarkup(String);

impl SafeMarkup {
    pub(super) fn sanitized(html: String) -> Self {
        Self(html)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for SafeMarkup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Error)]
pub enum MarkdownError {
    #[error("markdown rendering failed: {message}")]
    Markdown { message: String },
    #[error("syntax highlighting failed: {language}: {message}")]
    Highlighting { language: String, message: String },
}

/// Markdown to sanitised markup conversion.
///
/// Implementations must be pure: the same input yields the same output.
pub trait MarkdownService: Send + Sync {
    fn to_markup(&self, markdown: &str) -> Result<SafeMarkup, MarkdownError>;

    /// Highlights `code` for `language`. Returns `None` when no syntax is
    /// known for the language.
    fn highlight(&self, code: &str, language: &str) -> Result<Option<SafeMarkup>, MarkdownError>;
}
