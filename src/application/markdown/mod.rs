//! Markdown to sanitised markup.
//!
//! Conversion happens in two stages: comrak renders HTML with raw HTML
//! passthrough enabled, then ammonia applies an allow-list. Only the second
//! stage produces [`SafeMarkup`].

mod highlight;
mod sanitizer;
mod types;

use std::sync::Arc;

use comrak::{Arena, format_html, parse_document};
use once_cell::sync::Lazy;

pub use sanitizer::{is_safe_url, sanitize_style_attribute};
pub use types::{MarkdownError, MarkdownService, SafeMarkup};

use highlight::CodeHighlighter;
use sanitizer::{build_code_sanitizer, build_markup_sanitizer, comrak_options};

/// Comrak rendering with ammonia sanitisation and syntect highlighting.
pub struct ComrakMarkdownService {
    options: comrak::Options<'static>,
    markup_sanitizer: ammonia::Builder<'static>,
    code_sanitizer: ammonia::Builder<'static>,
    highlighter: CodeHighlighter,
}

impl ComrakMarkdownService {
    fn new() -> Self {
        Self {
            options: comrak_options(),
            markup_sanitizer: build_markup_sanitizer(),
            code_sanitizer: build_code_sanitizer(),
            highlighter: CodeHighlighter::load(),
        }
    }

    fn render_html(&self, markdown: &str) -> Result<String, MarkdownError> {
        let arena = Arena::new();
        let root = parse_document(&arena, markdown, &self.options);

        let mut html = String::new();
        format_html(root, &self.options, &mut html).map_err(|err| MarkdownError::Markdown {
            message: err.to_string(),
        })?;
        Ok(html)
    }
}

impl Default for ComrakMarkdownService {
    fn default() -> Self {
        Self::new()
    }
}

static MARKDOWN_SERVICE: Lazy<Arc<ComrakMarkdownService>> =
    Lazy::new(|| Arc::new(ComrakMarkdownService::new()));

/// Shared markdown service, initialised on first use.
pub fn markdown_service() -> Arc<ComrakMarkdownService> {
    Arc::clone(&MARKDOWN_SERVICE)
}

impl MarkdownService for ComrakMarkdownService {
    fn to_markup(&self, markdown: &str) -> Result<SafeMarkup, MarkdownError> {
        let html = self.render_html(markdown)?;
        let cleaned = self.markup_sanitizer.clean(&html).to_string();
        Ok(SafeMarkup::sanitized(cleaned))
    }

    fn highlight(&self, code: &str, language: &str) -> Result<Option<SafeMarkup>, MarkdownError> {
        let highlighted = self.highlighter.highlight(code, language)?;
        Ok(highlighted.map(|html| SafeMarkup::sanitized(self.code_sanitizer.clean(&html).to_string())))
    }
}
