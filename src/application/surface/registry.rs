//! Component type dispatch.

use std::cell::Cell;

use tracing::debug;

use crate::application::markdown::{MarkdownService, SafeMarkup, is_safe_url};
use crate::application::style::{StyleCompiler, StyleDeclarations};
use crate::domain::lightbox::GalleryFocus;
use crate::domain::style::StyleOptions;
use crate::domain::surface::ComponentNode;

use super::components::{
    callout, card, code_block, divider, gallery, hero, layout, list, metadata, quote, table,
    text_block,
};
use super::node::{Element, VisualNode};

/// Inputs shared by every component renderer for one entry.
pub(crate) struct RenderContext<'a> {
    markdown: &'a dyn MarkdownService,
    styles: &'a StyleCompiler,
    entry_id: &'a str,
    focus: Option<&'a GalleryFocus>,
    degraded: Cell<usize>,
}

impl<'a> RenderContext<'a> {
    pub(crate) fn new(
        markdown: &'a dyn MarkdownService,
        styles: &'a StyleCompiler,
        entry_id: &'a str,
        focus: Option<&'a GalleryFocus>,
    ) -> Self {
        Self {
            markdown,
            styles,
            entry_id,
            focus,
            degraded: Cell::new(0),
        }
    }

    pub(crate) fn entry_id(&self) -> &str {
        self.entry_id
    }

    /// Requested focus, when it targets this entry.
    pub(crate) fn focus_index(&self) -> Option<usize> {
        self.focus
            .filter(|focus| focus.gallery_id == self.entry_id)
            .map(|focus| focus.index)
    }

    pub(crate) fn styles(&self) -> &StyleCompiler {
        self.styles
    }

    pub(crate) fn style(&self, options: Option<&StyleOptions>) -> StyleDeclarations {
        self.styles.compile(options)
    }

    /// Markdown converted through the sanitiser, or a placeholder on failure.
    pub(crate) fn markup(&self, markdown: &str) -> VisualNode {
        match self.markdown.to_markup(markdown) {
            Ok(markup) => VisualNode::Markup(markup),
            Err(err) => {
                debug!(
                    target = "application::surface::registry",
                    entry_id = self.entry_id,
                    error = %err,
                    "Markdown conversion failed"
                );
                self.degraded.set(self.degraded.get() + 1);
                placeholder(format!("Content could not be rendered: {err}"))
            }
        }
    }

    pub(crate) fn highlight(&self, code: &str, language: &str) -> Option<SafeMarkup> {
        match self.markdown.highlight(code, language) {
            Ok(markup) => markup,
            Err(err) => {
                debug!(
                    target = "application::surface::registry",
                    entry_id = self.entry_id,
                    language,
                    error = %err,
                    "Highlighting failed, emitting plain code"
                );
                None
            }
        }
    }

    /// Drops URLs with script-capable schemes.
    pub(crate) fn safe_url<'u>(&self, url: Option<&'u str>) -> Option<&'u str> {
        let url = non_empty(url)?;
        if is_safe_url(url) {
            Some(url)
        } else {
            debug!(
                target = "application::surface::registry",
                entry_id = self.entry_id,
                url,
                "Dropped unsafe url"
            );
            None
        }
    }

    /// Placeholders emitted while rendering this entry's own content.
    pub(crate) fn degraded(&self) -> usize {
        self.degraded.get()
    }
}

/// Renders one node. Layout containers obtain their children through
/// `resolve_children`, which owns id resolution.
pub(crate) fn render_component(
    node: &ComponentNode,
    ctx: &RenderContext<'_>,
    resolve_children: &mut dyn FnMut(&[String]) -> Vec<VisualNode>,
) -> VisualNode {
    match node {
        ComponentNode::HeroSection(props) => hero::render(props, ctx),
        ComponentNode::TextBlock(props) => text_block::render(props, ctx),
        ComponentNode::ImageGallery(props) => gallery::render(props, ctx),
        ComponentNode::CodeBlock(props) => code_block::render(props, ctx),
        ComponentNode::Card(props) => card::render(props, ctx),
        ComponentNode::Column(props) => {
            let children = resolve_children(&props.children);
            layout::column(props, children, ctx)
        }
        ComponentNode::Row(props) => {
            let children = resolve_children(&props.children);
            layout::row(props, children, ctx)
        }
        ComponentNode::Callout(props) => callout::render(props, ctx),
        ComponentNode::List(props) => list::render(props, ctx),
        ComponentNode::Quote(props) => quote::render(props, ctx),
        ComponentNode::Table(props) => table::render(props, ctx),
        ComponentNode::Metadata(props) => metadata::render(props, ctx),
        ComponentNode::Divider(props) => divider::render(props, ctx),
        ComponentNode::Unknown { tag, .. } => placeholder(format!("Unknown component: {tag}")),
        ComponentNode::Invalid { tag, reason, .. } => {
            placeholder(format!("Invalid {tag} component: {reason}"))
        }
        ComponentNode::Malformed { reason, .. } => {
            placeholder(format!("Malformed component: {reason}"))
        }
    }
}

/// Visible stand-in for a component that could not be rendered.
pub(crate) fn placeholder(message: impl Into<String>) -> VisualNode {
    Element::new("div")
        .class("a2ui-error")
        .attr("role", "alert")
        .text(message)
        .into()
}

pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|value| !value.trim().is_empty())
}

/// Reduces an agent-supplied keyword to a safe class name fragment.
pub(crate) fn class_token(value: &str) -> String {
    value
        .trim()
        .chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '-' || ch == '_' {
                ch.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::application::markdown::markdown_service;

    /// Renders with the shared markdown service and standard scales.
    pub(crate) fn render_html(
        entry_id: &str,
        focus: Option<&GalleryFocus>,
        render: impl FnOnce(&RenderContext<'_>) -> VisualNode,
    ) -> String {
        let markdown = markdown_service();
        let styles = StyleCompiler::default();
        let ctx = RenderContext::new(markdown.as_ref(), &styles, entry_id, focus);
        render(&ctx).to_html()
    }
}
