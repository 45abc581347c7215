//! Surface resolution.
//!
//! A render pass builds an id lookup over the entries, walks them in list
//! order and dispatches each node to its component renderer. Row and Column
//! resolve their child ids through the lookup and recurse. Nothing survives
//! the pass except the rendered tree and its statistics.

mod components;
mod node;
mod registry;

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use metrics::counter;
use tracing::{debug, warn};

use crate::application::markdown::MarkdownService;
use crate::application::style::StyleCompiler;
use crate::domain::lightbox::GalleryFocus;
use crate::domain::surface::{ComponentEntry, ComponentNode};

pub use components::gallery::DEFAULT_COLUMNS;
pub use components::metadata::{HUMAN_DATE_FORMAT, format_human_date};
pub use node::{Element, VisualNode};

use registry::{RenderContext, placeholder, render_component};

/// Nesting limit for Row/Column recursion.
pub const MAX_NESTING_DEPTH: usize = 32;

/// Where entries referenced as Row/Column children are rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ChildPlacement {
    /// Referenced entries render only inside their container.
    #[default]
    NestedOnly,
    /// Referenced entries render nested and again at their own list position.
    Duplicate,
}

/// Per-request view inputs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SurfaceViewState {
    pub focus: Option<GalleryFocus>,
}

impl SurfaceViewState {
    pub fn focused(focus: GalleryFocus) -> Self {
        Self { focus: Some(focus) }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Entries rendered, nested ones included.
    pub components: usize,
    pub placeholders: usize,
    pub dropped_children: usize,
    pub circular_references: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSurface {
    pub root: VisualNode,
    pub stats: RenderStats,
}

impl RenderedSurface {
    pub fn to_html(&self) -> String {
        self.root.to_html()
    }
}

#[derive(Clone)]
pub struct SurfaceRenderer {
    markdown: Arc<dyn MarkdownService>,
    styles: StyleCompiler,
    placement: ChildPlacement,
}

impl SurfaceRenderer {
    pub fn new(markdown: Arc<dyn MarkdownService>) -> Self {
        Self {
            markdown,
            styles: StyleCompiler::default(),
            placement: ChildPlacement::default(),
        }
    }

    pub fn with_placement(mut self, placement: ChildPlacement) -> Self {
        self.placement = placement;
        self
    }

    pub fn with_style_compiler(mut self, styles: StyleCompiler) -> Self {
        self.styles = styles;
        self
    }

    pub fn placement(&self) -> ChildPlacement {
        self.placement
    }

    pub fn render(&self, components: &[ComponentEntry], view: &SurfaceViewState) -> RenderedSurface {
        let lookup = build_lookup(components);
        let top_level = top_level_flags(components, &lookup, self.placement);

        let mut pass = RenderPass {
            renderer: self,
            lookup,
            focus: view.focus.as_ref(),
            path: Vec::new(),
            stats: RenderStats::default(),
        };

        let rendered: Vec<VisualNode> = components
            .iter()
            .zip(top_level)
            .filter(|(_, top)| *top)
            .map(|(entry, _)| pass.render_entry(entry, 0))
            .collect();

        let stats = pass.stats;
        record_stats(&stats);

        RenderedSurface {
            root: Element::new("div")
                .class("a2ui-surface")
                .children(rendered)
                .into(),
            stats,
        }
    }
}

fn build_lookup(components: &[ComponentEntry]) -> HashMap<&str, &ComponentEntry> {
    let mut lookup = HashMap::with_capacity(components.len());
    for entry in components {
        if lookup.insert(entry.id.as_str(), entry).is_some() {
            warn!(
                target = "application::surface",
                id = entry.id.as_str(),
                "Duplicate component id, last entry wins"
            );
        }
    }
    lookup
}

/// Decides which entries render at their own list position.
///
/// Under `NestedOnly` an entry referenced by another container is left to
/// that container. Only the entry a reference resolves to is affected. Entries only reachable through a cycle of containers
/// would then never render, so the first unreached one of each such group is
/// promoted back to top level.
fn top_level_flags<'a>(
    components: &'a [ComponentEntry],
    lookup: &HashMap<&'a str, &'a ComponentEntry>,
    placement: ChildPlacement,
) -> Vec<bool> {
    if placement == ChildPlacement::Duplicate {
        return vec![true; components.len()];
    }

    let referenced: HashSet<&'a str> = components
        .iter()
        .flat_map(|entry| {
            entry
                .component
                .child_ids()
                .iter()
                .map(String::as_str)
                .filter(move |child| *child != entry.id.as_str())
        })
        .collect();

    // References resolve to the last entry with an id; earlier duplicates
    // are shadowed and keep their own position.
    let mut flags: Vec<bool> = components
        .iter()
        .map(|entry| {
            let resolved = lookup
                .get(entry.id.as_str())
                .is_some_and(|winner| std::ptr::eq(*winner, entry));
            !(resolved && referenced.contains(entry.id.as_str()))
        })
        .collect();

    let mut reached: HashSet<&'a str> = HashSet::new();
    for (entry, top) in components.iter().zip(&flags) {
        if *top {
            mark_reachable(entry, lookup, &mut reached);
        }
    }

    for (entry, top) in components.iter().zip(flags.iter_mut()) {
        if !*top && !reached.contains(entry.id.as_str()) {
            *top = true;
            reached.insert(entry.id.as_str());
            mark_reachable(entry, lookup, &mut reached);
        }
    }

    flags
}

fn mark_reachable<'a>(
    entry: &'a ComponentEntry,
    lookup: &HashMap<&'a str, &'a ComponentEntry>,
    reached: &mut HashSet<&'a str>,
) {
    let mut stack: Vec<&'a ComponentEntry> = vec![entry];
    while let Some(current) = stack.pop() {
        for child in current.component.child_ids() {
            if let Some(&next) = lookup.get(child.as_str()) {
                if reached.insert(next.id.as_str()) {
                    stack.push(next);
                }
            }
        }
    }
}

fn record_stats(stats: &RenderStats) {
    counter!("a2ui_surface_components_total").increment(stats.components as u64);
    counter!("a2ui_surface_placeholders_total").increment(stats.placeholders as u64);
    counter!("a2ui_surface_dropped_children_total").increment(stats.dropped_children as u64);
}

struct RenderPass<'a> {
    renderer: &'a SurfaceRenderer,
    lookup: HashMap<&'a str, &'a ComponentEntry>,
    focus: Option<&'a GalleryFocus>,
    path: Vec<&'a str>,
    stats: RenderStats,
}

impl<'a> RenderPass<'a> {
    fn render_entry(&mut self, entry: &'a ComponentEntry, depth: usize) -> VisualNode {
        self.stats.components += 1;
        self.path.push(entry.id.as_str());

        match &entry.component {
            ComponentNode::Unknown { tag, .. } => debug!(
                target = "application::surface",
                id = entry.id.as_str(),
                tag = tag.as_str(),
                "Unknown component type"
            ),
            ComponentNode::Invalid { tag, reason, .. } => debug!(
                target = "application::surface",
                id = entry.id.as_str(),
                tag = tag.as_str(),
                reason = reason.as_str(),
                "Malformed component properties"
            ),
            ComponentNode::Malformed { reason, .. } => debug!(
                target = "application::surface",
                id = entry.id.as_str(),
                reason = reason.as_str(),
                "Component entry is not a single-key object"
            ),
            _ => {}
        }
        if entry.component.kind().is_none() {
            self.stats.placeholders += 1;
        }

        let renderer = self.renderer;
        let ctx = RenderContext::new(
            renderer.markdown.as_ref(),
            &renderer.styles,
            entry.id.as_str(),
            self.focus,
        );
        let node = render_component(&entry.component, &ctx, &mut |children| {
            self.resolve_children(children, depth + 1)
        });
        self.stats.placeholders += ctx.degraded();

        self.path.pop();
        node
    }

    fn resolve_children(&mut self, children: &[String], depth: usize) -> Vec<VisualNode> {
        let mut resolved = Vec::with_capacity(children.len());

        for child_id in children {
            let Some(&child) = self.lookup.get(child_id.as_str()) else {
                self.stats.dropped_children += 1;
                continue;
            };

            if self.path.iter().any(|visited| *visited == child_id.as_str()) {
                warn!(
                    target = "application::surface",
                    id = child_id.as_str(),
                    path = ?self.path,
                    "Circular child reference"
                );
                self.stats.circular_references += 1;
                self.stats.placeholders += 1;
                resolved.push(placeholder(format!("Circular reference: {child_id}")));
                continue;
            }

            if depth > MAX_NESTING_DEPTH {
                self.stats.placeholders += 1;
                resolved.push(placeholder(format!(
                    "Nesting deeper than {MAX_NESTING_DEPTH} levels: {child_id}"
                )));
                continue;
            }

            resolved.push(self.render_entry(child, depth));
        }

        resolved
    }
}
