use crate::application::style::StyleDeclarations;
use crate::domain::surface::{ColumnAlign, ColumnProps, RowProps};

use super::super::node::{Element, VisualNode};
use super::super::registry::RenderContext;

pub(crate) fn row(props: &RowProps, children: Vec<VisualNode>, ctx: &RenderContext<'_>) -> VisualNode {
    let layout = StyleDeclarations::new().with("gap", ctx.styles().gap(props.gap.as_ref()));

    Element::new("div")
        .class("a2ui-row")
        .class_if(props.wrap.unwrap_or(false), "a2ui-row--wrap")
        .style(layout)
        .style(ctx.style(props.style.as_ref()))
        .children(children)
        .into()
}

pub(crate) fn column(
    props: &ColumnProps,
    children: Vec<VisualNode>,
    ctx: &RenderContext<'_>,
) -> VisualNode {
    let mut layout = StyleDeclarations::new().with("gap", ctx.styles().gap(props.gap.as_ref()));
    if let Some(align) = &props.align {
        layout.push("align-items", align_items(align));
    }

    Element::new("div")
        .class("a2ui-column")
        .style(layout)
        .style(ctx.style(props.style.as_ref()))
        .children(children)
        .into()
}

fn align_items(align: &ColumnAlign) -> &str {
    match align {
        ColumnAlign::Start => "flex-start",
        ColumnAlign::Center => "center",
        ColumnAlign::End => "flex-end",
        ColumnAlign::Stretch => "stretch",
        ColumnAlign::Other(raw) => raw.as_str(),
    }
}
