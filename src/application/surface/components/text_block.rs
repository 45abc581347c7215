use crate::domain::surface::TextBlockProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, class_token};

pub(crate) fn render(props: &TextBlockProps, ctx: &RenderContext<'_>) -> VisualNode {
    let variant = props.variant.as_ref().map_or("body", |variant| variant.as_str());

    Element::new("div")
        .class("a2ui-text-block")
        .class(format!("a2ui-text-block--{}", class_token(variant)))
        .style(ctx.style(props.style.as_ref()))
        .child(ctx.markup(&props.content))
        .into()
}
