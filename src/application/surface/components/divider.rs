use crate::domain::surface::DividerProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, class_token};

pub(crate) fn render(props: &DividerProps, ctx: &RenderContext<'_>) -> VisualNode {
    let stroke = props.stroke.as_ref().map_or("solid", |stroke| stroke.as_str());

    Element::new("hr")
        .class("a2ui-divider")
        .class(format!("a2ui-divider--{}", class_token(stroke)))
        .style(ctx.style(props.style_props.as_ref()))
        .into()
}
