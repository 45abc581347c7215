use crate::domain::surface::ListProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, non_empty};

pub(crate) fn render(props: &ListProps, ctx: &RenderContext<'_>) -> VisualNode {
    let style = ctx.style(props.style.as_ref());

    if let Some(icon) = non_empty(props.icon.as_deref()) {
        let items = props.items.iter().map(|item| {
            Element::new("li")
                .child(Element::new("span").class("a2ui-list__icon").text(icon))
                .child(Element::new("span").text(item.as_str()))
                .into()
        });
        return Element::new("ul")
            .class("a2ui-list")
            .class("a2ui-list--icon")
            .style(style)
            .children(items)
            .into();
    }

    let tag = if props.ordered.unwrap_or(false) { "ol" } else { "ul" };
    let items = props
        .items
        .iter()
        .map(|item| Element::new("li").text(item.as_str()).into());

    Element::new(tag)
        .class("a2ui-list")
        .style(style)
        .children(items)
        .into()
}
