use crate::application::style::StyleDeclarations;
use crate::domain::surface::HeroSectionProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, class_token, non_empty};

pub(crate) fn render(props: &HeroSectionProps, ctx: &RenderContext<'_>) -> VisualNode {
    let height = props.height.as_ref().map_or("medium", |height| height.as_str());
    let image_url = ctx.safe_url(props.image_url.as_deref());
    let overlay = props.overlay.unwrap_or(true);

    let mut hero = Element::new("section")
        .class("a2ui-hero")
        .class(format!("a2ui-hero--{}", class_token(height)))
        .class_if(image_url.is_none(), "a2ui-hero--plain")
        .style(ctx.style(props.style.as_ref()));

    if let Some(url) = image_url {
        hero = hero.child(
            Element::new("img")
                .class("a2ui-hero__image")
                .attr("src", url)
                .attr("alt", props.title.as_str()),
        );
        if overlay {
            hero = hero.child(Element::new("div").class("a2ui-hero__overlay"));
        }
    }

    let title_style = props
        .style
        .as_ref()
        .and_then(|style| style.text_color.as_deref())
        .map(|color| StyleDeclarations::new().with("color", color))
        .unwrap_or_default();

    let mut content = Element::new("div").class("a2ui-hero__content").child(
        Element::new("h1")
            .class("a2ui-hero__title")
            .style(title_style)
            .text(props.title.as_str()),
    );
    if let Some(subtitle) = non_empty(props.subtitle.as_deref()) {
        content = content.child(Element::new("p").class("a2ui-hero__subtitle").text(subtitle));
    }

    hero.child(content).into()
}
