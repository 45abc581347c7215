use crate::domain::surface::CardProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, class_token, non_empty};

pub(crate) fn render(props: &CardProps, ctx: &RenderContext<'_>) -> VisualNode {
    let variant = props.variant.as_ref().map_or("elevated", |variant| variant.as_str());
    let title = non_empty(props.title.as_deref());

    let mut card = Element::new("article")
        .class("a2ui-card")
        .class(format!("a2ui-card--{}", class_token(variant)))
        .style(ctx.style(props.style.as_ref()));

    if let Some(url) = ctx.safe_url(props.image_url.as_deref()) {
        card = card.child(
            Element::new("img")
                .class("a2ui-card__image")
                .attr("src", url)
                .attr("alt", title.unwrap_or("")),
        );
    }

    let mut content = Element::new("div").class("a2ui-card__content");
    if let Some(title) = title {
        content = content.child(Element::new("h3").class("a2ui-card__title").text(title));
    }
    if let Some(body) = non_empty(props.content.as_deref()) {
        content = content.child(Element::new("div").class("a2ui-card__body").child(ctx.markup(body)));
    }

    card.child(content).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surface::registry::testing::render_html;
    use crate::domain::surface::CardVariant;

    #[test]
    fn empty_card_renders_container_only() {
        let html = render_html("c", None, |ctx| render(&CardProps::default(), ctx));
        assert_eq!(
            html,
            r#"<article class="a2ui-card a2ui-card--elevated"><div class="a2ui-card__content"></div></article>"#
        );
    }

    #[test]
    fn renders_title_body_and_variant() {
        let props = CardProps {
            title: Some("Tip".into()),
            content: Some("Use *care*".into()),
            variant: Some(CardVariant::Outlined),
            ..CardProps::default()
        };
        let html = render_html("c", None, |ctx| render(&props, ctx));
        assert!(html.contains("a2ui-card--outlined"));
        assert!(html.contains(r#"<h3 class="a2ui-card__title">Tip</h3>"#));
        assert!(html.contains("<em>care</em>"));
    }
}
