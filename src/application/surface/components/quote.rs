use crate::domain::surface::QuoteProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, non_empty};

pub(crate) fn render(props: &QuoteProps, ctx: &RenderContext<'_>) -> VisualNode {
    let mut quote = Element::new("blockquote")
        .class("a2ui-quote")
        .style(ctx.style(props.style.as_ref()))
        .child(Element::new("p").class("a2ui-quote__text").text(props.text.as_str()));

    let author = non_empty(props.author.as_deref());
    let source = non_empty(props.source.as_deref());

    if author.is_some() || source.is_some() {
        let mut attribution = Element::new("footer")
            .class("a2ui-quote__attribution")
            .text("— ");
        if let Some(author) = author {
            attribution = attribution.child(
                Element::new("span")
                    .class("a2ui-quote__author")
                    .text(author),
            );
        }
        if let Some(source) = source {
            if author.is_some() {
                attribution = attribution.child(
                    Element::new("span")
                        .class("a2ui-quote__separator")
                        .text(", "),
                );
            }
            attribution = attribution.child(
                Element::new("cite")
                    .class("a2ui-quote__source")
                    .text(source),
            );
        }
        quote = quote.child(attribution);
    }

    quote.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surface::registry::testing::render_html;

    fn props(author: Option<&str>, source: Option<&str>) -> QuoteProps {
        QuoteProps {
            text: "Stay hungry".into(),
            author: author.map(str::to_string),
            source: source.map(str::to_string),
            style: None,
        }
    }

    #[test]
    fn no_attribution_without_author_or_source() {
        let html = render_html("q", None, |ctx| render(&props(None, None), ctx));
        assert!(!html.contains("a2ui-quote__attribution"));
    }

    #[test]
    fn separator_only_between_author_and_source() {
        let both = render_html("q", None, |ctx| render(&props(Some("Jobs"), Some("Stanford")), ctx));
        assert!(both.contains(
            r#"— <span class="a2ui-quote__author">Jobs</span><span class="a2ui-quote__separator">, </span><cite class="a2ui-quote__source">Stanford</cite>"#
        ));

        let source_only = render_html("q", None, |ctx| render(&props(None, Some("Stanford")), ctx));
        assert!(!source_only.contains("a2ui-quote__separator"));
        assert!(source_only.contains("a2ui-quote__source"));
    }
}
