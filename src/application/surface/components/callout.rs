use crate::domain::surface::{CalloutKind, CalloutProps};

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, class_token, non_empty};

fn icon(kind: &CalloutKind) -> &'static str {
    match kind {
        CalloutKind::Info => "ℹ️",
        CalloutKind::Warning => "⚠️",
        CalloutKind::Success => "✅",
        CalloutKind::Tip => "💡",
        CalloutKind::Other(_) => "📝",
    }
}

pub(crate) fn render(props: &CalloutProps, ctx: &RenderContext<'_>) -> VisualNode {
    let kind = props.kind.clone().unwrap_or(CalloutKind::Info);

    let mut callout = Element::new("aside")
        .class("a2ui-callout")
        .class(format!("a2ui-callout--{}", class_token(kind.as_str())))
        .attr("role", "note")
        .style(ctx.style(props.style.as_ref()));

    if let Some(title) = non_empty(props.title.as_deref()) {
        callout = callout.child(
            Element::new("div")
                .class("a2ui-callout__title")
                .child(Element::new("span").class("a2ui-callout__icon").text(icon(&kind)))
                .text(title),
        );
    }

    callout
        .child(
            Element::new("div")
                .class("a2ui-callout__content")
                .child(ctx.markup(&props.content)),
        )
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surface::registry::testing::render_html;

    fn props(kind: Option<CalloutKind>, title: Option<&str>) -> CalloutProps {
        CalloutProps {
            content: "Mind the **gap**".into(),
            kind,
            title: title.map(str::to_string),
            style: None,
        }
    }

    #[test]
    fn defaults_to_info_without_title_row() {
        let html = render_html("c", None, |ctx| render(&props(None, None), ctx));
        assert!(html.contains("a2ui-callout--info"));
        assert!(!html.contains("a2ui-callout__title"));
        assert!(html.contains("<strong>gap</strong>"));
    }

    #[test]
    fn title_row_shows_kind_icon() {
        let html = render_html("c", None, |ctx| {
            render(&props(Some(CalloutKind::Warning), Some("Heads up")), ctx)
        });
        assert!(html.contains(
            r#"<div class="a2ui-callout__title"><span class="a2ui-callout__icon">⚠️</span>Heads up</div>"#
        ));
    }

    #[test]
    fn unknown_kinds_use_the_memo_icon() {
        let html = render_html("c", None, |ctx| {
            render(&props(Some(CalloutKind::Other("note".into())), Some("N")), ctx)
        });
        assert!(html.contains("📝"));
        assert!(html.contains("a2ui-callout--note"));
    }
}
