use crate::domain::surface::CodeBlockProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, class_token, non_empty};

pub(crate) fn render(props: &CodeBlockProps, ctx: &RenderContext<'_>) -> VisualNode {
    let title = non_empty(props.title.as_deref());
    let language = non_empty(props.language.as_deref());

    let mut block = Element::new("div")
        .class("a2ui-code")
        .style(ctx.style(props.style.as_ref()));

    if title.is_some() || language.is_some() {
        let mut header = Element::new("div")
            .class("a2ui-code__header")
            .child(
                Element::new("span")
                    .class("a2ui-code__title")
                    .text(title.unwrap_or("")),
            );
        if let Some(language) = language {
            header = header.child(
                Element::new("span")
                    .class("a2ui-code__language")
                    .text(language),
            );
        }
        block = block.child(header);
    }

    let highlighted = language.and_then(|language| ctx.highlight(&props.code, language));
    let code = match (highlighted, language) {
        (Some(markup), Some(language)) => Element::new("code")
            .class("syntax-code")
            .class(format!("language-{}", class_token(language)))
            .child(markup),
        _ => Element::new("code").text(props.code.as_str()),
    };
    let pre = Element::new("pre").class("a2ui-code__text").child(code);

    let content = if props.show_line_numbers.unwrap_or(false) {
        let line_count = props.code.split('\n').count();
        let numbers = (1..=line_count).flat_map(|line| {
            [
                VisualNode::text(line.to_string()),
                Element::new("br").into(),
            ]
        });
        Element::new("div")
            .class("a2ui-code__lines")
            .child(
                Element::new("div")
                    .class("a2ui-code__numbers")
                    .attr("aria-hidden", "true")
                    .children(numbers),
            )
            .child(pre)
    } else {
        Element::new("div").class("a2ui-code__content").child(pre)
    };

    block.child(content).into()
}
