use time::{
    Date, OffsetDateTime, format_description::FormatItem, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::domain::surface::MetadataProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, non_empty};

pub const HUMAN_DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:long] [day padding:none], [year]");
const ISO_DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// `2024-03-05` or an RFC 3339 timestamp as `March 5, 2024`; anything else is
/// returned unchanged.
pub fn format_human_date(raw: &str) -> String {
    let trimmed = raw.trim();
    let date = Date::parse(trimmed, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| OffsetDateTime::parse(trimmed, &Rfc3339).ok().map(|dt| dt.date()));

    date.and_then(|date| date.format(HUMAN_DATE_FORMAT).ok())
        .unwrap_or_else(|| raw.to_string())
}

pub(crate) fn render(props: &MetadataProps, ctx: &RenderContext<'_>) -> VisualNode {
    let mut items: Vec<VisualNode> = Vec::new();

    if let Some(author) = non_empty(props.author.as_deref()) {
        items.push(meta_item("✍️", author));
    }
    if let Some(date) = non_empty(props.date.as_deref()) {
        items.push(meta_item("📅", &format_human_date(date)));
    }
    if let Some(read_time) = non_empty(props.read_time.as_deref()) {
        items.push(meta_item("⏱️", read_time));
    }
    if let Some(tags) = props.tags.as_ref().filter(|tags| !tags.is_empty()) {
        items.push(
            Element::new("div")
                .class("a2ui-meta__tags")
                .children(
                    tags.iter()
                        .map(|tag| Element::new("span").class("a2ui-meta__tag").text(tag.as_str()).into()),
                )
                .into(),
        );
    }

    let mut children = Vec::with_capacity(items.len() * 2);
    for (index, item) in items.into_iter().enumerate() {
        if index > 0 {
            children.push(
                Element::new("span")
                    .class("a2ui-meta__divider")
                    .attr("aria-hidden", "true")
                    .into(),
            );
        }
        children.push(item);
    }

    Element::new("div")
        .class("a2ui-meta")
        .style(ctx.style(props.style.as_ref()))
        .children(children)
        .into()
}

fn meta_item(icon: &str, label: &str) -> VisualNode {
    Element::new("div")
        .class("a2ui-meta__item")
        .child(Element::new("span").class("a2ui-meta__icon").text(icon))
        .child(Element::new("span").class("a2ui-meta__label").text(label))
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surface::registry::testing::render_html;

    #[test]
    fn formats_iso_dates_and_timestamps() {
        assert_eq!(format_human_date("2024-03-05"), "March 5, 2024");
        assert_eq!(format_human_date("2023-11-20T08:30:00Z"), "November 20, 2023");
    }

    #[test]
    fn unparsable_dates_are_kept_raw() {
        assert_eq!(format_human_date("last spring"), "last spring");
    }

    #[test]
    fn separators_only_between_present_items() {
        let props = MetadataProps {
            author: Some("Ada".into()),
            read_time: Some("5 min read".into()),
            ..MetadataProps::default()
        };
        let html = render_html("m", None, |ctx| render(&props, ctx));
        assert_eq!(html.matches("a2ui-meta__divider").count(), 1);
        assert!(html.contains("Ada"));
        assert!(html.contains("5 min read"));
    }

    #[test]
    fn lone_date_has_no_separator() {
        let props = MetadataProps {
            date: Some("2024-01-15".into()),
            tags: Some(Vec::new()),
            ..MetadataProps::default()
        };
        let html = render_html("m", None, |ctx| render(&props, ctx));
        assert!(!html.contains("a2ui-meta__divider"));
        assert!(!html.contains("a2ui-meta__tags"));
        assert!(html.contains("January 15, 2024"));
    }

    #[test]
    fn all_fields_get_three_separators() {
        let props = MetadataProps {
            author: Some("Ada".into()),
            date: Some("2024-01-15".into()),
            read_time: Some("3 min".into()),
            tags: Some(vec!["rust".into(), "ui".into()]),
            style: None,
        };
        let html = render_html("m", None, |ctx| render(&props, ctx));
        assert_eq!(html.matches("a2ui-meta__divider").count(), 3);
        assert!(html.contains(r#"<span class="a2ui-meta__tag">rust</span>"#));
    }

    #[test]
    fn empty_metadata_renders_empty_container() {
        let html = render_html("m", None, |ctx| render(&MetadataProps::default(), ctx));
        assert_eq!(html, r#"<div class="a2ui-meta"></div>"#);
    }
}
