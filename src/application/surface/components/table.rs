use crate::domain::surface::TableProps;

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, non_empty};

/// Ragged rows are rendered cell for cell, without padding or truncation.
pub(crate) fn render(props: &TableProps, ctx: &RenderContext<'_>) -> VisualNode {
    let mut table = Element::new("table");

    if let Some(caption) = non_empty(props.caption.as_deref()) {
        table = table.child(Element::new("caption").class("a2ui-table__caption").text(caption));
    }

    let header = Element::new("tr").children(
        props
            .headers
            .iter()
            .map(|cell| Element::new("th").text(cell.as_str()).into()),
    );
    let rows = props.rows.iter().map(|row| {
        Element::new("tr")
            .children(row.iter().map(|cell| Element::new("td").text(cell.as_str()).into()))
            .into()
    });

    table = table
        .child(Element::new("thead").child(header))
        .child(Element::new("tbody").children(rows));

    Element::new("div")
        .class("a2ui-table")
        .style(ctx.style(props.style.as_ref()))
        .child(table)
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surface::registry::testing::render_html;
    use crate::domain::surface::TableCell;

    #[test]
    fn ragged_rows_render_as_is() {
        let props = TableProps {
            headers: vec!["A".into(), "B".into()],
            rows: vec![vec!["1".into(), "2".into(), "3".into()], vec!["x".into()]],
            caption: None,
            style: None,
        };
        let html = render_html("t", None, |ctx| render(&props, ctx));
        assert!(html.contains("<tr><td>1</td><td>2</td><td>3</td></tr>"));
        assert!(html.contains("<tr><td>x</td></tr>"));
        assert!(!html.contains("<caption"));
    }

    #[test]
    fn caption_is_rendered_when_present() {
        let props = TableProps {
            headers: vec![TableCell::from("A")],
            rows: Vec::new(),
            caption: Some("Totals".into()),
            style: None,
        };
        let html = render_html("t", None, |ctx| render(&props, ctx));
        assert!(html.contains(r#"<caption class="a2ui-table__caption">Totals</caption>"#));
    }
}
