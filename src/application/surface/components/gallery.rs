//! Image grid with a server-driven lightbox.
//!
//! With lightbox enabled each item links to `?focus=<entry-id>:<index>`.
//! When the request carries a focus for this entry the gallery is rendered in
//! the state reached by selecting that image; the overlay's backdrop and close
//! control link back to the unfocused page.

use url::form_urlencoded;

use crate::application::style::StyleDeclarations;
use crate::domain::lightbox::{Dismissal, GalleryFocus, LightboxState};
use crate::domain::surface::{GalleryImage, ImageGalleryProps};

use super::super::node::{Element, VisualNode};
use super::super::registry::{RenderContext, non_empty};

pub const DEFAULT_COLUMNS: u32 = 3;
const MAX_COLUMNS: u32 = 12;
const DISMISS_HREF: &str = "?";

pub(crate) fn render(props: &ImageGalleryProps, ctx: &RenderContext<'_>) -> VisualNode {
    let columns = props.columns.unwrap_or(DEFAULT_COLUMNS).clamp(1, MAX_COLUMNS);
    let lightbox = props.lightbox.unwrap_or(true);
    let state = requested_state(props, ctx, lightbox);

    let items = props
        .images
        .iter()
        .enumerate()
        .map(|(index, image)| render_item(image, index, lightbox, ctx));

    let gallery = Element::new("div")
        .class("a2ui-gallery")
        .class(format!("cols-{columns}"))
        .style(StyleDeclarations::new().with("--a2ui-columns", columns.to_string()))
        .style(ctx.style(props.style.as_ref()))
        .children(items);

    match state.focused() {
        Some(image) => VisualNode::Fragment(vec![gallery.into(), render_overlay(image, ctx)]),
        None => gallery.into(),
    }
}

fn requested_state(
    props: &ImageGalleryProps,
    ctx: &RenderContext<'_>,
    lightbox: bool,
) -> LightboxState {
    ctx.focus_index()
        .and_then(|index| props.images.get(index))
        .map(|image| LightboxState::Closed.select(image, lightbox))
        .unwrap_or_default()
}

fn render_item(
    image: &GalleryImage,
    index: usize,
    lightbox: bool,
    ctx: &RenderContext<'_>,
) -> VisualNode {
    let caption = non_empty(image.caption.as_deref());
    let alt = non_empty(image.alt.as_deref()).or(caption).unwrap_or("");

    let mut figure = Element::new("figure").class("a2ui-gallery__item");
    if let Some(src) = ctx.safe_url(Some(image.url.as_str())) {
        figure = figure.child(
            Element::new("img")
                .attr("src", src)
                .attr("alt", alt)
                .attr("loading", "lazy"),
        );
    }
    if let Some(caption) = caption {
        figure = figure.child(
            Element::new("figcaption")
                .class("a2ui-gallery__caption")
                .text(caption),
        );
    }

    if !lightbox {
        return figure.into();
    }

    let focus = GalleryFocus::new(ctx.entry_id(), index).to_query_value();
    let href = format!(
        "?focus={}",
        form_urlencoded::byte_serialize(focus.as_bytes()).collect::<String>()
    );
    Element::new("a")
        .class("a2ui-gallery__link")
        .attr("href", href)
        .child(figure)
        .into()
}

fn render_overlay(image: &GalleryImage, ctx: &RenderContext<'_>) -> VisualNode {
    let mut overlay = Element::new("div")
        .class("a2ui-lightbox")
        .attr("role", "dialog")
        .attr("aria-modal", "true")
        .child(dismiss_link(Dismissal::Backdrop))
        .child(dismiss_link(Dismissal::CloseButton));

    if let Some(src) = ctx.safe_url(Some(image.url.as_str())) {
        overlay = overlay.child(
            Element::new("img")
                .class("a2ui-lightbox__image")
                .attr("src", src)
                .attr("alt", non_empty(image.alt.as_deref()).unwrap_or("")),
        );
    }
    if let Some(caption) = non_empty(image.caption.as_deref()) {
        overlay = overlay.child(
            Element::new("div")
                .class("a2ui-lightbox__caption")
                .text(caption),
        );
    }
    overlay.into()
}

fn dismiss_link(via: Dismissal) -> Element {
    let link = Element::new("a")
        .attr("href", DISMISS_HREF)
        .attr("aria-label", "Close");
    match via {
        Dismissal::Backdrop => link.class("a2ui-lightbox__backdrop"),
        Dismissal::CloseButton => link.class("a2ui-lightbox__close").text("×"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::surface::registry::testing::render_html;

    fn gallery(lightbox: Option<bool>) -> ImageGalleryProps {
        ImageGalleryProps {
            images: vec![
                GalleryImage {
                    url: "https://img.example/a.jpg".into(),
                    caption: Some("First".into()),
                    alt: None,
                },
                GalleryImage {
                    url: "https://img.example/b.jpg".into(),
                    caption: None,
                    alt: Some("Second".into()),
                },
            ],
            columns: None,
            lightbox,
            style: None,
        }
    }

    #[test]
    fn items_link_to_focus_when_lightbox_enabled() {
        let html = render_html("photos", None, |ctx| render(&gallery(None), ctx));
        assert!(html.contains("cols-3"));
        assert!(html.contains(r#"href="?focus=photos%3A0""#));
        assert!(html.contains(r#"href="?focus=photos%3A1""#));
        assert!(html.contains(r#"alt="First""#));
        assert!(html.contains(r#"<figcaption class="a2ui-gallery__caption">First</figcaption>"#));
        assert!(!html.contains("a2ui-lightbox"));
    }

    #[test]
    fn focus_opens_the_overlay_for_that_image() {
        let focus = GalleryFocus::new("photos", 1);
        let html = render_html("photos", Some(&focus), |ctx| render(&gallery(None), ctx));
        assert!(html.contains(r#"<div class="a2ui-lightbox" role="dialog" aria-modal="true">"#));
        assert!(html.contains(r#"class="a2ui-lightbox__backdrop" href="?""#));
        assert!(html.contains(r#"class="a2ui-lightbox__close" href="?" aria-label="Close">×</a>"#));
        assert!(html.contains(r#"<img class="a2ui-lightbox__image" src="https://img.example/b.jpg" alt="Second">"#));
    }

    #[test]
    fn focus_for_another_gallery_is_ignored() {
        let focus = GalleryFocus::new("other", 0);
        let html = render_html("photos", Some(&focus), |ctx| render(&gallery(None), ctx));
        assert!(!html.contains("a2ui-lightbox"));
    }

    #[test]
    fn disabled_lightbox_never_opens() {
        let focus = GalleryFocus::new("photos", 0);
        let html = render_html("photos", Some(&focus), |ctx| render(&gallery(Some(false)), ctx));
        assert!(!html.contains("a2ui-lightbox"));
        assert!(!html.contains("?focus="));
    }

    #[test]
    fn out_of_range_focus_stays_closed() {
        let focus = GalleryFocus::new("photos", 9);
        let html = render_html("photos", Some(&focus), |ctx| render(&gallery(None), ctx));
        assert!(!html.contains("a2ui-lightbox"));
    }

    #[test]
    fn columns_are_clamped() {
        let props = ImageGalleryProps {
            columns: Some(0),
            ..gallery(None)
        };
        let html = render_html("g", None, |ctx| render(&props, ctx));
        assert!(html.contains("cols-1"));
        assert!(html.contains("--a2ui-columns: 1"));
    }
}
