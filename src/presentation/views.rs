use crate::application::article_view::ArticleView;
use crate::application::error::{ErrorReport, HttpError};
use crate::application::surface::format_human_date;
use crate::domain::article::ArticleCard;
use askama::{Error as AskamaError, Template};
use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

pub const SITE_TITLE: &str = "A2UI Articles";
const SITE_DESCRIPTION: &str = "Articles laid out by an agent as A2UI component surfaces.";

#[derive(Debug, Error)]
#[error("{public_message}")]
pub struct TemplateRenderError {
    pub(crate) source: &'static str,
    pub(crate) public_message: &'static str,
    #[source]
    pub(crate) error: AskamaError,
}

impl TemplateRenderError {
    pub fn new(source: &'static str, public_message: &'static str, error: AskamaError) -> Self {
        Self {
            source,
            public_message,
            error,
        }
    }
}

impl From<TemplateRenderError> for HttpError {
    fn from(err: TemplateRenderError) -> Self {
        let TemplateRenderError {
            source,
            public_message,
            error,
        } = err;

        HttpError::from_error(
            source,
            StatusCode::INTERNAL_SERVER_ERROR,
            public_message,
            &error,
        )
    }
}

pub fn render_template<T: Template>(template: T) -> Result<Html<String>, HttpError> {
    template.render().map(Html).map_err(|err| {
        TemplateRenderError::new(
            "presentation::views::render_template",
            "Template rendering failed",
            err,
        )
        .into()
    })
}

pub fn render_template_response<T: Template>(template: T, status: StatusCode) -> Response {
    match render_template(template) {
        Ok(html) => (status, html).into_response(),
        Err(err) => err.into_response(),
    }
}

pub fn render_not_found_response() -> Response {
    let view = LayoutContext::new(PageMetaView::titled("Not found"), ErrorPageView::not_found());
    let mut response = render_template_response(ErrorTemplate { view }, StatusCode::NOT_FOUND);
    ErrorReport::from_message(
        "presentation::views::render_not_found_response",
        StatusCode::NOT_FOUND,
        "Resource not found",
    )
    .attach(&mut response);
    response
}

/// Error page for failures surfaced outside the renderer. The report is
/// attached for the response logger.
pub fn render_error_response(status: StatusCode, message: &str, report: ErrorReport) -> Response {
    let view = LayoutContext::new(
        PageMetaView::titled("Something went wrong"),
        ErrorPageView::failure(message),
    );
    let mut response = render_template_response(ErrorTemplate { view }, status);
    report.attach(&mut response);
    response
}

#[derive(Clone)]
pub struct PageMetaView {
    pub title: String,
    pub description: String,
}

impl PageMetaView {
    pub fn site() -> Self {
        Self {
            title: SITE_TITLE.to_string(),
            description: SITE_DESCRIPTION.to_string(),
        }
    }

    pub fn titled(title: &str) -> Self {
        Self {
            title: format!("{title} · {SITE_TITLE}"),
            description: SITE_DESCRIPTION.to_string(),
        }
    }
}

#[derive(Clone)]
pub struct LayoutContext<T> {
    pub site_title: &'static str,
    pub meta: PageMetaView,
    pub content: T,
}

impl<T> LayoutContext<T> {
    pub fn new(meta: PageMetaView, content: T) -> Self {
        Self {
            site_title: SITE_TITLE,
            meta,
            content,
        }
    }
}

#[derive(Clone)]
pub struct ArticleCardView {
    pub href: String,
    pub title: String,
    pub byline: String,
    pub excerpt: String,
    pub thumbnail: Option<String>,
    pub tags: Vec<String>,
}

impl From<ArticleCard> for ArticleCardView {
    fn from(card: ArticleCard) -> Self {
        Self {
            href: format!("/articles/{}", card.id),
            byline: format!("By {} · {}", card.author, format_human_date(&card.date)),
            title: card.title,
            excerpt: card.excerpt,
            thumbnail: card.thumbnail,
            tags: card.tags,
        }
    }
}

pub struct IndexView {
    pub cards: Vec<ArticleCardView>,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub view: LayoutContext<IndexView>,
}

pub struct ArticlePageView {
    pub title: String,
    pub surface_html: String,
    pub component_count: usize,
    pub refresh_href: String,
}

impl From<&ArticleView> for ArticlePageView {
    fn from(view: &ArticleView) -> Self {
        Self {
            title: view.article.meta.title.clone(),
            surface_html: view.rendered.to_html(),
            component_count: view.component_count(),
            refresh_href: format!("/articles/{}?refresh=true", view.article.id),
        }
    }
}

#[derive(Template)]
#[template(path = "article.html")]
pub struct ArticleTemplate {
    pub view: LayoutContext<ArticlePageView>,
}

pub struct ErrorPageView {
    pub title: String,
    pub message: String,
    pub primary_action: Option<ErrorAction>,
}

impl ErrorPageView {
    pub fn not_found() -> Self {
        Self {
            title: "Article Not Found".to_string(),
            message: "The article you requested does not exist. Return to the list to pick another one.".to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }

    pub fn failure(message: &str) -> Self {
        Self {
            title: "Something went wrong".to_string(),
            message: message.to_string(),
            primary_action: Some(ErrorAction::home()),
        }
    }
}

pub struct ErrorAction {
    pub href: String,
    pub label: String,
}

impl ErrorAction {
    pub fn home() -> Self {
        Self {
            href: "/".to_string(),
            label: "Back to articles".to_string(),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate {
    pub view: LayoutContext<ErrorPageView>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> ArticleCard {
        ArticleCard {
            id: "rust-async".into(),
            title: "Async <Rust>".into(),
            author: "Ana".into(),
            date: "2024-03-05".into(),
            excerpt: "A short tour.".into(),
            thumbnail: None,
            tags: vec!["rust".into()],
        }
    }

    #[test]
    fn cards_link_to_articles_with_a_byline() {
        let view = ArticleCardView::from(card());
        assert_eq!(view.href, "/articles/rust-async");
        assert_eq!(view.byline, "By Ana · March 5, 2024");
    }

    #[test]
    fn index_escapes_card_text() {
        let template = IndexTemplate {
            view: LayoutContext::new(
                PageMetaView::site(),
                IndexView {
                    cards: vec![card().into()],
                },
            ),
        };
        let html = template.render().expect("index renders");
        assert!(html.contains("Async &#60;Rust&#62;") || html.contains("Async &lt;Rust&gt;"));
        assert!(html.contains(r#"href="/articles/rust-async""#));
        assert!(html.contains("a2ui-card-placeholder"));
    }

    #[test]
    fn article_page_embeds_surface_markup_verbatim() {
        let template = ArticleTemplate {
            view: LayoutContext::new(
                PageMetaView::titled("Demo"),
                ArticlePageView {
                    title: "Demo".into(),
                    surface_html: r#"<div class="a2ui-surface"></div>"#.into(),
                    component_count: 3,
                    refresh_href: "/articles/demo?refresh=true".into(),
                },
            ),
        };
        let html = template.render().expect("article renders");
        assert!(html.contains(r#"<div class="a2ui-surface"></div>"#));
        assert!(html.contains("3 components"));
    }

    #[test]
    fn not_found_page_has_status_and_report() {
        let response = render_not_found_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert!(response.extensions().get::<ErrorReport>().is_some());
    }
}
