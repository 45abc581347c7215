use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    routing::get,
};
use serde::Deserialize;
use tracing::debug;

use crate::{
    application::{
        article_view::{ArticleViewService, ViewRequest},
        error::{AppError, ErrorReport},
    },
    domain::{error::DomainError, lightbox::GalleryFocus},
    presentation::views::{
        ArticlePageView, ArticleTemplate, IndexTemplate, IndexView, LayoutContext, PageMetaView,
        render_error_response, render_not_found_response, render_template_response,
    },
};

use super::RouterState;

#[derive(Clone)]
pub struct HttpState {
    pub articles: Arc<ArticleViewService>,
}

pub fn build_public_router() -> Router<RouterState> {
    Router::new()
        .route("/", get(index))
        .route("/articles/{id}", get(article))
        .route(
            "/static/public/{*path}",
            get(crate::infra::assets::serve_public),
        )
        .fallback(fallback)
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ArticleQuery {
    focus: Option<String>,
    refresh: Option<String>,
}

impl ArticleQuery {
    fn into_view_request(self) -> ViewRequest {
        let focus = self
            .focus
            .filter(|raw| !raw.is_empty())
            .and_then(|raw| match raw.parse::<GalleryFocus>() {
                Ok(focus) => Some(focus),
                Err(err) => {
                    debug!(
                        target = "infra::http::public",
                        focus = %raw,
                        error = %err,
                        "Ignoring malformed focus parameter"
                    );
                    None
                }
            });
        let refresh = self
            .refresh
            .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "1");
        ViewRequest { focus, refresh }
    }
}

async fn index(State(state): State<HttpState>) -> Response {
    match state.articles.cards().await {
        Ok(cards) => {
            let view = LayoutContext::new(
                PageMetaView::site(),
                IndexView {
                    cards: cards.into_iter().map(Into::into).collect(),
                },
            );
            render_template_response(IndexTemplate { view }, StatusCode::OK)
        }
        Err(err) => app_error_to_response("infra::http::public::index", err),
    }
}

async fn article(
    State(state): State<HttpState>,
    Path(id): Path<String>,
    Query(query): Query<ArticleQuery>,
) -> Response {
    let request = query.into_view_request();
    match state.articles.view(&id, &request).await {
        Ok(article) => {
            let content = ArticlePageView::from(&article);
            let view = LayoutContext::new(PageMetaView::titled(&content.title), content);
            render_template_response(ArticleTemplate { view }, StatusCode::OK)
        }
        Err(err) => app_error_to_response("infra::http::public::article", err),
    }
}

async fn fallback() -> Response {
    render_not_found_response()
}

fn app_error_to_response(source: &'static str, err: AppError) -> Response {
    match err {
        AppError::Domain(DomainError::NotFound { .. }) => render_not_found_response(),
        other => {
            let status = other.status_code();
            let report = ErrorReport::from_error(source, status, &other);
            render_error_response(status, other.presentation_message(), report)
        }
    }
}
