use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::application::agent::{RenderRequest, component_schema};
use crate::application::content::DEFAULT_TITLE;

use super::error::{ApiError, messages};
use super::state::{AGENT_NAME, ApiState};

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub agent: &'static str,
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        agent: AGENT_NAME,
    })
}

pub async fn schema() -> Json<&'static Value> {
    Json(component_schema())
}

pub async fn render_surface(
    State(state): State<ApiState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match payload {
        Ok(payload) => payload,
        Err(rejection) => {
            return ApiError::bad_request(messages::INVALID_JSON, rejection.body_text())
                .into_response();
        }
    };

    let Some(content) = request.content() else {
        return ApiError::bad_request(messages::CONTENT_REQUIRED, "content missing or blank")
            .into_response();
    };
    let meta = request.meta.clone().unwrap_or_default();

    let title = match meta.title.trim() {
        "" => DEFAULT_TITLE,
        title => title,
    };
    info!(
        target = "infra::http::api::render",
        title,
        content_len = content.len(),
        "Generating UI for article"
    );

    match state.generator.generate(content, &meta).await {
        Ok(envelope) => Json(envelope).into_response(),
        Err(err) => ApiError::generation_failed(&err).into_response(),
    }
}
