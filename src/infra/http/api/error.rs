use std::error::Error as StdError;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::error::ErrorReport;

pub mod messages {
    pub const INVALID_JSON: &str = "Invalid JSON body";
    pub const CONTENT_REQUIRED: &str = "Content is required";
    pub const GENERATION_FAILED: &str = "Failed to generate UI components";
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// JSON error response for the agent endpoints.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: &'static str,
    details: Option<String>,
    report: ErrorReport,
}

impl ApiError {
    pub fn bad_request(message: &'static str, diagnostic: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            details: None,
            report: ErrorReport::from_message("infra::http::api", StatusCode::BAD_REQUEST, diagnostic),
        }
    }

    /// 500 whose body exposes the failure text as `details`.
    pub fn generation_failed(error: &dyn StdError) -> Self {
        let status = StatusCode::INTERNAL_SERVER_ERROR;
        Self {
            status,
            message: messages::GENERATION_FAILED,
            details: Some(error.to_string()),
            report: ErrorReport::from_error("infra::http::api::render", status, error),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.message.to_string(),
            details: self.details,
        };
        let mut response = (self.status, Json(body)).into_response();
        self.report.attach(&mut response);
        response
    }
}
