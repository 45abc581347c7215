//! Agent endpoints: surface generation, component schema and health.

pub mod error;
pub mod handlers;
pub mod state;

pub use state::ApiState;

use axum::{
    Router,
    routing::{get, post},
};

use crate::infra::http::RouterState;

pub fn build_api_router() -> Router<RouterState> {
    Router::new()
        .route("/api/a2ui/render", post(handlers::render_surface))
        .route("/api/a2ui/schema", get(handlers::schema))
        .route("/api/health", get(handlers::health))
}
