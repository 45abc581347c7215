mod support;

use std::sync::Arc;

use a2ui_content::application::error::ErrorReport;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header::CONTENT_TYPE};
use pretty_assertions::assert_eq;
use serde_json::json;
use tower::ServiceExt;

use support::{StubGenerator, app, body_json, text_surface};

fn post_render(body: impl Into<Body>) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri("/api/a2ui/render")
        .header(CONTENT_TYPE, "application/json")
        .body(body.into())
        .expect("request should build")
}

#[tokio::test]
async fn health_reports_the_agent_name() {
    let response = app(Arc::new(StubGenerator::failing()))
        .oneshot(Request::get("/api/health").body(Body::empty()).unwrap())
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "status": "ok", "agent": "a2ui-content" })
    );
}

#[tokio::test]
async fn schema_describes_every_component() {
    let response = app(Arc::new(StubGenerator::failing()))
        .oneshot(Request::get("/api/a2ui/schema").body(Body::empty()).unwrap())
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let schema = body_json(response).await;
    let components = schema["definitions"]["components"]
        .as_object()
        .expect("components map");
    assert_eq!(components.len(), 13);
    for kind in ["HeroSection", "ImageGallery", "Row", "Column", "Metadata", "Divider"] {
        assert!(components.contains_key(kind), "missing {kind}");
    }
}

#[tokio::test]
async fn render_returns_the_generated_envelope() {
    let generator = Arc::new(StubGenerator::returning(text_surface("Hello")));
    let body = json!({ "content": "# Hello", "meta": { "title": "Greeting" } }).to_string();

    let response = app(generator.clone())
        .oneshot(post_render(body))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let envelope = body_json(response).await;
    assert_eq!(envelope["surfaceUpdate"]["surfaceId"], "article-view");
    assert_eq!(
        envelope["surfaceUpdate"]["components"][0],
        json!({ "id": "body", "component": { "TextBlock": { "content": "Hello" } } })
    );
    assert_eq!(generator.calls(), 1);
    assert_eq!(generator.last_title().as_deref(), Some("Greeting"));
}

#[tokio::test]
async fn render_without_meta_uses_empty_metadata() {
    let generator = Arc::new(StubGenerator::returning(text_surface("x")));
    let response = app(generator.clone())
        .oneshot(post_render(json!({ "content": "body" }).to_string()))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.last_title().as_deref(), Some(""));
}

#[tokio::test]
async fn missing_or_blank_content_is_rejected() {
    for body in [json!({}), json!({ "content": "   " }), json!({ "content": null })] {
        let generator = Arc::new(StubGenerator::returning(text_surface("x")));
        let response = app(generator.clone())
            .oneshot(post_render(body.to_string()))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Content is required" })
        );
        assert_eq!(generator.calls(), 0);
    }
}

#[tokio::test]
async fn malformed_json_is_rejected() {
    let response = app(Arc::new(StubGenerator::returning(text_surface("x"))))
        .oneshot(post_render("{ not json"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await,
        json!({ "error": "Invalid JSON body" })
    );
}

#[tokio::test]
async fn generation_failures_map_to_500_with_details() {
    let response = app(Arc::new(StubGenerator::failing()))
        .oneshot(post_render(json!({ "content": "body" }).to_string()))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    // The logging middleware consumes the report before the response leaves.
    assert!(response.extensions().get::<ErrorReport>().is_none());

    let body = body_json(response).await;
    assert_eq!(body["error"], "Failed to generate UI components");
    let details = body["details"].as_str().expect("details string");
    assert!(details.contains("503"), "details: {details}");
    assert!(details.contains("model overloaded"), "details: {details}");
}
