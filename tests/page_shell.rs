mod support;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode, header::CONTENT_TYPE};
use tower::ServiceExt;

use support::{StubGenerator, app, body_string, gallery_surface};

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).expect("request should build")
}

#[tokio::test]
async fn index_lists_article_cards() {
    let response = app(Arc::new(StubGenerator::returning(gallery_surface())))
        .oneshot(get("/"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"href="/articles/orbits""#));
    assert!(html.contains("By Kepler · January 2, 2024"));
    assert!(html.contains("Planets move in ellipses."));
    assert!(html.contains(r#"href="/articles/notes""#));
    assert!(html.contains("Untitled"));
    assert!(html.contains("a2ui-card-placeholder"));
}

#[tokio::test]
async fn article_page_renders_the_surface_and_caches_it() {
    let generator = Arc::new(StubGenerator::returning(gallery_surface()));
    let app = app(generator.clone());

    let response = app
        .clone()
        .oneshot(get("/articles/orbits"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains(r#"<div class="a2ui-surface">"#));
    assert!(html.contains("a2ui-hero"));
    assert!(html.contains("Rendered from 2 components."));
    assert!(!html.contains("a2ui-lightbox__image"));

    let response = app
        .clone()
        .oneshot(get("/articles/orbits"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.calls(), 1);

    let response = app
        .oneshot(get("/articles/orbits?refresh=true"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(generator.calls(), 2);
}

#[tokio::test]
async fn focus_query_opens_the_lightbox() {
    let response = app(Arc::new(StubGenerator::returning(gallery_surface())))
        .oneshot(get("/articles/orbits?focus=photos%3A1"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("a2ui-lightbox__image"));
    assert!(html.contains("a2ui-lightbox__close"));
    assert!(html.contains("https://img.example/b.jpg"));
}

#[tokio::test]
async fn malformed_focus_is_ignored() {
    let response = app(Arc::new(StubGenerator::returning(gallery_surface())))
        .oneshot(get("/articles/orbits?focus=photos"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(!html.contains("a2ui-lightbox__image"));
}

#[tokio::test]
async fn generator_failures_fall_back_to_the_plain_layout() {
    let response = app(Arc::new(StubGenerator::failing()))
        .oneshot(get("/articles/orbits"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::OK);
    let html = body_string(response).await;
    assert!(html.contains("Rendered from 3 components."));
    assert!(html.contains("<strong>ellipses</strong>"));
    assert!(html.contains("Kepler"));
}

#[tokio::test]
async fn unknown_articles_render_the_not_found_page() {
    let response = app(Arc::new(StubGenerator::returning(gallery_surface())))
        .oneshot(get("/articles/missing"))
        .await
        .expect("router should respond");

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let html = body_string(response).await;
    assert!(html.contains("Article Not Found"));
    assert!(html.contains(r#"href="/""#));
}

#[tokio::test]
async fn unknown_routes_are_not_found() {
    let response = app(Arc::new(StubGenerator::failing()))
        .oneshot(get("/nowhere"))
        .await
        .expect("router should respond");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn serves_component_stylesheets() {
    for path in ["site.css", "a2ui.css", "code.css"] {
        let response = app(Arc::new(StubGenerator::failing()))
            .oneshot(get(&format!("/static/public/styles/{path}")))
            .await
            .expect("router should respond");

        assert_eq!(response.status(), StatusCode::OK, "{path}");
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/css"), "{path}: {content_type}");
    }
}
