#![allow(dead_code)]

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use a2ui_content::application::agent::{AgentError, SurfaceGenerator};
use a2ui_content::application::article_view::ArticleViewService;
use a2ui_content::application::content::{ArticleSource, ContentError, parse_article};
use a2ui_content::application::markdown::markdown_service;
use a2ui_content::application::surface::SurfaceRenderer;
use a2ui_content::application::transport::InProcessTransport;
use a2ui_content::domain::article::{Article, ArticleMeta};
use a2ui_content::domain::surface::{ComponentEntry, ComponentNode, SurfaceEnvelope, SurfaceUpdate};
use a2ui_content::infra::http::{ApiState, HttpState, RouterState, build_router};
use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::Response;
use http_body_util::BodyExt;

/// Generator returning a canned surface, or failing when `surface` is `None`.
pub struct StubGenerator {
    surface: Option<SurfaceUpdate>,
    calls: AtomicUsize,
    last_title: Mutex<Option<String>>,
}

impl StubGenerator {
    pub fn returning(surface: SurfaceUpdate) -> Self {
        Self {
            surface: Some(surface),
            calls: AtomicUsize::new(0),
            last_title: Mutex::new(None),
        }
    }

    pub fn failing() -> Self {
        Self {
            surface: None,
            calls: AtomicUsize::new(0),
            last_title: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_title(&self) -> Option<String> {
        self.last_title.lock().unwrap().clone()
    }
}

#[async_trait]
impl SurfaceGenerator for StubGenerator {
    async fn generate(
        &self,
        _content: &str,
        meta: &ArticleMeta,
    ) -> Result<SurfaceEnvelope, AgentError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_title.lock().unwrap() = Some(meta.title.clone());
        match &self.surface {
            Some(surface) => Ok(surface.clone().into()),
            None => Err(AgentError::Status {
                status: 503,
                body: "model overloaded".into(),
            }),
        }
    }
}

/// Fixed in-memory article list.
pub struct MemoryArticles(pub Vec<Article>);

#[async_trait]
impl ArticleSource for MemoryArticles {
    async fn list(&self) -> Result<Vec<Article>, ContentError> {
        Ok(self.0.clone())
    }
}

pub fn sample_articles() -> Vec<Article> {
    vec![
        parse_article(
            "orbits",
            "---\ntitle: Orbits\nauthor: Kepler\ndate: 2024-01-02\ntags: [space]\n---\n\nPlanets move in **ellipses**.",
        ),
        parse_article("notes", "Just some notes without frontmatter."),
    ]
}

pub fn gallery_surface() -> SurfaceUpdate {
    let entries: Vec<ComponentEntry> = serde_json::from_value(serde_json::json!([
        { "id": "title", "component": { "HeroSection": { "title": "Orbits" } } },
        { "id": "photos", "component": { "ImageGallery": { "images": [
            { "url": "https://img.example/a.jpg", "caption": "First" },
            { "url": "https://img.example/b.jpg", "caption": "Second" }
        ] } } }
    ]))
    .expect("valid entries");
    SurfaceUpdate::new("article-view", entries)
}

pub fn text_surface(text: &str) -> SurfaceUpdate {
    let node = ComponentNode::from_value(serde_json::json!({ "TextBlock": { "content": text } }));
    SurfaceUpdate::new("article-view", vec![ComponentEntry::new("body", node)])
}

pub fn app(generator: Arc<StubGenerator>) -> Router {
    app_with_articles(generator, sample_articles())
}

pub fn app_with_articles(generator: Arc<StubGenerator>, articles: Vec<Article>) -> Router {
    let transport = Arc::new(InProcessTransport::new(generator.clone()));
    let service = ArticleViewService::new(
        Arc::new(MemoryArticles(articles)),
        transport,
        SurfaceRenderer::new(markdown_service()),
        NonZeroUsize::new(8).unwrap(),
    );
    build_router(RouterState {
        http: HttpState {
            articles: Arc::new(service),
        },
        api: ApiState::new(generator),
    })
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body collects")
        .to_bytes();
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).expect("json body")
}
