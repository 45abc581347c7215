//! Client side of the protocol.
//!
//! A transport always yields a surface: any failure to obtain one from the
//! agent is logged and replaced by [`fallback_surface`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use metrics::counter;
use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{info, warn};

use crate::application::agent::{AgentError, SurfaceGenerator};
use crate::domain::article::ArticleMeta;
use crate::domain::surface::{
    ComponentEntry, ComponentNode, HeroHeight, HeroSectionProps, MetadataProps, SurfaceEnvelope,
    SurfaceUpdate, TextBlockProps, TextVariant,
};

pub const FALLBACK_SURFACE_ID: &str = "article-view";

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("invalid transport endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("request to agent failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("agent returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("agent response is not a surface update: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Agent(#[from] AgentError),
}

/// Obtains the surface for an article. Never fails.
#[async_trait]
pub trait SurfaceTransport: Send + Sync {
    async fn render(&self, content: &str, meta: &ArticleMeta) -> SurfaceUpdate;
}

/// Three-entry surface used when the agent is unavailable.
pub fn fallback_surface(content: &str, meta: &ArticleMeta) -> SurfaceUpdate {
    let present = |value: &str| Some(value.to_string()).filter(|value| !value.is_empty());

    let components = vec![
        ComponentEntry::new(
            "meta-1",
            ComponentNode::Metadata(MetadataProps {
                author: present(&meta.author),
                date: present(&meta.date),
                tags: meta.tags.clone(),
                ..MetadataProps::default()
            }),
        ),
        ComponentEntry::new(
            "title-1",
            ComponentNode::HeroSection(HeroSectionProps {
                title: meta.title.clone(),
                subtitle: None,
                image_url: meta.hero_image.clone(),
                overlay: None,
                height: Some(HeroHeight::Medium),
                style: None,
            }),
        ),
        ComponentEntry::new(
            "content-1",
            ComponentNode::TextBlock(TextBlockProps {
                content: content.to_string(),
                variant: Some(TextVariant::Body),
                style: None,
            }),
        ),
    ];

    SurfaceUpdate::new(FALLBACK_SURFACE_ID, components)
}

fn substitute_fallback(
    transport: &'static str,
    error: &TransportError,
    content: &str,
    meta: &ArticleMeta,
) -> SurfaceUpdate {
    warn!(
        target = "application::transport",
        transport,
        title = %meta.title,
        error = %error,
        "Agent unavailable, using fallback surface"
    );
    counter!("a2ui_transport_fallback_total").increment(1);
    fallback_surface(content, meta)
}

#[derive(Serialize)]
struct RenderBody<'a> {
    content: &'a str,
    meta: &'a ArticleMeta,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Posts articles to a remote agent at `{endpoint}/render`.
#[derive(Debug, Clone)]
pub struct HttpSurfaceTransport {
    client: Client,
    render_url: Url,
}

impl HttpSurfaceTransport {
    pub fn new(endpoint: &Url, timeout: Duration) -> Result<Self, TransportError> {
        let base = endpoint.as_str().trim_end_matches('/');
        let render_url = Url::parse(&format!("{base}/render"))?;
        let client = Client::builder()
            .user_agent(concat!("a2ui-content/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;
        Ok(Self { client, render_url })
    }

    pub fn render_url(&self) -> &Url {
        &self.render_url
    }

    async fn request(&self, content: &str, meta: &ArticleMeta) -> Result<SurfaceUpdate, TransportError> {
        let response = self
            .client
            .post(self.render_url.clone())
            .json(&RenderBody { content, meta })
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;
        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(|body| body.error)
                .unwrap_or_else(|| "Failed to get A2UI response".to_string());
            return Err(TransportError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: SurfaceEnvelope = serde_json::from_slice(&bytes)?;
        Ok(envelope.surface_update)
    }
}

#[async_trait]
impl SurfaceTransport for HttpSurfaceTransport {
    async fn render(&self, content: &str, meta: &ArticleMeta) -> SurfaceUpdate {
        match self.request(content, meta).await {
            Ok(surface) => {
                info!(
                    target = "application::transport",
                    components = surface.components.len(),
                    surface_id = %surface.surface_id,
                    "Received surface from agent"
                );
                surface
            }
            Err(err) => substitute_fallback("http", &err, content, meta),
        }
    }
}

/// Calls a generator in the same process.
#[derive(Clone)]
pub struct InProcessTransport {
    generator: Arc<dyn SurfaceGenerator>,
}

impl InProcessTransport {
    pub fn new(generator: Arc<dyn SurfaceGenerator>) -> Self {
        Self { generator }
    }
}

#[async_trait]
impl SurfaceTransport for InProcessTransport {
    async fn render(&self, content: &str, meta: &ArticleMeta) -> SurfaceUpdate {
        match self.generator.generate(content, meta).await {
            Ok(envelope) => envelope.surface_update,
            Err(err) => substitute_fallback("in_process", &TransportError::from(err), content, meta),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::surface::ComponentKind;

    struct FailingGenerator;

    #[async_trait]
    impl SurfaceGenerator for FailingGenerator {
        async fn generate(
            &self,
            _content: &str,
            _meta: &ArticleMeta,
        ) -> Result<SurfaceEnvelope, AgentError> {
            Err(AgentError::MissingApiKey)
        }
    }

    fn meta() -> ArticleMeta {
        ArticleMeta {
            title: "Trail Notes".into(),
            author: "Ines".into(),
            date: "2024-05-01".into(),
            hero_image: Some("https://img.example/hero.jpg".into()),
            tags: Some(vec!["hiking".into()]),
            images: None,
        }
    }

    #[test]
    fn fallback_has_three_fixed_entries() {
        let surface = fallback_surface("Body text", &meta());

        assert_eq!(surface.surface_id, "article-view");
        let ids: Vec<_> = surface.components.iter().map(|entry| entry.id.as_str()).collect();
        assert_eq!(ids, ["meta-1", "title-1", "content-1"]);
        let kinds: Vec<_> = surface
            .components
            .iter()
            .map(|entry| entry.component.kind())
            .collect();
        assert_eq!(
            kinds,
            [
                Some(ComponentKind::Metadata),
                Some(ComponentKind::HeroSection),
                Some(ComponentKind::TextBlock)
            ]
        );

        let ComponentNode::HeroSection(hero) = &surface.components[1].component else {
            panic!("expected hero");
        };
        assert_eq!(hero.image_url.as_deref(), Some("https://img.example/hero.jpg"));
        assert_eq!(hero.height, Some(HeroHeight::Medium));

        let ComponentNode::TextBlock(text) = &surface.components[2].component else {
            panic!("expected text block");
        };
        assert_eq!(text.content, "Body text");
        assert_eq!(text.variant, Some(TextVariant::Body));
    }

    #[test]
    fn fallback_omits_blank_metadata() {
        let surface = fallback_surface("x", &ArticleMeta::default());
        let ComponentNode::Metadata(props) = &surface.components[0].component else {
            panic!("expected metadata");
        };
        assert_eq!(props.author, None);
        assert_eq!(props.date, None);
        assert_eq!(props.tags, None);
    }

    #[tokio::test]
    async fn in_process_failures_use_the_fallback() {
        let transport = InProcessTransport::new(Arc::new(FailingGenerator));
        let surface = transport.render("Body", &meta()).await;
        assert_eq!(surface, fallback_surface("Body", &meta()));
    }

    #[test]
    fn render_url_appends_path() {
        let endpoint = Url::parse("http://localhost:3001/api/a2ui/").expect("url");
        let transport =
            HttpSurfaceTransport::new(&endpoint, Duration::from_secs(1)).expect("transport");
        assert_eq!(
            transport.render_url().as_str(),
            "http://localhost:3001/api/a2ui/render"
        );
    }
}
