//! Agent side of the protocol: article in, surface update out.

mod gemini;
mod prompt;
mod schema;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::article::ArticleMeta;
use crate::domain::surface::SurfaceEnvelope;

pub use gemini::{GeminiConfig, GeminiGenerator};
pub use prompt::{SYSTEM_PROMPT, article_prompt};
pub use schema::component_schema;

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("agent api key is not configured")]
    MissingApiKey,
    #[error("agent request failed: {message}")]
    Request { message: String },
    #[error("agent responded with status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("agent response contained no candidates")]
    EmptyResponse,
    #[error("agent response is not a surface update: {message}")]
    Parse { message: String },
}

impl AgentError {
    pub fn request(err: impl std::fmt::Display) -> Self {
        Self::Request {
            message: err.to_string(),
        }
    }

    pub fn parse(err: impl std::fmt::Display) -> Self {
        Self::Parse {
            message: err.to_string(),
        }
    }
}

/// Body of `POST /api/a2ui/render`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderRequest {
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub meta: Option<ArticleMeta>,
}

impl RenderRequest {
    /// Markdown content, when present and not blank.
    pub fn content(&self) -> Option<&str> {
        self.content
            .as_deref()
            .filter(|content| !content.trim().is_empty())
    }
}

/// Produces a surface update for an article.
#[async_trait]
pub trait SurfaceGenerator: Send + Sync {
    async fn generate(
        &self,
        content: &str,
        meta: &ArticleMeta,
    ) -> Result<SurfaceEnvelope, AgentError>;
}

/// Parses model output into an envelope, tolerating a surrounding code fence.
pub fn parse_envelope(text: &str) -> Result<SurfaceEnvelope, AgentError> {
    let trimmed = text.trim();
    let body = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.trim_end().strip_suffix("```"))
        .unwrap_or(trimmed);
    serde_json::from_str(body).map_err(AgentError::parse)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_content_is_treated_as_missing() {
        let request: RenderRequest = serde_json::from_str(r#"{"content":"   "}"#).unwrap();
        assert_eq!(request.content(), None);

        let request: RenderRequest = serde_json::from_str(r##"{"content":"# Hi"}"##).unwrap();
        assert_eq!(request.content(), Some("# Hi"));
        assert!(request.meta.is_none());
    }

    #[test]
    fn parses_fenced_envelopes() {
        let text = "```json\n{\"surfaceUpdate\":{\"surfaceId\":\"s\",\"components\":[]}}\n```";
        let envelope = parse_envelope(text).expect("fenced json parses");
        assert_eq!(envelope.surface_update.surface_id, "s");
    }

    #[test]
    fn rejects_non_envelopes() {
        assert!(matches!(
            parse_envelope(r#"{"components":[]}"#),
            Err(AgentError::Parse { .. })
        ));
    }
}
