use std::time::{Duration, Instant};

use async_trait::async_trait;
use metrics::histogram;
use reqwest::{Client, Url};
use serde::Deserialize;
use serde_json::json;
use tracing::{error, info};

use crate::config::AgentSettings;
use crate::domain::article::ArticleMeta;
use crate::domain::surface::SurfaceEnvelope;

use super::prompt::{SYSTEM_PROMPT, article_prompt};
use super::{AgentError, SurfaceGenerator, parse_envelope};

const API_KEY_HEADER: &str = "x-goog-api-key";

#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: Url,
    pub timeout: Duration,
}

impl From<&AgentSettings> for GeminiConfig {
    fn from(settings: &AgentSettings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            model: settings.model.clone(),
            api_base: settings.api_base.clone(),
            timeout: Duration::from_secs(settings.timeout_seconds.get()),
        }
    }
}

/// Surface generation through the Gemini `generateContent` REST API.
#[derive(Debug, Clone)]
pub struct GeminiGenerator {
    client: Client,
    config: GeminiConfig,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiGenerator {
    pub fn new(config: GeminiConfig) -> Result<Self, AgentError> {
        let client = Client::builder()
            .user_agent(concat!("a2ui-content/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(AgentError::request)?;
        Ok(Self { client, config })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn endpoint(&self) -> Result<Url, AgentError> {
        let base = self.config.api_base.as_str().trim_end_matches('/');
        Url::parse(&format!(
            "{base}/v1beta/models/{}:generateContent",
            self.config.model
        ))
        .map_err(AgentError::request)
    }

    async fn call(&self, content: &str, meta: &ArticleMeta) -> Result<SurfaceEnvelope, AgentError> {
        let api_key = self
            .config
            .api_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .ok_or(AgentError::MissingApiKey)?;

        let body = json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": SYSTEM_PROMPT },
                    { "text": article_prompt(content, meta) },
                ],
            }],
            "generationConfig": { "responseMimeType": "application/json" },
        });

        let response = self
            .client
            .post(self.endpoint()?)
            .header(API_KEY_HEADER, api_key)
            .json(&body)
            .send()
            .await
            .map_err(AgentError::request)?;

        let status = response.status();
        let bytes = response.bytes().await.map_err(AgentError::request)?;
        if !status.is_success() {
            return Err(AgentError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&bytes).into_owned(),
            });
        }

        let parsed: GenerateResponse = serde_json::from_slice(&bytes).map_err(AgentError::parse)?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .filter(|text| !text.trim().is_empty())
            .ok_or(AgentError::EmptyResponse)?;

        parse_envelope(&text)
    }
}

#[async_trait]
impl SurfaceGenerator for GeminiGenerator {
    async fn generate(
        &self,
        content: &str,
        meta: &ArticleMeta,
    ) -> Result<SurfaceEnvelope, AgentError> {
        let started = Instant::now();
        let result = self.call(content, meta).await;
        histogram!("a2ui_agent_generate_ms").record(started.elapsed().as_secs_f64() * 1000.0);

        match &result {
            Ok(envelope) => info!(
                target = "application::agent::gemini",
                model = %self.config.model,
                components = envelope.surface_update.components.len(),
                "Generated surface"
            ),
            Err(err) => error!(
                target = "application::agent::gemini",
                model = %self.config.model,
                error = %err,
                "Surface generation failed"
            ),
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use httpmock::MockServer;

    use super::*;

    fn generator(server: &MockServer, api_key: Option<&str>) -> GeminiGenerator {
        GeminiGenerator::new(GeminiConfig {
            api_key: api_key.map(str::to_string),
            model: "gemini-test".into(),
            api_base: Url::parse(&server.base_url()).expect("mock url"),
            timeout: Duration::from_secs(5),
        })
        .expect("client builds")
    }

    fn meta() -> ArticleMeta {
        ArticleMeta {
            title: "Orbits".into(),
            ..ArticleMeta::default()
        }
    }

    #[tokio::test]
    async fn parses_first_candidate_text() {
        let server = MockServer::start();
        let text = r#"{"surfaceUpdate":{"surfaceId":"article-view","components":[{"id":"t","component":{"TextBlock":{"content":"hi"}}}]}}"#;
        let mock = server.mock(|when, then| {
            when.method("POST")
                .path("/v1beta/models/gemini-test:generateContent")
                .header("x-goog-api-key", "secret");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({
                    "candidates": [{ "content": { "parts": [{ "text": text }] } }]
                }));
        });

        let envelope = generator(&server, Some("secret"))
            .generate("# Orbits", &meta())
            .await
            .expect("generation succeeds");
        mock.assert();
        assert_eq!(envelope.surface_update.components.len(), 1);
    }

    #[tokio::test]
    async fn missing_key_fails_without_calling_out() {
        let server = MockServer::start();
        let err = generator(&server, None)
            .generate("body", &meta())
            .await
            .expect_err("no key");
        assert!(matches!(err, AgentError::MissingApiKey));
    }

    #[tokio::test]
    async fn non_success_status_is_reported() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST");
            then.status(429).body("quota exceeded");
        });

        let err = generator(&server, Some("k"))
            .generate("body", &meta())
            .await
            .expect_err("429");
        assert!(matches!(err, AgentError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn empty_candidates_are_an_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method("POST");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(json!({ "candidates": [] }));
        });

        let err = generator(&server, Some("k"))
            .generate("body", &meta())
            .await
            .expect_err("empty");
        assert!(matches!(err, AgentError::EmptyResponse));
    }
}
