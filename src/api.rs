//! Generative-language API interaction.
//!
//! This module wraps the two endpoints the pipeline needs:
//! - `GET models`: discover a working model identifier
//! - `POST models/{model}:generateContent`: send a single-part text prompt
//!
//! # Architecture
//!
//! - [`LanguageModel`]: Core trait defining async prompt → text interaction
//! - [`GeminiClient`]: HTTP implementation against the v1beta REST API
//!
//! The pipeline only talks to [`LanguageModel`], so tests can substitute a
//! scripted model without any network access.

use crate::error::ApiError;
use crate::utils::truncate_for_log;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info, instrument, warn};
use url::Url;

/// Trait for async LLM interaction.
///
/// Implementors send a prompt and return the generated text verbatim.
pub trait LanguageModel {
    /// Identifier of the model answering prompts, for display.
    fn model_name(&self) -> &str;

    /// Send `prompt` and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, ApiError>;
}

/// Build the shared HTTP client used for both upstream APIs.
pub fn http_client(timeout_secs: u64) -> Result<Client, ApiError> {
    let client = Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}

#[derive(Debug, Default, Deserialize)]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: String,
    #[serde(default, rename = "supportedGenerationMethods")]
    supported_generation_methods: Vec<String>,
}

impl ModelInfo {
    fn can_generate(&self) -> bool {
        self.supported_generation_methods
            .iter()
            .any(|m| m == "generateContent")
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Pick a model from a `models` listing.
///
/// Prefers the first generation-capable model whose name contains `flash`,
/// then the first generation-capable model. The `models/` prefix is removed.
fn select_model(list: &ModelList) -> Option<String> {
    let capable = || list.models.iter().filter(|m| m.can_generate());
    capable()
        .find(|m| m.name.contains("flash"))
        .or_else(|| capable().next())
        .map(|m| m.name.trim_start_matches("models/").to_string())
}

/// Pull `candidates[0].content.parts[0].text` out of a generate response.
fn extract_text(response: GenerateResponse) -> Result<String, ApiError> {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|c| c.parts.into_iter().next())
        .and_then(|p| p.text)
        .ok_or(ApiError::EmptyReply)
}

/// [`LanguageModel`] backed by the generative-language REST API.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    /// Create a client bound to a known model.
    pub fn new(http: Client, base_url: &str, api_key: &str, model: &str) -> Self {
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
        }
    }

    /// Create a client bound to a discovered model.
    ///
    /// Queries the list-models endpoint and falls back to `default_model` on
    /// any failure. Never fails itself.
    #[instrument(level = "info", skip(http, api_key))]
    pub async fn discover(http: Client, base_url: &str, api_key: &str, default_model: &str) -> Self {
        let mut client = Self::new(http, base_url, api_key, default_model);
        match client.list_models().await {
            Ok(list) => match select_model(&list) {
                Some(model) => {
                    info!(%model, available = list.models.len(), "Discovered model");
                    client.model = model;
                }
                None => warn!(default_model, "No generation-capable model listed; using default"),
            },
            Err(e) => warn!(error = %e, default_model, "Model discovery failed; using default"),
        }
        client
    }

    async fn list_models(&self) -> Result<ModelList, ApiError> {
        let url = Url::parse_with_params(
            &format!("{}/models", self.base_url),
            &[("key", self.api_key.as_str())],
        )?;
        let resp = self.http.get(url).send().await.map_err(|e| e.without_url())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.without_url())?;
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 200),
            });
        }
        Ok(serde_json::from_str(&body)?)
    }
}

impl LanguageModel for GeminiClient {
    fn model_name(&self) -> &str {
        &self.model
    }

    #[instrument(level = "info", skip_all, fields(model = %self.model))]
    async fn generate(&self, prompt: &str) -> Result<String, ApiError> {
        let t0 = Instant::now();
        let url = Url::parse_with_params(
            &format!(
                "{}/models/{}:generateContent",
                self.base_url,
                urlencoding::encode(&self.model)
            ),
            &[("key", self.api_key.as_str())],
        )?;
        let payload = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let resp = self.http.post(url).json(&payload).send().await.map_err(|e| e.without_url())?;
        let status = resp.status();
        let body = resp.text().await.map_err(|e| e.without_url())?;
        let dt = t0.elapsed();

        if status.as_u16() != 200 {
            warn!(
                status = status.as_u16(),
                elapsed_ms = dt.as_millis() as u64,
                "generateContent returned non-200"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                body: truncate_for_log(&body, 200),
            });
        }

        let text = extract_text(serde_json::from_str(&body)?)?;
        debug!(
            elapsed_ms = dt.as_millis() as u64,
            reply = %truncate_for_log(&text, 300),
            "generateContent succeeded"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::testing::{canned_http, closed_port};

    fn list(json: &str) -> ModelList {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_select_model_prefers_flash() {
        let models = list(
            r#"{"models": [
                {"name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"]},
                {"name": "models/embedding-001", "supportedGenerationMethods": ["embedContent"]},
                {"name": "models/gemini-2.0-flash", "supportedGenerationMethods": ["generateContent", "countTokens"]}
            ]}"#,
        );
        assert_eq!(select_model(&models).as_deref(), Some("gemini-2.0-flash"));
    }

    #[test]
    fn test_select_model_skips_flash_without_generate() {
        let models = list(
            r#"{"models": [
                {"name": "models/flash-embedder", "supportedGenerationMethods": ["embedContent"]},
                {"name": "models/gemini-pro", "supportedGenerationMethods": ["generateContent"]}
            ]}"#,
        );
        assert_eq!(select_model(&models).as_deref(), Some("gemini-pro"));
    }

    #[test]
    fn test_select_model_empty_list() {
        assert_eq!(select_model(&list(r#"{}"#)), None);
        assert_eq!(select_model(&list(r#"{"models": []}"#)), None);
    }

    #[test]
    fn test_extract_text_nested_path() {
        let resp: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "hello"}, {"text": "ignored"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(resp).unwrap(), "hello");
    }

    #[test]
    fn test_extract_text_missing_candidates() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"promptFeedback": {}}"#).unwrap();
        assert!(matches!(extract_text(resp), Err(ApiError::EmptyReply)));

        let resp: GenerateResponse =
            serde_json::from_str(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#).unwrap();
        assert!(matches!(extract_text(resp), Err(ApiError::EmptyReply)));
    }

    #[test]
    fn test_request_payload_shape() {
        let payload = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part { text: "prompt" }],
            }],
        };
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
    }

    #[test]
    fn test_new_trims_base_url() {
        let http = http_client(5).unwrap();
        let client = GeminiClient::new(http, "https://example.com/v1beta/", "k", "m");
        assert_eq!(client.base_url, "https://example.com/v1beta");
        assert_eq!(client.model_name(), "m");
    }

    #[tokio::test]
    async fn test_discover_unreachable_uses_default() {
        let base = closed_port().await;
        let client = GeminiClient::discover(http_client(5).unwrap(), &base, "k", "gemini-1.5-flash").await;
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_discover_error_status_uses_default() {
        let base = canned_http(403, r#"{"error": {"message": "API key not valid"}}"#).await;
        let client = GeminiClient::discover(http_client(5).unwrap(), &base, "k", "gemini-1.5-flash").await;
        assert_eq!(client.model_name(), "gemini-1.5-flash");
    }

    #[tokio::test]
    async fn test_discover_picks_listed_flash_model() {
        let base = canned_http(
            200,
            r#"{"models": [{"name": "models/gemini-2.0-flash", "supportedGenerationMethods": ["generateContent"]}]}"#,
        )
        .await;
        let client = GeminiClient::discover(http_client(5).unwrap(), &base, "k", "gemini-1.5-flash").await;
        assert_eq!(client.model_name(), "gemini-2.0-flash");
    }

    #[tokio::test]
    async fn test_generate_error_status() {
        let base = canned_http(429, r#"{"error": {"message": "quota"}}"#).await;
        let client = GeminiClient::new(http_client(5).unwrap(), &base, "k", "gemini-1.5-flash");
        let err = client.generate("hello").await.unwrap_err();
        assert!(matches!(err, ApiError::Status { status: 429, .. }));
    }

    #[tokio::test]
    async fn test_generate_returns_first_part_text() {
        let base = canned_http(200, r#"{"candidates": [{"content": {"parts": [{"text": "AI Act"}]}}]}"#).await;
        let client = GeminiClient::new(http_client(5).unwrap(), &base, "k", "gemini-1.5-flash");
        assert_eq!(client.generate("hello").await.unwrap(), "AI Act");
    }
}
