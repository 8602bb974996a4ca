/// LLM Client — the single point of entry for all Gemini API calls in the career agent.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All LLM interactions MUST go through the `LlmGateway` trait.
///
/// One request per call. Nothing here retries: a failed call is reported and the
/// caller decides whether to ask again.
use std::sync::LazyLock;

use anyhow::Context;
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::LlmConfig;

pub mod prompts;

/// The model used for all LLM calls. Hardcoded to prevent accidental drift.
pub const MODEL: &str = "gemini-1.5-flash";

/// First `{` through last `}`, across newlines.
static JSON_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("JSON block pattern is valid"));

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("An API request error occurred: {detail}")]
    RequestFailed { detail: String },

    #[error("AI response did not contain a valid JSON object.")]
    NoJsonFound { raw_text: String },

    #[error("Failed to decode the JSON object from the AI response.")]
    MalformedJson { raw_text: String },

    #[error("The API response format was unexpected.")]
    UnexpectedResponseShape,

    #[error("AI response of {len} bytes exceeds the {limit} byte scan limit.")]
    ResponseTooLarge { len: usize, limit: usize },
}

/// The seam between advisory logic and the model service.
/// Production uses `LlmClient`; tests substitute a canned implementation.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Sends `prompt` once and returns the JSON object embedded in the model's reply.
    async fn get_llm_response(&self, prompt: &str) -> Result<Map<String, Value>, GatewayError>;
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
struct GenerationConfig {
    #[serde(rename = "responseMimeType")]
    response_mime_type: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

impl GenerateContentResponse {
    /// Text of the first part of the first candidate.
    pub fn text(&self) -> Option<&str> {
        self.candidates
            .first()?
            .content
            .as_ref()?
            .parts
            .first()?
            .text
            .as_deref()
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
}

/// Gemini `generateContent` client.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
    endpoint: String,
    json_mode: bool,
    max_scan_bytes: usize,
}

impl LlmClient {
    pub fn new(config: &LlmConfig) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.api_key.clone(),
            endpoint: format!(
                "{}/models/{MODEL}:generateContent",
                config.api_url.trim_end_matches('/')
            ),
            json_mode: config.json_mode,
            max_scan_bytes: config.max_scan_bytes,
        })
    }

    /// Makes the raw call and returns the decoded response envelope.
    /// A body that is not JSON is `RequestFailed`; JSON of the wrong shape is
    /// `UnexpectedResponseShape`.
    async fn call(&self, prompt: &str) -> Result<GenerateContentResponse, GatewayError> {
        let request_body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
            generation_config: self.json_mode.then_some(GenerationConfig {
                response_mime_type: "application/json",
            }),
        };

        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await
            .map_err(|e| {
                error!("API Request Error: {e}");
                GatewayError::RequestFailed {
                    detail: e.to_string(),
                }
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            error!("API Request Error while reading body: {e}");
            GatewayError::RequestFailed {
                detail: e.to_string(),
            }
        })?;

        if !status.is_success() {
            let message = serde_json::from_str::<GeminiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            error!("API Request Error: status {status}: {message}");
            return Err(GatewayError::RequestFailed {
                detail: format!("status {}: {message}", status.as_u16()),
            });
        }

        let raw: Value = serde_json::from_str(&body).map_err(|e| {
            error!("API Request Error: response body is not JSON: {e}");
            GatewayError::RequestFailed {
                detail: format!("response body is not JSON: {e}"),
            }
        })?;

        serde_json::from_value(raw.clone()).map_err(|e| {
            error!("Unexpected response shape ({e}). Full API response: {raw}");
            GatewayError::UnexpectedResponseShape
        })
    }
}

#[async_trait]
impl LlmGateway for LlmClient {
    async fn get_llm_response(&self, prompt: &str) -> Result<Map<String, Value>, GatewayError> {
        let envelope = self.call(prompt).await?;

        let Some(text) = envelope.text() else {
            error!("Unexpected response shape. Full API response: {envelope:?}");
            return Err(GatewayError::UnexpectedResponseShape);
        };

        let parsed = extract_json_object(text, self.max_scan_bytes)?;
        debug!("LLM call succeeded: {} top-level keys", parsed.len());
        Ok(parsed)
    }
}

/// Locates the first-`{`-to-last-`}` span in free-form model text and parses it.
///
/// Best-effort: prose containing stray braces after the object defeats it. Input
/// longer than `max_scan_bytes` is rejected without scanning.
pub fn extract_json_object(
    text: &str,
    max_scan_bytes: usize,
) -> Result<Map<String, Value>, GatewayError> {
    if text.len() > max_scan_bytes {
        error!(
            "AI response of {} bytes exceeds scan limit of {max_scan_bytes}",
            text.len()
        );
        return Err(GatewayError::ResponseTooLarge {
            len: text.len(),
            limit: max_scan_bytes,
        });
    }

    let Some(block) = JSON_BLOCK.find(text) else {
        error!("Could not find JSON in AI response: {text}");
        return Err(GatewayError::NoJsonFound {
            raw_text: text.to_string(),
        });
    };

    match serde_json::from_str::<Value>(block.as_str()) {
        Ok(Value::Object(map)) => Ok(map),
        _ => {
            error!("JSON Decode Error. Raw text was: {text}");
            Err(GatewayError::MalformedJson {
                raw_text: text.to_string(),
            })
        }
    }
}
