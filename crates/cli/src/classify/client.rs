//! Classifier client: prompt in, completion text out.
//!
//! `ChatClient` talks to an OpenAI-compatible chat-completions endpoint.
//! One attempt per call, no built-in retry: `complete` is idempotent for
//! a given prompt, so callers that want backoff wrap the [`Classifier`]
//! trait instead of this client.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

pub const DEFAULT_API_BASE: &str = "https://api.openai.com";
pub const DEFAULT_MODEL: &str = "gpt-4-turbo";

const REQUEST_TIMEOUT_SECS: u64 = 30;
const USER_AGENT: &str = concat!("geovet/", env!("CARGO_PKG_VERSION"));
const SYSTEM_PROMPT: &str = "You are an expert compliance analyst.";

/// The single external boundary of the pipeline.
///
/// Tests substitute a deterministic stub; production uses [`ChatClient`].
pub trait Classifier {
    fn complete(&self, prompt: &str) -> Result<String, ClassifyError>;
}

/// Why a single classification call failed. Per-row and recoverable:
/// the driver records the failure and moves on to the next row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClassifyError {
    /// Upstream rejected the credential (401/403).
    Auth(String),
    /// Upstream rejected the request itself (4xx other than auth/429).
    Rejected(u16, String),
    /// Rate limited or out of quota (429).
    RateLimited(String),
    /// 5xx, network failure, or timeout.
    Upstream(String),
    /// 2xx but no usable completion text in the payload.
    EmptyResponse(String),
}

impl fmt::Display for ClassifyError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClassifyError::Auth(msg) => write!(f, "auth failed: {}", msg),
            ClassifyError::Rejected(status, msg) => {
                write!(f, "request rejected ({}): {}", status, msg)
            }
            ClassifyError::RateLimited(msg) => write!(f, "rate limited: {}", msg),
            ClassifyError::Upstream(msg) => write!(f, "upstream error: {}", msg),
            ClassifyError::EmptyResponse(msg) => write!(f, "empty response: {}", msg),
        }
    }
}

impl std::error::Error for ClassifyError {}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

// ── ChatClient ──────────────────────────────────────────────────────

pub struct ChatClient {
    http: reqwest::blocking::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ChatClient {
    pub fn with_base_url(api_key: String, model: String, base_url: String) -> Self {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("failed to build HTTP client");

        Self {
            http,
            api_key,
            model,
            base_url,
        }
    }
}

impl Classifier for ChatClient {
    fn complete(&self, prompt: &str) -> Result<String, ClassifyError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let req = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&req)
            .send()
            .map_err(|e| ClassifyError::Upstream(e.to_string()))?;

        let status = resp.status().as_u16();

        if status == 401 || status == 403 {
            return Err(ClassifyError::Auth(extract_error(resp, status)));
        }
        if status == 429 {
            return Err(ClassifyError::RateLimited(extract_error(resp, status)));
        }
        if status >= 500 {
            return Err(ClassifyError::Upstream(extract_error(resp, status)));
        }
        if status >= 400 {
            return Err(ClassifyError::Rejected(status, extract_error(resp, status)));
        }

        let body: serde_json::Value = resp.json().map_err(|e| {
            ClassifyError::EmptyResponse(format!("unparseable completion payload: {}", e))
        })?;

        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or("");
        if content.trim().is_empty() {
            return Err(ClassifyError::EmptyResponse(
                "completion contained no message content".to_string(),
            ));
        }

        Ok(content.to_string())
    }
}

fn extract_error(resp: reqwest::blocking::Response, status: u16) -> String {
    let body: serde_json::Value = resp.json().unwrap_or(serde_json::Value::Null);
    body["error"]["message"]
        .as_str()
        .unwrap_or(&format!("HTTP {}", status))
        .to_string()
}

// ── Tests ───────────────────────────────────────────────────────────
