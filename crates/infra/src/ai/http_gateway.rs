use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use tracing::debug;

use citysim_ai::{AiClient, AiError};

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    prompt: &'a str,
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    text: Option<String>,
}

/// Client for a JSON text-generation gateway.
///
/// `POST {endpoint}` with `{"prompt", "max_output_tokens", "temperature"}`, optional
/// bearer key; the reply must carry a non-empty `text` field. Vendor-specific
/// translation belongs behind the gateway, not here.
#[derive(Debug, Clone)]
pub struct HttpTextGateway {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    max_output_tokens: u32,
    temperature: f32,
}

impl HttpTextGateway {
    pub fn new(endpoint: impl Into<String>, api_key: Option<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().build()?;
        Ok(Self {
            http,
            endpoint: endpoint.into(),
            api_key,
            max_output_tokens: 1000,
            temperature: 0.5,
        })
    }

    pub fn with_generation(mut self, max_output_tokens: u32, temperature: f32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self.temperature = temperature;
        self
    }
}

fn transport_error(err: reqwest::Error, timeout: Duration) -> AiError {
    if err.is_timeout() {
        AiError::Timeout(timeout)
    } else {
        AiError::Transport(err.to_string())
    }
}

#[async_trait]
impl AiClient for HttpTextGateway {
    fn name(&self) -> &'static str {
        "http"
    }

    async fn generate(&self, prompt: &str, timeout: Duration) -> Result<String, AiError> {
        let body = GenerateRequest {
            prompt,
            max_output_tokens: self.max_output_tokens,
            temperature: self.temperature,
        };

        let mut req = self.http.post(&self.endpoint).timeout(timeout).json(&body);
        if let Some(key) = &self.api_key {
            req = req.bearer_auth(key);
        }

        let resp = req.send().await.map_err(|e| transport_error(e, timeout))?;
        let status = resp.status();
        debug!(endpoint = %self.endpoint, %status, "AI gateway responded");

        if status == StatusCode::TOO_MANY_REQUESTS {
            let detail = resp.text().await.unwrap_or_default();
            return Err(AiError::QuotaExceeded(if detail.is_empty() {
                status.to_string()
            } else {
                detail
            }));
        }
        if !status.is_success() {
            return Err(AiError::Transport(format!("gateway returned {status}")));
        }

        let reply: GenerateResponse = resp.json().await.map_err(|e| {
            if e.is_timeout() {
                AiError::Timeout(timeout)
            } else {
                AiError::MalformedUpstream(e.to_string())
            }
        })?;

        reply
            .text
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| AiError::MalformedUpstream("response has no `text` field".to_string()))
    }
}
