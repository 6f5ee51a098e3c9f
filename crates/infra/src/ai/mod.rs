//! AI provider adapters.
//!
//! The provider is picked from configuration; the pipelines only ever see
//! `Arc<dyn AiClient>`.

use std::sync::Arc;
use std::time::Duration;

use citysim_ai::forecast::DEFAULT_AI_TIMEOUT;
use citysim_ai::{AiClient, OfflineAiClient};

pub mod http_gateway;

pub use http_gateway::HttpTextGateway;

/// Which text-generation backend to use.
#[derive(Debug, Clone, PartialEq)]
pub enum AiProvider {
    /// No model; forecasts use the arithmetic fallback and reports the apology text.
    Offline,
    /// Generic JSON text-generation gateway.
    Http {
        endpoint: String,
        api_key: Option<String>,
    },
}

/// AI settings shared by every pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct AiSettings {
    pub provider: AiProvider,
    pub timeout: Duration,
    pub max_output_tokens: u32,
    pub temperature: f32,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            provider: AiProvider::Offline,
            timeout: DEFAULT_AI_TIMEOUT,
            max_output_tokens: 1000,
            temperature: 0.5,
        }
    }
}

/// Build the configured client.
pub fn build_client(settings: &AiSettings) -> anyhow::Result<Arc<dyn AiClient>> {
    match &settings.provider {
        AiProvider::Offline => Ok(Arc::new(OfflineAiClient)),
        AiProvider::Http { endpoint, api_key } => {
            let gateway = HttpTextGateway::new(endpoint.clone(), api_key.clone())?
                .with_generation(settings.max_output_tokens, settings.temperature);
            Ok(Arc::new(gateway))
        }
    }
}
