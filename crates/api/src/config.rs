//! Environment configuration, read once at startup.
//!
//! | variable | default |
//! |---|---|
//! | `CITYSIM_BIND_ADDR` | `0.0.0.0:8000` |
//! | `CITYSIM_LOG_FORMAT` | `json` (`pretty` for local runs) |
//! | `CITYSIM_AI_PROVIDER` | `http` if an endpoint is set, else `offline` |
//! | `CITYSIM_AI_ENDPOINT` | — |
//! | `CITYSIM_AI_API_KEY` | — |
//! | `CITYSIM_AI_TIMEOUT_MS` | `15000` |
//! | `CITYSIM_AI_MAX_OUTPUT_TOKENS` | `1000` |
//! | `CITYSIM_AI_TEMPERATURE` | `0.5` |

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, bail};

use citysim_infra::ai::{AiProvider, AiSettings};
use citysim_observability::LogFormat;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub bind_addr: SocketAddr,
    pub log_format: LogFormat,
    pub ai: AiSettings,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup (tests pass a map).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_addr = var("CITYSIM_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("CITYSIM_BIND_ADDR must be a socket address")?;

        let log_format = match var("CITYSIM_LOG_FORMAT") {
            Some(v) => LogFormat::parse(&v)
                .with_context(|| format!("CITYSIM_LOG_FORMAT: unknown format `{v}`"))?,
            None => LogFormat::default(),
        };

        let endpoint = var("CITYSIM_AI_ENDPOINT");
        let provider = match (var("CITYSIM_AI_PROVIDER").as_deref(), endpoint) {
            (Some("offline"), _) | (None, None) => AiProvider::Offline,
            (Some("http") | None, Some(endpoint)) => AiProvider::Http {
                endpoint,
                api_key: var("CITYSIM_AI_API_KEY"),
            },
            (Some("http"), None) => bail!("CITYSIM_AI_PROVIDER=http requires CITYSIM_AI_ENDPOINT"),
            (Some(other), _) => bail!("CITYSIM_AI_PROVIDER: unknown provider `{other}`"),
        };

        let defaults = AiSettings::default();
        let ai = AiSettings {
            provider,
            timeout: parse_or("CITYSIM_AI_TIMEOUT_MS", var("CITYSIM_AI_TIMEOUT_MS"))?
                .map(Duration::from_millis)
                .unwrap_or(defaults.timeout),
            max_output_tokens: parse_or("CITYSIM_AI_MAX_OUTPUT_TOKENS", var("CITYSIM_AI_MAX_OUTPUT_TOKENS"))?
                .unwrap_or(defaults.max_output_tokens),
            temperature: parse_or("CITYSIM_AI_TEMPERATURE", var("CITYSIM_AI_TEMPERATURE"))?
                .unwrap_or(defaults.temperature),
        };

        if ai.timeout.is_zero() {
            bail!("CITYSIM_AI_TIMEOUT_MS must be positive");
        }

        Ok(Self {
            bind_addr,
            log_format,
            ai,
        })
    }
}

fn parse_or<T>(key: &str, value: Option<String>) -> anyhow::Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    value
        .map(|v| v.parse::<T>().with_context(|| format!("{key}: invalid value `{v}`")))
        .transpose()
}
