use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use citysim_core::{DomainError, PredictionRequest, PredictionResult};

use crate::client::{AiClient, generate_bounded};
use crate::fallback::fallback_prediction;
use crate::parser::parse_prediction;
use crate::prompt::forecast_prompt;

/// Default bound on a single model call.
pub const DEFAULT_AI_TIMEOUT: Duration = Duration::from_secs(15);

/// Which market a forecast is for. Selects the prompt persona and whether a subject
/// label is required.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ForecastDomain {
    Housing,
    Food,
}

impl ForecastDomain {
    pub fn as_str(&self) -> &'static str {
        match self {
            ForecastDomain::Housing => "housing",
            ForecastDomain::Food => "food",
        }
    }

    pub fn requires_subject(&self) -> bool {
        matches!(self, ForecastDomain::Food)
    }
}

/// Price forecaster: validate → prompt → one model call → parse, falling back to
/// arithmetic on any failure.
///
/// `predict` is total: it never returns an error, whatever the model does.
#[derive(Clone)]
pub struct PredictionOrchestrator {
    domain: ForecastDomain,
    client: Arc<dyn AiClient>,
    timeout: Duration,
}

impl PredictionOrchestrator {
    pub fn new(domain: ForecastDomain, client: Arc<dyn AiClient>) -> Self {
        Self {
            domain,
            client,
            timeout: DEFAULT_AI_TIMEOUT,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn predict(&self, request: &PredictionRequest) -> PredictionResult {
        let domain = self.domain.as_str();

        if let Err(e) = request.validate(self.domain.requires_subject()) {
            let message = match e {
                DomainError::Validation(msg) => msg,
                other => other.to_string(),
            };
            info!(domain, %message, "forecast request rejected");
            return PredictionResult::validation_error(message);
        }

        let prompt = forecast_prompt(self.domain, request);
        let text = match generate_bounded(self.client.as_ref(), &prompt, self.timeout).await {
            Ok(text) => text,
            Err(e) => {
                warn!(domain, provider = self.client.name(), error = %e, "AI call failed; using fallback");
                return fallback_prediction(request, &e.to_string());
            }
        };

        match parse_prediction(&text) {
            Ok(result) => {
                info!(
                    domain,
                    predicted_price = result.predicted_price,
                    confidence = result.confidence_score,
                    "forecast generated"
                );
                result
            }
            Err(e) => {
                warn!(domain, error = %e, "AI response unusable; using fallback");
                fallback_prediction(request, &e.to_string())
            }
        }
    }
}

impl core::fmt::Debug for PredictionOrchestrator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PredictionOrchestrator")
            .field("domain", &self.domain)
            .field("provider", &self.client.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}
