use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{info, warn};

use citysim_ai::prompt::infrastructure_advice_prompt;
use citysim_ai::{AiClient, generate_bounded};
use citysim_core::report::{auto_fill_for, render_report_doc};
use citysim_core::{DailyReportInput, DailyReportResult, DomainResult, ReportId};

use crate::city_store::CityModelStore;

/// Advice text used when the model call fails.
pub const ADVICE_UNAVAILABLE: &str = "Could not generate AI-based infrastructure advice due to an error.";

/// Daily report pipeline: update the city model, ask the model for infrastructure
/// advice, assemble the report.
///
/// The store mutation completes before the model call starts; the call only reads a
/// snapshot, so cancelling it cannot disturb the store.
#[derive(Clone)]
pub struct DailyReportOrchestrator {
    store: Arc<CityModelStore>,
    client: Arc<dyn AiClient>,
    timeout: Duration,
}

impl DailyReportOrchestrator {
    pub fn new(store: Arc<CityModelStore>, client: Arc<dyn AiClient>, timeout: Duration) -> Self {
        Self {
            store,
            client,
            timeout,
        }
    }

    /// Fails only when the city model has not been created.
    pub async fn process(&self, input: DailyReportInput) -> DomainResult<DailyReportResult> {
        let update = self.store.update(input.aliens_count, &input.comments)?;

        let prompt = infrastructure_advice_prompt(&update.model, input.aliens_count, &input.comments);
        let advice = match generate_bounded(self.client.as_ref(), &prompt, self.timeout).await {
            Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
            Ok(_) => {
                warn!(provider = self.client.name(), "AI returned empty infrastructure advice");
                ADVICE_UNAVAILABLE.to_string()
            }
            Err(e) => {
                warn!(provider = self.client.name(), error = %e, "infrastructure advice failed");
                ADVICE_UNAVAILABLE.to_string()
            }
        };

        let report_id = ReportId::new();
        info!(%report_id, aliens_count = input.aliens_count, "daily report assembled");

        Ok(DailyReportResult {
            report_id,
            generated_at: Utc::now(),
            report_doc: render_report_doc(&input, &update.pointers, &advice),
            auto_fill: auto_fill_for(&update.model),
            updated_city_model: update.model,
            infrastructure_advice: advice,
        })
    }
}

impl core::fmt::Debug for DailyReportOrchestrator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DailyReportOrchestrator")
            .field("provider", &self.client.name())
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use citysim_ai::{AiError, ScriptedAiClient};
    use citysim_core::DomainError;

    fn input(aliens_count: u32, comments: &str) -> DailyReportInput {
        DailyReportInput {
            aliens_count,
            comments: comments.to_string(),
        }
    }

    fn seeded_store() -> Arc<CityModelStore> {
        let store = Arc::new(CityModelStore::new());
        store.create("Zenith", 100_000, 2.0, 300_000.0).unwrap();
        store
    }

    #[tokio::test]
    async fn report_includes_advice_and_auto_fill() {
        let client = Arc::new(ScriptedAiClient::replying("  Expand the spaceport.\n"));
        let orchestrator =
            DailyReportOrchestrator::new(seeded_store(), client.clone(), Duration::from_millis(100));

        let report = orchestrator.process(input(6, "new arrivals")).await.unwrap();

        assert_eq!(report.infrastructure_advice, "Expand the spaceport.");
        assert!((report.updated_city_model.base_growth_rate_percent() - 2.6).abs() < 1e-9);
        assert!(report.report_doc.contains("Aliens Count: 6"));
        assert!(report.report_doc.contains("Comments: new arrivals"));
        assert!(report.report_doc.contains("High alien activity detected"));
        assert!(report.report_doc.contains("Additional comment: new arrivals"));
        assert!(report.report_doc.ends_with("Infrastructure Advice:\nExpand the spaceport."));
        assert_eq!(report.auto_fill["food"].current_price, 150_000.0);
        assert_eq!(report.auto_fill["housing"].years_ahead, 10);

        let prompts = client.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("growth rate of 2.6"));
    }

    #[tokio::test]
    async fn ai_failure_degrades_to_apology() {
        let store = seeded_store();
        let client = Arc::new(ScriptedAiClient::failing(AiError::Transport("refused".to_string())));
        let orchestrator = DailyReportOrchestrator::new(store.clone(), client, Duration::from_millis(100));

        let report = orchestrator.process(input(2, "")).await.unwrap();
        assert_eq!(report.infrastructure_advice, ADVICE_UNAVAILABLE);
        assert!(report.report_doc.contains(ADVICE_UNAVAILABLE));
        // The update still landed.
        assert_eq!(store.get().unwrap(), report.updated_city_model);
    }

    #[tokio::test]
    async fn slow_or_empty_advice_degrades_to_apology() {
        let slow = Arc::new(ScriptedAiClient::replying("late").with_delay(Duration::from_secs(5)));
        let orchestrator = DailyReportOrchestrator::new(seeded_store(), slow, Duration::from_millis(20));
        let report = orchestrator.process(input(0, "")).await.unwrap();
        assert_eq!(report.infrastructure_advice, ADVICE_UNAVAILABLE);

        let empty = Arc::new(ScriptedAiClient::replying("   "));
        let orchestrator = DailyReportOrchestrator::new(seeded_store(), empty, Duration::from_millis(20));
        let report = orchestrator.process(input(0, "")).await.unwrap();
        assert_eq!(report.infrastructure_advice, ADVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn uninitialized_model_fails_without_calling_the_model() {
        let client = Arc::new(ScriptedAiClient::replying("advice"));
        let orchestrator = DailyReportOrchestrator::new(
            Arc::new(CityModelStore::new()),
            client.clone(),
            Duration::from_millis(20),
        );

        let err = orchestrator.process(input(1, "")).await.unwrap_err();
        assert_eq!(err, DomainError::NotInitialized);
        assert_eq!(client.calls(), 0);
    }
}
