use std::sync::Arc;
use std::time::Duration;

use citysim_ai::{AiClient, ForecastDomain, PredictionOrchestrator};
use citysim_infra::ai::{AiSettings, build_client};
use citysim_infra::historical::SampleSeries;
use citysim_infra::{CityModelStore, DailyReportOrchestrator};

/// Everything the handlers need, shared behind one `Arc`.
///
/// The city model store is owned here (one per server instance) and handed to the
/// report pipeline by reference count.
#[derive(Debug, Clone)]
pub struct AppServices {
    pub housing: PredictionOrchestrator,
    pub food: PredictionOrchestrator,
    pub city: Arc<CityModelStore>,
    pub reports: DailyReportOrchestrator,
    pub housing_history: Arc<SampleSeries>,
    pub food_history: Arc<SampleSeries>,
    provider: &'static str,
}

impl AppServices {
    pub fn new(client: Arc<dyn AiClient>, timeout: Duration) -> Self {
        let city = Arc::new(CityModelStore::new());
        Self {
            housing: PredictionOrchestrator::new(ForecastDomain::Housing, client.clone())
                .with_timeout(timeout),
            food: PredictionOrchestrator::new(ForecastDomain::Food, client.clone())
                .with_timeout(timeout),
            reports: DailyReportOrchestrator::new(city.clone(), client.clone(), timeout),
            city,
            housing_history: Arc::new(SampleSeries::housing()),
            food_history: Arc::new(SampleSeries::food()),
            provider: client.name(),
        }
    }

    pub fn from_settings(settings: &AiSettings) -> anyhow::Result<Self> {
        Ok(Self::new(build_client(settings)?, settings.timeout))
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider
    }
}
