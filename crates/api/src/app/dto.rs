use serde::Deserialize;

use citysim_core::{DailyReportInput, PredictionRequest};

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    pub current_price: f64,
    pub population_growth: f64,
    pub years_ahead: i64,
}

#[derive(Debug, Deserialize)]
pub struct FoodPredictRequest {
    #[serde(default)]
    pub food_item: String,
    pub current_price: f64,
    pub population_growth: f64,
    pub years_ahead: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateCityModelRequest {
    pub city_name: String,
    pub base_population: u64,
    pub base_growth_rate: f64,
    pub base_price: f64,
}

#[derive(Debug, Deserialize)]
pub struct DailyReportRequest {
    pub aliens_count: u32,
    pub comments: Option<String>,
}

// -------------------------
// Domain mapping
// -------------------------

impl From<PredictRequest> for PredictionRequest {
    fn from(body: PredictRequest) -> Self {
        PredictionRequest::new(body.current_price, body.population_growth, body.years_ahead)
    }
}

impl From<FoodPredictRequest> for PredictionRequest {
    fn from(body: FoodPredictRequest) -> Self {
        PredictionRequest::new(body.current_price, body.population_growth, body.years_ahead)
            .with_subject(body.food_item)
    }
}

impl From<DailyReportRequest> for DailyReportInput {
    fn from(body: DailyReportRequest) -> Self {
        DailyReportInput {
            aliens_count: body.aliens_count,
            comments: body.comments.unwrap_or_default(),
        }
    }
}
