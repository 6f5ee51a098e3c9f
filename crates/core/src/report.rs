//! Daily report inputs/outputs and the pure pieces of report assembly.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::city::{CityModel, PROJECTION_YEARS};
use crate::forecast::{PredictionRequest, round_cents};
use crate::id::ReportId;

/// Alien arrivals above this count trigger the security pointer.
pub const HIGH_ALIEN_ACTIVITY_THRESHOLD: u32 = 5;

pub const HIGH_ACTIVITY_POINTER: &str = "High alien activity detected—review city security protocols.";
pub const NORMAL_ACTIVITY_POINTER: &str = "Alien activity is within normal range.";

/// Subject used to seed the food forecast.
pub const FOOD_AUTO_FILL_ITEM: &str = "Alien Cuisine Special";

/// Food prices are seeded at this fraction of the city's base (housing) price.
pub const FOOD_PRICE_FACTOR: f64 = 0.5;

/// A day's observations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReportInput {
    pub aliens_count: u32,
    #[serde(default)]
    pub comments: String,
}

/// Seed values for dependent forecasts, keyed by forecast domain (`housing`, `food`).
pub type AutoFill = BTreeMap<String, PredictionRequest>;

/// Assembled daily report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyReportResult {
    pub report_id: ReportId,
    pub generated_at: DateTime<Utc>,
    pub updated_city_model: CityModel,
    pub report_doc: String,
    pub auto_fill: AutoFill,
    pub infrastructure_advice: String,
}

/// Threshold pointers for a report, in display order.
pub fn pointers_for(aliens_count: u32, comments: &str) -> Vec<String> {
    let mut pointers = Vec::with_capacity(2);
    if aliens_count > HIGH_ALIEN_ACTIVITY_THRESHOLD {
        pointers.push(HIGH_ACTIVITY_POINTER.to_string());
    } else {
        pointers.push(NORMAL_ACTIVITY_POINTER.to_string());
    }
    if !comments.is_empty() {
        pointers.push(format!("Additional comment: {comments}"));
    }
    pointers
}

/// Housing and food forecast seeds derived from the (already updated) city model.
pub fn auto_fill_for(model: &CityModel) -> AutoFill {
    let years = i64::from(PROJECTION_YEARS);
    let growth = model.base_growth_rate_percent();

    let mut seeds = AutoFill::new();
    seeds.insert(
        "housing".to_string(),
        PredictionRequest::new(model.base_price(), growth, years),
    );
    seeds.insert(
        "food".to_string(),
        PredictionRequest::new(round_cents(model.base_price() * FOOD_PRICE_FACTOR), growth, years)
            .with_subject(FOOD_AUTO_FILL_ITEM),
    );
    seeds
}

/// Plain-text report document.
pub fn render_report_doc(input: &DailyReportInput, pointers: &[String], advice: &str) -> String {
    format!(
        "Daily Report:\nAliens Count: {}\nComments: {}\n\nPointers:\n{}\n\nInfrastructure Advice:\n{}",
        input.aliens_count,
        input.comments,
        pointers.join("\n"),
        advice
    )
}
