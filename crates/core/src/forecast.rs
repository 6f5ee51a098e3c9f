//! Price forecast request/result types.

use serde::{Deserialize, Serialize};

use crate::error::{DomainError, DomainResult};

/// Factors reported when a request is rejected before reaching the model.
pub const VALIDATION_FACTORS: [&str; 1] = ["Validation error"];

/// Round to two decimal places (currency precision).
///
/// Values too large to scale by 100 already have no fractional part and are returned as is.
pub fn round_cents(value: f64) -> f64 {
    let scaled = value * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        value
    }
}

/// Input of a single price forecast.
///
/// `subject_label` names the forecasted item for domains that need one (e.g. a food item).
/// On the wire it is `food_item`, matching the food forecast endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionRequest {
    pub current_price: f64,
    #[serde(rename = "population_growth")]
    pub population_growth_percent: f64,
    pub years_ahead: i64,
    #[serde(rename = "food_item", default, skip_serializing_if = "Option::is_none")]
    pub subject_label: Option<String>,
}

impl PredictionRequest {
    pub fn new(current_price: f64, population_growth_percent: f64, years_ahead: i64) -> Self {
        Self {
            current_price,
            population_growth_percent,
            years_ahead,
            subject_label: None,
        }
    }

    pub fn with_subject(mut self, label: impl Into<String>) -> Self {
        self.subject_label = Some(label.into());
        self
    }

    /// Non-empty subject label, if any.
    pub fn subject(&self) -> Option<&str> {
        self.subject_label
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Check the request invariants (`current_price > 0`, `years_ahead > 0`, and a
    /// non-empty subject when the forecast domain requires one).
    pub fn validate(&self, require_subject: bool) -> DomainResult<()> {
        if require_subject && self.subject().is_none() {
            return Err(DomainError::validation("Food item is required"));
        }
        if !(self.current_price.is_finite() && self.population_growth_percent.is_finite()) {
            return Err(DomainError::validation("All numeric parameters must be finite numbers"));
        }
        if self.current_price <= 0.0 {
            return Err(DomainError::validation("Current price must be positive"));
        }
        if self.years_ahead <= 0 {
            return Err(DomainError::validation("Prediction years must be positive"));
        }
        Ok(())
    }
}

/// How a [`PredictionResult`] was produced.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PredictionStatus {
    Success,
    Fallback,
    ValidationError,
}

/// Output of a price forecast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictionResult {
    pub predicted_price: f64,
    pub confidence_score: f64,
    pub factors: Vec<String>,
    pub analysis: String,
    pub status: PredictionStatus,
}

impl PredictionResult {
    /// Zero-confidence result for a request that failed validation.
    pub fn validation_error(message: impl Into<String>) -> Self {
        Self {
            predicted_price: 0.0,
            confidence_score: 0.0,
            factors: VALIDATION_FACTORS.iter().map(|f| f.to_string()).collect(),
            analysis: message.into(),
            status: PredictionStatus::ValidationError,
        }
    }

    /// Whether the result satisfies the output contract every caller relies on.
    pub fn is_well_formed(&self) -> bool {
        self.predicted_price.is_finite()
            && self.predicted_price >= 0.0
            && (0.0..=1.0).contains(&self.confidence_score)
            && !self.factors.is_empty()
    }
}
