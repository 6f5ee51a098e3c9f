use citysim_core::forecast::round_cents;
use citysim_core::{PredictionRequest, PredictionResult, PredictionStatus};

/// Fixed confidence reported for arithmetic forecasts.
pub const FALLBACK_CONFIDENCE: f64 = 0.7;

pub const FALLBACK_FACTORS: [&str; 2] = ["Population growth", "Basic market trends"];

/// Linear population-growth forecast:
/// `round(current_price * (1 + growth% * years / 100), 2)`, clamped to `[0, f64::MAX]`.
///
/// Total for any finite validated request; `reason` ends up in `analysis`.
pub fn fallback_prediction(request: &PredictionRequest, reason: &str) -> PredictionResult {
    let growth = request.population_growth_percent * request.years_ahead as f64 / 100.0;
    let predicted_price = round_cents(request.current_price * (1.0 + growth)).clamp(0.0, f64::MAX);

    PredictionResult {
        predicted_price,
        confidence_score: FALLBACK_CONFIDENCE,
        factors: FALLBACK_FACTORS.iter().map(|f| f.to_string()).collect(),
        analysis: format!("Fallback calculation: {reason}"),
        status: PredictionStatus::Fallback,
    }
}
