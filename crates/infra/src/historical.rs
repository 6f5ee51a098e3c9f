//! Static historical samples backing the chart endpoints.
//!
//! Stand-in for a real market-data feed.

use serde_json::{Value as JsonValue, json};

use citysim_core::forecast::round_cents;

/// Yearly price series plus one volume series (population or demand).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSeries {
    pub years: Vec<i32>,
    pub prices: Vec<f64>,
    /// JSON key of the volume series (`population`, `demand`).
    pub volume_key: &'static str,
    pub volume: Vec<f64>,
}

impl SampleSeries {
    pub fn housing() -> Self {
        Self {
            years: (2010..2024).collect(),
            prices: (0..14).map(|i| 200_000.0 + 10_000.0 * f64::from(i)).collect(),
            volume_key: "population",
            volume: (0..14).map(|i| 100_000.0 + 2_000.0 * f64::from(i)).collect(),
        }
    }

    pub fn food() -> Self {
        Self {
            years: (2010..2024).collect(),
            prices: vec![
                10.0, 12.0, 14.0, 15.0, 16.0, 18.0, 20.0, 22.0, 24.0, 26.0, 28.0, 30.0, 32.0, 35.0,
            ],
            volume_key: "demand",
            volume: (0..14).map(|i| 1_000.0 + 50.0 * f64::from(i)).collect(),
        }
    }

    pub fn to_json(&self) -> JsonValue {
        let mut value = json!({
            "years": self.years,
            "prices": self.prices,
        });
        value[self.volume_key] = json!(self.volume);
        value
    }

    /// Price statistics plus compound annual growth rates (percent, 2 decimals).
    pub fn trend(&self) -> JsonValue {
        let n = self.prices.len();
        let average = if n == 0 {
            0.0
        } else {
            self.prices.iter().sum::<f64>() / n as f64
        };
        let min = self.prices.iter().copied().fold(f64::INFINITY, f64::min);
        let max = self.prices.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        let mut value = json!({
            "average_price": round_cents(average),
            "price_growth_rate": compound_growth_percent(&self.prices),
            "min_price": if n == 0 { 0.0 } else { min },
            "max_price": if n == 0 { 0.0 } else { max },
        });
        value[format!("{}_growth_rate", self.volume_key)] = json!(compound_growth_percent(&self.volume));
        value
    }
}

/// `((last / first)^(1 / (n - 1)) - 1) * 100`, rounded to 2 decimals; 0 when undefined.
pub fn compound_growth_percent(series: &[f64]) -> f64 {
    match (series.first(), series.last()) {
        (Some(&first), Some(&last)) if series.len() > 1 && first > 0.0 => {
            let periods = (series.len() - 1) as f64;
            round_cents(((last / first).powf(1.0 / periods) - 1.0) * 100.0)
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn housing_sample_matches_published_series() {
        let h = SampleSeries::housing();
        assert_eq!(h.years.first(), Some(&2010));
        assert_eq!(h.years.last(), Some(&2023));
        assert_eq!(h.prices.last(), Some(&330_000.0));
        assert_eq!(h.volume.last(), Some(&126_000.0));

        let json = h.to_json();
        assert_eq!(json["population"].as_array().unwrap().len(), 14);
        assert!(json.get("demand").is_none());
    }

    #[test]
    fn trend_reports_cagr_and_extremes() {
        let t = SampleSeries::food().trend();
        assert_eq!(t["min_price"], 10.0);
        assert_eq!(t["max_price"], 35.0);
        assert_eq!(t["average_price"], 21.57);
        assert_eq!(t["price_growth_rate"], 10.12);
        assert!(t["demand_growth_rate"].as_f64().unwrap() > 3.0);

        let h = SampleSeries::housing().trend();
        assert_eq!(h["population_growth_rate"], 1.79);
    }

    #[test]
    fn growth_is_zero_for_degenerate_series() {
        assert_eq!(compound_growth_percent(&[]), 0.0);
        assert_eq!(compound_growth_percent(&[5.0]), 0.0);
        assert_eq!(compound_growth_percent(&[0.0, 5.0]), 0.0);
    }
}
