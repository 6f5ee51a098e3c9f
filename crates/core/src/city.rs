//! City model: base parameters plus the 10-year projection derived from them.

use serde::Serialize;

use crate::error::{DomainError, DomainResult};
use crate::forecast::round_cents;

/// Horizon of the derived projections, in years.
pub const PROJECTION_YEARS: i32 = 10;

/// Growth-rate increase (percentage points) contributed by each arriving alien.
pub const GROWTH_PER_ALIEN_PERCENT: f64 = 0.1;

/// 10-year projection computed from a city's base fields.
///
/// Never stored apart from the fields it was computed from; see [`CityModel`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
pub struct DerivedStats {
    #[serde(rename = "projected_population_10_years")]
    pub projected_population_10y: u64,
    #[serde(rename = "projected_price_10_years")]
    pub projected_price_10y: f64,
}

impl DerivedStats {
    /// - population compounds yearly: `floor(pop * (1 + g/100)^10)`
    /// - price grows linearly: `round(price * (1 + g/100 * 10), 2)`, saturating at `±f64::MAX`
    pub fn compute(population: u64, growth_rate_percent: f64, price: f64) -> Self {
        let rate = growth_rate_percent / 100.0;
        let population = (population as f64) * (1.0 + rate).powi(PROJECTION_YEARS);
        let price = round_cents(price * (1.0 + rate * PROJECTION_YEARS as f64))
            .clamp(-f64::MAX, f64::MAX);

        Self {
            // `as` saturates: negative or NaN projections clamp to 0.
            projected_population_10y: population.floor() as u64,
            projected_price_10y: price,
        }
    }
}

/// The simulated city.
///
/// Fields are private so `derived_stats` can only change together with the base fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CityModel {
    city_name: String,
    base_population: u64,
    #[serde(rename = "base_growth_rate")]
    base_growth_rate_percent: f64,
    base_price: f64,
    derived_stats: DerivedStats,
}

impl CityModel {
    pub fn new(
        city_name: impl Into<String>,
        base_population: u64,
        base_growth_rate_percent: f64,
        base_price: f64,
    ) -> DomainResult<Self> {
        let city_name = city_name.into();
        if city_name.trim().is_empty() {
            return Err(DomainError::validation("city name must not be empty"));
        }
        if base_population == 0 {
            return Err(DomainError::validation("base population must be positive"));
        }
        if !base_growth_rate_percent.is_finite() {
            return Err(DomainError::validation("base growth rate must be a finite number"));
        }
        if !(base_price.is_finite() && base_price > 0.0) {
            return Err(DomainError::validation("base price must be positive"));
        }

        Ok(Self {
            derived_stats: DerivedStats::compute(base_population, base_growth_rate_percent, base_price),
            city_name,
            base_population,
            base_growth_rate_percent,
            base_price,
        })
    }

    pub fn city_name(&self) -> &str {
        &self.city_name
    }

    pub fn base_population(&self) -> u64 {
        self.base_population
    }

    pub fn base_growth_rate_percent(&self) -> f64 {
        self.base_growth_rate_percent
    }

    pub fn base_price(&self) -> f64 {
        self.base_price
    }

    pub fn derived_stats(&self) -> DerivedStats {
        self.derived_stats
    }

    /// Raise the growth rate by `aliens_count * 0.1` percentage points and recompute the
    /// projection. Returns the added growth.
    pub fn apply_alien_arrivals(&mut self, aliens_count: u32) -> f64 {
        let additional = f64::from(aliens_count) * GROWTH_PER_ALIEN_PERCENT;
        self.base_growth_rate_percent += additional;
        self.recompute();
        additional
    }

    fn recompute(&mut self) {
        self.derived_stats =
            DerivedStats::compute(self.base_population, self.base_growth_rate_percent, self.base_price);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn zenith() -> CityModel {
        CityModel::new("Zenith", 100_000, 2.0, 300_000.0).unwrap()
    }

    #[test]
    fn create_computes_ten_year_projection() {
        let stats = zenith().derived_stats();
        assert_eq!(stats.projected_population_10y, 121_899);
        assert_eq!(stats.projected_price_10y, 360_000.00);
    }

    #[test]
    fn alien_arrivals_raise_growth_and_refresh_projection() {
        let mut city = zenith();
        let added = city.apply_alien_arrivals(6);

        assert!((added - 0.6).abs() < 1e-9);
        assert!((city.base_growth_rate_percent() - 2.6).abs() < 1e-9);
        assert_eq!(
            city.derived_stats(),
            DerivedStats::compute(100_000, city.base_growth_rate_percent(), 300_000.0)
        );
        assert_eq!(city.derived_stats().projected_price_10y, 378_000.00);
    }

    #[test]
    fn zero_aliens_leave_model_unchanged() {
        let mut city = zenith();
        let before = city.clone();
        city.apply_alien_arrivals(0);
        assert_eq!(city, before);
    }

    #[test]
    fn new_rejects_values_outside_invariants() {
        assert!(CityModel::new("", 1, 1.0, 1.0).is_err());
        assert!(CityModel::new("A", 0, 1.0, 1.0).is_err());
        assert!(CityModel::new("A", 1, f64::INFINITY, 1.0).is_err());
        assert!(CityModel::new("A", 1, 1.0, 0.0).is_err());
        assert!(CityModel::new("A", 1, -3.0, 1.0).is_ok());
    }

    #[test]
    fn serializes_with_wire_names() {
        let json = serde_json::to_value(zenith()).unwrap();
        assert_eq!(json["city_name"], "Zenith");
        assert_eq!(json["base_growth_rate"], 2.0);
        assert_eq!(json["derived_stats"]["projected_population_10_years"], 121_899);
        assert_eq!(json["derived_stats"]["projected_price_10_years"], 360_000.0);
    }

    #[test]
    fn huge_base_price_projects_to_a_finite_price() {
        let city = CityModel::new("Z", 1, 0.0, 1e307).unwrap();
        assert_eq!(city.derived_stats().projected_price_10y, 1e307);
        let json = serde_json::to_value(&city).unwrap();
        assert_eq!(json["derived_stats"]["projected_price_10_years"].as_f64(), Some(1e307));

        let city = CityModel::new("Z", 1, 50.0, f64::MAX / 2.0).unwrap();
        assert_eq!(city.derived_stats().projected_price_10y, f64::MAX);
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: recomputing from identical base fields yields identical stats.
        #[test]
        fn derived_stats_are_idempotent(
            population in 1u64..10_000_000u64,
            growth in -50.0f64..50.0f64,
            price in 0.01f64..(f64::MAX / 2.0),
        ) {
            let stats = DerivedStats::compute(population, growth, price);
            prop_assert_eq!(stats, DerivedStats::compute(population, growth, price));
            prop_assert!(stats.projected_price_10y.is_finite());
        }

        /// Property: growth never decreases across a sequence of reports.
        #[test]
        fn growth_rate_is_monotonic_under_reports(
            counts in prop::collection::vec(0u32..1_000u32, 1..20)
        ) {
            let mut city = zenith();
            for count in counts {
                let before = city.base_growth_rate_percent();
                city.apply_alien_arrivals(count);
                prop_assert!(city.base_growth_rate_percent() >= before);
                prop_assert_eq!(
                    city.derived_stats(),
                    DerivedStats::compute(
                        city.base_population(),
                        city.base_growth_rate_percent(),
                        city.base_price()
                    )
                );
            }
        }
    }
}
