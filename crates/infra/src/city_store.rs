use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use tracing::info;

use citysim_core::report::pointers_for;
use citysim_core::{CityModel, DomainError, DomainResult};

/// Outcome of applying a daily report to the city model.
#[derive(Debug, Clone, PartialEq)]
pub struct CityUpdate {
    pub model: CityModel,
    pub pointers: Vec<String>,
}

/// Owner of the session's single city model.
///
/// Every mutation runs under one write guard, so the stored growth rate and derived
/// stats are always observed together. Callers get clones, never references.
#[derive(Debug, Default)]
pub struct CityModelStore {
    inner: RwLock<Option<CityModel>>,
}

impl CityModelStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create (or replace) the city model.
    pub fn create(
        &self,
        city_name: impl Into<String>,
        base_population: u64,
        base_growth_rate_percent: f64,
        base_price: f64,
    ) -> DomainResult<CityModel> {
        let model = CityModel::new(city_name, base_population, base_growth_rate_percent, base_price)?;
        *self.write() = Some(model.clone());

        info!(
            city = model.city_name(),
            population = model.base_population(),
            growth_rate = model.base_growth_rate_percent(),
            "city model created"
        );
        Ok(model)
    }

    pub fn get(&self) -> DomainResult<CityModel> {
        self.read().clone().ok_or(DomainError::NotInitialized)
    }

    /// Apply a day's alien arrivals: read growth, add `aliens_count * 0.1`, recompute
    /// projections, write back. All of it under one guard.
    pub fn update(&self, aliens_count: u32, comments: &str) -> DomainResult<CityUpdate> {
        let model = {
            let mut guard = self.write();
            let model = guard.as_mut().ok_or(DomainError::NotInitialized)?;
            model.apply_alien_arrivals(aliens_count);
            model.clone()
        };

        info!(
            city = model.city_name(),
            aliens_count,
            growth_rate = model.base_growth_rate_percent(),
            "city model updated from daily report"
        );

        Ok(CityUpdate {
            pointers: pointers_for(aliens_count, comments),
            model,
        })
    }

    /// Drop the model; later reads fail with `NotInitialized`.
    pub fn reset(&self) {
        *self.write() = None;
        info!("city model reset");
    }

    // Writers never leave a half-updated model behind, so a poisoned lock is still
    // consistent.
    fn read(&self) -> RwLockReadGuard<'_, Option<CityModel>> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<CityModel>> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    use citysim_core::DerivedStats;
    use citysim_core::report::{HIGH_ACTIVITY_POINTER, NORMAL_ACTIVITY_POINTER};

    #[test]
    fn get_and_update_before_create_fail() {
        let store = CityModelStore::new();
        assert_eq!(store.get(), Err(DomainError::NotInitialized));
        assert_eq!(store.update(3, ""), Err(DomainError::NotInitialized));
    }

    #[test]
    fn create_then_update_accrues_growth() {
        let store = CityModelStore::new();
        let created = store.create("Zenith", 100_000, 2.0, 300_000.0).unwrap();
        assert_eq!(created.derived_stats().projected_population_10y, 121_899);
        assert_eq!(store.get().unwrap(), created);

        let update = store.update(6, "").unwrap();
        assert!((update.model.base_growth_rate_percent() - 2.6).abs() < 1e-9);
        assert_eq!(update.pointers, vec![HIGH_ACTIVITY_POINTER.to_string()]);
        assert_eq!(store.get().unwrap(), update.model);

        let update = store.update(1, "all calm").unwrap();
        assert!((update.model.base_growth_rate_percent() - 2.7).abs() < 1e-9);
        assert_eq!(
            update.pointers,
            vec![
                NORMAL_ACTIVITY_POINTER.to_string(),
                "Additional comment: all calm".to_string()
            ]
        );
    }

    #[test]
    fn create_overwrites_and_reset_clears() {
        let store = CityModelStore::new();
        store.create("Zenith", 100_000, 2.0, 300_000.0).unwrap();
        store.update(10, "").unwrap();
        let replaced = store.create("Nadir", 500, 1.0, 10.0).unwrap();
        assert_eq!(store.get().unwrap(), replaced);

        store.reset();
        assert_eq!(store.get(), Err(DomainError::NotInitialized));
    }

    #[test]
    fn invalid_create_keeps_previous_model() {
        let store = CityModelStore::new();
        let original = store.create("Zenith", 100_000, 2.0, 300_000.0).unwrap();
        assert!(matches!(
            store.create("Broken", 0, 1.0, 1.0),
            Err(DomainError::Validation(_))
        ));
        assert_eq!(store.get().unwrap(), original);
    }

    #[test]
    fn concurrent_updates_are_serialized() {
        let store = Arc::new(CityModelStore::new());
        store.create("Zenith", 100_000, 2.0, 300_000.0).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..50 {
                        store.update(1, "").unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let model = store.get().unwrap();
        // 400 arrivals at 0.1 points each.
        assert!((model.base_growth_rate_percent() - 42.0).abs() < 1e-6);
        assert_eq!(
            model.derived_stats(),
            DerivedStats::compute(
                model.base_population(),
                model.base_growth_rate_percent(),
                model.base_price()
            )
        );
    }
}
