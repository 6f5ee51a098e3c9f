//! Infrastructure layer: the city model store, report assembly, AI provider adapters
//! and static sample data.

pub mod ai;
pub mod city_store;
pub mod daily_report;
pub mod historical;

pub use city_store::{CityModelStore, CityUpdate};
pub use daily_report::{ADVICE_UNAVAILABLE, DailyReportOrchestrator};
