//! `citysim-core` — domain foundation for the forecast pipeline and the city simulation.
//!
//! This crate contains **pure domain** types and arithmetic (no I/O, no AI, no async).

pub mod city;
pub mod error;
pub mod forecast;
pub mod id;
pub mod report;

pub use city::{CityModel, DerivedStats};
pub use error::{DomainError, DomainResult};
pub use forecast::{PredictionRequest, PredictionResult, PredictionStatus};
pub use id::ReportId;
pub use report::{AutoFill, DailyReportInput, DailyReportResult};
