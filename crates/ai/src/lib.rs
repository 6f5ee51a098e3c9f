//! `citysim-ai`
//!
//! **Responsibility:** the resilient forecast pipeline.
//!
//! - `client`: the abstract text-generation capability (vendor-agnostic).
//! - `prompt` / `parser`: deterministic prompts in, tolerant extraction out.
//! - `fallback`: arithmetic forecast used whenever the model path fails.
//! - `forecast`: the orchestrator tying them into a total function.
//!
//! This crate does not own the city model; it only reads snapshots of it.

pub mod client;
pub mod fallback;
pub mod forecast;
pub mod parser;
pub mod prompt;

pub use client::{AiClient, AiError, OfflineAiClient, ScriptedAiClient, generate_bounded};
pub use fallback::fallback_prediction;
pub use forecast::{ForecastDomain, PredictionOrchestrator};
pub use parser::{ParseError, parse_prediction};
