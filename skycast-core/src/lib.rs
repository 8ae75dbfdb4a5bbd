//! Core library for the `skycast` terminal weather app.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client behind a small provider trait
//! - Shared response models (current conditions, forecast, place search)
//! - The debounced type-ahead suggestion worker
//!
//! It is used by `skycast-cli`, but can also be reused by other binaries or services.

pub mod config;
pub mod error;
pub mod model;
pub mod provider;
pub mod suggest;

pub use config::Config;
pub use error::WeatherError;
pub use model::{SearchHit, Units, Weather, WeatherForecast};
pub use provider::{DEFAULT_BASE_URL, WeatherApi, WeatherSource, source_from_config};
pub use suggest::{SuggestionBatch, TypeAhead};
