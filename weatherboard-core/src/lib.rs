//! Core library for the `weatherboard` terminal dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The OpenWeather fetch layer and the two-step fetch pipeline
//! - Forecast aggregation (upcoming hours, per-day summaries) and icon mapping
//! - Dashboard state with explicit transitions
//!
//! It is used by `weatherboard-cli`, but can also back other front ends.

pub mod aggregate;
pub mod app;
pub mod board;
pub mod config;
pub mod error;
pub mod icon;
pub mod model;
pub mod pipeline;
pub mod provider;

pub use app::{Applied, Dashboard, FetchRequest};
pub use board::Board;
pub use config::Config;
pub use error::{LOOKUP_FAILED_MESSAGE, LookupError};
pub use model::{
    Condition, Coordinates, CurrentConditions, DailySummary, Forecast, ForecastSample,
    HourlyDisplayItem, Snapshot,
};
pub use pipeline::{Pipeline, fetch_cycle};
pub use provider::{OpenWeatherClient, WeatherSource, source_from_config};
