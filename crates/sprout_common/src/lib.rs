//! Shared types for the sprout greenhouse dashboard.
//!
//! Wire payloads for the telemetry backend, client configuration, and the
//! bounded history buffer that backs each chart.

pub mod api;
pub mod config;
pub mod history;

pub use api::{
    HumidityResponse, RelayStatus, RelayStatusResponse, SoilMoistureResponse, TemperatureResponse,
};
pub use config::Config;
pub use history::HistoryBuffer;
