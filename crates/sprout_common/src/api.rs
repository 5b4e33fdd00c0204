//! Wire types for the telemetry backend.
//!
//! The backend speaks JSON under an `/api` prefix. Field casing follows the
//! backend exactly (`soilMoisture`, relay status `"ON"`/`"OFF"`).

use serde::{Deserialize, Serialize};
use std::fmt;

/// Relay state as reported by `GET /api/relay-status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelayStatus {
    #[serde(rename = "ON")]
    On,
    #[serde(rename = "OFF")]
    Off,
}

impl RelayStatus {
    /// Wire form, also used in user-facing messages ("Relay turned ON").
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::On => "ON",
            Self::Off => "OFF",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Self::On => Self::Off,
            Self::Off => Self::On,
        }
    }
}

impl fmt::Display for RelayStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `GET /api/humidity` payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct HumidityResponse {
    pub humidity: f64,
}

/// `GET /api/soil-moisture` payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoilMoistureResponse {
    pub soil_moisture: f64,
}

/// `GET /api/temperature` payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TemperatureResponse {
    pub temperature: f64,
}

/// `GET /api/relay-status` payload.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RelayStatusResponse {
    pub status: RelayStatus,
}
