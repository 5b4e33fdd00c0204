//! HTTP client for the telemetry backend.
//!
//! All endpoints live under `{base_url}/api` and speak JSON. No retry or
//! backoff here; the poll loop owns retry policy.

use anyhow::{Context, Result};
use reqwest::header::CONTENT_TYPE;
use serde::de::DeserializeOwned;
use sprout_common::api::{
    HumidityResponse, RelayStatus, RelayStatusResponse, SoilMoistureResponse, TemperatureResponse,
};
use std::time::Duration;

/// Per-request timeout. Comfortably above the poll interval would let slow
/// requests pile up, so keep it under one cycle.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(4);

/// The six backend operations, as a seam so the poller and relay command can
/// be exercised against a scripted fake in tests.
#[allow(async_fn_in_trait)]
pub trait TelemetryApi {
    async fn humidity(&self) -> Result<HumidityResponse>;
    async fn soil_moisture(&self) -> Result<SoilMoistureResponse>;
    async fn temperature(&self) -> Result<TemperatureResponse>;
    async fn relay_status(&self) -> Result<RelayStatusResponse>;
    async fn set_relay(&self, target: RelayStatus) -> Result<()>;
}

/// reqwest-backed client against a base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    api_base: String,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self {
            http,
            api_base: format!("{}/api", base_url.trim_end_matches('/')),
        })
    }

    pub fn api_base(&self) -> &str {
        &self.api_base
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .get(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("GET {url} failed"))?;

        response
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?
            .json()
            .await
            .with_context(|| format!("GET {url} returned an invalid payload"))
    }

    async fn post_empty(&self, path: &str) -> Result<()> {
        let url = format!("{}{}", self.api_base, path);
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await
            .with_context(|| format!("POST {url} failed"))?;

        response
            .error_for_status()
            .with_context(|| format!("POST {url} returned an error status"))?;
        Ok(())
    }
}

impl TelemetryApi for ApiClient {
    async fn humidity(&self) -> Result<HumidityResponse> {
        self.get_json("/humidity").await
    }

    async fn soil_moisture(&self) -> Result<SoilMoistureResponse> {
        self.get_json("/soil-moisture").await
    }

    async fn temperature(&self) -> Result<TemperatureResponse> {
        self.get_json("/temperature").await
    }

    async fn relay_status(&self) -> Result<RelayStatusResponse> {
        self.get_json("/relay-status").await
    }

    async fn set_relay(&self, target: RelayStatus) -> Result<()> {
        match target {
            RelayStatus::On => self.post_empty("/relay/on").await,
            RelayStatus::Off => self.post_empty("/relay/off").await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_base_gets_prefix() {
        let client = ApiClient::new("http://localhost:3000").unwrap();
        assert_eq!(client.api_base(), "http://localhost:3000/api");
    }

    #[test]
    fn trailing_slash_is_normalized() {
        let client = ApiClient::new("http://greenhouse.local:8080/").unwrap();
        assert_eq!(client.api_base(), "http://greenhouse.local:8080/api");
    }
}
