// src/device/http.rs
//! HTTP gateway to the device
//!
//! One method per endpoint, each a single fallible request/response
//! pair. Timeouts come from the client configuration; retry policy is
//! the caller's concern (the next poll tick, for the scheduler).

use crate::config::constants::wire;
use crate::config::loader::ClientConfig;
use crate::config::settings::{AcquisitionSettings, SignalSettings, SignalStatus};
use crate::device::traits::ScopeDevice;
use crate::device::types::{CaptureMode, GatewayError, RawFrame, ToggleResponse};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::debug;

/// Request counters for monitoring
#[derive(Debug, Default)]
struct GatewayStats {
    requests_issued: AtomicU64,
    transport_failures: AtomicU64,
    protocol_failures: AtomicU64,
}

/// Point-in-time copy of the gateway counters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayStatsSnapshot {
    pub requests_issued: u64,
    pub transport_failures: u64,
    pub protocol_failures: u64,
}

/// [`ScopeDevice`] implementation over HTTP with JSON bodies.
pub struct HttpGateway {
    config: ClientConfig,
    client: reqwest::Client,
    stats: GatewayStats,
}

impl HttpGateway {
    pub fn new(config: ClientConfig) -> Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| GatewayError::Configuration {
                reason: err.to_string(),
            })?;

        Ok(Self {
            config,
            client,
            stats: GatewayStats::default(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    pub fn stats(&self) -> GatewayStatsSnapshot {
        GatewayStatsSnapshot {
            requests_issued: self.stats.requests_issued.load(Ordering::Relaxed),
            transport_failures: self.stats.transport_failures.load(Ordering::Relaxed),
            protocol_failures: self.stats.protocol_failures.load(Ordering::Relaxed),
        }
    }

    async fn execute(
        &self,
        endpoint: &'static str,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, GatewayError> {
        self.stats.requests_issued.fetch_add(1, Ordering::Relaxed);
        debug!(endpoint, "device request");

        let response = request.send().await.map_err(|err| {
            self.stats.transport_failures.fetch_add(1, Ordering::Relaxed);
            GatewayError::Transport {
                endpoint,
                status: err.status().map(|status| status.as_u16()),
                reason: err.to_string(),
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            self.stats.transport_failures.fetch_add(1, Ordering::Relaxed);
            return Err(GatewayError::status(endpoint, status.as_u16()));
        }
        Ok(response)
    }

    async fn parse_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        response: reqwest::Response,
    ) -> Result<T, GatewayError> {
        let body = response.text().await.map_err(|err| {
            self.stats.transport_failures.fetch_add(1, Ordering::Relaxed);
            GatewayError::transport(endpoint, err.to_string())
        })?;
        serde_json::from_str(&body).map_err(|err| {
            self.stats.protocol_failures.fetch_add(1, Ordering::Relaxed);
            GatewayError::protocol(endpoint, err.to_string())
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
    ) -> Result<T, GatewayError> {
        let request = self.client.get(self.config.endpoint_url(endpoint));
        let response = self.execute(endpoint, request).await?;
        self.parse_json(endpoint, response).await
    }

    async fn post_json<B: Serialize>(
        &self,
        endpoint: &'static str,
        body: &B,
    ) -> Result<(), GatewayError> {
        let request = self.client.post(self.config.endpoint_url(endpoint)).json(body);
        self.execute(endpoint, request).await?;
        Ok(())
    }

    async fn post_parse<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
    ) -> Result<T, GatewayError> {
        let request = self.client.post(self.config.endpoint_url(endpoint));
        let response = self.execute(endpoint, request).await?;
        self.parse_json(endpoint, response).await
    }
}

#[async_trait]
impl ScopeDevice for HttpGateway {
    async fn fetch_samples(&self) -> Result<RawFrame, GatewayError> {
        self.get_json(wire::EP_DATA).await
    }

    async fn set_mode(&self, mode: CaptureMode) -> Result<(), GatewayError> {
        let request = self
            .client
            .get(self.config.endpoint_url(wire::EP_SET_MODE))
            .query(&[("mode", mode.as_query())]);
        self.execute(wire::EP_SET_MODE, request).await?;
        Ok(())
    }

    async fn apply_acquisition_config(
        &self,
        settings: &AcquisitionSettings,
    ) -> Result<(), GatewayError> {
        self.post_json(wire::EP_SET_CONFIG, settings).await
    }

    async fn apply_signal_config(&self, settings: &SignalSettings) -> Result<(), GatewayError> {
        self.post_json(wire::EP_SET_SIGNAL_CONFIG, settings).await
    }

    async fn toggle_signal(&self) -> Result<bool, GatewayError> {
        let response: ToggleResponse = self.post_parse(wire::EP_TOGGLE_SIGNAL).await?;
        Ok(response.enabled)
    }

    async fn send_single_pulse(&self) -> Result<(), GatewayError> {
        let request = self.client.post(self.config.endpoint_url(wire::EP_SINGLE_PULSE));
        self.execute(wire::EP_SINGLE_PULSE, request).await?;
        Ok(())
    }

    async fn fetch_signal_status(&self) -> Result<SignalStatus, GatewayError> {
        self.get_json(wire::EP_GET_SIGNAL_STATUS).await
    }

    async fn fetch_acquisition_config(&self) -> Result<AcquisitionSettings, GatewayError> {
        self.get_json(wire::EP_GET_CONFIG).await
    }

    async fn fetch_signal_config(&self) -> Result<SignalSettings, GatewayError> {
        self.get_json(wire::EP_GET_SIGNAL_CONFIG).await
    }
}
