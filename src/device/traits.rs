// src/device/traits.rs
//! Core device trait: one operation per wire endpoint

use crate::config::settings::{AcquisitionSettings, SignalSettings, SignalStatus};
use crate::device::types::{CaptureMode, GatewayError, RawFrame};
use async_trait::async_trait;

/// Typed request/response access to the acquisition device.
///
/// Implementations are stateless wrappers over the wire protocol: no
/// retries, no caching, no settings-store mutation. The scheduler and
/// client hold this as a trait object so tests can substitute fakes or
/// the built-in simulator.
#[async_trait]
pub trait ScopeDevice: Send + Sync {
    /// Pull one sample frame.
    async fn fetch_samples(&self) -> Result<RawFrame, GatewayError>;

    /// Hint the device-side capture mode.
    async fn set_mode(&self, mode: CaptureMode) -> Result<(), GatewayError>;

    /// Apply acquisition settings.
    async fn apply_acquisition_config(
        &self,
        settings: &AcquisitionSettings,
    ) -> Result<(), GatewayError>;

    /// Apply signal-generator settings.
    async fn apply_signal_config(&self, settings: &SignalSettings) -> Result<(), GatewayError>;

    /// Flip the generator on or off; returns the new state.
    async fn toggle_signal(&self) -> Result<bool, GatewayError>;

    /// Fire one generator pulse.
    async fn send_single_pulse(&self) -> Result<(), GatewayError>;

    /// Live generator status.
    async fn fetch_signal_status(&self) -> Result<SignalStatus, GatewayError>;

    /// Current acquisition settings as the device knows them.
    async fn fetch_acquisition_config(&self) -> Result<AcquisitionSettings, GatewayError>;

    /// Current generator settings as the device knows them.
    async fn fetch_signal_config(&self) -> Result<SignalSettings, GatewayError>;
}
