//! Scope-Link: control and telemetry client for embedded oscilloscope devices
//!
//! This library implements the acquisition/synchronization core of a
//! client for an oscilloscope-like sampler paired with a configurable
//! signal generator. It features:
//!
//! - Typed HTTP gateway to the device, one operation per endpoint
//! - Polling scheduler with single-flight captures and runtime re-arm
//! - Independent signal-generator status polling
//! - Fixed-shape render buffer normalization with per-channel fault isolation
//! - Confirmed-commit configuration store across two settings domains
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use scope_link::device::SimulatedDevice;
//! use scope_link::sinks::{LogRenderSink, LogStatusSink};
//! use scope_link::ScopeClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Talk to the built-in simulator; swap in HttpGateway for real hardware.
//!     let device = Arc::new(SimulatedDevice::with_defaults());
//!     let client = ScopeClient::new(
//!         device,
//!         Arc::new(LogRenderSink),
//!         Arc::new(LogStatusSink::default()),
//!     );
//!
//!     // Seed local settings from the device, then poll.
//!     client.refresh_from_device().await?;
//!     client.start();
//!
//!     tokio::time::sleep(std::time::Duration::from_secs(2)).await;
//!     client.shutdown();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod acquisition;
pub mod client;
pub mod config;
pub mod device;
pub mod error;
pub mod sinks;
pub mod utils;

// Re-export commonly used types for convenience
pub use acquisition::{AcquisitionScheduler, CaptureOutcome, RenderBuffer, SignalStatusPoller};
pub use client::ScopeClient;
pub use config::{
    AcquisitionSettings, ClientConfig, ConfigLoader, ConfigStore, SignalSettings, SignalStatus,
    WaveformType,
};
pub use device::{CaptureMode, GatewayError, HttpGateway, RawFrame, ScopeDevice, SimulatedDevice};
pub use error::{ScopeError, ScopeResult};
pub use sinks::{RenderSink, StatusSink};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
