// src/device/mod.rs
//! Device access layer: the trait seam, the HTTP gateway, and the
//! in-process simulator

pub mod http;
pub mod simulator;
pub mod traits;
pub mod types;

pub use http::{HttpGateway, GatewayStatsSnapshot};
pub use simulator::{SimulatedDevice, SimulatorConfig};
pub use traits::ScopeDevice;
pub use types::{CaptureMode, GatewayError, RawFrame, ToggleResponse};
