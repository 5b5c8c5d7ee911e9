// src/device/types.rs
//! Wire-level types for the device protocol

use serde::{Deserialize, Serialize};

/// Scheduler/device capture mode.
///
/// Continuous fetches a frame on every poll tick; Snapshot fetches only
/// on an explicit capture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CaptureMode {
    Continuous,
    Snapshot,
}

impl CaptureMode {
    /// Value of the `mode` query parameter on `/setMode`.
    pub fn as_query(&self) -> &'static str {
        match self {
            CaptureMode::Continuous => "continuous",
            CaptureMode::Snapshot => "snapshot",
        }
    }

    pub fn toggled(&self) -> CaptureMode {
        match self {
            CaptureMode::Continuous => CaptureMode::Snapshot,
            CaptureMode::Snapshot => CaptureMode::Continuous,
        }
    }
}

/// One multi-channel sample payload from `/data`.
///
/// Channel entries stay loosely typed: a malformed channel must not
/// poison its neighbors, so interpretation is deferred to the render
/// buffer. A payload without a `channels` member is an empty frame.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawFrame {
    #[serde(default)]
    pub channels: Vec<serde_json::Value>,
}

impl RawFrame {
    /// Frame from fully-formed numeric channels, mainly for simulators
    /// and tests.
    pub fn from_samples(channels: Vec<Vec<f64>>) -> Self {
        Self {
            channels: channels
                .into_iter()
                .map(|samples| serde_json::json!(samples))
                .collect(),
        }
    }
}

/// Response body of `/toggleSignal`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleResponse {
    pub enabled: bool,
}

/// Device gateway failures.
///
/// `Transport` covers unreachable devices and non-success HTTP statuses;
/// `Protocol` covers responses that are not the JSON shape the endpoint
/// promises. The gateway reports, callers decide: there is no retry at
/// this layer.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("transport failure on {endpoint}: {reason}")]
    Transport {
        endpoint: &'static str,
        status: Option<u16>,
        reason: String,
    },

    #[error("protocol failure on {endpoint}: {reason}")]
    Protocol {
        endpoint: &'static str,
        reason: String,
    },

    #[error("gateway configuration error: {reason}")]
    Configuration { reason: String },
}

impl GatewayError {
    pub fn transport(endpoint: &'static str, reason: impl Into<String>) -> Self {
        GatewayError::Transport {
            endpoint,
            status: None,
            reason: reason.into(),
        }
    }

    pub fn status(endpoint: &'static str, status: u16) -> Self {
        GatewayError::Transport {
            endpoint,
            status: Some(status),
            reason: format!("HTTP {}", status),
        }
    }

    pub fn protocol(endpoint: &'static str, reason: impl Into<String>) -> Self {
        GatewayError::Protocol {
            endpoint,
            reason: reason.into(),
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, GatewayError::Transport { .. })
    }

    pub fn is_protocol(&self) -> bool {
        matches!(self, GatewayError::Protocol { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_query_values() {
        assert_eq!(CaptureMode::Continuous.as_query(), "continuous");
        assert_eq!(CaptureMode::Snapshot.as_query(), "snapshot");
        assert_eq!(CaptureMode::Continuous.toggled(), CaptureMode::Snapshot);
    }

    #[test]
    fn test_frame_without_channels_is_empty() {
        let frame: RawFrame = serde_json::from_str("{}").unwrap();
        assert!(frame.channels.is_empty());
    }

    #[test]
    fn test_frame_keeps_malformed_channels_loose() {
        let frame: RawFrame =
            serde_json::from_str(r#"{"channels": [[1, 2], "bad", [3]]}"#).unwrap();
        assert_eq!(frame.channels.len(), 3);
        assert!(frame.channels[1].as_array().is_none());
    }

    #[test]
    fn test_error_classification() {
        assert!(GatewayError::status("/data", 500).is_transport());
        assert!(GatewayError::protocol("/data", "not json").is_protocol());
    }
}
