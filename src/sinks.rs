// src/sinks.rs
//! Collaborator interfaces for the rendering surface and status display
//!
//! The core pushes into these; it never reads back. Implementations are
//! expected to be cheap and non-blocking since they run on the polling
//! path.

use parking_lot::Mutex;
use tracing::{debug, info};

/// Consumes normalized render buffers.
pub trait RenderSink: Send + Sync {
    /// Redraw from a fixed-shape buffer: one label row, six channels.
    fn update(&self, labels: &[u32], channels: &[Vec<f64>]);
}

/// Consumes connection and generator status changes.
pub trait StatusSink: Send + Sync {
    fn set_connected(&self, connected: bool);
    fn set_signal(&self, enabled: bool, label: &str);
}

/// Render sink that logs frame shapes; for headless use.
#[derive(Debug, Default)]
pub struct LogRenderSink;

impl RenderSink for LogRenderSink {
    fn update(&self, labels: &[u32], channels: &[Vec<f64>]) {
        debug!(
            samples = labels.len(),
            channels = channels.len(),
            "render buffer updated"
        );
    }
}

/// Status sink that logs transitions only.
#[derive(Debug, Default)]
pub struct LogStatusSink {
    last_connected: Mutex<Option<bool>>,
    last_signal: Mutex<Option<(bool, String)>>,
}

impl StatusSink for LogStatusSink {
    fn set_connected(&self, connected: bool) {
        let mut last = self.last_connected.lock();
        if *last != Some(connected) {
            *last = Some(connected);
            info!(connected, "device connection changed");
        }
    }

    fn set_signal(&self, enabled: bool, label: &str) {
        let mut last = self.last_signal.lock();
        let current = (enabled, label.to_string());
        if last.as_ref() != Some(&current) {
            info!(enabled, label, "generator status changed");
            *last = Some(current);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_sinks_accept_updates() {
        let render = LogRenderSink;
        render.update(&[0, 1], &vec![vec![0.0, 1.0]; 6]);

        let status = LogStatusSink::default();
        status.set_connected(true);
        status.set_connected(true);
        status.set_signal(true, "Sine 1000Hz (3.30V)");
        assert_eq!(*status.last_connected.lock(), Some(true));
    }
}
