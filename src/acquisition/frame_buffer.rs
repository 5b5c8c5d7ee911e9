// src/acquisition/frame_buffer.rs
//! Render buffer normalization
//!
//! Raw frames arrive with whatever channel count and sample lengths the
//! device produced; the rendering surface wants exactly six channels.
//! Normalization is per-channel: a malformed entry leaves that channel's
//! previous contents in place and never disturbs its neighbors.

use crate::config::constants::render::RENDER_CHANNEL_COUNT;
use crate::device::types::RawFrame;
use serde_json::Value;

/// Result of applying one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameOutcome {
    /// Channels replaced from the payload.
    pub updated: usize,
    /// Channel entries present but malformed, left at previous contents.
    pub skipped: usize,
}

/// Counters for monitoring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferMetrics {
    pub frames_applied: u64,
    pub channels_updated: u64,
    pub channels_skipped: u64,
}

/// Fixed-shape buffer the render sink consumes: six channels plus an
/// index label row.
pub struct RenderBuffer {
    labels: Vec<u32>,
    channels: Vec<Vec<f64>>,
    metrics: BufferMetrics,
}

impl RenderBuffer {
    pub fn new(num_samples: usize) -> Self {
        Self {
            labels: (0..num_samples as u32).collect(),
            channels: vec![vec![0.0; num_samples]; RENDER_CHANNEL_COUNT],
            metrics: BufferMetrics::default(),
        }
    }

    pub fn channel_count(&self) -> usize {
        RENDER_CHANNEL_COUNT
    }

    pub fn num_samples(&self) -> usize {
        self.labels.len()
    }

    pub fn labels(&self) -> &[u32] {
        &self.labels
    }

    pub fn channels(&self) -> &[Vec<f64>] {
        &self.channels
    }

    pub fn channel(&self, index: usize) -> Option<&[f64]> {
        self.channels.get(index).map(Vec::as_slice)
    }

    pub fn metrics(&self) -> BufferMetrics {
        self.metrics
    }

    /// Zero-fill all channels and regenerate labels for a new sample
    /// count (settings change).
    pub fn resize(&mut self, num_samples: usize) {
        self.labels = (0..num_samples as u32).collect();
        for channel in &mut self.channels {
            *channel = vec![0.0; num_samples];
        }
    }

    /// Zero-fill without reshaping.
    pub fn clear(&mut self) {
        for channel in &mut self.channels {
            channel.iter_mut().for_each(|sample| *sample = 0.0);
        }
    }

    /// Fold one raw frame into the buffer, channel by channel. A frame
    /// with no channels updates nothing.
    pub fn apply(&mut self, frame: &RawFrame) -> FrameOutcome {
        let mut outcome = FrameOutcome::default();
        if frame.channels.is_empty() {
            return outcome;
        }

        for index in 0..RENDER_CHANNEL_COUNT {
            match frame.channels.get(index) {
                Some(entry) => match channel_samples(entry) {
                    Some(samples) => {
                        self.channels[index] = samples;
                        outcome.updated += 1;
                    }
                    None => outcome.skipped += 1,
                },
                // Short payload: trailing channels keep previous data.
                None => {}
            }
        }

        if outcome.updated > 0 {
            self.metrics.frames_applied += 1;
        }
        self.metrics.channels_updated += outcome.updated as u64;
        self.metrics.channels_skipped += outcome.skipped as u64;
        outcome
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new(crate::config::constants::capture::DEFAULT_NUM_SAMPLES as usize)
    }
}

/// A well-formed channel is a JSON array whose elements are all numbers.
fn channel_samples(entry: &Value) -> Option<Vec<f64>> {
    let array = entry.as_array()?;
    array.iter().map(Value::as_f64).collect()
}
