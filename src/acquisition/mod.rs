// src/acquisition/mod.rs
//! Acquisition scheduling and buffering components

pub mod frame_buffer;
pub mod scheduler;
pub mod status_poller;
pub mod timer;

pub use frame_buffer::{BufferMetrics, FrameOutcome, RenderBuffer};
pub use scheduler::{AcquisitionScheduler, CaptureOutcome};
pub use status_poller::SignalStatusPoller;
pub use timer::{PollTimer, TimerHandle};
