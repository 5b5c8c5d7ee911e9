// src/acquisition/scheduler.rs
//! Acquisition polling scheduler
//!
//! Owns the sample-poll cadence, the single-flight capture guard, and
//! the continuous/snapshot mode flag. One tick in continuous mode means
//! at most one capture; a capture still in flight makes concurrent
//! requests no-ops (dropped, not queued). Re-arming replaces the timer
//! atomically with respect to ticks: the old timer is cancelled before
//! the new one starts, and in-flight fetches are left to land.

use crate::acquisition::frame_buffer::RenderBuffer;
use crate::acquisition::timer::{PollTimer, TimerHandle};
use crate::config::store::ConfigStore;
use crate::device::traits::ScopeDevice;
use crate::device::types::CaptureMode;
use crate::sinks::{RenderSink, StatusSink};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// What happened to a capture request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// A fetch task was dispatched.
    Dispatched,
    /// Dropped: a fetch is already outstanding.
    InFlight,
}

/// Mutable scheduler state, owned in one place.
struct SchedulerState {
    mode: Mutex<CaptureMode>,
    capturing: AtomicBool,
}

struct Core {
    state: SchedulerState,
    device: Arc<dyn ScopeDevice>,
    store: Arc<ConfigStore>,
    buffer: Mutex<RenderBuffer>,
    render: Arc<dyn RenderSink>,
    status: Arc<dyn StatusSink>,
}

/// Releases the capture guard on every exit path, panics included.
struct CaptureGuard<'a>(&'a AtomicBool);

impl Drop for CaptureGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// The acquisition polling state machine.
pub struct AcquisitionScheduler {
    core: Arc<Core>,
    timer: Mutex<Option<TimerHandle>>,
}

impl AcquisitionScheduler {
    pub fn new(
        device: Arc<dyn ScopeDevice>,
        store: Arc<ConfigStore>,
        render: Arc<dyn RenderSink>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        let num_samples = store.acquisition().num_samples as usize;
        Self {
            core: Arc::new(Core {
                state: SchedulerState {
                    mode: Mutex::new(CaptureMode::Continuous),
                    capturing: AtomicBool::new(false),
                },
                device,
                store,
                buffer: Mutex::new(RenderBuffer::new(num_samples)),
                render,
                status,
            }),
            timer: Mutex::new(None),
        }
    }

    /// Arm the poll timer at the store's current cadence. No-op when
    /// already running.
    pub fn start(&self) {
        let mut slot = self.timer.lock();
        if slot.is_none() {
            *slot = Some(self.arm());
        }
    }

    /// Cancel the live timer and start a replacement at the store's
    /// current cadence. The cancelled timer cannot tick again once this
    /// begins; an in-flight fetch is left to complete.
    pub fn rearm(&self) {
        let mut slot = self.timer.lock();
        if let Some(handle) = slot.take() {
            handle.cancel();
        }
        *slot = Some(self.arm());
    }

    pub fn shutdown(&self) {
        if let Some(handle) = self.timer.lock().take() {
            handle.cancel();
        }
    }

    pub fn is_running(&self) -> bool {
        self.timer.lock().is_some()
    }

    pub fn mode(&self) -> CaptureMode {
        *self.core.state.mode.lock()
    }

    /// Flip continuous/snapshot. The local flag changes immediately;
    /// the device is notified best-effort on a detached task and a
    /// notification failure does not flip the flag back.
    pub fn toggle_mode(&self) -> CaptureMode {
        let mode = {
            let mut current = self.core.state.mode.lock();
            *current = current.toggled();
            *current
        };
        debug!(?mode, "capture mode toggled");

        let device = Arc::clone(&self.core.device);
        tokio::spawn(async move {
            if let Err(err) = device.set_mode(mode).await {
                warn!(error = %err, ?mode, "device mode notification failed");
            }
        });
        mode
    }

    /// Explicit capture request; works in either mode, subject to the
    /// single-flight guard.
    pub fn capture_now(&self) -> CaptureOutcome {
        Core::dispatch_capture(&self.core)
    }

    /// Whether a sample fetch is currently outstanding.
    pub fn in_flight(&self) -> bool {
        self.core.state.capturing.load(Ordering::Acquire)
    }

    /// Zero-fill the render buffer for a new sample count and push the
    /// blank frame to the sink.
    pub fn resize_buffer(&self, num_samples: usize) {
        self.core.buffer.lock().resize(num_samples);
        Core::push_to_render(&self.core);
    }

    /// Zero-fill the render buffer in its current shape (the Clear
    /// action) and push it.
    pub fn clear(&self) {
        self.core.buffer.lock().clear();
        Core::push_to_render(&self.core);
    }

    fn arm(&self) -> TimerHandle {
        let period = Duration::from_millis(self.core.store.acquisition().web_update as u64);
        debug!(period_ms = period.as_millis() as u64, "acquisition timer armed");
        let core = Arc::clone(&self.core);
        PollTimer::start(period, move || Core::tick(&core))
    }
}

impl Core {
    fn tick(core: &Arc<Core>) {
        if *core.state.mode.lock() == CaptureMode::Continuous {
            Self::dispatch_capture(core);
        }
    }

    /// Latch the guard and spawn the fetch; drop the request when a
    /// fetch is already outstanding.
    fn dispatch_capture(core: &Arc<Core>) -> CaptureOutcome {
        if core.state.capturing.swap(true, Ordering::AcqRel) {
            debug!("capture request dropped, fetch already in flight");
            return CaptureOutcome::InFlight;
        }

        let core = Arc::clone(core);
        tokio::spawn(async move {
            let _guard = CaptureGuard(&core.state.capturing);
            match core.device.fetch_samples().await {
                Ok(frame) => {
                    {
                        let mut buffer = core.buffer.lock();
                        let outcome = buffer.apply(&frame);
                        debug!(
                            updated = outcome.updated,
                            skipped = outcome.skipped,
                            "frame normalized"
                        );
                    }
                    Self::push_to_render(&core);
                    core.status.set_connected(true);
                }
                Err(err) => {
                    warn!(error = %err, "sample fetch failed");
                    core.status.set_connected(false);
                }
            }
        });
        CaptureOutcome::Dispatched
    }

    fn push_to_render(core: &Arc<Core>) {
        let (labels, channels) = {
            let buffer = core.buffer.lock();
            (buffer.labels().to_vec(), buffer.channels().to_vec())
        };
        core.render.update(&labels, &channels);
    }
}

impl Drop for AcquisitionScheduler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
