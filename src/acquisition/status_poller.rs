// src/acquisition/status_poller.rs
//! Signal-generator status polling
//!
//! Runs on its own timer at the same cadence source as the acquisition
//! scheduler but independent of the capture guard: status and sample
//! polling must not block each other. Results replace the last-known
//! status wholesale; a failed poll keeps the stale value, which beats a
//! blanked display.

use crate::acquisition::timer::{PollTimer, TimerHandle};
use crate::config::settings::SignalStatus;
use crate::config::store::ConfigStore;
use crate::device::traits::ScopeDevice;
use crate::sinks::StatusSink;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

struct Core {
    device: Arc<dyn ScopeDevice>,
    store: Arc<ConfigStore>,
    status: Arc<dyn StatusSink>,
    last_status: RwLock<Option<SignalStatus>>,
}

/// Independent polling loop for the generator status display.
pub struct SignalStatusPoller {
    core: Arc<Core>,
    timer: Mutex<Option<TimerHandle>>,
}

impl SignalStatusPoller {
    pub fn new(
        device: Arc<dyn ScopeDevice>,
        store: Arc<ConfigStore>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self {
            core: Arc::new(Core {
                device,
                store,
                status,
                last_status: RwLock::new(None),
            }),
            timer: Mutex::new(None),
        }
    }

    pub fn start(&self) {
        let mut slot = self.timer.lock();
        if slot.is_none() {
            *slot = Some(self.arm());
        }
    }

    /// Cancel and replace the timer at the store's current cadence.
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

    /// One off-cadence poll, now.
    pub fn refresh_now(&self) {
        Core::poll(&self.core);
    }

    /// One off-cadence poll after a delay (post-pulse refresh).
    pub fn refresh_after(&self, delay: Duration) {
        let core = Arc::clone(&self.core);
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            Core::poll(&core);
        });
    }

    /// Latest device-reported status, if any poll has succeeded.
    pub fn last_status(&self) -> Option<SignalStatus> {
        self.core.last_status.read().clone()
    }

    fn arm(&self) -> TimerHandle {
        let period = Duration::from_millis(self.core.store.acquisition().web_update as u64);
        debug!(period_ms = period.as_millis() as u64, "status timer armed");
        let core = Arc::clone(&self.core);
        PollTimer::start(period, move || Core::poll(&core))
    }
}

impl Core {
    /// Unguarded by design: overlapping polls are harmless because the
    /// replacement is wholesale and idempotent.
    fn poll(core: &Arc<Core>) {
        let core = Arc::clone(core);
        tokio::spawn(async move {
            match core.device.fetch_signal_status().await {
                Ok(status) => {
                    let label = status.label();
                    core.status.set_signal(status.enabled, &label);
                    *core.last_status.write() = Some(status);
                }
                Err(err) => {
                    debug!(error = %err, "status poll failed, keeping last known");
                }
            }
        });
    }
}

impl Drop for SignalStatusPoller {
    fn drop(&mut self) {
        self.shutdown();
    }
}
