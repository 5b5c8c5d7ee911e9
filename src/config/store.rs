// src/config/store.rs
//! Last-known-good settings store
//!
//! Holds the settings pair the device has confirmed. Mutated only by the
//! apply flows after the device accepts a configuration; consumers never
//! observe a half-updated record.

use crate::config::settings::{AcquisitionSettings, SignalSettings};
use parking_lot::RwLock;
use tracing::warn;

struct Inner {
    acquisition: AcquisitionSettings,
    signal: SignalSettings,
}

/// Shared store of the current acquisition and generator settings.
///
/// Commits replace a whole domain at once and are visible to every reader
/// before the call returns; the scheduler reads cadence synchronously when
/// re-arming.
pub struct ConfigStore {
    inner: RwLock<Inner>,
}

impl ConfigStore {
    pub fn new(acquisition: AcquisitionSettings, signal: SignalSettings) -> Self {
        Self {
            inner: RwLock::new(Inner { acquisition, signal }),
        }
    }

    /// Snapshot of both settings domains.
    pub fn snapshot(&self) -> (AcquisitionSettings, SignalSettings) {
        let inner = self.inner.read();
        (inner.acquisition.clone(), inner.signal.clone())
    }

    pub fn acquisition(&self) -> AcquisitionSettings {
        self.inner.read().acquisition.clone()
    }

    pub fn signal(&self) -> SignalSettings {
        self.inner.read().signal.clone()
    }

    /// Replace the acquisition settings wholesale.
    pub fn commit_acquisition(&self, settings: AcquisitionSettings) {
        for warning in settings.range_warnings() {
            warn!(target: "scope_link::config", "{}", warning);
        }
        self.inner.write().acquisition = settings;
    }

    /// Replace the generator settings wholesale.
    pub fn commit_signal(&self, settings: SignalSettings) {
        for warning in settings.range_warnings() {
            warn!(target: "scope_link::config", "{}", warning);
        }
        self.inner.write().signal = settings;
    }
}

impl Default for ConfigStore {
    fn default() -> Self {
        Self::new(AcquisitionSettings::default(), SignalSettings::default())
    }
}
