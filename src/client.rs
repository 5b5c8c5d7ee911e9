// src/client.rs
//! Client coordinator
//!
//! Glues the store, gateway, scheduler, and status poller together and
//! owns the confirm-then-commit discipline: the device accepts a
//! configuration before the local store or any timer changes. A
//! rejected apply leaves store, render buffer, and cadence exactly as
//! they were.

use crate::acquisition::scheduler::{AcquisitionScheduler, CaptureOutcome};
use crate::acquisition::status_poller::SignalStatusPoller;
use crate::config::constants::generator;
use crate::config::settings::{AcquisitionSettings, SignalSettings, SignalStatus};
use crate::config::store::ConfigStore;
use crate::device::traits::ScopeDevice;
use crate::device::types::CaptureMode;
use crate::error::ScopeResult;
use crate::sinks::{RenderSink, StatusSink};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Top-level client handle: one device, one store, both polling loops.
pub struct ScopeClient {
    device: Arc<dyn ScopeDevice>,
    store: Arc<ConfigStore>,
    scheduler: AcquisitionScheduler,
    poller: SignalStatusPoller,
}

impl ScopeClient {
    pub fn new(
        device: Arc<dyn ScopeDevice>,
        render: Arc<dyn RenderSink>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        Self::with_store(device, Arc::new(ConfigStore::default()), render, status)
    }

    /// Client over a pre-seeded store (settings from a configuration
    /// file, for instance).
    pub fn with_store(
        device: Arc<dyn ScopeDevice>,
        store: Arc<ConfigStore>,
        render: Arc<dyn RenderSink>,
        status: Arc<dyn StatusSink>,
    ) -> Self {
        let scheduler = AcquisitionScheduler::new(
            Arc::clone(&device),
            Arc::clone(&store),
            render,
            Arc::clone(&status),
        );
        let poller = SignalStatusPoller::new(Arc::clone(&device), Arc::clone(&store), status);
        Self {
            device,
            store,
            scheduler,
            poller,
        }
    }

    pub fn store(&self) -> &Arc<ConfigStore> {
        &self.store
    }

    pub fn scheduler(&self) -> &AcquisitionScheduler {
        &self.scheduler
    }

    pub fn status_poller(&self) -> &SignalStatusPoller {
        &self.poller
    }

    /// Seed the store from the device: both configuration domains, as
    /// the boot sequence does before the first render.
    pub async fn refresh_from_device(&self) -> ScopeResult<()> {
        let acquisition = self.device.fetch_acquisition_config().await?;
        let signal = self.device.fetch_signal_config().await?;

        self.scheduler.resize_buffer(acquisition.num_samples as usize);
        self.store.commit_acquisition(acquisition);
        self.store.commit_signal(signal);
        if self.scheduler.is_running() {
            self.scheduler.rearm();
        }
        if self.poller.is_running() {
            self.poller.rearm();
        }
        info!("configuration seeded from device");
        Ok(())
    }

    /// Arm both polling loops at the current cadence. Idempotent.
    pub fn start(&self) {
        self.scheduler.start();
        self.poller.start();
    }

    /// Cancel both polling loops. Idempotent.
    pub fn shutdown(&self) {
        self.scheduler.shutdown();
        self.poller.shutdown();
    }

    /// Apply acquisition settings: device first, then commit, then
    /// re-arm both timers at the new cadence.
    pub async fn apply_acquisition(&self, settings: AcquisitionSettings) -> ScopeResult<()> {
        self.device.apply_acquisition_config(&settings).await?;

        self.scheduler.resize_buffer(settings.num_samples as usize);
        self.store.commit_acquisition(settings);
        if self.scheduler.is_running() {
            self.scheduler.rearm();
        }
        if self.poller.is_running() {
            self.poller.rearm();
        }
        info!("acquisition settings applied");
        Ok(())
    }

    /// Apply generator settings: device first, then commit. Cadence is
    /// untouched; the status display refreshes off-cadence.
    pub async fn apply_signal(&self, settings: SignalSettings) -> ScopeResult<()> {
        self.device.apply_signal_config(&settings).await?;

        self.store.commit_signal(settings);
        self.poller.refresh_now();
        info!("signal settings applied");
        Ok(())
    }

    /// Flip the generator; returns the device-reported new state.
    pub async fn toggle_signal(&self) -> ScopeResult<bool> {
        let enabled = self.device.toggle_signal().await?;
        self.poller.refresh_now();
        Ok(enabled)
    }

    /// Fire one pulse, then refresh the status display shortly after.
    pub async fn send_single_pulse(&self) -> ScopeResult<()> {
        self.device.send_single_pulse().await?;
        self.poller
            .refresh_after(Duration::from_millis(generator::POST_PULSE_STATUS_DELAY_MS));
        Ok(())
    }

    pub fn toggle_mode(&self) -> CaptureMode {
        self.scheduler.toggle_mode()
    }

    pub fn capture_now(&self) -> CaptureOutcome {
        self.scheduler.capture_now()
    }

    /// Zero the render display without touching settings.
    pub fn clear_display(&self) {
        self.scheduler.clear();
    }

    pub fn last_signal_status(&self) -> Option<SignalStatus> {
        self.poller.last_status()
    }
}
