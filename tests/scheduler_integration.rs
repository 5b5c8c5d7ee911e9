// tests/scheduler_integration.rs
//! Integration tests for the acquisition scheduler state machine

use async_trait::async_trait;
use parking_lot::Mutex;
use scope_link::config::{AcquisitionSettings, ConfigStore, SignalSettings, SignalStatus};
use scope_link::device::{CaptureMode, GatewayError, RawFrame, ScopeDevice};
use scope_link::sinks::{RenderSink, StatusSink};
use scope_link::{AcquisitionScheduler, CaptureOutcome};
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Device fake with controllable latency and failure behavior plus
/// concurrency accounting.
#[derive(Default)]
struct ScriptedDevice {
    fetch_delay: Mutex<Duration>,
    fail_fetches: AtomicU32,
    fetches_started: AtomicU32,
    fetches_active: AtomicI32,
    max_concurrent: AtomicI32,
    fail_set_mode: AtomicBool,
    mode_calls: Mutex<Vec<CaptureMode>>,
}

impl ScriptedDevice {
    fn with_fetch_delay(delay: Duration) -> Self {
        let device = Self::default();
        *device.fetch_delay.lock() = delay;
        device
    }

    fn fetches_started(&self) -> u32 {
        self.fetches_started.load(Ordering::SeqCst)
    }

    fn max_concurrent(&self) -> i32 {
        self.max_concurrent.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScopeDevice for ScriptedDevice {
    async fn fetch_samples(&self) -> Result<RawFrame, GatewayError> {
        self.fetches_started.fetch_add(1, Ordering::SeqCst);
        let active = self.fetches_active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_concurrent.fetch_max(active, Ordering::SeqCst);

        let delay = *self.fetch_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        self.fetches_active.fetch_sub(1, Ordering::SeqCst);

        let mut pending = self.fail_fetches.load(Ordering::SeqCst);
        while pending > 0 {
            match self.fail_fetches.compare_exchange(
                pending,
                pending - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Err(GatewayError::transport("/data", "scripted failure")),
                Err(actual) => pending = actual,
            }
        }
        Ok(RawFrame::from_samples(vec![vec![1.0, 2.0, 3.0]; 6]))
    }

    async fn set_mode(&self, mode: CaptureMode) -> Result<(), GatewayError> {
        self.mode_calls.lock().push(mode);
        if self.fail_set_mode.load(Ordering::SeqCst) {
            return Err(GatewayError::status("/setMode", 500));
        }
        Ok(())
    }

    async fn apply_acquisition_config(
        &self,
        _settings: &AcquisitionSettings,
    ) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn apply_signal_config(&self, _settings: &SignalSettings) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn toggle_signal(&self) -> Result<bool, GatewayError> {
        Ok(true)
    }

    async fn send_single_pulse(&self) -> Result<(), GatewayError> {
        Ok(())
    }

    async fn fetch_signal_status(&self) -> Result<SignalStatus, GatewayError> {
        Ok(SignalStatus {
            enabled: false,
            waveform_type: Default::default(),
            amplitude: 0,
            frequency: 0,
            duty_cycle: 0,
        })
    }

    async fn fetch_acquisition_config(&self) -> Result<AcquisitionSettings, GatewayError> {
        Ok(AcquisitionSettings::default())
    }

    async fn fetch_signal_config(&self) -> Result<SignalSettings, GatewayError> {
        Ok(SignalSettings::default())
    }
}

#[derive(Default)]
struct CollectingRender {
    updates: Mutex<Vec<(usize, usize)>>,
}

impl RenderSink for CollectingRender {
    fn update(&self, labels: &[u32], channels: &[Vec<f64>]) {
        self.updates.lock().push((labels.len(), channels.len()));
    }
}

#[derive(Default)]
struct CollectingStatus {
    connected: Mutex<Vec<bool>>,
    signal: Mutex<Vec<(bool, String)>>,
}

impl StatusSink for CollectingStatus {
    fn set_connected(&self, connected: bool) {
        self.connected.lock().push(connected);
    }

    fn set_signal(&self, enabled: bool, label: &str) {
        self.signal.lock().push((enabled, label.to_string()));
    }
}

struct Harness {
    device: Arc<ScriptedDevice>,
    store: Arc<ConfigStore>,
    render: Arc<CollectingRender>,
    status: Arc<CollectingStatus>,
    scheduler: AcquisitionScheduler,
}

fn harness(device: ScriptedDevice) -> Harness {
    let device = Arc::new(device);
    let store = Arc::new(ConfigStore::default());
    let render = Arc::new(CollectingRender::default());
    let status = Arc::new(CollectingStatus::default());
    let scheduler = AcquisitionScheduler::new(
        Arc::clone(&device) as Arc<dyn ScopeDevice>,
        Arc::clone(&store),
        Arc::clone(&render) as Arc<dyn RenderSink>,
        Arc::clone(&status) as Arc<dyn StatusSink>,
    );
    Harness {
        device,
        store,
        render,
        status,
        scheduler,
    }
}

async fn settle() {
    for _ in 0..20 {
        tokio::task::yield_now().await;
    }
}

async fn advance(duration: Duration) {
    tokio::time::advance(duration).await;
    settle().await;
}

#[tokio::test(start_paused = true)]
async fn test_single_flight_under_tick_burst() {
    // Fetch takes three poll periods; concurrent ticks must be dropped.
    let h = harness(ScriptedDevice::with_fetch_delay(Duration::from_millis(1500)));
    h.scheduler.start();

    for _ in 0..6 {
        advance(Duration::from_millis(500)).await;
    }

    assert_eq!(h.device.max_concurrent(), 1);
    assert_eq!(h.device.fetches_started(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_explicit_capture_dropped_while_in_flight() {
    let h = harness(ScriptedDevice::with_fetch_delay(Duration::from_millis(1000)));

    assert_eq!(h.scheduler.capture_now(), CaptureOutcome::Dispatched);
    settle().await;
    assert!(h.scheduler.in_flight());
    assert_eq!(h.scheduler.capture_now(), CaptureOutcome::InFlight);

    advance(Duration::from_millis(1000)).await;
    assert_eq!(h.device.fetches_started(), 1);
    assert!(!h.scheduler.in_flight());
}

#[tokio::test(start_paused = true)]
async fn test_guard_released_after_success_and_failure() {
    let h = harness(ScriptedDevice::default());
    h.device.fail_fetches.store(1, Ordering::SeqCst);

    assert_eq!(h.scheduler.capture_now(), CaptureOutcome::Dispatched);
    settle().await;
    assert!(!h.scheduler.in_flight());
    assert_eq!(h.status.connected.lock().last(), Some(&false));

    // One failed fetch must not starve the next request.
    assert_eq!(h.scheduler.capture_now(), CaptureOutcome::Dispatched);
    settle().await;
    assert_eq!(h.device.fetches_started(), 2);
    assert_eq!(h.status.connected.lock().last(), Some(&true));
    assert!(!h.render.updates.lock().is_empty());
}

#[tokio::test(start_paused = true)]
async fn test_snapshot_mode_gates_timer_ticks() {
    let h = harness(ScriptedDevice::default());
    assert_eq!(h.scheduler.toggle_mode(), CaptureMode::Snapshot);
    h.scheduler.start();

    for _ in 0..5 {
        advance(Duration::from_millis(500)).await;
    }
    assert_eq!(h.device.fetches_started(), 0);

    // Explicit capture still fetches exactly once.
    assert_eq!(h.scheduler.capture_now(), CaptureOutcome::Dispatched);
    settle().await;
    assert_eq!(h.device.fetches_started(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_continuous_mode_fetches_every_tick() {
    let h = harness(ScriptedDevice::default());
    h.scheduler.start();

    for _ in 0..4 {
        advance(Duration::from_millis(500)).await;
    }
    assert_eq!(h.device.fetches_started(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_rearm_uses_new_cadence_without_stale_ticks() {
    let h = harness(ScriptedDevice::default());
    h.scheduler.start();

    advance(Duration::from_millis(500)).await;
    assert_eq!(h.device.fetches_started(), 1);

    // Shorten the cadence from 500ms to 200ms mid-run.
    let mut settings = h.store.acquisition();
    settings.web_update = 200;
    h.store.commit_acquisition(settings);
    h.scheduler.rearm();

    // Nothing fires before one full new period elapses.
    advance(Duration::from_millis(199)).await;
    assert_eq!(h.device.fetches_started(), 1);

    advance(Duration::from_millis(1)).await;
    assert_eq!(h.device.fetches_started(), 2);

    // The old 500ms schedule (which would fire at t=1000) is gone;
    // only the 200ms cadence ticks from here.
    advance(Duration::from_millis(400)).await;
    assert_eq!(h.device.fetches_started(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_slower_rearm_quiesces_old_period() {
    let h = harness(ScriptedDevice::default());
    h.scheduler.start();

    advance(Duration::from_millis(500)).await;
    assert_eq!(h.device.fetches_started(), 1);

    let mut settings = h.store.acquisition();
    settings.web_update = 2000;
    h.store.commit_acquisition(settings);
    h.scheduler.rearm();

    // The old 500ms cadence would have fired three more times here.
    advance(Duration::from_millis(1999)).await;
    assert_eq!(h.device.fetches_started(), 1);

    advance(Duration::from_millis(1)).await;
    assert_eq!(h.device.fetches_started(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_mode_toggle_notifies_device_best_effort() {
    let h = harness(ScriptedDevice::default());

    assert_eq!(h.scheduler.toggle_mode(), CaptureMode::Snapshot);
    settle().await;
    assert_eq!(h.device.mode_calls.lock().as_slice(), &[CaptureMode::Snapshot]);

    // A failing notification does not flip the local flag back.
    h.device.fail_set_mode.store(true, Ordering::SeqCst);
    assert_eq!(h.scheduler.toggle_mode(), CaptureMode::Continuous);
    settle().await;
    assert_eq!(h.scheduler.mode(), CaptureMode::Continuous);
    assert_eq!(h.device.mode_calls.lock().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_shutdown_stops_polling() {
    let h = harness(ScriptedDevice::default());
    h.scheduler.start();
    assert!(h.scheduler.is_running());

    advance(Duration::from_millis(500)).await;
    assert_eq!(h.device.fetches_started(), 1);

    h.scheduler.shutdown();
    assert!(!h.scheduler.is_running());
    advance(Duration::from_millis(2000)).await;
    assert_eq!(h.device.fetches_started(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_in_flight_fetch_survives_rearm() {
    // Re-arming cancels the timer, never the outstanding request.
    let h = harness(ScriptedDevice::with_fetch_delay(Duration::from_millis(300)));
    h.scheduler.start();

    advance(Duration::from_millis(500)).await;
    assert_eq!(h.device.fetches_started(), 1);
    assert!(h.scheduler.in_flight());

    let mut settings = h.store.acquisition();
    settings.web_update = 1000;
    h.store.commit_acquisition(settings);
    h.scheduler.rearm();

    // The fetch dispatched under the old cadence lands and renders.
    advance(Duration::from_millis(300)).await;
    assert!(!h.scheduler.in_flight());
    assert_eq!(h.status.connected.lock().last(), Some(&true));
    assert_eq!(h.render.updates.lock().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_render_buffer_reshape_pushes_blank_frame() {
    let h = harness(ScriptedDevice::default());

    h.scheduler.resize_buffer(32);
    let updates = h.render.updates.lock().clone();
    assert_eq!(updates.last(), Some(&(32, 6)));

    h.scheduler.clear();
    assert_eq!(h.render.updates.lock().len(), 2);
}
