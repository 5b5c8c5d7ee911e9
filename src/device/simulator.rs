//! In-process device simulator
//!
//! Implements [`ScopeDevice`] without a network: frames are synthesized
//! from the settings the caller has applied, so the scheduler, client,
//! and demo can run against realistic multi-channel data. Supports
//! injected failures for exercising error paths in tests.

use crate::config::constants::render;
use crate::config::settings::{AcquisitionSettings, SignalSettings, SignalStatus, WaveformType};
use crate::device::traits::ScopeDevice;
use crate::device::types::{CaptureMode, GatewayError, RawFrame};
use async_trait::async_trait;
use parking_lot::RwLock;
use rand::Rng;
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};

/// Simulator tuning knobs.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    pub channel_count: usize,
    /// Uniform noise as a fraction of ADC full scale; 0 for
    /// deterministic output.
    pub noise_level: f64,
    pub signal_enabled_at_start: bool,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            channel_count: render::RENDER_CHANNEL_COUNT,
            noise_level: 0.01,
            signal_enabled_at_start: false,
        }
    }
}

/// Simulated acquisition device with a synthesized signal generator.
pub struct SimulatedDevice {
    config: SimulatorConfig,
    acquisition: RwLock<AcquisitionSettings>,
    signal: RwLock<SignalSettings>,
    mode: RwLock<CaptureMode>,
    enabled: AtomicBool,
    frames_served: AtomicU64,
    pulses_fired: AtomicU64,
    failures_pending: AtomicU32,
}

impl SimulatedDevice {
    pub fn new(config: SimulatorConfig) -> Self {
        let enabled = config.signal_enabled_at_start;
        Self {
            config,
            acquisition: RwLock::new(AcquisitionSettings::default()),
            signal: RwLock::new(SignalSettings::default()),
            mode: RwLock::new(CaptureMode::Continuous),
            enabled: AtomicBool::new(enabled),
            frames_served: AtomicU64::new(0),
            pulses_fired: AtomicU64::new(0),
            failures_pending: AtomicU32::new(0),
        }
    }

    pub fn with_defaults() -> Self {
        Self::new(SimulatorConfig::default())
    }

    /// Make the next `count` device operations fail with a transport
    /// error.
    pub fn inject_failures(&self, count: u32) {
        self.failures_pending.store(count, Ordering::SeqCst);
    }

    pub fn frames_served(&self) -> u64 {
        self.frames_served.load(Ordering::Relaxed)
    }

    pub fn pulses_fired(&self) -> u64 {
        self.pulses_fired.load(Ordering::Relaxed)
    }

    /// Device-side mode as last hinted via `set_mode`.
    pub fn device_mode(&self) -> CaptureMode {
        *self.mode.read()
    }

    fn take_injected_failure(&self, endpoint: &'static str) -> Result<(), GatewayError> {
        let mut pending = self.failures_pending.load(Ordering::SeqCst);
        while pending > 0 {
            match self.failures_pending.compare_exchange(
                pending,
                pending - 1,
                Ordering::SeqCst,
                Ordering::SeqCst,
            ) {
                Ok(_) => return Err(GatewayError::transport(endpoint, "injected failure")),
                Err(actual) => pending = actual,
            }
        }
        Ok(())
    }

    fn synthesize_frame(&self) -> RawFrame {
        let acquisition = self.acquisition.read().clone();
        let signal = self.signal.read().clone();
        let enabled = self.enabled.load(Ordering::Relaxed);
        let frame_index = self.frames_served.fetch_add(1, Ordering::Relaxed);

        let num_samples = acquisition.num_samples.max(1) as usize;
        let sample_period_s = acquisition.sample_rate.max(1) as f64 * 1e-6;
        let channel_skew_s = acquisition.channel_delay as f64 * 1e-6;
        let frame_origin_s = frame_index as f64 * num_samples as f64 * sample_period_s;

        let mut rng = rand::thread_rng();
        let half_scale = render::ADC_MAX_COUNTS as f64 / 2.0;

        let channels = (0..self.config.channel_count)
            .map(|channel| {
                (0..num_samples)
                    .map(|sample| {
                        let t = frame_origin_s
                            + sample as f64 * sample_period_s
                            + channel as f64 * channel_skew_s;
                        let clean = if enabled {
                            waveform_counts(&signal, t)
                        } else {
                            0.0
                        };
                        let noise = if self.config.noise_level > 0.0 {
                            rng.gen_range(-1.0..=1.0) * self.config.noise_level * half_scale
                        } else {
                            0.0
                        };
                        (clean + noise).clamp(0.0, render::ADC_MAX_COUNTS as f64)
                    })
                    .collect::<Vec<f64>>()
            })
            .collect();

        RawFrame::from_samples(channels)
    }
}

/// Ideal generator output at time `t`, in ADC counts.
fn waveform_counts(signal: &SignalSettings, t: f64) -> f64 {
    let full_scale = render::ADC_MAX_COUNTS as f64;
    let center = signal.dc_offset as f64 / 255.0 * full_scale;
    let swing = signal.amplitude as f64 / 255.0 * full_scale / 2.0;
    let phase = (signal.frequency as f64 * t).fract();

    let counts = match signal.waveform_type {
        WaveformType::Dc => signal.amplitude as f64 / 255.0 * full_scale,
        WaveformType::Square => {
            if phase < 0.5 {
                center + swing
            } else {
                center - swing
            }
        }
        WaveformType::Sine => center + swing * (phase * std::f64::consts::TAU).sin(),
        WaveformType::Triangle => {
            // 0 -> 1 -> 0 over one period
            let ramp = if phase < 0.5 { phase * 2.0 } else { 2.0 - phase * 2.0 };
            center - swing + ramp * swing * 2.0
        }
        WaveformType::Pwm => {
            if phase * 100.0 < signal.duty_cycle as f64 {
                center + swing
            } else {
                center - swing
            }
        }
    };
    counts.clamp(0.0, full_scale)
}

#[async_trait]
impl ScopeDevice for SimulatedDevice {
    async fn fetch_samples(&self) -> Result<RawFrame, GatewayError> {
        self.take_injected_failure("/data")?;
        Ok(self.synthesize_frame())
    }

    async fn set_mode(&self, mode: CaptureMode) -> Result<(), GatewayError> {
        self.take_injected_failure("/setMode")?;
        *self.mode.write() = mode;
        Ok(())
    }

    async fn apply_acquisition_config(
        &self,
        settings: &AcquisitionSettings,
    ) -> Result<(), GatewayError> {
        self.take_injected_failure("/setConfig")?;
        *self.acquisition.write() = settings.clone();
        Ok(())
    }

    async fn apply_signal_config(&self, settings: &SignalSettings) -> Result<(), GatewayError> {
        self.take_injected_failure("/setSignalConfig")?;
        *self.signal.write() = settings.clone();
        Ok(())
    }

    async fn toggle_signal(&self) -> Result<bool, GatewayError> {
        self.take_injected_failure("/toggleSignal")?;
        Ok(!self.enabled.fetch_xor(true, Ordering::SeqCst))
    }

    async fn send_single_pulse(&self) -> Result<(), GatewayError> {
        self.take_injected_failure("/singlePulse")?;
        self.pulses_fired.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    async fn fetch_signal_status(&self) -> Result<SignalStatus, GatewayError> {
        self.take_injected_failure("/getSignalStatus")?;
        let signal = self.signal.read().clone();
        Ok(SignalStatus {
            enabled: self.enabled.load(Ordering::Relaxed),
            waveform_type: signal.waveform_type,
            amplitude: signal.amplitude,
            frequency: signal.frequency,
            duty_cycle: signal.duty_cycle,
        })
    }

    async fn fetch_acquisition_config(&self) -> Result<AcquisitionSettings, GatewayError> {
        self.take_injected_failure("/getConfig")?;
        Ok(self.acquisition.read().clone())
    }

    async fn fetch_signal_config(&self) -> Result<SignalSettings, GatewayError> {
        self.take_injected_failure("/getSignalConfig")?;
        Ok(self.signal.read().clone())
    }
}
