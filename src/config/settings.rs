// src/config/settings.rs
//! Acquisition and signal-generator settings records
//!
//! Both records travel the wire as camelCase JSON and are replaced
//! wholesale on every confirmed apply; nothing in the client patches
//! individual fields. Out-of-range values are reported, not rejected:
//! the device is authoritative.

use crate::config::constants::{capture, generator};
use crate::utils::conversion::{amplitude_to_centivolts, format_centivolts};
use serde::{Deserialize, Serialize};

/// Device sampling cadence and client poll cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AcquisitionSettings {
    #[serde(default = "defaults::num_samples")]
    pub num_samples: u32,

    /// Microseconds between consecutive samples on the device.
    #[serde(default = "defaults::sample_rate")]
    pub sample_rate: u32,

    #[serde(default = "defaults::channel_delay")]
    pub channel_delay: u32,

    /// Device-side capture loop period in milliseconds.
    #[serde(default = "defaults::capture_interval")]
    pub capture_interval: u32,

    /// Client poll period in milliseconds; owns both the sample and the
    /// status polling cadence.
    #[serde(default = "defaults::web_update")]
    pub web_update: u32,
}

/// Signal-generator waveform parameters. Independent lifecycle from
/// [`AcquisitionSettings`]: separate endpoint, separate apply cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalSettings {
    #[serde(default)]
    pub waveform_type: WaveformType,

    #[serde(default = "defaults::amplitude")]
    pub amplitude: u8,

    #[serde(default = "defaults::frequency")]
    pub frequency: u32,

    #[serde(default = "defaults::duty_cycle")]
    pub duty_cycle: u8,

    #[serde(default = "defaults::dc_offset")]
    pub dc_offset: u8,

    #[serde(default = "defaults::pulse_width_ms")]
    pub pulse_width_ms: u32,
}

/// Generator waveform selector; integer discriminants on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum WaveformType {
    Dc = 0,
    Square = 1,
    Sine = 2,
    Triangle = 3,
    Pwm = 4,
}

/// Device-reported generator state. A snapshot: superseded wholesale on
/// each poll, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignalStatus {
    pub enabled: bool,

    #[serde(default)]
    pub waveform_type: WaveformType,

    #[serde(default)]
    pub amplitude: u8,

    #[serde(default)]
    pub frequency: u32,

    #[serde(default)]
    pub duty_cycle: u8,
}

mod defaults {
    use crate::config::constants::{capture, generator};

    pub fn num_samples() -> u32 { capture::DEFAULT_NUM_SAMPLES }
    pub fn sample_rate() -> u32 { capture::DEFAULT_SAMPLE_RATE_US }
    pub fn channel_delay() -> u32 { capture::DEFAULT_CHANNEL_DELAY_US }
    pub fn capture_interval() -> u32 { capture::DEFAULT_CAPTURE_INTERVAL_MS }
    pub fn web_update() -> u32 { capture::DEFAULT_WEB_UPDATE_MS }

    pub fn amplitude() -> u8 { generator::DEFAULT_AMPLITUDE }
    pub fn frequency() -> u32 { generator::DEFAULT_FREQUENCY_HZ }
    pub fn duty_cycle() -> u8 { generator::DEFAULT_DUTY_CYCLE }
    pub fn dc_offset() -> u8 { generator::DEFAULT_DC_OFFSET }
    pub fn pulse_width_ms() -> u32 { generator::DEFAULT_PULSE_WIDTH_MS }
}

impl Default for AcquisitionSettings {
    fn default() -> Self {
        Self {
            num_samples: defaults::num_samples(),
            sample_rate: defaults::sample_rate(),
            channel_delay: defaults::channel_delay(),
            capture_interval: defaults::capture_interval(),
            web_update: defaults::web_update(),
        }
    }
}

impl Default for SignalSettings {
    fn default() -> Self {
        Self {
            waveform_type: WaveformType::default(),
            amplitude: defaults::amplitude(),
            frequency: defaults::frequency(),
            duty_cycle: defaults::duty_cycle(),
            dc_offset: defaults::dc_offset(),
            pulse_width_ms: defaults::pulse_width_ms(),
        }
    }
}

impl Default for WaveformType {
    fn default() -> Self {
        WaveformType::Dc
    }
}

impl From<WaveformType> for u8 {
    fn from(waveform: WaveformType) -> u8 {
        waveform as u8
    }
}

impl TryFrom<u8> for WaveformType {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(WaveformType::Dc),
            1 => Ok(WaveformType::Square),
            2 => Ok(WaveformType::Sine),
            3 => Ok(WaveformType::Triangle),
            4 => Ok(WaveformType::Pwm),
            other => Err(format!("unknown waveform type {}", other)),
        }
    }
}

impl WaveformType {
    /// Human label used in status displays.
    pub fn name(&self) -> &'static str {
        match self {
            WaveformType::Dc => "DC",
            WaveformType::Square => "Square",
            WaveformType::Sine => "Sine",
            WaveformType::Triangle => "Triangle",
            WaveformType::Pwm => "PWM",
        }
    }
}

impl AcquisitionSettings {
    /// Range findings reported to the log on commit. The settings are
    /// passed through regardless; the device decides what it accepts.
    pub fn range_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.num_samples == 0 {
            warnings.push("numSamples must be greater than 0".to_string());
        }
        if self.num_samples > capture::MAX_NUM_SAMPLES {
            warnings.push(format!(
                "numSamples {} exceeds the device buffer limit {}",
                self.num_samples,
                capture::MAX_NUM_SAMPLES
            ));
        }
        if self.sample_rate == 0 {
            warnings.push("sampleRate must be greater than 0".to_string());
        }
        if self.capture_interval == 0 {
            warnings.push("captureInterval must be greater than 0".to_string());
        }
        if self.web_update < capture::MIN_WEB_UPDATE_MS {
            warnings.push(format!(
                "webUpdate {}ms is below the supported minimum {}ms",
                self.web_update,
                capture::MIN_WEB_UPDATE_MS
            ));
        }
        warnings
    }
}

impl SignalSettings {
    pub fn range_warnings(&self) -> Vec<String> {
        let mut warnings = Vec::new();
        if self.duty_cycle > generator::DUTY_CYCLE_MAX {
            warnings.push(format!(
                "dutyCycle {}% exceeds {}%",
                self.duty_cycle,
                generator::DUTY_CYCLE_MAX
            ));
        }
        warnings
    }
}

impl SignalStatus {
    /// Generator output voltage implied by the amplitude setting.
    pub fn voltage(&self) -> f64 {
        amplitude_to_centivolts(self.amplitude) as f64 / 100.0
    }

    /// Human status label: `"No Signal"` when disabled, otherwise the
    /// waveform summary (`"DC 1.65V"`, `"PWM 1000Hz 25% (3.30V)"`,
    /// `"Sine 10000Hz (2.58V)"`).
    pub fn label(&self) -> String {
        if !self.enabled {
            return "No Signal".to_string();
        }
        let volts = format_centivolts(amplitude_to_centivolts(self.amplitude));
        match self.waveform_type {
            WaveformType::Dc => format!("DC {}V", volts),
            WaveformType::Pwm => format!(
                "PWM {}Hz {}% ({}V)",
                self.frequency, self.duty_cycle, volts
            ),
            other => format!("{} {}Hz ({}V)", other.name(), self.frequency, volts),
        }
    }
}
