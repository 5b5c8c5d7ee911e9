// src/config/presets.rs
//! Built-in acquisition and generator presets

use crate::config::settings::{AcquisitionSettings, SignalSettings, WaveformType};

/// Named acquisition parameter set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcquisitionPreset {
    pub name: &'static str,
    pub settings: AcquisitionSettings,
}

/// Named generator parameter set. Presets do not carry a pulse width;
/// the caller's current value is kept when the preset is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignalPreset {
    pub name: &'static str,
    pub waveform_type: WaveformType,
    pub amplitude: u8,
    pub frequency: u32,
    pub duty_cycle: u8,
    pub dc_offset: u8,
}

impl SignalPreset {
    /// Preset fields over the current settings, keeping the pulse width.
    pub fn apply_to(&self, current: &SignalSettings) -> SignalSettings {
        SignalSettings {
            waveform_type: self.waveform_type,
            amplitude: self.amplitude,
            frequency: self.frequency,
            duty_cycle: self.duty_cycle,
            dc_offset: self.dc_offset,
            pulse_width_ms: current.pulse_width_ms,
        }
    }
}

/// The built-in acquisition presets, fastest first.
pub fn acquisition_presets() -> Vec<AcquisitionPreset> {
    vec![
        AcquisitionPreset {
            name: "High Speed",
            settings: AcquisitionSettings {
                num_samples: 100,
                sample_rate: 10,
                channel_delay: 1,
                capture_interval: 20,
                web_update: 200,
            },
        },
        AcquisitionPreset {
            name: "Balanced",
            settings: AcquisitionSettings {
                num_samples: 200,
                sample_rate: 100,
                channel_delay: 5,
                capture_interval: 50,
                web_update: 500,
            },
        },
        AcquisitionPreset {
            name: "High Resolution",
            settings: AcquisitionSettings {
                num_samples: 500,
                sample_rate: 1000,
                channel_delay: 10,
                capture_interval: 200,
                web_update: 1000,
            },
        },
        AcquisitionPreset {
            name: "Low Power",
            settings: AcquisitionSettings {
                num_samples: 50,
                sample_rate: 5000,
                channel_delay: 20,
                capture_interval: 1000,
                web_update: 2000,
            },
        },
    ]
}

/// The built-in generator presets.
pub fn signal_presets() -> Vec<SignalPreset> {
    vec![
        SignalPreset {
            name: "1kHz Square",
            waveform_type: WaveformType::Square,
            amplitude: 255,
            frequency: 1000,
            duty_cycle: 50,
            dc_offset: 128,
        },
        SignalPreset {
            name: "10kHz Sine",
            waveform_type: WaveformType::Sine,
            amplitude: 200,
            frequency: 10000,
            duty_cycle: 50,
            dc_offset: 128,
        },
        SignalPreset {
            name: "PWM 25%",
            waveform_type: WaveformType::Pwm,
            amplitude: 255,
            frequency: 1000,
            duty_cycle: 25,
            dc_offset: 0,
        },
        SignalPreset {
            name: "Test Signal",
            waveform_type: WaveformType::Square,
            amplitude: 128,
            frequency: 100,
            duty_cycle: 50,
            dc_offset: 64,
        },
        SignalPreset {
            name: "DC 1.65V",
            waveform_type: WaveformType::Dc,
            amplitude: 128,
            frequency: 0,
            duty_cycle: 0,
            dc_offset: 128,
        },
    ]
}

/// The "reset to defaults" target: the Balanced preset.
pub fn balanced() -> AcquisitionSettings {
    acquisition_presets()
        .into_iter()
        .find(|preset| preset.name == "Balanced")
        .map(|preset| preset.settings)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquisition_preset_values() {
        let presets = acquisition_presets();
        assert_eq!(presets.len(), 4);

        let high_speed = &presets[0];
        assert_eq!(high_speed.name, "High Speed");
        assert_eq!(high_speed.settings.sample_rate, 10);
        assert_eq!(high_speed.settings.web_update, 200);
    }

    #[test]
    fn test_balanced_is_reset_target() {
        let balanced = balanced();
        assert_eq!(balanced.num_samples, 200);
        assert_eq!(balanced.web_update, 500);
    }

    #[test]
    fn test_signal_preset_keeps_pulse_width() {
        let current = SignalSettings {
            pulse_width_ms: 250,
            ..Default::default()
        };
        let preset = &signal_presets()[2];
        assert_eq!(preset.name, "PWM 25%");

        let applied = preset.apply_to(&current);
        assert_eq!(applied.waveform_type, WaveformType::Pwm);
        assert_eq!(applied.duty_cycle, 25);
        assert_eq!(applied.dc_offset, 0);
        assert_eq!(applied.pulse_width_ms, 250);
    }
}
