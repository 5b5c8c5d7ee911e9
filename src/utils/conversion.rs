//! Conversion utilities between device units and display units
//!
//! The generator amplitude is an 8-bit DAC code; the sampler reports
//! 12-bit ADC counts. Display voltages are derived in integer
//! centivolts so labels truncate the way the device UI specifies
//! (amplitude 128 reads 1.65V, not 1.66V).

use crate::config::constants::{generator, render};

/// Generator amplitude code to centivolts, truncated.
pub fn amplitude_to_centivolts(amplitude: u8) -> u32 {
    amplitude as u32 * 330 / generator::AMPLITUDE_MAX as u32
}

/// Generator amplitude code to volts.
pub fn amplitude_to_voltage(amplitude: u8) -> f64 {
    amplitude as f64 * generator::DAC_FULL_SCALE_VOLTS / generator::AMPLITUDE_MAX as f64
}

/// ADC counts to volts at the sampler's full-scale range.
pub fn adc_to_voltage(counts: u16) -> f64 {
    counts.min(render::ADC_MAX_COUNTS) as f64 * generator::DAC_FULL_SCALE_VOLTS
        / render::ADC_MAX_COUNTS as f64
}

/// Centivolts as a fixed two-decimal string, e.g. `330` -> `"3.30"`.
pub fn format_centivolts(centivolts: u32) -> String {
    format!("{}.{:02}", centivolts / 100, centivolts % 100)
}
