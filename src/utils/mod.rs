//! Common utility functions
//!
//! Conversion helpers between device units (ADC counts, DAC amplitude
//! codes) and display units. All conversions use constants from the
//! config module.

pub mod conversion;

pub use conversion::{
    adc_to_voltage,
    amplitude_to_centivolts,
    amplitude_to_voltage,
    format_centivolts,
};
