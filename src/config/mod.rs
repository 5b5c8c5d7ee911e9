// src/config/mod.rs
//! Configuration management: settings records, presets, the confirmed
//! store, and the client configuration file.

pub mod constants;
pub mod loader;
pub mod presets;
pub mod settings;
pub mod store;

pub use loader::{ClientConfig, ConfigFileError, ConfigLoader};
pub use presets::{acquisition_presets, balanced, signal_presets, AcquisitionPreset, SignalPreset};
pub use settings::{AcquisitionSettings, SignalSettings, SignalStatus, WaveformType};
pub use store::ConfigStore;
