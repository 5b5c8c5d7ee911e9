// src/config/constants.rs
//! System-wide configuration constants

/// Render surface constants
pub mod render {
    /// Channel count of the rendering surface. Fixed by the chart widget,
    /// never by device-reported data.
    pub const RENDER_CHANNEL_COUNT: usize = 6;

    pub const ADC_MAX_COUNTS: u16 = 4095;
}

/// Capture and polling cadence constants
pub mod capture {
    pub const DEFAULT_NUM_SAMPLES: u32 = 100;
    pub const DEFAULT_SAMPLE_RATE_US: u32 = 100;
    pub const DEFAULT_CHANNEL_DELAY_US: u32 = 5;
    pub const DEFAULT_CAPTURE_INTERVAL_MS: u32 = 50;
    pub const DEFAULT_WEB_UPDATE_MS: u32 = 500;

    pub const MAX_NUM_SAMPLES: u32 = 4096;
    pub const MIN_WEB_UPDATE_MS: u32 = 10;
}

/// Signal generator constants
pub mod generator {
    /// DAC full-scale output in volts; amplitude 255 maps to this.
    pub const DAC_FULL_SCALE_VOLTS: f64 = 3.3;
    pub const AMPLITUDE_MAX: u8 = 255;
    pub const DUTY_CYCLE_MAX: u8 = 100;

    pub const DEFAULT_AMPLITUDE: u8 = 128;
    pub const DEFAULT_FREQUENCY_HZ: u32 = 1000;
    pub const DEFAULT_DUTY_CYCLE: u8 = 50;
    pub const DEFAULT_DC_OFFSET: u8 = 128;
    pub const DEFAULT_PULSE_WIDTH_MS: u32 = 100;

    /// Delay before refreshing generator status after a single pulse.
    pub const POST_PULSE_STATUS_DELAY_MS: u64 = 100;
}

/// Wire protocol constants
pub mod wire {
    pub const DEFAULT_BASE_URL: &str = "http://192.168.4.1";
    pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 5000;

    pub const EP_DATA: &str = "/data";
    pub const EP_SET_MODE: &str = "/setMode";
    pub const EP_SET_CONFIG: &str = "/setConfig";
    pub const EP_GET_CONFIG: &str = "/getConfig";
    pub const EP_SET_SIGNAL_CONFIG: &str = "/setSignalConfig";
    pub const EP_GET_SIGNAL_CONFIG: &str = "/getSignalConfig";
    pub const EP_TOGGLE_SIGNAL: &str = "/toggleSignal";
    pub const EP_SINGLE_PULSE: &str = "/singlePulse";
    pub const EP_GET_SIGNAL_STATUS: &str = "/getSignalStatus";
}
