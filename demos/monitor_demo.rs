// demos/monitor_demo.rs
//! Headless monitor demo: drives the full client stack against the
//! built-in simulator and prints what a UI would render.

use parking_lot::Mutex;
use scope_link::config::{acquisition_presets, signal_presets, ConfigLoader};
use scope_link::device::{SimulatedDevice, SimulatorConfig};
use scope_link::sinks::{RenderSink, StatusSink};
use scope_link::ScopeClient;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

struct ConsoleRender;

impl RenderSink for ConsoleRender {
    fn update(&self, labels: &[u32], channels: &[Vec<f64>]) {
        let preview: Vec<String> = channels
            .iter()
            .enumerate()
            .map(|(index, samples)| {
                format!("CH{}={:.0}", index + 1, samples.first().copied().unwrap_or(0.0))
            })
            .collect();
        println!(
            "frame: {} samples x {} channels [{}]",
            labels.len(),
            channels.len(),
            preview.join(" ")
        );
    }
}

#[derive(Default)]
struct ConsoleStatus {
    last_label: Mutex<String>,
}

impl StatusSink for ConsoleStatus {
    fn set_connected(&self, connected: bool) {
        println!("link: {}", if connected { "Connected" } else { "Disconnected" });
    }

    fn set_signal(&self, enabled: bool, label: &str) {
        let mut last = self.last_label.lock();
        if *last != label {
            println!("generator: {} ({})", label, if enabled { "ON" } else { "OFF" });
            *last = label.to_string();
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("Scope-Link Monitor Demo");
    println!("=======================");

    let config = ConfigLoader::new().load()?;
    println!("device base URL (unused by the simulator): {}", config.base_url);

    let device = Arc::new(SimulatedDevice::new(SimulatorConfig {
        noise_level: 0.02,
        ..Default::default()
    }));
    let client = ScopeClient::new(
        Arc::clone(&device) as Arc<dyn scope_link::ScopeDevice>,
        Arc::new(ConsoleRender),
        Arc::new(ConsoleStatus::default()),
    );

    println!("\nSeeding settings from the device...");
    client.refresh_from_device().await?;

    println!("Applying the High Speed acquisition preset...");
    let preset = acquisition_presets().remove(0);
    client.apply_acquisition(preset.settings).await?;

    println!("Starting the generator with the 10kHz Sine preset...");
    client.toggle_signal().await?;
    let sine = signal_presets().remove(1);
    client
        .apply_signal(sine.apply_to(&client.store().signal()))
        .await?;

    println!("\nPolling for two seconds...\n");
    client.start();
    sleep(Duration::from_secs(2)).await;

    println!("\nSwitching to snapshot mode, one manual capture...");
    client.toggle_mode();
    sleep(Duration::from_millis(300)).await;
    client.capture_now();
    sleep(Duration::from_millis(300)).await;

    client.send_single_pulse().await?;
    sleep(Duration::from_millis(300)).await;

    client.shutdown();
    println!("\nDone: {} frames served by the simulator", device.frames_served());
    Ok(())
}
