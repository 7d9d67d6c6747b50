//! LedToggle Firmware: Main Entry Point
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                Adapters (outer ring)                 │
//! │                                                      │
//! │  HardwarePeripherals          LogEventSink           │
//! │  (GPIO LED + button ISR)      (EventSink)            │
//! │                                                      │
//! │  ───────────── Port Trait Boundary ─────────────     │
//! │                                                      │
//! │  ┌────────────────────────────────────────────┐      │
//! │  │    PeripheralController (pure logic)       │      │
//! │  │    lifecycle · key → LED toggle            │      │
//! │  └────────────────────────────────────────────┘      │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! The firmware is the host: it creates and starts the controller once,
//! then polls the button forever.  There is no foreground to lose on a
//! bare board, so stop/destroy are never reached here.
#![deny(unused_must_use)]

use anyhow::Result;
use esp_idf_hal::delay::FreeRtos;
use log::info;

use ledtoggle::adapters::hardware::HardwarePeripherals;
use ledtoggle::adapters::log_sink::LogEventSink;
use ledtoggle::app::service::PeripheralController;
use ledtoggle::config::ControllerConfig;

/// Main-loop button poll period.
const POLL_INTERVAL_MS: u32 = 10;

fn main() -> Result<()> {
    // ── 1. ESP-IDF bootstrap ──────────────────────────────────
    esp_idf_svc::sys::link_patches();
    esp_idf_logger::init()?;

    info!("LedToggle v{}", env!("CARGO_PKG_VERSION"));

    // ── 2. Configuration (build-time constants) ───────────────
    let config = ControllerConfig::default();
    config.validate()?;
    info!(
        "Config: led={} button={} key={}",
        config.output_pin_name, config.input_pin_name, config.active_key_code.0
    );

    // ── 3. Adapters + controller ──────────────────────────────
    let mut hw = HardwarePeripherals::new();
    let mut log_sink = LogEventSink::new();

    let mut controller = PeripheralController::create(config, &mut hw, &mut log_sink);
    controller.start(&mut log_sink);

    info!("System ready. Entering event loop.");

    // ── 4. Event loop ─────────────────────────────────────────
    loop {
        controller.pump_input(&mut log_sink);
        FreeRtos::delay_ms(POLL_INTERVAL_MS);
    }
}
