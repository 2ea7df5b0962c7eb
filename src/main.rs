//! Light layer simulator — main entry point.
//!
//! Drives one scripted visit to the light screen through the same
//! [`LightLayer`] the panel firmware uses.
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────┐
//! │                      Adapters (outer ring)                     │
//! │                                                                │
//! │  LogScreen     RgbLight<PWM>    LogAudio     LogNavigation     │
//! │  (RenderPort)  (LightDriver)    (AudioPort)  (NavigationPort)  │
//! │                                                                │
//! │  ──────────────── Port Trait Boundary ───────────────────      │
//! │                                                                │
//! │  ┌────────────────────────────────────────────────────────┐    │
//! │  │              LightLayer (pure logic)                   │    │
//! │  │  InputGate · LightMachine · Renderer · Announcer       │    │
//! │  └────────────────────────────────────────────────────────┘    │
//! │                                                                │
//! │  MonotonicClock (tick + debounce timestamps)                   │
//! └────────────────────────────────────────────────────────────────┘
//! ```
#![deny(unused_must_use)]

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use log::{info, warn};

use knob_light::adapters::log_ui::{LogAudio, LogNavigation, LogScreen};
use knob_light::adapters::time::MonotonicClock;
use knob_light::app::events::{Key, UiEvent};
use knob_light::app::layer::{InputOutcome, LightLayer};
use knob_light::app::ports::LightDriverPort;
use knob_light::config::LayerConfig;
use knob_light::drivers::rgb_light::RgbLight;

/// Scripted session: wait `ms`, then deliver the event.
const SCRIPT: &[(u64, UiEvent)] = &[
    (100, UiEvent::Focused),
    (300, UiEvent::Key(Key::Right)),
    // Inside the debounce window: dropped.
    (50, UiEvent::Key(Key::Right)),
    (300, UiEvent::Key(Key::Right)),
    // Already at 100 %: accepted but no change.
    (300, UiEvent::Key(Key::Right)),
    (300, UiEvent::Clicked),
    (300, UiEvent::Key(Key::Left)),
    (300, UiEvent::Key(Key::Esc)),
    (300, UiEvent::LongPressed),
];

// ── Light output ──────────────────────────────────────────────

#[cfg(target_os = "espidf")]
fn build_light() -> Result<impl LightDriverPort> {
    let [r, g, b] = knob_light::drivers::ledc::init_light_pwm()?;
    Ok(RgbLight::new(r, g, b))
}

#[cfg(not(target_os = "espidf"))]
fn build_light() -> Result<impl LightDriverPort> {
    use knob_light::adapters::log_ui::LogPwmChannel;
    Ok(RgbLight::new(
        LogPwmChannel::new("R"),
        LogPwmChannel::new("G"),
        LogPwmChannel::new("B"),
    ))
}

// ── Main ──────────────────────────────────────────────────────

fn init_logging() -> Result<()> {
    #[cfg(target_os = "espidf")]
    {
        esp_idf_svc::sys::link_patches();
        esp_idf_logger::init()?;
    }
    #[cfg(not(target_os = "espidf"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    Ok(())
}

fn main() -> Result<()> {
    // ── 1. Bootstrap ──────────────────────────────────────────
    init_logging()?;

    info!("╔══════════════════════════════════════╗");
    info!("║  Light layer sim v{}               ║", env!("CARGO_PKG_VERSION"));
    info!("╚══════════════════════════════════════╝");

    // ── 2. Construct adapters ─────────────────────────────────
    let config = LayerConfig::default();
    let clock = MonotonicClock::new();
    let light = build_light().context("light output init")?;
    let audio = Arc::new(LogAudio::new());

    let mut layer = LightLayer::new(config, LogScreen::new(), light, audio, LogNavigation::new())
        .context("invalid layer config")?;
    let tick = Duration::from_millis(u64::from(layer.config().render_tick_ms));

    // ── 3. Scripted visit ─────────────────────────────────────
    layer.on_enter(clock.now_ms()).context("enter light layer")?;

    for &(after_ms, event) in SCRIPT {
        // Keep ticking while waiting so redraws land between inputs.
        let mut waited = Duration::ZERO;
        let target = Duration::from_millis(after_ms);
        while waited < target {
            std::thread::sleep(tick);
            waited += tick;
            layer.tick(clock.now_ms())?;
        }

        let Some(input) = event.to_input() else {
            info!("sim: {:?} not handled by the light layer", event);
            continue;
        };
        match layer.handle_input(input, clock.now_ms()) {
            Ok(InputOutcome::Exit) => {
                info!("sim: navigation left the light screen");
                break;
            }
            Ok(outcome) => info!("sim: {:?} -> {:?}", input, outcome),
            Err(e) => warn!("sim: {:?} failed: {}", input, e),
        }
    }

    // Let the worker finish the last announcement before tearing down.
    std::thread::sleep(Duration::from_millis(100));
    layer.on_exit().context("exit light layer")?;

    info!("sim: label on exit was \"{}\"", layer.ui().label());
    Ok(())
}
