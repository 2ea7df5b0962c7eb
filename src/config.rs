//! Layer configuration parameters
//!
//! All tunable parameters for the light layer. The defaults reproduce the
//! stock knob-panel behaviour: 200 ms between accepted knob steps, a 20 ms
//! render tick, and a warm 50% light on entry.

use serde::{Deserialize, Serialize};

use crate::error::LayerError;
use crate::light::{Brightness, ColorTemp};

/// Light layer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayerConfig {
    // --- Debounce ---
    /// Minimum spacing between accepted brightness steps (milliseconds)
    pub input_debounce_ms: u32,
    /// Render tick rate limit (milliseconds)
    pub render_tick_ms: u32,

    // --- Entry state ---
    /// Brightness restored on every layer entry
    pub default_brightness: u8,
    /// Colour temperature restored on every layer entry
    pub default_color_temp: ColorTemp,

    // --- Announcement worker ---
    /// Worker thread stack size (KiB)
    pub worker_stack_kb: usize,
    /// Worker task priority (FreeRTOS priority on the device)
    pub worker_priority: u8,
}

impl Default for LayerConfig {
    fn default() -> Self {
        Self {
            // Debounce
            input_debounce_ms: 200,
            render_tick_ms: 20, // 50 Hz

            // Entry state
            default_brightness: 50,
            default_color_temp: ColorTemp::Warm,

            // Worker
            worker_stack_kb: 4,
            worker_priority: 2,
        }
    }
}

impl LayerConfig {
    /// Reject values the layer cannot run with.
    pub fn validate(&self) -> Result<(), LayerError> {
        if self.input_debounce_ms == 0 {
            return Err(LayerError::Config("input_debounce_ms must be non-zero"));
        }
        if self.render_tick_ms == 0 {
            return Err(LayerError::Config("render_tick_ms must be non-zero"));
        }
        if self.render_tick_ms >= self.input_debounce_ms {
            return Err(LayerError::Config(
                "render_tick_ms must be shorter than input_debounce_ms",
            ));
        }
        if Brightness::new(self.default_brightness).is_none() {
            return Err(LayerError::Config(
                "default_brightness must be one of 0/25/50/75/100",
            ));
        }
        if self.worker_stack_kb == 0 {
            return Err(LayerError::Config("worker_stack_kb must be non-zero"));
        }
        Ok(())
    }

    /// Entry brightness as a validated level.
    ///
    /// Only call on a config that passed [`validate`](Self::validate).
    pub fn entry_brightness(&self) -> Brightness {
        Brightness::from_percent(self.default_brightness)
    }
}
