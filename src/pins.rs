//! GPIO / peripheral pin assignments for the knob panel's light output.
//!
//! Single source of truth for the RGB channel wiring. Change a pin here
//! and the LEDC setup follows.

// ---------------------------------------------------------------------------
// Light output (discrete R/G/B MOSFET stages)
// ---------------------------------------------------------------------------

pub const LIGHT_R_GPIO: i32 = 38;
pub const LIGHT_G_GPIO: i32 = 39;
pub const LIGHT_B_GPIO: i32 = 40;

// ---------------------------------------------------------------------------
// PWM configuration
// ---------------------------------------------------------------------------

/// LEDC timer resolution (bits). 8-bit gives 0 – 255 duty levels.
pub const PWM_RESOLUTION_BITS: u32 = 8;
/// LEDC frequency for the light channels (5 kHz, flicker-free on camera).
pub const LIGHT_PWM_FREQ_HZ: u32 = 5_000;

/// LEDC channel numbers, in R, G, B order.
pub const LEDC_CH_LIGHT: [u32; 3] = [0, 1, 2];
