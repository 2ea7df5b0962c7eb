//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter   | Implements                   | Connects to                 |
//! |-----------|------------------------------|-----------------------------|
//! | `log_ui`  | RenderPort, AudioPort,       | `log` output (simulation)   |
//! |           | NavigationPort, SetDutyCycle |                             |
//! | `time`    | —                            | ESP32 system timer / Instant|
//!
//! The light driver port is implemented by
//! [`RgbLight`](crate::drivers::rgb_light::RgbLight) over any PWM channel.

pub mod log_ui;
pub mod time;
