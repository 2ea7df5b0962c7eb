//! Hardware drivers and peripheral helpers.

pub mod ledc;
pub mod rgb_light;
pub mod task_pin;
