//! Application core — the light layer and its port boundary.
//!
//! The layer ties the pure domain modules ([`crate::input`],
//! [`crate::light`], [`crate::render`], [`crate::announce`]) to the
//! outside world through the **port traits** defined in [`ports`].

pub mod commands;
pub mod events;
pub mod layer;
pub mod ports;
