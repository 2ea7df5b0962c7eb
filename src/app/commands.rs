//! Commands produced by the input gate.
//!
//! The [`InputGate`](crate::input::InputGate) turns raw knob events into
//! these once debounce has accepted them. The
//! [`LightLayer`](super::layer::LightLayer) routes them to the state
//! machine or acts on them itself.

/// High-level commands consumed by the layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Raise brightness one step.
    StepUp,

    /// Lower brightness one step.
    StepDown,

    /// Swap warm and cool colour temperature.
    ToggleColor,

    /// The layer's screen gained encoder focus; enter editing mode.
    Activate,

    /// Leave the layer and return to the menu.
    Exit,
}
