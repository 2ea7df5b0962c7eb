//! Inbound input events.
//!
//! The GUI toolkit delivers focus/key/click/long-press events on the
//! layer's screen. [`UiEvent::to_input`] folds that taxonomy into the five
//! [`InputEvent`] kinds the input gate understands.

/// Encoder keys as delivered by the GUI toolkit's input device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    /// Knob turned clockwise one detent.
    Right,
    /// Knob turned counter-clockwise one detent.
    Left,
    Up,
    Down,
    Enter,
    Esc,
}

/// Raw events from the GUI toolkit, as registered on the layer's screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    Focused,
    Key(Key),
    Clicked,
    LongPressed,
}

/// Discrete navigation events handled by the input gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    StepUp,
    StepDown,
    ToggleColor,
    Activate,
    LongPress,
}

impl UiEvent {
    /// Map a toolkit event onto the layer's input vocabulary.
    /// Keys the layer does not bind return `None`.
    pub fn to_input(self) -> Option<InputEvent> {
        match self {
            Self::Focused => Some(InputEvent::Activate),
            Self::Key(Key::Right) => Some(InputEvent::StepUp),
            Self::Key(Key::Left) => Some(InputEvent::StepDown),
            Self::Key(_) => None,
            Self::Clicked => Some(InputEvent::ToggleColor),
            Self::LongPressed => Some(InputEvent::LongPress),
        }
    }
}
