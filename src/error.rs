//! Unified error types for the light layer.
//!
//! Every collaborator failure funnels into [`LayerError`], so the lifecycle
//! entry points report a single aggregate failure to the host. All variants
//! are `Copy` so they can be held across the shutdown sequence without
//! allocation.
//!
//! Expected rejections (debounced input, coalesced signals, a busy audio
//! subsystem) are not errors and never reach this type.

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level layer error
// ---------------------------------------------------------------------------

/// Every fallible layer operation funnels into this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerError {
    /// The GUI toolkit rejected a drawing call.
    Render(RenderError),
    /// The physical light driver could not be updated.
    Light(LightError),
    /// The audio subsystem could not be reached.
    Audio(AudioError),
    /// Screen navigation failed.
    Navigation(NavigationError),
    /// Configuration is invalid.
    Config(&'static str),
}

impl fmt::Display for LayerError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Render(e) => write!(f, "render: {e}"),
            Self::Light(e) => write!(f, "light: {e}"),
            Self::Audio(e) => write!(f, "audio: {e}"),
            Self::Navigation(e) => write!(f, "navigation: {e}"),
            Self::Config(msg) => write!(f, "config: {msg}"),
        }
    }
}

impl core::error::Error for LayerError {}

// ---------------------------------------------------------------------------
// Render errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderError {
    /// The screen or one of its widgets could not be allocated.
    CreateFailed,
    /// A widget was addressed before the screen existed.
    NoScreen,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CreateFailed => write!(f, "screen creation failed"),
            Self::NoScreen => write!(f, "screen not created"),
        }
    }
}

impl From<RenderError> for LayerError {
    fn from(e: RenderError) -> Self {
        Self::Render(e)
    }
}

// ---------------------------------------------------------------------------
// Light driver errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightError {
    /// PWM duty-cycle write failed on the given channel (0 = R, 1 = G, 2 = B).
    PwmWriteFailed(u8),
}

impl fmt::Display for LightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PwmWriteFailed(ch) => write!(f, "PWM write failed on channel {ch}"),
        }
    }
}

impl From<LightError> for LayerError {
    fn from(e: LightError) -> Self {
        Self::Light(e)
    }
}

// ---------------------------------------------------------------------------
// Audio errors
// ---------------------------------------------------------------------------

/// Audio failures. [`AudioError::Busy`] is an expected rejection: the
/// announcement is dropped, never retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioError {
    /// Another clip is playing; the request was refused.
    Busy,
    /// The audio codec or player task is not available.
    Unavailable,
}

impl fmt::Display for AudioError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Busy => write!(f, "player busy"),
            Self::Unavailable => write!(f, "player unavailable"),
        }
    }
}

impl From<AudioError> for LayerError {
    fn from(e: AudioError) -> Self {
        Self::Audio(e)
    }
}

// ---------------------------------------------------------------------------
// Navigation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationError {
    /// The target screen is not registered with the navigator.
    UnknownScreen,
}

impl fmt::Display for NavigationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownScreen => write!(f, "unknown screen"),
        }
    }
}

impl From<NavigationError> for LayerError {
    fn from(e: NavigationError) -> Self {
        Self::Navigation(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Layer-wide `Result` alias.
pub type Result<T> = core::result::Result<T, LayerError>;
