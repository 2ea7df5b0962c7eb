//! Port traits — the hexagonal boundary between the light layer and the
//! rest of the panel firmware.
//!
//! ```text
//!   LightLayer ──▶ Port trait ──▶ Adapter (GUI toolkit, LEDC, audio, nav)
//! ```
//!
//! The layer is generic over these traits, so the domain core never touches
//! the GUI toolkit, the PWM peripheral, or the audio player directly.
//!
//! ## Threading
//!
//! [`RenderPort`], [`LightDriverPort`], and [`NavigationPort`] are only
//! called from the UI context. [`AudioPort`] is also called from the
//! announcement worker, so it takes `&self` and implementations must be
//! internally synchronised (the audio player owns its own queue).

use crate::announce::Announcement;
use crate::error::{AudioError, LightError, NavigationError, RenderError};
use crate::render::{Asset, ElementId};

// ───────────────────────────────────────────────────────────────
// Render port (domain → GUI toolkit)
// ───────────────────────────────────────────────────────────────

/// Drawing capability of the GUI toolkit, scoped to the light screen.
pub trait RenderPort {
    /// Build the light screen and its widgets. Called on first entry only;
    /// the widgets are reused on later entries.
    fn create_screen(&mut self) -> Result<(), RenderError>;

    /// Show or hide a widget.
    fn set_visible(&mut self, element: ElementId, visible: bool) -> Result<(), RenderError>;

    /// Point an image widget at an asset.
    fn set_image(&mut self, element: ElementId, image: Asset) -> Result<(), RenderError>;

    /// Replace the brightness label text.
    fn set_label(&mut self, text: &str) -> Result<(), RenderError>;

    /// Put the encoder group into (or out of) editing mode so knob rotation
    /// reaches the screen instead of moving focus.
    fn set_editing(&mut self, editing: bool) -> Result<(), RenderError>;
}

// ───────────────────────────────────────────────────────────────
// Light driver port (domain → board support)
// ───────────────────────────────────────────────────────────────

/// Physical RGB light output.
pub trait LightDriverPort {
    /// Set the three channel intensities (0–255 each).
    fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LightError>;

    /// Turn the light fully off.
    fn off(&mut self) -> Result<(), LightError> {
        self.set_rgb(0, 0, 0)
    }
}

// ───────────────────────────────────────────────────────────────
// Audio port (domain → audio player)
// ───────────────────────────────────────────────────────────────

/// Voice announcement playback.
pub trait AudioPort {
    /// Queue the clip for `category`. Returns [`AudioError::Busy`] if the
    /// player refuses the request.
    fn play_category(&self, category: Announcement) -> Result<(), AudioError>;

    /// Mute (and cut off) playback while `quiet` is true.
    fn force_quiet(&self, quiet: bool) -> Result<(), AudioError>;
}

// ───────────────────────────────────────────────────────────────
// Navigation port (domain → layer manager)
// ───────────────────────────────────────────────────────────────

/// Screens the light layer can hand control to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    /// The main knob menu.
    Menu,
}

/// Switches the active layer.
pub trait NavigationPort {
    fn go_to(&mut self, screen: Screen) -> Result<(), NavigationError>;
}
