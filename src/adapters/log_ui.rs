//! Log-backed port adapters.
//!
//! Implement every port by writing to the `log` facade, so the layer can
//! run on the host without the GUI toolkit, the LEDC peripheral, or the
//! audio player. The simulator binary wires these together; on the device
//! the same traits are implemented by the panel's real adapters.

use std::sync::atomic::{AtomicBool, Ordering};

use embedded_hal::pwm::{ErrorType, SetDutyCycle};
use log::info;

use crate::announce::Announcement;
use crate::app::ports::{AudioPort, NavigationPort, RenderPort, Screen};
use crate::error::{AudioError, NavigationError, RenderError};
use crate::render::{Asset, ElementId};

// ── Screen ────────────────────────────────────────────────────

/// Logs every drawing call and remembers the label text.
#[derive(Debug, Default)]
pub struct LogScreen {
    created: bool,
    label: heapless::String<8>,
}

impl LogScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Text most recently written to the brightness label.
    pub fn label(&self) -> &str {
        &self.label
    }

    fn require_screen(&self) -> Result<(), RenderError> {
        if self.created {
            Ok(())
        } else {
            Err(RenderError::NoScreen)
        }
    }
}

impl RenderPort for LogScreen {
    fn create_screen(&mut self) -> Result<(), RenderError> {
        info!("UI | create light screen");
        self.created = true;
        Ok(())
    }

    fn set_visible(&mut self, element: ElementId, visible: bool) -> Result<(), RenderError> {
        self.require_screen()?;
        if visible {
            info!("UI | show {:?}", element);
        }
        Ok(())
    }

    fn set_image(&mut self, element: ElementId, image: Asset) -> Result<(), RenderError> {
        self.require_screen()?;
        info!("UI | {:?} <- {:?}", element, image);
        Ok(())
    }

    fn set_label(&mut self, text: &str) -> Result<(), RenderError> {
        self.require_screen()?;
        self.label.clear();
        self.label
            .push_str(text)
            .map_err(|()| RenderError::CreateFailed)?;
        info!("UI | label \"{}\"", text);
        Ok(())
    }

    fn set_editing(&mut self, editing: bool) -> Result<(), RenderError> {
        info!("UI | encoder editing={}", editing);
        Ok(())
    }
}

// ── Audio ─────────────────────────────────────────────────────

/// Logs announcements instead of playing them.
#[derive(Debug, Default)]
pub struct LogAudio {
    quiet: AtomicBool,
}

impl LogAudio {
    pub fn new() -> Self {
        Self::default()
    }
}

impl AudioPort for LogAudio {
    fn play_category(&self, category: Announcement) -> Result<(), AudioError> {
        if self.quiet.load(Ordering::Acquire) {
            return Err(AudioError::Busy);
        }
        info!("AUDIO | play {:?}", category);
        Ok(())
    }

    fn force_quiet(&self, quiet: bool) -> Result<(), AudioError> {
        self.quiet.store(quiet, Ordering::Release);
        info!("AUDIO | quiet={}", quiet);
        Ok(())
    }
}

// ── Navigation ────────────────────────────────────────────────

#[derive(Debug, Default)]
pub struct LogNavigation {
    last: Option<Screen>,
}

impl LogNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<Screen> {
        self.last
    }
}

impl NavigationPort for LogNavigation {
    fn go_to(&mut self, screen: Screen) -> Result<(), NavigationError> {
        info!("NAV | go to {:?}", screen);
        self.last = Some(screen);
        Ok(())
    }
}

// ── PWM channel ───────────────────────────────────────────────

/// 8-bit PWM channel that logs its duty cycle.
#[derive(Debug)]
pub struct LogPwmChannel {
    name: &'static str,
    duty: u16,
}

impl LogPwmChannel {
    pub fn new(name: &'static str) -> Self {
        Self { name, duty: 0 }
    }

    pub fn duty(&self) -> u16 {
        self.duty
    }
}

impl ErrorType for LogPwmChannel {
    type Error = core::convert::Infallible;
}

impl SetDutyCycle for LogPwmChannel {
    fn max_duty_cycle(&self) -> u16 {
        255
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        if duty != self.duty {
            info!("PWM | {} duty={}", self.name, duty);
        }
        self.duty = duty;
        Ok(())
    }
}
