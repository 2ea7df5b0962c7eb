//! Light state machine.
//!
//! ```text
//!   Command ──▶ LightMachine::apply ──▶ StateChange
//!                     │
//!                     ├──▶ LightState (canonical, single writer)
//!                     └──▶ SharedBrightness (worker-readable mirror)
//! ```
//!
//! The machine is the only writer of canonical state. It reports whether a
//! command actually moved the state; callers use that to decide whether
//! the announcement worker needs to hear about it. Rendering does its own
//! change detection against a shadow copy (see [`crate::render`]).

mod state;

pub use state::{Brightness, ColorTemp, LightState, Rgb, SharedBrightness};

use log::debug;

use crate::app::commands::Command;

// ---------------------------------------------------------------------------
// StateChange
// ---------------------------------------------------------------------------

/// Which fields a command moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StateChange {
    pub brightness: bool,
    pub color_temp: bool,
}

impl StateChange {
    pub const NONE: Self = Self {
        brightness: false,
        color_temp: false,
    };

    /// True if anything changed.
    pub const fn any(self) -> bool {
        self.brightness || self.color_temp
    }
}

// ---------------------------------------------------------------------------
// LightMachine
// ---------------------------------------------------------------------------

pub struct LightMachine {
    state: LightState,
    published: SharedBrightness,
}

impl LightMachine {
    /// Start from `initial` and publish its brightness.
    pub fn new(initial: LightState, published: SharedBrightness) -> Self {
        published.store(initial.brightness);
        Self {
            state: initial,
            published,
        }
    }

    /// Apply one accepted command.
    ///
    /// `Activate` and `Exit` never touch the light; they are handled by the
    /// layer and report [`StateChange::NONE`] here.
    pub fn apply(&mut self, cmd: Command) -> StateChange {
        let before = self.state;
        match cmd {
            Command::StepUp => self.state.brightness = before.brightness.step_up(),
            Command::StepDown => self.state.brightness = before.brightness.step_down(),
            Command::ToggleColor => self.state.color_temp = before.color_temp.toggled(),
            Command::Activate | Command::Exit => return StateChange::NONE,
        }

        let change = StateChange {
            brightness: before.brightness != self.state.brightness,
            color_temp: before.color_temp != self.state.color_temp,
        };
        if change.brightness {
            self.published.store(self.state.brightness);
        }
        if change.any() {
            debug!(
                "light: {:?} -> {} {:?}",
                cmd, self.state.brightness, self.state.color_temp
            );
        }
        change
    }

    /// Current canonical state.
    pub fn state(&self) -> LightState {
        self.state
    }
}
