//! Debounce and input gate.
//!
//! A detented knob can deliver several key events per physical click. The
//! gate lets brightness steps through at most once per input window and
//! drops the rest silently; colour toggles, focus, and long presses are
//! never rate-limited.
//!
//! | Window | Default | Gates                         |
//! |--------|---------|-------------------------------|
//! | input  | 200 ms  | `StepUp` / `StepDown`         |
//! | tick   | 20 ms   | render passes ([`InputGate::tick_due`]) |
//!
//! Timestamps are milliseconds since boot truncated to `u32`; deadlines
//! compare with wrapping arithmetic so the 49-day rollover is harmless.

use log::trace;

use crate::app::commands::Command;
use crate::app::events::InputEvent;

// ---------------------------------------------------------------------------
// Deadline
// ---------------------------------------------------------------------------

/// A re-arming deadline: closed for `period_ms` after it was consumed,
/// open otherwise.
///
/// Elapsed time is measured as an unsigned wrapping difference from the
/// last consumption, so a deadline stays open across any idle gap shorter
/// than the `u32` rollover. [`disarm_if_elapsed`](Self::disarm_if_elapsed)
/// forgets an elapsed consumption so a longer gap cannot close it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Deadline {
    period_ms: u32,
    /// When the deadline was last consumed; `None` while open.
    armed_at: Option<u32>,
}

impl Deadline {
    /// A deadline that is open until first consumed.
    pub const fn open(period_ms: u32) -> Self {
        Self {
            period_ms,
            armed_at: None,
        }
    }

    /// True if `period_ms` has passed since the last consumption.
    pub fn is_open(&self, now_ms: u32) -> bool {
        match self.armed_at {
            None => true,
            Some(at) => now_ms.wrapping_sub(at) >= self.period_ms,
        }
    }

    /// Consume the deadline if it is open and re-arm it from `now_ms`.
    pub fn try_consume(&mut self, now_ms: u32) -> bool {
        if !self.is_open(now_ms) {
            return false;
        }
        self.armed_at = Some(now_ms);
        true
    }

    /// Drop the arming once the period has passed.
    pub fn disarm_if_elapsed(&mut self, now_ms: u32) {
        if self.armed_at.is_some() && self.is_open(now_ms) {
            self.armed_at = None;
        }
    }
}

// ---------------------------------------------------------------------------
// DebounceWindow
// ---------------------------------------------------------------------------

/// The pair of deadlines owned by one layer session.
#[derive(Debug, Clone, Copy)]
pub struct DebounceWindow {
    pub tick: Deadline,
    pub input: Deadline,
}

impl DebounceWindow {
    /// Both deadlines start open.
    pub const fn new(tick_ms: u32, input_ms: u32) -> Self {
        Self {
            tick: Deadline::open(tick_ms),
            input: Deadline::open(input_ms),
        }
    }
}

// ---------------------------------------------------------------------------
// InputGate
// ---------------------------------------------------------------------------

pub struct InputGate {
    window: DebounceWindow,
}

impl InputGate {
    pub fn new(window: DebounceWindow) -> Self {
        Self { window }
    }

    /// Turn an input event into a command, or drop it.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u32) -> Option<Command> {
        let cmd = match event {
            InputEvent::StepUp => Command::StepUp,
            InputEvent::StepDown => Command::StepDown,
            InputEvent::ToggleColor => return Some(Command::ToggleColor),
            InputEvent::Activate => return Some(Command::Activate),
            InputEvent::LongPress => return Some(Command::Exit),
        };

        if self.window.input.try_consume(now_ms) {
            Some(cmd)
        } else {
            trace!("input: {:?} debounced at {}ms", event, now_ms);
            None
        }
    }

    /// True once per render tick window.
    ///
    /// Also retires an elapsed input window, so the next step is accepted
    /// however long the knob then sits idle.
    pub fn tick_due(&mut self, now_ms: u32) -> bool {
        self.window.input.disarm_if_elapsed(now_ms);
        self.window.tick.try_consume(now_ms)
    }
}
