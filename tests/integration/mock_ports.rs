//! Mock port adapters for integration tests.
//!
//! Record every call so tests can assert on the full history without a
//! GUI toolkit, PWM peripheral, or audio player.

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use knob_light::announce::Announcement;
use knob_light::app::ports::{AudioPort, LightDriverPort, NavigationPort, RenderPort, Screen};
use knob_light::error::{AudioError, LightError, NavigationError, RenderError};
use knob_light::render::{Asset, ElementId};

// ── Render call record ────────────────────────────────────────

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCall {
    CreateScreen,
    SetVisible(ElementId, bool),
    SetImage(ElementId, Asset),
    SetLabel(String),
    SetEditing(bool),
}

// ── MockScreen ────────────────────────────────────────────────

#[derive(Default)]
pub struct MockScreen {
    pub calls: Vec<RenderCall>,
    /// When set, every drawing call is rejected.
    pub fail: AtomicBool,
}

#[allow(dead_code)]
impl MockScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn count(&self, pred: impl Fn(&RenderCall) -> bool) -> usize {
        self.calls.iter().filter(|c| pred(c)).count()
    }

    /// Labels in the order they were drawn.
    pub fn labels(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter_map(|c| match c {
                RenderCall::SetLabel(s) => Some(s.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Latest visibility written for `element`.
    pub fn visible(&self, element: ElementId) -> bool {
        self.calls
            .iter()
            .rev()
            .find_map(|c| match c {
                RenderCall::SetVisible(e, v) if *e == element => Some(*v),
                _ => None,
            })
            .unwrap_or(false)
    }

    /// Latest image written for `element`.
    pub fn image(&self, element: ElementId) -> Option<Asset> {
        self.calls.iter().rev().find_map(|c| match c {
            RenderCall::SetImage(e, a) if *e == element => Some(*a),
            _ => None,
        })
    }

    fn check(&self) -> Result<(), RenderError> {
        if self.fail.load(Ordering::SeqCst) {
            Err(RenderError::NoScreen)
        } else {
            Ok(())
        }
    }
}

impl RenderPort for MockScreen {
    fn create_screen(&mut self) -> Result<(), RenderError> {
        self.check()?;
        self.calls.push(RenderCall::CreateScreen);
        Ok(())
    }

    fn set_visible(&mut self, element: ElementId, visible: bool) -> Result<(), RenderError> {
        self.check()?;
        self.calls.push(RenderCall::SetVisible(element, visible));
        Ok(())
    }

    fn set_image(&mut self, element: ElementId, image: Asset) -> Result<(), RenderError> {
        self.check()?;
        self.calls.push(RenderCall::SetImage(element, image));
        Ok(())
    }

    fn set_label(&mut self, text: &str) -> Result<(), RenderError> {
        self.check()?;
        self.calls.push(RenderCall::SetLabel(text.to_owned()));
        Ok(())
    }

    fn set_editing(&mut self, editing: bool) -> Result<(), RenderError> {
        self.check()?;
        self.calls.push(RenderCall::SetEditing(editing));
        Ok(())
    }
}

// ── MockLight ─────────────────────────────────────────────────

#[derive(Default)]
pub struct MockLight {
    pub writes: Vec<(u8, u8, u8)>,
    pub fail: AtomicBool,
}

#[allow(dead_code)]
impl MockLight {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<(u8, u8, u8)> {
        self.writes.last().copied()
    }
}

impl LightDriverPort for MockLight {
    fn set_rgb(&mut self, r: u8, g: u8, b: u8) -> Result<(), LightError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(LightError::PwmWriteFailed(0));
        }
        self.writes.push((r, g, b));
        Ok(())
    }
}

// ── MockAudio ─────────────────────────────────────────────────

/// Shared with the announcement worker, so all state is synchronised.
#[derive(Default)]
pub struct MockAudio {
    played: Mutex<Vec<Announcement>>,
    quiet: Mutex<Vec<bool>>,
    pub busy: AtomicBool,
    pub unavailable: AtomicBool,
}

#[allow(dead_code)]
impl MockAudio {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn played(&self) -> Vec<Announcement> {
        self.played.lock().unwrap().clone()
    }

    pub fn quiet_calls(&self) -> Vec<bool> {
        self.quiet.lock().unwrap().clone()
    }

    /// Poll until `n` announcements were played or `timeout` elapses.
    pub fn wait_for(&self, n: usize, timeout: Duration) -> Vec<Announcement> {
        let deadline = Instant::now() + timeout;
        loop {
            let played = self.played();
            if played.len() >= n || Instant::now() >= deadline {
                return played;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
    }
}

impl AudioPort for MockAudio {
    fn play_category(&self, category: Announcement) -> Result<(), AudioError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AudioError::Unavailable);
        }
        if self.busy.load(Ordering::SeqCst) {
            return Err(AudioError::Busy);
        }
        self.played.lock().unwrap().push(category);
        Ok(())
    }

    fn force_quiet(&self, quiet: bool) -> Result<(), AudioError> {
        self.quiet.lock().unwrap().push(quiet);
        Ok(())
    }
}

// ── MockNavigation ────────────────────────────────────────────

#[derive(Default)]
pub struct MockNavigation {
    pub visited: Vec<Screen>,
}

impl NavigationPort for MockNavigation {
    fn go_to(&mut self, screen: Screen) -> Result<(), NavigationError> {
        self.visited.push(screen);
        Ok(())
    }
}
