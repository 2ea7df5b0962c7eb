//! Light layer — lifecycle and orchestration.
//!
//! [`LightLayer`] owns the port adapters and, while the screen is active, a
//! [`Session`] holding the input gate, state machine, renderer, and the
//! announcement worker. Everything session-scoped is rebuilt on every
//! entry, so nothing leaks from one visit to the next.
//!
//! ```text
//!  InputEvent ──▶ ┌──────────────────────────────┐ ──▶ RenderPort
//!                 │          LightLayer          │ ──▶ LightDriverPort
//!  tick(now) ───▶ │ Gate · Machine · Renderer    │ ──▶ NavigationPort
//!                 │ Announcer ─▶ worker thread   │ ──▶ AudioPort
//!                 └──────────────────────────────┘
//! ```
//!
//! All methods run on the UI context. The worker thread only shares the
//! announcement signal, the brightness mirror, and the audio port.

use std::sync::Arc;

use log::{debug, info, trace, warn};

use crate::announce::{self, Announcer};
use crate::config::LayerConfig;
use crate::drivers::task_pin::TaskSpec;
use crate::error::{LayerError, Result};
use crate::input::{DebounceWindow, InputGate};
use crate::light::{LightMachine, LightState, SharedBrightness, StateChange};
use crate::render::Renderer;

use super::commands::Command;
use super::events::InputEvent;
use super::ports::{AudioPort, LightDriverPort, NavigationPort, RenderPort, Screen};

// ───────────────────────────────────────────────────────────────
// Outcomes
// ───────────────────────────────────────────────────────────────

/// What [`LightLayer::handle_input`] did with an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    /// The layer is not active, or debounce dropped the event.
    Ignored,
    /// The command was accepted but left the light as it was.
    Unchanged,
    /// The light state moved.
    Changed(StateChange),
    /// Editing mode was entered.
    Activated,
    /// Navigation moved away; the host must call [`LightLayer::on_exit`].
    Exit,
}

// ───────────────────────────────────────────────────────────────
// Session
// ───────────────────────────────────────────────────────────────

/// State that exists only between `on_enter` and `on_exit`.
struct Session {
    gate: InputGate,
    machine: LightMachine,
    renderer: Renderer,
    announcer: Announcer,
}

// ───────────────────────────────────────────────────────────────
// LightLayer
// ───────────────────────────────────────────────────────────────

pub struct LightLayer<R, L, A, N> {
    config: LayerConfig,
    ui: R,
    light: L,
    audio: Arc<A>,
    nav: N,
    /// GUI widgets survive exit; they are created once.
    screen_created: bool,
    session: Option<Session>,
}

impl<R, L, A, N> LightLayer<R, L, A, N>
where
    R: RenderPort,
    L: LightDriverPort,
    A: AudioPort + Send + Sync + 'static,
    N: NavigationPort,
{
    /// Construct the layer. Does **not** enter it — call [`on_enter`](Self::on_enter).
    pub fn new(config: LayerConfig, ui: R, light: L, audio: Arc<A>, nav: N) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            ui,
            light,
            audio,
            nav,
            screen_created: false,
            session: None,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    /// Enter the layer at `now_ms`.
    ///
    /// Resets the light to the configured default, draws it, announces
    /// it, and starts the announcement worker. If any step fails the
    /// layer stays inactive and the light is turned off.
    ///
    /// # Panics
    ///
    /// If the layer is already active. Entering twice without an exit
    /// would leave a second worker running.
    pub fn on_enter(&mut self, now_ms: u32) -> Result<()> {
        assert!(
            self.session.is_none(),
            "light layer entered twice without exit"
        );
        info!("light layer: enter at {}ms", now_ms);

        match self.start_session() {
            Ok(session) => {
                self.session = Some(session);
                Ok(())
            }
            Err(e) => {
                warn!("light layer: enter failed: {}", e);
                // No session owns the output now; leave it dark.
                if let Err(off) = self.light.off() {
                    warn!("light layer: light off after failed enter: {}", off);
                }
                Err(e)
            }
        }
    }

    /// Draw and announce the entry state, then start the worker last so a
    /// failed step leaves nothing running.
    fn start_session(&mut self) -> Result<Session> {
        if !self.screen_created {
            self.ui.create_screen()?;
            self.screen_created = true;
        }

        let initial = LightState::new(
            self.config.entry_brightness(),
            self.config.default_color_temp,
        );
        let brightness = SharedBrightness::new(initial.brightness);
        let machine = LightMachine::new(initial, brightness.clone());
        let mut renderer = Renderer::new();
        renderer.sync(initial, &mut self.ui, &mut self.light)?;

        self.audio.force_quiet(false)?;
        announce::announce(self.audio.as_ref(), initial.brightness)?;

        let window = DebounceWindow::new(self.config.render_tick_ms, self.config.input_debounce_ms);
        let announcer = Announcer::start(
            &TaskSpec::announcer(&self.config),
            brightness,
            Arc::clone(&self.audio),
        );

        Ok(Session {
            gate: InputGate::new(window),
            machine,
            renderer,
            announcer,
        })
    }

    /// Leave the layer.
    ///
    /// Always turns the light off and stops the worker, even when a
    /// collaborator fails along the way; the first failure is returned.
    pub fn on_exit(&mut self) -> Result<()> {
        info!("light layer: exit");
        let mut first_err: Option<LayerError> = None;

        if let Err(e) = self.light.off() {
            warn!("light layer: light off failed: {}", e);
            first_err = Some(e.into());
        }

        match self.session.take() {
            Some(mut session) => {
                // Detached: an in-flight announcement is not waited for.
                drop(session.announcer.stop());
            }
            None => debug!("light layer: exit without active session"),
        }

        if let Err(e) = self.audio.force_quiet(true) {
            warn!("light layer: audio quiet failed: {}", e);
            if first_err.is_none() {
                first_err = Some(e.into());
            }
        }

        match first_err {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    // ── Input and tick ────────────────────────────────────────

    /// Feed one input event delivered at `now_ms`.
    pub fn handle_input(&mut self, event: InputEvent, now_ms: u32) -> Result<InputOutcome> {
        let Some(session) = self.session.as_mut() else {
            trace!("light layer: {:?} while inactive", event);
            return Ok(InputOutcome::Ignored);
        };
        let Some(cmd) = session.gate.handle_input(event, now_ms) else {
            return Ok(InputOutcome::Ignored);
        };

        match cmd {
            Command::Activate => {
                self.ui.set_editing(true)?;
                Ok(InputOutcome::Activated)
            }
            Command::Exit => {
                self.nav.go_to(Screen::Menu)?;
                Ok(InputOutcome::Exit)
            }
            Command::StepUp | Command::StepDown | Command::ToggleColor => {
                let change = session.machine.apply(cmd);
                if change.brightness {
                    session.announcer.signal();
                }
                Ok(if change.any() {
                    InputOutcome::Changed(change)
                } else {
                    InputOutcome::Unchanged
                })
            }
        }
    }

    /// Periodic tick. Draws and drives the light when the state moved
    /// since the last pass; returns whether it did.
    pub fn tick(&mut self, now_ms: u32) -> Result<bool> {
        let Some(session) = self.session.as_mut() else {
            return Ok(false);
        };
        if !session.gate.tick_due(now_ms) {
            return Ok(false);
        }
        session
            .renderer
            .sync(session.machine.state(), &mut self.ui, &mut self.light)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Canonical light state while active.
    pub fn state(&self) -> Option<LightState> {
        self.session.as_ref().map(|s| s.machine.state())
    }

    pub fn config(&self) -> &LayerConfig {
        &self.config
    }

    pub fn ui(&self) -> &R {
        &self.ui
    }

    pub fn light(&self) -> &L {
        &self.light
    }

    pub fn audio(&self) -> &Arc<A> {
        &self.audio
    }

    pub fn nav(&self) -> &N {
        &self.nav
    }
}

impl<R, L, A, N> Drop for LightLayer<R, L, A, N> {
    fn drop(&mut self) {
        if self.session.is_some() {
            warn!("light layer dropped while active; worker stopped without exit");
        }
    }
}
