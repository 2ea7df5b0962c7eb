//! Announcement notifier.
//!
//! A one-slot coalescing signal between the UI context and a dedicated
//! worker thread that speaks the current brightness.
//!
//! ```text
//! ┌──────────────┐  signal()   ┌────────────────────┐  wake   ┌──────────────┐
//! │  UI context  │────────────▶│ AnnouncementSignal │────────▶│    Worker    │
//! │ (input path) │             │  (1 slot, no queue)│         │ (own thread) │
//! └──────────────┘             └────────────────────┘         └──────┬───────┘
//!                                                                    │ reads
//!                                                      SharedBrightness (latest)
//! ```
//!
//! Setting the signal twice before the worker wakes leaves one pending
//! wake-up. The worker reads brightness when it wakes, not when the signal
//! was raised, so a burst of changes produces one announcement for the
//! final value.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::JoinHandle;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::signal::Signal;
use futures_lite::future;
use log::{debug, info, trace, warn};

use crate::app::ports::AudioPort;
use crate::drivers::task_pin::{self, TaskSpec};
use crate::error::AudioError;
use crate::light::{Brightness, SharedBrightness};

// ---------------------------------------------------------------------------
// Announcement categories
// ---------------------------------------------------------------------------

/// Voice clip categories, one per brightness level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Announcement {
    Off,
    P25,
    P50,
    P75,
    P100,
}

impl Announcement {
    pub fn for_brightness(level: Brightness) -> Self {
        match level.percent() {
            0 => Self::Off,
            25 => Self::P25,
            50 => Self::P50,
            75 => Self::P75,
            100 => Self::P100,
            other => unreachable!("brightness {other}% escaped validation"),
        }
    }
}

/// Play the clip for `level`, treating a busy player as a dropped request.
///
/// Returns `Ok(false)` when the player was busy.
pub fn announce(audio: &impl AudioPort, level: Brightness) -> Result<bool, AudioError> {
    let category = Announcement::for_brightness(level);
    match audio.play_category(category) {
        Ok(()) => {
            debug!("announce: {:?}", category);
            Ok(true)
        }
        Err(AudioError::Busy) => {
            trace!("announce: player busy, {:?} dropped", category);
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

// ---------------------------------------------------------------------------
// AnnouncementSignal
// ---------------------------------------------------------------------------

/// Edge-triggered, auto-clearing, at-most-one-pending flag plus a stop bit.
pub struct AnnouncementSignal {
    pending: Signal<CriticalSectionRawMutex, ()>,
    stopped: AtomicBool,
}

impl AnnouncementSignal {
    pub const fn new() -> Self {
        Self {
            pending: Signal::new(),
            stopped: AtomicBool::new(false),
        }
    }

    /// Raise the flag. Never blocks; raising an already-raised flag is a
    /// no-op.
    pub fn signal(&self) {
        if self.pending.signaled() {
            trace!("announce: signal coalesced");
        }
        self.pending.signal(());
    }

    /// True if a wake-up is waiting to be consumed.
    pub fn is_pending(&self) -> bool {
        self.pending.signaled()
    }

    /// Ask the worker to leave its loop and wake it if it is parked.
    pub fn stop(&self) {
        self.stopped.store(true, Ordering::Release);
        self.pending.signal(());
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::Acquire)
    }

    /// Suspend until the flag is raised, then clear it.
    async fn wait(&self) {
        self.pending.wait().await;
    }
}

impl Default for AnnouncementSignal {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Worker
// ---------------------------------------------------------------------------

/// What one wake-up of the worker did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wake {
    /// The clip for the current brightness was handed to the player.
    Announced(Announcement),
    /// The player refused the clip; it is not retried.
    Dropped(Announcement),
    /// The layer is exiting.
    Stopped,
}

/// Consumer half: parks on the signal and speaks the latest brightness.
pub struct AnnouncementWorker<A> {
    signal: Arc<AnnouncementSignal>,
    brightness: SharedBrightness,
    audio: Arc<A>,
}

impl<A: AudioPort> AnnouncementWorker<A> {
    pub fn new(
        signal: Arc<AnnouncementSignal>,
        brightness: SharedBrightness,
        audio: Arc<A>,
    ) -> Self {
        Self {
            signal,
            brightness,
            audio,
        }
    }

    /// Wait for one signal, clear it, and announce the brightness current
    /// at wake time.
    pub async fn wait_and_consume(&self) -> Wake {
        self.signal.wait().await;
        if self.signal.is_stopped() {
            return Wake::Stopped;
        }

        let level = self.brightness.load();
        let category = Announcement::for_brightness(level);
        match announce(self.audio.as_ref(), level) {
            Ok(true) => Wake::Announced(category),
            Ok(false) => Wake::Dropped(category),
            Err(e) => {
                trace!("announce: {e}, {:?} dropped", category);
                Wake::Dropped(category)
            }
        }
    }

    /// Worker loop. Returns once the signal is stopped.
    pub fn run(self) {
        info!("announce: worker started");
        while !self.signal.is_stopped() {
            if future::block_on(self.wait_and_consume()) == Wake::Stopped {
                break;
            }
        }
        info!("announce: worker exited");
    }
}

// ---------------------------------------------------------------------------
// Announcer
// ---------------------------------------------------------------------------

/// Producer half plus the worker it owns. Lives exactly as long as one
/// layer session.
pub struct Announcer {
    signal: Arc<AnnouncementSignal>,
    worker: Option<JoinHandle<()>>,
}

impl Announcer {
    /// Create the signal and spawn the worker.
    pub fn start<A>(spec: &TaskSpec, brightness: SharedBrightness, audio: Arc<A>) -> Self
    where
        A: AudioPort + Send + Sync + 'static,
    {
        let signal = Arc::new(AnnouncementSignal::new());
        let worker = AnnouncementWorker::new(Arc::clone(&signal), brightness, audio);
        let handle = task_pin::spawn_on_core(spec, move || worker.run());
        Self {
            signal,
            worker: Some(handle),
        }
    }

    /// Producer half: notify the worker that brightness settled.
    pub fn signal(&self) {
        self.signal.signal();
    }

    /// Stop the worker without waiting for it.
    ///
    /// An announcement already handed to the player may still be playing;
    /// the returned handle lets callers join if they need to.
    pub fn stop(&mut self) -> Option<JoinHandle<()>> {
        self.signal.stop();
        let handle = self.worker.take();
        if handle.is_none() {
            warn!("announce: stop on an already stopped worker");
        }
        handle
    }
}

impl Drop for Announcer {
    fn drop(&mut self) {
        self.signal.stop();
    }
}
