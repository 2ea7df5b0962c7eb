//! Canonical light state and the values derived from it.
//!
//! [`LightState`] is the single record the state machine writes. The
//! renderer and the light driver only ever see copies of it. The
//! announcement worker reads brightness through [`SharedBrightness`],
//! a word-sized atomic mirror that the state machine keeps current.

use core::fmt;
use core::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// Colour as (R, G, B) tuple, each 0–255.
pub type Rgb = (u8, u8, u8);

// ---------------------------------------------------------------------------
// Brightness
// ---------------------------------------------------------------------------

/// Brightness in percent, restricted to 0/25/50/75/100.
///
/// The constructor is the only way in, so every value the light driver
/// receives has passed the range check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Brightness(u8);

impl Brightness {
    pub const OFF: Self = Self(0);
    pub const P25: Self = Self(25);
    pub const P50: Self = Self(50);
    pub const P75: Self = Self(75);
    pub const FULL: Self = Self(100);

    /// Percent added or removed by one knob detent.
    pub const STEP: u8 = 25;

    /// Every legal level, dimmest first.
    pub const LEVELS: [Self; 5] = [Self::OFF, Self::P25, Self::P50, Self::P75, Self::FULL];

    /// `None` unless `percent` is one of the five levels.
    pub const fn new(percent: u8) -> Option<Self> {
        if percent <= 100 && percent % Self::STEP == 0 {
            Some(Self(percent))
        } else {
            None
        }
    }

    /// Like [`new`](Self::new) but treats an off-grid value as a bug.
    pub fn from_percent(percent: u8) -> Self {
        match Self::new(percent) {
            Some(level) => level,
            None => panic!("brightness {percent}% is not a 25% step"),
        }
    }

    pub const fn percent(self) -> u8 {
        self.0
    }

    pub const fn is_off(self) -> bool {
        self.0 == 0
    }

    /// One step brighter, saturating at 100%.
    pub fn step_up(self) -> Self {
        Self(self.0.saturating_add(Self::STEP).min(100))
    }

    /// One step dimmer, saturating at 0%.
    pub fn step_down(self) -> Self {
        Self(self.0.saturating_sub(Self::STEP))
    }

    /// 0–255 channel value for this level, truncating.
    pub fn channel(self) -> u8 {
        (0xFF_u16 * u16::from(self.0) / 100) as u8
    }
}

impl TryFrom<u8> for Brightness {
    type Error = &'static str;

    fn try_from(percent: u8) -> Result<Self, Self::Error> {
        Self::new(percent).ok_or("brightness must be 0, 25, 50, 75 or 100")
    }
}

impl From<Brightness> for u8 {
    fn from(level: Brightness) -> Self {
        level.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

// ---------------------------------------------------------------------------
// Colour temperature
// ---------------------------------------------------------------------------

/// Two-position colour temperature. The discriminant indexes the warm/cool
/// image tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum ColorTemp {
    Warm = 0,
    Cool = 1,
}

impl ColorTemp {
    pub const fn toggled(self) -> Self {
        match self {
            Self::Warm => Self::Cool,
            Self::Cool => Self::Warm,
        }
    }

    /// Column in a 2-wide warm/cool lookup table.
    pub const fn index(self) -> usize {
        self as usize
    }
}

// ---------------------------------------------------------------------------
// LightState
// ---------------------------------------------------------------------------

/// Canonical {brightness, colour temperature} pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightState {
    pub brightness: Brightness,
    pub color_temp: ColorTemp,
}

impl LightState {
    pub const fn new(brightness: Brightness, color_temp: ColorTemp) -> Self {
        Self {
            brightness,
            color_temp,
        }
    }

    /// Output colour for the physical light.
    ///
    /// Cool light is neutral grey scaled by brightness; warm light keeps red
    /// and green and attenuates blue by `0x33 / 0xFF`. Zero brightness is
    /// always black, whatever the colour temperature.
    pub fn rgb(self) -> Rgb {
        if self.brightness.is_off() {
            return (0, 0, 0);
        }
        let c = self.brightness.channel();
        match self.color_temp {
            ColorTemp::Cool => (c, c, c),
            ColorTemp::Warm => (c, c, (u16::from(c) * 0x33 / 0xFF) as u8),
        }
    }
}

// ---------------------------------------------------------------------------
// SharedBrightness
// ---------------------------------------------------------------------------

/// Brightness mirror readable from the announcement worker.
///
/// Written only by the state machine; the worker loads it at wake time and
/// tolerates a value newer than the one that raised the signal.
#[derive(Debug, Clone)]
pub struct SharedBrightness(Arc<AtomicU8>);

impl SharedBrightness {
    pub fn new(initial: Brightness) -> Self {
        Self(Arc::new(AtomicU8::new(initial.percent())))
    }

    pub fn store(&self, level: Brightness) {
        self.0.store(level.percent(), Ordering::Release);
    }

    pub fn load(&self) -> Brightness {
        Brightness::from_percent(self.0.load(Ordering::Acquire))
    }
}
