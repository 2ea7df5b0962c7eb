//! Render projection.
//!
//! Maps a [`LightState`] onto what the screen shows: which tier icons are
//! visible, which warm/cool art they use, the background, and the label.
//! [`project`] is pure; [`Renderer`] owns the shadow copy used for change
//! detection and pushes a projected variant to the GUI toolkit and the
//! physical light.
//!
//! ## Tier reveal
//!
//! Tier icons are stacked layers. Every tier at or below the current level
//! is shown, so 100% shows all four layers at once:
//!
//! | Brightness | 25 | 50 | 75 | 100 | off icon | background     |
//! |-----------|----|----|----|-----|----------|----------------|
//! | 0%        |    |    |    |     | shown    | closed         |
//! | 25%       | ✓  |    |    |     |          | warm/cool      |
//! | 50%       | ✓  | ✓  |    |     |          | warm/cool      |
//! | 75%       | ✓  | ✓  | ✓  |     |          | warm/cool      |
//! | 100%      | ✓  | ✓  | ✓  | ✓   |          | warm/cool      |

use core::fmt::Write;

use heapless::String;
use log::{debug, warn};

use crate::app::ports::{LightDriverPort, RenderPort};
use crate::error::Result;
use crate::light::{Brightness, LightState};

// ---------------------------------------------------------------------------
// Screen vocabulary
// ---------------------------------------------------------------------------

/// Brightness tier icons, dimmest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Tier {
    P25 = 0,
    P50 = 1,
    P75 = 2,
    P100 = 3,
}

impl Tier {
    pub const ALL: [Self; 4] = [Self::P25, Self::P50, Self::P75, Self::P100];

    /// The tier a brightness engages; `None` when off.
    pub fn of(level: Brightness) -> Option<Self> {
        match level.percent() {
            25 => Some(Self::P25),
            50 => Some(Self::P50),
            75 => Some(Self::P75),
            100 => Some(Self::P100),
            _ => None,
        }
    }
}

/// Widgets on the light screen that the layer addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementId {
    Background,
    OffIcon,
    Tier(Tier),
}

/// Image assets shipped with the light screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Asset {
    WarmBackground,
    CoolBackground,
    ClosedBackground,
    OffStatus,
    Warm25,
    Cool25,
    Warm50,
    Cool50,
    Warm75,
    Cool75,
    Warm100,
    Cool100,
}

/// Backgrounds indexed by [`ColorTemp::index`](crate::light::ColorTemp::index).
const BACKGROUNDS: [Asset; 2] = [Asset::WarmBackground, Asset::CoolBackground];

/// Tier art indexed by tier, then [`ColorTemp::index`](crate::light::ColorTemp::index).
const TIER_ART: [[Asset; 2]; 4] = [
    [Asset::Warm25, Asset::Cool25],
    [Asset::Warm50, Asset::Cool50],
    [Asset::Warm75, Asset::Cool75],
    [Asset::Warm100, Asset::Cool100],
];

/// Label shown when the light is off.
pub const OFF_LABEL: &str = "--";

// ---------------------------------------------------------------------------
// RenderVariant
// ---------------------------------------------------------------------------

/// Everything the screen needs for one state, computed fresh each pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderVariant {
    /// Column of the warm/cool image tables.
    pub image_set: usize,
    /// Highest visible tier; every tier below it is visible too.
    pub top_tier: Option<Tier>,
    pub label: String<8>,
}

impl RenderVariant {
    /// Tiers to reveal, dimmest first.
    pub fn visible_tiers(&self) -> impl Iterator<Item = Tier> + '_ {
        Tier::ALL
            .into_iter()
            .filter(move |t| self.top_tier.is_some_and(|top| *t <= top))
    }

    pub fn is_tier_visible(&self, tier: Tier) -> bool {
        self.top_tier.is_some_and(|top| tier <= top)
    }

    /// Off icon is shown only at 0%.
    pub fn off_icon_visible(&self) -> bool {
        self.top_tier.is_none()
    }

    pub fn background(&self) -> Asset {
        match self.top_tier {
            Some(_) => BACKGROUNDS[self.image_set],
            None => Asset::ClosedBackground,
        }
    }

    pub fn tier_art(&self, tier: Tier) -> Asset {
        TIER_ART[tier as usize][self.image_set]
    }
}

/// Project a state onto the screen.
pub fn project(state: LightState) -> RenderVariant {
    let mut label = String::new();
    if state.brightness.is_off() {
        let _ = label.push_str(OFF_LABEL);
    } else {
        // "100%" is the longest label and fits in 8 bytes.
        let _ = write!(label, "{}", state.brightness);
    }

    RenderVariant {
        image_set: state.color_temp.index(),
        top_tier: Tier::of(state.brightness),
        label,
    }
}

// ---------------------------------------------------------------------------
// Renderer
// ---------------------------------------------------------------------------

/// Draws settled state once per change.
pub struct Renderer {
    /// Last state pushed to the screen. `None` forces the first pass.
    shadow: Option<LightState>,
}

impl Renderer {
    pub fn new() -> Self {
        Self { shadow: None }
    }

    /// True if `state` differs from what was last drawn.
    pub fn is_dirty(&self, state: LightState) -> bool {
        self.shadow != Some(state)
    }

    /// Last drawn state.
    pub fn shadow(&self) -> Option<LightState> {
        self.shadow
    }

    /// Draw `state` and drive the light if it changed since the last pass.
    ///
    /// The shadow is updated before drawing, so a collaborator failure is
    /// reported once and not retried on the next tick. A light failure
    /// does not skip the draw; the first error is returned.
    pub fn sync(
        &mut self,
        state: LightState,
        ui: &mut impl RenderPort,
        light: &mut impl LightDriverPort,
    ) -> Result<bool> {
        if !self.is_dirty(state) {
            return Ok(false);
        }
        self.shadow = Some(state);

        let (r, g, b) = state.rgb();
        let lit = light.set_rgb(r, g, b);

        let variant = project(state);
        debug!(
            "render: {} {:?} (rgb {},{},{})",
            variant.label, state.color_temp, r, g, b
        );
        let drawn = draw(&variant, ui);
        if let (Err(_), Err(e)) = (&lit, &drawn) {
            warn!("render: draw also failed: {}", e);
        }
        lit?;
        drawn?;
        Ok(true)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Push a variant to the GUI toolkit.
pub fn draw(variant: &RenderVariant, ui: &mut impl RenderPort) -> Result<()> {
    for tier in Tier::ALL {
        ui.set_visible(ElementId::Tier(tier), false)?;
    }
    ui.set_visible(ElementId::OffIcon, false)?;
    ui.set_label(&variant.label)?;

    for tier in variant.visible_tiers() {
        ui.set_visible(ElementId::Tier(tier), true)?;
        ui.set_image(ElementId::Tier(tier), variant.tier_art(tier))?;
    }
    if variant.off_icon_visible() {
        ui.set_visible(ElementId::OffIcon, true)?;
        ui.set_image(ElementId::OffIcon, Asset::OffStatus)?;
    }
    ui.set_image(ElementId::Background, variant.background())?;
    Ok(())
}
