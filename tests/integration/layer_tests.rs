//! Light layer integration tests.
//!
//! Exercise the full enter → input → tick → exit lifecycle against mock
//! adapters, including the real announcement worker thread.

use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;

use knob_light::announce::Announcement;
use knob_light::app::events::InputEvent;
use knob_light::app::layer::{InputOutcome, LightLayer};
use knob_light::app::ports::Screen;
use knob_light::config::LayerConfig;
use knob_light::error::{AudioError, LayerError, LightError, RenderError};
use knob_light::light::{Brightness, ColorTemp, LightState, StateChange};
use knob_light::render::{Asset, ElementId, Tier};

use super::mock_ports::{MockAudio, MockLight, MockNavigation, MockScreen, RenderCall};

type TestLayer = LightLayer<MockScreen, MockLight, MockAudio, MockNavigation>;

const WAIT: Duration = Duration::from_secs(2);

fn make_layer() -> (TestLayer, Arc<MockAudio>) {
    let audio = Arc::new(MockAudio::new());
    let layer = LightLayer::new(
        LayerConfig::default(),
        MockScreen::new(),
        MockLight::new(),
        Arc::clone(&audio),
        MockNavigation::default(),
    )
    .unwrap();
    (layer, audio)
}

fn entered_layer() -> (TestLayer, Arc<MockAudio>) {
    let (mut layer, audio) = make_layer();
    layer.on_enter(0).unwrap();
    (layer, audio)
}

// ── Entry ─────────────────────────────────────────────────────

#[test]
fn enter_draws_warm_fifty_and_announces_it() {
    let (mut layer, audio) = entered_layer();

    assert!(layer.is_active());
    assert_eq!(
        layer.state(),
        Some(LightState::new(Brightness::P50, ColorTemp::Warm))
    );
    assert_eq!(layer.light().last(), Some((127, 127, 25)));
    assert_eq!(layer.ui().labels(), ["50%"]);
    assert!(layer.ui().visible(ElementId::Tier(Tier::P25)));
    assert!(layer.ui().visible(ElementId::Tier(Tier::P50)));
    assert!(!layer.ui().visible(ElementId::Tier(Tier::P75)));
    assert!(!layer.ui().visible(ElementId::OffIcon));
    assert_eq!(layer.ui().image(ElementId::Background), Some(Asset::WarmBackground));
    assert_eq!(audio.played(), [Announcement::P50]);
    assert_eq!(audio.quiet_calls(), [false]);

    layer.on_exit().unwrap();
}

#[test]
fn invalid_config_is_rejected_at_construction() {
    let config = LayerConfig {
        default_brightness: 40,
        ..LayerConfig::default()
    };
    let result = LightLayer::new(
        config,
        MockScreen::new(),
        MockLight::new(),
        Arc::new(MockAudio::new()),
        MockNavigation::default(),
    );
    assert!(matches!(result, Err(LayerError::Config(_))));
}

#[test]
fn busy_player_on_entry_is_not_an_error() {
    let (mut layer, audio) = make_layer();
    audio.busy.store(true, Ordering::SeqCst);

    layer.on_enter(0).unwrap();
    assert!(layer.is_active());
    assert!(audio.played().is_empty());

    layer.on_exit().unwrap();
}

#[test]
fn unavailable_player_on_entry_fails_enter() {
    let (mut layer, audio) = make_layer();
    audio.unavailable.store(true, Ordering::SeqCst);

    assert_eq!(
        layer.on_enter(0),
        Err(LayerError::Audio(AudioError::Unavailable))
    );
    assert!(!layer.is_active());
}

#[test]
fn failed_enter_leaves_the_light_off() {
    let (mut layer, audio) = make_layer();
    audio.unavailable.store(true, Ordering::SeqCst);

    assert!(layer.on_enter(0).is_err());
    assert!(!layer.is_active());
    assert_eq!(layer.light().last(), Some((0, 0, 0)));

    // The player recovers: a later entry works normally.
    audio.unavailable.store(false, Ordering::SeqCst);
    layer.on_enter(1_000).unwrap();
    assert_eq!(layer.light().last(), Some((127, 127, 25)));
    layer.on_exit().unwrap();
}

#[test]
fn screen_failure_on_enter_is_reported_and_light_turned_off() {
    let (mut layer, audio) = make_layer();
    layer.ui().fail.store(true, Ordering::SeqCst);

    assert_eq!(
        layer.on_enter(0),
        Err(LayerError::Render(RenderError::NoScreen))
    );
    assert!(!layer.is_active());
    assert_eq!(layer.light().last(), Some((0, 0, 0)));
    assert!(audio.played().is_empty());
}

#[test]
#[should_panic(expected = "entered twice")]
fn entering_twice_panics() {
    let (mut layer, _audio) = entered_layer();
    let _ = layer.on_enter(10);
}

// ── Input ─────────────────────────────────────────────────────

#[test]
fn rapid_steps_inside_window_are_dropped() {
    let (mut layer, audio) = entered_layer();

    assert!(matches!(
        layer.handle_input(InputEvent::StepUp, 10).unwrap(),
        InputOutcome::Changed(_)
    ));
    assert_eq!(layer.handle_input(InputEvent::StepUp, 60).unwrap(), InputOutcome::Ignored);
    assert_eq!(layer.handle_input(InputEvent::StepUp, 209).unwrap(), InputOutcome::Ignored);
    assert_eq!(layer.state().unwrap().brightness, Brightness::P75);

    assert_eq!(audio.wait_for(2, WAIT), [Announcement::P50, Announcement::P75]);
    layer.on_exit().unwrap();
}

#[test]
fn colour_toggle_is_not_debounced_and_not_announced() {
    let (mut layer, audio) = entered_layer();

    let first = layer.handle_input(InputEvent::ToggleColor, 5).unwrap();
    assert_eq!(
        first,
        InputOutcome::Changed(StateChange {
            brightness: false,
            color_temp: true,
        })
    );
    let second = layer.handle_input(InputEvent::ToggleColor, 6).unwrap();
    assert!(matches!(second, InputOutcome::Changed(_)));
    assert_eq!(layer.state().unwrap().color_temp, ColorTemp::Warm);

    layer.handle_input(InputEvent::ToggleColor, 7).unwrap();
    assert!(layer.tick(20).unwrap());
    assert_eq!(layer.light().last(), Some((127, 127, 127)));
    assert_eq!(layer.ui().image(ElementId::Background), Some(Asset::CoolBackground));

    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(audio.played(), [Announcement::P50]);
    layer.on_exit().unwrap();
}

#[test]
fn step_at_the_boundary_is_accepted_without_change() {
    let (mut layer, audio) = entered_layer();

    layer.handle_input(InputEvent::StepUp, 0).unwrap();
    audio.wait_for(2, WAIT);
    layer.handle_input(InputEvent::StepUp, 200).unwrap();
    assert_eq!(audio.wait_for(3, WAIT).len(), 3);

    assert_eq!(
        layer.handle_input(InputEvent::StepUp, 400).unwrap(),
        InputOutcome::Unchanged
    );
    assert_eq!(layer.state().unwrap().brightness, Brightness::FULL);

    std::thread::sleep(Duration::from_millis(50));
    assert_eq!(audio.played().len(), 3);
    layer.on_exit().unwrap();
}

#[test]
fn stepping_down_to_off_shows_the_off_screen() {
    let (mut layer, audio) = entered_layer();

    layer.handle_input(InputEvent::StepDown, 0).unwrap();
    audio.wait_for(2, WAIT);
    layer.handle_input(InputEvent::StepDown, 200).unwrap();
    assert!(layer.tick(220).unwrap());

    assert_eq!(layer.state().unwrap().brightness, Brightness::OFF);
    assert_eq!(layer.light().last(), Some((0, 0, 0)));
    assert_eq!(layer.ui().labels().last(), Some(&"--"));
    assert!(layer.ui().visible(ElementId::OffIcon));
    assert!(Tier::ALL.iter().all(|&t| !layer.ui().visible(ElementId::Tier(t))));
    assert_eq!(layer.ui().image(ElementId::Background), Some(Asset::ClosedBackground));

    let played = audio.wait_for(3, WAIT);
    assert_eq!(played.last(), Some(&Announcement::Off));
    layer.on_exit().unwrap();
}

#[test]
fn activate_enters_editing_mode() {
    let (mut layer, _audio) = entered_layer();

    assert_eq!(
        layer.handle_input(InputEvent::Activate, 5).unwrap(),
        InputOutcome::Activated
    );
    assert_eq!(layer.ui().count(|c| *c == RenderCall::SetEditing(true)), 1);
    layer.on_exit().unwrap();
}

#[test]
fn long_press_navigates_back_to_menu() {
    let (mut layer, _audio) = entered_layer();

    assert_eq!(
        layer.handle_input(InputEvent::LongPress, 5).unwrap(),
        InputOutcome::Exit
    );
    assert_eq!(layer.nav().visited, [Screen::Menu]);
    // Navigation does not exit by itself; the host calls on_exit.
    assert!(layer.is_active());
    layer.on_exit().unwrap();
}

#[test]
fn inactive_layer_ignores_input_and_ticks() {
    let (mut layer, _audio) = make_layer();

    assert_eq!(
        layer.handle_input(InputEvent::StepUp, 0).unwrap(),
        InputOutcome::Ignored
    );
    assert!(!layer.tick(0).unwrap());
    assert!(layer.ui().calls.is_empty());
}

// ── Tick ──────────────────────────────────────────────────────

#[test]
fn tick_draws_once_per_change() {
    let (mut layer, _audio) = entered_layer();

    assert!(!layer.tick(0).unwrap(), "entry already drew the state");
    layer.handle_input(InputEvent::StepUp, 5).unwrap();
    assert!(!layer.tick(10).unwrap(), "tick window not elapsed");
    assert!(layer.tick(20).unwrap());
    assert!(!layer.tick(40).unwrap(), "nothing changed since last draw");
    assert_eq!(layer.ui().labels(), ["50%", "75%"]);
    layer.on_exit().unwrap();
}

#[test]
fn draw_failure_on_tick_is_reported_once() {
    let (mut layer, _audio) = entered_layer();

    layer.handle_input(InputEvent::StepUp, 5).unwrap();
    layer.ui().fail.store(true, Ordering::SeqCst);
    assert_eq!(
        layer.tick(20),
        Err(LayerError::Render(RenderError::NoScreen))
    );
    // The light was still driven to the new state.
    assert_eq!(layer.light().last(), Some((191, 191, 38)));
    // The failed state counts as drawn; it is not retried every tick.
    assert_eq!(layer.tick(40), Ok(false));

    assert_eq!(layer.on_exit(), Ok(()));
    assert_eq!(layer.light().last(), Some((0, 0, 0)));
}

#[test]
fn light_failure_on_tick_still_redraws_the_screen() {
    let (mut layer, _audio) = entered_layer();

    layer.handle_input(InputEvent::StepUp, 5).unwrap();
    layer.light().fail.store(true, Ordering::SeqCst);
    assert_eq!(
        layer.tick(20),
        Err(LayerError::Light(LightError::PwmWriteFailed(0)))
    );
    assert_eq!(layer.ui().labels(), ["50%", "75%"]);

    layer.light().fail.store(false, Ordering::SeqCst);
    layer.on_exit().unwrap();
}

// ── End to end ────────────────────────────────────────────────

#[test]
fn step_to_full_announces_each_level_and_ends_warm_white() {
    let (mut layer, audio) = entered_layer();

    layer.handle_input(InputEvent::StepUp, 10).unwrap();
    assert_eq!(audio.wait_for(2, WAIT).last(), Some(&Announcement::P75));
    assert!(layer.tick(20).unwrap());

    assert_eq!(layer.handle_input(InputEvent::StepUp, 100).unwrap(), InputOutcome::Ignored);
    layer.handle_input(InputEvent::StepUp, 300).unwrap();
    assert_eq!(
        audio.wait_for(3, WAIT),
        [Announcement::P50, Announcement::P75, Announcement::P100]
    );
    assert!(layer.tick(320).unwrap());

    assert_eq!(layer.ui().labels(), ["50%", "75%", "100%"]);
    assert_eq!(layer.light().last(), Some((255, 255, 51)));
    assert_eq!(layer.ui().image(ElementId::Tier(Tier::P100)), Some(Asset::Warm100));
    layer.on_exit().unwrap();
}

// ── Exit and re-entry ─────────────────────────────────────────

#[test]
fn exit_turns_light_off_and_reentry_restores_defaults() {
    let (mut layer, audio) = entered_layer();

    layer.handle_input(InputEvent::StepUp, 0).unwrap();
    layer.handle_input(InputEvent::ToggleColor, 1).unwrap();
    audio.wait_for(2, WAIT);

    layer.on_exit().unwrap();
    assert!(!layer.is_active());
    assert_eq!(layer.light().last(), Some((0, 0, 0)));
    assert_eq!(audio.quiet_calls().last(), Some(&true));

    layer.on_enter(5_000).unwrap();
    assert_eq!(
        layer.state(),
        Some(LightState::new(Brightness::P50, ColorTemp::Warm))
    );
    assert_eq!(layer.light().last(), Some((127, 127, 25)));
    assert_eq!(
        audio.played(),
        [Announcement::P50, Announcement::P75, Announcement::P50]
    );
    assert_eq!(layer.ui().count(|c| *c == RenderCall::CreateScreen), 1);

    // Fresh debounce window: the first step after re-entry is accepted.
    assert!(matches!(
        layer.handle_input(InputEvent::StepUp, 5_000).unwrap(),
        InputOutcome::Changed(_)
    ));
    layer.on_exit().unwrap();
}

#[test]
fn light_failure_on_exit_still_stops_the_session() {
    let (mut layer, audio) = entered_layer();
    layer.light().fail.store(true, Ordering::SeqCst);

    assert_eq!(
        layer.on_exit(),
        Err(LayerError::Light(LightError::PwmWriteFailed(0)))
    );
    assert!(!layer.is_active());
    assert_eq!(audio.quiet_calls().last(), Some(&true));
}

#[test]
fn exit_without_enter_is_harmless() {
    let (mut layer, audio) = make_layer();
    layer.on_exit().unwrap();
    assert_eq!(layer.light().last(), Some((0, 0, 0)));
    assert!(audio.played().is_empty());
}
