//! Overlay toggle flow through the input dispatcher

use pitch_engine::input::{CursorMode, InputDispatcher, InputEvent, KeyAction, KeyCode, MouseButton};
use pitch_engine::render::frame::RenderFeatures;
use pitch_engine::state::ProgramState;
use pitch_engine::ui::{camera_info_lines, DebugOverlay};

fn press(key: KeyCode) -> InputEvent {
    InputEvent::Key {
        key,
        action: KeyAction::Press,
    }
}

#[test]
fn test_overlay_toggle_switches_cursor_and_freezes_mouse_look() {
    let mut dispatcher = InputDispatcher::new();
    let mut state = ProgramState::default();

    let response = dispatcher.dispatch_all(
        [InputEvent::CursorMoved { x: 400.0, y: 300.0 }, press(KeyCode::F1)],
        &mut state,
    );
    assert!(state.overlay_enabled);
    assert!(!state.camera_mouse_update_enabled);
    assert_eq!(response.cursor_mode, Some(CursorMode::Free));

    let yaw = state.camera.yaw;
    dispatcher.dispatch(InputEvent::CursorMoved { x: 500.0, y: 250.0 }, &mut state);
    assert_eq!(state.camera.yaw, yaw);

    let response = dispatcher.dispatch(press(KeyCode::F1), &mut state);
    assert!(!state.overlay_enabled);
    assert_eq!(response.cursor_mode, Some(CursorMode::Captured));
    // mouse look stays off until re-enabled from the overlay
    assert!(!state.camera_mouse_update_enabled);
}

#[test]
fn test_overlay_readout_tracks_camera_movement() {
    let mut dispatcher = InputDispatcher::new();
    let mut state = ProgramState::default();
    let before = camera_info_lines(&state);

    dispatcher.dispatch(press(KeyCode::W), &mut state);
    dispatcher.apply_held_keys(&mut state, 0.5);

    let after = camera_info_lines(&state);
    assert_ne!(before[0], after[0]);
    assert_eq!(before[1], after[1]);
}

#[test]
fn test_overlay_update_without_input_keeps_state() {
    let mut overlay = DebugOverlay::new(RenderFeatures::all(), None, 800.0, 600.0);
    let mut state = ProgramState::default();
    state.clear_color.x = 0.4;
    state.lights.point.linear = 0.3;
    let expected = state.clone();

    overlay.update(&mut state);
    overlay.build(&state);
    assert_eq!(state, expected);
}

#[test]
fn test_cursor_tracked_while_hidden_lets_first_click_land() {
    let mut overlay = DebugOverlay::new(RenderFeatures::ANTI_ALIASING_TOGGLE, None, 800.0, 600.0);
    let mut dispatcher = InputDispatcher::new();
    let mut state = ProgramState::default();

    // the anti-aliasing checkbox sits in the first row of the first window
    let hover = InputEvent::CursorMoved { x: 30.0, y: 50.0 };
    overlay.observe(&hover, state.overlay_enabled);
    dispatcher.dispatch(hover, &mut state);

    dispatcher.dispatch(press(KeyCode::F1), &mut state);
    assert!(state.overlay_enabled);

    for pressed in [true, false] {
        let event = InputEvent::MouseButton { button: MouseButton::Left, pressed };
        overlay.observe(&event, state.overlay_enabled);
        overlay.update(&mut state);
    }
    assert!(!state.anti_aliasing);
}

#[test]
fn test_clicks_while_hidden_are_ignored() {
    let mut overlay = DebugOverlay::new(RenderFeatures::ANTI_ALIASING_TOGGLE, None, 800.0, 600.0);
    let mut state = ProgramState::default();

    overlay.observe(&InputEvent::CursorMoved { x: 30.0, y: 50.0 }, false);
    for pressed in [true, false] {
        overlay.observe(&InputEvent::MouseButton { button: MouseButton::Left, pressed }, false);
    }
    overlay.update(&mut state);
    assert!(state.anti_aliasing);
}
