//! Input handling
//!
//! The window layer turns platform callbacks into [`InputEvent`] records
//! once per frame; [`InputDispatcher`] applies them synchronously to the
//! program state and reports the side effects the engine has to carry out
//! (closing, cursor capture, viewport resize).

use std::collections::HashSet;

use crate::render::camera::CameraMovement;
use crate::state::ProgramState;

/// Keys the scene reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// Move forward
    W,
    /// Strafe left
    A,
    /// Move backward
    S,
    /// Strafe right
    D,
    /// Request close
    Escape,
    /// Toggle the debug overlay
    F1,
}

/// Key transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Key went down
    Press,
    /// Key went up
    Release,
    /// Auto-repeat while held
    Repeat,
}

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// Left mouse button
    Left,
    /// Right mouse button
    Right,
    /// Middle mouse button
    Middle,
}

/// Cursor presentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorMode {
    /// Hidden and locked to the window for free-look
    Captured,
    /// Visible and free for overlay interaction
    Free,
}

impl CursorMode {
    /// Cursor mode matching the overlay visibility
    pub fn for_overlay(overlay_enabled: bool) -> Self {
        if overlay_enabled {
            CursorMode::Free
        } else {
            CursorMode::Captured
        }
    }
}

/// Platform-independent input record
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Key transition
    Key {
        /// Which key
        key: KeyCode,
        /// What happened
        action: KeyAction,
    },
    /// Cursor position in window coordinates (origin top-left)
    CursorMoved {
        /// Horizontal position
        x: f64,
        /// Vertical position, growing downward
        y: f64,
    },
    /// Mouse button transition
    MouseButton {
        /// Which button
        button: MouseButton,
        /// Down (true) or up
        pressed: bool,
    },
    /// Scroll wheel
    Scroll {
        /// Horizontal offset
        x: f64,
        /// Vertical offset, positive away from the user
        y: f64,
    },
    /// Window size changed, in window coordinates
    WindowResized {
        /// New width
        width: u32,
        /// New height
        height: u32,
    },
    /// Framebuffer size changed, in pixels
    FramebufferResized {
        /// New width
        width: u32,
        /// New height
        height: u32,
    },
    /// The window's close button was pressed
    CloseRequested,
}

/// Side effects requested while dispatching a batch of events
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputResponse {
    /// Leave the loop after this frame
    pub close_requested: bool,
    /// Switch the cursor presentation
    pub cursor_mode: Option<CursorMode>,
    /// Resize the viewport
    pub viewport: Option<(u32, u32)>,
}

impl InputResponse {
    fn merge(&mut self, other: InputResponse) {
        self.close_requested |= other.close_requested;
        self.cursor_mode = other.cursor_mode.or(self.cursor_mode);
        self.viewport = other.viewport.or(self.viewport);
    }
}

/// Maps input events to camera and overlay state changes
#[derive(Debug, Clone)]
pub struct InputDispatcher {
    first_mouse: bool,
    last_x: f64,
    last_y: f64,
    held: HashSet<KeyCode>,
}

impl InputDispatcher {
    /// Create a dispatcher that has not seen the cursor yet
    pub fn new() -> Self {
        Self {
            first_mouse: true,
            last_x: 0.0,
            last_y: 0.0,
            held: HashSet::new(),
        }
    }

    /// Whether `key` is currently down
    pub fn is_held(&self, key: KeyCode) -> bool {
        self.held.contains(&key)
    }

    /// Apply a batch of events in order
    pub fn dispatch_all<I>(&mut self, events: I, state: &mut ProgramState) -> InputResponse
    where
        I: IntoIterator<Item = InputEvent>,
    {
        let mut response = InputResponse::default();
        for event in events {
            response.merge(self.dispatch(event, state));
        }
        response
    }

    /// Apply one event
    pub fn dispatch(&mut self, event: InputEvent, state: &mut ProgramState) -> InputResponse {
        let mut response = InputResponse::default();
        match event {
            InputEvent::Key { key, action } => {
                match action {
                    KeyAction::Press | KeyAction::Repeat => {
                        self.held.insert(key);
                    }
                    KeyAction::Release => {
                        self.held.remove(&key);
                    }
                }
                if action == KeyAction::Press {
                    match key {
                        KeyCode::F1 => response.cursor_mode = Some(toggle_overlay(state)),
                        KeyCode::Escape => response.close_requested = true,
                        _ => {}
                    }
                }
            }
            InputEvent::CursorMoved { x, y } => self.cursor_moved(x, y, state),
            InputEvent::Scroll { y, .. } => state.camera.process_mouse_scroll(y as f32),
            InputEvent::FramebufferResized { width, height } => {
                log::debug!("Framebuffer resized to {}x{}", width, height);
                response.viewport = Some((width, height));
            }
            InputEvent::CloseRequested => response.close_requested = true,
            InputEvent::MouseButton { .. } | InputEvent::WindowResized { .. } => {}
        }
        response
    }

    /// Translate the camera for every held movement key
    pub fn apply_held_keys(&self, state: &mut ProgramState, delta_time: f32) {
        const BINDINGS: [(KeyCode, CameraMovement); 4] = [
            (KeyCode::W, CameraMovement::Forward),
            (KeyCode::S, CameraMovement::Backward),
            (KeyCode::A, CameraMovement::Left),
            (KeyCode::D, CameraMovement::Right),
        ];
        for (key, movement) in BINDINGS {
            if self.is_held(key) {
                state.camera.process_keyboard(movement, delta_time);
            }
        }
    }

    fn cursor_moved(&mut self, x: f64, y: f64, state: &mut ProgramState) {
        if self.first_mouse {
            self.last_x = x;
            self.last_y = y;
            self.first_mouse = false;
        }

        let x_offset = (x - self.last_x) as f32;
        let y_offset = (self.last_y - y) as f32;
        self.last_x = x;
        self.last_y = y;

        if state.camera_mouse_update_enabled {
            state.camera.process_mouse_movement(x_offset, y_offset);
        }
    }
}

impl Default for InputDispatcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Flip overlay visibility and return the cursor mode to switch to
///
/// Showing the overlay also stops mouse-look; hiding it does not restart
/// mouse-look, that is done from the overlay's checkbox.
fn toggle_overlay(state: &mut ProgramState) -> CursorMode {
    state.overlay_enabled = !state.overlay_enabled;
    if state.overlay_enabled {
        state.camera_mouse_update_enabled = false;
    }
    log::debug!("Overlay {}", if state.overlay_enabled { "shown" } else { "hidden" });
    CursorMode::for_overlay(state.overlay_enabled)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn press(key: KeyCode) -> InputEvent {
        InputEvent::Key { key, action: KeyAction::Press }
    }

    #[test]
    fn test_first_cursor_event_does_not_rotate() {
        let mut state = ProgramState::default();
        let before = state.camera.clone();
        let mut input = InputDispatcher::new();

        input.dispatch(InputEvent::CursorMoved { x: 5000.0, y: -3000.0 }, &mut state);
        assert_eq!(state.camera.yaw, before.yaw);
        assert_eq!(state.camera.pitch, before.pitch);

        input.dispatch(InputEvent::CursorMoved { x: 5010.0, y: -3020.0 }, &mut state);
        assert_relative_eq!(state.camera.yaw, before.yaw + 1.0, epsilon = 1e-4);
        assert_relative_eq!(state.camera.pitch, before.pitch + 2.0, epsilon = 1e-4);
    }

    #[test]
    fn test_f1_shows_overlay_and_stops_mouse_look() {
        let mut state = ProgramState::default();
        let mut input = InputDispatcher::new();

        let response = input.dispatch(press(KeyCode::F1), &mut state);
        assert!(state.overlay_enabled);
        assert!(!state.camera_mouse_update_enabled);
        assert_eq!(response.cursor_mode, Some(CursorMode::Free));

        let response = input.dispatch(press(KeyCode::F1), &mut state);
        assert!(!state.overlay_enabled);
        assert!(!state.camera_mouse_update_enabled);
        assert_eq!(response.cursor_mode, Some(CursorMode::Captured));
    }

    #[test]
    fn test_mouse_look_suppressed_but_position_tracked() {
        let mut state = ProgramState::default();
        state.camera_mouse_update_enabled = false;
        let mut input = InputDispatcher::new();

        input.dispatch(InputEvent::CursorMoved { x: 0.0, y: 0.0 }, &mut state);
        input.dispatch(InputEvent::CursorMoved { x: 300.0, y: 0.0 }, &mut state);
        assert_eq!(state.camera.yaw, crate::render::camera::DEFAULT_YAW);

        state.camera_mouse_update_enabled = true;
        input.dispatch(InputEvent::CursorMoved { x: 310.0, y: 0.0 }, &mut state);
        assert_relative_eq!(state.camera.yaw, crate::render::camera::DEFAULT_YAW + 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_escape_and_close_request() {
        let mut state = ProgramState::default();
        let mut input = InputDispatcher::new();
        let response = input.dispatch_all(
            [InputEvent::FramebufferResized { width: 1600, height: 1200 }, press(KeyCode::Escape)],
            &mut state,
        );
        assert!(response.close_requested);
        assert_eq!(response.viewport, Some((1600, 1200)));
        assert!(input.dispatch(InputEvent::CloseRequested, &mut state).close_requested);
    }

    #[test]
    fn test_held_keys_move_camera_each_frame() {
        let mut state = ProgramState::default();
        let mut input = InputDispatcher::new();
        input.dispatch(press(KeyCode::W), &mut state);

        input.apply_held_keys(&mut state, 0.4);
        input.apply_held_keys(&mut state, 0.4);
        assert_relative_eq!(state.camera.position.z, 3.0 - 2.0, epsilon = 1e-5);

        input.dispatch(InputEvent::Key { key: KeyCode::W, action: KeyAction::Release }, &mut state);
        input.apply_held_keys(&mut state, 1.0);
        assert_relative_eq!(state.camera.position.z, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_scroll_zooms() {
        let mut state = ProgramState::default();
        let mut input = InputDispatcher::new();
        input.dispatch(InputEvent::Scroll { x: 0.0, y: 3.0 }, &mut state);
        assert_eq!(state.camera.zoom, 42.0);
    }
}
