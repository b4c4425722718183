//! Window management using GLFW
//!
//! Creates the window together with an OpenGL 3.3 core context and turns
//! GLFW's queued window events into [`InputEvent`] records.

use glfw::Context;
use thiserror::Error;

use super::gl::GlDevice;
use super::device::DeviceResult;
use crate::config::WindowConfig;
use crate::input::{CursorMode, InputEvent, KeyAction, KeyCode, MouseButton};

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// GLFW could not be initialised
    #[error("GLFW initialization failed: {0}")]
    InitializationFailed(String),

    /// The window or its GL context could not be created
    #[error("Window creation failed")]
    CreationFailed,

    /// Any other GLFW failure
    #[error("GLFW error: {0}")]
    GlfwError(String),
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// GLFW window owning the current GL context
pub struct Window {
    glfw: glfw::Glfw,
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

impl Window {
    /// Create the window and make its context current on this thread
    pub fn new(config: &WindowConfig) -> WindowResult<Self> {
        let mut glfw = glfw::init(glfw::fail_on_errors)
            .map_err(|e| WindowError::InitializationFailed(e.to_string()))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(3, 3));
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(glfw::OpenGlProfileHint::Core));
        #[cfg(target_os = "macos")]
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));
        glfw.window_hint(glfw::WindowHint::Samples(Some(config.samples)));
        glfw.window_hint(glfw::WindowHint::Resizable(true));

        let (mut window, events) = glfw
            .create_window(config.width, config.height, &config.title, glfw::WindowMode::Windowed)
            .ok_or(WindowError::CreationFailed)?;

        window.make_current();
        glfw.set_swap_interval(glfw::SwapInterval::Sync(1));

        window.set_key_polling(true);
        window.set_cursor_pos_polling(true);
        window.set_mouse_button_polling(true);
        window.set_scroll_polling(true);
        window.set_size_polling(true);
        window.set_framebuffer_size_polling(true);
        window.set_close_polling(true);

        log::info!(
            "Created {}x{} window '{}' with {}x multisampling",
            config.width,
            config.height,
            config.title,
            config.samples
        );

        Ok(Self { glfw, window, events })
    }

    /// Load GL entry points through this window's context
    pub fn load_device(&mut self) -> DeviceResult<GlDevice> {
        let window = &mut self.window;
        GlDevice::load(|name| window.get_proc_address(name) as *const _)
    }

    /// Seconds since GLFW was initialised
    pub fn get_time(&self) -> f64 {
        self.glfw.get_time()
    }

    /// Whether a close has been requested
    pub fn should_close(&self) -> bool {
        self.window.should_close()
    }

    /// Request or cancel closing
    pub fn set_should_close(&mut self, should_close: bool) {
        self.window.set_should_close(should_close);
    }

    /// Framebuffer size in pixels, which may differ from the window size
    pub fn get_framebuffer_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_framebuffer_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// Window size in screen coordinates, the space cursor positions use
    pub fn get_window_size(&self) -> (u32, u32) {
        let (width, height) = self.window.get_size();
        (width.max(0) as u32, height.max(0) as u32)
    }

    /// Capture or release the cursor
    pub fn set_cursor_mode(&mut self, mode: CursorMode) {
        let glfw_mode = match mode {
            CursorMode::Captured => glfw::CursorMode::Disabled,
            CursorMode::Free => glfw::CursorMode::Normal,
        };
        self.window.set_cursor_mode(glfw_mode);
    }

    /// Present the back buffer
    pub fn swap_buffers(&mut self) {
        self.window.swap_buffers();
    }

    /// Process pending window system events
    pub fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    /// Drain queued events that the scene understands
    pub fn flush_events(&self) -> Vec<InputEvent> {
        glfw::flush_messages(&self.events)
            .filter_map(|(_, event)| translate_event(&event))
            .collect()
    }
}

/// Map a GLFW event to an input record, dropping events nothing reacts to
pub fn translate_event(event: &glfw::WindowEvent) -> Option<InputEvent> {
    match *event {
        glfw::WindowEvent::Key(key, _, action, _) => Some(InputEvent::Key {
            key: translate_key(key)?,
            action: translate_action(action),
        }),
        glfw::WindowEvent::CursorPos(x, y) => Some(InputEvent::CursorMoved { x, y }),
        glfw::WindowEvent::MouseButton(button, action, _) => Some(InputEvent::MouseButton {
            button: translate_mouse_button(button)?,
            pressed: action != glfw::Action::Release,
        }),
        glfw::WindowEvent::Scroll(x, y) => Some(InputEvent::Scroll { x, y }),
        glfw::WindowEvent::Size(width, height) => Some(InputEvent::WindowResized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }),
        glfw::WindowEvent::FramebufferSize(width, height) => Some(InputEvent::FramebufferResized {
            width: width.max(0) as u32,
            height: height.max(0) as u32,
        }),
        glfw::WindowEvent::Close => Some(InputEvent::CloseRequested),
        _ => None,
    }
}

fn translate_key(key: glfw::Key) -> Option<KeyCode> {
    match key {
        glfw::Key::W => Some(KeyCode::W),
        glfw::Key::A => Some(KeyCode::A),
        glfw::Key::S => Some(KeyCode::S),
        glfw::Key::D => Some(KeyCode::D),
        glfw::Key::Escape => Some(KeyCode::Escape),
        glfw::Key::F1 => Some(KeyCode::F1),
        _ => None,
    }
}

fn translate_action(action: glfw::Action) -> KeyAction {
    match action {
        glfw::Action::Press => KeyAction::Press,
        glfw::Action::Release => KeyAction::Release,
        glfw::Action::Repeat => KeyAction::Repeat,
    }
}

fn translate_mouse_button(button: glfw::MouseButton) -> Option<MouseButton> {
    match button {
        glfw::MouseButton::Button1 => Some(MouseButton::Left),
        glfw::MouseButton::Button2 => Some(MouseButton::Right),
        glfw::MouseButton::Button3 => Some(MouseButton::Middle),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_events_translate() {
        let event = glfw::WindowEvent::Key(glfw::Key::F1, 0, glfw::Action::Press, glfw::Modifiers::empty());
        assert_eq!(
            translate_event(&event),
            Some(InputEvent::Key { key: KeyCode::F1, action: KeyAction::Press })
        );

        let unbound = glfw::WindowEvent::Key(glfw::Key::Q, 0, glfw::Action::Press, glfw::Modifiers::empty());
        assert_eq!(translate_event(&unbound), None);
    }

    #[test]
    fn test_pointer_and_resize_events_translate() {
        assert_eq!(
            translate_event(&glfw::WindowEvent::CursorPos(12.5, 40.0)),
            Some(InputEvent::CursorMoved { x: 12.5, y: 40.0 })
        );
        assert_eq!(
            translate_event(&glfw::WindowEvent::FramebufferSize(1600, 1200)),
            Some(InputEvent::FramebufferResized { width: 1600, height: 1200 })
        );
        assert_eq!(
            translate_event(&glfw::WindowEvent::MouseButton(
                glfw::MouseButton::Button1,
                glfw::Action::Release,
                glfw::Modifiers::empty()
            )),
            Some(InputEvent::MouseButton { button: MouseButton::Left, pressed: false })
        );
        assert_eq!(
            translate_event(&glfw::WindowEvent::Size(800, 600)),
            Some(InputEvent::WindowResized { width: 800, height: 600 })
        );
        assert_eq!(translate_event(&glfw::WindowEvent::Close), Some(InputEvent::CloseRequested));
    }
}
