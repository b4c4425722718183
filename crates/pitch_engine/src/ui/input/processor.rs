//! UI Input Processing
//!
//! Handles overlay-specific input separate from rendering. The renderer only
//! draws widgets in their current state; this module decides that state.

use crate::input::MouseButton;
use crate::ui::widgets::{UICheckbox, UILayout, UISlider, WidgetState};

/// UI input processor
///
/// Tracks the cursor and the left button across a frame. Press/release
/// edges stay set until [`UIInputProcessor::reset_frame_flags`] so that a
/// click delivered between frames is seen by every widget once.
#[derive(Debug, Clone)]
pub struct UIInputProcessor {
    /// Current mouse position in screen coordinates
    mouse_x: f32,
    mouse_y: f32,

    /// Mouse button states
    left_button_down: bool,
    left_button_pressed_this_frame: bool,
    left_button_released_this_frame: bool,

    /// Screen dimensions for coordinate calculations
    screen_width: f32,
    screen_height: f32,
}

impl UIInputProcessor {
    /// Create a new UI input processor
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            mouse_x: 0.0,
            mouse_y: 0.0,
            left_button_down: false,
            left_button_pressed_this_frame: false,
            left_button_released_this_frame: false,
            screen_width,
            screen_height,
        }
    }

    /// Update screen dimensions (call when window resizes)
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;
    }

    /// Update mouse position
    pub fn update_mouse_position(&mut self, x: f32, y: f32) {
        self.mouse_x = x;
        self.mouse_y = y;
    }

    /// Update mouse button state
    pub fn update_mouse_button(&mut self, button: MouseButton, pressed: bool) {
        if button == MouseButton::Left {
            let was_down = self.left_button_down;
            self.left_button_down = pressed;

            if !was_down && pressed {
                self.left_button_pressed_this_frame = true;
            }
            if was_down && !pressed {
                self.left_button_released_this_frame = true;
            }
        }
    }

    /// Reset per-frame input flags (call after processing all widgets)
    pub fn reset_frame_flags(&mut self) {
        self.left_button_pressed_this_frame = false;
        self.left_button_released_this_frame = false;
    }

    /// Get current mouse position
    pub fn mouse_position(&self) -> (f32, f32) {
        (self.mouse_x, self.mouse_y)
    }

    fn hovers(&self, element: &crate::ui::widgets::UIElement) -> bool {
        UILayout::contains_point(element, self.screen_width, self.screen_height, self.mouse_x, self.mouse_y)
    }

    /// Process input for a checkbox, updating its state
    ///
    /// # Returns
    /// `true` when the checkbox was toggled: the left button was pressed
    /// over it and released over it.
    pub fn process_checkbox(&self, checkbox: &mut UICheckbox) -> bool {
        if !checkbox.element.visible {
            checkbox.state = WidgetState::Normal;
            return false;
        }

        let is_hovered = self.hovers(&checkbox.element);
        let old_state = checkbox.state;
        let mut toggled = false;

        if !is_hovered {
            checkbox.state = WidgetState::Normal;
        } else if self.left_button_down {
            if self.left_button_pressed_this_frame || old_state == WidgetState::Pressed {
                checkbox.state = WidgetState::Pressed;
            }
        } else {
            if self.left_button_released_this_frame && old_state == WidgetState::Pressed {
                checkbox.checked = !checkbox.checked;
                toggled = true;
            }
            checkbox.state = WidgetState::Hovered;
        }

        toggled
    }

    /// Process input for a slider, updating its state and value
    ///
    /// A drag starts with a press over the track and follows the cursor
    /// horizontally until release, even outside the track.
    ///
    /// # Returns
    /// `true` when the value changed
    pub fn process_slider(&self, slider: &mut UISlider) -> bool {
        if !slider.element.visible {
            slider.state = WidgetState::Normal;
            return false;
        }

        let is_hovered = self.hovers(&slider.element);
        if slider.state == WidgetState::Pressed {
            if !self.left_button_down {
                slider.state = if is_hovered { WidgetState::Hovered } else { WidgetState::Normal };
                return false;
            }
        } else if is_hovered && self.left_button_pressed_this_frame {
            slider.state = WidgetState::Pressed;
        } else {
            slider.state = if is_hovered { WidgetState::Hovered } else { WidgetState::Normal };
            return false;
        }

        let (min_x, _, max_x, _) = UILayout::calculate_bounds(&slider.element, self.screen_width, self.screen_height);
        let width = (max_x - min_x).max(f32::EPSILON);
        let before = slider.value;
        slider.set_fraction((self.mouse_x - min_x) / width);
        slider.value != before
    }
}
