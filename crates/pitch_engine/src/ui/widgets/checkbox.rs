//! Checkbox widget - a labelled boolean toggle

use super::core::{UIElement, WidgetState};
use crate::foundation::math::Vec4;

/// Side of the square box in pixels
pub const CHECKBOX_SIZE: f32 = 14.0;

/// Gap between the box and its label
pub const CHECKBOX_LABEL_GAP: f32 = 6.0;

/// UI checkbox component
///
/// `element` covers the box and the label; clicking anywhere on it toggles.
#[derive(Debug, Clone)]
pub struct UICheckbox {
    /// Base element properties
    pub element: UIElement,

    /// Label drawn to the right of the box
    pub label: String,

    /// Current value
    pub checked: bool,

    /// Current interaction state
    pub state: WidgetState,

    /// Box color at rest
    pub box_color: Vec4,
    /// Box color while hovered or pressed
    pub hover_color: Vec4,
    /// Check mark color
    pub check_color: Vec4,
    /// Label color
    pub text_color: Vec4,
}

impl UICheckbox {
    /// Checkbox whose box sits at (`x`, `y`)
    pub fn new(label: impl Into<String>, x: f32, y: f32, width: f32) -> Self {
        Self {
            element: UIElement::at(x, y, width, CHECKBOX_SIZE),
            label: label.into(),
            ..Self::default()
        }
    }

    /// Box color for the current state
    pub fn current_box_color(&self) -> Vec4 {
        match self.state {
            WidgetState::Normal => self.box_color,
            WidgetState::Hovered | WidgetState::Pressed => self.hover_color,
        }
    }
}

impl Default for UICheckbox {
    fn default() -> Self {
        Self {
            element: UIElement::at(0.0, 0.0, 160.0, CHECKBOX_SIZE),
            label: String::new(),
            checked: false,
            state: WidgetState::Normal,
            box_color: Vec4::new(0.16, 0.29, 0.48, 0.54),
            hover_color: Vec4::new(0.26, 0.59, 0.98, 0.40),
            check_color: Vec4::new(0.26, 0.59, 0.98, 1.0),
            text_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}
