//! Text widget - labels and text display

use super::core::UIElement;
use crate::foundation::math::Vec4;

/// UI text label component
///
/// `element.position` is the left end of the baseline.
#[derive(Debug, Clone)]
pub struct UIText {
    /// Base element properties
    pub element: UIElement,

    /// Text content to display
    pub text: String,

    /// Text color (RGBA)
    pub color: Vec4,
}

impl UIText {
    /// White label with its baseline starting at (`x`, `y`)
    pub fn new(text: impl Into<String>, x: f32, y: f32) -> Self {
        Self {
            element: UIElement::at(x, y, 0.0, 0.0),
            text: text.into(),
            ..Self::default()
        }
    }
}

impl Default for UIText {
    fn default() -> Self {
        Self {
            element: UIElement::default(),
            text: String::new(),
            color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}
