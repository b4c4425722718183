//! Panel widget - titled rectangular backgrounds

use super::core::UIElement;
use crate::foundation::math::Vec4;

/// Height of the title bar in pixels
pub const TITLE_BAR_HEIGHT: f32 = 20.0;

/// UI panel component - a coloured window background with a title bar
#[derive(Debug, Clone)]
pub struct UIPanel {
    /// Base element properties
    pub element: UIElement,

    /// Title shown in the title bar
    pub title: String,

    /// Background color (RGBA)
    pub color: Vec4,

    /// Title bar color (RGBA)
    pub title_bar_color: Vec4,

    /// Title text color (RGBA)
    pub title_color: Vec4,
}

impl Default for UIPanel {
    fn default() -> Self {
        Self {
            element: UIElement::default(),
            title: String::new(),
            color: Vec4::new(0.06, 0.06, 0.06, 0.94),
            title_bar_color: Vec4::new(0.16, 0.29, 0.48, 1.0),
            title_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}
