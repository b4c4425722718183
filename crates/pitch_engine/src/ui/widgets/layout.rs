//! UI layout calculations
//!
//! Converts UI component data to screen-space coordinates for rendering and
//! hit testing. Screen space has its origin at the top-left and Y growing
//! downward; NDC follows the GL convention with Y growing upward.

use crate::foundation::math::Vec2;
use crate::ui::widgets::UIElement;

/// Layout calculator for UI elements
pub struct UILayout;

impl UILayout {
    /// Calculate screen position from element properties
    ///
    /// # Returns
    /// Screen position in pixels (top-left origin)
    pub fn calculate_position(element: &UIElement, screen_width: f32, screen_height: f32) -> Vec2 {
        let (anchor_x, anchor_y) = element.anchor.to_normalized();
        Vec2::new(
            anchor_x * screen_width + element.position.0,
            anchor_y * screen_height + element.position.1,
        )
    }

    /// Calculate bounding box for an element
    ///
    /// # Returns
    /// (min_x, min_y, max_x, max_y) in screen pixels
    pub fn calculate_bounds(element: &UIElement, screen_width: f32, screen_height: f32) -> (f32, f32, f32, f32) {
        let pos = Self::calculate_position(element, screen_width, screen_height);
        (pos.x, pos.y, pos.x + element.size.0, pos.y + element.size.1)
    }

    /// Check if a point is inside a visible element's bounds
    pub fn contains_point(
        element: &UIElement,
        screen_width: f32,
        screen_height: f32,
        point_x: f32,
        point_y: f32,
    ) -> bool {
        if !element.visible {
            return false;
        }
        let (min_x, min_y, max_x, max_y) = Self::calculate_bounds(element, screen_width, screen_height);
        point_x >= min_x && point_x <= max_x && point_y >= min_y && point_y <= max_y
    }

    /// Convert screen coordinates to normalized device coordinates (NDC)
    /// NDC range: [-1, 1] where (0, 0) is center and +Y is up
    pub fn screen_to_ndc(screen_x: f32, screen_y: f32, screen_width: f32, screen_height: f32) -> (f32, f32) {
        let ndc_x = (screen_x / screen_width) * 2.0 - 1.0;
        let ndc_y = 1.0 - (screen_y / screen_height) * 2.0;
        (ndc_x, ndc_y)
    }
}
