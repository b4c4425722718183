//! Slider widget - drag a value across a range

use super::core::{UIElement, WidgetState};
use crate::foundation::math::Vec4;

/// Width of the grab handle in pixels
pub const SLIDER_GRAB_WIDTH: f32 = 8.0;

/// UI slider component
///
/// `element` is the track; the label and value are drawn to its right.
#[derive(Debug, Clone)]
pub struct UISlider {
    /// Base element properties
    pub element: UIElement,

    /// Label drawn after the value
    pub label: String,

    /// Current value, always within `min..=max`
    pub value: f32,
    /// Lower bound
    pub min: f32,
    /// Upper bound
    pub max: f32,

    /// Current interaction state; `Pressed` while dragging
    pub state: WidgetState,

    /// Track color
    pub track_color: Vec4,
    /// Grab handle color
    pub grab_color: Vec4,
    /// Label color
    pub text_color: Vec4,
}

impl UISlider {
    /// Slider over `min..=max` whose track sits at (`x`, `y`)
    pub fn new(label: impl Into<String>, min: f32, max: f32, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            element: UIElement::at(x, y, width, height),
            label: label.into(),
            value: min,
            min,
            max,
            ..Self::default()
        }
    }

    /// Set the value, clamped to the range
    pub fn set_value(&mut self, value: f32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Position of the value within the range, 0 at `min` and 1 at `max`
    pub fn fraction(&self) -> f32 {
        let span = self.max - self.min;
        if span <= 0.0 {
            0.0
        } else {
            ((self.value - self.min) / span).clamp(0.0, 1.0)
        }
    }

    /// Set the value from a position within the range
    pub fn set_fraction(&mut self, fraction: f32) {
        self.value = self.min + fraction.clamp(0.0, 1.0) * (self.max - self.min);
    }

    /// Text drawn beside the track
    pub fn caption(&self) -> String {
        format!("{:.3} {}", self.value, self.label)
    }
}

impl Default for UISlider {
    fn default() -> Self {
        Self {
            element: UIElement::at(0.0, 0.0, 200.0, 14.0),
            label: String::new(),
            value: 0.0,
            min: 0.0,
            max: 1.0,
            state: WidgetState::Normal,
            track_color: Vec4::new(0.16, 0.29, 0.48, 0.54),
            grab_color: Vec4::new(0.26, 0.59, 0.98, 1.0),
            text_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_maps_range() {
        let mut slider = UISlider::new("constant", 0.0, 2.0, 0.0, 0.0, 200.0, 14.0);
        slider.set_value(1.5);
        assert!((slider.fraction() - 0.75).abs() < 1e-6);

        slider.set_fraction(0.25);
        assert!((slider.value - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_value_is_clamped() {
        let mut slider = UISlider::new("linear", 0.0, 1.0, 0.0, 0.0, 200.0, 14.0);
        slider.set_value(3.0);
        assert_eq!(slider.value, 1.0);
        slider.set_fraction(-1.0);
        assert_eq!(slider.value, 0.0);
    }
}
