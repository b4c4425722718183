//! Core UI widget primitives
//!
//! Shared types and structures used by all UI widgets.

/// Anchor point for UI positioning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// Top-left corner (0, 0) in screen space
    TopLeft,
    /// Top-right corner
    TopRight,
    /// Center of screen
    Center,
    /// Bottom-left corner
    BottomLeft,
    /// Bottom-right corner
    BottomRight,
}

impl Anchor {
    /// Get the normalized anchor position (0.0 to 1.0)
    pub fn to_normalized(self) -> (f32, f32) {
        match self {
            Anchor::TopLeft => (0.0, 0.0),
            Anchor::TopRight => (1.0, 0.0),
            Anchor::Center => (0.5, 0.5),
            Anchor::BottomLeft => (0.0, 1.0),
            Anchor::BottomRight => (1.0, 1.0),
        }
    }
}

/// Base UI element properties
#[derive(Debug, Clone, PartialEq)]
pub struct UIElement {
    /// Position in screen space (pixels from anchor point)
    pub position: (f32, f32),

    /// Size in pixels (width, height)
    pub size: (f32, f32),

    /// Anchor point for positioning
    pub anchor: Anchor,

    /// Whether this element is visible
    pub visible: bool,
}

impl UIElement {
    /// Top-left anchored element
    pub fn at(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            position: (x, y),
            size: (width, height),
            ..Self::default()
        }
    }
}

impl Default for UIElement {
    fn default() -> Self {
        Self {
            position: (0.0, 0.0),
            size: (100.0, 50.0),
            anchor: Anchor::TopLeft,
            visible: true,
        }
    }
}

/// Interaction state for visual feedback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    /// Normal resting state
    #[default]
    Normal,
    /// Mouse is hovering over the widget
    Hovered,
    /// Left button went down over the widget and is still held
    Pressed,
}
