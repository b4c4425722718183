//! UI widgets module
//!
//! Contains all UI widget types (panels, text, checkboxes, sliders)

pub mod core;
pub mod panel;
pub mod text;
pub mod checkbox;
pub mod slider;
pub mod layout;

// Re-export core types
pub use core::{Anchor, UIElement, WidgetState};

// Re-export widget types
pub use panel::{UIPanel, TITLE_BAR_HEIGHT};
pub use text::UIText;
pub use checkbox::{UICheckbox, CHECKBOX_SIZE, CHECKBOX_LABEL_GAP};
pub use slider::{UISlider, SLIDER_GRAB_WIDTH};
pub use layout::UILayout;
