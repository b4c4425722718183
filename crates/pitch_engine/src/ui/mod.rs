//! Debug overlay UI
//!
//! Widgets, input processing, text and batching for the in-game overlay.
//! Nothing here calls GL; drawing goes through [`UIRenderBackend`].

pub mod backend;
pub mod input;
pub mod overlay;
pub mod rendering;
pub mod text;
pub mod widgets;

pub use backend::{FontAtlasHandle, UIRenderBackend};
pub use input::UIInputProcessor;
pub use overlay::{camera_info_lines, DebugOverlay, OverlayWindow};
pub use rendering::UIRenderer;
pub use text::{FontAtlas, FontError};
