//! Overlay text: glyph atlas and layout

pub mod font_atlas;
pub mod text_layout;

pub use font_atlas::{FontAtlas, FontError, FontResult, GlyphInfo};
pub use text_layout::{TextLayout, TextVertex};
