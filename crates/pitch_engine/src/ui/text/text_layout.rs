//! Text layout engine
//!
//! Converts strings into positioned glyph quads in screen space (origin at
//! the pen position on the baseline, +X right, +Y down).

use super::{FontAtlas, GlyphInfo};
use crate::foundation::math::Vec2;

/// Vertex data for text rendering
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextVertex {
    /// Position relative to the baseline origin, in pixels
    pub position: Vec2,
    /// UV texture coordinates
    pub uv: Vec2,
}

/// Text layout engine that converts strings to quad geometry
pub struct TextLayout<'a> {
    font_atlas: &'a FontAtlas,
}

impl<'a> TextLayout<'a> {
    /// Create a new text layout engine
    pub fn new(font_atlas: &'a FontAtlas) -> Self {
        Self { font_atlas }
    }

    /// Convert a text string into positioned quads
    ///
    /// Returns (vertices, indices) for rendering as triangles. Each glyph
    /// generates 4 vertices and 6 indices; characters missing from the
    /// atlas advance by the width of a space.
    pub fn layout_text(&self, text: &str) -> (Vec<TextVertex>, Vec<u32>) {
        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        let mut cursor_x = 0.0f32;

        for ch in text.chars() {
            let Ok(glyph) = self.font_atlas.get_glyph(ch) else {
                cursor_x += self.space_advance();
                continue;
            };

            if glyph.size.x > 0.0 && glyph.size.y > 0.0 {
                let base_index = vertices.len() as u32;
                vertices.extend_from_slice(&Self::glyph_quad(cursor_x, glyph));
                indices.extend_from_slice(&[
                    base_index,
                    base_index + 1,
                    base_index + 2,
                    base_index,
                    base_index + 2,
                    base_index + 3,
                ]);
            }

            cursor_x += glyph.advance;
        }

        (vertices, indices)
    }

    /// Horizontal extent of `text` in pixels
    pub fn measure(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| self.font_atlas.get_glyph(ch).map_or_else(|_| self.space_advance(), |g| g.advance))
            .sum()
    }

    fn space_advance(&self) -> f32 {
        self.font_atlas.get_glyph(' ').map_or(0.0, |g| g.advance)
    }

    /// Quad corners: top-left, top-right, bottom-right, bottom-left
    fn glyph_quad(cursor_x: f32, glyph: &GlyphInfo) -> [TextVertex; 4] {
        let left = cursor_x + glyph.bearing.x;
        let right = left + glyph.size.x;
        let bottom = -glyph.bearing.y;
        let top = bottom - glyph.size.y;

        [
            TextVertex { position: Vec2::new(left, top), uv: glyph.uv_min },
            TextVertex { position: Vec2::new(right, top), uv: Vec2::new(glyph.uv_max.x, glyph.uv_min.y) },
            TextVertex { position: Vec2::new(right, bottom), uv: glyph.uv_max },
            TextVertex { position: Vec2::new(left, bottom), uv: Vec2::new(glyph.uv_min.x, glyph.uv_max.y) },
        ]
    }
}
