//! Font atlas for overlay text
//!
//! Rasterizes printable ASCII with `fontdue` and packs the glyphs into one
//! texture. Coverage goes to the alpha channel of an otherwise white RGBA
//! image so the text shader can tint it with any colour.

use std::collections::HashMap;
use std::path::Path;

use fontdue::{Font, FontSettings};

use crate::assets::ImageData;
use crate::foundation::math::Vec2;

/// Result type for font operations
pub type FontResult<T> = Result<T, FontError>;

/// Errors that can occur during font operations
#[derive(Debug, thiserror::Error)]
pub enum FontError {
    /// Failed to read the font file
    #[error("Failed to read font {path}: {source}")]
    Io {
        /// Path that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse font data
    #[error("Failed to load font: {0}")]
    LoadError(String),

    /// Requested character was not found in the font atlas
    #[error("Character '{0}' not found in atlas")]
    GlyphNotFound(char),
}

/// Information about a single glyph in the atlas
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphInfo {
    /// UV coordinates of the top-left corner (normalized 0.0-1.0)
    pub uv_min: Vec2,
    /// UV coordinates of the bottom-right corner (normalized 0.0-1.0)
    pub uv_max: Vec2,

    /// Glyph bitmap size in pixels
    pub size: Vec2,

    /// Horizontal advance for cursor positioning
    pub advance: f32,

    /// Offset of the bitmap's bottom-left corner from the pen position on
    /// the baseline (x right, y up)
    pub bearing: Vec2,
}

const ASCII_START: u8 = b' ';
const ASCII_END: u8 = b'~';
const GLYPHS_PER_ROW: u32 = 16;
const ATLAS_SIZE: u32 = 512;

/// Glyph texture plus metrics
#[derive(Debug, Clone)]
pub struct FontAtlas {
    font_size: f32,
    line_height: f32,
    glyph_cache: HashMap<char, GlyphInfo>,
    image: ImageData,
}

impl FontAtlas {
    /// Load a TrueType/OpenType font file and rasterize it at `font_size`
    pub fn load(path: impl AsRef<Path>, font_size: f32) -> FontResult<Self> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| FontError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_bytes(&bytes, font_size)
    }

    /// Rasterize printable ASCII from raw font bytes
    pub fn from_bytes(font_data: &[u8], font_size: f32) -> FontResult<Self> {
        let font = Font::from_bytes(font_data, FontSettings::default())
            .map_err(|e| FontError::LoadError(format!("fontdue error: {}", e)))?;

        let rasterized: Vec<_> = (ASCII_START..=ASCII_END)
            .map(char::from)
            .map(|ch| {
                let (metrics, bitmap) = font.rasterize(ch, font_size);
                (ch, metrics, bitmap)
            })
            .collect();

        let max_glyph_height = rasterized.iter().map(|(_, m, _)| m.height).max().unwrap_or(0) as u32;
        let cell_width = ATLAS_SIZE / GLYPHS_PER_ROW;
        let cell_height = (max_glyph_height * 3) / 2 + 1;

        let mut coverage = vec![0u8; (ATLAS_SIZE * ATLAS_SIZE) as usize];
        let mut glyph_cache = HashMap::with_capacity(rasterized.len());

        for (i, (ch, metrics, bitmap)) in rasterized.into_iter().enumerate() {
            let cell_x = (i as u32 % GLYPHS_PER_ROW) * cell_width;
            let cell_y = (i as u32 / GLYPHS_PER_ROW) * cell_height;

            for y in 0..metrics.height {
                for x in 0..metrics.width {
                    let dst_x = cell_x + x as u32;
                    let dst_y = cell_y + y as u32;
                    if dst_x < ATLAS_SIZE && dst_y < ATLAS_SIZE {
                        coverage[(dst_y * ATLAS_SIZE + dst_x) as usize] = bitmap[y * metrics.width + x];
                    }
                }
            }

            let atlas = ATLAS_SIZE as f32;
            glyph_cache.insert(
                ch,
                GlyphInfo {
                    uv_min: Vec2::new(cell_x as f32 / atlas, cell_y as f32 / atlas),
                    uv_max: Vec2::new(
                        (cell_x + metrics.width as u32) as f32 / atlas,
                        (cell_y + metrics.height as u32) as f32 / atlas,
                    ),
                    size: Vec2::new(metrics.width as f32, metrics.height as f32),
                    advance: metrics.advance_width,
                    bearing: Vec2::new(metrics.xmin as f32, metrics.ymin as f32),
                },
            );
        }

        let line_height = font
            .horizontal_line_metrics(font_size)
            .map_or(font_size * 1.2, |m| m.new_line_size);

        log::info!(
            "Font atlas packed: {}x{}, {} glyphs at {}px",
            ATLAS_SIZE,
            ATLAS_SIZE,
            glyph_cache.len(),
            font_size
        );

        Ok(Self::from_glyphs(font_size, line_height, glyph_cache, coverage_to_rgba(&coverage, ATLAS_SIZE)))
    }

    /// Build an atlas from already-packed glyph metrics and texture
    pub fn from_glyphs(font_size: f32, line_height: f32, glyphs: HashMap<char, GlyphInfo>, image: ImageData) -> Self {
        Self {
            font_size,
            line_height,
            glyph_cache: glyphs,
            image,
        }
    }

    /// Get glyph information for a character
    pub fn get_glyph(&self, ch: char) -> FontResult<&GlyphInfo> {
        self.glyph_cache.get(&ch).ok_or(FontError::GlyphNotFound(ch))
    }

    /// Get the font size in pixels
    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    /// Distance between baselines
    pub fn line_height(&self) -> f32 {
        self.line_height
    }

    /// Atlas texture
    pub fn image(&self) -> &ImageData {
        &self.image
    }

    /// Number of cached glyphs
    pub fn glyph_count(&self) -> usize {
        self.glyph_cache.len()
    }
}

fn coverage_to_rgba(coverage: &[u8], size: u32) -> ImageData {
    let data = coverage.iter().flat_map(|&alpha| [255, 255, 255, alpha]).collect();
    ImageData {
        data,
        width: size,
        height: size,
        channels: 4,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_font_bytes_fail() {
        let result = FontAtlas::from_bytes(b"definitely not a font", 16.0);
        assert!(matches!(result, Err(FontError::LoadError(_))));
    }

    #[test]
    fn test_missing_font_file_reports_path() {
        let err = FontAtlas::load("no/such/font.ttf", 16.0).unwrap_err();
        assert!(err.to_string().contains("no/such/font.ttf"));
    }

    #[test]
    fn test_coverage_goes_to_alpha() {
        let image = coverage_to_rgba(&[0, 128, 255, 7], 2);
        assert_eq!(image.channels, 4);
        assert_eq!(&image.data[4..8], &[255, 255, 255, 128]);
        assert_eq!(image.data.len(), 16);
    }

    #[test]
    fn test_unknown_glyph_is_reported() {
        let atlas = FontAtlas::from_glyphs(16.0, 19.0, HashMap::new(), ImageData::solid_color(1, 1, [0; 4]));
        assert!(matches!(atlas.get_glyph('x'), Err(FontError::GlyphNotFound('x'))));
    }
}
