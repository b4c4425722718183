//! Image loading utilities for texture data
//!
//! Decodes PNG and JPEG files while keeping the source channel layout, so
//! the uploader can pick a matching pixel format (RED, RGB or RGBA).

use std::path::Path;

use image::{ColorType, DynamicImage};

use crate::assets::AssetError;

/// Decoded 8-bit image ready for GPU upload
#[derive(Debug, Clone, PartialEq)]
pub struct ImageData {
    /// Tightly packed rows, top row first
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Channels per pixel: 1, 3 or 4
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();
        log::debug!("Loading image from: {:?}", path_ref);

        if !path_ref.exists() {
            return Err(AssetError::NotFound(path_ref.display().to_string()));
        }

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;
        let data = Self::from_dynamic(img);

        log::info!(
            "Loaded image {}x{} ({} channels) from {:?}",
            data.width, data.height, data.channels, path_ref
        );
        Ok(data)
    }

    /// Decode an in-memory image
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes)
            .map_err(|e| AssetError::LoadFailed(format!("Failed to load image from bytes: {}", e)))?;
        Ok(Self::from_dynamic(img))
    }

    /// Normalise to 8 bits per channel, keeping 1, 3 or 4 channels
    fn from_dynamic(img: DynamicImage) -> Self {
        let (width, height) = (img.width(), img.height());
        let (data, channels) = match img.color() {
            ColorType::L8 | ColorType::L16 => (img.to_luma8().into_raw(), 1),
            color if color.has_alpha() => (img.to_rgba8().into_raw(), 4),
            _ => (img.to_rgb8().into_raw(), 3),
        };
        Self {
            data,
            width,
            height,
            channels,
        }
    }

    /// Create a solid colour RGBA image
    pub fn solid_color(width: u32, height: u32, color: [u8; 4]) -> Self {
        let pixel_count = (width * height) as usize;
        Self {
            data: color.repeat(pixel_count),
            width,
            height,
            channels: 4,
        }
    }

    /// Size of the pixel data in bytes
    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }

    /// Whether the image carries an alpha channel
    pub fn has_alpha(&self) -> bool {
        self.channels == 4
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(img: DynamicImage) -> Vec<u8> {
        let mut bytes = std::io::Cursor::new(Vec::new());
        img.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.channels, 4);
        assert_eq!(img.size_bytes(), 4 * 4 * 4);
        assert_eq!(&img.data[0..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_channel_count_is_preserved() {
        let gray = encode_png(DynamicImage::new_luma8(2, 3));
        let rgb = encode_png(DynamicImage::new_rgb8(2, 3));
        let rgba = encode_png(DynamicImage::new_rgba8(2, 3));

        assert_eq!(ImageData::from_bytes(&gray).unwrap().channels, 1);
        assert_eq!(ImageData::from_bytes(&rgb).unwrap().channels, 3);

        let decoded = ImageData::from_bytes(&rgba).unwrap();
        assert_eq!(decoded.channels, 4);
        assert_eq!(decoded.size_bytes(), 2 * 3 * 4);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let err = ImageData::from_file("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, AssetError::NotFound(_)));
    }
}
