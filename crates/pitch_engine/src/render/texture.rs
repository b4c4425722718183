//! Scene textures
//!
//! Load failures never abort startup. The texture object is still created,
//! just without storage, so the frame keeps drawing (incorrectly) and the
//! log names the missing file.

use std::path::{Path, PathBuf};

use super::device::{GraphicsDevice, TextureHandle};
use crate::assets::ImageData;
use crate::config::AssetConfig;

/// Load a 2D texture, falling back to an empty texture object
pub fn load_texture(device: &mut dyn GraphicsDevice, path: &Path) -> TextureHandle {
    match ImageData::from_file(path) {
        Ok(image) => device.create_texture_2d(Some(&image)),
        Err(e) => {
            log::warn!("Texture failed to load at path {}: {}", path.display(), e);
            device.create_texture_2d(None)
        }
    }
}

/// Load a cube map from faces in +X, -X, +Y, -Y, +Z, -Z order
///
/// Each face fails independently; the others are still uploaded.
pub fn load_cubemap(device: &mut dyn GraphicsDevice, faces: &[PathBuf; 6]) -> TextureHandle {
    let images: [Option<ImageData>; 6] = std::array::from_fn(|i| match ImageData::from_file(&faces[i]) {
        Ok(image) => Some(image),
        Err(e) => {
            log::warn!("Cubemap texture failed to load at path {}: {}", faces[i].display(), e);
            None
        }
    });
    device.create_cubemap(&images)
}

/// Every texture the fixed scene samples
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureSet {
    /// Grass billboard colour
    pub grass_diffuse: TextureHandle,
    /// Grass billboard specular mask
    pub grass_specular: TextureHandle,
    /// Ground plane colour
    pub plane: TextureHandle,
    /// Sky cube map, absent when the skybox is disabled
    pub skybox: Option<TextureHandle>,
}

impl TextureSet {
    /// Load all scene textures
    pub fn load(device: &mut dyn GraphicsDevice, assets: &AssetConfig, with_skybox: bool) -> Self {
        Self {
            grass_diffuse: load_texture(device, &assets.grass_diffuse),
            grass_specular: load_texture(device, &assets.grass_specular),
            plane: load_texture(device, &assets.plane_texture),
            skybox: with_skybox.then(|| load_cubemap(device, &assets.skybox_faces)),
        }
    }

    /// Release every texture
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        for texture in [self.grass_diffuse, self.grass_specular, self.plane]
            .into_iter()
            .chain(self.skybox)
        {
            device.delete_texture(texture);
        }
    }
}
