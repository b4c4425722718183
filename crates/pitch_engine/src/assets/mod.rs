//! Asset loading
//!
//! Decoders for the files the scene reads at startup: images through the
//! `image` crate, Wavefront OBJ meshes and their MTL material libraries.
//! Nothing here touches the GPU; the render module uploads the results.

pub mod image_loader;
pub mod mtl_parser;
pub mod obj_loader;

pub use image_loader::ImageData;
pub use mtl_parser::{MtlData, MtlParser};
pub use obj_loader::{ObjLoader, ObjMesh, ObjModel};

use thiserror::Error;

/// Asset loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// Asset not found
    #[error("Asset not found: {0}")]
    NotFound(String),

    /// File could not be read
    #[error("Failed to read {path}: {source}")]
    Io {
        /// Offending path
        path: String,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Failed to load asset
    #[error("Failed to load asset: {0}")]
    LoadFailed(String),

    /// Invalid asset data
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Unsupported asset format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

impl AssetError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            AssetError::NotFound(path.display().to_string())
        } else {
            AssetError::Io {
                path: path.display().to_string(),
                source,
            }
        }
    }
}
