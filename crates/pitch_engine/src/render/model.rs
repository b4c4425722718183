//! Loaded models
//!
//! A `Model` is an OBJ file uploaded as one indexed vertex array per
//! material group, plus the diffuse/specular maps its MTL library names.
//! Texture paths resolve relative to the OBJ file's directory and each
//! distinct file is uploaded once.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::device::{GraphicsDevice, TextureHandle, TextureTarget, VertexArrayHandle, VertexLayout};
use super::shader::{ShaderProgram, TextureKind};
use super::texture::load_texture;
use crate::assets::{AssetError, MtlData, MtlParser, ObjLoader, ObjModel};

/// One uploaded material group
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelMesh {
    /// Indexed vertex array
    pub vertex_array: VertexArrayHandle,
    /// Indices per draw
    pub index_count: u32,
    /// Material maps in binding order
    pub textures: Vec<(TextureKind, TextureHandle)>,
}

/// Uploaded OBJ model
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    meshes: Vec<ModelMesh>,
    textures: Vec<TextureHandle>,
}

impl Model {
    /// Load an OBJ file and upload it
    pub fn load(device: &mut dyn GraphicsDevice, path: &Path) -> Result<Self, AssetError> {
        let obj = ObjLoader::load(path)?;
        let directory = path.parent().map(Path::to_path_buf).unwrap_or_default();
        let materials = load_materials(&obj, &directory);
        Ok(Self::upload(device, &obj, &materials, &directory))
    }

    /// Load an OBJ file, or log and return a model that draws nothing
    pub fn load_or_empty(device: &mut dyn GraphicsDevice, path: &Path) -> Self {
        Self::load(device, path).unwrap_or_else(|e| {
            log::error!("Model failed to load at path {}: {}", path.display(), e);
            Self::default()
        })
    }

    /// Upload parsed meshes with their materials
    pub fn upload(
        device: &mut dyn GraphicsDevice,
        obj: &ObjModel,
        materials: &HashMap<String, MtlData>,
        directory: &Path,
    ) -> Self {
        let mut cache: HashMap<PathBuf, TextureHandle> = HashMap::new();
        let mut texture_for = |device: &mut dyn GraphicsDevice, file: &str| {
            let path = directory.join(file);
            *cache.entry(path.clone()).or_insert_with(|| load_texture(device, &path))
        };

        let meshes = obj
            .meshes
            .iter()
            .map(|mesh| {
                let mut textures = Vec::new();
                if let Some(material) = mesh.material.as_ref().and_then(|name| materials.get(name)) {
                    for file in &material.diffuse_maps {
                        textures.push((TextureKind::Diffuse, texture_for(device, file)));
                    }
                    for file in &material.specular_maps {
                        textures.push((TextureKind::Specular, texture_for(device, file)));
                    }
                }
                ModelMesh {
                    vertex_array: device.create_indexed_vertex_array(
                        &mesh.vertices,
                        &mesh.indices,
                        &VertexLayout::position_normal_uv(),
                    ),
                    index_count: mesh.indices.len() as u32,
                    textures,
                }
            })
            .collect();

        Self {
            meshes,
            textures: cache.into_values().collect(),
        }
    }

    /// Uploaded meshes
    pub fn meshes(&self) -> &[ModelMesh] {
        &self.meshes
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }

    /// Bind each mesh's maps through `program`'s naming scheme and draw it
    ///
    /// Maps occupy consecutive texture units from 0; the `n`-th map of a
    /// kind goes to that kind's `n`-th sampler. Unit 0 is active afterwards.
    pub fn draw(&self, device: &mut dyn GraphicsDevice, program: &ShaderProgram) {
        for mesh in &self.meshes {
            let mut diffuse_count = 0;
            let mut specular_count = 0;
            for (unit, &(kind, texture)) in mesh.textures.iter().enumerate() {
                let counter = match kind {
                    TextureKind::Diffuse => &mut diffuse_count,
                    TextureKind::Specular => &mut specular_count,
                };
                *counter += 1;

                device.active_texture(unit as u32);
                program.set_int(device, &program.naming().sampler_name(kind, *counter), unit as i32);
                device.bind_texture(TextureTarget::Texture2D, texture);
            }

            device.bind_vertex_array(mesh.vertex_array);
            device.draw_elements(mesh.index_count);
            device.active_texture(0);
        }
    }

    /// Release vertex arrays and textures
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        for mesh in self.meshes {
            device.delete_vertex_array(mesh.vertex_array);
        }
        for texture in self.textures {
            device.delete_texture(texture);
        }
    }
}

fn load_materials(obj: &ObjModel, directory: &Path) -> HashMap<String, MtlData> {
    let mut materials = HashMap::new();
    for library in &obj.material_libraries {
        let path = directory.join(library);
        let parsed = std::fs::read_to_string(&path)
            .map_err(|e| AssetError::io(&path, e))
            .and_then(|text| MtlParser::parse(&text));
        match parsed {
            Ok(found) => materials.extend(found),
            Err(e) => log::warn!("Material library {} unavailable: {}", path.display(), e),
        }
    }
    materials
}
