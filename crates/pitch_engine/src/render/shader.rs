//! Shader programs
//!
//! A `ShaderProgram` is a linked program plus the small vocabulary of named
//! uniform uploads the scene needs. Material sampler names differ between
//! the lit shaders, so each program carries its own [`MaterialNaming`].

use serde::{Deserialize, Serialize};

use super::device::{DeviceError, DeviceResult, GraphicsDevice, ProgramHandle, UniformValue};
use super::lighting::{DirLight, LightingRig, PointLight, SpotLight};
use crate::config::ShaderSources;
use crate::foundation::math::{Mat4, Vec3};

/// Texture slot within a material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TextureKind {
    /// Base colour map, texture unit 0 for hand-built materials
    Diffuse,
    /// Specular intensity map, texture unit 1 for hand-built materials
    Specular,
}

impl TextureKind {
    /// Fixed texture unit used when a single map of this kind is bound
    pub fn default_unit(self) -> u32 {
        match self {
            TextureKind::Diffuse => 0,
            TextureKind::Specular => 1,
        }
    }
}

/// How a program names its material samplers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialNaming {
    /// `material.texture_diffuse1`, `material.texture_specular1`, ...
    #[default]
    Indexed,
    /// `material.diffuse`, `material.specular`
    Plain,
}

impl MaterialNaming {
    /// Uniform name of the `index`-th (1-based) sampler of `kind`
    ///
    /// The plain scheme only has one sampler per kind; later indices get a
    /// numeric suffix so they stay distinct.
    pub fn sampler_name(self, kind: TextureKind, index: usize) -> String {
        let stem = match kind {
            TextureKind::Diffuse => "diffuse",
            TextureKind::Specular => "specular",
        };
        match self {
            MaterialNaming::Indexed => format!("material.texture_{stem}{index}"),
            MaterialNaming::Plain if index <= 1 => format!("material.{stem}"),
            MaterialNaming::Plain => format!("material.{stem}{index}"),
        }
    }
}

/// Linked program with named uniform helpers
#[derive(Debug, Clone)]
pub struct ShaderProgram {
    handle: ProgramHandle,
    name: String,
    naming: MaterialNaming,
}

impl ShaderProgram {
    /// Wrap an already linked program
    pub fn new(handle: ProgramHandle, name: impl Into<String>, naming: MaterialNaming) -> Self {
        Self {
            handle,
            name: name.into(),
            naming,
        }
    }

    /// Read, compile and link the program described by `sources`
    pub fn load(
        device: &mut dyn GraphicsDevice,
        name: &str,
        sources: &ShaderSources,
        naming: MaterialNaming,
    ) -> DeviceResult<Self> {
        let read = |path: &std::path::Path| {
            std::fs::read_to_string(path).map_err(|source| DeviceError::ShaderSource {
                path: path.display().to_string(),
                source,
            })
        };
        let vertex = read(&sources.vertex)?;
        let fragment = read(&sources.fragment)?;

        let handle = device.create_program(name, &vertex, &fragment)?;
        log::debug!("Linked program '{}' from {}", name, sources.vertex.display());
        Ok(Self::new(handle, name, naming))
    }

    /// Device handle
    pub fn handle(&self) -> ProgramHandle {
        self.handle
    }

    /// Program name used in diagnostics
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sampler naming scheme
    pub fn naming(&self) -> MaterialNaming {
        self.naming
    }

    /// Make this program current
    pub fn activate(&self, device: &mut dyn GraphicsDevice) {
        device.use_program(self.handle);
    }

    /// Upload an `int` (or sampler unit)
    pub fn set_int(&self, device: &mut dyn GraphicsDevice, name: &str, value: i32) {
        device.set_uniform(self.handle, name, UniformValue::Int(value));
    }

    /// Upload a `float`
    pub fn set_float(&self, device: &mut dyn GraphicsDevice, name: &str, value: f32) {
        device.set_uniform(self.handle, name, UniformValue::Float(value));
    }

    /// Upload a `vec3`
    pub fn set_vec3(&self, device: &mut dyn GraphicsDevice, name: &str, value: Vec3) {
        device.set_uniform(self.handle, name, UniformValue::Vec3(value));
    }

    /// Upload a `mat4`
    pub fn set_mat4(&self, device: &mut dyn GraphicsDevice, name: &str, value: &Mat4) {
        device.set_uniform(self.handle, name, UniformValue::Mat4(*value));
    }

    /// `view`
    pub fn set_view(&self, device: &mut dyn GraphicsDevice, view: &Mat4) {
        self.set_mat4(device, "view", view);
    }

    /// `projection`
    pub fn set_projection(&self, device: &mut dyn GraphicsDevice, projection: &Mat4) {
        self.set_mat4(device, "projection", projection);
    }

    /// `model`
    pub fn set_model(&self, device: &mut dyn GraphicsDevice, model: &Mat4) {
        self.set_mat4(device, "model", model);
    }

    /// `viewPosition`
    pub fn bind_camera_position(&self, device: &mut dyn GraphicsDevice, position: Vec3) {
        self.set_vec3(device, "viewPosition", position);
    }

    /// `material.shininess`
    pub fn bind_shininess(&self, device: &mut dyn GraphicsDevice, shininess: f32) {
        self.set_float(device, "material.shininess", shininess);
    }

    /// Point the first diffuse and specular samplers at units 0 and 1
    pub fn bind_material_samplers(&self, device: &mut dyn GraphicsDevice) {
        for kind in [TextureKind::Diffuse, TextureKind::Specular] {
            let name = self.naming.sampler_name(kind, 1);
            self.set_int(device, &name, kind.default_unit() as i32);
        }
    }

    /// `dirLight.*`
    pub fn bind_dir_light(&self, device: &mut dyn GraphicsDevice, light: &DirLight) {
        self.set_vec3(device, "dirLight.direction", light.direction);
        self.set_vec3(device, "dirLight.ambient", light.ambient);
        self.set_vec3(device, "dirLight.diffuse", light.diffuse);
        self.set_vec3(device, "dirLight.specular", light.specular);
    }

    /// `pointLight.*`
    pub fn bind_point_light(&self, device: &mut dyn GraphicsDevice, light: &PointLight) {
        self.set_vec3(device, "pointLight.position", light.position);
        self.set_vec3(device, "pointLight.ambient", light.ambient);
        self.set_vec3(device, "pointLight.diffuse", light.diffuse);
        self.set_vec3(device, "pointLight.specular", light.specular);
        self.set_float(device, "pointLight.constant", light.constant);
        self.set_float(device, "pointLight.linear", light.linear);
        self.set_float(device, "pointLight.quadratic", light.quadratic);
    }

    /// `spotLight.*`
    pub fn bind_spot_light(&self, device: &mut dyn GraphicsDevice, light: &SpotLight) {
        self.set_vec3(device, "spotLight.position", light.position);
        self.set_vec3(device, "spotLight.direction", light.direction);
        self.set_float(device, "spotLight.cutOff", light.cut_off);
        self.set_float(device, "spotLight.outerCutOff", light.outer_cut_off);
        self.set_vec3(device, "spotLight.ambient", light.ambient);
        self.set_vec3(device, "spotLight.diffuse", light.diffuse);
        self.set_vec3(device, "spotLight.specular", light.specular);
        self.set_float(device, "spotLight.constant", light.constant);
        self.set_float(device, "spotLight.linear", light.linear);
        self.set_float(device, "spotLight.quadratic", light.quadratic);
    }

    /// Directional, spot, then point light
    pub fn bind_lights(&self, device: &mut dyn GraphicsDevice, rig: &LightingRig) {
        self.bind_dir_light(device, &rig.directional);
        self.bind_spot_light(device, &rig.spot);
        self.bind_point_light(device, &rig.point);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indexed_names() {
        let naming = MaterialNaming::Indexed;
        assert_eq!(naming.sampler_name(TextureKind::Diffuse, 1), "material.texture_diffuse1");
        assert_eq!(naming.sampler_name(TextureKind::Specular, 2), "material.texture_specular2");
    }

    #[test]
    fn test_plain_names() {
        let naming = MaterialNaming::Plain;
        assert_eq!(naming.sampler_name(TextureKind::Diffuse, 1), "material.diffuse");
        assert_eq!(naming.sampler_name(TextureKind::Specular, 1), "material.specular");
        assert_eq!(naming.sampler_name(TextureKind::Diffuse, 2), "material.diffuse2");
    }

    #[test]
    fn test_naming_deserializes_from_snake_case() {
        #[derive(Deserialize)]
        struct Wrapper {
            naming: MaterialNaming,
        }
        let parsed: Wrapper = toml::from_str("naming = \"plain\"").unwrap();
        assert_eq!(parsed.naming, MaterialNaming::Plain);
    }
}
