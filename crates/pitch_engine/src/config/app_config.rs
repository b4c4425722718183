//! # Application Configuration
//!
//! Everything the stadium scene reads at startup: window parameters, asset
//! locations, shader sources, renderer feature flags and the lighting rig.
//! Every section carries `#[serde(default)]` so a config file only needs the
//! fields it wants to change.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::Config;
use crate::render::lighting::{LightingPreset, LightingRig};
use crate::render::shader::MaterialNaming;
use crate::render::transforms::GrassFan;

/// Top-level application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window creation parameters
    pub window: WindowConfig,
    /// Asset file locations
    pub assets: AssetConfig,
    /// Shader program sources
    pub shaders: ShaderConfig,
    /// Renderer variant selection
    pub features: FeatureConfig,
    /// Light tuning
    pub lighting: LightingConfig,
    /// Fixed scene parameters
    pub scene: SceneConfig,
}

impl Config for AppConfig {}

/// Window configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical window width
    pub width: u32,
    /// Logical window height
    pub height: u32,
    /// Window title
    pub title: String,
    /// Multisample count requested for the default framebuffer
    pub samples: u32,
}

impl WindowConfig {
    /// Aspect ratio used for the projection matrix
    ///
    /// This is the configured ratio, not the live framebuffer ratio.
    pub fn aspect_ratio(&self) -> f32 {
        self.width as f32 / self.height.max(1) as f32
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            title: "Stadium".to_string(),
            samples: 4,
        }
    }
}

/// Asset locations, relative to the working directory
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Persisted program state file
    pub state_file: PathBuf,
    /// Goalpost model
    pub goal_model: PathBuf,
    /// Floodlight projector mast model
    pub projector_model: PathBuf,
    /// Grass billboard diffuse texture
    pub grass_diffuse: PathBuf,
    /// Grass billboard specular texture
    pub grass_specular: PathBuf,
    /// Ground plane texture
    pub plane_texture: PathBuf,
    /// Skybox faces in +X, -X, +Y, -Y, +Z, -Z order
    pub skybox_faces: [PathBuf; 6],
    /// TrueType font used by the debug overlay
    pub overlay_font: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        let skybox = |face: &str| PathBuf::from(format!("resources/textures/skybox/{face}.jpg"));
        Self {
            state_file: PathBuf::from("resources/program_state.txt"),
            goal_model: PathBuf::from("resources/objects/goalpost/10502_Football_Goalpost_v1_L3.obj"),
            projector_model: PathBuf::from("resources/objects/projector/projector_mast.obj"),
            grass_diffuse: PathBuf::from("resources/textures/grass_texture.png"),
            grass_specular: PathBuf::from("resources/textures/grass_texture_specular.png"),
            plane_texture: PathBuf::from("resources/textures/plane_texture.jpg"),
            skybox_faces: [
                skybox("right"),
                skybox("left"),
                skybox("top"),
                skybox("bottom"),
                skybox("front"),
                skybox("back"),
            ],
            overlay_font: PathBuf::from("resources/fonts/DejaVuSans.ttf"),
        }
    }
}

/// Vertex/fragment source pair for one program
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaderSources {
    /// Vertex shader path
    pub vertex: PathBuf,
    /// Fragment shader path
    pub fragment: PathBuf,
}

impl ShaderSources {
    /// Sources named `<stem>.vs` / `<stem>.fs` under `resources/shaders`
    pub fn named(stem: &str) -> Self {
        Self {
            vertex: PathBuf::from(format!("resources/shaders/{stem}.vs")),
            fragment: PathBuf::from(format!("resources/shaders/{stem}.fs")),
        }
    }
}

/// Shader program configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShaderConfig {
    /// Lit program for the loaded models
    pub main: ShaderSources,
    /// Material sampler naming used by the main program
    pub main_naming: MaterialNaming,
    /// Lit program for the grass billboards
    pub grass: ShaderSources,
    /// Material sampler naming used by the grass program
    pub grass_naming: MaterialNaming,
    /// Unlit ground plane program
    pub plane: ShaderSources,
    /// Cube-map sky program
    pub skybox: ShaderSources,
    /// Solid colour overlay quads
    pub overlay_panel: ShaderSources,
    /// Glyph atlas overlay text
    pub overlay_text: ShaderSources,
}

impl Default for ShaderConfig {
    fn default() -> Self {
        Self {
            main: ShaderSources::named("main"),
            main_naming: MaterialNaming::Indexed,
            grass: ShaderSources::named("grass"),
            grass_naming: MaterialNaming::Indexed,
            plane: ShaderSources::named("plane"),
            skybox: ShaderSources::named("skybox"),
            overlay_panel: ShaderSources::named("overlay_panel"),
            overlay_text: ShaderSources::named("overlay_text"),
        }
    }
}

/// Renderer variant flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureConfig {
    /// Draw the cube-map sky after the opaque scene
    pub has_skybox: bool,
    /// Expose the anti-aliasing checkbox and drive multisampling from it
    pub supports_anti_aliasing_toggle: bool,
    /// Expose point light attenuation sliders in the overlay
    pub light_editable_at_runtime: bool,
}

impl Default for FeatureConfig {
    fn default() -> Self {
        Self {
            has_skybox: true,
            supports_anti_aliasing_toggle: true,
            light_editable_at_runtime: false,
        }
    }
}

/// Lighting configuration
///
/// `rig` replaces the preset entirely when present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LightingConfig {
    /// Named tuning
    pub preset: LightingPreset,
    /// Explicit tuning
    pub rig: Option<LightingRig>,
}

impl LightingConfig {
    /// Resolve the rig to use
    pub fn resolve(&self) -> LightingRig {
        self.rig.clone().unwrap_or_else(|| self.preset.rig())
    }
}

/// Fixed scene parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Grass clumps per side of the square grid
    pub grass_grid_size: u32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
    /// Blade arrangement within each grass clump
    pub grass_fan: GrassFan,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            grass_grid_size: 100,
            near: 0.1,
            far: 100.0,
            grass_fan: GrassFan::Compound,
        }
    }
}
