//! Frame renderer
//!
//! Issues one frame of the stadium scene as a fixed sequence of device
//! calls. Later draws depend on state left by earlier ones (cull face
//! direction, active texture unit, depth function), so the order here is
//! part of the contract:
//!
//! 1. multisampling from the anti-aliasing flag (when the toggle exists)
//! 2. clear colour and depth
//! 3. lights, camera position and shininess for the main and grass programs
//! 4. view and projection for the main, grass and plane programs
//! 5. goal and projector models with back-face culling
//! 6. ground plane with front-face culling
//! 7. grass clumps with culling disabled
//! 8. skybox at `LEQUAL` depth with translation stripped from the view
//! 9. face culling re-enabled

use bitflags::bitflags;

use super::device::{Capability, CullFace, DepthFunc, DeviceResult, GraphicsDevice, TextureTarget};
use super::geometry::{grass_positions, DrawableArray, GeometryBuffers};
use super::model::Model;
use super::shader::{ShaderProgram, TextureKind};
use super::texture::TextureSet;
use super::transforms::{self, GrassFan};
use crate::config::{AppConfig, FeatureConfig};
use crate::foundation::math::{Mat4, Vec3};
use crate::state::ProgramState;

/// Specular exponent for the loaded models
pub const MODEL_SHININESS: f32 = 32.0;

/// Specular exponent for the grass billboards
pub const GRASS_SHININESS: f32 = 16.0;

bitflags! {
    /// Renderer variant selection
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct RenderFeatures: u32 {
        /// Draw the cube-map sky
        const SKYBOX = 1 << 0;
        /// Drive multisampling from `ProgramState::anti_aliasing`
        const ANTI_ALIASING_TOGGLE = 1 << 1;
        /// Point light attenuation is editable from the overlay
        const RUNTIME_LIGHT_EDITING = 1 << 2;
    }
}

impl From<&FeatureConfig> for RenderFeatures {
    fn from(config: &FeatureConfig) -> Self {
        let mut features = RenderFeatures::empty();
        features.set(RenderFeatures::SKYBOX, config.has_skybox);
        features.set(RenderFeatures::ANTI_ALIASING_TOGGLE, config.supports_anti_aliasing_toggle);
        features.set(RenderFeatures::RUNTIME_LIGHT_EDITING, config.light_editable_at_runtime);
        features
    }
}

/// Programs used by the scene
#[derive(Debug, Clone)]
pub struct ScenePrograms {
    /// Lit program for the loaded models
    pub main: ShaderProgram,
    /// Lit program for the grass billboards
    pub grass: ShaderProgram,
    /// Unlit textured ground
    pub plane: ShaderProgram,
    /// Cube-map sky, absent without the skybox feature
    pub skybox: Option<ShaderProgram>,
}

impl ScenePrograms {
    /// Compile every program the configuration asks for
    pub fn load(device: &mut dyn GraphicsDevice, config: &AppConfig, features: RenderFeatures) -> DeviceResult<Self> {
        let shaders = &config.shaders;
        let skybox = if features.contains(RenderFeatures::SKYBOX) {
            Some(ShaderProgram::load(device, "skybox", &shaders.skybox, Default::default())?)
        } else {
            None
        };
        Ok(Self {
            main: ShaderProgram::load(device, "main", &shaders.main, shaders.main_naming)?,
            grass: ShaderProgram::load(device, "grass", &shaders.grass, shaders.grass_naming)?,
            plane: ShaderProgram::load(device, "plane", &shaders.plane, Default::default())?,
            skybox,
        })
    }

    fn all(&self) -> impl Iterator<Item = &ShaderProgram> {
        [&self.main, &self.grass, &self.plane].into_iter().chain(self.skybox.as_ref())
    }
}

/// Everything uploaded for the scene before the first frame
#[derive(Debug, Clone)]
pub struct SceneAssets {
    /// Shader programs
    pub programs: ScenePrograms,
    /// Goalpost model
    pub goal: Model,
    /// Floodlight mast model
    pub projector: Model,
    /// Hand-authored vertex buffers
    pub geometry: GeometryBuffers,
    /// Scene textures
    pub textures: TextureSet,
}

impl SceneAssets {
    /// Load and upload all scene assets
    ///
    /// Only program creation is fatal; missing models and textures degrade.
    pub fn load(device: &mut dyn GraphicsDevice, config: &AppConfig, features: RenderFeatures) -> DeviceResult<Self> {
        let programs = ScenePrograms::load(device, config, features)?;
        let goal = Model::load_or_empty(device, &config.assets.goal_model);
        let projector = Model::load_or_empty(device, &config.assets.projector_model);
        let geometry = GeometryBuffers::upload(device);
        let textures = TextureSet::load(device, &config.assets, features.contains(RenderFeatures::SKYBOX));
        Ok(Self {
            programs,
            goal,
            projector,
            geometry,
            textures,
        })
    }
}

/// Projection parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    /// Fixed aspect ratio from the configured window size
    pub aspect_ratio: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

/// Per-frame scene renderer
pub struct FrameRenderer {
    features: RenderFeatures,
    assets: SceneAssets,
    projection: Projection,
    grass_positions: Vec<Vec3>,
    grass_fan: GrassFan,
}

impl FrameRenderer {
    /// Create a renderer over uploaded assets
    pub fn new(features: RenderFeatures, assets: SceneAssets, projection: Projection, grass_grid_size: u32) -> Self {
        let grass_positions = grass_positions(grass_grid_size);
        log::info!(
            "Frame renderer ready: {:?}, {} grass clumps",
            features,
            grass_positions.len()
        );
        Self {
            features,
            assets,
            projection,
            grass_positions,
            grass_fan: GrassFan::Compound,
        }
    }

    /// Use `fan` for the blades of every grass clump
    pub fn with_grass_fan(mut self, fan: GrassFan) -> Self {
        self.grass_fan = fan;
        self
    }

    /// Enabled variant features
    pub fn features(&self) -> RenderFeatures {
        self.features
    }

    /// Planted grass clump positions
    pub fn grass_positions(&self) -> &[Vec3] {
        &self.grass_positions
    }

    /// One-time device state and sampler unit assignments
    pub fn initialize(&self, device: &mut dyn GraphicsDevice) {
        device.set_capability(Capability::DepthTest, true);
        device.set_capability(Capability::CullFace, true);
        device.set_capability(Capability::Multisample, true);

        let programs = &self.assets.programs;
        programs.grass.activate(device);
        programs.grass.bind_material_samplers(device);

        programs.plane.activate(device);
        programs.plane.set_int(device, "texture1", 0);

        if let Some(skybox) = &programs.skybox {
            skybox.activate(device);
            skybox.set_int(device, "skybox", 0);
        }
    }

    /// Draw the scene for the current state
    pub fn render(&self, device: &mut dyn GraphicsDevice, state: &ProgramState) {
        if self.features.contains(RenderFeatures::ANTI_ALIASING_TOGGLE) {
            device.set_capability(Capability::Multisample, state.anti_aliasing);
        }
        device.clear(state.clear_color);

        let camera = &state.camera;
        let projection = camera.projection_matrix(self.projection.aspect_ratio, self.projection.near, self.projection.far);
        let view = camera.view_matrix();

        let programs = &self.assets.programs;
        for (program, shininess) in [(&programs.main, MODEL_SHININESS), (&programs.grass, GRASS_SHININESS)] {
            program.activate(device);
            program.bind_lights(device, &state.lights);
            program.bind_camera_position(device, camera.position);
            program.bind_shininess(device, shininess);
        }

        for program in [&programs.main, &programs.grass, &programs.plane] {
            program.activate(device);
            program.set_projection(device, &projection);
            program.set_view(device, &view);
        }

        self.draw_models(device);
        self.draw_plane(device);
        self.draw_grass(device);
        if self.features.contains(RenderFeatures::SKYBOX) {
            self.draw_skybox(device, &view, &projection);
        }

        device.set_capability(Capability::CullFace, true);
    }

    fn draw_models(&self, device: &mut dyn GraphicsDevice) {
        let main = &self.assets.programs.main;

        main.activate(device);
        device.set_cull_face(CullFace::Back);
        main.set_model(device, &transforms::goal_model());
        self.assets.goal.draw(device, main);

        main.activate(device);
        main.set_model(device, &transforms::projector_model());
        self.assets.projector.draw(device, main);
    }

    fn draw_plane(&self, device: &mut dyn GraphicsDevice) {
        let plane = &self.assets.programs.plane;
        plane.activate(device);
        device.set_cull_face(CullFace::Front);
        device.bind_vertex_array(self.assets.geometry.plane.vertex_array);
        device.active_texture(0);
        device.bind_texture(TextureTarget::Texture2D, self.assets.textures.plane);
        plane.set_model(device, &transforms::plane_model());
        draw(device, self.assets.geometry.plane);
    }

    fn draw_grass(&self, device: &mut dyn GraphicsDevice) {
        let grass = &self.assets.programs.grass;
        let textures = &self.assets.textures;

        grass.activate(device);
        device.set_capability(Capability::CullFace, false);
        device.bind_vertex_array(self.assets.geometry.grass.vertex_array);
        device.active_texture(TextureKind::Diffuse.default_unit());
        device.bind_texture(TextureTarget::Texture2D, textures.grass_diffuse);
        device.active_texture(TextureKind::Specular.default_unit());
        device.bind_texture(TextureTarget::Texture2D, textures.grass_specular);

        for &position in &self.grass_positions {
            for model in transforms::grass_blade_models(position, self.grass_fan) {
                grass.set_model(device, &model);
                draw(device, self.assets.geometry.grass);
            }
        }
    }

    fn draw_skybox(&self, device: &mut dyn GraphicsDevice, view: &Mat4, projection: &Mat4) {
        let (Some(skybox), Some(cubemap)) = (&self.assets.programs.skybox, self.assets.textures.skybox) else {
            return;
        };

        device.set_depth_func(DepthFunc::LessEqual);
        skybox.activate(device);
        skybox.set_view(device, &transforms::skybox_view(view));
        skybox.set_projection(device, projection);
        device.bind_vertex_array(self.assets.geometry.skybox.vertex_array);
        device.active_texture(0);
        device.bind_texture(TextureTarget::CubeMap, cubemap);
        draw(device, self.assets.geometry.skybox);
        device.set_depth_func(DepthFunc::Less);
    }

    /// Release every scene resource
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        let SceneAssets {
            programs,
            goal,
            projector,
            geometry,
            textures,
        } = self.assets;

        goal.destroy(device);
        projector.destroy(device);
        geometry.destroy(device);
        textures.destroy(device);
        for program in programs.all() {
            device.delete_program(program.handle());
        }
        log::info!("Scene resources released");
    }
}

fn draw(device: &mut dyn GraphicsDevice, array: DrawableArray) {
    device.draw_arrays(0, array.vertex_count);
}
