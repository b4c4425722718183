//! Frame procedure ordering against a recording device

mod common;

use std::collections::HashMap;
use std::path::Path;

use approx::assert_relative_eq;
use common::{missing_assets, Call, RecordingDevice};
use pitch_engine::assets::{ObjMesh, ObjModel};
use pitch_engine::foundation::math::{Mat4, Vec3};
use pitch_engine::render::device::{Capability, CullFace, DepthFunc, ProgramHandle, TextureTarget, UniformValue};
use pitch_engine::render::frame::{
    FrameRenderer, Projection, RenderFeatures, SceneAssets, ScenePrograms, GRASS_SHININESS, MODEL_SHININESS,
};
use pitch_engine::render::geometry::GeometryBuffers;
use pitch_engine::render::model::Model;
use pitch_engine::render::shader::{MaterialNaming, ShaderProgram};
use pitch_engine::render::texture::TextureSet;
use pitch_engine::render::transforms::{grass_blade_models, GrassFan, GRASS_BLADES_PER_CLUMP};
use pitch_engine::state::ProgramState;

const ASPECT: f32 = 800.0 / 600.0;

fn program(device: &mut RecordingDevice, name: &str, naming: MaterialNaming) -> ShaderProgram {
    let handle = pitch_engine::render::GraphicsDevice::create_program(device, name, "", "").unwrap();
    ShaderProgram::new(handle, name, naming)
}

fn triangle() -> ObjModel {
    ObjModel {
        meshes: vec![ObjMesh {
            name: "goal".to_string(),
            material: None,
            vertices: vec![0.0; 24],
            indices: vec![0, 1, 2],
        }],
        material_libraries: Vec::new(),
    }
}

fn scene(features: RenderFeatures, grid: u32) -> (RecordingDevice, FrameRenderer) {
    let asset_config = missing_assets(&std::env::temp_dir().join("pitch_engine_frame_assets"));
    let mut device = RecordingDevice::new();

    let programs = ScenePrograms {
        main: program(&mut device, "main", MaterialNaming::Indexed),
        grass: program(&mut device, "grass", MaterialNaming::Indexed),
        plane: program(&mut device, "plane", MaterialNaming::Plain),
        skybox: features
            .contains(RenderFeatures::SKYBOX)
            .then(|| program(&mut device, "skybox", MaterialNaming::Plain)),
    };
    let goal = Model::upload(&mut device, &triangle(), &HashMap::new(), Path::new("."));
    let geometry = GeometryBuffers::upload(&mut device);
    let textures = TextureSet::load(&mut device, &asset_config, features.contains(RenderFeatures::SKYBOX));

    let assets = SceneAssets {
        programs,
        goal,
        projector: Model::default(),
        geometry,
        textures,
    };
    let projection = Projection {
        aspect_ratio: ASPECT,
        near: 0.1,
        far: 100.0,
    };
    (device, FrameRenderer::new(features, assets, projection, grid))
}

fn default_features() -> RenderFeatures {
    RenderFeatures::SKYBOX | RenderFeatures::ANTI_ALIASING_TOGGLE
}

#[test]
fn test_missing_textures_still_create_objects() {
    let (device, _renderer) = scene(default_features(), 1);
    let empty_2d = device
        .calls
        .iter()
        .filter(|c| **c == Call::CreateTexture2D { has_storage: false })
        .count();
    assert_eq!(empty_2d, 3);
    assert!(device.calls.contains(&Call::CreateCubemap { faces: 0 }));
}

#[test]
fn test_initialize_binds_sampler_units() {
    let (mut device, renderer) = scene(default_features(), 1);
    device.reset();
    renderer.initialize(&mut device);

    assert_eq!(device.calls[0], Call::Capability(Capability::DepthTest, true));
    let units = |name: &str| {
        device
            .uniforms_named(name)
            .into_iter()
            .map(|(_, value)| value)
            .collect::<Vec<_>>()
    };
    assert_eq!(units("material.texture_diffuse1"), vec![UniformValue::Int(0)]);
    assert_eq!(units("material.texture_specular1"), vec![UniformValue::Int(1)]);
    assert_eq!(units("texture1"), vec![UniformValue::Int(0)]);
    assert_eq!(units("skybox"), vec![UniformValue::Int(0)]);
}

#[test]
fn test_frame_state_changes_happen_in_order() {
    let (mut device, renderer) = scene(default_features(), 2);
    let state = ProgramState::default();
    device.reset();
    renderer.render(&mut device, &state);

    assert_eq!(device.calls[0], Call::Capability(Capability::Multisample, true));
    assert_eq!(device.calls[1], Call::Clear(state.clear_color));

    let at = |call: Call| device.position(|c| *c == call).unwrap();
    let back = at(Call::CullFace(CullFace::Back));
    let goal_draw = at(Call::DrawElements(3));
    let front = at(Call::CullFace(CullFace::Front));
    let no_cull = at(Call::Capability(Capability::CullFace, false));
    let sky_depth = at(Call::DepthFunc(DepthFunc::LessEqual));
    let normal_depth = at(Call::DepthFunc(DepthFunc::Less));

    assert!(back < goal_draw);
    assert!(goal_draw < front);
    assert!(front < no_cull);
    assert!(no_cull < sky_depth);
    assert!(sky_depth < normal_depth);
    assert_eq!(device.calls.last(), Some(&Call::Capability(Capability::CullFace, true)));
}

#[test]
fn test_grass_draws_three_blades_per_clump() {
    let (mut device, renderer) = scene(default_features(), 2);
    device.reset();
    renderer.render(&mut device, &ProgramState::default());

    // plane + 4 clumps x 3 blades + sky cube
    assert_eq!(device.draw_array_count(), 1 + 12 + 1);
    assert!(device.calls.contains(&Call::DrawArrays(0, 36)));

    let grass_units = device
        .calls
        .iter()
        .filter(|c| matches!(c, Call::BindTexture(TextureTarget::Texture2D, _)))
        .count();
    assert_eq!(grass_units, 3);
}

fn grass_models(device: &RecordingDevice) -> Vec<Mat4> {
    let models: Vec<Mat4> = device
        .uniforms_named("model")
        .into_iter()
        .filter_map(|(_, value)| match value {
            UniformValue::Mat4(m) => Some(m),
            _ => None,
        })
        .collect();
    models[models.len() - GRASS_BLADES_PER_CLUMP..].to_vec()
}

#[test]
fn test_grass_fan_setting_reaches_blade_models() {
    let (mut device, renderer) = scene(default_features(), 1);
    device.reset();
    renderer.render(&mut device, &ProgramState::default());
    let compound = grass_models(&device);
    let expected = grass_blade_models(Vec3::new(0.0, 0.3, 0.0), GrassFan::Compound);
    for (actual, expected) in compound.iter().zip(expected.iter()) {
        assert_relative_eq!(*actual, *expected, epsilon = 1e-5);
    }

    let (mut device, renderer) = scene(default_features(), 1);
    let renderer = renderer.with_grass_fan(GrassFan::Reset);
    device.reset();
    renderer.render(&mut device, &ProgramState::default());
    let reset = grass_models(&device);
    let expected = grass_blade_models(Vec3::new(0.0, 0.3, 0.0), GrassFan::Reset);
    for (actual, expected) in reset.iter().zip(expected.iter()) {
        assert_relative_eq!(*actual, *expected, epsilon = 1e-5);
    }
    assert!((reset[2] - compound[2]).abs().max() > 1e-3);
}

#[test]
fn test_shininess_per_program() {
    let (mut device, renderer) = scene(default_features(), 1);
    device.reset();
    renderer.render(&mut device, &ProgramState::default());

    let values: Vec<UniformValue> = device
        .uniforms_named("material.shininess")
        .into_iter()
        .map(|(_, value)| value)
        .collect();
    assert_eq!(values, vec![UniformValue::Float(MODEL_SHININESS), UniformValue::Float(GRASS_SHININESS)]);
}

#[test]
fn test_projection_follows_camera_zoom() {
    let (mut device, renderer) = scene(default_features(), 1);
    let mut state = ProgramState::default();
    state.camera.process_mouse_scroll(15.0);
    device.reset();
    renderer.render(&mut device, &state);

    let expected = state.camera.projection_matrix(ASPECT, 0.1, 100.0);
    let (_, value) = device.uniforms_named("projection")[0];
    let UniformValue::Mat4(projection) = value else {
        panic!("projection is not a matrix");
    };
    assert_relative_eq!(projection, expected, epsilon = 1e-6);
}

#[test]
fn test_skybox_view_has_no_translation() {
    let (mut device, renderer) = scene(default_features(), 1);
    let mut state = ProgramState::default();
    state.camera.position = Vec3::new(4.0, 2.0, -7.0);
    device.reset();
    renderer.render(&mut device, &state);

    let views = device.uniforms_named("view");
    let (skybox_program, UniformValue::Mat4(view)) = *views.last().unwrap() else {
        panic!("view is not a matrix");
    };
    let skybox_uses = device.calls.iter().filter(|c| **c == Call::UseProgram(skybox_program)).count();
    assert_eq!(skybox_uses, 1);

    let translation: Mat4 = view;
    assert_eq!(translation[(0, 3)], 0.0);
    assert_eq!(translation[(1, 3)], 0.0);
    assert_eq!(translation[(2, 3)], 0.0);
    assert_eq!(translation[(3, 3)], 1.0);
}

#[test]
fn test_minimal_variant_skips_multisample_and_sky() {
    let (mut device, renderer) = scene(RenderFeatures::RUNTIME_LIGHT_EDITING, 1);
    let mut state = ProgramState::default();
    state.anti_aliasing = false;
    device.reset();
    renderer.render(&mut device, &state);

    assert!(matches!(device.calls[0], Call::Clear(_)));
    assert!(!device.calls.iter().any(|c| matches!(c, Call::Capability(Capability::Multisample, _))));
    assert!(!device.calls.iter().any(|c| matches!(c, Call::DepthFunc(_))));
}

#[test]
fn test_anti_aliasing_flag_drives_multisample() {
    let (mut device, renderer) = scene(default_features(), 1);
    let mut state = ProgramState::default();
    state.anti_aliasing = false;
    device.reset();
    renderer.render(&mut device, &state);

    assert_eq!(device.calls[0], Call::Capability(Capability::Multisample, false));
}

#[test]
fn test_edited_point_light_reaches_lit_programs() {
    let (mut device, renderer) = scene(default_features(), 1);
    let mut state = ProgramState::default();
    state.lights.point.constant = 1.75;
    device.reset();
    renderer.render(&mut device, &state);

    let uploads = device.uniforms_named("pointLight.constant");
    assert_eq!(uploads.len(), 2);
    assert!(uploads.iter().all(|(_, value)| *value == UniformValue::Float(1.75)));
    assert_ne!(uploads[0].0, uploads[1].0);
}

#[test]
fn test_destroy_releases_every_program() {
    let (mut device, renderer) = scene(default_features(), 1);
    device.reset();
    renderer.destroy(&mut device);

    let deleted: Vec<ProgramHandle> = device
        .calls
        .iter()
        .filter_map(|c| match c {
            Call::DeleteProgram(handle) => Some(*handle),
            _ => None,
        })
        .collect();
    assert_eq!(deleted.len(), 4);
    assert_eq!(device.calls.iter().filter(|c| matches!(c, Call::DeleteVertexArray(_))).count(), 4);
}
