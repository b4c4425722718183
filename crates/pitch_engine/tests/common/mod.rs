//! Shared test doubles

#![allow(dead_code)]

use std::path::PathBuf;

use pitch_engine::assets::ImageData;
use pitch_engine::config::AssetConfig;
use pitch_engine::foundation::math::Vec3;
use pitch_engine::render::device::{
    Capability, CullFace, DepthFunc, DeviceResult, GraphicsDevice, ProgramHandle, TextureHandle, TextureTarget,
    UniformValue, VertexArrayHandle, VertexLayout,
};

/// One recorded device call
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Capability(Capability, bool),
    CullFace(CullFace),
    DepthFunc(DepthFunc),
    Viewport(u32, u32),
    Clear(Vec3),
    UseProgram(ProgramHandle),
    Uniform(ProgramHandle, String, UniformValue),
    BindVertexArray(VertexArrayHandle),
    ActiveTexture(u32),
    BindTexture(TextureTarget, TextureHandle),
    DrawArrays(u32, u32),
    DrawElements(u32),
    CreateProgram(String),
    CreateVertexArray { vertices: usize, indices: usize },
    CreateTexture2D { has_storage: bool },
    CreateCubemap { faces: usize },
    DeleteProgram(ProgramHandle),
    DeleteVertexArray(VertexArrayHandle),
    DeleteTexture(TextureHandle),
}

/// Device that records every call in order
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub calls: Vec<Call>,
    next_handle: u32,
}

impl RecordingDevice {
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&mut self) -> u32 {
        self.next_handle += 1;
        self.next_handle
    }

    /// Forget everything recorded so far
    pub fn reset(&mut self) {
        self.calls.clear();
    }

    /// Uniform uploads named `name`, in order
    pub fn uniforms_named(&self, name: &str) -> Vec<(ProgramHandle, UniformValue)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                Call::Uniform(program, n, value) if n == name => Some((*program, *value)),
                _ => None,
            })
            .collect()
    }

    /// Number of non-indexed draws
    pub fn draw_array_count(&self) -> usize {
        self.calls.iter().filter(|c| matches!(c, Call::DrawArrays(..))).count()
    }

    /// Index of the first call matching `predicate`
    pub fn position(&self, predicate: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.iter().position(predicate)
    }
}

impl GraphicsDevice for RecordingDevice {
    fn set_capability(&mut self, capability: Capability, enabled: bool) {
        self.calls.push(Call::Capability(capability, enabled));
    }

    fn set_cull_face(&mut self, face: CullFace) {
        self.calls.push(Call::CullFace(face));
    }

    fn set_depth_func(&mut self, func: DepthFunc) {
        self.calls.push(Call::DepthFunc(func));
    }

    fn set_viewport(&mut self, width: u32, height: u32) {
        self.calls.push(Call::Viewport(width, height));
    }

    fn clear(&mut self, color: Vec3) {
        self.calls.push(Call::Clear(color));
    }

    fn use_program(&mut self, program: ProgramHandle) {
        self.calls.push(Call::UseProgram(program));
    }

    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue) {
        self.calls.push(Call::Uniform(program, name.to_string(), value));
    }

    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.calls.push(Call::BindVertexArray(vertex_array));
    }

    fn active_texture(&mut self, unit: u32) {
        self.calls.push(Call::ActiveTexture(unit));
    }

    fn bind_texture(&mut self, target: TextureTarget, texture: TextureHandle) {
        self.calls.push(Call::BindTexture(target, texture));
    }

    fn draw_arrays(&mut self, first: u32, count: u32) {
        self.calls.push(Call::DrawArrays(first, count));
    }

    fn draw_elements(&mut self, count: u32) {
        self.calls.push(Call::DrawElements(count));
    }

    fn create_program(&mut self, name: &str, _vertex_source: &str, _fragment_source: &str) -> DeviceResult<ProgramHandle> {
        self.calls.push(Call::CreateProgram(name.to_string()));
        Ok(ProgramHandle(self.handle()))
    }

    fn create_vertex_array(&mut self, vertices: &[f32], layout: &VertexLayout) -> VertexArrayHandle {
        self.create_indexed_vertex_array(vertices, &[], layout)
    }

    fn create_indexed_vertex_array(&mut self, vertices: &[f32], indices: &[u32], layout: &VertexLayout) -> VertexArrayHandle {
        self.calls.push(Call::CreateVertexArray {
            vertices: layout.vertex_count(vertices),
            indices: indices.len(),
        });
        VertexArrayHandle(self.handle())
    }

    fn create_texture_2d(&mut self, image: Option<&ImageData>) -> TextureHandle {
        self.calls.push(Call::CreateTexture2D { has_storage: image.is_some() });
        TextureHandle(self.handle())
    }

    fn create_cubemap(&mut self, faces: &[Option<ImageData>; 6]) -> TextureHandle {
        self.calls.push(Call::CreateCubemap {
            faces: faces.iter().filter(|f| f.is_some()).count(),
        });
        TextureHandle(self.handle())
    }

    fn delete_program(&mut self, program: ProgramHandle) {
        self.calls.push(Call::DeleteProgram(program));
    }

    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle) {
        self.calls.push(Call::DeleteVertexArray(vertex_array));
    }

    fn delete_texture(&mut self, texture: TextureHandle) {
        self.calls.push(Call::DeleteTexture(texture));
    }
}

/// Scratch directory unique to one test
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("pitch_engine_{}_{}", name, std::process::id()));
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).expect("create scratch dir");
    dir
}

/// Asset configuration whose every file is missing
pub fn missing_assets(dir: &std::path::Path) -> AssetConfig {
    let missing = |name: &str| dir.join("missing").join(name);
    AssetConfig {
        state_file: dir.join("program_state.txt"),
        goal_model: missing("goal.obj"),
        projector_model: missing("projector.obj"),
        grass_diffuse: missing("grass.png"),
        grass_specular: missing("grass_specular.png"),
        plane_texture: missing("plane.jpg"),
        skybox_faces: ["right", "left", "top", "bottom", "front", "back"].map(|face| missing(&format!("{face}.jpg"))),
        overlay_font: missing("font.ttf"),
    }
}
