//! Graphics device abstraction
//!
//! The trait here is the only way the renderer touches GPU state. The frame
//! procedure is a fixed sequence of state toggles, uniform uploads and draw
//! submissions; expressing each as a trait call keeps that sequence testable
//! without a GL context and keeps `gl` types out of the renderer.

use thiserror::Error;

use crate::assets::ImageData;
use crate::foundation::math::{Mat4, Vec3};

/// Result type for device operations that can fail
pub type DeviceResult<T> = Result<T, DeviceError>;

/// Device-level errors
///
/// Only resource creation reports errors. Per-frame state changes and draws
/// are fire-and-forget.
#[derive(Error, Debug)]
pub enum DeviceError {
    /// Shader source could not be read
    #[error("Failed to read shader source {path}: {source}")]
    ShaderSource {
        /// Path that failed
        path: String,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Shader stage failed to compile
    #[error("{stage} shader of '{program}' failed to compile: {log}")]
    ShaderCompile {
        /// Program name
        program: String,
        /// "vertex" or "fragment"
        stage: &'static str,
        /// Driver info log
        log: String,
    },

    /// Program failed to link
    #[error("Program '{program}' failed to link: {log}")]
    ProgramLink {
        /// Program name
        program: String,
        /// Driver info log
        log: String,
    },

    /// Function pointers could not be loaded
    #[error("Failed to load graphics API entry points: {0}")]
    LoaderFailed(String),
}

/// Linked shader program
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProgramHandle(pub u32);

/// Texture object (2D or cube map)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

impl TextureHandle {
    /// The zero handle: sampling it yields black
    pub const NONE: TextureHandle = TextureHandle(0);
}

/// Vertex array with its backing buffers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VertexArrayHandle(pub u32);

/// Toggleable fixed-function state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Multisample rasterization
    Multisample,
    /// Face culling
    CullFace,
    /// Depth testing
    DepthTest,
    /// Alpha blending
    Blend,
}

/// Which winding gets culled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CullFace {
    /// Cull front faces
    Front,
    /// Cull back faces
    Back,
}

/// Depth comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthFunc {
    /// Pass when closer
    Less,
    /// Pass when closer or equal
    LessEqual,
}

/// Texture binding target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    /// Regular 2D texture
    Texture2D,
    /// Six-face cube map
    CubeMap,
}

/// Value uploaded to a named uniform
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UniformValue {
    /// `int` or sampler
    Int(i32),
    /// `float`
    Float(f32),
    /// `vec3`
    Vec3(Vec3),
    /// `mat4`
    Mat4(Mat4),
}

/// One float attribute within an interleaved vertex
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader attribute location
    pub location: u32,
    /// Number of floats
    pub components: u32,
    /// Offset in floats from the start of the vertex
    pub offset: usize,
}

/// Layout of an interleaved float vertex buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VertexLayout {
    /// Floats per vertex
    pub stride: usize,
    /// Attribute list
    pub attributes: Vec<VertexAttribute>,
}

impl VertexLayout {
    /// position(3) normal(3) uv(2) at locations 0, 1, 2
    pub fn position_normal_uv() -> Self {
        Self {
            stride: 8,
            attributes: vec![
                VertexAttribute { location: 0, components: 3, offset: 0 },
                VertexAttribute { location: 1, components: 3, offset: 3 },
                VertexAttribute { location: 2, components: 2, offset: 6 },
            ],
        }
    }

    /// position(3) at location 0
    pub fn position_only() -> Self {
        Self {
            stride: 3,
            attributes: vec![VertexAttribute { location: 0, components: 3, offset: 0 }],
        }
    }

    /// Number of whole vertices in `data`
    pub fn vertex_count(&self, data: &[f32]) -> usize {
        if self.stride == 0 {
            0
        } else {
            data.len() / self.stride
        }
    }
}

/// Graphics device state machine
///
/// Uniform uploads apply to the program most recently passed to
/// [`GraphicsDevice::use_program`]; the `program` argument only selects the
/// uniform location table.
pub trait GraphicsDevice {
    /// Enable or disable a capability
    fn set_capability(&mut self, capability: Capability, enabled: bool);

    /// Select the culled winding
    fn set_cull_face(&mut self, face: CullFace);

    /// Select the depth comparison
    fn set_depth_func(&mut self, func: DepthFunc);

    /// Resize the viewport in framebuffer pixels
    fn set_viewport(&mut self, width: u32, height: u32);

    /// Clear colour (opaque) and depth
    fn clear(&mut self, color: Vec3);

    /// Make `program` current
    fn use_program(&mut self, program: ProgramHandle);

    /// Upload a named uniform to the current program
    fn set_uniform(&mut self, program: ProgramHandle, name: &str, value: UniformValue);

    /// Bind a vertex array for drawing
    fn bind_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Select the active texture unit
    fn active_texture(&mut self, unit: u32);

    /// Bind a texture to the active unit
    fn bind_texture(&mut self, target: TextureTarget, texture: TextureHandle);

    /// Draw non-indexed triangles from the bound vertex array
    fn draw_arrays(&mut self, first: u32, count: u32);

    /// Draw indexed triangles from the bound vertex array
    fn draw_elements(&mut self, count: u32);

    /// Compile and link a program from source text
    fn create_program(&mut self, name: &str, vertex_source: &str, fragment_source: &str) -> DeviceResult<ProgramHandle>;

    /// Upload an immutable interleaved vertex buffer
    fn create_vertex_array(&mut self, vertices: &[f32], layout: &VertexLayout) -> VertexArrayHandle;

    /// Upload an immutable interleaved vertex buffer with an index buffer
    fn create_indexed_vertex_array(&mut self, vertices: &[f32], indices: &[u32], layout: &VertexLayout) -> VertexArrayHandle;

    /// Create a 2D texture; `None` allocates the object without storage
    fn create_texture_2d(&mut self, image: Option<&ImageData>) -> TextureHandle;

    /// Create a cube map from faces in +X, -X, +Y, -Y, +Z, -Z order
    ///
    /// Missing faces are left without storage.
    fn create_cubemap(&mut self, faces: &[Option<ImageData>; 6]) -> TextureHandle;

    /// Release a program
    fn delete_program(&mut self, program: ProgramHandle);

    /// Release a vertex array and its buffers
    fn delete_vertex_array(&mut self, vertex_array: VertexArrayHandle);

    /// Release a texture
    fn delete_texture(&mut self, texture: TextureHandle);
}
