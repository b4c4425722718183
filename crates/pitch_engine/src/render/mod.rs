//! Rendering
//!
//! Scene composition and the per-frame procedure sit on top of the
//! [`GraphicsDevice`] seam; `gl` and `window` are the only modules that
//! touch OpenGL or GLFW.

pub mod camera;
pub mod device;
pub mod frame;
pub mod geometry;
pub mod gl;
pub mod lighting;
pub mod model;
pub mod shader;
pub mod texture;
pub mod transforms;
pub mod window;

pub use camera::{CameraMovement, FlyCamera};
pub use device::{
    Capability, CullFace, DepthFunc, DeviceError, DeviceResult, GraphicsDevice, ProgramHandle, TextureHandle,
    TextureTarget, UniformValue, VertexArrayHandle, VertexAttribute, VertexLayout,
};
pub use frame::{FrameRenderer, Projection, RenderFeatures, SceneAssets, ScenePrograms};
pub use lighting::{DirLight, LightingPreset, LightingRig, PointLight, SpotLight};
pub use shader::{MaterialNaming, ShaderProgram, TextureKind};
pub use window::{Window, WindowError, WindowResult};
