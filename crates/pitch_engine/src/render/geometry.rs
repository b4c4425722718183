//! Hand-authored scene geometry
//!
//! Three immutable vertex buffers (ground quad, grass blade, sky cube) and
//! the grass clump placement grid. Everything is uploaded once at startup
//! and released when [`GeometryBuffers`] is destroyed.

use super::device::{GraphicsDevice, VertexArrayHandle, VertexLayout};
use crate::foundation::math::Vec3;

/// Height at which every grass clump is planted
pub const GRASS_HEIGHT: f32 = 0.3;

const SQRT_2: f32 = std::f32::consts::SQRT_2;

/// Ground quad spanning [-1, 1] in X/Z, position/normal/uv interleaved
///
/// The winding faces down, so the plane is drawn with front-face culling.
/// UVs run from -1 to 1 and rely on repeat wrapping.
#[rustfmt::skip]
pub const PLANE_VERTICES: [f32; 48] = [
     1.0, 0.0,  1.0,  0.0, 1.0, 0.0,   1.0,  1.0,
    -1.0, 0.0,  1.0,  0.0, 1.0, 0.0,  -1.0,  1.0,
    -1.0, 0.0, -1.0,  0.0, 1.0, 0.0,  -1.0, -1.0,

     1.0, 0.0,  1.0,  0.0, 1.0, 0.0,   1.0,  1.0,
    -1.0, 0.0, -1.0,  0.0, 1.0, 0.0,  -1.0, -1.0,
     1.0, 0.0, -1.0,  0.0, 1.0, 0.0,   1.0, -1.0,
];

/// Single grass blade quad, one unit wide and tall, standing in the XY plane
#[rustfmt::skip]
pub const GRASS_VERTICES: [f32; 48] = [
    0.0,  0.5, 0.0,  SQRT_2, 0.0, SQRT_2,  0.0, 0.0,
    0.0, -0.5, 0.0,  SQRT_2, 0.0, SQRT_2,  0.0, 1.0,
    1.0, -0.5, 0.0,  SQRT_2, 0.0, SQRT_2,  1.0, 1.0,

    0.0,  0.5, 0.0,  SQRT_2, 0.0, SQRT_2,  0.0, 0.0,
    1.0, -0.5, 0.0,  SQRT_2, 0.0, SQRT_2,  1.0, 1.0,
    1.0,  0.5, 0.0,  SQRT_2, 0.0, SQRT_2,  1.0, 0.0,
];

/// Unit sky cube, positions only, wound to be seen from inside
#[rustfmt::skip]
pub const SKYBOX_VERTICES: [f32; 108] = [
    -1.0,  1.0, -1.0,
    -1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
     1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,

    -1.0, -1.0,  1.0,
    -1.0, -1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0,  1.0, -1.0,
    -1.0,  1.0,  1.0,
    -1.0, -1.0,  1.0,

     1.0, -1.0, -1.0,
     1.0, -1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0, -1.0,
     1.0, -1.0, -1.0,

    -1.0, -1.0,  1.0,
    -1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
     1.0, -1.0,  1.0,
    -1.0, -1.0,  1.0,

    -1.0,  1.0, -1.0,
     1.0,  1.0, -1.0,
     1.0,  1.0,  1.0,
     1.0,  1.0,  1.0,
    -1.0,  1.0,  1.0,
    -1.0,  1.0, -1.0,

    -1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
     1.0, -1.0, -1.0,
     1.0, -1.0, -1.0,
    -1.0, -1.0,  1.0,
     1.0, -1.0,  1.0,
];

/// Grass clump positions on an `n`×`n` unit grid centred on the origin
///
/// Row-major over (i, j) with position `(i - n/2, 0.3, j - n/2)`, using
/// integer halving so odd sizes lean towards negative coordinates.
pub fn grass_positions(n: u32) -> Vec<Vec3> {
    let half = (n / 2) as f32;
    let mut positions = Vec::with_capacity((n as usize).pow(2));
    for i in 0..n {
        for j in 0..n {
            positions.push(Vec3::new(i as f32 - half, GRASS_HEIGHT, j as f32 - half));
        }
    }
    positions
}

/// A vertex array and the number of vertices to draw from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DrawableArray {
    /// Device vertex array
    pub vertex_array: VertexArrayHandle,
    /// Vertices per draw
    pub vertex_count: u32,
}

impl DrawableArray {
    fn upload(device: &mut dyn GraphicsDevice, vertices: &[f32], layout: VertexLayout) -> Self {
        let vertex_count = layout.vertex_count(vertices) as u32;
        Self {
            vertex_array: device.create_vertex_array(vertices, &layout),
            vertex_count,
        }
    }
}

/// The scene's fixed vertex buffers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeometryBuffers {
    /// Ground quad
    pub plane: DrawableArray,
    /// Grass blade quad
    pub grass: DrawableArray,
    /// Sky cube
    pub skybox: DrawableArray,
}

impl GeometryBuffers {
    /// Upload all three buffers
    pub fn upload(device: &mut dyn GraphicsDevice) -> Self {
        let buffers = Self {
            plane: DrawableArray::upload(device, &PLANE_VERTICES, VertexLayout::position_normal_uv()),
            grass: DrawableArray::upload(device, &GRASS_VERTICES, VertexLayout::position_normal_uv()),
            skybox: DrawableArray::upload(device, &SKYBOX_VERTICES, VertexLayout::position_only()),
        };
        log::debug!("Uploaded plane, grass and skybox vertex buffers");
        buffers
    }

    /// Release all three buffers
    pub fn destroy(self, device: &mut dyn GraphicsDevice) {
        for array in [self.plane, self.grass, self.skybox] {
            device.delete_vertex_array(array.vertex_array);
        }
    }
}
