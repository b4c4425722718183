//! Math utilities and types
//!
//! Provides the nalgebra aliases used across the engine and a handful of
//! transform helpers that compose matrices the way a fixed-function
//! pipeline does: every helper post-multiplies, so the operation written
//! last is the one applied to vertices first.

pub use nalgebra::{
    Vector2, Vector3, Vector4,
    Matrix3, Matrix4,
    Rotation3,
    Unit,
};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// 3D point type
pub type Point3 = nalgebra::Point3<f32>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;

    /// Radians to degrees conversion factor
    pub const RAD_TO_DEG: f32 = 180.0 / PI;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Convert radians to degrees
    pub fn rad_to_deg(radians: f32) -> f32 {
        radians * constants::RAD_TO_DEG
    }
}

/// `m · T(offset)`
pub fn translate(m: &Mat4, offset: Vec3) -> Mat4 {
    m * Mat4::new_translation(&offset)
}

/// `m · R(angle, axis)`; the axis does not need to be normalized
pub fn rotate(m: &Mat4, angle_radians: f32, axis: Vec3) -> Mat4 {
    let rotation = Rotation3::from_axis_angle(&Unit::new_normalize(axis), angle_radians);
    m * rotation.to_homogeneous()
}

/// `m · S(factors)`
pub fn scale(m: &Mat4, factors: Vec3) -> Mat4 {
    m * Mat4::new_nonuniform_scaling(&factors)
}

/// Right-handed perspective projection with OpenGL clip depth (-1..1)
pub fn perspective(fovy_radians: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
    Mat4::new_perspective(aspect, fovy_radians, near, far)
}

/// Right-handed look-at view matrix
pub fn look_at(eye: Vec3, target: Vec3, up: Vec3) -> Mat4 {
    Mat4::look_at_rh(&Point3::from(eye), &Point3::from(target), &up)
}

/// Keep only the upper-left 3x3 block of `m`
///
/// The translation column and bottom row become `(0, 0, 0, 1)`, which is
/// what makes a cube drawn with this view appear infinitely far away.
pub fn strip_translation(m: &Mat4) -> Mat4 {
    let rotation: Mat3 = m.fixed_view::<3, 3>(0, 0).into_owned();
    rotation.to_homogeneous()
}

/// Column-major array layout expected by graphics APIs
pub fn to_column_array(m: &Mat4) -> [[f32; 4]; 4] {
    (*m).into()
}
