//! # Free-fly Camera
//!
//! Euler-angle camera driven by keyboard translation, mouse orientation and
//! scroll zoom. Orientation is stored as yaw/pitch in degrees; the basis
//! vectors are derived from them after every orientation change.
//!
//! ## Coordinate System
//! Right-handed, Y-up. Yaw of -90° looks down -Z.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{self, utils, Mat4, Vec3};

/// Default yaw in degrees (looking down -Z)
pub const DEFAULT_YAW: f32 = -90.0;
/// Default pitch in degrees
pub const DEFAULT_PITCH: f32 = 0.0;
/// Translation speed in units per second
pub const DEFAULT_SPEED: f32 = 2.5;
/// Degrees of rotation per pixel of mouse travel
pub const DEFAULT_SENSITIVITY: f32 = 0.1;
/// Rest field of view in degrees
pub const DEFAULT_ZOOM: f32 = 45.0;

/// Pitch limit in degrees, short of straight up/down
pub const PITCH_LIMIT: f32 = 89.0;
/// Narrowest field of view in degrees
pub const MIN_ZOOM: f32 = 1.0;
/// Widest field of view in degrees
pub const MAX_ZOOM: f32 = 45.0;

/// Keyboard translation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraMovement {
    /// Along `front`
    Forward,
    /// Against `front`
    Backward,
    /// Against `right`
    Left,
    /// Along `right`
    Right,
}

/// Free-fly perspective camera
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlyCamera {
    /// Camera position in world space
    pub position: Vec3,
    /// Unit view direction
    pub front: Vec3,
    /// Unit camera up
    pub up: Vec3,
    /// Unit camera right
    pub right: Vec3,
    /// Reference up used to derive `right`
    pub world_up: Vec3,
    /// Yaw in degrees
    pub yaw: f32,
    /// Pitch in degrees, kept within ±[`PITCH_LIMIT`]
    pub pitch: f32,
    /// Field of view in degrees, kept within [[`MIN_ZOOM`], [`MAX_ZOOM`]]
    pub zoom: f32,
    /// Units per second
    pub movement_speed: f32,
    /// Degrees per pixel
    pub mouse_sensitivity: f32,
}

impl FlyCamera {
    /// Create a camera at `position` with default orientation
    pub fn new(position: Vec3) -> Self {
        Self::with_orientation(position, Vec3::y(), DEFAULT_YAW, DEFAULT_PITCH)
    }

    /// Create a camera with explicit world-up and Euler angles in degrees
    pub fn with_orientation(position: Vec3, world_up: Vec3, yaw: f32, pitch: f32) -> Self {
        let mut camera = Self {
            position,
            front: Vec3::new(0.0, 0.0, -1.0),
            up: world_up,
            right: Vec3::x(),
            world_up,
            yaw,
            pitch: pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT),
            zoom: DEFAULT_ZOOM,
            movement_speed: DEFAULT_SPEED,
            mouse_sensitivity: DEFAULT_SENSITIVITY,
        };
        camera.update_camera_vectors();
        camera
    }

    /// World-to-camera transform
    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(self.position, self.position + self.front, self.up)
    }

    /// Perspective projection for the current zoom
    pub fn projection_matrix(&self, aspect: f32, near: f32, far: f32) -> Mat4 {
        math::perspective(utils::deg_to_rad(self.zoom), aspect, near, far)
    }

    /// Translate along the camera basis, scaled by `delta_time`
    ///
    /// No collision or bounds: the camera passes through geometry.
    pub fn process_keyboard(&mut self, direction: CameraMovement, delta_time: f32) {
        let velocity = self.movement_speed * delta_time;
        match direction {
            CameraMovement::Forward => self.position += self.front * velocity,
            CameraMovement::Backward => self.position -= self.front * velocity,
            CameraMovement::Left => self.position -= self.right * velocity,
            CameraMovement::Right => self.position += self.right * velocity,
        }
    }

    /// Rotate by a mouse delta in pixels
    ///
    /// `y_offset` is expected already inverted (positive = look up).
    pub fn process_mouse_movement(&mut self, x_offset: f32, y_offset: f32) {
        self.yaw += x_offset * self.mouse_sensitivity;
        self.pitch += y_offset * self.mouse_sensitivity;
        self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.update_camera_vectors();
    }

    /// Narrow (positive) or widen (negative) the field of view
    pub fn process_mouse_scroll(&mut self, y_offset: f32) {
        self.zoom = (self.zoom - y_offset).clamp(MIN_ZOOM, MAX_ZOOM);
    }

    /// Point the camera along a stored direction without disturbing it
    ///
    /// Yaw and pitch are recovered from `front` so the next mouse move
    /// continues from this orientation. `front` is rebuilt from the clamped
    /// angles, so directions steeper than the pitch limit are pulled back to
    /// it. Degenerate vectors are ignored.
    pub fn set_front(&mut self, front: Vec3) {
        let Some(front) = front.try_normalize(f32::EPSILON) else {
            log::warn!("Ignoring degenerate camera front {:?}", front);
            return;
        };
        self.pitch = utils::rad_to_deg(front.y.clamp(-1.0, 1.0).asin()).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = utils::rad_to_deg(front.z.atan2(front.x));
        self.update_camera_vectors();
    }

    fn update_camera_vectors(&mut self) {
        let yaw = utils::deg_to_rad(self.yaw);
        let pitch = utils::deg_to_rad(self.pitch);
        self.front = Vec3::new(
            yaw.cos() * pitch.cos(),
            pitch.sin(),
            yaw.sin() * pitch.cos(),
        )
        .normalize();
        self.update_basis();
    }

    fn update_basis(&mut self) {
        self.right = self.front.cross(&self.world_up).normalize();
        self.up = self.right.cross(&self.front).normalize();
    }
}

impl Default for FlyCamera {
    /// Three units back from the origin, looking down -Z
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 3.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_orientation_looks_down_negative_z() {
        let camera = FlyCamera::default();
        assert_relative_eq!(camera.front, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
        assert_relative_eq!(camera.right, Vec3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
        assert_relative_eq!(camera.up, Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
        assert_eq!(camera.zoom, 45.0);
    }

    #[test]
    fn test_front_is_unit_and_tracks_pitch() {
        let mut camera = FlyCamera::default();
        for (dx, dy) in [(120.0, 35.0), (-400.0, -900.0), (33.0, 2000.0), (7.0, -13.0)] {
            camera.process_mouse_movement(dx, dy);
            assert_relative_eq!(camera.front.norm(), 1.0, epsilon = 1e-5);
            assert_relative_eq!(camera.front.y, utils::deg_to_rad(camera.pitch).sin(), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_pitch_is_pinned_at_limit() {
        let mut camera = FlyCamera::default();
        for _ in 0..100 {
            camera.process_mouse_movement(0.0, 50.0);
        }
        assert_eq!(camera.pitch, PITCH_LIMIT);

        for _ in 0..200 {
            camera.process_mouse_movement(0.0, -50.0);
        }
        assert_eq!(camera.pitch, -PITCH_LIMIT);
    }

    #[test]
    fn test_zoom_is_clamped_both_ways() {
        let mut camera = FlyCamera::default();
        for _ in 0..100 {
            camera.process_mouse_scroll(1.0);
        }
        assert_eq!(camera.zoom, MIN_ZOOM);

        for _ in 0..100 {
            camera.process_mouse_scroll(-1.0);
        }
        assert_eq!(camera.zoom, MAX_ZOOM);
    }

    #[test]
    fn test_keyboard_moves_along_basis_scaled_by_time() {
        let mut camera = FlyCamera::default();
        camera.process_keyboard(CameraMovement::Forward, 2.0);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, -2.0), epsilon = 1e-5);

        camera.process_keyboard(CameraMovement::Right, 1.0);
        assert_relative_eq!(camera.position, Vec3::new(2.5, 0.0, -2.0), epsilon = 1e-5);

        camera.process_keyboard(CameraMovement::Left, 1.0);
        camera.process_keyboard(CameraMovement::Backward, 2.0);
        assert_relative_eq!(camera.position, Vec3::new(0.0, 0.0, 3.0), epsilon = 1e-5);
    }

    #[test]
    fn test_set_front_recovers_angles() {
        let mut original = FlyCamera::default();
        original.process_mouse_movement(250.0, 120.0);

        let mut restored = FlyCamera::default();
        restored.set_front(original.front);

        assert_relative_eq!(restored.front, original.front, epsilon = 1e-5);
        assert_relative_eq!(restored.pitch, original.pitch, epsilon = 1e-3);

        restored.process_mouse_movement(0.0, 0.0);
        assert_relative_eq!(restored.front, original.front, epsilon = 1e-4);
    }

    #[test]
    fn test_set_front_ignores_zero_vector() {
        let mut camera = FlyCamera::default();
        camera.set_front(Vec3::zeros());
        assert_relative_eq!(camera.front, Vec3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_set_front_vertical_is_pulled_back_to_pitch_limit() {
        let mut camera = FlyCamera::default();
        camera.set_front(Vec3::new(0.0, 1.0, 0.0));

        assert_eq!(camera.pitch, PITCH_LIMIT);
        assert_relative_eq!(camera.front.y, utils::deg_to_rad(PITCH_LIMIT).sin(), epsilon = 1e-6);
        assert!(camera.right.iter().all(|v| v.is_finite()));
        assert!(camera.up.iter().all(|v| v.is_finite()));
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));

        camera.set_front(Vec3::new(0.0, -5.0, 0.01));
        assert_eq!(camera.pitch, -PITCH_LIMIT);
        assert_relative_eq!(camera.front.norm(), 1.0, epsilon = 1e-5);
        assert!(camera.view_matrix().iter().all(|v| v.is_finite()));
    }

    #[test]
    fn test_view_matrix_moves_camera_to_origin() {
        let camera = FlyCamera::new(Vec3::new(1.0, 2.0, 3.0));
        let eye = camera.view_matrix().transform_point(&crate::foundation::math::Point3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(eye.coords, Vec3::zeros(), epsilon = 1e-5);
    }
}
