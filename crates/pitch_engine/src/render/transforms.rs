//! Fixed model transforms of the stadium scene
//!
//! Each helper composes its matrix by post-multiplication starting from the
//! identity, so the operation written last is applied to vertices first.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{self, utils, Mat4, Vec3};

/// Uniform scale applied to the ground quad
pub const PLANE_HALF_EXTENT: f32 = 51.0;

/// Sub-draws per grass clump
pub const GRASS_BLADES_PER_CLUMP: usize = 3;

/// Rotation about +Y between consecutive blades, in degrees
pub const GRASS_BLADE_ROTATION: f32 = 120.0;

/// Horizontal (X/Z) stretch applied to each blade
pub const GRASS_BLADE_STRETCH: f32 = 1.6;

/// Goalpost: model authored Z-up in centimetres
pub fn goal_model() -> Mat4 {
    let m = math::translate(&Mat4::identity(), Vec3::zeros());
    let m = math::scale(&m, Vec3::repeat(0.01));
    math::rotate(&m, utils::deg_to_rad(-90.0), Vec3::x())
}

/// Floodlight mast in the corner, turned to face the pitch
pub fn projector_model() -> Mat4 {
    let m = math::translate(&Mat4::identity(), Vec3::new(20.0, 0.0, 20.0));
    let m = math::rotate(&m, utils::deg_to_rad(45.0), Vec3::y());
    math::scale(&m, Vec3::repeat(1.5))
}

/// Ground plane
pub fn plane_model() -> Mat4 {
    math::scale(&Mat4::identity(), Vec3::repeat(PLANE_HALF_EXTENT))
}

/// How the blades of a grass clump relate to each other
///
/// Selected by `scene.grass_fan` in the app config.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GrassFan {
    /// Each blade further rotates and scales the previous blade's matrix
    #[default]
    Compound,
    /// Each blade starts from the clump base: a clean 0/120/240° fan
    Reset,
}

/// Model matrices for the blades of the clump planted at `position`
pub fn grass_blade_models(position: Vec3, fan: GrassFan) -> [Mat4; GRASS_BLADES_PER_CLUMP] {
    let stretch = Vec3::new(GRASS_BLADE_STRETCH, 1.0, GRASS_BLADE_STRETCH);
    let base = math::translate(&Mat4::identity(), position);
    let mut model = base;
    let mut blades = [Mat4::identity(); GRASS_BLADES_PER_CLUMP];
    for (i, blade) in blades.iter_mut().enumerate() {
        if fan == GrassFan::Reset {
            model = math::rotate(&base, utils::deg_to_rad(GRASS_BLADE_ROTATION * i as f32), Vec3::y());
            model = math::scale(&model, stretch);
        } else {
            model = math::rotate(&model, utils::deg_to_rad(GRASS_BLADE_ROTATION), Vec3::y());
            model = math::scale(&model, stretch);
        }
        *blade = model;
    }
    blades
}

/// Camera view with translation removed, for the sky cube
pub fn skybox_view(view: &Mat4) -> Mat4 {
    math::strip_translation(view)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Point3;
    use approx::assert_relative_eq;

    #[test]
    fn test_goal_is_scaled_then_stood_up() {
        let p = goal_model().transform_point(&Point3::new(0.0, 0.0, 100.0));
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_projector_sits_in_the_corner() {
        let origin = projector_model().transform_point(&Point3::origin());
        assert_relative_eq!(origin, Point3::new(20.0, 0.0, 20.0), epsilon = 1e-5);

        let up = projector_model().transform_vector(&Vec3::y());
        assert_relative_eq!(up, Vec3::new(0.0, 1.5, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_plane_scale() {
        let corner = plane_model().transform_point(&Point3::new(1.0, 0.0, -1.0));
        assert_relative_eq!(corner, Point3::new(51.0, 0.0, -51.0));
    }

    #[test]
    fn test_compound_blades_grow_with_each_draw() {
        let blades = grass_blade_models(Vec3::new(2.0, 0.3, -4.0), GrassFan::Compound);
        let widths: Vec<f32> = blades.iter().map(|m| m.transform_vector(&Vec3::x()).norm()).collect();

        assert_relative_eq!(widths[0], 1.6, epsilon = 1e-5);
        assert_relative_eq!(widths[1], 1.6 * 1.6, epsilon = 1e-4);
        assert_relative_eq!(widths[2], 1.6 * 1.6 * 1.6, epsilon = 1e-4);
        for blade in &blades {
            assert_relative_eq!(blade.transform_point(&Point3::origin()), Point3::new(2.0, 0.3, -4.0), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_compound_third_blade_wraps_to_full_turn() {
        let blades = grass_blade_models(Vec3::zeros(), GrassFan::Compound);
        let dir = blades[2].transform_vector(&Vec3::x()).normalize();
        assert_relative_eq!(dir, Vec3::x(), epsilon = 1e-5);
    }

    #[test]
    fn test_reset_blades_are_an_even_fan() {
        let blades = grass_blade_models(Vec3::zeros(), GrassFan::Reset);
        for blade in &blades {
            assert_relative_eq!(blade.transform_vector(&Vec3::x()).norm(), 1.6, epsilon = 1e-5);
        }
        assert_relative_eq!(blades[0].transform_vector(&Vec3::x()), Vec3::new(1.6, 0.0, 0.0), epsilon = 1e-5);
    }

    #[test]
    fn test_skybox_view_drops_translation() {
        let view = math::look_at(Vec3::new(3.0, 2.0, 9.0), Vec3::new(0.0, 1.0, 0.0), Vec3::y());
        let sky = skybox_view(&view);
        assert_eq!(sky[(0, 3)], 0.0);
        assert_eq!(sky[(1, 3)], 0.0);
        assert_eq!(sky[(2, 3)], 0.0);
        assert_eq!(sky[(3, 3)], 1.0);
        assert_eq!(sky[(1, 2)], view[(1, 2)]);
    }
}
