//! Lighting system
//!
//! Three fixed light descriptors (point, directional, spot) uploaded as
//! uniforms to every lit program. The descriptors are plain data; the only
//! behaviour here is the CPU mirror of the falloff terms the fragment
//! shaders evaluate, which keeps the tuning testable.

use serde::{Deserialize, Serialize};

use crate::foundation::math::{utils, Vec3};

/// Omnidirectional light with distance attenuation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointLight {
    /// World-space position
    pub position: Vec3,
    /// Ambient colour
    pub ambient: Vec3,
    /// Diffuse colour
    pub diffuse: Vec3,
    /// Specular colour
    pub specular: Vec3,
    /// Constant attenuation term
    pub constant: f32,
    /// Linear attenuation term
    pub linear: f32,
    /// Quadratic attenuation term
    pub quadratic: f32,
}

impl PointLight {
    /// Attenuation factor at `distance` from the light
    pub fn attenuation(&self, distance: f32) -> f32 {
        attenuation(self.constant, self.linear, self.quadratic, distance)
    }
}

/// Infinitely distant light
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirLight {
    /// Direction the light travels in
    pub direction: Vec3,
    /// Ambient colour
    pub ambient: Vec3,
    /// Diffuse colour
    pub diffuse: Vec3,
    /// Specular colour
    pub specular: Vec3,
}

/// Cone light with a smooth edge between the inner and outer cutoff
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpotLight {
    /// World-space position
    pub position: Vec3,
    /// Cone axis
    pub direction: Vec3,
    /// Cosine of the inner cone half-angle
    pub cut_off: f32,
    /// Cosine of the outer cone half-angle
    pub outer_cut_off: f32,
    /// Constant attenuation term
    pub constant: f32,
    /// Linear attenuation term
    pub linear: f32,
    /// Quadratic attenuation term
    pub quadratic: f32,
    /// Ambient colour
    pub ambient: Vec3,
    /// Diffuse colour
    pub diffuse: Vec3,
    /// Specular colour
    pub specular: Vec3,
}

impl SpotLight {
    /// Attenuation factor at `distance` from the light
    pub fn attenuation(&self, distance: f32) -> f32 {
        attenuation(self.constant, self.linear, self.quadratic, distance)
    }

    /// Cone intensity for a fragment whose direction makes `cos_theta` with the axis
    pub fn intensity(&self, cos_theta: f32) -> f32 {
        spot_intensity(cos_theta, self.cut_off, self.outer_cut_off)
    }
}

/// `1 / (constant + linear·d + quadratic·d²)`
pub fn attenuation(constant: f32, linear: f32, quadratic: f32, distance: f32) -> f32 {
    1.0 / (constant + linear * distance + quadratic * distance * distance)
}

/// `clamp((cosθ − outer) / (inner − outer), 0, 1)`
///
/// Equal cutoffs give a hard-edged cone: full intensity inside, none outside.
pub fn spot_intensity(cos_theta: f32, cut_off: f32, outer_cut_off: f32) -> f32 {
    let epsilon = cut_off - outer_cut_off;
    if epsilon.abs() <= f32::EPSILON {
        return if cos_theta >= cut_off { 1.0 } else { 0.0 };
    }
    ((cos_theta - outer_cut_off) / epsilon).clamp(0.0, 1.0)
}

/// The three lights of the scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightingRig {
    /// Floodlight glow above the projector mast
    pub point: PointLight,
    /// Sky light
    pub directional: DirLight,
    /// Floodlight beam aimed at the pitch
    pub spot: SpotLight,
}

/// Named light tunings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LightingPreset {
    /// Night match: bright floodlight over the projector mast
    #[default]
    Stadium,
    /// Soft textbook tuning with gentle falloff
    Classic,
}

impl LightingPreset {
    /// Build the rig for this preset
    pub fn rig(self) -> LightingRig {
        match self {
            Self::Stadium => LightingRig::stadium(),
            Self::Classic => LightingRig::classic(),
        }
    }
}

impl LightingRig {
    /// Floodlit night tuning
    pub fn stadium() -> Self {
        Self {
            point: PointLight {
                position: Vec3::new(18.0, 21.5, 18.0),
                ambient: Vec3::repeat(10.1),
                diffuse: Vec3::repeat(0.2),
                specular: Vec3::repeat(1.1),
                constant: 1.0,
                linear: 0.8,
                quadratic: 0.7,
            },
            directional: DirLight {
                direction: Vec3::new(0.2, -1.0, 0.3),
                ambient: Vec3::repeat(0.2),
                diffuse: Vec3::repeat(0.5),
                specular: Vec3::repeat(1.0),
            },
            spot: SpotLight {
                position: Vec3::new(20.0, 22.0, 20.0),
                direction: Vec3::new(-1.0, -1.0, -1.0).normalize(),
                cut_off: utils::deg_to_rad(12.5).cos(),
                outer_cut_off: utils::deg_to_rad(17.5).cos(),
                constant: 1.0,
                linear: 0.045,
                quadratic: 0.016,
                ambient: Vec3::repeat(1.0),
                diffuse: Vec3::repeat(10.0),
                specular: Vec3::repeat(0.2),
            },
        }
    }

    /// Textbook tuning: dim ambient, 50-unit falloff curves
    pub fn classic() -> Self {
        Self {
            point: PointLight {
                position: Vec3::new(18.0, 21.5, 18.0),
                ambient: Vec3::repeat(0.05),
                diffuse: Vec3::repeat(0.8),
                specular: Vec3::repeat(1.0),
                constant: 1.0,
                linear: 0.09,
                quadratic: 0.032,
            },
            directional: DirLight {
                direction: Vec3::new(-0.2, -1.0, -0.3),
                ambient: Vec3::repeat(0.05),
                diffuse: Vec3::repeat(0.4),
                specular: Vec3::repeat(0.5),
            },
            spot: SpotLight {
                position: Vec3::new(20.0, 22.0, 20.0),
                direction: Vec3::new(-1.0, -1.0, -1.0).normalize(),
                cut_off: utils::deg_to_rad(12.5).cos(),
                outer_cut_off: utils::deg_to_rad(15.0).cos(),
                constant: 1.0,
                linear: 0.09,
                quadratic: 0.032,
                ambient: Vec3::zeros(),
                diffuse: Vec3::repeat(1.0),
                specular: Vec3::repeat(1.0),
            },
        }
    }
}

impl Default for LightingRig {
    fn default() -> Self {
        Self::stadium()
    }
}
