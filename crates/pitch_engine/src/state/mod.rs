//! Persisted program state
//!
//! One `ProgramState` lives for the whole run. It is read once before the
//! window opens, mutated by input and the overlay every frame, and written
//! back once after the loop exits.
//!
//! The on-disk format is ten newline-separated values in a fixed order:
//!
//! ```text
//! clear_color.r
//! clear_color.g
//! clear_color.b
//! overlay_enabled (0 or 1)
//! camera.position.x
//! camera.position.y
//! camera.position.z
//! camera.front.x
//! camera.front.y
//! camera.front.z
//! ```
//!
//! Reading stops at the first missing or malformed value; every field from
//! that point on keeps its default.

use std::fmt::Write as _;
use std::path::Path;

use thiserror::Error;

use crate::foundation::math::Vec3;
use crate::render::camera::FlyCamera;
use crate::render::lighting::LightingRig;

/// Number of values in the persisted file
pub const PERSISTED_FIELD_COUNT: usize = 10;

/// State persistence errors
#[derive(Error, Debug)]
pub enum StateError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Mutable state shared by input handling, rendering and the overlay
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramState {
    /// Background colour, each channel in [0, 1]
    pub clear_color: Vec3,
    /// Whether the debug overlay is shown
    pub overlay_enabled: bool,
    /// The free-fly camera
    pub camera: FlyCamera,
    /// Whether mouse motion orients the camera
    pub camera_mouse_update_enabled: bool,
    /// Scratch position editable from the overlay
    pub editable_position: Vec3,
    /// Scratch scale editable from the overlay
    pub editable_scale: f32,
    /// Multisampling toggle
    pub anti_aliasing: bool,
    /// Scene lights; the point light is overlay-editable in one variant
    pub lights: LightingRig,
}

impl Default for ProgramState {
    fn default() -> Self {
        Self {
            clear_color: Vec3::zeros(),
            overlay_enabled: false,
            camera: FlyCamera::new(Vec3::new(0.0, 0.0, 3.0)),
            camera_mouse_update_enabled: true,
            editable_position: Vec3::zeros(),
            editable_scale: 1.0,
            anti_aliasing: true,
            lights: LightingRig::default(),
        }
    }
}

impl ProgramState {
    /// Create default state using the given lighting rig
    pub fn with_lights(lights: LightingRig) -> Self {
        Self {
            lights,
            ..Self::default()
        }
    }

    /// Overlay the persisted fields found at `path`
    ///
    /// A missing or unreadable file leaves the state untouched.
    pub fn load_from_file(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(contents) => {
                let applied = self.apply_persisted(&contents);
                log::info!("Restored {} of {} state fields from {}", applied, PERSISTED_FIELD_COUNT, path.display());
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No saved state at {}, using defaults", path.display());
            }
            Err(e) => {
                log::warn!("Could not read saved state {}: {}", path.display(), e);
            }
        }
    }

    /// Write the persisted fields to `path`
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), StateError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_persisted())?;
        log::info!("Saved state to {}", path.display());
        Ok(())
    }

    /// Render the persisted fields
    pub fn to_persisted(&self) -> String {
        let c = &self.camera;
        let values = [
            self.clear_color.x.to_string(),
            self.clear_color.y.to_string(),
            self.clear_color.z.to_string(),
            u8::from(self.overlay_enabled).to_string(),
            c.position.x.to_string(),
            c.position.y.to_string(),
            c.position.z.to_string(),
            c.front.x.to_string(),
            c.front.y.to_string(),
            c.front.z.to_string(),
        ];

        values.iter().fold(String::new(), |mut out, value| {
            let _ = writeln!(out, "{value}");
            out
        })
    }

    /// Apply persisted fields in order and return how many were applied
    pub fn apply_persisted(&mut self, contents: &str) -> usize {
        let mut reader = FieldReader::new(contents);

        let Some(r) = reader.float() else { return reader.applied };
        self.clear_color.x = r;
        let Some(g) = reader.float() else { return reader.applied };
        self.clear_color.y = g;
        let Some(b) = reader.float() else { return reader.applied };
        self.clear_color.z = b;
        let Some(overlay) = reader.flag() else { return reader.applied };
        self.overlay_enabled = overlay;

        let mut position = self.camera.position;
        for axis in 0..3 {
            let Some(value) = reader.float() else {
                self.camera.position = position;
                return reader.applied;
            };
            position[axis] = value;
        }
        self.camera.position = position;

        let mut front = self.camera.front;
        for axis in 0..3 {
            let Some(value) = reader.float() else {
                self.camera.set_front(front);
                return reader.applied;
            };
            front[axis] = value;
        }
        self.camera.set_front(front);

        reader.applied
    }
}

/// Sequential whitespace-separated value reader
struct FieldReader<'a> {
    tokens: std::str::SplitWhitespace<'a>,
    applied: usize,
}

impl<'a> FieldReader<'a> {
    fn new(contents: &'a str) -> Self {
        Self {
            tokens: contents.split_whitespace(),
            applied: 0,
        }
    }

    fn float(&mut self) -> Option<f32> {
        let token = self.tokens.next()?;
        match token.parse::<f32>() {
            Ok(value) if value.is_finite() => {
                self.applied += 1;
                Some(value)
            }
            _ => {
                log::warn!("Malformed state value {:?}, keeping defaults from here", token);
                None
            }
        }
    }

    fn flag(&mut self) -> Option<bool> {
        let token = self.tokens.next()?;
        let value = match token {
            "1" | "true" => true,
            "0" | "false" => false,
            _ => {
                log::warn!("Malformed state flag {:?}, keeping defaults from here", token);
                return None;
            }
        };
        self.applied += 1;
        Some(value)
    }
}
