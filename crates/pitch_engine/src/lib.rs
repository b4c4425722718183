//! # Pitch Engine
//!
//! Forward-lit OpenGL renderer for a small floodlit football pitch scene.
//!
//! ## Features
//!
//! - **Fixed scene**: ground plane, grass clumps, goalpost and floodlight
//!   mast models, optional cube-map sky
//! - **Fly camera**: WASD movement, mouse look and scroll zoom
//! - **Three lights**: point, directional and spot, selectable presets
//! - **Debug overlay**: camera readout, anti-aliasing toggle and light tuning
//! - **Persistent state**: camera pose and background colour survive restarts
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pitch_engine::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load_or_default("resources/stadium.toml");
//!     Engine::new(config).run()?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod assets;
pub mod config;
pub mod foundation;
pub mod input;
pub mod render;
pub mod state;
pub mod ui;

mod engine;

pub use engine::{Engine, EngineError, OVERLAY_FONT_SIZE};

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        config::{AppConfig, Config},
        foundation::{
            math::{Mat4, Vec3},
            time::Timer,
        },
        input::{InputDispatcher, InputEvent},
        render::{FlyCamera, FrameRenderer, GraphicsDevice, LightingRig, RenderFeatures},
        state::ProgramState,
        Engine, EngineError,
    };
}
