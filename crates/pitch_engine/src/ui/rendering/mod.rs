//! UI rendering module
//!
//! Backend-agnostic UI rendering infrastructure

pub mod vertex;
pub mod commands;
pub mod renderer;

pub use vertex::{UIVertex, PanelVertex};
pub use commands::{UIRenderCommand, UIBatches, BatchDraw};
pub use renderer::UIRenderer;
