//! Vertex types for UI rendering

use bytemuck::{Pod, Zeroable};

/// Vertex data for glyph rendering with texture coordinates
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct UIVertex {
    /// Position in NDC coordinates
    pub position: [f32; 2],
    /// Texture coordinates into the glyph atlas
    pub uv: [f32; 2],
}

/// Simple position-only vertex for solid color panels (no UVs)
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct PanelVertex {
    /// Position in NDC coordinates
    pub position: [f32; 2],
}
