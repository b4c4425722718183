//! UI render commands

use super::vertex::{PanelVertex, UIVertex};
use crate::foundation::math::Vec4;

/// UI render command for a single element
#[derive(Debug, Clone, PartialEq)]
pub enum UIRenderCommand {
    /// Render a solid color quad (position-only vertices)
    Panel {
        /// Panel vertex data, two triangles
        vertices: Vec<PanelVertex>,
        /// Panel color
        color: Vec4,
    },
    /// Render text using the glyph atlas (position + UV vertices)
    Text {
        /// Text vertex data, two triangles per glyph
        vertices: Vec<UIVertex>,
        /// Text color
        color: Vec4,
    },
}

/// Draw range within a batch: (first vertex, vertex count, color)
pub type BatchDraw = (usize, usize, Vec4);

/// All commands of a frame merged into one buffer per kind
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UIBatches {
    /// Panel vertices
    pub panel_vertices: Vec<PanelVertex>,
    /// Panel draw ranges
    pub panel_draws: Vec<BatchDraw>,
    /// Glyph vertices
    pub text_vertices: Vec<UIVertex>,
    /// Glyph draw ranges
    pub text_draws: Vec<BatchDraw>,
}

impl UIBatches {
    /// Merge commands, preserving submission order within each kind
    pub fn from_commands(commands: &[UIRenderCommand]) -> Self {
        let mut batches = Self::default();
        for command in commands {
            match command {
                UIRenderCommand::Panel { vertices, color } => {
                    batches.panel_draws.push((batches.panel_vertices.len(), vertices.len(), *color));
                    batches.panel_vertices.extend_from_slice(vertices);
                }
                UIRenderCommand::Text { vertices, color } => {
                    batches.text_draws.push((batches.text_vertices.len(), vertices.len(), *color));
                    batches.text_vertices.extend_from_slice(vertices);
                }
            }
        }
        batches
    }

    /// Whether there is nothing to draw
    pub fn is_empty(&self) -> bool {
        self.panel_draws.is_empty() && self.text_draws.is_empty()
    }
}
