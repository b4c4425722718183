//! UI Render Backend Trait
//!
//! Defines the interface between the overlay and the graphics backend, so
//! overlay layout and batching never touch GL directly.

use crate::ui::rendering::{BatchDraw, PanelVertex, UIVertex};
use crate::ui::text::FontAtlas;

/// Handle to a font atlas uploaded to the GPU
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontAtlasHandle(pub u32);

/// Backend-agnostic UI rendering interface
///
/// A pass draws over the finished scene: depth testing and face culling
/// are off and alpha blending is on between `begin_ui_pass` and
/// `end_ui_pass`, and the scene state is restored afterwards.
pub trait UIRenderBackend {
    /// Begin UI rendering pass
    fn begin_ui_pass(&mut self);

    /// Render a batch of solid color quads
    ///
    /// # Arguments
    /// * `vertices` - All panel vertices in a single buffer
    /// * `draws` - Draw ranges: (start_vertex, vertex_count, color)
    fn render_panel_batch(&mut self, vertices: &[PanelVertex], draws: &[BatchDraw]);

    /// Render a batch of text glyphs sampled from the uploaded atlas
    ///
    /// # Arguments
    /// * `vertices` - All text vertices in a single buffer
    /// * `draws` - Draw ranges: (start_vertex, vertex_count, color)
    fn render_text_batch(&mut self, vertices: &[UIVertex], draws: &[BatchDraw]);

    /// End UI rendering pass
    fn end_ui_pass(&mut self);

    /// Upload the glyph atlas used by subsequent text batches
    fn upload_font_atlas(&mut self, atlas: &FontAtlas) -> FontAtlasHandle;
}
