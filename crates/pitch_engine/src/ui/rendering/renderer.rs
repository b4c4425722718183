//! UI renderer that converts widgets to render commands

use super::commands::{UIBatches, UIRenderCommand};
use super::vertex::{PanelVertex, UIVertex};
use crate::foundation::math::Vec4;
use crate::ui::backend::UIRenderBackend;
use crate::ui::text::{FontAtlas, TextLayout};
use crate::ui::widgets::{
    UICheckbox, UIElement, UILayout, UIPanel, UISlider, UIText, CHECKBOX_LABEL_GAP, CHECKBOX_SIZE,
    SLIDER_GRAB_WIDTH, TITLE_BAR_HEIGHT,
};

/// Inset of the check mark inside the checkbox
const CHECK_INSET: f32 = 3.0;

/// Gap between a slider track and its caption
const SLIDER_CAPTION_GAP: f32 = 8.0;

/// Generates render commands from UI elements
///
/// This is the bridge between high-level UI components and low-level
/// rendering: widgets become NDC vertices, batched per kind on submit.
pub struct UIRenderer {
    /// Render commands generated for current frame
    render_commands: Vec<UIRenderCommand>,

    /// Screen dimensions the commands are generated for
    screen_width: f32,
    screen_height: f32,
}

impl UIRenderer {
    /// Create a new UI renderer
    pub fn new(screen_width: f32, screen_height: f32) -> Self {
        Self {
            render_commands: Vec::new(),
            screen_width,
            screen_height,
        }
    }

    /// Update screen dimensions (call when window resizes)
    pub fn set_screen_size(&mut self, width: f32, height: f32) {
        self.screen_width = width.max(1.0);
        self.screen_height = height.max(1.0);
    }

    /// Solid quad covering a screen-space rectangle
    pub fn push_quad(&mut self, x: f32, y: f32, width: f32, height: f32, color: Vec4) {
        let (x1, y1) = UILayout::screen_to_ndc(x, y, self.screen_width, self.screen_height);
        let (x2, y2) = UILayout::screen_to_ndc(x + width, y + height, self.screen_width, self.screen_height);

        let vertices = vec![
            PanelVertex { position: [x1, y1] },
            PanelVertex { position: [x1, y2] },
            PanelVertex { position: [x2, y2] },
            PanelVertex { position: [x1, y1] },
            PanelVertex { position: [x2, y2] },
            PanelVertex { position: [x2, y1] },
        ];

        self.render_commands.push(UIRenderCommand::Panel { vertices, color });
    }

    fn push_element(&mut self, element: &UIElement, color: Vec4) {
        let pos = UILayout::calculate_position(element, self.screen_width, self.screen_height);
        self.push_quad(pos.x, pos.y, element.size.0, element.size.1, color);
    }

    /// Update render commands for a panel and its title
    pub fn update_panel(&mut self, panel: &UIPanel, font_atlas: Option<&FontAtlas>) {
        if !panel.element.visible {
            return;
        }
        self.push_element(&panel.element, panel.color);

        let pos = UILayout::calculate_position(&panel.element, self.screen_width, self.screen_height);
        self.push_quad(pos.x, pos.y, panel.element.size.0, TITLE_BAR_HEIGHT, panel.title_bar_color);

        if let Some(atlas) = font_atlas {
            let baseline = pos.y + TITLE_BAR_HEIGHT * 0.75;
            self.push_text(atlas, &panel.title, pos.x + 6.0, baseline, panel.title_color);
        }
    }

    /// Update render commands for text
    pub fn update_text(&mut self, text: &UIText, font_atlas: Option<&FontAtlas>) {
        let Some(atlas) = font_atlas else {
            return;
        };
        if !text.element.visible {
            return;
        }
        let pos = UILayout::calculate_position(&text.element, self.screen_width, self.screen_height);
        self.push_text(atlas, &text.text, pos.x, pos.y, text.color);
    }

    /// Update render commands for a checkbox: box, check mark, label
    pub fn update_checkbox(&mut self, checkbox: &UICheckbox, font_atlas: Option<&FontAtlas>) {
        if !checkbox.element.visible {
            return;
        }
        let pos = UILayout::calculate_position(&checkbox.element, self.screen_width, self.screen_height);
        self.push_quad(pos.x, pos.y, CHECKBOX_SIZE, CHECKBOX_SIZE, checkbox.current_box_color());

        if checkbox.checked {
            let inner = CHECKBOX_SIZE - 2.0 * CHECK_INSET;
            self.push_quad(pos.x + CHECK_INSET, pos.y + CHECK_INSET, inner, inner, checkbox.check_color);
        }

        if let Some(atlas) = font_atlas {
            let label_x = pos.x + CHECKBOX_SIZE + CHECKBOX_LABEL_GAP;
            self.push_text(atlas, &checkbox.label, label_x, pos.y + CHECKBOX_SIZE - 2.0, checkbox.text_color);
        }
    }

    /// Update render commands for a slider: track, grab, caption
    pub fn update_slider(&mut self, slider: &UISlider, font_atlas: Option<&FontAtlas>) {
        if !slider.element.visible {
            return;
        }
        self.push_element(&slider.element, slider.track_color);

        let pos = UILayout::calculate_position(&slider.element, self.screen_width, self.screen_height);
        let (width, height) = slider.element.size;
        let travel = (width - SLIDER_GRAB_WIDTH).max(0.0);
        let grab_x = pos.x + travel * slider.fraction();
        self.push_quad(grab_x, pos.y, SLIDER_GRAB_WIDTH, height, slider.grab_color);

        if let Some(atlas) = font_atlas {
            let caption_x = pos.x + width + SLIDER_CAPTION_GAP;
            self.push_text(atlas, &slider.caption(), caption_x, pos.y + height - 2.0, slider.text_color);
        }
    }

    /// Glyph quads for `text` with its baseline starting at (`x`, `y`)
    fn push_text(&mut self, atlas: &FontAtlas, text: &str, x: f32, y: f32, color: Vec4) {
        let (glyph_vertices, indices) = TextLayout::new(atlas).layout_text(text);
        if indices.is_empty() {
            return;
        }

        let vertices = indices
            .iter()
            .map(|&index| {
                let vertex = &glyph_vertices[index as usize];
                let (ndc_x, ndc_y) = UILayout::screen_to_ndc(
                    x + vertex.position.x,
                    y + vertex.position.y,
                    self.screen_width,
                    self.screen_height,
                );
                UIVertex {
                    position: [ndc_x, ndc_y],
                    uv: [vertex.uv.x, vertex.uv.y],
                }
            })
            .collect();

        self.render_commands.push(UIRenderCommand::Text { vertices, color });
    }

    /// Get all render commands for current frame
    pub fn get_render_commands(&self) -> &[UIRenderCommand] {
        &self.render_commands
    }

    /// Clear render commands
    pub fn clear(&mut self) {
        self.render_commands.clear();
    }

    /// Submit the frame's commands: all panels first, then all text
    pub fn submit(&self, backend: &mut dyn UIRenderBackend) {
        let batches = UIBatches::from_commands(&self.render_commands);
        if batches.is_empty() {
            return;
        }

        backend.begin_ui_pass();
        if !batches.panel_vertices.is_empty() {
            backend.render_panel_batch(&batches.panel_vertices, &batches.panel_draws);
        }
        if !batches.text_vertices.is_empty() {
            backend.render_text_batch(&batches.text_vertices, &batches.text_draws);
        }
        backend.end_ui_pass();
    }
}
