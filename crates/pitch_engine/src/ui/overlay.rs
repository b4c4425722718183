//! Debug overlay
//!
//! Small stack of windows drawn over the scene while the overlay is
//! enabled. Widgets are persistent so that drags survive across frames, but
//! their values are re-read from [`ProgramState`] every frame and written
//! back after input is processed; the state stays the single owner.

use crate::input::InputEvent;
use crate::render::frame::RenderFeatures;
use crate::state::ProgramState;
use crate::ui::backend::{FontAtlasHandle, UIRenderBackend};
use crate::ui::input::UIInputProcessor;
use crate::ui::rendering::UIRenderer;
use crate::ui::text::FontAtlas;
use crate::ui::widgets::{UICheckbox, UIElement, UIPanel, UISlider, UIText, WidgetState, TITLE_BAR_HEIGHT};

const WINDOW_X: f32 = 10.0;
const WINDOW_Y: f32 = 10.0;
const WINDOW_WIDTH: f32 = 440.0;
const WINDOW_SPACING: f32 = 10.0;
const PADDING: f32 = 8.0;
const ROW_HEIGHT: f32 = 20.0;
const CONTROL_HEIGHT: f32 = 14.0;
const CHECKBOX_WIDTH: f32 = 220.0;
const SLIDER_WIDTH: f32 = 200.0;

/// Windows the overlay can show
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayWindow {
    /// Multisampling checkbox
    AntiAliasing,
    /// Camera readout and mouse-look checkbox
    CameraInfo,
    /// Background colour, scratch scale and point light attenuation
    PointLight,
}

impl OverlayWindow {
    /// Title bar text
    pub fn title(self) -> &'static str {
        match self {
            OverlayWindow::AntiAliasing => "Enable anti-aliasing",
            OverlayWindow::CameraInfo => "Camera info",
            OverlayWindow::PointLight => "Point light",
        }
    }

    fn rows(self) -> usize {
        match self {
            OverlayWindow::AntiAliasing => 1,
            OverlayWindow::CameraInfo => 4,
            OverlayWindow::PointLight => 7,
        }
    }

    /// Windows present for a renderer variant, top to bottom
    pub fn for_features(features: RenderFeatures) -> Vec<OverlayWindow> {
        let mut windows = Vec::with_capacity(3);
        if features.contains(RenderFeatures::ANTI_ALIASING_TOGGLE) {
            windows.push(OverlayWindow::AntiAliasing);
        }
        windows.push(OverlayWindow::CameraInfo);
        if features.contains(RenderFeatures::RUNTIME_LIGHT_EDITING) {
            windows.push(OverlayWindow::PointLight);
        }
        windows
    }
}

/// Screen-space origin of row `row` inside a window whose top is at `window_y`
fn row_origin(window_y: f32, row: usize) -> (f32, f32) {
    (
        WINDOW_X + PADDING,
        window_y + TITLE_BAR_HEIGHT + PADDING + row as f32 * ROW_HEIGHT,
    )
}

/// Text lines of the camera window
pub fn camera_info_lines(state: &ProgramState) -> [String; 3] {
    let c = &state.camera;
    [
        format!(
            "Camera position: ({:.6}, {:.6}, {:.6})",
            c.position.x, c.position.y, c.position.z
        ),
        format!("(Yaw, Pitch): ({:.6}, {:.6})", c.yaw, c.pitch),
        format!("Camera front: ({:.6}, {:.6}, {:.6})", c.front.x, c.front.y, c.front.z),
    ]
}

struct LightControls {
    clear_color: [UISlider; 3],
    scale: UISlider,
    constant: UISlider,
    linear: UISlider,
    quadratic: UISlider,
}

impl LightControls {
    fn new(window_y: f32) -> Self {
        let slider = |row: usize, label: &str, min: f32, max: f32| {
            let (x, y) = row_origin(window_y, row);
            UISlider::new(label, min, max, x, y + (ROW_HEIGHT - CONTROL_HEIGHT) / 2.0, SLIDER_WIDTH, CONTROL_HEIGHT)
        };
        Self {
            clear_color: [
                slider(0, "Background R", 0.0, 1.0),
                slider(1, "Background G", 0.0, 1.0),
                slider(2, "Background B", 0.0, 1.0),
            ],
            scale: slider(3, "Editable scale", 0.1, 4.0),
            constant: slider(4, "pointLight.constant", 0.0, 2.0),
            linear: slider(5, "pointLight.linear", 0.0, 1.0),
            quadratic: slider(6, "pointLight.quadratic", 0.0, 1.0),
        }
    }

    fn sliders(&self) -> impl Iterator<Item = &UISlider> {
        self.clear_color
            .iter()
            .chain([&self.scale, &self.constant, &self.linear, &self.quadratic])
    }
}

/// Debug overlay bound to the program state
pub struct DebugOverlay {
    windows: Vec<(OverlayWindow, UIPanel)>,
    input: UIInputProcessor,
    renderer: UIRenderer,
    framebuffer_size: (f32, f32),
    window_size: (f32, f32),
    font: Option<FontAtlas>,
    font_handle: Option<FontAtlasHandle>,
    camera_text_origin: Option<(f32, f32)>,
    anti_aliasing: Option<UICheckbox>,
    camera_mouse_update: Option<UICheckbox>,
    light_controls: Option<LightControls>,
}

impl DebugOverlay {
    /// Lay out the windows for a renderer variant
    ///
    /// Layout and hit testing work in framebuffer pixels. The window size
    /// starts equal to the framebuffer size; see [`DebugOverlay::set_window_size`].
    /// Without a font the overlay still draws and reacts, but shows no text.
    pub fn new(features: RenderFeatures, font: Option<FontAtlas>, screen_width: f32, screen_height: f32) -> Self {
        let mut overlay = Self {
            windows: Vec::new(),
            input: UIInputProcessor::new(screen_width, screen_height),
            renderer: UIRenderer::new(screen_width, screen_height),
            framebuffer_size: (screen_width, screen_height),
            window_size: (screen_width, screen_height),
            font,
            font_handle: None,
            camera_text_origin: None,
            anti_aliasing: None,
            camera_mouse_update: None,
            light_controls: None,
        };

        let mut window_y = WINDOW_Y;
        for window in OverlayWindow::for_features(features) {
            let height = TITLE_BAR_HEIGHT + 2.0 * PADDING + window.rows() as f32 * ROW_HEIGHT;
            let panel = UIPanel {
                element: UIElement::at(WINDOW_X, window_y, WINDOW_WIDTH, height),
                title: window.title().to_string(),
                ..UIPanel::default()
            };

            match window {
                OverlayWindow::AntiAliasing => {
                    let (x, y) = row_origin(window_y, 0);
                    overlay.anti_aliasing = Some(UICheckbox::new("Anti-aliasing", x, y, CHECKBOX_WIDTH));
                }
                OverlayWindow::CameraInfo => {
                    overlay.camera_text_origin = Some(row_origin(window_y, 0));
                    let (x, y) = row_origin(window_y, 3);
                    overlay.camera_mouse_update = Some(UICheckbox::new("Camera mouse update", x, y, CHECKBOX_WIDTH));
                }
                OverlayWindow::PointLight => {
                    overlay.light_controls = Some(LightControls::new(window_y));
                }
            }

            overlay.windows.push((window, panel));
            window_y += height + WINDOW_SPACING;
        }

        overlay
    }

    /// Titles of the windows shown, top to bottom
    pub fn window_titles(&self) -> Vec<&'static str> {
        self.windows.iter().map(|(window, _)| window.title()).collect()
    }

    /// Window size in screen coordinates, used to map cursor positions to pixels
    pub fn set_window_size(&mut self, width: f32, height: f32) {
        self.window_size = (width, height);
    }

    /// Feed a pointer or resize event
    pub fn handle_event(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::CursorMoved { x, y } => {
                let (x, y) = self.cursor_to_pixels(x as f32, y as f32);
                self.input.update_mouse_position(x, y);
            }
            InputEvent::MouseButton { button, pressed } => self.input.update_mouse_button(button, pressed),
            InputEvent::WindowResized { width, height } => self.set_window_size(width as f32, height as f32),
            InputEvent::FramebufferResized { width, height } => {
                self.framebuffer_size = (width as f32, height as f32);
                self.input.set_screen_size(width as f32, height as f32);
                self.renderer.set_screen_size(width as f32, height as f32);
            }
            _ => {}
        }
    }

    /// Feed an event whether or not the overlay is shown
    ///
    /// Cursor and resize events are always tracked so the pointer position
    /// is current the moment the overlay opens; button events only count
    /// while it is `visible`.
    pub fn observe(&mut self, event: &InputEvent, visible: bool) {
        if visible || !matches!(event, InputEvent::MouseButton { .. }) {
            self.handle_event(event);
        }
    }

    fn cursor_to_pixels(&self, x: f32, y: f32) -> (f32, f32) {
        let (fb_width, fb_height) = self.framebuffer_size;
        let (win_width, win_height) = self.window_size;
        if win_width <= 0.0 || win_height <= 0.0 {
            return (x, y);
        }
        (x * fb_width / win_width, y * fb_height / win_height)
    }

    /// Apply this frame's clicks and drags to `state`
    pub fn update(&mut self, state: &mut ProgramState) {
        if let Some(checkbox) = &mut self.anti_aliasing {
            checkbox.checked = state.anti_aliasing;
            self.input.process_checkbox(checkbox);
            state.anti_aliasing = checkbox.checked;
        }

        if let Some(checkbox) = &mut self.camera_mouse_update {
            checkbox.checked = state.camera_mouse_update_enabled;
            self.input.process_checkbox(checkbox);
            state.camera_mouse_update_enabled = checkbox.checked;
        }

        if let Some(controls) = &mut self.light_controls {
            for (slider, channel) in controls.clear_color.iter_mut().zip(state.clear_color.iter_mut()) {
                sync_slider(&self.input, slider, channel);
            }
            sync_slider(&self.input, &mut controls.scale, &mut state.editable_scale);
            let point = &mut state.lights.point;
            sync_slider(&self.input, &mut controls.constant, &mut point.constant);
            sync_slider(&self.input, &mut controls.linear, &mut point.linear);
            sync_slider(&self.input, &mut controls.quadratic, &mut point.quadratic);
        }

        self.input.reset_frame_flags();
    }

    /// Rebuild this frame's draw commands from `state`
    pub fn build(&mut self, state: &ProgramState) {
        self.renderer.clear();
        let font = self.font.as_ref();

        for (_, panel) in &self.windows {
            self.renderer.update_panel(panel, font);
        }

        if let Some(checkbox) = &self.anti_aliasing {
            self.renderer.update_checkbox(checkbox, font);
        }

        if let Some((x, y)) = self.camera_text_origin {
            for (row, line) in camera_info_lines(state).into_iter().enumerate() {
                let baseline = y + row as f32 * ROW_HEIGHT + ROW_HEIGHT * 0.7;
                self.renderer.update_text(&UIText::new(line, x, baseline), font);
            }
        }
        if let Some(checkbox) = &self.camera_mouse_update {
            self.renderer.update_checkbox(checkbox, font);
        }

        if let Some(controls) = &self.light_controls {
            for slider in controls.sliders() {
                self.renderer.update_slider(slider, font);
            }
        }
    }

    /// Draw the overlay, uploading the font atlas on first use
    pub fn render(&mut self, backend: &mut dyn UIRenderBackend) {
        if self.font_handle.is_none() {
            if let Some(font) = &self.font {
                self.font_handle = Some(backend.upload_font_atlas(font));
            }
        }
        self.renderer.submit(backend);
    }

    /// Update, rebuild and draw in one step
    pub fn frame(&mut self, state: &mut ProgramState, backend: &mut dyn UIRenderBackend) {
        self.update(state);
        self.build(state);
        self.render(backend);
    }
}

fn sync_slider(input: &UIInputProcessor, slider: &mut UISlider, value: &mut f32) {
    if slider.state != WidgetState::Pressed {
        slider.set_value(*value);
    }
    if input.process_slider(slider) {
        *value = slider.value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::MouseButton;
    use crate::ui::backend::FontAtlasHandle;
    use crate::ui::rendering::{BatchDraw, PanelVertex, UIVertex};
    use crate::ui::text::text_layout::tests::test_atlas;

    #[derive(Default)]
    struct CountingBackend {
        passes: usize,
        panel_draws: usize,
        text_draws: usize,
        uploads: usize,
    }

    impl UIRenderBackend for CountingBackend {
        fn begin_ui_pass(&mut self) {
            self.passes += 1;
        }
        fn render_panel_batch(&mut self, _vertices: &[PanelVertex], draws: &[BatchDraw]) {
            self.panel_draws += draws.len();
        }
        fn render_text_batch(&mut self, _vertices: &[UIVertex], draws: &[BatchDraw]) {
            self.text_draws += draws.len();
        }
        fn end_ui_pass(&mut self) {}
        fn upload_font_atlas(&mut self, _atlas: &FontAtlas) -> FontAtlasHandle {
            self.uploads += 1;
            FontAtlasHandle(7)
        }
    }

    fn click(overlay: &mut DebugOverlay, state: &mut ProgramState, x: f64, y: f64) {
        overlay.handle_event(&InputEvent::CursorMoved { x, y });
        overlay.handle_event(&InputEvent::MouseButton { button: MouseButton::Left, pressed: true });
        overlay.update(state);
        overlay.handle_event(&InputEvent::MouseButton { button: MouseButton::Left, pressed: false });
        overlay.update(state);
    }

    #[test]
    fn test_windows_follow_features() {
        let default = DebugOverlay::new(RenderFeatures::all() - RenderFeatures::RUNTIME_LIGHT_EDITING, None, 800.0, 600.0);
        assert_eq!(default.window_titles(), vec!["Enable anti-aliasing", "Camera info"]);

        let minimal = DebugOverlay::new(RenderFeatures::RUNTIME_LIGHT_EDITING, None, 800.0, 600.0);
        assert_eq!(minimal.window_titles(), vec!["Camera info", "Point light"]);
    }

    #[test]
    fn test_camera_lines_use_six_decimals() {
        let state = ProgramState::default();
        let [position, angles, front] = camera_info_lines(&state);
        assert_eq!(position, "Camera position: (0.000000, 0.000000, 3.000000)");
        assert_eq!(angles, "(Yaw, Pitch): (-90.000000, 0.000000)");
        assert!(front.starts_with("Camera front: ("));
        assert!(front.ends_with("-1.000000)"));
    }

    #[test]
    fn test_clicking_checkboxes_updates_state() {
        let mut overlay = DebugOverlay::new(RenderFeatures::ANTI_ALIASING_TOGGLE, None, 800.0, 600.0);
        let mut state = ProgramState::default();
        state.camera_mouse_update_enabled = false;

        let (x, y) = row_origin(WINDOW_Y, 0);
        click(&mut overlay, &mut state, f64::from(x + 2.0), f64::from(y + 2.0));
        assert!(!state.anti_aliasing);

        let camera_window_y = WINDOW_Y + TITLE_BAR_HEIGHT + 2.0 * PADDING + ROW_HEIGHT + WINDOW_SPACING;
        let (x, y) = row_origin(camera_window_y, 3);
        click(&mut overlay, &mut state, f64::from(x + 2.0), f64::from(y + 2.0));
        assert!(state.camera_mouse_update_enabled);
    }

    #[test]
    fn test_click_on_high_density_display_hits_drawn_checkbox() {
        let mut overlay = DebugOverlay::new(RenderFeatures::ANTI_ALIASING_TOGGLE, None, 1600.0, 1200.0);
        overlay.set_window_size(800.0, 600.0);
        let mut state = ProgramState::default();

        let (x, y) = row_origin(WINDOW_Y, 0);
        click(&mut overlay, &mut state, f64::from((x + 7.0) / 2.0), f64::from((y + 7.0) / 2.0));
        assert!(!state.anti_aliasing);
    }

    #[test]
    fn test_window_resize_event_updates_cursor_mapping() {
        let mut overlay = DebugOverlay::new(RenderFeatures::ANTI_ALIASING_TOGGLE, None, 800.0, 600.0);
        overlay.handle_event(&InputEvent::FramebufferResized { width: 1600, height: 1200 });
        overlay.handle_event(&InputEvent::WindowResized { width: 800, height: 600 });

        overlay.handle_event(&InputEvent::CursorMoved { x: 100.0, y: 50.0 });
        assert_eq!(overlay.input.mouse_position(), (200.0, 100.0));
    }

    #[test]
    fn test_dragging_attenuation_slider_edits_point_light() {
        let mut overlay = DebugOverlay::new(RenderFeatures::RUNTIME_LIGHT_EDITING, None, 800.0, 600.0);
        let mut state = ProgramState::default();

        let camera_height = TITLE_BAR_HEIGHT + 2.0 * PADDING + 4.0 * ROW_HEIGHT;
        let light_window_y = WINDOW_Y + camera_height + WINDOW_SPACING;
        let (x, y) = row_origin(light_window_y, 4);
        let track_y = y + ROW_HEIGHT / 2.0;

        overlay.handle_event(&InputEvent::CursorMoved { x: f64::from(x), y: f64::from(track_y) });
        overlay.handle_event(&InputEvent::MouseButton { button: MouseButton::Left, pressed: true });
        overlay.update(&mut state);
        assert_eq!(state.lights.point.constant, 0.0);

        overlay.handle_event(&InputEvent::CursorMoved { x: f64::from(x + SLIDER_WIDTH / 2.0), y: 0.0 });
        overlay.update(&mut state);
        assert!((state.lights.point.constant - 1.0).abs() < 1e-5);

        let linear_before = state.lights.point.linear;
        overlay.handle_event(&InputEvent::MouseButton { button: MouseButton::Left, pressed: false });
        overlay.update(&mut state);
        assert_eq!(state.lights.point.linear, linear_before);
    }

    #[test]
    fn test_render_uploads_font_once() {
        let mut overlay = DebugOverlay::new(RenderFeatures::all(), Some(test_atlas()), 800.0, 600.0);
        let mut state = ProgramState::default();
        let mut backend = CountingBackend::default();

        overlay.frame(&mut state, &mut backend);
        overlay.frame(&mut state, &mut backend);

        assert_eq!(backend.uploads, 1);
        assert_eq!(backend.passes, 2);
        assert!(backend.panel_draws > 0);
        assert!(backend.text_draws > 0);
    }
}
