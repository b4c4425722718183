//! Core engine implementation

use thiserror::Error;

use crate::config::AppConfig;
use crate::foundation::time::Timer;
use crate::input::{CursorMode, InputDispatcher};
use crate::render::device::{DeviceError, GraphicsDevice};
use crate::render::frame::{FrameRenderer, Projection, RenderFeatures, SceneAssets};
use crate::render::gl::GlDevice;
use crate::render::shader::{MaterialNaming, ShaderProgram};
use crate::render::window::{Window, WindowError};
use crate::state::ProgramState;
use crate::ui::overlay::DebugOverlay;
use crate::ui::text::FontAtlas;

/// Pixel size overlay text is rasterized at
pub const OVERLAY_FONT_SIZE: f32 = 14.0;

/// Engine errors
///
/// Everything here is fatal and happens before the first frame.
#[derive(Error, Debug)]
pub enum EngineError {
    /// Window or context creation failed
    #[error("Window error: {0}")]
    Window(#[from] WindowError),

    /// GL loading or program creation failed
    #[error("Device error: {0}")]
    Device(#[from] DeviceError),
}

/// Main engine struct
///
/// Owns the configuration; [`Engine::run`] creates everything else, drives
/// the frame loop until a close request, then persists state and releases
/// GPU resources.
pub struct Engine {
    config: AppConfig,
}

impl Engine {
    /// Create an engine for `config`
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Engine configuration
    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Initial program state: the configured lights plus whatever was persisted
    pub fn initial_state(&self) -> ProgramState {
        let mut state = ProgramState::with_lights(self.config.lighting.resolve());
        state.load_from_file(&self.config.assets.state_file);
        state
    }

    /// Run the main loop
    pub fn run(&self) -> Result<(), EngineError> {
        log::info!("Initializing engine...");
        let config = &self.config;
        let features = RenderFeatures::from(&config.features);
        let mut state = self.initial_state();

        let mut window = Window::new(&config.window)?;
        window.set_cursor_mode(CursorMode::for_overlay(state.overlay_enabled));
        let mut device = window.load_device()?;

        let assets = SceneAssets::load(&mut device, config, features)?;
        let projection = Projection {
            aspect_ratio: config.window.aspect_ratio(),
            near: config.scene.near,
            far: config.scene.far,
        };
        let renderer = FrameRenderer::new(features, assets, projection, config.scene.grass_grid_size)
            .with_grass_fan(config.scene.grass_fan);
        renderer.initialize(&mut device);

        let (width, height) = window.get_framebuffer_size();
        device.set_viewport(width, height);

        let overlay_programs = load_overlay_programs(&mut device, config)?;
        let font = match FontAtlas::load(&config.assets.overlay_font, OVERLAY_FONT_SIZE) {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("Overlay text disabled: {}", e);
                None
            }
        };
        let mut overlay = DebugOverlay::new(features, font, width as f32, height as f32);
        let (window_width, window_height) = window.get_window_size();
        overlay.set_window_size(window_width as f32, window_height as f32);

        let mut dispatcher = InputDispatcher::new();
        let mut timer = Timer::new();

        log::info!("Starting main loop...");
        while !window.should_close() {
            let delta_time = timer.tick(window.get_time());

            let events = window.flush_events();
            for event in &events {
                overlay.observe(event, state.overlay_enabled);
            }
            let response = dispatcher.dispatch_all(events, &mut state);
            dispatcher.apply_held_keys(&mut state, delta_time);

            if let Some((width, height)) = response.viewport {
                device.set_viewport(width, height);
            }
            if let Some(mode) = response.cursor_mode {
                window.set_cursor_mode(mode);
            }
            if response.close_requested {
                window.set_should_close(true);
            }

            renderer.render(&mut device, &state);
            if state.overlay_enabled {
                overlay.frame(&mut state, &mut device);
            }

            window.swap_buffers();
            window.poll_events();
        }

        log::info!(
            "Main loop finished after {} frames ({:.1} fps average)",
            timer.frame_count(),
            timer.average_fps()
        );

        if let Err(e) = state.save_to_file(&config.assets.state_file) {
            log::error!("Failed to save state to {}: {}", config.assets.state_file.display(), e);
        }

        device.detach_overlay();
        for program in overlay_programs {
            device.delete_program(program.handle());
        }
        renderer.destroy(&mut device);

        log::info!("Engine shutdown complete");
        Ok(())
    }
}

fn load_overlay_programs(device: &mut GlDevice, config: &AppConfig) -> Result<[ShaderProgram; 2], EngineError> {
    let panel = ShaderProgram::load(device, "overlay_panel", &config.shaders.overlay_panel, MaterialNaming::default())?;
    let text = ShaderProgram::load(device, "overlay_text", &config.shaders.overlay_text, MaterialNaming::default())?;
    device.attach_overlay_programs(panel.handle(), text.handle());
    Ok([panel, text])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_uses_configured_lights_without_saved_file() {
        let mut config = AppConfig::default();
        config.assets.state_file = std::env::temp_dir().join("pitch_engine_engine_missing_state.txt");
        let _ = std::fs::remove_file(&config.assets.state_file);
        let expected = config.lighting.resolve();

        let state = Engine::new(config).initial_state();
        assert_eq!(state.lights, expected);
        assert!(!state.overlay_enabled);
    }
}
