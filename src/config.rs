use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::cli::Cli;
use crate::core::{ControlConfig, ViewportState};

pub const DEFAULT_RENDER_WIDTH: u32 = 600;
pub const DEFAULT_RENDER_HEIGHT: u32 = 400;
pub const DEFAULT_WINDOW_WIDTH: u32 = 800;
pub const DEFAULT_WINDOW_HEIGHT: u32 = 600;
pub const DEFAULT_MAX_FPS: f32 = 60.0;

/// Viewer settings, loadable from JSON with every field optional
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Pixel buffer width, fixed for the process lifetime
    pub render_width: u32,
    /// Pixel buffer height, fixed for the process lifetime
    pub render_height: u32,
    pub window_width: u32,
    pub window_height: u32,
    /// Startup view
    pub viewport: ViewportState,
    pub controls: ControlConfig,
    /// Render rate limit while the view changes; 0 disables the limit
    pub max_fps: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            render_width: DEFAULT_RENDER_WIDTH,
            render_height: DEFAULT_RENDER_HEIGHT,
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            viewport: ViewportState::default(),
            controls: ControlConfig::default(),
            max_fps: DEFAULT_MAX_FPS,
        }
    }
}

impl ViewerConfig {
    /// Read a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        let config = Self::from_json(&text)
            .with_context(|| format!("Failed to parse config file: {:?}", path))?;

        log::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Defaults, then the file named by `--config`, then flag overrides
    pub fn resolve(cli: &Cli) -> Result<Self> {
        let mut config = match &cli.config {
            Some(path) => Self::load(path)?,
            None => Self::default(),
        };
        config.apply_cli(cli);
        config.validate()?;
        Ok(config)
    }

    /// Overlay command-line values that were given
    pub fn apply_cli(&mut self, cli: &Cli) {
        if let Some(width) = cli.width {
            self.render_width = width;
        }
        if let Some(height) = cli.height {
            self.render_height = height;
        }
        if let Some(iterations) = cli.iterations {
            self.viewport.max_iterations = iterations;
        }
        if let Some(scale) = cli.scale {
            self.viewport.scale = scale;
        }
        if let Some(pan_x) = cli.pan_x {
            self.viewport.pan_x = pan_x;
        }
        if let Some(pan_y) = cli.pan_y {
            self.viewport.pan_y = pan_y;
        }
        if let Some(max_fps) = cli.max_fps {
            self.max_fps = max_fps;
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.render_width > 0 && self.render_height > 0,
            "render size must be non-zero, got {}x{}",
            self.render_width,
            self.render_height
        );
        ensure!(
            self.viewport.is_renderable(),
            "scale must be a positive finite number, got {}",
            self.viewport.scale
        );
        ensure!(
            self.controls.scale_exponent.is_finite() && self.controls.scale_exponent > 0.0,
            "scale_exponent must be positive, got {}",
            self.controls.scale_exponent
        );
        ensure!(
            self.max_fps.is_finite() && self.max_fps >= 0.0,
            "max_fps must be zero or positive, got {}",
            self.max_fps
        );

        if self.viewport.max_iterations > self.controls.max_iterations {
            log::warn!(
                "initial iterations {} exceed the slider maximum {}; the slider will clamp",
                self.viewport.max_iterations,
                self.controls.max_iterations
            );
        }

        Ok(())
    }
}
