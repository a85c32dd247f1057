use serde::{Deserialize, Serialize};

/// Smallest scale the controls will hand to the renderer
pub const MIN_SCALE: f32 = 1.0;

/// Slider ranges and the slider-to-scale curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    /// Upper bound of the iteration slider
    pub max_iterations: u32,
    /// Upper bound of the scale slider
    pub max_scale: u32,
    /// Effective scale is `slider ^ scale_exponent`
    pub scale_exponent: f64,
}

impl Default for ControlConfig {
    fn default() -> Self {
        Self {
            max_iterations: 75,
            max_scale: 1000,
            scale_exponent: 1.1,
        }
    }
}

/// Current positions of the detail and zoom sliders
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPanel {
    config: ControlConfig,
    iteration_slider: u32,
    scale_slider: u32,
}

impl ControlPanel {
    /// Place both sliders at the given startup values, clamped to range
    pub fn new(config: ControlConfig, iterations: u32, scale: f32) -> Self {
        let scale_slider = if scale.is_finite() && scale > 0.0 {
            (scale as u32).min(config.max_scale)
        } else {
            0
        };

        Self {
            config,
            iteration_slider: iterations.min(config.max_iterations),
            scale_slider,
        }
    }

    pub fn config(&self) -> &ControlConfig {
        &self.config
    }

    pub fn iteration_slider(&self) -> u32 {
        self.iteration_slider
    }

    pub fn scale_slider(&self) -> u32 {
        self.scale_slider
    }

    /// Move the iteration slider; returns the clamped budget
    pub fn set_iteration_slider(&mut self, value: u32) -> u32 {
        self.iteration_slider = value.min(self.config.max_iterations);
        self.iteration_slider
    }

    /// Move the scale slider; returns the effective scale
    pub fn set_scale_slider(&mut self, value: u32) -> f32 {
        self.scale_slider = value.min(self.config.max_scale);
        self.effective_scale()
    }

    /// Scale implied by the current slider position
    pub fn effective_scale(&self) -> f32 {
        scale_from_slider(self.scale_slider, self.config.scale_exponent)
    }
}

/// Non-linear slider mapping so zoom feels even across the range.
///
/// Truncated to a whole number of pixels per unit and never below
/// [`MIN_SCALE`].
pub fn scale_from_slider(slider: u32, exponent: f64) -> f32 {
    let scale = (slider as f64).powf(exponent).trunc() as f32;
    scale.max(MIN_SCALE)
}
