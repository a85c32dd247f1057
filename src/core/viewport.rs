use serde::{Deserialize, Serialize};

pub const DEFAULT_SCALE: f32 = 200.0;
pub const DEFAULT_ITERATIONS: u32 = 30;

/// Point in the complex plane sampled for one pixel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ComplexCoord {
    pub re: f32,
    pub im: f32,
}

impl ComplexCoord {
    pub fn new(re: f32, im: f32) -> Self {
        Self { re, im }
    }
}

/// Everything a render pass reads: pan, zoom and detail.
///
/// Copied into each render call so a frame never mixes two parameter sets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportState {
    /// Horizontal pan in pixels (subtracted from the column)
    pub pan_x: i32,
    /// Vertical pan in pixels (added to the row)
    pub pan_y: i32,
    /// Pixels per complex-plane unit
    pub scale: f32,
    /// Iteration budget per pixel
    pub max_iterations: u32,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            pan_x: 0,
            pan_y: 0,
            scale: DEFAULT_SCALE,
            max_iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl ViewportState {
    pub fn new(pan_x: i32, pan_y: i32, scale: f32, max_iterations: u32) -> Self {
        Self {
            pan_x,
            pan_y,
            scale,
            max_iterations,
        }
    }

    /// Shift the pan offset by a pixel delta
    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        self.pan_x = self.pan_x.saturating_add(dx);
        self.pan_y = self.pan_y.saturating_add(dy);
    }

    /// A scale the renderer can divide by
    pub fn is_renderable(&self) -> bool {
        self.scale.is_finite() && self.scale > 0.0
    }

    /// Map a raster pixel to its complex-plane sample.
    ///
    /// The raster center maps to the origin when there is no pan. Rows grow
    /// downward and so does the imaginary part.
    pub fn pixel_to_complex(&self, px: u32, py: u32, width: u32, height: u32) -> ComplexCoord {
        let column = (px as i64 - self.pan_x as i64) as f32;
        let row = (py as i64 + self.pan_y as i64) as f32;

        ComplexCoord {
            re: (column - width as f32 / 2.0) / self.scale,
            im: (row - height as f32 / 2.0) / self.scale,
        }
    }
}
