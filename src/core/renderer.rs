use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::escape::{evaluate, EscapeResult};
use super::pixel_buffer::PixelBuffer;
use super::viewport::ViewportState;
use crate::math::{hsb_to_packed, BLACK};

/// Palette saturation for escaped points
pub const ESCAPE_SATURATION: f32 = 0.5;
/// Palette brightness for escaped points
pub const ESCAPE_BRIGHTNESS: f32 = 1.0;

/// How a render pass ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStatus {
    /// Every pixel was written
    Completed { bounded_pixels: usize },
    /// Stopped between rows; rows from `rows_completed` on keep old contents
    Cancelled { rows_completed: u32 },
    /// Scale was zero, negative or not finite, or the pixel slice did not
    /// hold exactly `width * height` entries; buffer untouched
    Skipped,
}

impl RenderStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, RenderStatus::Completed { .. })
    }
}

/// Shared flag that asks an in-flight render to stop at the next row
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }

    /// Clear the flag before starting a new pass
    pub fn reset(&self) {
        self.flag.store(false, Ordering::Relaxed);
    }
}

/// Color for one escape result.
///
/// Escaped points get a hue from the number of steps completed before the
/// escaping one, so the fraction stays in [0, 1).
pub fn escape_color(result: EscapeResult, max_iterations: u32) -> u32 {
    match result {
        EscapeResult::Bounded => BLACK,
        EscapeResult::Escaped(k) => {
            let hue = k.saturating_sub(1) as f32 / max_iterations as f32;
            hsb_to_packed(hue, ESCAPE_SATURATION, ESCAPE_BRIGHTNESS)
        }
    }
}

/// Evaluate and color a single pixel
pub fn shade_pixel(px: u32, py: u32, width: u32, height: u32, viewport: &ViewportState) -> u32 {
    let c = viewport.pixel_to_complex(px, py, width, height);
    let result = evaluate(c.re, c.im, viewport.max_iterations);
    escape_color(result, viewport.max_iterations)
}

/// Overwrite the whole buffer with the view described by `viewport`
pub fn render(buffer: &mut PixelBuffer, viewport: &ViewportState) -> RenderStatus {
    let (width, height) = buffer.dimensions();
    render_pixels(buffer.pixels_mut(), width, height, viewport, None)
}

/// Like [`render`], but stops between scan rows once `cancel` is set
pub fn render_cancellable(
    buffer: &mut PixelBuffer,
    viewport: &ViewportState,
    cancel: &CancelToken,
) -> RenderStatus {
    let (width, height) = buffer.dimensions();
    render_pixels(buffer.pixels_mut(), width, height, viewport, Some(cancel))
}

/// Render into a raw row-major slice of `width * height` packed colors
pub fn render_pixels(
    pixels: &mut [u32],
    width: u32,
    height: u32,
    viewport: &ViewportState,
    cancel: Option<&CancelToken>,
) -> RenderStatus {
    // Snapshot so every pixel of this pass sees the same parameters
    let view = *viewport;

    if !view.is_renderable() {
        log::warn!(
            "skipping render: scale {} is not a positive finite number",
            view.scale
        );
        return RenderStatus::Skipped;
    }

    let expected = width as usize * height as usize;
    if pixels.len() != expected {
        log::warn!(
            "skipping render: {} pixels given for a {}x{} raster",
            pixels.len(),
            width,
            height
        );
        return RenderStatus::Skipped;
    }

    if expected == 0 {
        return RenderStatus::Completed { bounded_pixels: 0 };
    }

    let mut bounded_pixels = 0;
    let rows = pixels.chunks_exact_mut(width as usize);

    for (py, row) in rows.enumerate() {
        if cancel.is_some_and(CancelToken::is_cancelled) {
            return RenderStatus::Cancelled {
                rows_completed: py as u32,
            };
        }

        for (px, pixel) in row.iter_mut().enumerate() {
            let c = view.pixel_to_complex(px as u32, py as u32, width, height);
            let result = evaluate(c.re, c.im, view.max_iterations);
            if result.is_bounded() {
                bounded_pixels += 1;
            }
            *pixel = escape_color(result, view.max_iterations);
        }
    }

    RenderStatus::Completed { bounded_pixels }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounded_is_black() {
        assert_eq!(escape_color(EscapeResult::Bounded, 30), BLACK);
    }

    #[test]
    fn first_step_escape_uses_hue_zero() {
        assert_eq!(escape_color(EscapeResult::Escaped(1), 30), 0xff8080);
    }

    #[test]
    fn zero_step_escape_does_not_wrap() {
        assert_eq!(escape_color(EscapeResult::Escaped(0), 30), 0xff8080);
    }

    #[test]
    fn halfway_escape_is_cyan() {
        // (k - 1) / max = 0.5
        assert_eq!(escape_color(EscapeResult::Escaped(11), 20), 0x80ffff);
    }

    #[test]
    fn small_render_matches_shade_pixel() {
        let vp = ViewportState::new(3, -2, 4.0, 12);
        let mut buffer = PixelBuffer::new(9, 7);
        render(&mut buffer, &vp);

        for y in 0..7 {
            for x in 0..9 {
                assert_eq!(buffer.get(x, y), Some(shade_pixel(x, y, 9, 7, &vp)));
            }
        }
    }

    #[test]
    fn zero_area_is_noop() {
        let mut buffer = PixelBuffer::new(0, 0);
        let status = render(&mut buffer, &ViewportState::default());
        assert_eq!(status, RenderStatus::Completed { bounded_pixels: 0 });
    }

    #[test]
    fn invalid_scale_leaves_buffer_untouched() {
        let mut buffer = PixelBuffer::new(4, 4);
        buffer.pixels_mut().fill(0x123456);

        let status = render(&mut buffer, &ViewportState::new(0, 0, 0.0, 30));

        assert_eq!(status, RenderStatus::Skipped);
        assert!(buffer.pixels().iter().all(|&p| p == 0x123456));
    }

    #[test]
    fn mismatched_slice_is_skipped() {
        let vp = ViewportState::new(0, 0, 2.0, 30);

        let mut short = vec![7u32; 10];
        let status = render_pixels(&mut short, 4, 4, &vp, None);
        assert_eq!(status, RenderStatus::Skipped);
        assert!(short.iter().all(|&p| p == 7));

        let mut long = vec![7u32; 20];
        let status = render_pixels(&mut long, 4, 4, &vp, None);
        assert_eq!(status, RenderStatus::Skipped);
        assert!(long.iter().all(|&p| p == 7));
    }

    #[test]
    fn cancelled_before_start_writes_nothing() {
        let mut buffer = PixelBuffer::new(8, 8);
        buffer.pixels_mut().fill(0x010203);
        let token = CancelToken::new();
        token.cancel();

        let status = render_cancellable(&mut buffer, &ViewportState::default(), &token);

        assert_eq!(status, RenderStatus::Cancelled { rows_completed: 0 });
        assert!(buffer.pixels().iter().all(|&p| p == 0x010203));
    }

    #[test]
    fn cancel_token_reset() {
        let token = CancelToken::new();
        let shared = token.clone();
        shared.cancel();
        assert!(token.is_cancelled());
        token.reset();
        assert!(!shared.is_cancelled());
    }
}
