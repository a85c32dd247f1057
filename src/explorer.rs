use std::time::{Duration, Instant};

use crate::config::ViewerConfig;
use crate::core::{
    render_cancellable, CancelToken, ControlPanel, DragTracker, PixelBuffer, RedrawThrottle,
    RenderStatus, ViewportState,
};

/// Outcome of one render pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStats {
    /// Sequence number, starting at 1
    pub frame: u64,
    pub duration: Duration,
    pub status: RenderStatus,
}

/// Interactive session state: the view, the controls that drive it, and the
/// buffer it renders into.
///
/// Input only marks the view dirty; rendering happens in [`Explorer::tick`]
/// once the throttle allows it.
pub struct Explorer {
    buffer: PixelBuffer,
    initial: ViewportState,
    viewport: ViewportState,
    controls: ControlPanel,
    drag: DragTracker,
    throttle: RedrawThrottle,
    cancel: CancelToken,
    dirty: bool,
    frames: u64,
    last_stats: Option<RenderStats>,
}

impl Explorer {
    pub fn new(config: &ViewerConfig) -> Self {
        let viewport = config.viewport;
        let controls = ControlPanel::new(config.controls, viewport.max_iterations, viewport.scale);

        Self {
            buffer: PixelBuffer::new(config.render_width, config.render_height),
            initial: viewport,
            viewport,
            controls,
            drag: DragTracker::new(config.render_width, config.render_height),
            throttle: RedrawThrottle::from_fps(config.max_fps),
            cancel: CancelToken::new(),
            dirty: true,
            frames: 0,
            last_stats: None,
        }
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn viewport(&self) -> ViewportState {
        self.viewport
    }

    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn last_stats(&self) -> Option<RenderStats> {
        self.last_stats
    }

    /// Handle for stopping a render from elsewhere
    pub fn cancel_handle(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Move the detail slider
    pub fn set_iteration_slider(&mut self, value: u32) {
        let iterations = self.controls.set_iteration_slider(value);
        self.update_viewport(ViewportState {
            max_iterations: iterations,
            ..self.viewport
        });
    }

    /// Move the zoom slider
    pub fn set_scale_slider(&mut self, value: u32) {
        let scale = self.controls.set_scale_slider(value);
        self.update_viewport(ViewportState {
            scale,
            ..self.viewport
        });
    }

    pub fn begin_drag(&mut self, x: f32, y: f32) {
        self.drag.press(x, y);
    }

    pub fn drag_to(&mut self, x: f32, y: f32) {
        if let Some((dx, dy)) = self.drag.move_to(x, y) {
            self.pan_by(dx, dy);
        }
    }

    pub fn end_drag(&mut self) {
        self.drag.release();
    }

    pub fn pan_by(&mut self, dx: i32, dy: i32) {
        let mut next = self.viewport;
        next.pan_by(dx, dy);
        self.update_viewport(next);
    }

    /// Back to the startup view and slider positions
    pub fn reset_view(&mut self) {
        self.controls = ControlPanel::new(
            *self.controls.config(),
            self.initial.max_iterations,
            self.initial.scale,
        );
        self.drag.release();
        self.update_viewport(self.initial);
    }

    /// Seconds until the pending redraw may run, or None when up to date
    pub fn time_until_redraw(&self) -> Option<f32> {
        self.dirty.then(|| self.throttle.remaining())
    }

    /// Advance time; renders when the view changed and the throttle allows
    pub fn tick(&mut self, delta: f32) -> Option<RenderStats> {
        self.throttle.advance(delta);

        if self.dirty && self.throttle.is_ready() {
            Some(self.render_now())
        } else {
            None
        }
    }

    /// Render immediately, ignoring the throttle
    pub fn render_now(&mut self) -> RenderStats {
        self.cancel.reset();
        let viewport = self.viewport;

        let start = Instant::now();
        let status = render_cancellable(&mut self.buffer, &viewport, &self.cancel);
        let duration = start.elapsed();

        self.frames += 1;
        self.throttle.mark_rendered();
        // A cancelled pass leaves stale rows; keep it pending
        self.dirty = matches!(status, RenderStatus::Cancelled { .. });

        let stats = RenderStats {
            frame: self.frames,
            duration,
            status,
        };

        log::debug!(
            "frame {} rendered in {:.2} ms: {:?} (pan {},{} scale {} iterations {})",
            stats.frame,
            duration.as_secs_f64() * 1000.0,
            status,
            viewport.pan_x,
            viewport.pan_y,
            viewport.scale,
            viewport.max_iterations
        );

        self.last_stats = Some(stats);
        stats
    }

    fn update_viewport(&mut self, next: ViewportState) {
        if next != self.viewport {
            self.viewport = next;
            self.dirty = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_config() -> ViewerConfig {
        ViewerConfig {
            render_width: 60,
            render_height: 40,
            viewport: ViewportState::new(0, 0, 20.0, 30),
            max_fps: 10.0,
            ..ViewerConfig::default()
        }
    }

    #[test]
    fn starts_dirty_and_renders_first_tick() {
        let mut explorer = Explorer::new(&small_config());
        assert!(explorer.is_dirty());

        let stats = explorer.tick(0.0).expect("first frame renders");
        assert_eq!(stats.frame, 1);
        assert!(stats.status.is_completed());
        assert!(!explorer.is_dirty());
        assert_eq!(explorer.time_until_redraw(), None);
    }

    #[test]
    fn clean_view_does_not_rerender() {
        let mut explorer = Explorer::new(&small_config());
        explorer.tick(0.0);
        assert!(explorer.tick(1.0).is_none());
    }

    #[test]
    fn throttle_defers_redraw() {
        let mut explorer = Explorer::new(&small_config());
        explorer.tick(0.0);

        explorer.pan_by(5, 0);
        assert!(explorer.tick(0.02).is_none());
        assert!(explorer.time_until_redraw().unwrap() > 0.0);

        let stats = explorer.tick(0.1).expect("interval elapsed");
        assert_eq!(stats.frame, 2);
    }

    #[test]
    fn unchanged_input_stays_clean() {
        let mut explorer = Explorer::new(&small_config());
        explorer.tick(0.0);

        explorer.set_iteration_slider(30);
        explorer.pan_by(0, 0);
        assert!(!explorer.is_dirty());
    }

    #[test]
    fn sliders_drive_viewport() {
        let mut explorer = Explorer::new(&small_config());

        explorer.set_iteration_slider(50);
        explorer.set_scale_slider(200);

        let vp = explorer.viewport();
        assert_eq!(vp.max_iterations, 50);
        assert_eq!(vp.scale, 339.0);
    }

    #[test]
    fn drag_pans_view() {
        let mut explorer = Explorer::new(&small_config());
        explorer.begin_drag(10.0, 10.0);
        explorer.drag_to(14.0, 7.0);
        explorer.end_drag();

        let vp = explorer.viewport();
        assert_eq!((vp.pan_x, vp.pan_y), (4, 3));
        assert!(!explorer.is_dragging());
    }

    #[test]
    fn reset_restores_startup_view() {
        let mut explorer = Explorer::new(&small_config());
        explorer.set_scale_slider(900);
        explorer.pan_by(-30, 8);

        explorer.reset_view();

        assert_eq!(explorer.viewport(), small_config().viewport);
        assert_eq!(explorer.controls().scale_slider(), 20);
    }

    #[test]
    fn stale_cancel_request_is_cleared() {
        let mut explorer = Explorer::new(&small_config());
        explorer.cancel_handle().cancel();

        let stats = explorer.render_now();

        assert!(stats.status.is_completed());
        assert!(!explorer.cancel_handle().is_cancelled());
        assert_eq!(explorer.last_stats(), Some(stats));
    }
}
