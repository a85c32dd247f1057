use mandelbrot_viewer::core::{render, PixelBuffer, RenderStatus, ViewportState};
use mandelbrot_viewer::{Explorer, ViewerConfig};

fn config(max_fps: f32) -> ViewerConfig {
    ViewerConfig {
        render_width: 80,
        render_height: 60,
        viewport: ViewportState::new(0, 0, 25.0, 30),
        max_fps,
        ..ViewerConfig::default()
    }
}

/// Render the same view directly for comparison
fn reference(viewport: &ViewportState) -> PixelBuffer {
    let mut buffer = PixelBuffer::new(80, 60);
    render(&mut buffer, viewport);
    buffer
}

#[test]
fn test_first_frame_matches_direct_render() {
    let mut explorer = Explorer::new(&config(0.0));
    explorer.tick(0.0).expect("startup frame");

    assert_eq!(explorer.buffer(), &reference(&explorer.viewport()));
}

#[test]
fn test_unlimited_rate_renders_every_change() {
    let mut explorer = Explorer::new(&config(0.0));
    explorer.tick(0.0);

    for step in 1..=5 {
        explorer.pan_by(step, -step);
        let stats = explorer.tick(0.0).expect("no throttle");
        assert_eq!(stats.frame, step as u64 + 1);
    }

    let vp = explorer.viewport();
    assert_eq!((vp.pan_x, vp.pan_y), (15, -15));
}

#[test]
fn test_changes_coalesce_under_throttle() {
    let mut explorer = Explorer::new(&config(20.0));
    explorer.tick(0.0);

    explorer.pan_by(3, 0);
    explorer.pan_by(3, 0);
    explorer.set_iteration_slider(40);
    assert!(explorer.tick(0.01).is_none());

    let stats = explorer.tick(0.05).expect("interval elapsed");
    assert_eq!(stats.frame, 2);
    assert!(explorer.tick(1.0).is_none());

    let vp = explorer.viewport();
    assert_eq!(vp.pan_x, 6);
    assert_eq!(vp.max_iterations, 40);
    assert_eq!(explorer.buffer(), &reference(&vp));
}

#[test]
fn test_drag_session_accumulates_pan() {
    let mut explorer = Explorer::new(&config(0.0));

    explorer.begin_drag(40.0, 30.0);
    assert!(explorer.is_dragging());
    explorer.drag_to(45.0, 30.0);
    explorer.drag_to(45.0, 20.0);
    explorer.drag_to(45.7, 20.2);
    explorer.end_drag();

    let vp = explorer.viewport();
    assert_eq!((vp.pan_x, vp.pan_y), (5, 10));

    // Movement after release does nothing
    explorer.drag_to(0.0, 0.0);
    assert_eq!(explorer.viewport(), vp);
}

#[test]
fn test_slider_extremes() {
    let mut explorer = Explorer::new(&config(0.0));

    explorer.set_scale_slider(0);
    assert_eq!(explorer.viewport().scale, 1.0);

    explorer.set_scale_slider(5000);
    assert_eq!(explorer.controls().scale_slider(), 1000);
    assert_eq!(explorer.viewport().scale, 1995.0);

    explorer.set_iteration_slider(0);
    let stats = explorer.tick(0.0).expect("dirty");
    assert_eq!(
        stats.status,
        RenderStatus::Completed {
            bounded_pixels: 80 * 60
        }
    );
}

#[test]
fn test_reset_after_exploring() {
    let mut explorer = Explorer::new(&config(0.0));
    explorer.tick(0.0);
    let startup = explorer.buffer().clone();

    explorer.set_scale_slider(600);
    explorer.pan_by(-40, 12);
    explorer.tick(0.0);
    assert_ne!(explorer.buffer(), &startup);

    explorer.reset_view();
    explorer.tick(0.0).expect("reset marks dirty");
    assert_eq!(explorer.buffer(), &startup);
}
