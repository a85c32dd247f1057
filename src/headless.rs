use crate::config::ViewerConfig;
use crate::core::{render, PerfResult, PerfTest, PixelBuffer, RenderStatus};

/// Summary of a windowless benchmark run
#[derive(Debug, Clone)]
pub struct HeadlessReport {
    pub perf: PerfResult,
    /// Status of the last measured frame
    pub status: RenderStatus,
    pub pixel_count: usize,
}

impl HeadlessReport {
    pub fn print(&self) {
        self.perf.print_summary();
        println!("Pixels/sec: {:.0}", self.perf.throughput(self.pixel_count));
        if let RenderStatus::Completed { bounded_pixels } = self.status {
            let share = bounded_pixels as f64 / self.pixel_count.max(1) as f64 * 100.0;
            println!("Bounded:    {} ({:.1}%)", bounded_pixels, share);
        }
    }
}

/// Render the configured view repeatedly without opening a window
pub fn run(config: &ViewerConfig, warmup: usize, frames: usize) -> HeadlessReport {
    let viewport = config.viewport;
    let mut buffer = PixelBuffer::new(config.render_width, config.render_height);
    let mut status = RenderStatus::Skipped;

    log::info!(
        "headless: {}x{} pan {},{} scale {} iterations {} ({} warmup + {} frames)",
        config.render_width,
        config.render_height,
        viewport.pan_x,
        viewport.pan_y,
        viewport.scale,
        viewport.max_iterations,
        warmup,
        frames
    );

    let name = format!("render {}x{}", config.render_width, config.render_height);
    let perf = PerfTest::new(&name)
        .with_warmup(warmup)
        .with_iterations(frames)
        .run(|| status = render(&mut buffer, &viewport));

    HeadlessReport {
        perf,
        status,
        pixel_count: buffer.pixel_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ViewportState;

    #[test]
    fn reports_last_frame() {
        let config = ViewerConfig {
            render_width: 30,
            render_height: 20,
            viewport: ViewportState::new(0, 0, 10.0, 20),
            ..ViewerConfig::default()
        };

        let report = run(&config, 0, 3);

        assert_eq!(report.perf.iterations, 3);
        assert_eq!(report.pixel_count, 600);
        assert!(report.status.is_completed());
    }
}
