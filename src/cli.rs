// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "mandelbrot-viewer")]
#[command(about = "Interactive Mandelbrot set viewer", long_about = None)]
pub struct Cli {
    /// JSON config file; missing fields fall back to defaults
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Render buffer width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Render buffer height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Initial iteration budget
    #[arg(long)]
    pub iterations: Option<u32>,

    /// Initial scale (pixels per unit)
    #[arg(long)]
    pub scale: Option<f32>,

    /// Initial horizontal pan in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub pan_x: Option<i32>,

    /// Initial vertical pan in pixels
    #[arg(long, allow_hyphen_values = true)]
    pub pan_y: Option<i32>,

    /// Redraw limit while dragging (0 = unlimited)
    #[arg(long)]
    pub max_fps: Option<f32>,

    /// Print the effective configuration as JSON and exit
    #[arg(long = "print-config", default_value = "false")]
    pub print_config: bool,

    /// Render without a window and report timings
    #[arg(long = "headless", default_value = "false")]
    pub headless: bool,

    /// Timed frames in headless mode
    #[arg(long, default_value_t = 20)]
    pub frames: usize,

    /// Untimed warmup frames in headless mode
    #[arg(long, default_value_t = 2)]
    pub warmup: usize,
}
