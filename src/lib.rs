pub mod cli;
pub mod config;
pub mod core;
pub mod display;
pub mod explorer;
pub mod headless;
pub mod math;

pub use crate::config::ViewerConfig;
pub use crate::core::{evaluate, render, EscapeResult, PixelBuffer, RenderStatus, ViewportState};
pub use crate::explorer::{Explorer, RenderStats};
