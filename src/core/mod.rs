pub mod controls;
pub mod drag;
pub mod escape;
pub mod pixel_buffer;
pub mod renderer;
pub mod timer;
pub mod viewport;

pub use controls::{scale_from_slider, ControlConfig, ControlPanel, MIN_SCALE};
pub use drag::DragTracker;
pub use escape::{evaluate, EscapeResult, ESCAPE_RADIUS_SQ};
pub use perf_test::{PerfResult, PerfTest};
pub use pixel_buffer::PixelBuffer;
pub use renderer::{escape_color, render, render_cancellable, render_pixels, shade_pixel};
pub use renderer::{CancelToken, RenderStatus};
pub use timer::{Clock, RedrawThrottle};
pub use viewport::{ComplexCoord, ViewportState};
