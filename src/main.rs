use anyhow::{anyhow, Result};
use clap::Parser;
use std::sync::Arc;
use std::time::{Duration, Instant};
use winit::{
    application::ApplicationHandler,
    dpi::LogicalSize,
    event::*,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use mandelbrot_viewer::cli::Cli;
use mandelbrot_viewer::config::ViewerConfig;
use mandelbrot_viewer::core::Clock;
use mandelbrot_viewer::display::Display;
use mandelbrot_viewer::explorer::Explorer;
use mandelbrot_viewer::headless;

// === Application ===

struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    display: Option<Display>,
    explorer: Explorer,
    clock: Clock,
}

impl App {
    fn new(config: ViewerConfig) -> Self {
        let explorer = Explorer::new(&config);
        Self {
            config,
            window: None,
            display: None,
            explorer,
            clock: Clock::new(),
        }
    }

    /// Draw the UI, then render the fractal if the view changed
    fn redraw(&mut self) {
        let (Some(window), Some(display)) = (&self.window, &mut self.display) else {
            return;
        };

        match display.draw(window, &mut self.explorer) {
            Ok(true) => window.request_redraw(),
            Ok(false) => {}
            Err(e) => log::error!("Draw error: {:#}", e),
        }

        if self.explorer.tick(self.clock.tick()).is_some() {
            display.upload(self.explorer.buffer());
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let size = LogicalSize::new(self.config.window_width, self.config.window_height);
        let attributes = Window::default_attributes()
            .with_title("Mandelbrot")
            .with_inner_size(size);

        let window = match event_loop.create_window(attributes) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("Failed to create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let initial = self.explorer.buffer();
        let display = match pollster::block_on(Display::new(window.clone(), initial)) {
            Ok(display) => display,
            Err(e) => {
                log::error!("Failed to initialize display: {:#}", e);
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.display = Some(display);
    }

    fn new_events(&mut self, _event_loop: &ActiveEventLoop, cause: StartCause) {
        // Throttle deadline for a pending redraw
        if let StartCause::ResumeTimeReached { .. } = cause {
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(display), Some(window)) = (&mut self.display, &self.window) {
            let response = display.handle_event(window, &event);
            if response.repaint {
                window.request_redraw();
            }
            if response.consumed {
                return;
            }
        }

        match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(KeyCode::Escape),
                        ..
                    },
                ..
            } => event_loop.exit(),
            WindowEvent::Resized(size) => {
                if let Some(display) = &mut self.display {
                    display.resize(size.width, size.height);
                }
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        match self.explorer.time_until_redraw() {
            Some(wait) if wait > 0.0 => {
                let deadline = Instant::now() + Duration::from_secs_f32(wait);
                event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
            }
            Some(_) => {
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
                event_loop.set_control_flow(ControlFlow::Wait);
            }
            None => event_loop.set_control_flow(ControlFlow::Wait),
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let config = ViewerConfig::resolve(&cli)?;

    if cli.print_config {
        println!("{}", config.to_json()?);
        return Ok(());
    }

    if cli.headless {
        headless::run(&config, cli.warmup, cli.frames).print();
        return Ok(());
    }

    let event_loop = EventLoop::new()
        .map_err(|e| anyhow!("Failed to create event loop: {}", e))?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(config);

    println!("Drag to pan, sliders set detail and zoom, Escape quits");
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {}", e))?;

    Ok(())
}
