use anyhow::{anyhow, Result};
use std::sync::Arc;
use winit::window::Window;

use crate::core::PixelBuffer;
use crate::explorer::Explorer;

const TEXTURE_NAME: &str = "mandelbrot";
const PANEL_WIDTH: f32 = 190.0;

/// Presents the rendered buffer inside an egui layout with the detail and
/// zoom sliders, and feeds slider and drag input back into the explorer.
pub struct Display {
    device: wgpu::Device,
    queue: wgpu::Queue,
    surface: wgpu::Surface<'static>,
    surface_config: wgpu::SurfaceConfiguration,
    egui_renderer: egui_wgpu::Renderer,
    egui_state: egui_winit::State,
    egui_ctx: egui::Context,
    texture: egui::TextureHandle,
    image_size: egui::Vec2,
}

impl Display {
    pub async fn new(window: Arc<Window>, initial: &PixelBuffer) -> Result<Self> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .map_err(|e| anyhow!("Failed to create surface: {}", e))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find appropriate adapter: {}", e))?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: None,
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
                experimental_features: Default::default(),
                trace: Default::default(),
            })
            .await
            .map_err(|e| anyhow!("Failed to create device: {}", e))?;

        let surface_config = Self::create_surface_config(&surface, &adapter, size);
        surface.configure(&device, &surface_config);

        let egui_ctx = egui::Context::default();
        let egui_state = egui_winit::State::new(
            egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(
            &device,
            surface_config.format,
            egui_wgpu::RendererOptions::default(),
        );

        let texture = egui_ctx.load_texture(
            TEXTURE_NAME,
            Self::to_color_image(initial),
            egui::TextureOptions::NEAREST,
        );
        let (width, height) = initial.dimensions();

        log::info!(
            "Display initialized: surface {}x{} ({:?}), image {}x{}",
            surface_config.width,
            surface_config.height,
            surface_config.format,
            width,
            height
        );

        Ok(Self {
            device,
            queue,
            surface,
            surface_config,
            egui_renderer,
            egui_state,
            egui_ctx,
            texture,
            image_size: egui::vec2(width as f32, height as f32),
        })
    }

    fn create_surface_config(
        surface: &wgpu::Surface,
        adapter: &wgpu::Adapter,
        size: winit::dpi::PhysicalSize<u32>,
    ) -> wgpu::SurfaceConfiguration {
        let surface_caps = surface.get_capabilities(adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .unwrap_or(surface_caps.formats[0]);

        wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        }
    }

    fn to_color_image(buffer: &PixelBuffer) -> egui::ColorImage {
        let (width, height) = buffer.dimensions();
        egui::ColorImage::from_rgba_unmultiplied(
            [width as usize, height as usize],
            &buffer.to_rgba(),
        )
    }

    /// Let egui see a window event first
    pub fn handle_event(
        &mut self,
        window: &Window,
        event: &winit::event::WindowEvent,
    ) -> egui_winit::EventResponse {
        self.egui_state.on_window_event(window, event)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Replace the displayed image with a freshly rendered buffer
    pub fn upload(&mut self, buffer: &PixelBuffer) {
        self.texture
            .set(Self::to_color_image(buffer), egui::TextureOptions::NEAREST);
    }

    /// Run the UI for one frame and present it.
    ///
    /// Returns true when egui wants another frame right away.
    pub fn draw(&mut self, window: &Window, explorer: &mut Explorer) -> Result<bool> {
        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.surface_config);
                return Ok(true);
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timeout, skipping frame");
                return Ok(true);
            }
            Err(e) => return Err(anyhow!("Failed to acquire surface texture: {}", e)),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let raw_input = self.egui_state.take_egui_input(window);
        let texture_id = self.texture.id();
        let image_size = self.image_size;

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            control_panel(ctx, explorer);
            image_panel(ctx, explorer, texture_id, image_size);
        });

        self.egui_state
            .handle_platform_output(window, full_output.platform_output);

        let tris = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        for (id, image_delta) in &full_output.textures_delta.set {
            self.egui_renderer
                .update_texture(&self.device, &self.queue, *id, image_delta);
        }

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [self.surface_config.width, self.surface_config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Display Encoder"),
            });

        let user_buffers = self.egui_renderer.update_buffers(
            &self.device,
            &self.queue,
            &mut encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut render_pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui Pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                            store: wgpu::StoreOp::Store,
                        },
                        depth_slice: None,
                    })],
                    depth_stencil_attachment: None,
                    occlusion_query_set: None,
                    timestamp_writes: None,
                })
                .forget_lifetime();

            self.egui_renderer
                .render(&mut render_pass, &tris, &screen_descriptor);
        }

        for id in &full_output.textures_delta.free {
            self.egui_renderer.free_texture(id);
        }

        let commands = user_buffers
            .into_iter()
            .chain(std::iter::once(encoder.finish()));
        self.queue.submit(commands);
        output.present();

        let repaint = full_output
            .viewport_output
            .get(&egui::ViewportId::ROOT)
            .is_some_and(|viewport| viewport.repaint_delay.is_zero());

        Ok(repaint)
    }
}

fn control_panel(ctx: &egui::Context, explorer: &mut Explorer) {
    egui::SidePanel::left("controls")
        .resizable(false)
        .exact_width(PANEL_WIDTH)
        .show(ctx, |ui| {
            ui.heading("Mandelbrot");
            ui.add_space(10.0);

            let limits = *explorer.controls().config();

            ui.label("Iterations");
            let mut iterations = explorer.controls().iteration_slider();
            let slider = egui::Slider::new(&mut iterations, 0..=limits.max_iterations);
            if ui.add(slider).changed() {
                explorer.set_iteration_slider(iterations);
            }

            ui.label("Scale");
            let mut scale = explorer.controls().scale_slider();
            let slider = egui::Slider::new(&mut scale, 0..=limits.max_scale);
            if ui.add(slider).changed() {
                explorer.set_scale_slider(scale);
            }

            ui.add_space(10.0);
            ui.separator();
            ui.add_space(5.0);

            let viewport = explorer.viewport();
            ui.monospace(format!("Pan:   {}, {}", viewport.pan_x, viewport.pan_y));
            ui.monospace(format!("Scale: {:.0}", viewport.scale));
            ui.monospace(format!("Iter:  {}", viewport.max_iterations));

            if let Some(stats) = explorer.last_stats() {
                ui.monospace(format!(
                    "Frame: {} ({:.1} ms)",
                    stats.frame,
                    stats.duration.as_secs_f64() * 1000.0
                ));
            }

            ui.add_space(10.0);
            if ui.button("Reset view").clicked() {
                explorer.reset_view();
            }
        });
}

fn image_panel(
    ctx: &egui::Context,
    explorer: &mut Explorer,
    texture_id: egui::TextureId,
    image_size: egui::Vec2,
) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let source = (texture_id, image_size);
        let image = egui::Image::new(source).sense(egui::Sense::drag());
        let response = ui.add(image);
        let origin = response.rect.min;

        if response.drag_started() {
            let press = ui
                .input(|i| i.pointer.press_origin())
                .or_else(|| response.interact_pointer_pos());
            if let Some(pos) = press {
                explorer.begin_drag(pos.x - origin.x, pos.y - origin.y);
            }
        }

        if response.dragged() {
            if let Some(pos) = response.interact_pointer_pos() {
                explorer.drag_to(pos.x - origin.x, pos.y - origin.y);
            }
        }

        if response.drag_stopped() {
            explorer.end_drag();
        }
    });
}
