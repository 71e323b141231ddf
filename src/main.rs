use std::sync::Arc;
use std::time::Instant;

use clap::Parser;
use glam::Vec2;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

mod config;
mod error;
mod geometry;
mod renderer;
mod scene;
mod ui;

use config::{AppConfig, Args};
use error::AppResult;
use renderer::{Camera, GpuState};
use scene::{Ray, SceneEngine, SceneSet, cursor_to_ndc, pick};
use ui::{SceneSummary, UiActions, UiState, apply_theme, draw_question_overlay, draw_side_panel};

#[derive(Default)]
struct PointerState {
    cursor: Vec2,
    rotating: bool,
    panning: bool,
}

struct App {
    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    egui_state: Option<egui_winit::State>,
    egui_renderer: Option<egui_wgpu::Renderer>,
    egui_ctx: egui::Context,

    camera: Camera,
    scene_engine: SceneEngine,
    scene: Option<SceneSet>,
    ui_state: UiState,
    pointer: PointerState,

    frame_count: u32,
    fps_timer: Instant,
    last_vsync_state: bool,
    exit_requested: bool,
}

impl App {
    fn new(config: AppConfig) -> Self {
        let ui_state = UiState::from_config(&config);
        let mut scene_engine = SceneEngine::new();
        scene_engine.rebuild(ui_state.density);

        Self {
            window: None,
            gpu: None,
            egui_state: None,
            egui_renderer: None,
            egui_ctx: egui::Context::default(),

            camera: Camera::default(),
            scene_engine,
            scene: None,
            last_vsync_state: ui_state.vsync_enabled,
            ui_state,
            pointer: PointerState::default(),

            frame_count: 0,
            fps_timer: Instant::now(),
            exit_requested: false,
        }
    }

    fn init_gpu(&mut self, event_loop: &ActiveEventLoop) -> AppResult<()> {
        let window_attrs = Window::default_attributes()
            .with_title("Relief 3D")
            .with_inner_size(PhysicalSize::new(1600, 900));
        let window = Arc::new(event_loop.create_window(window_attrs)?);

        let gpu = pollster::block_on(GpuState::new(window.clone(), self.ui_state.vsync_enabled))?;

        let egui_state = egui_winit::State::new(
            self.egui_ctx.clone(),
            self.egui_ctx.viewport_id(),
            &window,
            Some(window.scale_factor() as f32),
            None,
            Some(2048),
        );

        let egui_renderer =
            egui_wgpu::Renderer::new(&gpu.device, gpu.config.format, None, 1, false);

        apply_theme(&self.egui_ctx);

        let size = window.inner_size();
        self.camera.set_aspect(size.width as f32, size.height as f32);

        self.window = Some(window);
        self.gpu = Some(gpu);
        self.egui_state = Some(egui_state);
        self.egui_renderer = Some(egui_renderer);
        Ok(())
    }

    fn update(&mut self) {
        self.frame_count += 1;
        let elapsed = self.fps_timer.elapsed().as_secs_f32();
        if elapsed >= 0.5 {
            *self.scene_engine.stats().fps.lock() = self.frame_count as f32 / elapsed;
            self.frame_count = 0;
            self.fps_timer = Instant::now();
        }

        if let Some(set) = self.scene_engine.try_recv_set() {
            if let Some(gpu) = &mut self.gpu {
                gpu.upload_scene(&set);
            }
            debug!(generation = set.generation, "scene set swapped in");
            self.scene = Some(set);
        }

        self.camera.update();
    }

    fn render(&mut self) {
        let (Some(window), Some(egui_state)) = (&self.window, &mut self.egui_state) else {
            return;
        };

        let raw_input = egui_state.take_egui_input(window);

        let stats = Arc::clone(self.scene_engine.stats());
        let summary = SceneSummary {
            objects: self.scene.as_ref().map_or(0, |s| s.objects.len()),
            generation: self.scene.as_ref().map_or(0, |s| s.generation),
            pending: self
                .scene
                .as_ref()
                .is_none_or(|s| s.generation != self.scene_engine.latest_generation()),
        };

        let mut ui_actions = UiActions::default();

        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            ui_actions = draw_side_panel(ctx, &mut self.ui_state, &stats, &summary);
            if self.ui_state.show_questions {
                draw_question_overlay(ctx);
            }
        });

        self.handle_ui_actions(ui_actions);

        let Some(gpu) = &mut self.gpu else { return };
        let Some(window) = &self.window else { return };
        let Some(egui_state) = &mut self.egui_state else {
            return;
        };
        let Some(egui_renderer) = &mut self.egui_renderer else {
            return;
        };

        egui_state.handle_platform_output(window, full_output.platform_output);

        if self.ui_state.vsync_enabled != self.last_vsync_state {
            gpu.set_vsync(self.ui_state.vsync_enabled);
            self.last_vsync_state = self.ui_state.vsync_enabled;
        }

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                warn!("surface lost, reconfiguring");
                gpu.resize(gpu.size);
                return;
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                error!("out of GPU memory");
                self.exit_requested = true;
                return;
            }
            Err(wgpu::SurfaceError::Timeout) => {
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.update_camera(&self.camera);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);

        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, delta) in full_output.textures_delta.set {
            egui_renderer.update_texture(&gpu.device, &gpu.queue, id, &delta);
        }

        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Main Encoder"),
            });

        egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        gpu.render_scene(&view, &mut encoder, self.ui_state.show_mesh);

        {
            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("egui Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            let mut render_pass = render_pass.forget_lifetime();
            egui_renderer.render(&mut render_pass, &paint_jobs, &screen_descriptor);
        }

        for id in full_output.textures_delta.free {
            egui_renderer.free_texture(&id);
        }

        gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        window.request_redraw();
    }

    fn handle_ui_actions(&mut self, actions: UiActions) {
        if actions.rebuild {
            let generation = self.scene_engine.rebuild(self.ui_state.density);
            debug!(generation, density = self.ui_state.density.get(), "rebuild requested");
        }

        if actions.reset_camera {
            self.camera.reset();
            self.ui_state.focused = None;
        }

        if actions.toggle_mesh {
            self.ui_state.toggle_mesh();
        }
    }

    fn pick_at_cursor(&mut self) {
        let (Some(gpu), Some(scene)) = (&self.gpu, &self.scene) else {
            return;
        };

        let ndc = cursor_to_ndc(
            self.pointer.cursor,
            gpu.config.width as f32,
            gpu.config.height as f32,
        );
        let ray = Ray::from_ndc(ndc, self.camera.view_projection_matrix());

        if let Some(hit) = pick(&scene.objects, &ray) {
            let object = &scene.objects[hit.index];
            debug!(
                object = %object.label(),
                distance = hit.distance as f64,
                "picked object"
            );
            self.camera.focus_on(object.position);
            self.ui_state.focused = Some(object.label());
        }
    }

    fn handle_mouse_button(&mut self, button: MouseButton, state: ElementState, over_ui: bool) {
        let pressed = state == ElementState::Pressed;
        if pressed && over_ui {
            return;
        }

        match button {
            MouseButton::Left => {
                self.pointer.rotating = pressed;
                if pressed {
                    self.pick_at_cursor();
                }
            }
            MouseButton::Right => self.pointer.panning = pressed,
            _ => {}
        }
    }

    fn handle_cursor_moved(&mut self, position: Vec2) {
        let delta = position - self.pointer.cursor;
        self.pointer.cursor = position;

        if self.pointer.rotating {
            self.camera.process_mouse_movement(delta);
        } else if self.pointer.panning {
            self.camera.process_pan(delta);
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(()) => info!("renderer ready"),
            Err(err) => {
                error!(%err, "failed to initialise renderer");
                event_loop.exit();
            }
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        let mut consumed = false;
        if let (Some(egui_state), Some(window)) = (&mut self.egui_state, &self.window) {
            consumed = egui_state.on_window_event(window, &event).consumed;
        }

        match event {
            WindowEvent::CloseRequested => {
                self.scene_engine.stop();
                event_loop.exit();
            }

            WindowEvent::Resized(size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(size);
                    self.camera
                        .set_aspect(size.width as f32, size.height as f32);
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.handle_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }

            WindowEvent::MouseInput { button, state, .. } => {
                self.handle_mouse_button(button, state, consumed);
            }

            WindowEvent::MouseWheel { delta, .. } if !consumed => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 50.0,
                };
                self.camera.process_scroll(scroll);
            }

            WindowEvent::RedrawRequested => {
                self.update();
                self.render();
                if self.exit_requested {
                    event_loop.exit();
                }
            }

            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn run(config: AppConfig) -> AppResult<()> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(config);
    event_loop.run_app(&mut app)?;
    Ok(())
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match AppConfig::try_from(Args::parse()) {
        Ok(config) => config,
        Err(err) => {
            error!(%err, "invalid configuration");
            std::process::exit(2);
        }
    };
    info!(density = config.density.get(), show_mesh = config.show_mesh, "starting");

    if let Err(err) = run(config) {
        error!(%err, "event loop failed");
        std::process::exit(1);
    }
}
