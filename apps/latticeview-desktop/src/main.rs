use anyhow::{Context, Result, anyhow};
use clap::Parser;
use egui::Context as EguiContext;
use glam::Vec2;
use latticeview_input::{Action, DragTracker, KEY_BINDINGS, PointerButton};
use latticeview_render::RenderView;
use latticeview_render_wgpu::{OrbitCamera, WgpuRenderer};
use latticeview_scene::{DemoScene, SceneConfig};
use latticeview_tools::{
    DebugOptions, DebugPanel, FrameStats, HelperHandles, HelperKind, SPEED_RANGE,
};
use latticeview_tween::{Tweens, animate_lattice};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, KeyEvent, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::PhysicalKey;
use winit::window::{Window, WindowId};

/// Pixels of trackpad scroll that count as one wheel step.
const PIXELS_PER_WHEEL_STEP: f32 = 50.0;

#[derive(Parser)]
#[command(name = "latticeview-desktop", about = "Animated cube lattice viewer")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Scene config (YAML). Defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Initial window width
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height
    #[arg(long, default_value_t = 720)]
    height: u32,
}

/// Application state.
struct AppState {
    demo: DemoScene,
    helpers: HelperHandles,
    tweens: Tweens,
    panel: DebugPanel,
    stats: FrameStats,
    camera: OrbitCamera,
    drag: DragTracker,
    started: Instant,
    last_frame: Instant,
    viewport_height: f32,
}

impl AppState {
    fn new(config: &SceneConfig, width: u32, height: u32) -> Result<Self> {
        let started = Instant::now();

        let mut panel = DebugPanel::new(DebugOptions {
            show_axis: config.helpers.show_axis,
            show_grid: config.helpers.show_grid,
            ..DebugOptions::default()
        });
        let stats = FrameStats::new(0.0);

        let mut demo = DemoScene::build(config);
        let helpers = HelperHandles::from(&demo);
        panel.sync(&mut demo.scene, &helpers)?;

        let mut tweens = Tweens::new();
        animate_lattice(&mut tweens, &demo.cubes, &config.tween)?;

        let aspect = width as f32 / height.max(1) as f32;
        let camera = OrbitCamera::from_view(&RenderView::from_config(&config.camera, aspect));

        Ok(Self {
            demo,
            helpers,
            tweens,
            panel,
            stats,
            camera,
            drag: DragTracker::new(),
            started,
            last_frame: started,
            viewport_height: height.max(1) as f32,
        })
    }

    fn now_ms(&self) -> f64 {
        self.started.elapsed().as_secs_f64() * 1000.0
    }

    fn update(&mut self) {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32().min(0.1);
        self.last_frame = now;
        self.tweens.update(dt, &mut self.demo.scene);
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_viewport(width, height);
        self.viewport_height = height.max(1) as f32;
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Orbit(delta) => self.camera.rotate(delta.x, delta.y, self.viewport_height),
            Action::Pan(delta) => self.camera.pan(delta.x, delta.y, self.viewport_height),
            Action::Zoom(steps) => self.camera.zoom(steps),
            Action::ResetCamera => self.camera.reset(),
            Action::ToggleAxis => self.toggle_helper(HelperKind::Axes),
            Action::ToggleGrid => self.toggle_helper(HelperKind::Grid),
            Action::TogglePanel => self.panel.visible = !self.panel.visible,
            Action::Noop => {}
        }
    }

    fn toggle_helper(&mut self, kind: HelperKind) {
        if let Err(e) = self
            .panel
            .toggle_helper(kind, &mut self.demo.scene, &self.helpers)
        {
            tracing::error!("failed to toggle helper: {e}");
        }
    }

    fn set_helper(&mut self, kind: HelperKind, shown: bool) {
        if let Err(e) = self
            .panel
            .set_helper(kind, shown, &mut self.demo.scene, &self.helpers)
        {
            tracing::error!("failed to set helper: {e}");
        }
    }

    fn draw_ui(&mut self, ctx: &EguiContext) {
        egui::Area::new(egui::Id::new("stats"))
            .anchor(egui::Align2::LEFT_TOP, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Frame::new()
                    .fill(egui::Color32::from_rgb(0, 0, 34))
                    .inner_margin(4.0)
                    .show(ui, |ui| {
                        let label = egui::RichText::new(self.stats.label())
                            .monospace()
                            .color(egui::Color32::from_rgb(0, 255, 255));
                        let response = ui.add(egui::Label::new(label).sense(egui::Sense::click()));
                        if response.clicked() {
                            self.stats.cycle_panel();
                        }
                    });
            });

        if !self.panel.visible {
            return;
        }

        let mut helper_changes = Vec::new();
        egui::Window::new("Controls")
            .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
            .resizable(false)
            .show(ctx, |ui| {
                let options = &mut self.panel.options;
                ui.horizontal(|ui| {
                    ui.label("message");
                    ui.text_edit_singleline(&mut options.message);
                });

                let mut speed = options.speed;
                if ui
                    .add(egui::Slider::new(&mut speed, SPEED_RANGE).text("speed"))
                    .changed()
                {
                    self.panel.set_speed(speed);
                }

                ui.checkbox(&mut self.panel.options.display_outline, "displayOutline");
                if ui.button("button").clicked() {
                    self.panel.press_button();
                }

                let folder = egui::CollapsingHeader::new("Helper")
                    .default_open(self.panel.helper_folder_open)
                    .show(ui, |ui| {
                        let mut show_axis = self.panel.options.show_axis;
                        if ui.checkbox(&mut show_axis, "showAxis").changed() {
                            helper_changes.push((HelperKind::Axes, show_axis));
                        }
                        let mut show_grid = self.panel.options.show_grid;
                        if ui.checkbox(&mut show_grid, "showGrid").changed() {
                            helper_changes.push((HelperKind::Grid, show_grid));
                        }
                    });
                self.panel.helper_folder_open = folder.openness > 0.5;

                ui.separator();
                let help: Vec<&str> = KEY_BINDINGS.iter().map(|(_, _, help)| *help).collect();
                ui.small(format!(
                    "LMB: orbit | RMB: pan | MMB, wheel: zoom | {}",
                    help.join(" | ")
                ));
            });

        for (kind, shown) in helper_changes {
            self.set_helper(kind, shown);
        }
    }
}

/// Everything created once a window exists.
struct Gpu {
    window: Arc<Window>,
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    renderer: WgpuRenderer,
    egui_winit: egui_winit::State,
    egui_renderer: egui_wgpu::Renderer,
}

struct GpuApp {
    state: AppState,
    size: PhysicalSize<u32>,
    gpu: Option<Gpu>,
    egui_ctx: EguiContext,
}

impl GpuApp {
    fn new(state: AppState, width: u32, height: u32) -> Self {
        Self {
            state,
            size: PhysicalSize::new(width, height),
            gpu: None,
            egui_ctx: EguiContext::default(),
        }
    }

    fn init_gpu(&self, event_loop: &ActiveEventLoop) -> Result<Gpu> {
        let attrs = Window::default_attributes()
            .with_title("latticeview")
            .with_inner_size(self.size);
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .context("failed to create window")?,
        );

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let surface = instance
            .create_surface(window.clone())
            .context("failed to create surface")?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            compatible_surface: Some(&surface),
            force_fallback_adapter: false,
        }))
        .ok_or_else(|| anyhow!("no suitable GPU adapter"))?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("latticeview_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))
        .context("failed to create device")?;

        let size = window.inner_size();
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or_else(|| anyhow!("surface reports no formats"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let renderer = WgpuRenderer::new(&device, surface_format, config.width, config.height);

        let egui_winit = egui_winit::State::new(
            self.egui_ctx.clone(),
            egui::ViewportId::ROOT,
            &window,
            Some(window.scale_factor() as f32),
            None,
            None,
        );
        let egui_renderer = egui_wgpu::Renderer::new(&device, surface_format, None, 1, false);

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Gpu {
            window,
            surface,
            device,
            queue,
            config,
            renderer,
            egui_winit,
            egui_renderer,
        })
    }

    fn redraw(&mut self) {
        let Some(gpu) = &mut self.gpu else {
            return;
        };
        let now_ms = self.state.now_ms();
        self.state.stats.begin(now_ms);
        self.state.update();

        let output = match gpu.surface.get_current_texture() {
            Ok(t) => t,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                gpu.surface.configure(&gpu.device, &gpu.config);
                return;
            }
            Err(e) => {
                tracing::error!("surface error: {e}");
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        gpu.renderer.render(
            &gpu.device,
            &gpu.queue,
            &view,
            &self.state.camera,
            &self.state.demo.scene,
        );

        let raw_input = gpu.egui_winit.take_egui_input(&gpu.window);
        let full_output = self.egui_ctx.run(raw_input, |ctx| {
            self.state.draw_ui(ctx);
        });
        gpu.egui_winit
            .handle_platform_output(&gpu.window, full_output.platform_output);

        let paint_jobs = self
            .egui_ctx
            .tessellate(full_output.shapes, full_output.pixels_per_point);
        let screen_descriptor = egui_wgpu::ScreenDescriptor {
            size_in_pixels: [gpu.config.width, gpu.config.height],
            pixels_per_point: full_output.pixels_per_point,
        };

        for (id, image_delta) in &full_output.textures_delta.set {
            gpu.egui_renderer
                .update_texture(&gpu.device, &gpu.queue, *id, image_delta);
        }
        let mut encoder = gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("egui_encoder"),
            });
        gpu.egui_renderer.update_buffers(
            &gpu.device,
            &gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );
        {
            let mut pass = encoder
                .begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui_pass"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: &view,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                })
                .forget_lifetime();
            gpu.egui_renderer
                .render(&mut pass, &paint_jobs, &screen_descriptor);
        }
        gpu.queue.submit(std::iter::once(encoder.finish()));
        for id in &full_output.textures_delta.free {
            gpu.egui_renderer.free_texture(id);
        }

        output.present();
        self.state.stats.end(self.state.now_ms());
        gpu.window.request_redraw();
    }
}

impl ApplicationHandler for GpuApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.gpu.is_some() {
            return;
        }
        match self.init_gpu(event_loop) {
            Ok(gpu) => {
                self.state.resize(gpu.config.width, gpu.config.height);
                self.gpu = Some(gpu);
            }
            Err(e) => {
                tracing::error!("GPU setup failed: {e:#}");
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let consumed = match &mut self.gpu {
            Some(gpu) => gpu.egui_winit.on_window_event(&gpu.window, &event).consumed,
            None => false,
        };

        // Button events reach the drag tracker even over the panel, so a
        // drag released there still ends.
        if let WindowEvent::MouseInput { state, button, .. } = &event {
            let button = match button {
                MouseButton::Left => PointerButton::Primary,
                MouseButton::Right => PointerButton::Secondary,
                MouseButton::Middle => PointerButton::Middle,
                _ => return,
            };
            let pressed = *state == ElementState::Pressed;
            self.state.drag.button(button, pressed, consumed);
            return;
        }
        if consumed {
            return;
        }

        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.config.width = new_size.width.max(1);
                    gpu.config.height = new_size.height.max(1);
                    gpu.surface.configure(&gpu.device, &gpu.config);
                    gpu.renderer
                        .resize(&gpu.device, gpu.config.width, gpu.config.height);
                    self.state.resize(gpu.config.width, gpu.config.height);
                }
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key),
                        state: ElementState::Pressed,
                        repeat: false,
                        ..
                    },
                ..
            } => {
                let action = Action::from_key(&format!("{key:?}"));
                self.state.apply(action);
            }
            WindowEvent::CursorMoved { position, .. } => {
                let action = self
                    .state
                    .drag
                    .moved(Vec2::new(position.x as f32, position.y as f32));
                self.state.apply(action);
            }
            WindowEvent::CursorLeft { .. } => {
                self.state.drag.left();
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let steps = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(p) => p.y as f32 / PIXELS_PER_WHEEL_STEP,
                };
                let action = self.state.drag.wheel(steps);
                self.state.apply(action);
            }
            WindowEvent::RedrawRequested => {
                self.redraw();
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(gpu) = &self.gpu {
            gpu.window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("latticeview-desktop starting");

    let config = match &cli.config {
        Some(path) => SceneConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SceneConfig::default(),
    };

    let state = AppState::new(&config, cli.width, cli.height)?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = GpuApp::new(state, cli.width, cli.height);
    event_loop.run_app(&mut app)?;

    Ok(())
}
