//! Platform layer: windowing & the per-frame callback.
//!
//! Setup happens once in `resumed`; every `RedrawRequested` ticks the clock,
//! draws with the current spin, advances the spin and asks for the next frame.
//! Any setup failure is logged, ends the event loop and is returned from [`run`].

use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use asset::mesh::MeshData;
use corelib::{camera::Camera, clock::FrameClock, light::Light, spin::Spin, transform::Transform};
use renderer::{FrameUniforms, GpuState};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowId},
};

/// Startup options chosen on the command line.
#[derive(Clone, Copy, Debug)]
pub struct RunConfig {
    pub backends: wgpu::Backends,
    pub width: u32,
    pub height: u32,
    pub show_fps: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            width: 1280,
            height: 720,
            show_fps: false,
        }
    }
}

/// Open a window and draw `mesh` every frame until the window is closed.
pub fn run(config: RunConfig, mesh: MeshData) -> Result<()> {
    let event_loop = EventLoop::new().map_err(|e| anyhow!("Failed to create event loop: {e}"))?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = Viewer::new(config, mesh);
    event_loop
        .run_app(&mut app)
        .map_err(|e| anyhow!("Event loop error: {e:?}"))?;

    match app.init_error.take() {
        Some(err) => Err(err),
        None => Ok(()),
    }
}

struct Viewer {
    config: RunConfig,
    mesh: MeshData,

    window: Option<Arc<Window>>,
    gpu: Option<GpuState>,
    init_error: Option<anyhow::Error>,
    minimized: bool,

    camera: Camera,
    model: Transform,
    light: Light,
    spin: Spin,
    clock: FrameClock,
    fps: FpsCounter,
}

impl Viewer {
    fn new(config: RunConfig, mesh: MeshData) -> Self {
        Self {
            config,
            mesh,
            window: None,
            gpu: None,
            init_error: None,
            minimized: false,
            camera: Camera::default(),
            model: Transform::decorations_view(),
            light: Light::default(),
            spin: Spin::default(),
            clock: FrameClock::new(),
            fps: FpsCounter::new(Instant::now()),
        }
    }

    fn init(&mut self, event_loop: &ActiveEventLoop) -> Result<()> {
        let attrs = Window::default_attributes()
            .with_title("Baublelit")
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = Arc::new(
            event_loop
                .create_window(attrs)
                .map_err(|e| anyhow!("Failed to create window: {e}"))?,
        );

        let gpu = pollster::block_on(GpuState::new(
            window.clone(),
            self.config.backends,
            &self.mesh,
        ))?;

        let (width, height) = gpu.size();
        log::info!("Window created: {}x{}", width, height);
        self.update_aspect(width, height);

        window.request_redraw();
        self.window = Some(window);
        self.gpu = Some(gpu);
        Ok(())
    }

    fn update_aspect(&mut self, width: u32, height: u32) {
        match Camera::with_surface_size(width, height) {
            Ok(camera) => self.camera = camera,
            Err(err) => log::debug!("Keeping previous projection: {err}"),
        }
    }

    /// A zero dimension pauses drawing until the window comes back.
    fn on_resize(&mut self, width: u32, height: u32) {
        let minimized = width == 0 || height == 0;
        if minimized {
            if !self.minimized {
                log::debug!("Window minimised, pausing redraws");
            }
            self.minimized = true;
            return;
        }

        if let Some(gpu) = self.gpu.as_mut() {
            gpu.resize(width, height);
        }
        self.update_aspect(width, height);

        if self.minimized {
            self.minimized = false;
            // Don't let the time spent minimised jump the spin.
            self.clock = FrameClock::new();
            if let Some(window) = &self.window {
                window.request_redraw();
            }
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        if self.minimized {
            return;
        }
        let Some(gpu) = self.gpu.as_mut() else {
            return;
        };

        let now = Instant::now();
        let dt = self.clock.tick(now);
        let model = self.spin.apply(&self.model);
        let uniforms = FrameUniforms::new(&self.camera, &model, &self.light);

        match gpu.render(&uniforms) {
            Ok(()) => {}
            Err(err) if GpuState::is_surface_lost(&err) => {
                log::warn!("Surface {err:?}, reconfiguring");
                gpu.recreate_surface();
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(err) => log::warn!("Dropped frame: {err:?}"),
        }

        self.spin.advance(dt);

        if let Some(fps) = self.fps.frame(now) {
            if self.config.show_fps {
                log::info!("FPS: {:.1}", fps);
            }
        }

        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() || self.init_error.is_some() {
            return;
        }
        if let Err(err) = self.init(event_loop) {
            log::error!("Unable to initialize rendering: {err:#}");
            self.init_error = Some(err);
            event_loop.exit();
        }
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting event loop.");
                event_loop.exit();
            }
            WindowEvent::Resized(new_size) => {
                log::debug!("Resized: {}x{}", new_size.width, new_size.height);
                self.on_resize(new_size.width, new_size.height);
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

/// Counts frames and reports the rate about once per second.
#[derive(Debug)]
struct FpsCounter {
    frames: u32,
    since: Instant,
}

impl FpsCounter {
    const WINDOW: Duration = Duration::from_secs(1);

    fn new(now: Instant) -> Self {
        Self { frames: 0, since: now }
    }

    fn frame(&mut self, now: Instant) -> Option<f32> {
        self.frames += 1;
        let elapsed = now.saturating_duration_since(self.since);
        if elapsed < Self::WINDOW {
            return None;
        }
        let fps = self.frames as f32 / elapsed.as_secs_f32();
        self.frames = 0;
        self.since = now;
        Some(fps)
    }
}
