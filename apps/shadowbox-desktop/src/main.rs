use anyhow::Result;
use clap::Parser;
use shadowbox_common::Viewport;
use shadowbox_render::{Bootstrap, BootstrapConfig, Bootstrapper};
use shadowbox_scene::SceneContext;
use shadowbox_render_wgpu::{GpuOptions, PresentedFrame, SurfaceRenderer, WgpuProbe};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use winit::application::ApplicationHandler;
use winit::dpi::PhysicalSize;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

#[derive(Parser)]
#[command(name = "shadowbox-desktop", about = "Render the shadowbox scene into a window")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Window width in physical pixels
    #[arg(long, default_value = "800")]
    width: u32,

    /// Window height in physical pixels
    #[arg(long, default_value = "600")]
    height: u32,

    /// YAML file overriding scene and renderer defaults
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Hosts one frame. The bootstrapper is consumed on the first redraw.
struct App {
    size: PhysicalSize<u32>,
    options: GpuOptions,
    config: Option<BootstrapConfig>,
    window: Option<Arc<Window>>,
    /// Keeps the scene, surface and device alive while the window is open.
    presented: Option<(SceneContext, PresentedFrame)>,
    error: Option<anyhow::Error>,
}

impl App {
    fn new(size: PhysicalSize<u32>, config: BootstrapConfig) -> Self {
        Self {
            size,
            options: GpuOptions::default(),
            config: Some(config),
            window: None,
            presented: None,
            error: None,
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, error: anyhow::Error) {
        tracing::error!("{error:#}");
        self.error = Some(error);
        event_loop.exit();
    }

    fn render_once(&mut self, window: Arc<Window>) -> Result<()> {
        let Some(config) = self.config.take() else {
            return Ok(());
        };
        let size = window.inner_size();
        let viewport = Viewport::new(size.width, size.height);
        let options = self.options;
        let instance = options.create_instance();

        let boot = Bootstrapper::new(WgpuProbe::new(options), config, viewport);
        let outcome = boot.run(|settings, viewport| {
            let surface = instance.create_surface(window.clone())?;
            SurfaceRenderer::new(&instance, surface, &options, settings, viewport)
        })?;

        match outcome {
            Bootstrap::Rendered { context, frame } => {
                tracing::info!(
                    nodes = context.scene().len(),
                    format = ?frame.target().format(),
                    %viewport,
                    "scene presented"
                );
                self.presented = Some((context, frame));
            }
            Bootstrap::Unsupported { reason } => {
                window.set_title(&format!("shadowbox: 3D rendering unavailable ({reason})"));
            }
        }
        Ok(())
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("shadowbox")
            .with_inner_size(self.size);
        match event_loop.create_window(attrs) {
            Ok(window) => {
                let window = Arc::new(window);
                window.request_redraw();
                self.window = Some(window);
            }
            Err(e) => self.fail(event_loop, e.into()),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let Some(window) = self.window.clone() else {
                    return;
                };
                if let Err(e) = self.render_once(window) {
                    self.fail(event_loop, e);
                }
            }
            _ => {}
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    tracing::info!("shadowbox-desktop starting");

    let config = BootstrapConfig::load_or_default(cli.config.as_deref())?;

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);

    let mut app = App::new(PhysicalSize::new(cli.width, cli.height), config);
    event_loop.run_app(&mut app)?;

    match app.error.take() {
        Some(error) => Err(error),
        None => Ok(()),
    }
}
