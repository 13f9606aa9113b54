use crate::context::{GpuContext, GpuOptions};
use crate::error::RenderError;
use crate::gpu::WgpuRenderer;
use shadowbox_common::Viewport;
use shadowbox_render::{RenderSettings, Renderer};
use shadowbox_scene::{PerspectiveCamera, Scene};
use std::sync::Arc;

/// A configured window surface and the device presenting to it.
pub struct SurfaceTarget {
    gpu: GpuContext,
    surface: wgpu::Surface<'static>,
    config: wgpu::SurfaceConfiguration,
}

impl SurfaceTarget {
    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    pub fn format(&self) -> wgpu::TextureFormat {
        self.config.format
    }

    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.config.width, self.config.height)
    }

    fn acquire(&self) -> Result<wgpu::SurfaceTexture, RenderError> {
        match self.surface.get_current_texture() {
            Ok(texture) => Ok(texture),
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.gpu.device, &self.config);
                Ok(self.surface.get_current_texture()?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// The frame a [`SurfaceRenderer`] presented.
///
/// Holds the surface and device, so the window keeps showing the frame for
/// as long as this value lives, even after the renderer is dropped.
pub struct PresentedFrame {
    target: Arc<SurfaceTarget>,
}

impl PresentedFrame {
    pub fn target(&self) -> &SurfaceTarget {
        &self.target
    }
}

/// Renders to a window surface and presents.
pub struct SurfaceRenderer {
    target: Arc<SurfaceTarget>,
    renderer: WgpuRenderer,
}

impl SurfaceRenderer {
    /// Open a device compatible with `surface` and configure it at `viewport`.
    pub fn new(
        instance: &wgpu::Instance,
        surface: wgpu::Surface<'static>,
        options: &GpuOptions,
        settings: &RenderSettings,
        viewport: Viewport,
    ) -> Result<Self, RenderError> {
        if viewport.is_empty() {
            return Err(RenderError::EmptyViewport(viewport));
        }
        let gpu = GpuContext::for_surface(instance, options, &surface)?;

        let caps = surface.get_capabilities(&gpu.adapter);
        let format = caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| caps.formats.first())
            .copied()
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: viewport.width,
            height: viewport.height,
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&gpu.device, &config);
        tracing::debug!(?format, %viewport, "surface configured");

        let renderer = WgpuRenderer::new(&gpu.device, format, viewport, *settings);
        Ok(Self {
            target: Arc::new(SurfaceTarget {
                gpu,
                surface,
                config,
            }),
            renderer,
        })
    }

    pub fn target(&self) -> &SurfaceTarget {
        &self.target
    }
}

impl Renderer for SurfaceRenderer {
    type Output = PresentedFrame;
    type Error = RenderError;

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<PresentedFrame, RenderError> {
        let target = &self.target;
        let output = target.acquire()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        self.renderer
            .render(&target.gpu.device, &target.gpu.queue, &view, scene, camera);
        output.present();
        Ok(PresentedFrame {
            target: Arc::clone(&self.target),
        })
    }
}
