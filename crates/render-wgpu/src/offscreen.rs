use crate::context::GpuContext;
use crate::error::RenderError;
use crate::gpu::WgpuRenderer;
use shadowbox_common::Viewport;
use shadowbox_render::{RenderSettings, Renderer};
use shadowbox_scene::{PerspectiveCamera, Scene};
use std::path::Path;
use std::sync::mpsc;

const TARGET_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;
const BYTES_PER_PIXEL: u32 = 4;

/// A rendered frame in tightly packed sRGB RGBA8, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let i = ((y * self.width + x) * BYTES_PER_PIXEL) as usize;
        let p = self.pixels.get(i..i + 4)?;
        Some([p[0], p[1], p[2], p[3]])
    }

    /// True when every pixel has the same colour.
    pub fn is_blank(&self) -> bool {
        let mut chunks = self.pixels.chunks_exact(4);
        match chunks.next() {
            Some(first) => chunks.all(|c| c == first),
            None => true,
        }
    }

    pub fn write_png(&self, path: impl AsRef<Path>) -> Result<(), RenderError> {
        let expected = (self.width * self.height * BYTES_PER_PIXEL) as usize;
        let image = image::RgbaImage::from_raw(self.width, self.height, self.pixels.clone())
            .ok_or(RenderError::FrameSize {
                expected,
                actual: self.pixels.len(),
            })?;
        image.save(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "frame written");
        Ok(())
    }
}

fn padded_bytes_per_row(width: u32) -> u32 {
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    (width * BYTES_PER_PIXEL).div_ceil(align) * align
}

/// Renders into an offscreen texture and reads the frame back.
pub struct HeadlessRenderer {
    gpu: GpuContext,
    renderer: WgpuRenderer,
    target: wgpu::Texture,
    viewport: Viewport,
}

impl HeadlessRenderer {
    pub fn new(
        gpu: GpuContext,
        settings: &RenderSettings,
        viewport: Viewport,
    ) -> Result<Self, RenderError> {
        if viewport.is_empty() {
            return Err(RenderError::EmptyViewport(viewport));
        }
        let target = gpu.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("offscreen_target"),
            size: wgpu::Extent3d {
                width: viewport.width,
                height: viewport.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: TARGET_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::COPY_SRC,
            view_formats: &[],
        });
        let renderer = WgpuRenderer::new(&gpu.device, TARGET_FORMAT, viewport, *settings);
        Ok(Self {
            gpu,
            renderer,
            target,
            viewport,
        })
    }

    pub fn gpu(&self) -> &GpuContext {
        &self.gpu
    }

    fn read_back(&self) -> Result<Frame, RenderError> {
        let Viewport { width, height } = self.viewport;
        let tight = (width * BYTES_PER_PIXEL) as usize;
        let padded = padded_bytes_per_row(width);

        let staging = self.gpu.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("readback_staging"),
            size: padded as u64 * height as u64,
            usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
            mapped_at_creation: false,
        });

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("readback_encoder"),
            });
        encoder.copy_texture_to_buffer(
            wgpu::TexelCopyTextureInfo {
                texture: &self.target,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            wgpu::TexelCopyBufferInfo {
                buffer: &staging,
                layout: wgpu::TexelCopyBufferLayout {
                    offset: 0,
                    bytes_per_row: Some(padded),
                    rows_per_image: Some(height),
                },
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
        self.gpu.queue.submit(std::iter::once(encoder.finish()));

        let slice = staging.slice(..);
        let (sender, receiver) = mpsc::channel();
        slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = sender.send(result);
        });
        self.gpu.device.poll(wgpu::Maintain::Wait);
        receiver.recv().map_err(|_| RenderError::ReadbackChannel)??;

        let data = slice.get_mapped_range();
        let mut pixels = Vec::with_capacity(tight * height as usize);
        for row in data.chunks(padded as usize).take(height as usize) {
            pixels.extend_from_slice(&row[..tight]);
        }
        drop(data);
        staging.unmap();

        Ok(Frame {
            width,
            height,
            pixels,
        })
    }
}

impl Renderer for HeadlessRenderer {
    type Output = Frame;
    type Error = RenderError;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<Frame, RenderError> {
        let view = self.target.create_view(&Default::default());
        self.renderer
            .render(&self.gpu.device, &self.gpu.queue, &view, scene, camera);
        self.read_back()
    }
}
