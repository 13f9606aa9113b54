use crate::error::RenderError;
use shadowbox_render::AdapterSummary;

/// Adapter selection knobs.
#[derive(Debug, Clone, Copy)]
pub struct GpuOptions {
    pub backends: wgpu::Backends,
    pub power_preference: wgpu::PowerPreference,
    pub force_fallback_adapter: bool,
}

impl Default for GpuOptions {
    fn default() -> Self {
        Self {
            backends: wgpu::Backends::all(),
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
        }
    }
}

impl GpuOptions {
    pub fn create_instance(&self) -> wgpu::Instance {
        wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: self.backends,
            ..Default::default()
        })
    }
}

/// Adapter, device and queue for one renderer.
pub struct GpuContext {
    pub adapter: wgpu::Adapter,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
}

impl GpuContext {
    /// Device with no presentation surface, for offscreen rendering.
    pub fn headless(options: &GpuOptions) -> Result<Self, RenderError> {
        let instance = options.create_instance();
        Self::request(&instance, options, None)
    }

    /// Device able to present to `surface`.
    pub fn for_surface(
        instance: &wgpu::Instance,
        options: &GpuOptions,
        surface: &wgpu::Surface<'_>,
    ) -> Result<Self, RenderError> {
        Self::request(instance, options, Some(surface))
    }

    fn request(
        instance: &wgpu::Instance,
        options: &GpuOptions,
        compatible_surface: Option<&wgpu::Surface<'_>>,
    ) -> Result<Self, RenderError> {
        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: options.power_preference,
            compatible_surface,
            force_fallback_adapter: options.force_fallback_adapter,
        }))
        .ok_or(RenderError::NoAdapter)?;

        let (device, queue) = pollster::block_on(adapter.request_device(
            &wgpu::DeviceDescriptor {
                label: Some("shadowbox_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: Default::default(),
            },
            None,
        ))?;

        tracing::info!(
            "GPU initialized with {} backend",
            adapter.get_info().backend.to_str()
        );

        Ok(Self {
            adapter,
            device,
            queue,
        })
    }

    pub fn summary(&self) -> AdapterSummary {
        let info = self.adapter.get_info();
        AdapterSummary {
            name: info.name,
            backend: info.backend.to_str().to_string(),
            device_type: format!("{:?}", info.device_type),
        }
    }
}
