use crate::context::{GpuContext, GpuOptions};
use shadowbox_render::{Capability, CapabilityProbe, guarded_probe};

/// Capability check that tries to open a real device.
///
/// Missing adapters, device errors and driver panics all report
/// `Unsupported`.
#[derive(Debug, Clone, Copy, Default)]
pub struct WgpuProbe {
    pub options: GpuOptions,
}

impl WgpuProbe {
    pub fn new(options: GpuOptions) -> Self {
        Self { options }
    }
}

impl CapabilityProbe for WgpuProbe {
    fn probe(&self) -> Capability {
        guarded_probe(|| GpuContext::headless(&self.options).map(|gpu| gpu.summary()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn probe_without_backends_is_unsupported() {
        let probe = WgpuProbe::new(GpuOptions {
            backends: wgpu::Backends::empty(),
            ..GpuOptions::default()
        });
        assert!(!probe.probe().is_supported());
    }
}
