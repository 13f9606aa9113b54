use crate::capability::{Capability, CapabilityProbe};
use crate::config::BootstrapConfig;
use crate::renderer::Renderer;
use crate::settings::RenderSettings;
use shadowbox_common::Viewport;
use shadowbox_scene::{SceneContext, build_scene};

/// How a bootstrap run ended.
#[derive(Debug)]
pub enum Bootstrap<T> {
    /// The scene was built and exactly one frame was drawn.
    Rendered { context: SceneContext, frame: T },
    /// The capability check failed; nothing was built.
    Unsupported { reason: String },
}

impl<T> Bootstrap<T> {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Bootstrap::Rendered { .. })
    }
}

/// Bind a renderer to its surface and draw one frame.
///
/// `bind` acquires the drawing surface and creates the renderer for it with
/// the given settings and output size. Errors from either step are returned
/// as is; there is no retry.
pub fn render_step<R, F>(
    context: &SceneContext,
    settings: &RenderSettings,
    viewport: Viewport,
    bind: F,
) -> Result<R::Output, R::Error>
where
    R: Renderer,
    F: FnOnce(&RenderSettings, Viewport) -> Result<R, R::Error>,
{
    let mut renderer = bind(settings, viewport)?;
    let frame = renderer.render(context.scene(), context.camera())?;
    tracing::info!(%viewport, "frame rendered");
    Ok(frame)
}

/// One-shot sequence: capability check, then scene setup and a single render.
pub struct Bootstrapper<P> {
    probe: P,
    config: BootstrapConfig,
    viewport: Viewport,
}

impl<P: CapabilityProbe> Bootstrapper<P> {
    pub fn new(probe: P, config: BootstrapConfig, viewport: Viewport) -> Self {
        Self {
            probe,
            config,
            viewport,
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run the sequence. Consumes the bootstrapper so it runs once.
    pub fn run<R, F>(self, bind: F) -> Result<Bootstrap<R::Output>, R::Error>
    where
        R: Renderer,
        F: FnOnce(&RenderSettings, Viewport) -> Result<R, R::Error>,
    {
        let adapter = match self.probe.probe() {
            Capability::Supported(adapter) => adapter,
            Capability::Unsupported { reason } => {
                tracing::warn!(%reason, "3D rendering support is not available");
                return Ok(Bootstrap::Unsupported { reason });
            }
        };
        tracing::info!(%adapter, "3D rendering support detected");

        let context = build_scene(&self.config.scene, self.viewport);
        let frame = render_step(&context, &self.config.renderer, self.viewport, bind)?;
        Ok(Bootstrap::Rendered { context, frame })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::{AdapterSummary, guarded_probe};
    use crate::renderer::DebugTextRenderer;
    use crate::settings::ShadowMapType;
    use shadowbox_scene::{PerspectiveCamera, Scene};
    use std::cell::Cell;
    use std::rc::Rc;

    fn supported() -> Capability {
        Capability::Supported(AdapterSummary {
            name: "fake".into(),
            backend: "none".into(),
            device_type: "Cpu".into(),
        })
    }

    /// Records what it was asked to draw.
    struct CountingRenderer<'a> {
        calls: &'a Cell<u32>,
        settings: RenderSettings,
        viewport: Viewport,
    }

    #[derive(Debug, PartialEq)]
    struct Drawn {
        viewport: Viewport,
        children: usize,
        aspect: f32,
        settings: RenderSettings,
    }

    impl Renderer for CountingRenderer<'_> {
        type Output = Drawn;
        type Error = String;

        fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<Drawn, String> {
            self.calls.set(self.calls.get() + 1);
            Ok(Drawn {
                viewport: self.viewport,
                children: scene.len(),
                aspect: camera.aspect,
                settings: self.settings,
            })
        }
    }

    #[test]
    fn supported_renders_exactly_once() {
        let calls = Cell::new(0);
        let binds = Cell::new(0);
        let boot = Bootstrapper::new(supported, BootstrapConfig::default(), Viewport::new(800, 600));

        let outcome = boot
            .run(|settings, viewport| {
                binds.set(binds.get() + 1);
                Ok::<_, String>(CountingRenderer {
                    calls: &calls,
                    settings: *settings,
                    viewport,
                })
            })
            .unwrap();

        assert_eq!(binds.get(), 1);
        assert_eq!(calls.get(), 1);
        let Bootstrap::Rendered { context, frame } = outcome else {
            panic!("expected a rendered frame");
        };
        assert_eq!(frame.viewport, Viewport::new(800, 600));
        assert_eq!(frame.children, 5);
        assert!((frame.aspect - 800.0 / 600.0).abs() < 1e-6);
        assert!(frame.settings.shadow_map_enabled);
        assert_eq!(frame.settings.shadow_map_type, ShadowMapType::PcfSoft);
        assert_eq!(context.scene().len(), 5);
    }

    /// Output that shares the resources it was presented with.
    struct Presenting {
        device: Rc<Cell<bool>>,
    }

    struct Shown {
        device: Rc<Cell<bool>>,
    }

    impl Renderer for Presenting {
        type Output = Shown;
        type Error = String;

        fn render(&mut self, _: &Scene, _: &PerspectiveCamera) -> Result<Shown, String> {
            self.device.set(true);
            Ok(Shown {
                device: Rc::clone(&self.device),
            })
        }
    }

    #[test]
    fn presented_frame_outlives_renderer() {
        let device = Rc::new(Cell::new(false));
        let boot = Bootstrapper::new(supported, BootstrapConfig::default(), Viewport::new(64, 64));

        let outcome = boot
            .run(|_, _| {
                Ok::<_, String>(Presenting {
                    device: Rc::clone(&device),
                })
            })
            .unwrap();

        let Bootstrap::Rendered { frame, .. } = outcome else {
            panic!("expected a rendered frame");
        };
        // The renderer is gone; only the test and the frame hold the device.
        assert_eq!(Rc::strong_count(&device), 2);
        assert!(frame.device.get());
        drop(frame);
        assert_eq!(Rc::strong_count(&device), 1);
    }

    #[test]
    fn unsupported_builds_nothing() {
        let binds = Cell::new(0);
        let probe = || guarded_probe(|| Err::<AdapterSummary, _>("no adapter found"));
        let boot = Bootstrapper::new(probe, BootstrapConfig::default(), Viewport::new(800, 600));

        let outcome = boot
            .run(|_, _| {
                binds.set(binds.get() + 1);
                Ok::<_, std::convert::Infallible>(DebugTextRenderer::default())
            })
            .unwrap();

        assert_eq!(binds.get(), 0);
        match outcome {
            Bootstrap::Unsupported { reason } => assert_eq!(reason, "no adapter found"),
            other => panic!("expected unsupported, got {other:?}"),
        }
    }

    #[test]
    fn panicking_probe_is_unsupported() {
        let probe = || {
            guarded_probe(|| -> Result<AdapterSummary, String> {
                panic!("context creation threw");
            })
        };
        let boot = Bootstrapper::new(probe, BootstrapConfig::default(), Viewport::default());
        let outcome = boot
            .run(|settings, viewport| {
                Ok::<_, std::convert::Infallible>(DebugTextRenderer::new(*settings, viewport))
            })
            .unwrap();
        assert!(!outcome.is_rendered());
    }

    #[test]
    fn bind_failure_propagates() {
        let boot = Bootstrapper::new(supported, BootstrapConfig::default(), Viewport::new(10, 10));
        let result = boot.run(|_, _| Err::<CountingRenderer<'static>, _>("surface missing".to_string()));
        assert_eq!(result.unwrap_err(), "surface missing");
    }

    #[test]
    fn render_step_with_text_renderer() {
        let viewport = Viewport::new(320, 240);
        let context = build_scene(&Default::default(), viewport);
        let text = render_step(&context, &RenderSettings::default(), viewport, |s, v| {
            Ok::<_, std::convert::Infallible>(DebugTextRenderer::new(*s, v))
        })
        .unwrap();
        assert!(text.contains("Frame 320x240"));
    }
}
