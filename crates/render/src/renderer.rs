use crate::settings::RenderSettings;
use shadowbox_common::Viewport;
use shadowbox_scene::{Node, PerspectiveCamera, Scene};
use std::convert::Infallible;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// A renderer is bound to its drawing surface when it is created; `render`
/// draws one frame of the scene from the camera's viewpoint. It never mutates
/// the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;
    type Error;

    fn render(
        &mut self,
        scene: &Scene,
        camera: &PerspectiveCamera,
    ) -> Result<Self::Output, Self::Error>;
}

/// Debug text renderer.
///
/// Produces a human-readable description of what a GPU renderer would draw.
/// Useful for CLI output, logging, and testing the render interface.
#[derive(Debug, Default)]
pub struct DebugTextRenderer {
    settings: RenderSettings,
    viewport: Viewport,
}

impl DebugTextRenderer {
    pub fn new(settings: RenderSettings, viewport: Viewport) -> Self {
        Self { settings, viewport }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;
    type Error = Infallible;

    fn render(&mut self, scene: &Scene, camera: &PerspectiveCamera) -> Result<String, Infallible> {
        let mut out = String::new();
        out.push_str(&format!(
            "=== Frame {} (shadows={}, filter={:?}) ===\n",
            self.viewport, self.settings.shadow_map_enabled, self.settings.shadow_map_type
        ));
        let p = camera.position();
        out.push_str(&format!(
            "Camera: pos=({:.1}, {:.1}, {:.1}) fov={:.0} aspect={:.3} near={} far={}\n",
            p.x, p.y, p.z, camera.fov_degrees, camera.aspect, camera.near, camera.far
        ));
        out.push_str(&format!("Children: {}\n", scene.len()));

        for (id, node) in scene.children() {
            out.push_str(&format!("  [{}] {}", id.short(), node.kind()));
            let detail = match node {
                Node::Camera(c) => format!(" fov={:.0}", c.fov_degrees),
                Node::PointLight(l) => {
                    let p = l.position();
                    format!(
                        " pos=({:.1}, {:.1}, {:.1}) color={} intensity={} shadow={}x{}",
                        p.x,
                        p.y,
                        p.z,
                        l.color,
                        l.intensity,
                        l.shadow.map_size.x,
                        l.shadow.map_size.y
                    )
                }
                Node::Mesh(m) => {
                    let data = m.geometry.build();
                    format!(
                        " tris={} color={} lit={} cast={} receive={}",
                        data.triangle_count(),
                        m.material.color(),
                        m.material.is_lit(),
                        m.cast_shadow,
                        m.receive_shadow
                    )
                }
                Node::CameraHelper(h) => format!(
                    " near={} far={} lines={}",
                    h.camera.near,
                    h.camera.far,
                    h.lines().len()
                ),
            };
            out.push_str(&detail);
            out.push('\n');
        }

        Ok(out)
    }
}
