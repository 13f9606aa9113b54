use glam::Vec3;
use serde::Serialize;
use shadowbox_common::NodeId;
use shadowbox_scene::{Node, NodeKind, Scene};

/// Scene inspector for developer tooling.
///
/// Provides read-only queries against a built scene for debugging and the
/// CLI `inspect` command.
pub struct SceneInspector;

impl SceneInspector {
    /// Produce a summary of the scene.
    pub fn summary(scene: &Scene) -> SceneSummary {
        let (vertices, triangles) = scene.meshes().fold((0, 0), |(v, t), mesh| {
            let data = mesh.geometry.build();
            (v + data.vertex_count(), t + data.triangle_count())
        });
        let shadows = scene
            .point_lights()
            .filter(|l| l.cast_shadow)
            .map(|l| ShadowInfo {
                map_width: l.shadow.map_size.x,
                map_height: l.shadow.map_size.y,
                near: l.shadow.camera.near,
                far: l.shadow.camera.far,
                casters: scene.meshes().filter(|m| m.cast_shadow).count(),
                receivers: scene.meshes().filter(|m| m.receive_shadow).count(),
            })
            .collect();

        SceneSummary {
            children: scene.len(),
            cameras: scene.count(NodeKind::Camera),
            point_lights: scene.count(NodeKind::PointLight),
            meshes: scene.count(NodeKind::Mesh),
            camera_helpers: scene.count(NodeKind::CameraHelper),
            vertices,
            triangles,
            helper_lines: scene.camera_helpers().map(|h| h.lines().len()).sum(),
            shadows,
        }
    }

    /// Describe a single node, if attached.
    pub fn inspect_node(scene: &Scene, id: NodeId) -> Option<NodeInfo> {
        scene.get(id).map(|node| NodeInfo::new(id, node))
    }

    /// Describe every child in attach order.
    pub fn list_nodes(scene: &Scene) -> Vec<NodeInfo> {
        scene
            .children()
            .map(|(id, node)| NodeInfo::new(id, node))
            .collect()
    }
}

/// Summary of scene contents for the inspector.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub children: usize,
    pub cameras: usize,
    pub point_lights: usize,
    pub meshes: usize,
    pub camera_helpers: usize,
    pub vertices: usize,
    pub triangles: usize,
    pub helper_lines: usize,
    pub shadows: Vec<ShadowInfo>,
}

impl std::fmt::Display for SceneSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Scene: children={} cameras={} lights={} meshes={} helpers={} vertices={} triangles={} helper_lines={}",
            self.children,
            self.cameras,
            self.point_lights,
            self.meshes,
            self.camera_helpers,
            self.vertices,
            self.triangles,
            self.helper_lines,
        )?;
        for shadow in &self.shadows {
            write!(f, "\n  {shadow}")?;
        }
        Ok(())
    }
}

/// Shadow map of one shadow-casting light.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShadowInfo {
    pub map_width: u32,
    pub map_height: u32,
    pub near: f32,
    pub far: f32,
    pub casters: usize,
    pub receivers: usize,
}

impl std::fmt::Display for ShadowInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shadow map {}x{} x6 faces, depth {}..{}, casters={} receivers={}",
            self.map_width, self.map_height, self.near, self.far, self.casters, self.receivers
        )
    }
}

/// Detailed info about a single node.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeInfo {
    pub id: NodeId,
    pub kind: NodeKind,
    pub position: [f32; 3],
}

impl NodeInfo {
    fn new(id: NodeId, node: &Node) -> Self {
        let position: Vec3 = match node {
            Node::Camera(c) => c.position(),
            Node::PointLight(l) => l.position(),
            Node::Mesh(m) => m.transform.position,
            Node::CameraHelper(h) => h.camera.position(),
        };
        Self {
            id,
            kind: node.kind(),
            position: position.to_array(),
        }
    }
}

impl std::fmt::Display for NodeInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Node [{}] {} pos=({:.2}, {:.2}, {:.2})",
            self.id.short(),
            self.kind,
            self.position[0],
            self.position[1],
            self.position[2],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shadowbox_common::Viewport;
    use shadowbox_scene::{SceneConfig, build_scene};

    #[test]
    fn summary_empty_scene() {
        let summary = SceneInspector::summary(&Scene::new());
        assert_eq!(summary.children, 0);
        assert_eq!(summary.triangles, 0);
        assert!(summary.shadows.is_empty());
    }

    #[test]
    fn summary_of_default_scene() {
        let ctx = build_scene(&SceneConfig::default(), Viewport::new(800, 600));
        let summary = SceneInspector::summary(ctx.scene());

        assert_eq!(summary.children, 5);
        assert_eq!(summary.cameras, 1);
        assert_eq!(summary.point_lights, 1);
        assert_eq!(summary.meshes, 2);
        assert_eq!(summary.camera_helpers, 1);
        assert_eq!(summary.helper_lines, 25);

        let sphere = ctx.sphere().geometry.build();
        let plane = ctx.plane().geometry.build();
        assert_eq!(
            summary.triangles,
            sphere.triangle_count() + plane.triangle_count()
        );

        assert_eq!(summary.shadows.len(), 1);
        let shadow = &summary.shadows[0];
        assert_eq!((shadow.map_width, shadow.map_height), (512, 512));
        assert_eq!((shadow.near, shadow.far), (0.5, 500.0));
        assert_eq!((shadow.casters, shadow.receivers), (1, 1));
    }

    #[test]
    fn inspect_node_found() {
        let ctx = build_scene(&SceneConfig::default(), Viewport::default());
        let [_, light_id, ..] = ctx.node_ids();

        let info = SceneInspector::inspect_node(ctx.scene(), light_id).unwrap();
        assert_eq!(info.kind, NodeKind::PointLight);
        assert_eq!(info.position, [0.0, 30.0, 0.0]);
    }

    #[test]
    fn inspect_node_not_found() {
        let ctx = build_scene(&SceneConfig::default(), Viewport::default());
        assert!(SceneInspector::inspect_node(ctx.scene(), NodeId::new()).is_none());
    }

    #[test]
    fn list_nodes_in_attach_order() {
        let ctx = build_scene(&SceneConfig::default(), Viewport::default());
        let kinds: Vec<NodeKind> = SceneInspector::list_nodes(ctx.scene())
            .iter()
            .map(|n| n.kind)
            .collect();
        assert_eq!(
            kinds,
            [
                NodeKind::Camera,
                NodeKind::PointLight,
                NodeKind::Mesh,
                NodeKind::Mesh,
                NodeKind::CameraHelper,
            ]
        );
    }

    #[test]
    fn summary_display_and_json() {
        let ctx = build_scene(&SceneConfig::default(), Viewport::default());
        let summary = SceneInspector::summary(ctx.scene());

        let text = summary.to_string();
        assert!(text.contains("children=5"));
        assert!(text.contains("Shadow map 512x512"));

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["meshes"], 2);
        assert_eq!(json["shadows"][0]["map_width"], 512);
    }
}
