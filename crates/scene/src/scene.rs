use crate::camera::PerspectiveCamera;
use crate::helper::CameraHelper;
use crate::light::PointLight;
use crate::mesh::Mesh;
use serde::Serialize;
use shadowbox_common::NodeId;

/// Anything that can be attached to the scene root.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Node {
    Camera(PerspectiveCamera),
    PointLight(PointLight),
    Mesh(Mesh),
    CameraHelper(CameraHelper),
}

/// Discriminant of [`Node`], for summaries and lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum NodeKind {
    Camera,
    PointLight,
    Mesh,
    CameraHelper,
}

impl Node {
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Camera(_) => NodeKind::Camera,
            Node::PointLight(_) => NodeKind::PointLight,
            Node::Mesh(_) => NodeKind::Mesh,
            Node::CameraHelper(_) => NodeKind::CameraHelper,
        }
    }

    pub fn as_camera(&self) -> Option<&PerspectiveCamera> {
        match self {
            Node::Camera(c) => Some(c),
            _ => None,
        }
    }

    pub fn as_point_light(&self) -> Option<&PointLight> {
        match self {
            Node::PointLight(l) => Some(l),
            _ => None,
        }
    }

    pub fn as_mesh(&self) -> Option<&Mesh> {
        match self {
            Node::Mesh(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_camera_helper(&self) -> Option<&CameraHelper> {
        match self {
            Node::CameraHelper(h) => Some(h),
            _ => None,
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            NodeKind::Camera => "camera",
            NodeKind::PointLight => "point_light",
            NodeKind::Mesh => "mesh",
            NodeKind::CameraHelper => "camera_helper",
        };
        f.write_str(name)
    }
}

/// Scene root: an ordered, append-only list of children.
///
/// Children are moved in by value and there is no way to take them out or
/// borrow them mutably, so each node is attached once and stays as built.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Scene {
    children: Vec<(NodeId, Node)>,
}

impl Scene {
    /// Create an empty scene root.
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a node and return its id.
    pub fn add(&mut self, node: impl Into<Node>) -> NodeId {
        let id = NodeId::new();
        let node = node.into();
        tracing::debug!(id = %id.short(), kind = %node.kind(), "attached node to scene root");
        self.children.push((id, node));
        id
    }

    /// Number of children of the root.
    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.children
            .iter()
            .find_map(|(child, node)| (*child == id).then_some(node))
    }

    /// Children in attachment order.
    pub fn children(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.children.iter().map(|(id, node)| (*id, node))
    }

    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.children.iter().filter_map(|(_, node)| node.as_mesh())
    }

    pub fn point_lights(&self) -> impl Iterator<Item = &PointLight> {
        self.children.iter().filter_map(|(_, node)| node.as_point_light())
    }

    pub fn camera_helpers(&self) -> impl Iterator<Item = &CameraHelper> {
        self.children
            .iter()
            .filter_map(|(_, node)| node.as_camera_helper())
    }

    pub fn count(&self, kind: NodeKind) -> usize {
        self.children
            .iter()
            .filter(|(_, node)| node.kind() == kind)
            .count()
    }
}

impl From<PerspectiveCamera> for Node {
    fn from(camera: PerspectiveCamera) -> Self {
        Node::Camera(camera)
    }
}

impl From<PointLight> for Node {
    fn from(light: PointLight) -> Self {
        Node::PointLight(light)
    }
}

impl From<Mesh> for Node {
    fn from(mesh: Mesh) -> Self {
        Node::Mesh(mesh)
    }
}

impl From<CameraHelper> for Node {
    fn from(helper: CameraHelper) -> Self {
        Node::CameraHelper(helper)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Geometry;
    use crate::material::Material;
    use shadowbox_common::Color;

    #[test]
    fn scene_starts_empty() {
        let scene = Scene::new();
        assert!(scene.is_empty());
        assert_eq!(scene.meshes().count(), 0);
    }

    #[test]
    fn add_preserves_order_and_kind() {
        let mut scene = Scene::new();
        let cam = scene.add(PerspectiveCamera::default());
        let light = scene.add(PointLight::new(Color::WHITE, 1.0));
        let mesh = scene.add(Mesh::new(
            Geometry::sphere(1.0, 8, 8),
            Material::Basic {
                color: Color::WHITE,
            },
        ));

        let order: Vec<NodeId> = scene.children().map(|(id, _)| id).collect();
        assert_eq!(order, vec![cam, light, mesh]);
        assert_eq!(scene.get(light).map(Node::kind), Some(NodeKind::PointLight));
        assert_eq!(scene.count(NodeKind::Mesh), 1);
        assert!(scene.get(NodeId::new()).is_none());
    }
}
