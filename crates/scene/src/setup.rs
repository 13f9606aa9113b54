use crate::camera::PerspectiveCamera;
use crate::config::SceneConfig;
use crate::geometry::Geometry;
use crate::helper::CameraHelper;
use crate::light::{LightShadow, PointLight};
use crate::material::Material;
use crate::mesh::Mesh;
use crate::scene::Scene;
use shadowbox_common::{NodeId, Transform, Viewport};

/// Everything the setup sequence produced, handed back to the caller.
///
/// Holds the scene root and the ids of the nodes the render step and
/// inspection need by name.
#[derive(Debug, Clone)]
pub struct SceneContext {
    scene: Scene,
    camera: NodeId,
    light: NodeId,
    sphere: NodeId,
    plane: NodeId,
    helper: NodeId,
}

impl SceneContext {
    /// The scene root.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Ids of camera, light, sphere, plane and helper, in attachment order.
    pub fn node_ids(&self) -> [NodeId; 5] {
        [self.camera, self.light, self.sphere, self.plane, self.helper]
    }

    pub fn camera(&self) -> &PerspectiveCamera {
        self.scene
            .get(self.camera)
            .and_then(|n| n.as_camera())
            .unwrap_or_else(|| unreachable!("setup always attaches the camera"))
    }

    pub fn light(&self) -> &PointLight {
        self.scene
            .get(self.light)
            .and_then(|n| n.as_point_light())
            .unwrap_or_else(|| unreachable!("setup always attaches the light"))
    }

    pub fn sphere(&self) -> &Mesh {
        self.scene
            .get(self.sphere)
            .and_then(|n| n.as_mesh())
            .unwrap_or_else(|| unreachable!("setup always attaches the sphere"))
    }

    pub fn plane(&self) -> &Mesh {
        self.scene
            .get(self.plane)
            .and_then(|n| n.as_mesh())
            .unwrap_or_else(|| unreachable!("setup always attaches the plane"))
    }

    pub fn helper(&self) -> &CameraHelper {
        self.scene
            .get(self.helper)
            .and_then(|n| n.as_camera_helper())
            .unwrap_or_else(|| unreachable!("setup always attaches the helper"))
    }
}

/// Build the scene: camera, shadow-casting point light, sphere, ground plane
/// and a helper for the light's shadow camera, in that order.
pub fn build_scene(config: &SceneConfig, viewport: Viewport) -> SceneContext {
    let mut scene = Scene::new();

    let mut camera = PerspectiveCamera::new(
        config.camera.fov_degrees,
        viewport.aspect(),
        config.camera.near,
        config.camera.far,
    );
    camera.transform = Transform::from_position(config.camera.position);
    let camera = scene.add(camera);

    let lc = &config.light;
    let mut light = PointLight::new(lc.color, lc.intensity);
    light.distance = lc.distance;
    light.decay = lc.decay;
    light.transform = Transform::from_position(lc.position);
    light.cast_shadow = lc.cast_shadow;
    light.shadow = LightShadow {
        map_size: lc.shadow_map_size,
        camera: lc.shadow_camera,
        bias: lc.shadow_bias,
    };
    let helper_node = CameraHelper::for_light(&light);
    let light = scene.add(light);

    let sc = &config.sphere;
    let mut sphere = Mesh::new(
        Geometry::sphere(sc.radius, sc.width_segments, sc.height_segments),
        Material::Basic { color: sc.color },
    );
    sphere.cast_shadow = true;
    sphere.receive_shadow = false;
    let sphere = scene.add(sphere);

    let pc = &config.plane;
    let mut plane = Mesh::new(
        Geometry::plane(pc.width, pc.height, pc.width_segments, pc.height_segments),
        Material::Standard { color: pc.color },
    );
    plane.receive_shadow = true;
    let plane = scene.add(plane);

    let helper = scene.add(helper_node);

    tracing::debug!(children = scene.len(), %viewport, "scene built");

    SceneContext {
        scene,
        camera,
        light,
        sphere,
        plane,
        helper,
    }
}
