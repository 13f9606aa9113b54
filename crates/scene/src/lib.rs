//! Scene graph for the one-shot bootstrapper: scene root, nodes, geometry and setup.
//!
//! # Invariants
//! - Every node is attached to the scene root exactly once, by value.
//! - The scene offers no removal or mutable access once built.
//! - Setup is a fixed sequence; there is no update cycle.

pub mod camera;
pub mod config;
pub mod geometry;
pub mod helper;
pub mod light;
pub mod material;
pub mod mesh;
pub mod scene;
pub mod setup;

pub use camera::PerspectiveCamera;
pub use config::{CameraConfig, LightConfig, PlaneConfig, SceneConfig, SphereConfig};
pub use geometry::{Geometry, MeshData};
pub use helper::{CameraHelper, HelperLine};
pub use light::{CubeFace, LightShadow, PointLight, ShadowCamera};
pub use material::Material;
pub use mesh::Mesh;
pub use scene::{Node, NodeKind, Scene};
pub use setup::{SceneContext, build_scene};
