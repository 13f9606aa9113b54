//! wgpu render backend for the scene bootstrapper.
//!
//! Draws the scene in three stages: a depth-only pass per cube face of the
//! point light's shadow map, the lit/unlit mesh pass with filtered shadow
//! lookups, and a line pass for camera helpers.
//!
//! # Invariants
//! - Renderer never mutates the scene.
//! - One `render` call submits one frame; nothing is retained for a next one.

mod context;
mod error;
mod gpu;
mod offscreen;
mod probe;
mod shadow;
pub mod shaders;
mod surface;
mod uniforms;

pub use context::{GpuContext, GpuOptions};
pub use error::RenderError;
pub use gpu::WgpuRenderer;
pub use offscreen::{Frame, HeadlessRenderer};
pub use probe::WgpuProbe;
pub use surface::{PresentedFrame, SurfaceRenderer, SurfaceTarget};
