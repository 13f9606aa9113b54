//! Rendering Adapter: renderer-agnostic interface and the scene bootstrapper.
//!
//! # Invariants
//! - Renderers read the scene; they never mutate it.
//! - The capability check never fails: errors and panics become `Unsupported`.
//! - One bootstrap run builds the scene at most once and renders at most once.

mod bootstrap;
mod capability;
mod config;
mod renderer;
mod settings;

pub use bootstrap::{Bootstrap, Bootstrapper, render_step};
pub use capability::{AdapterSummary, Capability, CapabilityProbe, guarded_probe};
pub use config::{BootstrapConfig, ConfigError};
pub use renderer::{DebugTextRenderer, Renderer};
pub use settings::{RenderSettings, ShadowMapType};
