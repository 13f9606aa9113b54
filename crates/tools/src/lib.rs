//! Developer Tooling: read-only scene inspection for the CLI and logs.
//!
//! # Invariants
//! - Tools never mutate the scene they inspect.

mod inspector;

pub use inspector::{NodeInfo, SceneInspector, SceneSummary, ShadowInfo};
