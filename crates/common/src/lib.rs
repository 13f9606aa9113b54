//! Shared value types: node ids, transforms, colours and viewport sizes.

mod color;
mod types;

pub use color::{Color, ColorParseError};
pub use types::{NodeId, Transform, Viewport};
