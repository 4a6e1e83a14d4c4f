//! Shared types: node ids, surface and material handles, transforms.

pub mod types;

pub use types::{MaterialHandle, NodeId, SurfaceHandle, Transform};
