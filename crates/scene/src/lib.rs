//! Scene: the minimal host hierarchy the highlight registry enumerates and paints.
//!
//! # Invariants
//! - Every surface belongs to exactly one node and always has one material.
//! - Traversal is pre-order, parent before children, children in insertion order.
//! - Every material assignment produces an event record.

pub mod description;
pub mod scene;

pub use description::{NodeDescription, SceneDescription};
pub use scene::{Node, Scene, SceneError, SceneEvent, SurfaceData};

pub fn crate_info() -> &'static str {
    "partlight-scene v0.1.0"
}
