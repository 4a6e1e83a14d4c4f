//! Rendering Adapter: renderer-agnostic interface over a scene.
//!
//! # Invariants
//! - Renderer cannot mutate the scene.
//! - Output derives from scene state and view only.

mod renderer;

pub use renderer::{DebugTextRenderer, RenderView, Renderer};

pub fn crate_info() -> &'static str {
    "partlight-render v0.1.0"
}
