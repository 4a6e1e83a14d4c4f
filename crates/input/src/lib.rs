//! Pointer behaviors. Raw device polling stays with the host; this crate only
//! turns a per-tick pointer sample into a transform change.
//!
//! # Invariants
//! - Behaviors are pure functions of the sample and the current transform.

pub mod drag;

pub use drag::{DragRotate, PointerSample};

pub fn crate_info() -> &'static str {
    "partlight-input v0.1.0"
}
