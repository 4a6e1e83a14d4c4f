//! Highlight registry: paints named parts of a model with one of two materials.
//!
//! # Invariants
//! - Part names are unique; on collision the surface enumerated last wins.
//! - Every operation leaves each touched surface on exactly the neutral or
//!   the highlight material. No selection history is kept.
//! - An unknown part name is a warning, never an error, and changes nothing.

pub mod config;
pub mod host;
pub mod registry;

pub use config::{ConfigError, HighlightConfig};
pub use host::SurfaceHost;
pub use registry::{HighlightEvent, HighlightMaterials, HighlightRegistry};

pub fn crate_info() -> &'static str {
    "partlight-highlight v0.1.0"
}
