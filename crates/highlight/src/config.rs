//! Highlight configuration: which node to enumerate and which two materials to paint with.
//!
//! Materials and the root are named, and resolved against a scene's material
//! table and hierarchy when the registry is built.

use crate::registry::{HighlightMaterials, HighlightRegistry};
use partlight_common::NodeId;
use partlight_scene::Scene;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Errors from loading or resolving a highlight configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
    #[error("root node not found: {0}")]
    UnknownRoot(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightConfig {
    /// Name of the node whose subtree holds the parts.
    pub root: String,
    pub neutral: String,
    pub highlight: String,
}

impl HighlightConfig {
    /// Read a configuration file; `.json` is JSON, anything else YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&text)?)
        } else {
            Ok(serde_yaml::from_str(&text)?)
        }
    }

    /// Look up the configured materials in `scene`.
    pub fn materials(&self, scene: &Scene) -> Result<HighlightMaterials, ConfigError> {
        let lookup = |name: &str| {
            scene
                .material(name)
                .ok_or_else(|| ConfigError::UnknownMaterial(name.to_string()))
        };
        Ok(HighlightMaterials {
            neutral: lookup(&self.neutral)?,
            highlight: lookup(&self.highlight)?,
        })
    }

    /// Look up the configured root node in `scene`.
    pub fn root(&self, scene: &Scene) -> Result<NodeId, ConfigError> {
        scene
            .find_by_name(&self.root)
            .ok_or_else(|| ConfigError::UnknownRoot(self.root.clone()))
    }

    /// Resolve against `scene` and build a populated registry.
    pub fn build_registry(&self, scene: &Scene) -> Result<HighlightRegistry, ConfigError> {
        let materials = self.materials(scene)?;
        let root = self.root(scene)?;
        Ok(HighlightRegistry::build(scene, root, materials))
    }
}
