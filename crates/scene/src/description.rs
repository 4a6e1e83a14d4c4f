//! Declarative scene files.
//!
//! A description lists the materials the scene knows and a node tree. The
//! format is picked by file extension: `.json` is JSON, anything else YAML.
//!
//! ```yaml
//! materials: [Skin, Glow]
//! default_material: Skin
//! nodes:
//!   - name: Body
//!     children:
//!       - { name: Chest, surface: true }
//!       - { name: Arm, surface: true }
//! ```

use crate::scene::{Scene, SceneError};
use partlight_common::{MaterialHandle, NodeId};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level scene file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneDescription {
    pub materials: Vec<String>,
    /// Material every surface starts on.
    pub default_material: String,
    pub nodes: Vec<NodeDescription>,
}

/// One node and its subtree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeDescription {
    pub name: String,
    #[serde(default)]
    pub surface: bool,
    #[serde(default)]
    pub children: Vec<NodeDescription>,
}

impl SceneDescription {
    /// Read a description from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SceneError> {
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
}

impl Scene {
    /// Build a scene from a description.
    pub fn from_description(desc: &SceneDescription) -> Result<Self, SceneError> {
        let mut scene = Scene::new();
        for name in &desc.materials {
            scene.register_material(name);
        }
        let default = scene
            .material(&desc.default_material)
            .ok_or_else(|| SceneError::UnknownMaterial(desc.default_material.clone()))?;

        for node in &desc.nodes {
            let id = scene.add_root(&node.name);
            scene.build_subtree(id, node, default)?;
        }
        tracing::debug!(
            nodes = scene.node_count(),
            surfaces = scene.surface_count(),
            "scene built from description"
        );
        Ok(scene)
    }

    fn build_subtree(
        &mut self,
        id: NodeId,
        desc: &NodeDescription,
        material: MaterialHandle,
    ) -> Result<(), SceneError> {
        if desc.surface {
            self.attach_surface(id, material)?;
        }
        for child in &desc.children {
            let child_id = self.add_child(id, &child.name)?;
            self.build_subtree(child_id, child, material)?;
        }
        Ok(())
    }
}
