use partlight_common::{MaterialHandle, NodeId, SurfaceHandle, Transform};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Errors from scene construction.
#[derive(Debug, thiserror::Error)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unknown node: {0:?}")]
    UnknownNode(NodeId),
    #[error("unknown material: {0}")]
    UnknownMaterial(String),
    #[error("node '{0}' already has a surface")]
    SurfaceAlreadyAttached(String),
}

/// An event record produced by every material assignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SceneEvent {
    MaterialAssigned {
        surface: SurfaceHandle,
        old: MaterialHandle,
        new: MaterialHandle,
    },
}

/// A named node in the hierarchy.
///
/// Structure is read-only outside the scene; only the transform is editable,
/// through [`Scene::transform_mut`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    name: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    surface: Option<SurfaceHandle>,
    transform: Transform,
}

impl Node {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    pub fn surface(&self) -> Option<SurfaceHandle> {
        self.surface
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }
}

/// Per-surface data: owning node and current material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceData {
    pub node: NodeId,
    pub material: MaterialHandle,
}

/// In-memory scene hierarchy.
///
/// Nodes, surfaces and materials live in BTreeMaps so that every query is
/// deterministic. Root order and child order are insertion order.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    nodes: BTreeMap<NodeId, Node>,
    roots: Vec<NodeId>,
    surfaces: BTreeMap<SurfaceHandle, SurfaceData>,
    materials: BTreeMap<String, MaterialHandle>,
    next_surface: u64,
    next_material: u64,
    event_log: Vec<SceneEvent>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named material. Registering an existing name returns its handle.
    pub fn register_material(&mut self, name: &str) -> MaterialHandle {
        if let Some(handle) = self.materials.get(name) {
            return *handle;
        }
        let handle = MaterialHandle(self.next_material);
        self.next_material += 1;
        self.materials.insert(name.to_string(), handle);
        handle
    }

    /// Look up a material by name.
    pub fn material(&self, name: &str) -> Option<MaterialHandle> {
        self.materials.get(name).copied()
    }

    /// Reverse lookup of a material's name.
    pub fn material_name(&self, handle: MaterialHandle) -> Option<&str> {
        self.materials
            .iter()
            .find(|(_, h)| **h == handle)
            .map(|(name, _)| name.as_str())
    }

    pub fn materials(&self) -> &BTreeMap<String, MaterialHandle> {
        &self.materials
    }

    /// Add a top-level node.
    pub fn add_root(&mut self, name: &str) -> NodeId {
        let id = NodeId::new();
        self.nodes.insert(id, new_node(name, None));
        self.roots.push(id);
        id
    }

    /// Add a child under an existing node.
    pub fn add_child(&mut self, parent: NodeId, name: &str) -> Result<NodeId, SceneError> {
        let id = NodeId::new();
        let parent_node = self
            .nodes
            .get_mut(&parent)
            .ok_or(SceneError::UnknownNode(parent))?;
        parent_node.children.push(id);
        self.nodes.insert(id, new_node(name, Some(parent)));
        Ok(id)
    }

    /// Attach a surface to a node, painted with `material`. A node holds at most one surface.
    pub fn attach_surface(
        &mut self,
        node: NodeId,
        material: MaterialHandle,
    ) -> Result<SurfaceHandle, SceneError> {
        let data = self.nodes.get_mut(&node).ok_or(SceneError::UnknownNode(node))?;
        if data.surface.is_some() {
            return Err(SceneError::SurfaceAlreadyAttached(data.name.clone()));
        }
        let handle = SurfaceHandle(self.next_surface);
        self.next_surface += 1;
        data.surface = Some(handle);
        self.surfaces.insert(handle, SurfaceData { node, material });
        Ok(handle)
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Mutable access to a node's local transform.
    pub fn transform_mut(&mut self, id: NodeId) -> Option<&mut Transform> {
        self.nodes.get_mut(&id).map(|node| &mut node.transform)
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn surface_count(&self) -> usize {
        self.surfaces.len()
    }

    /// First node with the given name in traversal order.
    pub fn find_by_name(&self, name: &str) -> Option<NodeId> {
        self.roots
            .iter()
            .flat_map(|root| self.walk(*root))
            .find(|id| self.nodes.get(id).is_some_and(|node| node.name == name))
    }

    /// Node ids of `root` and all its descendants, pre-order.
    pub fn walk(&self, root: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        if !self.nodes.contains_key(&root) {
            return out;
        }
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            out.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        out
    }

    /// Surfaces on `root` and its descendants, in traversal order.
    pub fn surfaces_in_subtree(&self, root: NodeId) -> Vec<(NodeId, SurfaceHandle)> {
        self.walk(root)
            .into_iter()
            .filter_map(|id| self.nodes.get(&id)?.surface.map(|s| (id, s)))
            .collect()
    }

    pub fn surface(&self, handle: SurfaceHandle) -> Option<&SurfaceData> {
        self.surfaces.get(&handle)
    }

    pub fn surfaces(&self) -> &BTreeMap<SurfaceHandle, SurfaceData> {
        &self.surfaces
    }

    pub fn material_of(&self, handle: SurfaceHandle) -> Option<MaterialHandle> {
        self.surfaces.get(&handle).map(|s| s.material)
    }

    /// Paint a surface and log the change. Returns false for unknown surfaces.
    pub fn set_material(&mut self, surface: SurfaceHandle, material: MaterialHandle) -> bool {
        let Some(data) = self.surfaces.get_mut(&surface) else {
            return false;
        };
        let old = data.material;
        data.material = material;
        tracing::debug!(?surface, ?old, new = ?material, "material assigned");
        self.event_log.push(SceneEvent::MaterialAssigned {
            surface,
            old,
            new: material,
        });
        true
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<SceneEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[SceneEvent] {
        &self.event_log
    }
}

fn new_node(name: &str, parent: Option<NodeId>) -> Node {
    Node {
        name: name.to_string(),
        parent,
        children: Vec::new(),
        surface: None,
        transform: Transform::default(),
    }
}
