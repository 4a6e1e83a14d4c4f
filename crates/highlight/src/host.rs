use partlight_common::{MaterialHandle, NodeId, SurfaceHandle};
use partlight_scene::Scene;

/// Whatever owns the surfaces the registry tracks.
///
/// The registry never owns surfaces; it only remembers handles and asks the
/// host to repaint them.
pub trait SurfaceHost {
    /// Surfaces on `root` and its descendants, each paired with the name of
    /// the node that owns it, in traversal order.
    fn surfaces_under(&self, root: NodeId) -> Vec<(String, SurfaceHandle)>;

    /// Paint a surface.
    fn assign_material(&mut self, surface: SurfaceHandle, material: MaterialHandle);
}

impl SurfaceHost for Scene {
    fn surfaces_under(&self, root: NodeId) -> Vec<(String, SurfaceHandle)> {
        self.surfaces_in_subtree(root)
            .into_iter()
            .filter_map(|(node, surface)| self.node(node).map(|n| (n.name().to_string(), surface)))
            .collect()
    }

    fn assign_material(&mut self, surface: SurfaceHandle, material: MaterialHandle) {
        if !self.set_material(surface, material) {
            tracing::debug!(?surface, "surface no longer present in scene");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_reports_owner_names() {
        let mut scene = Scene::new();
        let m = scene.register_material("m");
        let root = scene.add_root("Model");
        let chest = scene.add_child(root, "Chest").unwrap();
        let surface = scene.attach_surface(chest, m).unwrap();

        assert_eq!(scene.surfaces_under(root), vec![("Chest".to_string(), surface)]);
    }

    #[test]
    fn scene_assign_material_paints() {
        let mut scene = Scene::new();
        let a = scene.register_material("a");
        let b = scene.register_material("b");
        let root = scene.add_root("Model");
        let surface = scene.attach_surface(root, a).unwrap();

        scene.assign_material(surface, b);
        assert_eq!(scene.material_of(surface), Some(b));
    }
}
