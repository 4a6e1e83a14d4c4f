use partlight_common::{MaterialHandle, NodeId};
use partlight_scene::{Scene, SurfaceData};
use std::fmt::Write;

/// View configuration for rendering.
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderView {
    /// Surfaces on this material are marked as highlighted.
    pub highlight: Option<MaterialHandle>,
    /// Also list nodes that carry no surface.
    pub show_bare_nodes: bool,
}

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads scene state and a view configuration, then produces
/// output. It never mutates the scene.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given scene and view.
    fn render(&self, scene: &Scene, view: &RenderView) -> Self::Output;
}

/// Renders the hierarchy as indented text, one line per node.
#[derive(Debug, Default)]
pub struct DebugTextRenderer;

impl DebugTextRenderer {
    pub fn new() -> Self {
        Self
    }

    fn render_node(
        &self,
        scene: &Scene,
        view: &RenderView,
        id: NodeId,
        depth: usize,
        out: &mut String,
    ) {
        let Some(node) = scene.node(id) else {
            return;
        };
        let indent = "  ".repeat(depth + 1);
        match node.surface().and_then(|s| scene.surface(s)) {
            Some(&SurfaceData { material, .. }) => {
                let mark = if view.highlight == Some(material) { "*" } else { " " };
                let material_name = scene.material_name(material).unwrap_or("?");
                let _ = writeln!(out, "{indent}{mark} {} [{material_name}]", node.name());
            }
            None if view.show_bare_nodes => {
                let _ = writeln!(out, "{indent}  {}", node.name());
            }
            None => {}
        }
        for child in node.children() {
            self.render_node(scene, view, *child, depth + 1, out);
        }
    }
}

impl Renderer for DebugTextRenderer {
    type Output = String;

    fn render(&self, scene: &Scene, view: &RenderView) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "=== Scene (nodes={}, surfaces={}) ===",
            scene.node_count(),
            scene.surface_count()
        );
        for root in scene.roots() {
            self.render_node(scene, view, *root, 0, &mut out);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scene() -> (Scene, MaterialHandle) {
        let mut scene = Scene::new();
        let skin = scene.register_material("Skin");
        let glow = scene.register_material("Glow");
        let root = scene.add_root("Body");
        let chest = scene.add_child(root, "Chest").unwrap();
        let arm = scene.add_child(root, "Arm").unwrap();
        scene.attach_surface(chest, glow).unwrap();
        scene.attach_surface(arm, skin).unwrap();
        (scene, glow)
    }

    #[test]
    fn debug_renderer_empty_scene() {
        let output = DebugTextRenderer::new().render(&Scene::new(), &RenderView::default());
        assert!(output.contains("nodes=0"));
        assert!(output.contains("surfaces=0"));
    }

    #[test]
    fn debug_renderer_marks_highlighted() {
        let (scene, glow) = scene();
        let view = RenderView {
            highlight: Some(glow),
            ..RenderView::default()
        };
        let output = DebugTextRenderer::new().render(&scene, &view);

        assert!(output.contains("* Chest [Glow]"));
        assert!(output.contains("  Arm [Skin]"));
        assert!(!output.contains("* Arm"));
    }

    #[test]
    fn bare_nodes_hidden_by_default() {
        let (scene, _) = scene();
        let renderer = DebugTextRenderer::new();
        assert!(!renderer.render(&scene, &RenderView::default()).contains("Body"));

        let view = RenderView {
            show_bare_nodes: true,
            ..RenderView::default()
        };
        assert!(renderer.render(&scene, &view).contains("Body"));
    }
}
