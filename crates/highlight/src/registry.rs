use crate::host::SurfaceHost;
use partlight_common::{MaterialHandle, NodeId, SurfaceHandle};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The two fixed materials a tracked surface can be painted with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightMaterials {
    pub neutral: MaterialHandle,
    pub highlight: MaterialHandle,
}

/// An event record produced by every registry operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum HighlightEvent {
    /// The registry was populated from a root node.
    Initialized { parts: usize },
    /// Every tracked surface was reset to neutral.
    Cleared,
    /// A known part was painted.
    Applied { name: String, highlighted: bool },
    /// A command named a part the registry does not know. Nothing changed.
    UnknownPart { name: String },
}

/// Name-to-surface lookup built once from the scene hierarchy.
///
/// Holds handles only; the surfaces themselves belong to the host, which is
/// passed into every operation that paints.
#[derive(Debug, Clone)]
pub struct HighlightRegistry {
    parts: BTreeMap<String, SurfaceHandle>,
    materials: HighlightMaterials,
    event_log: Vec<HighlightEvent>,
}

impl HighlightRegistry {
    /// Create an empty registry painting with the given materials.
    pub fn new(materials: HighlightMaterials) -> Self {
        Self {
            parts: BTreeMap::new(),
            materials,
            event_log: Vec::new(),
        }
    }

    /// Create a registry and populate it from `root` in one step.
    pub fn build(host: &impl SurfaceHost, root: NodeId, materials: HighlightMaterials) -> Self {
        let mut registry = Self::new(materials);
        registry.initialize(host, root);
        registry
    }

    /// Record every surface under `root` by the name of its owning node.
    ///
    /// Later surfaces overwrite earlier ones with the same name.
    pub fn initialize(&mut self, host: &impl SurfaceHost, root: NodeId) {
        for (name, surface) in host.surfaces_under(root) {
            if let Some(previous) = self.parts.insert(name.clone(), surface) {
                tracing::debug!(
                    part = %name,
                    ?previous,
                    ?surface,
                    "duplicate part name, keeping later surface"
                );
            }
        }
        tracing::info!(parts = self.parts.len(), "highlight registry initialized");
        self.event_log.push(HighlightEvent::Initialized {
            parts: self.parts.len(),
        });
    }

    /// Paint every tracked surface neutral.
    pub fn clear_all(&mut self, host: &mut impl SurfaceHost) {
        for surface in self.parts.values() {
            host.assign_material(*surface, self.materials.neutral);
        }
        self.event_log.push(HighlightEvent::Cleared);
    }

    /// Paint one part highlighted (`enabled`) or neutral.
    ///
    /// Returns false and logs a warning when the name is unknown; no surface
    /// changes in that case.
    pub fn set_highlighted(
        &mut self,
        host: &mut impl SurfaceHost,
        name: &str,
        enabled: bool,
    ) -> bool {
        let Some(surface) = self.parts.get(name) else {
            tracing::warn!(part = name, "unknown part requested");
            self.event_log.push(HighlightEvent::UnknownPart {
                name: name.to_string(),
            });
            return false;
        };
        let material = if enabled {
            self.materials.highlight
        } else {
            self.materials.neutral
        };
        host.assign_material(*surface, material);
        self.event_log.push(HighlightEvent::Applied {
            name: name.to_string(),
            highlighted: enabled,
        });
        true
    }

    /// Highlight exactly `names`: clear everything, then highlight each name in order.
    ///
    /// Unknown names are skipped individually and returned.
    pub fn set_highlighted_many<S: AsRef<str>>(
        &mut self,
        host: &mut impl SurfaceHost,
        names: &[S],
    ) -> Vec<String> {
        self.clear_all(host);
        names
            .iter()
            .map(|name| name.as_ref())
            .filter(|name| !self.set_highlighted(&mut *host, name, true))
            .map(str::to_string)
            .collect()
    }

    pub fn materials(&self) -> HighlightMaterials {
        self.materials
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.parts.contains_key(name)
    }

    pub fn surface(&self, name: &str) -> Option<SurfaceHandle> {
        self.parts.get(name).copied()
    }

    /// Tracked part names, sorted.
    pub fn part_names(&self) -> impl Iterator<Item = &str> {
        self.parts.keys().map(String::as_str)
    }

    /// Drain and return the event log.
    pub fn drain_events(&mut self) -> Vec<HighlightEvent> {
        std::mem::take(&mut self.event_log)
    }

    /// Read-only access to the event log.
    pub fn events(&self) -> &[HighlightEvent] {
        &self.event_log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use partlight_scene::Scene;

    struct Fixture {
        scene: Scene,
        root: NodeId,
        materials: HighlightMaterials,
    }

    impl Fixture {
        fn new(parts: &[&str]) -> Self {
            let mut scene = Scene::new();
            let materials = HighlightMaterials {
                neutral: scene.register_material("Neutral"),
                highlight: scene.register_material("Highlight"),
            };
            let base = scene.register_material("Imported");
            let root = scene.add_root("Model");
            for name in parts {
                let id = scene.add_child(root, name).unwrap();
                scene.attach_surface(id, base).unwrap();
            }
            Self {
                scene,
                root,
                materials,
            }
        }

        fn registry(&self) -> HighlightRegistry {
            HighlightRegistry::build(&self.scene, self.root, self.materials)
        }

        fn highlighted(&self, registry: &HighlightRegistry) -> Vec<String> {
            registry
                .part_names()
                .filter(|name| {
                    let surface = registry.surface(name).unwrap();
                    self.scene.material_of(surface) == Some(self.materials.highlight)
                })
                .map(str::to_string)
                .collect()
        }

        fn all_neutral(&self, registry: &HighlightRegistry) -> bool {
            registry.part_names().all(|name| {
                let surface = registry.surface(name).unwrap();
                self.scene.material_of(surface) == Some(self.materials.neutral)
            })
        }
    }

    #[test]
    fn registry_starts_empty() {
        let f = Fixture::new(&[]);
        let registry = HighlightRegistry::new(f.materials);
        assert!(registry.is_empty());
        assert!(registry.events().is_empty());
    }

    #[test]
    fn initialize_records_every_part() {
        let f = Fixture::new(&["Chest", "Arm", "Leg"]);
        let registry = f.registry();
        assert_eq!(registry.len(), 3);
        assert!(registry.contains("Arm"));
        assert_eq!(registry.part_names().collect::<Vec<_>>(), ["Arm", "Chest", "Leg"]);
        assert_eq!(registry.events(), &[HighlightEvent::Initialized { parts: 3 }]);
    }

    #[test]
    fn initialize_includes_root_surface_and_nested_parts() {
        let mut f = Fixture::new(&["Chest"]);
        let m = f.materials.neutral;
        f.scene.attach_surface(f.root, m).unwrap();
        let chest = f.scene.find_by_name("Chest").unwrap();
        let bicep = f.scene.add_child(chest, "Bicep").unwrap();
        f.scene.attach_surface(bicep, m).unwrap();

        let registry = f.registry();
        assert_eq!(registry.part_names().collect::<Vec<_>>(), ["Bicep", "Chest", "Model"]);
    }

    #[test]
    fn duplicate_names_last_wins() {
        let mut f = Fixture::new(&["Arm"]);
        let m = f.materials.neutral;
        let left = f.scene.add_child(f.root, "Left").unwrap();
        let second_arm = f.scene.add_child(left, "Arm").unwrap();
        let later = f.scene.attach_surface(second_arm, m).unwrap();

        let registry = f.registry();
        assert_eq!(registry.len(), 1);
        assert_eq!(registry.surface("Arm"), Some(later));
    }

    #[test]
    fn reinitialize_merges_and_overwrites() {
        let mut f = Fixture::new(&["Chest", "Arm"]);
        let mut registry = f.registry();
        let old_arm = registry.surface("Arm").unwrap();
        let chest = registry.surface("Chest").unwrap();

        let m = f.materials.neutral;
        let extra = f.scene.add_root("Extra");
        let arm = f.scene.add_child(extra, "Arm").unwrap();
        let new_arm = f.scene.attach_surface(arm, m).unwrap();
        let tail = f.scene.add_child(extra, "Tail").unwrap();
        f.scene.attach_surface(tail, m).unwrap();

        registry.initialize(&f.scene, extra);
        assert_eq!(registry.part_names().collect::<Vec<_>>(), ["Arm", "Chest", "Tail"]);
        assert_eq!(registry.surface("Chest"), Some(chest));
        assert_eq!(registry.surface("Arm"), Some(new_arm));
        assert_ne!(new_arm, old_arm);
        assert_eq!(
            registry.events().last(),
            Some(&HighlightEvent::Initialized { parts: 3 })
        );
    }

    #[test]
    fn clear_all_leaves_everything_neutral() {
        let mut f = Fixture::new(&["Chest", "Arm", "Leg"]);
        let mut registry = f.registry();
        registry.set_highlighted(&mut f.scene, "Arm", true);

        registry.clear_all(&mut f.scene);
        assert!(f.all_neutral(&registry));
    }

    #[test]
    fn clear_all_on_empty_registry() {
        let mut f = Fixture::new(&[]);
        let mut registry = f.registry();
        registry.clear_all(&mut f.scene);
        assert!(f.scene.events().is_empty());
        assert_eq!(registry.events().last(), Some(&HighlightEvent::Cleared));
    }

    #[test]
    fn toggle_restores_only_that_part() {
        let mut f = Fixture::new(&["Chest", "Arm", "Leg"]);
        let mut registry = f.registry();
        registry.set_highlighted_many(&mut f.scene, &["Chest"]);

        assert!(registry.set_highlighted(&mut f.scene, "Leg", true));
        assert_eq!(f.highlighted(&registry), ["Chest", "Leg"]);
        assert!(registry.set_highlighted(&mut f.scene, "Leg", false));
        assert_eq!(f.highlighted(&registry), ["Chest"]);

        let leg = registry.surface("Leg").unwrap();
        assert_eq!(f.scene.material_of(leg), Some(f.materials.neutral));
    }

    #[test]
    fn unknown_part_changes_nothing_and_warns() {
        let mut f = Fixture::new(&["Chest", "Arm"]);
        let mut registry = f.registry();
        registry.drain_events();

        assert!(!registry.set_highlighted(&mut f.scene, "DoesNotExist", true));
        assert!(f.scene.events().is_empty());
        assert_eq!(
            registry.events(),
            &[HighlightEvent::UnknownPart {
                name: "DoesNotExist".into()
            }]
        );
    }

    #[test]
    fn many_selects_exact_set_regardless_of_prior_state() {
        let mut f = Fixture::new(&["Chest", "Arm", "Leg", "Neck"]);
        let mut registry = f.registry();
        registry.set_highlighted(&mut f.scene, "Neck", true);
        registry.set_highlighted(&mut f.scene, "Arm", true);

        let skipped = registry.set_highlighted_many(&mut f.scene, &["Chest", "Leg"]);
        assert!(skipped.is_empty());
        assert_eq!(f.highlighted(&registry), ["Chest", "Leg"]);
    }

    #[test]
    fn many_skips_unknown_names_and_applies_rest() {
        let mut f = Fixture::new(&["Chest", "Arm", "Leg"]);
        let mut registry = f.registry();

        let names = vec!["Ghost".to_string(), "Arm".to_string(), "Tail".to_string()];
        let skipped = registry.set_highlighted_many(&mut f.scene, &names);
        assert_eq!(skipped, ["Ghost", "Tail"]);
        assert_eq!(f.highlighted(&registry), ["Arm"]);
    }

    #[test]
    fn many_with_empty_list_clears() {
        let mut f = Fixture::new(&["Chest", "Arm"]);
        let mut registry = f.registry();
        registry.set_highlighted(&mut f.scene, "Chest", true);

        let none: [&str; 0] = [];
        registry.set_highlighted_many(&mut f.scene, &none);
        assert!(f.all_neutral(&registry));
    }

    #[test]
    fn repeated_operations_are_idempotent() {
        let mut f = Fixture::new(&["Chest", "Arm"]);
        let mut registry = f.registry();
        registry.set_highlighted_many(&mut f.scene, &["Arm"]);
        let first = f.highlighted(&registry);
        registry.set_highlighted_many(&mut f.scene, &["Arm"]);
        assert_eq!(first, f.highlighted(&registry));
    }
}
