use crate::mutations::{Mutation, MutationError};
use crate::store::DocumentStore;
use atelier_model::{StyleMap, StylePolicy};
use atelier_policy::{
    compute_effective_policy, get_group_visibility, inspect_control, ControlState, EffectivePolicy,
};

pub struct StyleController<'a> {
    store: &'a DocumentStore,
}

impl<'a> StyleController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn styles(&self, id: &str) -> Option<StyleMap> {
        self.store
            .get_state()
            .project
            .node(id)
            .map(|node| node.styles.clone())
    }

    pub fn style(&self, id: &str, property: &str) -> Option<String> {
        self.store
            .get_state()
            .project
            .node(id)
            .and_then(|node| node.styles.get(property).cloned())
    }

    pub fn set_style(&self, id: &str, property: &str, value: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::SetStyle {
            node_id: id.to_string(),
            property: property.to_string(),
            value: value.to_string(),
        })
    }

    pub fn remove_style(&self, id: &str, property: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::RemoveStyle {
            node_id: id.to_string(),
            property: property.to_string(),
        })
    }

    /// Set or clear the project-level policy for a component definition
    pub fn set_policy(
        &self,
        component_id: &str,
        policy: Option<StylePolicy>,
    ) -> Result<bool, MutationError> {
        self.store.apply(Mutation::SetPolicy {
            component_id: component_id.to_string(),
            policy,
        })
    }

    /// Policy for a node in the current editor mode
    pub fn effective_policy(&self, id: &str) -> Option<EffectivePolicy> {
        let state = self.store.get_state();
        let node = state.project.node(id)?;
        Some(compute_effective_policy(&state, node, self.store.registry()))
    }

    pub fn group_visible(&self, id: &str, group_name: &str) -> Option<bool> {
        self.effective_policy(id)
            .map(|policy| get_group_visibility(&policy, group_name))
    }

    /// What the inspector shows for `control_path` (e.g. `styles:width`)
    /// on a node
    pub fn control_state(&self, id: &str, control_path: &str) -> Option<ControlState> {
        let state = self.store.get_state();
        let node = state.project.node(id)?;
        let policy = compute_effective_policy(&state, node, self.store.registry());
        Some(inspect_control(
            &policy,
            self.store.rules(),
            &node.styles,
            control_path,
        ))
    }
}

#[cfg(test)]
mod tests {
    use crate::controllers::fixtures;
    use atelier_model::{ModePolicy, StylePolicy};

    #[test]
    fn test_set_and_remove_style() {
        let store = fixtures::store();

        assert_eq!(store.styles().set_style("b", "color", "red"), Ok(true));
        assert_eq!(store.styles().style("b", "color").as_deref(), Some("red"));

        assert_eq!(store.styles().remove_style("b", "color"), Ok(true));
        assert_eq!(store.styles().style("b", "color"), None);

        assert_eq!(store.styles().set_style("ghost", "color", "red"), Ok(false));
    }

    #[test]
    fn test_control_state_follows_mode_and_values() {
        let store = fixtures::store();

        // `text` only allows color/width/display in basic mode
        let margin = store.styles().control_state("a1", "styles:margin-top").unwrap();
        assert!(!margin.visible);

        store.styles().set_style("a1", "display", "inline").unwrap();
        let width = store.styles().control_state("a1", "styles:width").unwrap();
        assert!(width.visible);
        assert!(width.disabled);
        assert!(width.warning.is_some());

        store.ui().set_expert_mode(true).unwrap();
        let margin = store.styles().control_state("a1", "styles:margin-top").unwrap();
        assert!(margin.visible);

        assert!(store.styles().control_state("ghost", "styles:width").is_none());
    }

    #[test]
    fn test_project_policy_layer_denies() {
        let store = fixtures::store();
        assert_eq!(store.styles().group_visible("b", "position"), Some(true));

        store
            .styles()
            .set_policy(
                "box",
                Some(StylePolicy::default().with_basic(
                    ModePolicy::default()
                        .allow_styles(["color", "font-size", "position", "top"])
                        .deny_styles(["position", "top", "right", "bottom", "left", "z-index"]),
                )),
            )
            .unwrap();

        assert_eq!(store.styles().group_visible("b", "position"), Some(false));
        assert_eq!(store.styles().group_visible("b", "typography"), Some(true));
        assert_eq!(store.styles().group_visible("b", "sizing"), Some(false));
    }

    #[test]
    fn test_deny_only_project_layer_hides_everything_in_basic() {
        let store = fixtures::store();

        store
            .styles()
            .set_policy("box", Some(StylePolicy::default().with_basic(ModePolicy::default().deny_styles(["z-index"]))))
            .unwrap();

        assert_eq!(store.styles().group_visible("b", "typography"), Some(false));
        assert_eq!(store.styles().group_visible("b", "sizing"), Some(false));

        store.ui().set_expert_mode(true).unwrap();
        assert_eq!(store.styles().group_visible("b", "typography"), Some(true));
        assert_eq!(store.styles().group_visible("b", "position"), Some(true));
    }
}
