//! # Style Policy Resolution
//!
//! Turns the layered, two-mode `StylePolicy` data into a concrete
//! visibility answer per control.
//!
//! ## Layers
//!
//! Lowest first: the component definition's policy, then the project's
//! override in `project.policies`. For the selected mode:
//! - `allow*` lists: the uppermost layer that sets one replaces the rest
//! - `deny*` lists: unioned across layers, including the mode-independent
//!   lists on each `StylePolicy`
//! - `allowAllInExpert`: the uppermost layer that sets it wins
//!
//! ## Starting set
//!
//! - Expert: everything, unless `allowAllInExpert` is explicitly `false`
//! - Basic: only the allow lists
//!
//! Outside of an allow-all expert mode an absent allow list starts that kind
//! empty. Denies are subtracted last, so deny always wins. Only a node with
//! no policy layer at all falls back to everything visible.

use crate::catalog::{group, ControlKind, ControlPath, PROPS_GROUP};
use atelier_model::{ComponentRegistry, EditorState, ModePolicy, Node, PolicyMode, StylePolicy, UiState};
use std::collections::BTreeSet;

/// Resolved visibility for one control kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Visibility {
    /// Everything not denied is visible
    Unrestricted { denied: BTreeSet<String> },
    /// Only these keys are visible; denies already subtracted
    AllowListed { allowed: BTreeSet<String> },
}

impl Visibility {
    pub fn everything() -> Self {
        Visibility::Unrestricted {
            denied: BTreeSet::new(),
        }
    }

    pub fn is_visible(&self, key: &str) -> bool {
        match self {
            Visibility::Unrestricted { denied } => !denied.contains(key),
            Visibility::AllowListed { allowed } => allowed.contains(key),
        }
    }

    fn resolve(allow: Option<&[String]>, denied: BTreeSet<String>, allow_all: bool) -> Self {
        if allow_all {
            return Visibility::Unrestricted { denied };
        }

        Visibility::AllowListed {
            allowed: allow
                .unwrap_or_default()
                .iter()
                .filter(|key| !denied.contains(key.as_str()))
                .cloned()
                .collect(),
        }
    }
}

/// Final, mode-resolved visibility for a node's controls
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EffectivePolicy {
    pub mode: PolicyMode,
    pub styles: Visibility,
    pub props: Visibility,
}

impl EffectivePolicy {
    /// Everything visible. Used when no layer defines a policy.
    pub fn permissive(mode: PolicyMode) -> Self {
        Self {
            mode,
            styles: Visibility::everything(),
            props: Visibility::everything(),
        }
    }

    pub fn visibility(&self, kind: ControlKind) -> &Visibility {
        match kind {
            ControlKind::Styles => &self.styles,
            ControlKind::Props => &self.props,
        }
    }

    pub fn is_control_visible(&self, path: &ControlPath) -> bool {
        self.visibility(path.kind).is_visible(&path.key)
    }
}

/// Policy half selected by the UI state
pub fn policy_mode(ui: &UiState) -> PolicyMode {
    if ui.expert_mode {
        PolicyMode::Expert
    } else {
        PolicyMode::Basic
    }
}

/// Effective policy for `node` in the editor's current mode
pub fn compute_effective_policy(
    state: &EditorState,
    node: &Node,
    registry: &dyn ComponentRegistry,
) -> EffectivePolicy {
    let mode = policy_mode(&state.ui);

    let definition_layer = registry
        .definition(&node.component_id)
        .and_then(|definition| definition.policy.as_ref());
    let project_layer = state.project.policies.get(&node.component_id);

    let layers: Vec<&StylePolicy> = definition_layer.into_iter().chain(project_layer).collect();
    tracing::trace!(
        node = %node.id,
        component = %node.component_id,
        layers = layers.len(),
        ?mode,
        "resolving style policy"
    );

    resolve_layers(&layers, mode)
}

/// Merge policy layers (lowest first) for one mode
pub fn resolve_layers(layers: &[&StylePolicy], mode: PolicyMode) -> EffectivePolicy {
    if layers.is_empty() {
        return EffectivePolicy::permissive(mode);
    }

    let mut allow_styles: Option<&[String]> = None;
    let mut allow_props: Option<&[String]> = None;
    let mut allow_all_in_expert: Option<bool> = None;
    let mut deny_styles = BTreeSet::new();
    let mut deny_props = BTreeSet::new();

    for layer in layers {
        deny_styles.extend(layer.deny_styles.iter().cloned());
        deny_props.extend(layer.deny_props.iter().cloned());

        let Some(sub) = layer.mode(mode) else {
            continue;
        };
        let ModePolicy {
            allow_styles: layer_allow_styles,
            deny_styles: layer_deny_styles,
            allow_props: layer_allow_props,
            deny_props: layer_deny_props,
            allow_all_in_expert: layer_allow_all,
        } = sub;

        if let Some(allow) = layer_allow_styles {
            allow_styles = Some(allow.as_slice());
        }
        if let Some(allow) = layer_allow_props {
            allow_props = Some(allow.as_slice());
        }
        if layer_allow_all.is_some() {
            allow_all_in_expert = *layer_allow_all;
        }
        deny_styles.extend(layer_deny_styles.iter().cloned());
        deny_props.extend(layer_deny_props.iter().cloned());
    }

    let allow_all = match mode {
        PolicyMode::Expert => allow_all_in_expert != Some(false),
        PolicyMode::Basic => false,
    };

    EffectivePolicy {
        mode,
        styles: Visibility::resolve(allow_styles, deny_styles, allow_all),
        props: Visibility::resolve(allow_props, deny_props, allow_all),
    }
}

/// Whether any control of `group_name` remains visible.
/// Unknown groups are reported visible.
pub fn get_group_visibility(policy: &EffectivePolicy, group_name: &str) -> bool {
    if group_name == PROPS_GROUP {
        return match &policy.props {
            Visibility::Unrestricted { .. } => true,
            Visibility::AllowListed { allowed } => !allowed.is_empty(),
        };
    }

    match group(group_name) {
        Some(group) => group
            .controls
            .iter()
            .any(|control| policy.styles.is_visible(control)),
        None => true,
    }
}

/// Visibility of a `kind:key` control path.
/// Unrecognised paths are reported visible.
pub fn get_control_visibility(policy: &EffectivePolicy, control_path: &str) -> bool {
    match ControlPath::parse(control_path) {
        Some(path) => policy.is_control_visible(&path),
        None => true,
    }
}
