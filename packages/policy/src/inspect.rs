use crate::catalog::{ControlKind, ControlPath};
use crate::resolver::{get_control_visibility, EffectivePolicy};
use crate::rules::RuleRegistry;
use atelier_model::StyleMap;
use serde::Serialize;

/// What the inspector renders for one control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ControlState {
    pub visible: bool,
    pub disabled: bool,
    pub warning: Option<String>,
    pub reasons: Vec<String>,
}

/// Combine policy visibility with dependency rules for a `kind:key` path
///
/// Dependency rules are keyed by CSS property, so only `styles:` paths are
/// matched against targeted rules. Props and unrecognised paths only see
/// universal rules. A control hidden by either layer is reported disabled
/// as well.
pub fn inspect_control(
    policy: &EffectivePolicy,
    rules: &RuleRegistry,
    values: &StyleMap,
    control_path: &str,
) -> ControlState {
    let allowed = get_control_visibility(policy, control_path);

    let outcome = match ControlPath::parse(control_path) {
        Some(ControlPath {
            kind: ControlKind::Styles,
            key,
        }) => rules.evaluate(values, Some(&key)),
        _ => rules.evaluate_universal(values),
    };

    let visible = allowed && !outcome.hidden;
    ControlState {
        visible,
        disabled: outcome.disabled || !visible,
        warning: outcome.warning,
        reasons: outcome.reasons,
    }
}
