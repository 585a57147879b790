//! # Atelier Policy
//!
//! Decides which style and property controls a node exposes.
//!
//! Two independent layers feed the inspector:
//!
//! 1. **Style policy** (`resolver`): per component and per editor mode,
//!    which controls are visible at all. Deny lists always win.
//! 2. **Dependency rules** (`rules`): given the node's current style values,
//!    which visible controls are disabled, hidden or carry a warning.
//!
//! `inspect_control` combines both for one control path.

mod catalog;
mod inspect;
mod resolver;
mod rules;

pub use catalog::{group, group_of, ControlKind, ControlPath, StyleGroup, PROPS_GROUP, STYLE_GROUPS};
pub use inspect::{inspect_control, ControlState};
pub use resolver::{
    compute_effective_policy, get_control_visibility, get_group_visibility, policy_mode,
    resolve_layers, EffectivePolicy, Visibility,
};
pub use rules::{evaluate, evaluate_universal, Condition, DepRule, Effect, RuleOutcome, RuleRegistry};
pub use rules::{
    background_image_details, border_style_none, display_none_notice, flex_container_props,
    gap_requires_container, grid_container_props, inline_disallow_sizing, inline_vertical_margin,
    static_position_offsets, INLINE_SIZING_WARNING,
};
