mod condition;
mod container;
mod decoration;
mod inline;
mod notice;
mod position;

pub use condition::Condition;
pub use container::{flex_container_props, gap_requires_container, grid_container_props};
pub use decoration::{background_image_details, border_style_none};
pub use inline::{inline_disallow_sizing, inline_vertical_margin, INLINE_SIZING_WARNING};
pub use notice::display_none_notice;
pub use position::static_position_offsets;

use atelier_model::StyleMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// What a matching rule does to a control
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Effect {
    /// `false` re-enables a control disabled by a lower-priority rule
    Disable(bool),
    Hide(bool),
    Warn(String),
}

/// Dependency rule: when `when` holds, apply `effects` to `target_keys`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DepRule {
    pub id: String,

    /// Controls this rule governs. `None` applies to every control.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_keys: Option<Vec<String>>,

    pub when: Condition,

    pub effects: Vec<Effect>,

    /// Diagnostic explanation recorded on the outcome
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Applied in ascending order; the highest priority is applied last
    #[serde(default)]
    pub priority: i32,
}

impl DepRule {
    pub fn new(id: impl Into<String>, when: Condition) -> Self {
        Self {
            id: id.into(),
            target_keys: None,
            when,
            effects: Vec::new(),
            reason: None,
            priority: 0,
        }
    }

    pub fn targets<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.target_keys = Some(keys.into_iter().map(Into::into).collect());
        self
    }

    pub fn effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    pub fn reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    /// Target filter: universal rules and key-less queries always pass
    pub fn applies_to(&self, target_key: Option<&str>) -> bool {
        match (&self.target_keys, target_key) {
            (None, _) | (_, None) => true,
            (Some(keys), Some(key)) => keys.iter().any(|k| k == key),
        }
    }

    pub fn is_universal(&self) -> bool {
        self.target_keys.is_none()
    }
}

/// Folded result of every matching rule for one control
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RuleOutcome {
    pub disabled: bool,
    pub hidden: bool,

    /// Message to display: the last warning applied
    pub warning: Option<String>,

    /// Every warning in application order
    pub warnings: Vec<String>,

    pub reasons: Vec<String>,
}

impl RuleOutcome {
    fn apply(&mut self, rule: &DepRule) {
        for effect in &rule.effects {
            match effect {
                Effect::Disable(disabled) => self.disabled = *disabled,
                Effect::Hide(hidden) => self.hidden = *hidden,
                Effect::Warn(message) => {
                    self.warnings.push(message.clone());
                    self.warning = Some(message.clone());
                }
            }
        }
        if let Some(reason) = &rule.reason {
            self.reasons.push(reason.clone());
        }
    }
}

/// Evaluate `rules` against `values` for one control
///
/// Matching rules are applied in ascending priority; equal priorities keep
/// their input order. Hidden controls are always reported disabled.
pub fn evaluate(values: &StyleMap, rules: &[DepRule], target_key: Option<&str>) -> RuleOutcome {
    fold(values, rules.iter().filter(|rule| rule.applies_to(target_key)))
}

/// Evaluate only the rules without target keys
pub fn evaluate_universal(values: &StyleMap, rules: &[DepRule]) -> RuleOutcome {
    fold(values, rules.iter().filter(|rule| rule.is_universal()))
}

fn fold<'a>(values: &StyleMap, candidates: impl Iterator<Item = &'a DepRule>) -> RuleOutcome {
    let mut matching: Vec<&DepRule> = candidates.filter(|rule| rule.when.matches(values)).collect();

    if matching.is_empty() {
        return RuleOutcome::default();
    }

    // Stable, so ties keep declaration order
    matching.sort_by_key(|rule| rule.priority);

    let mut outcome = RuleOutcome::default();
    for rule in matching {
        outcome.apply(rule);
    }
    if outcome.hidden {
        outcome.disabled = true;
    }
    outcome
}

/// Ordered set of dependency rules
#[derive(Clone)]
pub struct RuleRegistry {
    rules: Vec<DepRule>,
}

impl RuleRegistry {
    /// Create a registry with all built-in rules
    pub fn new() -> Self {
        Self {
            rules: vec![
                inline_disallow_sizing(),
                inline_vertical_margin(),
                static_position_offsets(),
                flex_container_props(),
                grid_container_props(),
                gap_requires_container(),
                background_image_details(),
                border_style_none(),
                display_none_notice(),
            ],
        }
    }

    /// Create an empty registry
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn rules(&self) -> &[DepRule] {
        &self.rules
    }

    /// Add a rule, replacing any existing rule with the same id
    pub fn add_rule(&mut self, rule: DepRule) {
        match self.rules.iter_mut().find(|r| r.id == rule.id) {
            Some(existing) => *existing = rule,
            None => self.rules.push(rule),
        }
    }

    /// Drop the rule with `id`; returns whether one was removed
    pub fn remove_rule(&mut self, id: &str) -> bool {
        let before = self.rules.len();
        self.rules.retain(|rule| rule.id != id);
        self.rules.len() != before
    }

    pub fn rule(&self, id: &str) -> Option<&DepRule> {
        self.rules.iter().find(|rule| rule.id == id)
    }

    /// Rules in application order
    pub fn ordered(&self) -> Vec<&DepRule> {
        let mut ordered: Vec<&DepRule> = self.rules.iter().collect();
        ordered.sort_by_key(|rule| rule.priority);
        ordered
    }

    pub fn evaluate(&self, values: &StyleMap, target_key: Option<&str>) -> RuleOutcome {
        evaluate(values, &self.rules, target_key)
    }

    /// Outcome for a control no targeted rule can name, such as a prop
    pub fn evaluate_universal(&self, values: &StyleMap) -> RuleOutcome {
        evaluate_universal(values, &self.rules)
    }

    /// Outcome per key, omitting keys no rule touches
    pub fn evaluate_keys<'a, I>(&self, values: &StyleMap, keys: I) -> BTreeMap<String, RuleOutcome>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .filter_map(|key| {
                let outcome = self.evaluate(values, Some(key));
                (outcome != RuleOutcome::default()).then(|| (key.to_string(), outcome))
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &format!("{} rules", self.rules.len()))
            .finish()
    }
}
