use crate::errors::EditorError;
use atelier_model::PanelLayout;
use atelier_policy::{DepRule, RuleRegistry};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CONFIG_NAME: &str = "atelier.config.json";
pub const DEFAULT_HISTORY_LIMIT: usize = 100;
pub const DEFAULT_ID_PREFIX: &str = "node";

/// Editor configuration file format
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorConfig {
    /// Undo depth (0 = unlimited)
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Run tree integrity checks before every commit
    #[serde(default = "default_true")]
    pub validate_on_commit: bool,

    /// Initial `ui.expertMode`
    #[serde(default)]
    pub expert_mode: bool,

    /// Prefix for generated node ids
    #[serde(default = "default_id_prefix")]
    pub id_prefix: String,

    /// Built-in dependency rules to switch off, by id
    #[serde(default)]
    pub disabled_rules: Vec<String>,

    /// Rules added on top of the built-in set
    #[serde(default)]
    pub extra_rules: Vec<DepRule>,

    /// Initial panel layout
    #[serde(default)]
    pub panels: PanelLayout,
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

fn default_true() -> bool {
    true
}

fn default_id_prefix() -> String {
    DEFAULT_ID_PREFIX.to_string()
}

impl EditorConfig {
    /// Load config from a directory, falling back to defaults if there is
    /// no config file
    pub fn load(dir: impl AsRef<Path>) -> Result<Self, EditorError> {
        let config_path = dir.as_ref().join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: EditorConfig = serde_json::from_str(&content)?;
            tracing::debug!(path = %config_path.display(), "loaded editor config");
            Ok(config)
        } else {
            Ok(EditorConfig::default())
        }
    }

    /// Built-in rules minus `disabledRules`, plus `extraRules`
    pub fn rule_registry(&self) -> RuleRegistry {
        let mut registry = RuleRegistry::new();
        for id in &self.disabled_rules {
            if !registry.remove_rule(id) {
                tracing::warn!(rule = %id, "disabled rule does not exist");
            }
        }
        for rule in &self.extra_rules {
            registry.add_rule(rule.clone());
        }
        registry
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
            validate_on_commit: true,
            expert_mode: false,
            id_prefix: default_id_prefix(),
            disabled_rules: vec![],
            extra_rules: vec![],
            panels: PanelLayout::default(),
        }
    }
}
