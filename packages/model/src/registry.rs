use crate::node::{PropMap, StyleMap};
use crate::policy::StylePolicy;
use serde::{Deserialize, Serialize};

/// Externally registered component type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub id: String,

    #[serde(default)]
    pub label: String,

    /// Palette section, e.g. "Layout" or "Media"
    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub default_props: PropMap,

    #[serde(default)]
    pub default_styles: StyleMap,

    #[serde(default = "default_accepts_children")]
    pub accepts_children: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<StylePolicy>,
}

fn default_accepts_children() -> bool {
    true
}

impl ComponentDefinition {
    pub fn new(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            label: id.clone(),
            id,
            category: String::new(),
            default_props: PropMap::new(),
            default_styles: StyleMap::new(),
            accepts_children: true,
            policy: None,
        }
    }

    pub fn with_default_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_styles.insert(property.into(), value.into());
        self
    }

    pub fn with_default_prop(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.default_props.insert(name.into(), value);
        self
    }

    pub fn with_policy(mut self, policy: StylePolicy) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn leaf(mut self) -> Self {
        self.accepts_children = false;
        self
    }
}

/// Source of component definitions
pub trait ComponentRegistry {
    /// All definitions in palette order
    fn list_definitions(&self) -> Vec<&ComponentDefinition>;

    fn definition(&self, id: &str) -> Option<&ComponentDefinition> {
        self.list_definitions().into_iter().find(|d| d.id == id)
    }
}

/// Registry backed by an ordered list
#[derive(Debug, Clone, Default)]
pub struct StaticRegistry {
    definitions: Vec<ComponentDefinition>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: Vec<ComponentDefinition>) -> Self {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Add a definition, replacing any previous one with the same id in place
    pub fn register(&mut self, definition: ComponentDefinition) {
        match self.definitions.iter_mut().find(|d| d.id == definition.id) {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl ComponentRegistry for StaticRegistry {
    fn list_definitions(&self) -> Vec<&ComponentDefinition> {
        self.definitions.iter().collect()
    }

    fn definition(&self, id: &str) -> Option<&ComponentDefinition> {
        self.definitions.iter().find(|d| d.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_preserves_order_and_replaces_in_place() {
        let mut registry = StaticRegistry::new();
        registry.register(ComponentDefinition::new("box"));
        registry.register(ComponentDefinition::new("text").leaf());
        registry.register(ComponentDefinition::new("box").with_default_style("display", "flex"));

        let ids: Vec<_> = registry.list_definitions().iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["box", "text"]);

        let boxed = registry.definition("box").unwrap();
        assert_eq!(boxed.default_styles.get("display").map(String::as_str), Some("flex"));
        assert!(!registry.definition("text").unwrap().accepts_children);
    }
}
