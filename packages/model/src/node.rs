use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Opaque node identifier, unique within `Project::nodes`
pub type NodeId = String;

/// CSS-like property name → value
pub type StyleMap = BTreeMap<String, String>;

/// Component property name → arbitrary value
pub type PropMap = BTreeMap<String, serde_json::Value>;

/// One element of the edited component tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,

    /// Component definition this node instantiates (not owned)
    pub component_id: String,

    #[serde(default)]
    pub props: PropMap,

    #[serde(default)]
    pub styles: StyleMap,

    /// Ordered child ids. A child appears in exactly one parent's list.
    #[serde(default)]
    pub children: Vec<NodeId>,
}

impl Node {
    pub fn new(id: impl Into<NodeId>, component_id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            component_id: component_id.into(),
            props: PropMap::new(),
            styles: StyleMap::new(),
            children: Vec::new(),
        }
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.props.insert(name.into(), value);
        self
    }

    pub fn with_children<I, S>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<NodeId>,
    {
        self.children = children.into_iter().map(Into::into).collect();
        self
    }

    /// Position of `child` in this node's children
    pub fn child_index(&self, child: &str) -> Option<usize> {
        self.children.iter().position(|c| c == child)
    }
}
