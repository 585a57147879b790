use crate::node::{Node, NodeId};
use crate::policy::StylePolicy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Named, optionally publishable reusable subtree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fragment {
    pub id: String,
    pub name: String,
    pub root_id: NodeId,
    #[serde(default)]
    pub is_public: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Image,
    Font,
    Video,
    Audio,
    Other,
}

/// Uploaded or linked media referenced by the project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: String,
    pub name: String,
    pub url: String,
    pub kind: AssetKind,
}

/// User-authored stylesheet injected into the preview
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stylesheet {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

/// The persisted document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Every node in the project, page tree and fragments alike
    pub nodes: HashMap<NodeId, Node>,

    pub root_id: NodeId,

    #[serde(default)]
    pub fragments: Vec<Fragment>,

    #[serde(default)]
    pub assets: Vec<Asset>,

    #[serde(default)]
    pub stylesheets: Vec<Stylesheet>,

    #[serde(default)]
    pub global_css: String,

    #[serde(default)]
    pub global_js: String,

    /// Project-level policy layer, keyed by component definition id
    #[serde(default)]
    pub policies: BTreeMap<String, StylePolicy>,
}

impl Project {
    /// Create a project containing only `root`
    pub fn new(root: Node) -> Self {
        let root_id = root.id.clone();
        let mut nodes = HashMap::new();
        nodes.insert(root_id.clone(), root);

        Self {
            nodes,
            root_id,
            fragments: Vec::new(),
            assets: Vec::new(),
            stylesheets: Vec::new(),
            global_css: String::new(),
            global_js: String::new(),
            policies: BTreeMap::new(),
        }
    }

    pub fn node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    pub fn node_mut(&mut self, id: &str) -> Option<&mut Node> {
        self.nodes.get_mut(id)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.get(&self.root_id)
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Id of the node whose children list contains `id`
    pub fn parent_id(&self, id: &str) -> Option<&NodeId> {
        self.nodes
            .values()
            .find(|node| node.children.iter().any(|c| c == id))
            .map(|node| &node.id)
    }

    pub fn fragment(&self, id: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.id == id)
    }

    pub fn fragment_mut(&mut self, id: &str) -> Option<&mut Fragment> {
        self.fragments.iter_mut().find(|f| f.id == id)
    }

    /// Fragment rooted at node `id`, if any
    pub fn fragment_rooted_at(&self, id: &str) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.root_id == id)
    }

    pub fn stylesheet(&self, id: &str) -> Option<&Stylesheet> {
        self.stylesheets.iter().find(|s| s.id == id)
    }

    pub fn asset(&self, id: &str) -> Option<&Asset> {
        self.assets.iter().find(|a| a.id == id)
    }

    /// Whether `id` is taken by any node, fragment, asset or stylesheet
    pub fn contains_id(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
            || self.fragment(id).is_some()
            || self.asset(id).is_some()
            || self.stylesheet(id).is_some()
    }
}
