use crate::mutations::{Mutation, MutationError};
use crate::store::DocumentStore;
use atelier_common::collect_subtree;
use atelier_model::{Node, NodeId, Project};
use std::collections::HashMap;

pub struct TreeController<'a> {
    store: &'a DocumentStore,
}

impl<'a> TreeController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn root_id(&self) -> NodeId {
        self.store.get_state().project.root_id.clone()
    }

    pub fn node(&self, id: &str) -> Option<Node> {
        self.store.get_state().project.node(id).cloned()
    }

    pub fn children(&self, id: &str) -> Vec<NodeId> {
        self.store
            .get_state()
            .project
            .node(id)
            .map(|node| node.children.clone())
            .unwrap_or_default()
    }

    pub fn parent_of(&self, id: &str) -> Option<NodeId> {
        self.store.get_state().project.parent_id(id).cloned()
    }

    /// Insert a new instance of `component_id` under `parent_id` and select
    /// it. Returns the new id, or `None` if the parent does not exist.
    pub fn insert_component(
        &self,
        parent_id: &str,
        component_id: &str,
        index: Option<usize>,
    ) -> Result<Option<NodeId>, MutationError> {
        let state = self.store.get_state();
        let Some(parent) = state.project.node(parent_id) else {
            tracing::debug!(parent = parent_id, "insert target missing, skipping");
            return Ok(None);
        };
        self.ensure_accepts_children(parent)?;

        let id = self.store.new_id();
        let mut node = Node::new(id.clone(), component_id);
        if let Some(definition) = self.store.registry().definition(component_id) {
            node.props = definition.default_props.clone();
            node.styles = definition.default_styles.clone();
        }

        let mutation = Mutation::InsertNodes {
            parent_id: parent_id.to_string(),
            index,
            root_id: id.clone(),
            nodes: vec![node],
        };
        self.store.transact(mutation.description(), |draft| {
            mutation.apply(&mut draft.project)?;
            draft.ui.selected_id = Some(id.clone());
            Ok(())
        })?;
        Ok(Some(id))
    }

    /// Remove a node and its descendants
    pub fn remove_node(&self, id: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::RemoveNode {
            node_id: id.to_string(),
        })
    }

    /// Move a node under a new parent. Moving into the node's own subtree or
    /// into a missing parent is an error.
    pub fn move_node(
        &self,
        id: &str,
        new_parent_id: &str,
        index: Option<usize>,
    ) -> Result<bool, MutationError> {
        let state = self.store.get_state();
        if let Some(parent) = state.project.node(new_parent_id) {
            self.ensure_accepts_children(parent)?;
        }

        self.store.apply(Mutation::MoveNode {
            node_id: id.to_string(),
            new_parent_id: new_parent_id.to_string(),
            index,
        })
    }

    /// Deep copy of a node placed right after it, with fresh ids. Roots
    /// cannot be cloned.
    pub fn clone_node(&self, id: &str) -> Result<Option<NodeId>, MutationError> {
        let state = self.store.get_state();
        let Some(parent_id) = state.project.parent_id(id).cloned() else {
            tracing::debug!(node = id, "clone target missing or a root, skipping");
            return Ok(None);
        };
        let index = state
            .project
            .node(&parent_id)
            .and_then(|parent| parent.child_index(id))
            .map(|index| index + 1);

        let (root_id, nodes) = copy_subtree(&state.project, id, |_| self.store.new_id());
        let mutation = Mutation::InsertNodes {
            parent_id,
            index,
            root_id: root_id.clone(),
            nodes,
        };
        self.store.transact("Duplicate node", |draft| {
            mutation.apply(&mut draft.project)?;
            draft.ui.selected_id = Some(root_id.clone());
            Ok(())
        })?;
        Ok(Some(root_id))
    }

    fn ensure_accepts_children(&self, parent: &Node) -> Result<(), MutationError> {
        match self.store.registry().definition(&parent.component_id) {
            Some(definition) if !definition.accepts_children => {
                Err(MutationError::InvalidStructure(format!(
                    "{} ({}) cannot have children",
                    parent.id, parent.component_id
                )))
            }
            _ => Ok(()),
        }
    }
}

/// Copy the subtree at `root_id`, renaming every node with `new_id`.
/// Returns the new root id and the copied nodes, root first.
pub(crate) fn copy_subtree(
    project: &Project,
    root_id: &str,
    mut new_id: impl FnMut(&str) -> NodeId,
) -> (NodeId, Vec<Node>) {
    let ids = collect_subtree(project, root_id);
    let renamed: HashMap<&str, NodeId> = ids
        .iter()
        .map(|old| (old.as_str(), new_id(old)))
        .collect();

    let nodes = ids
        .iter()
        .filter_map(|old| project.node(old))
        .map(|node| {
            let mut copy = node.clone();
            copy.id = renamed[node.id.as_str()].clone();
            copy.children = node
                .children
                .iter()
                .filter_map(|child| renamed.get(child.as_str()).cloned())
                .collect();
            copy
        })
        .collect();

    let root = renamed
        .get(root_id)
        .cloned()
        .unwrap_or_else(|| root_id.to_string());
    (root, nodes)
}
