//! # Project Mutations
//!
//! Semantic operations on the project tree. The document store applies them
//! to a draft, so a failing mutation never leaves a partial change behind.
//!
//! ## Mutation Semantics
//!
//! ### Missing targets
//! - `targets_exist` reports whether the entities a mutation edits exist
//! - The store treats a missing target as a no-op and never calls `apply`
//! - Calling `apply` directly on a missing target is an error
//!
//! ### Insert
//! - Attaches a prepared subtree under a parent at an index (clamped)
//! - Fails on any id that is already taken
//!
//! ### Move
//! - Detaches the node, then inserts it at `index` of the new parent's
//!   children as they are after the detach
//! - Fails if the new parent is the node itself or one of its descendants
//! - Roots (project root, fragment roots) cannot move
//!
//! ### Remove
//! - Removes the node and all descendants
//! - Fragments rooted inside the removed subtree are dropped by post-effects

use atelier_common::{collect_subtree, is_in_subtree, TreeError};
use atelier_model::{Asset, Fragment, Node, NodeId, Project, StylePolicy, Stylesheet};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Mutation {
    /// Attach `nodes` (the subtree rooted at `root_id`) under `parent_id`
    InsertNodes {
        parent_id: NodeId,
        index: Option<usize>,
        root_id: NodeId,
        nodes: Vec<Node>,
    },

    RemoveNode {
        node_id: NodeId,
    },

    MoveNode {
        node_id: NodeId,
        new_parent_id: NodeId,
        index: Option<usize>,
    },

    SetStyle {
        node_id: NodeId,
        property: String,
        value: String,
    },

    RemoveStyle {
        node_id: NodeId,
        property: String,
    },

    SetProp {
        node_id: NodeId,
        name: String,
        value: serde_json::Value,
    },

    RemoveProp {
        node_id: NodeId,
        name: String,
    },

    /// Register a fragment together with the detached subtree it roots
    CreateFragment {
        fragment: Fragment,
        nodes: Vec<Node>,
    },

    RemoveFragment {
        fragment_id: String,
    },

    SetFragmentPublic {
        fragment_id: String,
        is_public: bool,
    },

    RenameFragment {
        fragment_id: String,
        name: String,
    },

    AddStylesheet {
        stylesheet: Stylesheet,
    },

    /// Fields left `None` keep their current value
    UpdateStylesheet {
        stylesheet_id: String,
        name: Option<String>,
        content: Option<String>,
        enabled: Option<bool>,
    },

    RemoveStylesheet {
        stylesheet_id: String,
    },

    SetGlobalCss {
        css: String,
    },

    SetGlobalJs {
        js: String,
    },

    AddAsset {
        asset: Asset,
    },

    RemoveAsset {
        asset_id: String,
    },

    /// Set or clear the project-level policy for a component definition
    SetPolicy {
        component_id: String,
        policy: Option<StylePolicy>,
    },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Parent not found: {0}")]
    ParentNotFound(String),

    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    #[error("Would create cycle")]
    CycleDetected,

    #[error("Id already in use: {0}")]
    DuplicateId(String),

    #[error("Invalid structure: {0}")]
    InvalidStructure(String),

    #[error("Cannot start a transaction inside another transaction")]
    NestedTransaction,

    #[error("Transaction rejected: {0}")]
    Rejected(String),

    #[error("Tree integrity violated: {0}")]
    Integrity(#[from] TreeError),
}

impl Mutation {
    /// Short label used for undo history
    pub fn description(&self) -> &'static str {
        match self {
            Mutation::InsertNodes { .. } => "Insert component",
            Mutation::RemoveNode { .. } => "Remove node",
            Mutation::MoveNode { .. } => "Move node",
            Mutation::SetStyle { .. } => "Set style",
            Mutation::RemoveStyle { .. } => "Remove style",
            Mutation::SetProp { .. } => "Set property",
            Mutation::RemoveProp { .. } => "Remove property",
            Mutation::CreateFragment { .. } => "Create fragment",
            Mutation::RemoveFragment { .. } => "Remove fragment",
            Mutation::SetFragmentPublic { .. } => "Change fragment visibility",
            Mutation::RenameFragment { .. } => "Rename fragment",
            Mutation::AddStylesheet { .. } => "Add stylesheet",
            Mutation::UpdateStylesheet { .. } => "Edit stylesheet",
            Mutation::RemoveStylesheet { .. } => "Remove stylesheet",
            Mutation::SetGlobalCss { .. } => "Edit global CSS",
            Mutation::SetGlobalJs { .. } => "Edit global JS",
            Mutation::AddAsset { .. } => "Add asset",
            Mutation::RemoveAsset { .. } => "Remove asset",
            Mutation::SetPolicy { .. } => "Change style policy",
        }
    }

    /// Whether every entity this mutation edits exists
    pub fn targets_exist(&self, project: &Project) -> bool {
        match self {
            Mutation::InsertNodes { parent_id, .. } => project.contains_node(parent_id),

            Mutation::RemoveNode { node_id }
            | Mutation::SetStyle { node_id, .. }
            | Mutation::RemoveStyle { node_id, .. }
            | Mutation::SetProp { node_id, .. }
            | Mutation::RemoveProp { node_id, .. } => project.contains_node(node_id),

            // A missing new parent is an error, not a no-op
            Mutation::MoveNode { node_id, .. } => project.contains_node(node_id),

            Mutation::RemoveFragment { fragment_id }
            | Mutation::SetFragmentPublic { fragment_id, .. }
            | Mutation::RenameFragment { fragment_id, .. } => {
                project.fragment(fragment_id).is_some()
            }

            Mutation::UpdateStylesheet { stylesheet_id, .. }
            | Mutation::RemoveStylesheet { stylesheet_id } => {
                project.stylesheet(stylesheet_id).is_some()
            }

            Mutation::RemoveAsset { asset_id } => project.asset(asset_id).is_some(),

            Mutation::CreateFragment { .. }
            | Mutation::AddStylesheet { .. }
            | Mutation::SetGlobalCss { .. }
            | Mutation::SetGlobalJs { .. }
            | Mutation::AddAsset { .. }
            | Mutation::SetPolicy { .. } => true,
        }
    }

    /// Validate without applying
    pub fn validate(&self, project: &Project) -> Result<(), MutationError> {
        match self {
            Mutation::InsertNodes {
                parent_id,
                root_id,
                nodes,
                ..
            } => {
                if !project.contains_node(parent_id) {
                    return Err(MutationError::ParentNotFound(parent_id.clone()));
                }
                validate_new_subtree(project, root_id, nodes)
            }

            Mutation::RemoveNode { node_id } => {
                require_node(project, node_id)?;
                if *node_id == project.root_id {
                    return Err(MutationError::InvalidStructure(
                        "Cannot remove the project root".to_string(),
                    ));
                }
                Ok(())
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                ..
            } => {
                require_node(project, node_id)?;
                if !project.contains_node(new_parent_id) {
                    return Err(MutationError::ParentNotFound(new_parent_id.clone()));
                }
                if *node_id == project.root_id || project.fragment_rooted_at(node_id).is_some() {
                    return Err(MutationError::InvalidStructure(format!(
                        "Root node {} cannot be moved",
                        node_id
                    )));
                }
                if is_in_subtree(project, node_id, new_parent_id) {
                    return Err(MutationError::CycleDetected);
                }
                Ok(())
            }

            Mutation::SetStyle { node_id, .. }
            | Mutation::RemoveStyle { node_id, .. }
            | Mutation::SetProp { node_id, .. }
            | Mutation::RemoveProp { node_id, .. } => require_node(project, node_id),

            Mutation::CreateFragment { fragment, nodes } => {
                if project.contains_id(&fragment.id) {
                    return Err(MutationError::DuplicateId(fragment.id.clone()));
                }
                validate_new_subtree(project, &fragment.root_id, nodes)
            }

            Mutation::RemoveFragment { fragment_id }
            | Mutation::SetFragmentPublic { fragment_id, .. }
            | Mutation::RenameFragment { fragment_id, .. } => {
                require(project.fragment(fragment_id).is_some(), "Fragment", fragment_id)
            }

            Mutation::AddStylesheet { stylesheet } => require_free_id(project, &stylesheet.id),

            Mutation::UpdateStylesheet { stylesheet_id, .. }
            | Mutation::RemoveStylesheet { stylesheet_id } => require(
                project.stylesheet(stylesheet_id).is_some(),
                "Stylesheet",
                stylesheet_id,
            ),

            Mutation::AddAsset { asset } => require_free_id(project, &asset.id),

            Mutation::RemoveAsset { asset_id } => {
                require(project.asset(asset_id).is_some(), "Asset", asset_id)
            }

            Mutation::SetGlobalCss { .. }
            | Mutation::SetGlobalJs { .. }
            | Mutation::SetPolicy { .. } => Ok(()),
        }
    }

    /// Apply mutation to the project with validation
    pub fn apply(&self, project: &mut Project) -> Result<(), MutationError> {
        self.validate(project)?;

        match self {
            Mutation::InsertNodes {
                parent_id,
                index,
                root_id,
                nodes,
            } => {
                for node in nodes {
                    project.nodes.insert(node.id.clone(), node.clone());
                }
                let parent = node_mut(project, parent_id)?;
                insert_child(&mut parent.children, root_id.clone(), *index);
                Ok(())
            }

            Mutation::RemoveNode { node_id } => {
                detach(project, node_id);
                for id in collect_subtree(project, node_id) {
                    project.nodes.remove(&id);
                }
                Ok(())
            }

            Mutation::MoveNode {
                node_id,
                new_parent_id,
                index,
            } => {
                detach(project, node_id);
                let parent = node_mut(project, new_parent_id)?;
                insert_child(&mut parent.children, node_id.clone(), *index);
                Ok(())
            }

            Mutation::SetStyle {
                node_id,
                property,
                value,
            } => {
                node_mut(project, node_id)?
                    .styles
                    .insert(property.clone(), value.clone());
                Ok(())
            }

            Mutation::RemoveStyle { node_id, property } => {
                node_mut(project, node_id)?.styles.remove(property);
                Ok(())
            }

            Mutation::SetProp {
                node_id,
                name,
                value,
            } => {
                node_mut(project, node_id)?
                    .props
                    .insert(name.clone(), value.clone());
                Ok(())
            }

            Mutation::RemoveProp { node_id, name } => {
                node_mut(project, node_id)?.props.remove(name);
                Ok(())
            }

            Mutation::CreateFragment { fragment, nodes } => {
                for node in nodes {
                    project.nodes.insert(node.id.clone(), node.clone());
                }
                project.fragments.push(fragment.clone());
                Ok(())
            }

            Mutation::RemoveFragment { fragment_id } => {
                let root_id = fragment(project, fragment_id)?.root_id.clone();
                for id in collect_subtree(project, &root_id) {
                    project.nodes.remove(&id);
                }
                project.fragments.retain(|f| f.id != *fragment_id);
                Ok(())
            }

            Mutation::SetFragmentPublic {
                fragment_id,
                is_public,
            } => {
                fragment(project, fragment_id)?.is_public = *is_public;
                Ok(())
            }

            Mutation::RenameFragment { fragment_id, name } => {
                fragment(project, fragment_id)?.name = name.clone();
                Ok(())
            }

            Mutation::AddStylesheet { stylesheet } => {
                project.stylesheets.push(stylesheet.clone());
                Ok(())
            }

            Mutation::UpdateStylesheet {
                stylesheet_id,
                name,
                content,
                enabled,
            } => {
                let sheet = project
                    .stylesheets
                    .iter_mut()
                    .find(|s| s.id == *stylesheet_id)
                    .ok_or_else(|| not_found("Stylesheet", stylesheet_id))?;
                if let Some(name) = name {
                    sheet.name = name.clone();
                }
                if let Some(content) = content {
                    sheet.content = content.clone();
                }
                if let Some(enabled) = enabled {
                    sheet.enabled = *enabled;
                }
                Ok(())
            }

            Mutation::RemoveStylesheet { stylesheet_id } => {
                project.stylesheets.retain(|s| s.id != *stylesheet_id);
                Ok(())
            }

            Mutation::SetGlobalCss { css } => {
                project.global_css = css.clone();
                Ok(())
            }

            Mutation::SetGlobalJs { js } => {
                project.global_js = js.clone();
                Ok(())
            }

            Mutation::AddAsset { asset } => {
                project.assets.push(asset.clone());
                Ok(())
            }

            Mutation::RemoveAsset { asset_id } => {
                project.assets.retain(|a| a.id != *asset_id);
                Ok(())
            }

            Mutation::SetPolicy {
                component_id,
                policy,
            } => {
                match policy {
                    Some(policy) => {
                        project.policies.insert(component_id.clone(), policy.clone());
                    }
                    None => {
                        project.policies.remove(component_id);
                    }
                }
                Ok(())
            }
        }
    }
}

fn not_found(kind: &'static str, id: &str) -> MutationError {
    MutationError::NotFound {
        kind,
        id: id.to_string(),
    }
}

fn require(exists: bool, kind: &'static str, id: &str) -> Result<(), MutationError> {
    if exists {
        Ok(())
    } else {
        Err(not_found(kind, id))
    }
}

fn require_node(project: &Project, id: &str) -> Result<(), MutationError> {
    if project.contains_node(id) {
        Ok(())
    } else {
        Err(MutationError::NodeNotFound(id.to_string()))
    }
}

fn require_free_id(project: &Project, id: &str) -> Result<(), MutationError> {
    if project.contains_id(id) {
        Err(MutationError::DuplicateId(id.to_string()))
    } else {
        Ok(())
    }
}

/// New nodes must use fresh, distinct ids and include their root
fn validate_new_subtree(project: &Project, root_id: &str, nodes: &[Node]) -> Result<(), MutationError> {
    let mut seen = HashSet::new();
    for node in nodes {
        if project.contains_id(&node.id) || !seen.insert(node.id.as_str()) {
            return Err(MutationError::DuplicateId(node.id.clone()));
        }
    }
    if !seen.contains(root_id) {
        return Err(MutationError::InvalidStructure(format!(
            "Subtree root {} is not among the inserted nodes",
            root_id
        )));
    }
    Ok(())
}

fn node_mut<'a>(project: &'a mut Project, id: &str) -> Result<&'a mut Node, MutationError> {
    project
        .node_mut(id)
        .ok_or_else(|| MutationError::NodeNotFound(id.to_string()))
}

fn fragment<'a>(project: &'a mut Project, id: &str) -> Result<&'a mut Fragment, MutationError> {
    project
        .fragment_mut(id)
        .ok_or_else(|| not_found("Fragment", id))
}

/// Remove `node_id` from its parent's children list, if it has a parent
fn detach(project: &mut Project, node_id: &str) {
    let Some(parent_id) = project.parent_id(node_id).cloned() else {
        return;
    };
    if let Some(parent) = project.node_mut(&parent_id) {
        parent.children.retain(|child| child != node_id);
    }
}

fn insert_child(children: &mut Vec<NodeId>, child: NodeId, index: Option<usize>) {
    let index = index.map_or(children.len(), |index| index.min(children.len()));
    children.insert(index, child);
}
