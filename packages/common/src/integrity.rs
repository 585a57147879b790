//! Tree integrity checks run before a draft is committed.
//!
//! A valid project satisfies:
//! - every node is stored under its own id
//! - the project root and every fragment root exist
//! - every listed child exists and has exactly one parent
//! - roots are never listed as children
//! - every node is reachable from a root (no cycles, no detached nodes)

use crate::error::TreeError;
use crate::result::TreeResult;
use crate::visitor::reachable_nodes;
use atelier_model::Project;
use std::collections::HashMap;

pub fn validate_tree(project: &Project) -> TreeResult<()> {
    // Sorted so the reported violation is stable across runs
    let mut ids: Vec<&String> = project.nodes.keys().collect();
    ids.sort();

    for key in &ids {
        let node = &project.nodes[key.as_str()];
        if &node.id != *key {
            return Err(TreeError::KeyMismatch {
                key: (*key).clone(),
                id: node.id.clone(),
            });
        }
    }

    if !project.contains_node(&project.root_id) {
        return Err(TreeError::MissingRoot(project.root_id.clone()));
    }

    for fragment in &project.fragments {
        if !project.contains_node(&fragment.root_id) {
            return Err(TreeError::DanglingFragment {
                fragment: fragment.id.clone(),
                root: fragment.root_id.clone(),
            });
        }
    }

    let mut parents: HashMap<&str, &str> = HashMap::new();
    for key in &ids {
        let node = &project.nodes[key.as_str()];
        for child in &node.children {
            if !project.contains_node(child) {
                return Err(TreeError::DanglingChild {
                    parent: node.id.clone(),
                    child: child.clone(),
                });
            }
            if let Some(first) = parents.insert(child.as_str(), node.id.as_str()) {
                return Err(TreeError::MultipleParents {
                    child: child.clone(),
                    first: first.to_string(),
                    second: node.id.clone(),
                });
            }
        }
    }

    let roots = std::iter::once(&project.root_id).chain(project.fragments.iter().map(|f| &f.root_id));
    for root in roots {
        if let Some(parent) = parents.get(root.as_str()) {
            return Err(TreeError::RootHasParent {
                root: root.clone(),
                parent: parent.to_string(),
            });
        }
    }

    let reachable = reachable_nodes(project);
    for key in &ids {
        if !reachable.contains(key.as_str()) {
            return Err(if parents.contains_key(key.as_str()) {
                TreeError::Cycle((*key).clone())
            } else {
                TreeError::Orphan((*key).clone())
            });
        }
    }

    Ok(())
}
