use serde::Serialize;
use thiserror::Error;

/// Structural problems found in a project tree
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TreeError {
    #[error("Root node not found: {0}")]
    MissingRoot(String),

    #[error("Node stored under key {key} has id {id}")]
    KeyMismatch { key: String, id: String },

    #[error("Node {parent} lists missing child {child}")]
    DanglingChild { parent: String, child: String },

    #[error("Fragment {fragment} points at missing root {root}")]
    DanglingFragment { fragment: String, root: String },

    #[error("Node {child} is listed by both {first} and {second}")]
    MultipleParents {
        child: String,
        first: String,
        second: String,
    },

    #[error("Root {root} is listed as a child of {parent}")]
    RootHasParent { root: String, parent: String },

    #[error("Cycle detected at node {0}")]
    Cycle(String),

    #[error("Node {0} is detached from every root")]
    Orphan(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_for_error_reports() {
        let json = serde_json::to_value(TreeError::DanglingChild {
            parent: "root".into(),
            child: "ghost".into(),
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "DanglingChild": { "parent": "root", "child": "ghost" } })
        );

        let json = serde_json::to_value(TreeError::Orphan("loose".into())).unwrap();
        assert_eq!(json, serde_json::json!({ "Orphan": "loose" }));
    }
}
