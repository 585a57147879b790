use atelier_model::{Fragment, Node, NodeId, Project};
use std::collections::HashSet;

/// Visitor pattern for traversing the project tree immutably
///
/// Children are resolved through `Project::nodes`; ids that do not resolve
/// are skipped. Walks keep an explicit stack, so tree depth is bounded by
/// memory rather than by the call stack.
pub trait Visitor {
    /// Called once per node reached, pre-order. Return `false` to skip the
    /// node's children.
    fn enter_node(&mut self, project: &Project, node: &Node) -> bool;
}

/// Walk the page tree, then every fragment, in declaration order
pub fn walk_project<V: Visitor>(visitor: &mut V, project: &Project) {
    walk_subtree(visitor, project, &project.root_id);
    for fragment in &project.fragments {
        walk_fragment(visitor, project, fragment);
    }
}

pub fn walk_fragment<V: Visitor>(visitor: &mut V, project: &Project, fragment: &Fragment) {
    walk_subtree(visitor, project, &fragment.root_id);
}

/// Pre-order walk from `root_id`. Does nothing if the root does not exist.
pub fn walk_subtree<V: Visitor>(visitor: &mut V, project: &Project, root_id: &str) {
    let mut stack: Vec<&Node> = project.node(root_id).into_iter().collect();

    while let Some(node) = stack.pop() {
        if !visitor.enter_node(project, node) {
            continue;
        }
        // Reversed so the first child is popped first
        stack.extend(
            node.children
                .iter()
                .rev()
                .filter_map(|child_id| project.node(child_id)),
        );
    }
}

/// Pre-order id collector. Each node is entered once, so malformed trees
/// cannot make it loop.
#[derive(Debug, Default)]
struct SubtreeCollector {
    ids: Vec<NodeId>,
    seen: HashSet<NodeId>,
}

impl Visitor for SubtreeCollector {
    fn enter_node(&mut self, _project: &Project, node: &Node) -> bool {
        if !self.seen.insert(node.id.clone()) {
            return false;
        }
        self.ids.push(node.id.clone());
        true
    }
}

/// Ids of `root_id` and all of its descendants, pre-order.
/// Empty if `root_id` does not exist.
pub fn collect_subtree(project: &Project, root_id: &str) -> Vec<NodeId> {
    let mut collector = SubtreeCollector::default();
    walk_subtree(&mut collector, project, root_id);
    collector.ids
}

/// Whether `candidate` is `ancestor` itself or one of its descendants
pub fn is_in_subtree(project: &Project, ancestor: &str, candidate: &str) -> bool {
    collect_subtree(project, ancestor)
        .iter()
        .any(|id| id == candidate)
}

/// Every node reachable from the project root or a fragment root
pub fn reachable_nodes(project: &Project) -> HashSet<NodeId> {
    let mut collector = SubtreeCollector::default();
    walk_project(&mut collector, project);
    collector.seen
}
