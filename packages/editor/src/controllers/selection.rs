use crate::mutations::MutationError;
use crate::store::DocumentStore;
use atelier_model::{Node, NodeId};

pub struct SelectionController<'a> {
    store: &'a DocumentStore,
}

impl<'a> SelectionController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.store.get_state().ui.selected_id.clone()
    }

    pub fn selected_node(&self) -> Option<Node> {
        self.store.get_state().selected_node().cloned()
    }

    /// Select a node, or clear the selection with `None`. Selecting a
    /// missing node is a no-op.
    pub fn select(&self, id: Option<&str>) -> Result<bool, MutationError> {
        if let Some(id) = id {
            if !self.store.get_state().project.contains_node(id) {
                tracing::debug!(node = id, "selection target missing, skipping");
                return Ok(false);
            }
        }

        let selected_id = id.map(str::to_string);
        self.store.update(|draft| draft.ui.selected_id = selected_id)?;
        Ok(true)
    }

    pub fn clear(&self) -> Result<bool, MutationError> {
        self.select(None)
    }
}
