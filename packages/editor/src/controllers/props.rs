use crate::mutations::{Mutation, MutationError};
use crate::store::DocumentStore;
use atelier_model::PropMap;
use serde_json::Value;

pub struct PropsController<'a> {
    store: &'a DocumentStore,
}

impl<'a> PropsController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn props(&self, id: &str) -> Option<PropMap> {
        self.store
            .get_state()
            .project
            .node(id)
            .map(|node| node.props.clone())
    }

    pub fn prop(&self, id: &str, name: &str) -> Option<Value> {
        self.store
            .get_state()
            .project
            .node(id)
            .and_then(|node| node.props.get(name).cloned())
    }

    pub fn set_prop(&self, id: &str, name: &str, value: Value) -> Result<bool, MutationError> {
        self.store.apply(Mutation::SetProp {
            node_id: id.to_string(),
            name: name.to_string(),
            value,
        })
    }

    pub fn remove_prop(&self, id: &str, name: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::RemoveProp {
            node_id: id.to_string(),
            name: name.to_string(),
        })
    }
}
