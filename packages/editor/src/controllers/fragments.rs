use super::tree::copy_subtree;
use crate::mutations::{Mutation, MutationError};
use crate::store::DocumentStore;
use atelier_model::{EditorMode, Fragment};

pub struct FragmentController<'a> {
    store: &'a DocumentStore,
}

impl<'a> FragmentController<'a> {
    pub(crate) fn new(store: &'a DocumentStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> Vec<Fragment> {
        self.store.get_state().project.fragments.clone()
    }

    pub fn public_fragments(&self) -> Vec<Fragment> {
        self.store
            .get_state()
            .project
            .fragments
            .iter()
            .filter(|f| f.is_public)
            .cloned()
            .collect()
    }

    pub fn fragment(&self, id: &str) -> Option<Fragment> {
        self.store.get_state().project.fragment(id).cloned()
    }

    pub fn editing(&self) -> Option<String> {
        self.store.get_state().ui.editing_fragment_id.clone()
    }

    /// Save a copy of the subtree at `root_id` as a new private fragment.
    /// The source subtree is left in place.
    pub fn create_fragment(&self, name: &str, root_id: &str) -> Result<Option<String>, MutationError> {
        let state = self.store.get_state();
        if !state.project.contains_node(root_id) {
            tracing::debug!(node = root_id, "fragment source missing, skipping");
            return Ok(None);
        }

        let (copy_root, nodes) = copy_subtree(&state.project, root_id, |_| self.store.new_id());
        let fragment = Fragment {
            id: self.store.new_id_with_prefix("fragment"),
            name: name.to_string(),
            root_id: copy_root,
            is_public: false,
        };
        let id = fragment.id.clone();

        self.store.apply(Mutation::CreateFragment { fragment, nodes })?;
        Ok(Some(id))
    }

    /// Remove a fragment and its subtree. Leaves component editing if the
    /// fragment was being edited.
    pub fn remove_fragment(&self, id: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::RemoveFragment {
            fragment_id: id.to_string(),
        })
    }

    pub fn set_public(&self, id: &str, is_public: bool) -> Result<bool, MutationError> {
        self.store.apply(Mutation::SetFragmentPublic {
            fragment_id: id.to_string(),
            is_public,
        })
    }

    pub fn rename(&self, id: &str, name: &str) -> Result<bool, MutationError> {
        self.store.apply(Mutation::RenameFragment {
            fragment_id: id.to_string(),
            name: name.to_string(),
        })
    }

    /// Switch the canvas to the fragment and select its root
    pub fn begin_editing(&self, id: &str) -> Result<bool, MutationError> {
        let Some(fragment) = self.fragment(id) else {
            tracing::debug!(fragment = id, "fragment missing, skipping");
            return Ok(false);
        };

        self.store.update(|draft| {
            draft.ui.editing_fragment_id = Some(fragment.id);
            draft.ui.mode = EditorMode::Component;
            draft.ui.selected_id = Some(fragment.root_id);
        })?;
        Ok(true)
    }

    /// Back to the page. No-op if no fragment is being edited.
    pub fn end_editing(&self) -> Result<bool, MutationError> {
        if self.editing().is_none() {
            return Ok(false);
        }

        let root_id = self.store.get_state().project.root_id.clone();
        self.store.update(|draft| {
            draft.ui.editing_fragment_id = None;
            draft.ui.mode = EditorMode::Page;
            draft.ui.selected_id = Some(root_id);
        })?;
        Ok(true)
    }
}
