//! # Post-Effect System
//!
//! Repairs that run on every draft before it is validated and committed, so
//! references into the project never dangle.
//!
//! Post-effects are:
//! - **Deterministic**: the same draft always gets the same repairs
//! - **Idempotent**: running them twice changes nothing the second time
//! - **Ordered**: fragments are pruned before fragment references are checked

use atelier_model::{EditorMode, EditorState};

/// Repair applied to a draft after the mutator ran
pub trait PostEffect: std::fmt::Debug {
    /// Returns whether the draft was changed
    fn apply(&self, draft: &mut EditorState) -> bool;
}

/// Drop fragments whose root node no longer exists
#[derive(Debug)]
pub struct PruneDetachedFragments;

impl PostEffect for PruneDetachedFragments {
    fn apply(&self, draft: &mut EditorState) -> bool {
        let project = &mut draft.project;
        let before = project.fragments.len();
        let nodes = &project.nodes;
        project.fragments.retain(|f| nodes.contains_key(&f.root_id));
        project.fragments.len() != before
    }
}

/// Clear a selection pointing at a removed node
#[derive(Debug)]
pub struct ClearDanglingSelection;

impl PostEffect for ClearDanglingSelection {
    fn apply(&self, draft: &mut EditorState) -> bool {
        match &draft.ui.selected_id {
            Some(id) if !draft.project.contains_node(id) => {
                draft.ui.selected_id = None;
                true
            }
            _ => false,
        }
    }
}

/// Leave component editing when the edited fragment is gone
#[derive(Debug)]
pub struct ClearDanglingFragmentEditing;

impl PostEffect for ClearDanglingFragmentEditing {
    fn apply(&self, draft: &mut EditorState) -> bool {
        match &draft.ui.editing_fragment_id {
            Some(id) if draft.project.fragment(id).is_none() => {
                draft.ui.editing_fragment_id = None;
                draft.ui.mode = EditorMode::Page;
                true
            }
            _ => false,
        }
    }
}

/// Post-effect engine that applies all registered effects in order
#[derive(Debug)]
pub struct PostEffectEngine {
    effects: Vec<Box<dyn PostEffect>>,
}

impl PostEffectEngine {
    /// Create engine with default effects
    pub fn new() -> Self {
        Self {
            effects: vec![
                Box::new(PruneDetachedFragments),
                Box::new(ClearDanglingSelection),
                Box::new(ClearDanglingFragmentEditing),
            ],
        }
    }

    pub fn empty() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    pub fn with_effect(mut self, effect: Box<dyn PostEffect>) -> Self {
        self.effects.push(effect);
        self
    }

    /// Run every effect; returns how many changed the draft
    pub fn run(&self, draft: &mut EditorState) -> usize {
        let mut fired = 0;
        for effect in &self.effects {
            if effect.apply(draft) {
                tracing::trace!(effect = ?effect, "post-effect repaired draft");
                fired += 1;
            }
        }
        fired
    }
}

impl Default for PostEffectEngine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_model::{Fragment, Node, Project};

    fn state() -> EditorState {
        let mut project = Project::new(Node::new("root", "page").with_children(["a"]));
        project.nodes.insert("a".into(), Node::new("a", "box"));
        project.nodes.insert("f".into(), Node::new("f", "box"));
        project.fragments.push(Fragment {
            id: "fragment-1".into(),
            name: "Card".into(),
            root_id: "f".into(),
            is_public: false,
        });
        EditorState::new(project)
    }

    #[test]
    fn test_post_effect_engine_creation() {
        let engine = PostEffectEngine::new();
        assert_eq!(engine.effects.len(), 3);
    }

    #[test]
    fn test_clean_draft_is_untouched() {
        let mut draft = state();
        draft.ui.selected_id = Some("a".into());
        let before = draft.clone();

        assert_eq!(PostEffectEngine::new().run(&mut draft), 0);
        assert_eq!(draft, before);
    }

    #[test]
    fn test_removed_fragment_root_cascades_to_ui() {
        let mut draft = state();
        draft.ui.selected_id = Some("f".into());
        draft.ui.editing_fragment_id = Some("fragment-1".into());
        draft.ui.mode = EditorMode::Component;
        draft.project.nodes.remove("f");

        assert_eq!(PostEffectEngine::new().run(&mut draft), 3);
        assert!(draft.project.fragments.is_empty());
        assert_eq!(draft.ui.selected_id, None);
        assert_eq!(draft.ui.editing_fragment_id, None);
        assert_eq!(draft.ui.mode, EditorMode::Page);

        // Idempotent
        assert_eq!(PostEffectEngine::new().run(&mut draft), 0);
    }
}
