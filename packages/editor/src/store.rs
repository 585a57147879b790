//! # Document Store
//!
//! Owns the canonical `EditorState` and is the only way to change it.
//!
//! ## Transactions
//!
//! ```text
//! current ──clone──▶ draft ──mutator──▶ post-effects ──▶ integrity ──▶ commit
//!                                                                      │
//!                                              history, version, tick ◀┘
//! ```
//!
//! - The mutator works on a private draft; readers keep seeing the previous
//!   snapshot until the commit
//! - Any error aborts the transaction: the state and its version stay as
//!   they were and the error is returned to the caller
//! - Every commit bumps `version`, even if the mutator wrote nothing
//! - Transactions do not nest; a mutator must not call back into the store
//!
//! Notifications go through the `RenderCoalescer`, so several commits in
//! one scheduling tick reach subscribers as a single flush.

use crate::coalescer::{ImmediateScheduler, RenderCoalescer, Scheduler};
use crate::config::EditorConfig;
use crate::history::History;
use crate::ids::IdGenerator;
use crate::mutations::{Mutation, MutationError};
use crate::post_effects::PostEffectEngine;
use crate::subscription::Subscription;
use atelier_common::{validate_tree, TreeError};
use atelier_model::{ComponentRegistry, EditorState, Project, StaticRegistry, UiState};
use atelier_policy::RuleRegistry;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

struct StoreInner {
    state: RefCell<Rc<EditorState>>,
    coalescer: RenderCoalescer,
    history: RefCell<History>,
    effects: PostEffectEngine,
    ids: RefCell<IdGenerator>,
    registry: Rc<dyn ComponentRegistry>,
    rules: RuleRegistry,
    config: EditorConfig,
    in_transaction: Cell<bool>,
}

/// Handle to the editor's single document store
///
/// Cloning is cheap and yields another handle to the same store.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Rc<StoreInner>,
}

/// Non-owning store handle, used by long-lived listeners
#[derive(Clone)]
pub struct WeakStore {
    inner: Weak<StoreInner>,
}

impl WeakStore {
    pub fn upgrade(&self) -> Option<DocumentStore> {
        self.inner.upgrade().map(|inner| DocumentStore { inner })
    }
}

struct Commit<'a> {
    notify: bool,
    record: bool,
    description: Option<&'a str>,
}

/// Resets the transaction flag even if the mutator panics
struct TransactionGuard<'a>(&'a Cell<bool>);

impl Drop for TransactionGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl DocumentStore {
    /// Store with default config, an empty registry and synchronous
    /// notifications
    pub fn new(project: Project) -> Result<Self, TreeError> {
        Self::builder(project).build()
    }

    pub fn builder(project: Project) -> DocumentStoreBuilder {
        DocumentStoreBuilder::new(project)
    }

    pub fn downgrade(&self) -> WeakStore {
        WeakStore {
            inner: Rc::downgrade(&self.inner),
        }
    }

    /// Current snapshot. The same `Rc` is returned until the next commit.
    pub fn get_state(&self) -> Rc<EditorState> {
        Rc::clone(&self.inner.state.borrow())
    }

    pub fn version(&self) -> u64 {
        self.inner.state.borrow().version
    }

    pub fn config(&self) -> &EditorConfig {
        &self.inner.config
    }

    pub fn registry(&self) -> &dyn ComponentRegistry {
        self.inner.registry.as_ref()
    }

    pub fn rules(&self) -> &RuleRegistry {
        &self.inner.rules
    }

    /// Run `mutator` in a transaction and notify subscribers
    pub fn update(&self, mutator: impl FnOnce(&mut EditorState)) -> Result<(), MutationError> {
        self.try_update(|draft| {
            mutator(draft);
            Ok(())
        })
    }

    /// Like `update`, but the mutator may abort the transaction
    pub fn try_update<R>(
        &self,
        mutator: impl FnOnce(&mut EditorState) -> Result<R, MutationError>,
    ) -> Result<R, MutationError> {
        self.commit(
            Commit {
                notify: true,
                record: true,
                description: None,
            },
            mutator,
        )
    }

    /// Commit without notifying subscribers
    pub fn update_silently(&self, mutator: impl FnOnce(&mut EditorState)) -> Result<(), MutationError> {
        self.commit(
            Commit {
                notify: false,
                record: true,
                description: None,
            },
            |draft| {
                mutator(draft);
                Ok(())
            },
        )
    }

    /// Fallible transaction with an undo description
    pub fn transact<R>(
        &self,
        description: &str,
        mutator: impl FnOnce(&mut EditorState) -> Result<R, MutationError>,
    ) -> Result<R, MutationError> {
        self.commit(
            Commit {
                notify: true,
                record: true,
                description: Some(description),
            },
            mutator,
        )
    }

    /// Apply one mutation in its own transaction
    ///
    /// Returns `Ok(false)` without committing if the entity it targets does
    /// not exist.
    pub fn apply(&self, mutation: Mutation) -> Result<bool, MutationError> {
        if !mutation.targets_exist(&self.get_state().project) {
            tracing::debug!(mutation = mutation.description(), "target missing, skipping");
            return Ok(false);
        }

        self.transact(mutation.description(), |draft| {
            mutation.apply(&mut draft.project)
        })?;
        Ok(true)
    }

    fn commit<R>(
        &self,
        commit: Commit<'_>,
        mutator: impl FnOnce(&mut EditorState) -> Result<R, MutationError>,
    ) -> Result<R, MutationError> {
        if self.inner.in_transaction.replace(true) {
            return Err(MutationError::NestedTransaction);
        }

        let value = {
            let _guard = TransactionGuard(&self.inner.in_transaction);
            self.run_transaction(&commit, mutator)?
        };

        if commit.notify {
            self.inner.coalescer.request_tick();
        }
        Ok(value)
    }

    fn run_transaction<R>(
        &self,
        commit: &Commit<'_>,
        mutator: impl FnOnce(&mut EditorState) -> Result<R, MutationError>,
    ) -> Result<R, MutationError> {
        let current = self.get_state();
        let mut draft = (*current).clone();

        let value = mutator(&mut draft).map_err(|error| {
            tracing::warn!(version = current.version, %error, "transaction aborted");
            error
        })?;

        self.inner.effects.run(&mut draft);

        if self.inner.config.validate_on_commit {
            validate_tree(&draft.project).map_err(|error| {
                tracing::warn!(version = current.version, %error, "transaction violates tree integrity");
                MutationError::from(error)
            })?;
        }

        let project_changed = draft.project != current.project;
        if project_changed && commit.record {
            self.inner
                .history
                .borrow_mut()
                .record(&current.project, commit.description);
        }

        draft.version = current.version + 1;
        tracing::debug!(
            version = draft.version,
            project_changed,
            description = commit.description.unwrap_or(""),
            "committed"
        );
        *self.inner.state.borrow_mut() = Rc::new(draft);
        Ok(value)
    }

    /// Register a listener called once per coalesced flush
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.inner.coalescer.subscribe(listener)
    }

    /// Deliver a pending notification now instead of waiting for the
    /// scheduler. Returns the number of listeners called.
    pub fn flush(&self) -> usize {
        self.inner.coalescer.flush()
    }

    pub fn coalescer(&self) -> &RenderCoalescer {
        &self.inner.coalescer
    }

    /// Fresh id with the configured prefix, unique within the project
    pub fn new_id(&self) -> String {
        let state = self.get_state();
        self.inner.ids.borrow_mut().new_id(&state.project)
    }

    pub fn new_id_with_prefix(&self, prefix: &str) -> String {
        let state = self.get_state();
        self.inner
            .ids
            .borrow_mut()
            .new_id_with_prefix(prefix, &state.project)
    }

    /// Group the following transactions into one undo step
    pub fn begin_batch(&self) {
        let state = self.get_state();
        self.inner.history.borrow_mut().begin_batch(&state.project);
    }

    pub fn set_batch_description(&self, description: impl Into<String>) {
        self.inner
            .history
            .borrow_mut()
            .set_batch_description(description);
    }

    /// Returns true if the outermost batch closed with changes
    pub fn end_batch(&self) -> bool {
        let state = self.get_state();
        self.inner.history.borrow_mut().end_batch(&state.project)
    }

    /// Run `f` inside a batch, closing the batch even if `f` fails
    pub fn batch<R>(
        &self,
        description: &str,
        f: impl FnOnce(&DocumentStore) -> Result<R, MutationError>,
    ) -> Result<R, MutationError> {
        self.begin_batch();
        self.set_batch_description(description);
        let result = f(self);
        self.end_batch();
        result
    }

    pub fn can_undo(&self) -> bool {
        self.inner.history.borrow().can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.inner.history.borrow().can_redo()
    }

    pub fn undo_description(&self) -> Option<String> {
        self.inner
            .history
            .borrow()
            .undo_description()
            .map(str::to_string)
    }

    /// Restore the project before the last recorded step
    pub fn undo(&self) -> Result<bool, MutationError> {
        self.step_history(History::take_undo, "undo")
    }

    pub fn redo(&self) -> Result<bool, MutationError> {
        self.step_history(History::take_redo, "redo")
    }

    fn step_history(
        &self,
        take: fn(&mut History, &Project) -> Option<Project>,
        label: &str,
    ) -> Result<bool, MutationError> {
        if self.inner.history.borrow().is_batching() {
            tracing::debug!("{} ignored while a batch is open", label);
            return Ok(false);
        }

        let current = self.get_state();
        let restored = {
            let mut history = self.inner.history.borrow_mut();
            take(&mut *history, &current.project)
        };
        let Some(project) = restored else {
            return Ok(false);
        };

        self.commit(
            Commit {
                notify: true,
                record: false,
                description: Some(label),
            },
            |draft| {
                draft.project = project;
                Ok(())
            },
        )?;
        Ok(true)
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("version", &self.version())
            .field("coalescer", &self.inner.coalescer)
            .field("rules", &self.inner.rules)
            .finish()
    }
}

pub struct DocumentStoreBuilder {
    project: Project,
    ui: Option<UiState>,
    config: EditorConfig,
    registry: Option<Rc<dyn ComponentRegistry>>,
    scheduler: Option<Rc<dyn Scheduler>>,
    rules: Option<RuleRegistry>,
    effects: Option<PostEffectEngine>,
}

impl DocumentStoreBuilder {
    fn new(project: Project) -> Self {
        Self {
            project,
            ui: None,
            config: EditorConfig::default(),
            registry: None,
            scheduler: None,
            rules: None,
            effects: None,
        }
    }

    /// Initial UI state. Defaults to `UiState::default()` with the config's
    /// expert mode and panel layout.
    pub fn ui(mut self, ui: UiState) -> Self {
        self.ui = Some(ui);
        self
    }

    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn registry(mut self, registry: Rc<dyn ComponentRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn scheduler(mut self, scheduler: Rc<dyn Scheduler>) -> Self {
        self.scheduler = Some(scheduler);
        self
    }

    /// Rule set to use instead of the one derived from the config
    pub fn rules(mut self, rules: RuleRegistry) -> Self {
        self.rules = Some(rules);
        self
    }

    pub fn post_effects(mut self, effects: PostEffectEngine) -> Self {
        self.effects = Some(effects);
        self
    }

    /// Fails if the initial project breaks tree integrity, unless the config
    /// turns integrity checks off
    pub fn build(self) -> Result<DocumentStore, TreeError> {
        let config = self.config;

        let ui = self.ui.unwrap_or_else(|| UiState {
            expert_mode: config.expert_mode,
            panels: config.panels,
            ..UiState::default()
        });
        let state = EditorState::new(self.project).with_ui(ui);

        if config.validate_on_commit {
            if let Err(error) = validate_tree(&state.project) {
                tracing::warn!(%error, "rejecting initial project");
                return Err(error);
            }
        }

        let rules = self.rules.unwrap_or_else(|| config.rule_registry());
        let registry = self
            .registry
            .unwrap_or_else(|| Rc::new(StaticRegistry::new()));
        let scheduler = self
            .scheduler
            .unwrap_or_else(|| Rc::new(ImmediateScheduler));

        Ok(DocumentStore {
            inner: Rc::new(StoreInner {
                state: RefCell::new(Rc::new(state)),
                coalescer: RenderCoalescer::new(scheduler),
                history: RefCell::new(History::with_max_levels(config.history_limit)),
                effects: self.effects.unwrap_or_default(),
                ids: RefCell::new(IdGenerator::new(config.id_prefix.clone())),
                registry,
                rules,
                config,
                in_transaction: Cell::new(false),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coalescer::TaskQueue;
    use atelier_model::Node;

    fn project() -> Project {
        let mut project = Project::new(Node::new("root", "page").with_children(["a"]));
        project.nodes.insert("a".into(), Node::new("a", "box"));
        project
    }

    #[test]
    fn test_get_state_is_stable_between_commits() {
        let store = DocumentStore::new(project()).unwrap();

        let first = store.get_state();
        assert!(Rc::ptr_eq(&first, &store.get_state()));

        store.update(|draft| draft.ui.expert_mode = true).unwrap();
        assert!(!Rc::ptr_eq(&first, &store.get_state()));
        assert_eq!(store.version(), 1);
    }

    #[test]
    fn test_failed_mutator_commits_nothing() {
        let store = DocumentStore::new(project()).unwrap();
        let before = store.get_state();

        let result: Result<(), _> = store.try_update(|draft| {
            draft.project.global_css = "body {}".into();
            draft.ui.selected_id = Some("a".into());
            Err(MutationError::Rejected("changed my mind".into()))
        });

        assert_eq!(result, Err(MutationError::Rejected("changed my mind".into())));
        assert!(Rc::ptr_eq(&before, &store.get_state()));
        assert_eq!(store.version(), 0);
        assert!(!store.can_undo());
    }

    #[test]
    fn test_nested_update_is_rejected() {
        let store = DocumentStore::new(project()).unwrap();
        let inner = store.clone();

        let nested = store
            .try_update(|_| Ok(inner.update(|draft| draft.ui.expert_mode = true)))
            .unwrap();

        assert_eq!(nested, Err(MutationError::NestedTransaction));
        assert!(!store.get_state().ui.expert_mode);
        // The flag is released once the outer transaction ends
        store.update(|draft| draft.ui.expert_mode = true).unwrap();
    }

    #[test]
    fn test_integrity_violation_aborts() {
        let store = DocumentStore::new(project()).unwrap();

        let result = store.update(|draft| {
            draft.project.node_mut("a").unwrap().children.push("ghost".into());
        });

        assert!(matches!(result, Err(MutationError::Integrity(_))));
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_apply_skips_missing_targets() {
        let store = DocumentStore::new(project()).unwrap();

        let applied = store
            .apply(Mutation::SetStyle {
                node_id: "ghost".into(),
                property: "color".into(),
                value: "red".into(),
            })
            .unwrap();

        assert!(!applied);
        assert_eq!(store.version(), 0);
    }

    #[test]
    fn test_silent_update_does_not_notify() {
        let queue = TaskQueue::new();
        let store = DocumentStore::builder(project())
            .scheduler(Rc::new(queue.clone()))
            .build()
            .unwrap();
        let calls = Rc::new(Cell::new(0));
        let _subscription = {
            let calls = calls.clone();
            store.subscribe(move || calls.set(calls.get() + 1))
        };

        store.update_silently(|draft| draft.ui.expert_mode = true).unwrap();
        assert_eq!(queue.pending(), 0);
        assert_eq!(store.version(), 1);

        store.update(|draft| draft.ui.expert_mode = false).unwrap();
        queue.run_until_idle();
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn test_ui_only_commits_are_not_recorded() {
        let store = DocumentStore::new(project()).unwrap();

        store.update(|draft| draft.ui.selected_id = Some("a".into())).unwrap();
        assert!(!store.can_undo());

        store
            .update(|draft| draft.project.global_css = "body {}".into())
            .unwrap();
        assert!(store.can_undo());
    }

    #[test]
    fn test_undo_redo_restore_project() {
        let store = DocumentStore::new(project()).unwrap();
        store
            .apply(Mutation::SetGlobalCss {
                css: "body { margin: 0 }".into(),
            })
            .unwrap();
        assert_eq!(store.undo_description().as_deref(), Some("Edit global CSS"));

        assert!(store.undo().unwrap());
        assert_eq!(store.get_state().project.global_css, "");
        assert!(store.can_redo());

        assert!(store.redo().unwrap());
        assert_eq!(store.get_state().project.global_css, "body { margin: 0 }");
        assert!(!store.redo().unwrap());
    }

    #[test]
    fn test_builder_applies_config_to_ui() {
        let config = EditorConfig {
            expert_mode: true,
            ..EditorConfig::default()
        };
        let store = DocumentStore::builder(project()).config(config).build().unwrap();

        assert!(store.get_state().ui.expert_mode);
    }

    #[test]
    fn test_builder_rejects_broken_initial_tree() {
        let mut broken = project();
        broken.nodes.insert("stray".into(), Node::new("stray", "box"));

        let result = DocumentStore::new(broken.clone());
        assert!(matches!(result, Err(TreeError::Orphan(ref id)) if id == "stray"));

        let mut dangling = project();
        dangling.node_mut("a").unwrap().children.push("ghost".into());
        assert!(DocumentStore::new(dangling).is_err());

        let unchecked = EditorConfig {
            validate_on_commit: false,
            ..EditorConfig::default()
        };
        let store = DocumentStore::builder(broken).config(unchecked).build().unwrap();
        assert!(store.get_state().project.node("stray").is_some());
    }
}
