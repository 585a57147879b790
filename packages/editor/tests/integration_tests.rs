//! Integration tests for the document store: transactions, notifications
//! and selectors working together

use atelier_common::TreeError;
use atelier_editor::{DocumentStore, MutationError, Selector, TaskQueue};
use atelier_model::{ComponentDefinition, Node, Project, StaticRegistry};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

fn project() -> Project {
    let mut project = Project::new(Node::new("root", "page").with_children(["hero", "footer"]));
    project.nodes.insert(
        "hero".into(),
        Node::new("hero", "box").with_style("display", "flex"),
    );
    project.nodes.insert("footer".into(), Node::new("footer", "box"));
    project
}

fn registry() -> Rc<StaticRegistry> {
    Rc::new(StaticRegistry::from_definitions(vec![
        ComponentDefinition::new("page"),
        ComponentDefinition::new("box"),
        ComponentDefinition::new("image").leaf(),
    ]))
}

fn queued_store() -> anyhow::Result<(DocumentStore, TaskQueue)> {
    let queue = TaskQueue::new();
    let store = DocumentStore::builder(project())
        .registry(registry())
        .scheduler(Rc::new(queue.clone()))
        .build()?;
    Ok((store, queue))
}

fn counter(store: &DocumentStore) -> (Rc<Cell<usize>>, atelier_editor::Subscription) {
    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let subscription = store.subscribe(move || seen.set(seen.get() + 1));
    (calls, subscription)
}

#[test]
fn test_failed_transaction_leaves_no_trace() -> anyhow::Result<()> {
    let store = DocumentStore::builder(project()).registry(registry()).build()?;
    let (calls, _sub) = counter(&store);
    let before = store.get_state();

    let result: Result<(), MutationError> = store.try_update(|draft| {
        draft.project.node_mut("hero").unwrap().styles.clear();
        draft.ui.expert_mode = true;
        Err(MutationError::Rejected("validation failed".into()))
    });

    assert!(result.is_err());
    assert!(Rc::ptr_eq(&before, &store.get_state()));
    assert_eq!(store.version(), 0);
    assert_eq!(calls.get(), 0);
    assert!(!store.can_undo());
    Ok(())
}

#[test]
fn test_store_refuses_broken_initial_project() -> anyhow::Result<()> {
    let mut broken = project();
    broken.node_mut("hero").unwrap().children.push("missing".into());

    let error = DocumentStore::builder(broken).registry(registry()).build().err();
    assert!(matches!(error, Some(TreeError::DanglingChild { .. })));

    let store = DocumentStore::new(project())?;
    assert_eq!(store.version(), 0);
    Ok(())
}

#[test]
fn test_integrity_violation_aborts_commit() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;

    let result = store.update(|draft| {
        draft.project.node_mut("root").unwrap().children.push("ghost".into());
    });

    assert!(matches!(result, Err(MutationError::Integrity(_))));
    assert_eq!(store.get_state().project, project());
    Ok(())
}

#[test]
fn test_every_commit_bumps_version() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;

    store.update(|_| {})?;
    store.update(|draft| draft.ui.expert_mode = true)?;

    assert_eq!(store.version(), 2);
    assert_eq!(store.get_state().version, 2);
    Ok(())
}

#[test]
fn test_nested_transaction_is_rejected() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;
    let inner_result = Rc::new(RefCell::new(None));

    let handle = store.clone();
    let slot = Rc::clone(&inner_result);
    store
        .update(move |draft| {
            draft.ui.expert_mode = true;
            *slot.borrow_mut() = Some(handle.update(|_| {}));
        })?;

    assert_eq!(
        *inner_result.borrow(),
        Some(Err(MutationError::NestedTransaction))
    );
    assert_eq!(store.version(), 1);
    // The flag is reset once the outer transaction ends
    assert!(store.update(|_| {}).is_ok());
    Ok(())
}

#[test]
fn test_burst_of_updates_flushes_once() -> anyhow::Result<()> {
    let (store, queue) = queued_store()?;
    let (calls, _sub) = counter(&store);

    for size in ["10px", "20px", "30px"] {
        store.styles().set_style("hero", "gap", size)?;
    }
    assert_eq!(calls.get(), 0);
    assert_eq!(queue.pending(), 1);

    queue.run_until_idle();
    assert_eq!(calls.get(), 1);
    assert_eq!(store.styles().style("hero", "gap").as_deref(), Some("30px"));

    store.styles().set_style("hero", "gap", "4px")?;
    queue.run_until_idle();
    assert_eq!(calls.get(), 2);
    Ok(())
}

#[test]
fn test_manual_flush_delivers_pending_tick() -> anyhow::Result<()> {
    let (store, queue) = queued_store()?;
    let (calls, _sub) = counter(&store);

    store.update(|draft| draft.ui.expert_mode = true)?;
    assert_eq!(store.flush(), 1);
    assert_eq!(calls.get(), 1);

    // The queued task finds nothing left to deliver
    queue.run_until_idle();
    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn test_silent_update_does_not_notify() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;
    let (calls, _sub) = counter(&store);

    store
        .update_silently(|draft| draft.ui.selected_id = Some("hero".into()))?;

    assert_eq!(calls.get(), 0);
    assert_eq!(store.selection().selected().as_deref(), Some("hero"));
    assert_eq!(store.version(), 1);
    Ok(())
}

#[test]
fn test_unsubscribed_listener_is_not_called() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;
    let (calls, mut sub) = counter(&store);

    store.update(|_| {})?;
    assert!(sub.unsubscribe());
    assert!(!sub.unsubscribe());
    store.update(|_| {})?;

    assert_eq!(calls.get(), 1);
    Ok(())
}

#[test]
fn test_selector_keeps_snapshot_for_unrelated_changes() -> anyhow::Result<()> {
    let store = DocumentStore::builder(project()).registry(registry()).build()?;
    let hero_styles = Selector::new(&store, |state| {
        state.project.node("hero").map(|node| node.styles.clone())
    });
    let changes = Rc::new(Cell::new(0));
    let seen = Rc::clone(&changes);
    let _sub = hero_styles.subscribe(move || seen.set(seen.get() + 1));

    let before = hero_styles.snapshot();
    store.styles().set_style("footer", "color", "red")?;
    store.selection().select(Some("footer"))?;

    assert!(Rc::ptr_eq(&before, &hero_styles.snapshot()));
    assert_eq!(changes.get(), 0);

    store.styles().set_style("hero", "gap", "8px")?;
    assert!(!Rc::ptr_eq(&before, &hero_styles.snapshot()));
    assert_eq!(hero_styles.revision(), 1);
    assert_eq!(changes.get(), 1);
    Ok(())
}

#[test]
fn test_token_selector_ignores_untracked_fields() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;
    let panels = Selector::with_token(
        &store,
        |state| state.ui.clone(),
        |ui| atelier_editor::token([ui.expert_mode.to_string(), format!("{:?}", ui.mode)]),
    );

    let before = panels.snapshot();
    store
        .update(|draft| draft.ui.selected_id = Some("hero".into()))?;
    assert!(Rc::ptr_eq(&before, &panels.snapshot()));

    store.update(|draft| draft.ui.expert_mode = true)?;
    assert!(panels.snapshot().expert_mode);
    Ok(())
}

#[test]
fn test_selector_refresh_after_silent_update() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;
    let expert = Selector::new(&store, |state| state.ui.expert_mode);

    store.update_silently(|draft| draft.ui.expert_mode = true)?;
    assert!(!*expert.snapshot());

    assert!(expert.refresh());
    assert!(*expert.snapshot());
    assert!(!expert.refresh());
    Ok(())
}

#[test]
fn test_dropping_selector_detaches_it() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;
    let listeners_before = store.coalescer().listener_count();

    let selector = Selector::new(&store, |state| state.version);
    assert_eq!(store.coalescer().listener_count(), listeners_before + 1);

    drop(selector);
    assert_eq!(store.coalescer().listener_count(), listeners_before);
    store.update(|_| {})?;
    Ok(())
}

#[test]
fn test_weak_store_does_not_keep_store_alive() -> anyhow::Result<()> {
    let store = DocumentStore::new(project())?;
    let weak = store.downgrade();

    assert!(weak.upgrade().is_some());
    drop(store);
    assert!(weak.upgrade().is_none());
    Ok(())
}
