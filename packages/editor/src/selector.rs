//! # Selectors
//!
//! Memoized projections of the store for UI consumers.
//!
//! A selector recomputes its slice on every store flush and replaces the
//! cached value only when `equals` says the slice changed. Between changes,
//! `snapshot` keeps returning the same `Rc`, so consumers can skip work by
//! pointer comparison.

use crate::store::{DocumentStore, WeakStore};
use crate::subscription::{ListenerSet, Subscription};
use atelier_model::EditorState;
use std::cell::{Cell, RefCell};
use std::fmt::Display;
use std::rc::Rc;

type Pick<T> = Box<dyn Fn(&EditorState) -> T>;
type Equals<T> = Box<dyn Fn(&T, &T) -> bool>;

struct SelectorInner<T> {
    store: WeakStore,
    pick: Pick<T>,
    equals: Equals<T>,
    cached: RefCell<Rc<T>>,
    revision: Cell<u64>,
    listeners: ListenerSet,
    store_subscription: RefCell<Option<Subscription>>,
}

impl<T> SelectorInner<T> {
    fn refresh(&self) -> bool {
        let Some(store) = self.store.upgrade() else {
            return false;
        };
        let next = (self.pick)(&store.get_state());

        let current = Rc::clone(&self.cached.borrow());
        if (self.equals)(current.as_ref(), &next) {
            return false;
        }

        *self.cached.borrow_mut() = Rc::new(next);
        self.revision.set(self.revision.get() + 1);
        self.listeners.notify();
        true
    }
}

/// Read handle over one slice of the editor state
///
/// Dropping the selector detaches it from the store.
pub struct Selector<T> {
    inner: Rc<SelectorInner<T>>,
}

impl<T: PartialEq + 'static> Selector<T> {
    /// Selector compared with `PartialEq`
    pub fn new(store: &DocumentStore, pick: impl Fn(&EditorState) -> T + 'static) -> Self {
        Self::with_equals(store, pick, |a, b| a == b)
    }
}

impl<T: 'static> Selector<T> {
    pub fn with_equals(
        store: &DocumentStore,
        pick: impl Fn(&EditorState) -> T + 'static,
        equals: impl Fn(&T, &T) -> bool + 'static,
    ) -> Self {
        let initial = pick(&store.get_state());
        let inner = Rc::new(SelectorInner {
            store: store.downgrade(),
            pick: Box::new(pick),
            equals: Box::new(equals),
            cached: RefCell::new(Rc::new(initial)),
            revision: Cell::new(0),
            listeners: ListenerSet::default(),
            store_subscription: RefCell::new(None),
        });

        let weak = Rc::downgrade(&inner);
        let subscription = store.subscribe(move || {
            if let Some(inner) = weak.upgrade() {
                inner.refresh();
            }
        });
        *inner.store_subscription.borrow_mut() = Some(subscription);

        Self { inner }
    }

    /// Selector compared by a string token built from the fields that
    /// matter, instead of deep equality
    pub fn with_token(
        store: &DocumentStore,
        pick: impl Fn(&EditorState) -> T + 'static,
        token: impl Fn(&T) -> String + 'static,
    ) -> Self {
        Self::with_equals(store, pick, move |a, b| token(a) == token(b))
    }

    /// Cached slice; the same `Rc` until the next change signal
    pub fn snapshot(&self) -> Rc<T> {
        Rc::clone(&self.inner.cached.borrow())
    }

    /// Number of change signals so far
    pub fn revision(&self) -> u64 {
        self.inner.revision.get()
    }

    /// Called after the cached slice is replaced
    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.inner.listeners.add(listener)
    }

    /// Recompute now, e.g. after a silent update. Returns whether the slice
    /// changed.
    pub fn refresh(&self) -> bool {
        self.inner.refresh()
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Selector<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Selector")
            .field("value", &self.inner.cached.borrow())
            .field("revision", &self.inner.revision.get())
            .finish()
    }
}

/// Join scalar fields into a comparison token
pub fn token<I, D>(fields: I) -> String
where
    I: IntoIterator<Item = D>,
    D: Display,
{
    fields
        .into_iter()
        .map(|field| field.to_string())
        .collect::<Vec<_>>()
        .join("|")
}
