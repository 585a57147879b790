//! Listener bookkeeping shared by the coalescer and selectors.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

pub(crate) type Listener = Rc<dyn Fn()>;

#[derive(Default)]
struct ListenerList {
    next_id: u64,
    entries: Vec<(u64, Listener)>,
}

/// Ordered set of change listeners
#[derive(Clone, Default)]
pub(crate) struct ListenerSet {
    list: Rc<RefCell<ListenerList>>,
}

impl ListenerSet {
    pub fn add(&self, listener: impl Fn() + 'static) -> Subscription {
        let mut list = self.list.borrow_mut();
        list.next_id += 1;
        let id = list.next_id;
        list.entries.push((id, Rc::new(listener)));

        Subscription {
            list: Rc::downgrade(&self.list),
            id,
            active: true,
        }
    }

    /// Listeners in registration order, detached from the set so callbacks
    /// may subscribe or unsubscribe freely
    pub fn snapshot(&self) -> Vec<Listener> {
        self.list
            .borrow()
            .entries
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect()
    }

    pub fn notify(&self) -> usize {
        let listeners = self.snapshot();
        for listener in &listeners {
            listener();
        }
        listeners.len()
    }

    pub fn len(&self) -> usize {
        self.list.borrow().entries.len()
    }
}

/// Handle returned by every `subscribe`
///
/// Dropping it unsubscribes. `unsubscribe` may be called any number of times.
#[must_use = "dropping a Subscription unsubscribes the listener"]
pub struct Subscription {
    list: Weak<RefCell<ListenerList>>,
    id: u64,
    active: bool,
}

impl Subscription {
    /// Remove the listener; returns whether this call removed it
    pub fn unsubscribe(&mut self) -> bool {
        if !std::mem::replace(&mut self.active, false) {
            return false;
        }
        match self.list.upgrade() {
            Some(list) => {
                let mut list = list.borrow_mut();
                let before = list.entries.len();
                list.entries.retain(|(id, _)| *id != self.id);
                list.entries.len() != before
            }
            None => false,
        }
    }

    /// Keep the listener registered for as long as its source lives
    pub fn detach(mut self) {
        self.active = false;
    }

    pub fn is_active(&self) -> bool {
        self.active && self.list.strong_count() > 0
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unsubscribe();
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
