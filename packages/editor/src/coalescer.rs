//! # Render Coalescer
//!
//! Collapses every notification requested within one scheduling tick into a
//! single broadcast.
//!
//! ## Design
//!
//! - `request_tick` marks a flush as pending and schedules it at most once
//! - The flush clears the pending flag first, then calls a snapshot of the
//!   listeners in registration order
//! - Ticks requested by a listener while the flush runs are queued for the
//!   next flush instead of re-entering the current one
//!
//! Scheduling is delegated to a `Scheduler`, so hosts decide what "one tick"
//! means and tests can drive flushes by hand with a `TaskQueue`.

use crate::subscription::{ListenerSet, Subscription};
use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

pub type Task = Box<dyn FnOnce()>;

/// Defers a task to the host's next turn
pub trait Scheduler {
    fn schedule(&self, task: Task);
}

/// Runs tasks synchronously, so every tick flushes immediately
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateScheduler;

impl Scheduler for ImmediateScheduler {
    fn schedule(&self, task: Task) {
        task();
    }
}

/// FIFO of deferred tasks, drained explicitly by the host
#[derive(Clone, Default)]
pub struct TaskQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run the oldest task; returns false if the queue was empty
    pub fn run_next(&self) -> bool {
        // Released before running so the task can schedule more work
        let task = self.tasks.borrow_mut().pop_front();
        match task {
            Some(task) => {
                task();
                true
            }
            None => false,
        }
    }

    /// Run tasks until none are left, including ones queued meanwhile
    pub fn run_until_idle(&self) -> usize {
        let mut ran = 0;
        while self.run_next() {
            ran += 1;
        }
        ran
    }
}

impl Scheduler for TaskQueue {
    fn schedule(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

struct CoalescerState {
    listeners: ListenerSet,
    scheduler: Rc<dyn Scheduler>,
    scheduled: Cell<bool>,
    flushing: Cell<bool>,
    requested_during_flush: Cell<bool>,
    flushes: Cell<u64>,
}

#[derive(Clone)]
pub struct RenderCoalescer {
    state: Rc<CoalescerState>,
}

impl RenderCoalescer {
    pub fn new(scheduler: Rc<dyn Scheduler>) -> Self {
        Self {
            state: Rc::new(CoalescerState {
                listeners: ListenerSet::default(),
                scheduler,
                scheduled: Cell::new(false),
                flushing: Cell::new(false),
                requested_during_flush: Cell::new(false),
                flushes: Cell::new(0),
            }),
        }
    }

    pub fn subscribe(&self, listener: impl Fn() + 'static) -> Subscription {
        self.state.listeners.add(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.state.listeners.len()
    }

    /// Mark a notification as pending; schedules at most one flush
    pub fn request_tick(&self) {
        if self.state.flushing.get() {
            self.state.requested_during_flush.set(true);
            return;
        }
        if self.state.scheduled.replace(true) {
            return;
        }
        self.schedule_flush();
    }

    fn schedule_flush(&self) {
        let state = Rc::downgrade(&self.state);
        self.state.scheduler.schedule(Box::new(move || {
            if let Some(state) = state.upgrade() {
                RenderCoalescer { state }.flush();
            }
        }));
    }

    /// Notify every listener if a tick is pending. Returns the number of
    /// listeners called.
    pub fn flush(&self) -> usize {
        if self.state.flushing.get() || !self.state.scheduled.replace(false) {
            return 0;
        }

        self.state.flushing.set(true);
        let called = self.state.listeners.notify();
        self.state.flushing.set(false);

        let flushes = self.state.flushes.get() + 1;
        self.state.flushes.set(flushes);
        tracing::trace!(flush = flushes, listeners = called, "flushed notifications");

        if self.state.requested_during_flush.replace(false) {
            self.state.scheduled.set(true);
            self.schedule_flush();
        }
        called
    }

    pub fn is_pending(&self) -> bool {
        self.state.scheduled.get()
    }

    /// Number of flushes that have run so far
    pub fn flush_count(&self) -> u64 {
        self.state.flushes.get()
    }
}

impl std::fmt::Debug for RenderCoalescer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderCoalescer")
            .field("listeners", &self.listener_count())
            .field("pending", &self.is_pending())
            .field("flushes", &self.flush_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn counting(coalescer: &RenderCoalescer) -> (Rc<Cell<u32>>, Subscription) {
        let calls = Rc::new(Cell::new(0));
        let subscription = {
            let calls = calls.clone();
            coalescer.subscribe(move || calls.set(calls.get() + 1))
        };
        (calls, subscription)
    }

    #[test]
    fn test_many_ticks_one_flush() {
        let queue = TaskQueue::new();
        let coalescer = RenderCoalescer::new(Rc::new(queue.clone()));
        let (calls, _subscription) = counting(&coalescer);

        for _ in 0..10 {
            coalescer.request_tick();
        }
        assert_eq!(queue.pending(), 1);
        assert_eq!(calls.get(), 0);

        queue.run_until_idle();
        assert_eq!(calls.get(), 1);
        assert_eq!(coalescer.flush_count(), 1);
        assert!(!coalescer.is_pending());
    }

    #[test]
    fn test_manual_flush_cancels_scheduled_task() {
        let queue = TaskQueue::new();
        let coalescer = RenderCoalescer::new(Rc::new(queue.clone()));
        let (calls, _subscription) = counting(&coalescer);

        coalescer.request_tick();
        assert_eq!(coalescer.flush(), 1);
        queue.run_until_idle();

        assert_eq!(calls.get(), 1);
        assert_eq!(coalescer.flush(), 0);
    }

    #[test]
    fn test_immediate_scheduler_flushes_every_tick() {
        let coalescer = RenderCoalescer::new(Rc::new(ImmediateScheduler));
        let (calls, _subscription) = counting(&coalescer);

        coalescer.request_tick();
        coalescer.request_tick();
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_tick_from_listener_lands_on_next_flush() {
        let queue = TaskQueue::new();
        let coalescer = RenderCoalescer::new(Rc::new(queue.clone()));
        let calls = Rc::new(Cell::new(0));

        let _subscription = {
            let calls = calls.clone();
            let inner = coalescer.clone();
            coalescer.subscribe(move || {
                calls.set(calls.get() + 1);
                if calls.get() == 1 {
                    inner.request_tick();
                }
            })
        };

        coalescer.request_tick();
        assert!(queue.run_next());
        assert_eq!(calls.get(), 1);
        assert_eq!(queue.pending(), 1);

        queue.run_until_idle();
        assert_eq!(calls.get(), 2);
        assert_eq!(coalescer.flush_count(), 2);
    }

    #[test]
    fn test_subscriber_added_during_flush_waits_for_next() {
        let queue = TaskQueue::new();
        let coalescer = RenderCoalescer::new(Rc::new(queue.clone()));
        let late_calls = Rc::new(Cell::new(0));
        let late: Rc<RefCell<Vec<Subscription>>> = Rc::new(RefCell::new(Vec::new()));

        let _subscription = {
            let inner = coalescer.clone();
            let late_calls = late_calls.clone();
            let late = late.clone();
            coalescer.subscribe(move || {
                if late.borrow().is_empty() {
                    let late_calls = late_calls.clone();
                    let subscription =
                        inner.subscribe(move || late_calls.set(late_calls.get() + 1));
                    late.borrow_mut().push(subscription);
                }
            })
        };

        coalescer.request_tick();
        queue.run_until_idle();
        assert_eq!(late_calls.get(), 0);

        coalescer.request_tick();
        queue.run_until_idle();
        assert_eq!(late_calls.get(), 1);
    }
}
