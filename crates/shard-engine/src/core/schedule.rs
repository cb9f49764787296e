//! Delayed tasks.
//!
//! The browser bridge schedules with `setTimeout`; `ManualScheduler` is a
//! deterministic clock for headless use and tests.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Work to run once the delay has elapsed.
pub type Task = Box<dyn FnOnce()>;

/// Handle to a scheduled task. Cancelling prevents the task from running
/// if it has not run yet.
#[derive(Debug, Clone, Default)]
pub struct TaskHandle {
    cancelled: Rc<Cell<bool>>,
}

impl TaskHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.get()
    }

    /// Wrap `task` so it does nothing once this handle is cancelled.
    pub fn guard(&self, task: Task) -> Task {
        let cancelled = self.cancelled.clone();
        Box::new(move || {
            if !cancelled.get() {
                task();
            }
        })
    }
}

/// Runs tasks after a delay on the single event loop.
pub trait Scheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle;
}

struct Pending {
    due_ms: u64,
    seq: u64,
    task: Task,
}

/// Scheduler driven by explicit `advance` calls.
#[derive(Default)]
pub struct ManualScheduler {
    now_ms: Cell<u64>,
    next_seq: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms.get()
    }

    /// Number of tasks not yet run (cancelled ones included).
    pub fn pending(&self) -> usize {
        self.pending.borrow().len()
    }

    /// Move the clock forward and run every task that became due, in due
    /// order. Returns how many tasks were run.
    pub fn advance(&self, ms: u64) -> usize {
        let target = self.now_ms.get() + ms;
        let mut ran = 0;
        loop {
            // Pop before running so a task may schedule more work.
            let next = {
                let mut pending = self.pending.borrow_mut();
                let idx = pending
                    .iter()
                    .enumerate()
                    .filter(|(_, p)| p.due_ms <= target)
                    .min_by_key(|(_, p)| (p.due_ms, p.seq))
                    .map(|(i, _)| i);
                idx.map(|i| pending.remove(i))
            };
            let Some(next) = next else { break };
            self.now_ms.set(next.due_ms);
            (next.task)();
            ran += 1;
        }
        self.now_ms.set(target);
        ran
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TaskHandle {
        let handle = TaskHandle::new();
        let seq = self.next_seq.get();
        self.next_seq.set(seq + 1);
        self.pending.borrow_mut().push(Pending {
            due_ms: self.now_ms.get() + delay_ms as u64,
            seq,
            task: handle.guard(task),
        });
        handle
    }
}
