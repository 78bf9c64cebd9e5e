//! Deferred tasks on a virtual clock.
//!
//! The scheduler never runs anything by itself. The owner advances the
//! clock with `advance(elapsed_ms)` and gets back the tasks that became
//! due, in due-time order (ties keep scheduling order). This keeps every
//! deferred action on the owner's single execution context.

use std::collections::VecDeque;

#[derive(Clone, Debug)]
struct Scheduled<T> {
    due_ms: u64,
    task: T,
}

/// Queue of tasks waiting for their due time.
#[derive(Clone, Debug)]
pub struct Scheduler<T> {
    now_ms: u64,
    /// Sorted by `due_ms`, stable for equal due times.
    tasks: VecDeque<Scheduled<T>>,
}

impl<T> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            now_ms: 0,
            tasks: VecDeque::new(),
        }
    }

    /// Current virtual time.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `task` once `delay_ms` has elapsed from now.
    pub fn schedule(&mut self, delay_ms: u64, task: T) {
        let due_ms = self.now_ms.saturating_add(delay_ms);
        let at = self.tasks.partition_point(|s| s.due_ms <= due_ms);
        self.tasks.insert(at, Scheduled { due_ms, task });
    }

    /// Move the clock forward and collect every task that is now due.
    pub fn advance(&mut self, elapsed_ms: u64) -> Vec<T> {
        self.now_ms = self.now_ms.saturating_add(elapsed_ms);

        let due = self.tasks.partition_point(|s| s.due_ms <= self.now_ms);
        self.tasks.drain(..due).map(|s| s.task).collect()
    }

    /// Time left until the next task is due.
    #[must_use]
    pub fn next_due_in(&self) -> Option<u64> {
        self.tasks
            .front()
            .map(|s| s.due_ms.saturating_sub(self.now_ms))
    }

    /// Drop every waiting task.
    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
