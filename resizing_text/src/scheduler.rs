// Copyright 2025 the Parley Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferral to the next UI turn.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

type Task = Box<dyn FnOnce()>;

/// A single-threaded queue of work deferred to the next UI turn.
///
/// Handles are cheap to clone and share one queue. The host drains it with
/// [`run_pending`](Self::run_pending) once per turn, typically right after
/// dispatching input events. Tasks cannot be cancelled; tasks that target an
/// object use [`schedule_for`](Self::schedule_for), which makes them no-ops
/// once the target is gone.
#[derive(Clone, Default)]
pub struct UiQueue {
    tasks: Rc<RefCell<VecDeque<Task>>>,
}

impl UiQueue {
    /// An empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `task` on the next turn.
    pub fn schedule(&self, task: impl FnOnce() + 'static) {
        self.tasks.borrow_mut().push_back(Box::new(task));
    }

    /// Runs `task` on the next turn if `target` is still alive then.
    pub fn schedule_for<T: ?Sized + 'static>(
        &self,
        target: Weak<T>,
        task: impl FnOnce(&T) + 'static,
    ) {
        self.schedule(move || match target.upgrade() {
            Some(target) => task(&*target),
            None => log::trace!("dropping deferred task, target is gone"),
        });
    }

    /// The number of tasks waiting.
    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Runs every task that was pending when called.
    ///
    /// Tasks scheduled while running wait for the next call. Returns the
    /// number of tasks run.
    pub fn run_pending(&self) -> usize {
        let batch = std::mem::take(&mut *self.tasks.borrow_mut());
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }
}

impl fmt::Debug for UiQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UiQueue")
            .field("pending", &self.pending())
            .finish()
    }
}
