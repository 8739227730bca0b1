//! Logical-time scheduler.
//!
//! A [`Scheduler`] owns a logical clock and an ordered queue of deferred
//! actions. The clock starts at zero and only moves forward when the host
//! calls [`Scheduler::tick`]. Entries are released in ascending execution
//! time, ties broken by insertion order.
//!
//! Actions run synchronously inside `tick` and receive both the host context
//! and the scheduler itself, so a released action can defer follow-up work.
//! After each release the queue head is re-examined: an action that
//! schedules with zero delay is released within the same tick.

use std::collections::BTreeMap;
use std::fmt;

use smarthome_domain::error::SmartHomeError;
use smarthome_domain::time::{self, LogicalTime, Span};

/// Outcome of a released action.
pub type TaskResult = Result<(), SmartHomeError>;

type Task<C> = Box<dyn FnOnce(&mut C, &mut Scheduler<C>) -> TaskResult + Send>;

/// Handle returned by [`Scheduler::schedule_after`], used to cancel or query
/// a pending entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskToken {
    due: LogicalTime,
    seq: u64,
}

impl TaskToken {
    /// Logical time at which the entry is due.
    #[must_use]
    pub fn due(&self) -> LogicalTime {
        self.due
    }
}

impl fmt::Display for TaskToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task#{}@{}", self.seq, self.due)
    }
}

/// Logical clock plus a time-ordered queue of deferred actions over a host
/// context `C`.
pub struct Scheduler<C> {
    now: LogicalTime,
    next_seq: u64,
    queue: BTreeMap<TaskToken, Task<C>>,
}

impl<C> Default for Scheduler<C> {
    fn default() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            queue: BTreeMap::new(),
        }
    }
}

impl<C> Scheduler<C> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time.
    #[must_use]
    pub fn now(&self) -> LogicalTime {
        self.now
    }

    /// Number of entries waiting to be released.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Execution time of the earliest pending entry.
    #[must_use]
    pub fn next_due(&self) -> Option<LogicalTime> {
        self.queue.keys().next().map(TaskToken::due)
    }

    #[must_use]
    pub fn is_pending(&self, token: TaskToken) -> bool {
        self.queue.contains_key(&token)
    }

    /// Defer `action` until `delay` logical units from now.
    ///
    /// A negative delay is ignored and returns `None`. A zero delay makes the
    /// entry due immediately: it is released by the next `tick`, including
    /// `tick(0)` or the tick currently in progress.
    pub fn schedule_after<F>(&mut self, delay: Span, action: F) -> Option<TaskToken>
    where
        F: FnOnce(&mut C, &mut Scheduler<C>) -> TaskResult + Send + 'static,
    {
        let Some(due) = time::offset(self.now, delay) else {
            tracing::debug!(delay, "ignoring negative schedule delay");
            return None;
        };
        let token = TaskToken {
            due,
            seq: self.next_seq,
        };
        self.next_seq += 1;
        self.queue.insert(token, Box::new(action));
        tracing::trace!(%token, now = self.now, "scheduled");
        Some(token)
    }

    /// Remove a pending entry. Returns `false` if the token already fired,
    /// was cancelled before, or never existed.
    pub fn cancel(&mut self, token: TaskToken) -> bool {
        let removed = self.queue.remove(&token).is_some();
        if removed {
            tracing::trace!(%token, "cancelled");
        }
        removed
    }

    /// Advance the clock by `elapsed` and release every entry now due.
    ///
    /// Returns the number of released entries. A negative `elapsed` is
    /// ignored. Errors returned by actions are logged and do not stop the
    /// remaining due entries from running.
    pub fn tick(&mut self, elapsed: Span, ctx: &mut C) -> usize {
        let Some(now) = time::offset(self.now, elapsed) else {
            tracing::debug!(elapsed, "ignoring negative tick");
            return 0;
        };
        self.now = now;

        let mut released = 0;
        while let Some(entry) = self.queue.first_entry() {
            if entry.key().due > self.now {
                break;
            }
            let (token, action) = entry.remove_entry();
            released += 1;
            if let Err(err) = action(ctx, self) {
                tracing::warn!(%token, error = %err, "scheduled action failed");
            }
        }

        if released > 0 {
            tracing::debug!(now = self.now, released, pending = self.len(), "tick");
        }
        released
    }
}

impl<C> fmt::Debug for Scheduler<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scheduler")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .field("next_due", &self.next_due())
            .finish()
    }
}

impl<C> Drop for Scheduler<C> {
    fn drop(&mut self) {
        if !self.queue.is_empty() {
            tracing::debug!(
                pending_count = self.queue.len(),
                "dropping scheduler with pending entries"
            );
        }
    }
}
