//! Timer queue
//!
//! One-shot `setTimeout`-style timers against a monotonic clock that only
//! moves when the owner advances it.

use std::collections::{BTreeMap, HashMap};
use std::time::Duration;

use crate::Page;

/// Callback run when a timer fires
pub type TimerCallback = Box<dyn FnOnce(&mut Page)>;

/// Handle returned by `set_timeout`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

/// Timer manager
#[derive(Default)]
pub struct TimerManager {
    now: Duration,
    /// Ordered by deadline, then by scheduling order
    queue: BTreeMap<(Duration, TimerId), TimerCallback>,
    deadlines: HashMap<TimerId, Duration>,
    next_id: u64,
}

impl TimerManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current clock value
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Schedule `callback` to run once `delay` has elapsed
    pub fn set_timeout(&mut self, delay: Duration, callback: TimerCallback) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        let deadline = self.now.saturating_add(delay);
        self.queue.insert((deadline, id), callback);
        self.deadlines.insert(id, deadline);
        id
    }

    /// Cancel a pending timer. Returns false if it already fired or never existed.
    pub fn clear(&mut self, id: TimerId) -> bool {
        match self.deadlines.remove(&id) {
            Some(deadline) => self.queue.remove(&(deadline, id)).is_some(),
            None => false,
        }
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.deadlines.contains_key(&id)
    }

    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.len()
    }

    /// Deadline of the next timer
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.keys().next().map(|&(deadline, _)| deadline)
    }

    /// Time until the next timer fires
    pub fn time_until_next(&self) -> Option<Duration> {
        self.next_deadline().map(|d| d.saturating_sub(self.now))
    }

    /// Take the earliest timer due at or before `until`, moving the clock to
    /// its deadline.
    pub(crate) fn pop_due(&mut self, until: Duration) -> Option<(TimerId, TimerCallback)> {
        let &(deadline, id) = self.queue.keys().next()?;
        if deadline > until {
            return None;
        }
        let callback = self.queue.remove(&(deadline, id))?;
        self.deadlines.remove(&id);
        self.now = self.now.max(deadline);
        Some((id, callback))
    }

    /// Move the clock forward; never backwards
    pub(crate) fn set_now(&mut self, now: Duration) {
        self.now = self.now.max(now);
    }
}

impl std::fmt::Debug for TimerManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerManager")
            .field("now", &self.now)
            .field("pending", &self.queue.len())
            .finish()
    }
}
