//! Deferred events on a caller-driven clock
//!
//! Times are offsets from an arbitrary origin (typically the start of the
//! session). Nothing here reads the system clock: the owner passes the
//! current time to `pop_due`, which keeps the queue deterministic in tests.

use std::time::Duration;

/// Handle for cancelling a scheduled event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Pending<E> {
    id: TimerId,
    due: Duration,
    event: E,
}

/// Queue of events waiting for their due time
#[derive(Debug, Clone)]
pub struct Timers<E> {
    next_id: u64,
    pending: Vec<Pending<E>>,
}

impl<E> Default for Timers<E> {
    fn default() -> Self {
        Self {
            next_id: 0,
            pending: Vec::new(),
        }
    }
}

impl<E> Timers<E> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` to fire once the clock reaches `due`
    pub fn schedule(&mut self, due: Duration, event: E) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending.push(Pending { id, due, event });
        id
    }

    /// Drop a pending event; returns false if it already fired or was cancelled
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.pending.len();
        self.pending.retain(|p| p.id != id);
        self.pending.len() != before
    }

    pub fn cancel_all(&mut self) {
        self.pending.clear();
    }

    /// Remove and return the earliest event due at or before `now`
    ///
    /// Events with the same due time come out in scheduling order.
    pub fn pop_due(&mut self, now: Duration) -> Option<(Duration, E)> {
        let index = self
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due <= now)
            .min_by_key(|(_, p)| (p.due, p.id))
            .map(|(i, _)| i)?;

        let Pending { due, event, .. } = self.pending.swap_remove(index);
        Some((due, event))
    }

    /// When the next event becomes due
    #[must_use]
    pub fn next_due(&self) -> Option<Duration> {
        self.pending.iter().map(|p| p.due).min()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const fn secs(s: u64) -> Duration {
        Duration::from_secs(s)
    }

    #[test]
    fn nothing_fires_early() {
        let mut timers = Timers::new();
        timers.schedule(secs(2), "ready");
        assert_eq!(timers.pop_due(secs(1)), None);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn fires_in_due_order() {
        let mut timers = Timers::new();
        timers.schedule(secs(3), "c");
        timers.schedule(secs(1), "a");
        timers.schedule(secs(2), "b");

        assert_eq!(timers.next_due(), Some(secs(1)));
        assert_eq!(timers.pop_due(secs(5)), Some((secs(1), "a")));
        assert_eq!(timers.pop_due(secs(5)), Some((secs(2), "b")));
        assert_eq!(timers.pop_due(secs(5)), Some((secs(3), "c")));
        assert_eq!(timers.pop_due(secs(5)), None);
        assert!(timers.is_empty());
    }

    #[test]
    fn ties_fire_in_scheduling_order() {
        let mut timers = Timers::new();
        timers.schedule(secs(1), 1);
        timers.schedule(secs(1), 2);
        timers.schedule(secs(1), 3);

        let fired: Vec<_> = std::iter::from_fn(|| timers.pop_due(secs(1)))
            .map(|(_, e)| e)
            .collect();
        assert_eq!(fired, vec![1, 2, 3]);
    }

    #[test]
    fn cancelled_event_never_fires() {
        let mut timers = Timers::new();
        let id = timers.schedule(secs(1), "ready");
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert_eq!(timers.pop_due(secs(10)), None);
    }

    #[test]
    fn cancel_all_clears_queue() {
        let mut timers = Timers::new();
        timers.schedule(secs(1), "tick");
        timers.schedule(secs(2), "tick");
        timers.cancel_all();
        assert!(timers.is_empty());
        assert_eq!(timers.next_due(), None);
    }
}
