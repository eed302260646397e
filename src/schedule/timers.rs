//! Deadline table with one-shot and repeating timers

use std::collections::BTreeMap;
use std::time::Duration;

use tokio::time::Instant;
use tracing::debug;

/// Handle for a scheduled entry, used to cancel it
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

#[derive(Debug)]
struct Entry<C> {
    due: Instant,
    period: Option<Duration>,
    cue: C,
}

/// Outstanding timers, keyed by creation order.
///
/// `pop_due` yields the earliest deadline first; entries sharing a deadline
/// fire in the order they were scheduled.
#[derive(Debug)]
pub struct Scheduler<C> {
    next_id: u64,
    entries: BTreeMap<TimerId, Entry<C>>,
}

impl<C: Clone> Scheduler<C> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Fire `cue` once, `delay` after `now`
    pub fn after(&mut self, now: Instant, delay: Duration, cue: C) -> TimerId {
        self.insert(Entry {
            due: now + delay,
            period: None,
            cue,
        })
    }

    /// Fire `cue` every `period`, first at `now + period`
    pub fn every(&mut self, now: Instant, period: Duration, cue: C) -> TimerId {
        // A zero period would spin forever inside pop_due
        let period = period.max(Duration::from_millis(1));
        self.insert(Entry {
            due: now + period,
            period: Some(period),
            cue,
        })
    }

    fn insert(&mut self, entry: Entry<C>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.insert(id, entry);
        id
    }

    /// Cancel one entry. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        self.entries.remove(&id).is_some()
    }

    /// Cancel everything, returning how many entries were dropped
    pub fn cancel_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        if count > 0 {
            debug!(count, "cancelled all timers");
        }
        count
    }

    pub fn pending(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.contains_key(&id)
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.values().map(|e| e.due).min()
    }

    /// Take the earliest entry due at or before `now`.
    ///
    /// Repeating entries stay in the table with their deadline moved one
    /// period forward, so a late caller catches up tick by tick.
    pub fn pop_due(&mut self, now: Instant) -> Option<(Instant, TimerId, C)> {
        let (&id, _) = self
            .entries
            .iter()
            .filter(|(_, e)| e.due <= now)
            .min_by_key(|(id, e)| (e.due, **id))?;

        let entry = self.entries.get_mut(&id)?;
        let due = entry.due;
        match entry.period {
            Some(period) => {
                entry.due = due + period;
                Some((due, id, entry.cue.clone()))
            }
            None => {
                let entry = self.entries.remove(&id)?;
                Some((due, id, entry.cue))
            }
        }
    }
}

impl<C: Clone> Default for Scheduler<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_one_shot_fires_once() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new();
        sched.after(t0, ms(100), "a");

        assert!(sched.pop_due(t0 + ms(99)).is_none());
        let (due, _, cue) = sched.pop_due(t0 + ms(100)).unwrap();
        assert_eq!(due, t0 + ms(100));
        assert_eq!(cue, "a");
        assert!(sched.pop_due(t0 + ms(1000)).is_none());
        assert_eq!(sched.pending(), 0);
    }

    #[test]
    fn test_deadline_order_then_schedule_order() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new();
        sched.after(t0, ms(300), "late");
        sched.after(t0, ms(100), "first");
        sched.after(t0, ms(100), "second");

        let order: Vec<_> = std::iter::from_fn(|| sched.pop_due(t0 + ms(500)))
            .map(|(_, _, cue)| cue)
            .collect();
        assert_eq!(order, vec!["first", "second", "late"]);
    }

    #[test]
    fn test_repeating_catches_up() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new();
        let id = sched.every(t0, ms(150), "tick");

        let mut fired = 0;
        while sched.pop_due(t0 + ms(600)).is_some() {
            fired += 1;
        }
        assert_eq!(fired, 4);
        assert!(sched.is_scheduled(id));
        assert_eq!(sched.next_deadline(), Some(t0 + ms(750)));
    }

    #[test]
    fn test_cancel() {
        let t0 = Instant::now();
        let mut sched = Scheduler::new();
        let a = sched.after(t0, ms(10), 1);
        let b = sched.every(t0, ms(10), 2);

        assert!(sched.cancel(a));
        assert!(!sched.cancel(a));
        assert_eq!(sched.pending(), 1);
        assert_eq!(sched.pop_due(t0 + ms(10)).map(|(_, id, _)| id), Some(b));
        assert_eq!(sched.cancel_all(), 1);
        assert_eq!(sched.pending(), 0);
        assert_eq!(sched.next_deadline(), None);
    }
}
