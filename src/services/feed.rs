//! Snapshot publish/subscribe
//!
//! After each change to the expense store the full record set is pushed to
//! every live subscriber. Each subscriber keeps only the newest snapshot it
//! has not read yet; publishing overwrites whatever was waiting.

use std::sync::{Arc, Condvar, Mutex, MutexGuard, PoisonError, Weak};
use std::time::Duration;

use tracing::debug;

use crate::models::Expense;

/// Immutable view of every stored expense at one instant
pub type Snapshot = Arc<Vec<Expense>>;

/// Latest-value cell shared between the feed and one subscription
#[derive(Default)]
struct Slot {
    pending: Mutex<Option<Snapshot>>,
    ready: Condvar,
}

impl Slot {
    fn lock(&self) -> MutexGuard<'_, Option<Snapshot>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn put(&self, snapshot: Snapshot) {
        *self.lock() = Some(snapshot);
        self.ready.notify_all();
    }
}

/// Fan-out point for store snapshots
#[derive(Default)]
pub struct SnapshotFeed {
    subscribers: Mutex<Vec<Weak<Slot>>>,
}

impl SnapshotFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new subscriber
    pub fn subscribe(&self) -> Subscription {
        let slot = Arc::new(Slot::default());
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::downgrade(&slot));
        Subscription { slot }
    }

    /// Whether anyone is listening
    pub fn has_subscribers(&self) -> bool {
        self.subscriber_count() > 0
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Hand a snapshot to every subscriber, dropping those that went away
    ///
    /// Returns the number of subscribers reached.
    pub fn publish(&self, expenses: Vec<Expense>) -> usize {
        let snapshot: Snapshot = Arc::new(expenses);
        let mut subscribers = self
            .subscribers
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        let before = subscribers.len();
        subscribers.retain(|weak| match weak.upgrade() {
            Some(slot) => {
                slot.put(Arc::clone(&snapshot));
                true
            }
            None => false,
        });
        let delivered = subscribers.len();

        debug!(
            records = snapshot.len(),
            delivered,
            pruned = before - delivered,
            "published snapshot"
        );
        delivered
    }
}

/// Receiving end of a [`SnapshotFeed`]
pub struct Subscription {
    slot: Arc<Slot>,
}

impl Subscription {
    /// Newest snapshot published since the last read, if any
    pub fn latest(&self) -> Option<Snapshot> {
        self.slot.lock().take()
    }

    /// Block until a snapshot is available (or `timeout` passes) and take it
    pub fn wait_latest(&self, timeout: Duration) -> Option<Snapshot> {
        let guard = self.slot.lock();
        let (mut pending, _) = self
            .slot
            .ready
            .wait_timeout_while(guard, timeout, |pending| pending.is_none())
            .unwrap_or_else(PoisonError::into_inner);
        pending.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use std::thread;

    fn snapshot_of(n: usize) -> Vec<Expense> {
        (0..n)
            .map(|i| Expense::new(Money::from_cents(100 + i as i64), "Food", "x"))
            .collect()
    }

    #[test]
    fn test_no_snapshot_before_publish() {
        let feed = SnapshotFeed::new();
        let sub = feed.subscribe();
        assert!(sub.latest().is_none());
    }

    #[test]
    fn test_latest_skips_intermediate_snapshots() {
        let feed = SnapshotFeed::new();
        let sub = feed.subscribe();

        feed.publish(snapshot_of(1));
        feed.publish(snapshot_of(2));
        feed.publish(snapshot_of(3));

        assert_eq!(sub.latest().unwrap().len(), 3);
        assert!(sub.latest().is_none());
    }

    #[test]
    fn test_idle_subscriber_keeps_only_newest() {
        let feed = SnapshotFeed::new();
        let reader = feed.subscribe();
        let idle = feed.subscribe();

        feed.publish(snapshot_of(1));
        let first = reader.latest().unwrap();
        assert_eq!(Arc::strong_count(&first), 2);

        for n in 2..=1000 {
            feed.publish(snapshot_of(n % 5));
        }

        // the idle subscriber no longer holds the first snapshot
        assert_eq!(Arc::strong_count(&first), 1);
        assert_eq!(idle.latest().unwrap().len(), 0);
        assert!(idle.latest().is_none());
    }

    #[test]
    fn test_wait_latest_wakes_on_publish() {
        let feed = Arc::new(SnapshotFeed::new());
        let sub = feed.subscribe();

        let publisher = {
            let feed = Arc::clone(&feed);
            thread::spawn(move || {
                thread::sleep(Duration::from_millis(20));
                feed.publish(snapshot_of(2));
            })
        };

        assert_eq!(sub.wait_latest(Duration::from_secs(5)).unwrap().len(), 2);
        publisher.join().unwrap();
    }

    #[test]
    fn test_every_subscriber_receives() {
        let feed = SnapshotFeed::new();
        let a = feed.subscribe();
        let b = feed.subscribe();

        assert_eq!(feed.publish(snapshot_of(2)), 2);
        assert_eq!(a.latest().unwrap().len(), 2);
        assert_eq!(b.latest().unwrap().len(), 2);
    }

    #[test]
    fn test_dropped_subscribers_are_pruned() {
        let feed = SnapshotFeed::new();
        let kept = feed.subscribe();
        drop(feed.subscribe());
        assert_eq!(feed.subscriber_count(), 2);

        assert_eq!(feed.publish(snapshot_of(1)), 1);
        assert_eq!(feed.subscriber_count(), 1);
        assert!(kept.latest().is_some());
    }

    #[test]
    fn test_wait_latest_times_out() {
        let feed = SnapshotFeed::new();
        let sub = feed.subscribe();
        assert!(sub.wait_latest(Duration::from_millis(10)).is_none());
    }

    #[test]
    fn test_wait_latest_across_threads() {
        let feed = Arc::new(SnapshotFeed::new());
        let sub = feed.subscribe();

        let publisher = {
            let feed = Arc::clone(&feed);
            thread::spawn(move || {
                feed.publish(snapshot_of(1));
                feed.publish(snapshot_of(4));
            })
        };
        publisher.join().unwrap();

        assert_eq!(sub.wait_latest(Duration::from_secs(1)).unwrap().len(), 4);
    }
}
