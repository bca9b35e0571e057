//! In-memory cache with per-entry expiry timers.
//!
//! Every `set` schedules a one-shot eviction for `now + ttl`. Entries are
//! removed by their own timer, never by a check on read, so an entry is
//! dropped exactly once. Overwriting a key drops the previous entry together
//! with its timer handle, which cancels the old eviction.

pub mod scheduler;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};
use std::time::Duration;

pub use scheduler::{BrowserScheduler, Scheduler};

struct Slot<V, H> {
    value: V,
    generation: u64,
    /// Dropping the handle cancels the pending eviction
    eviction: H,
}

type Entries<V, H> = Rc<RefCell<HashMap<String, Slot<V, H>>>>;

pub struct CacheStore<V, S: Scheduler = BrowserScheduler> {
    entries: Entries<V, S::Handle>,
    scheduler: S,
    next_generation: Cell<u64>,
}

impl<V: Clone + 'static> CacheStore<V, BrowserScheduler> {
    pub fn new() -> Self {
        Self::with_scheduler(BrowserScheduler)
    }
}

impl<V: Clone + 'static> Default for CacheStore<V, BrowserScheduler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone + 'static, S: Scheduler> CacheStore<V, S> {
    pub fn with_scheduler(scheduler: S) -> Self {
        Self {
            entries: Rc::new(RefCell::new(HashMap::new())),
            scheduler,
            next_generation: Cell::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<V> {
        self.entries.borrow().get(key).map(|slot| slot.value.clone())
    }

    /// Store `value` and schedule its removal after `ttl`
    pub fn set(&self, key: impl Into<String>, value: V, ttl: Duration) {
        let key = key.into();
        let generation = self.next_generation.get() + 1;
        self.next_generation.set(generation);

        let eviction = self.scheduler.schedule(
            ttl,
            Box::new(evict_task::<V, S>(
                Rc::downgrade(&self.entries),
                key.clone(),
                generation,
            )),
        );

        let replaced = self.entries.borrow_mut().insert(
            key,
            Slot {
                value,
                generation,
                eviction,
            },
        );
        // Old timer is cancelled here, outside the borrow
        drop(replaced);
    }

    /// Remove everything and cancel all pending evictions
    pub fn clear(&self) {
        let drained: Vec<_> = self.entries.borrow_mut().drain().collect();
        log::debug!("cache cleared ({} entries)", drained.len());
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

fn evict_task<V: 'static, S: Scheduler>(
    entries: Weak<RefCell<HashMap<String, Slot<V, S::Handle>>>>,
    key: String,
    generation: u64,
) -> impl FnOnce() + 'static {
    move || {
        let Some(entries) = entries.upgrade() else {
            return;
        };
        let removed = {
            let mut map = entries.borrow_mut();
            let is_current = map.get(&key).map(|slot| slot.generation) == Some(generation);
            if is_current {
                map.remove(&key)
            } else {
                None
            }
        };
        if let Some(slot) = removed {
            log::debug!("cache entry expired: {}", key);
            S::release_fired(slot.eviction);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::scheduler::manual::ManualScheduler;
    use super::*;

    fn cache() -> (CacheStore<String, ManualScheduler>, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        (CacheStore::with_scheduler(scheduler.clone()), scheduler)
    }

    #[test]
    fn test_get_before_and_after_ttl() {
        let (cache, clock) = cache();
        cache.set("k", "v".to_string(), Duration::from_millis(100));

        assert_eq!(cache.get("k"), Some("v".to_string()));

        clock.advance(Duration::from_millis(150));
        assert_eq!(cache.get("k"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_entry_alive_until_deadline() {
        let (cache, clock) = cache();
        cache.set("k", "v".to_string(), Duration::from_millis(100));

        clock.advance(Duration::from_millis(99));
        assert_eq!(cache.get("k"), Some("v".to_string()));

        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_overwrite_replaces_timer() {
        let (cache, clock) = cache();
        cache.set("k", "old".to_string(), Duration::from_millis(100));
        clock.advance(Duration::from_millis(80));

        cache.set("k", "new".to_string(), Duration::from_millis(100));
        assert_eq!(clock.pending(), 1);

        // First timer's deadline passes without evicting the new entry
        clock.advance(Duration::from_millis(50));
        assert_eq!(cache.get("k"), Some("new".to_string()));

        clock.advance(Duration::from_millis(50));
        assert_eq!(cache.get("k"), None);
    }

    #[test]
    fn test_clear_cancels_pending_evictions() {
        let (cache, clock) = cache();
        cache.set("a", "1".to_string(), Duration::from_secs(300));
        cache.set("b", "2".to_string(), Duration::from_secs(300));
        assert_eq!(cache.len(), 2);
        assert_eq!(clock.pending(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(clock.pending(), 0);

        // Re-set after clear is not hit by stale timers
        cache.set("a", "3".to_string(), Duration::from_secs(600));
        clock.advance(Duration::from_secs(301));
        assert_eq!(cache.get("a"), Some("3".to_string()));
    }

    #[test]
    fn test_keys_expire_independently() {
        let (cache, clock) = cache();
        cache.set("short", "1".to_string(), Duration::from_millis(10));
        cache.set("long", "2".to_string(), Duration::from_millis(1000));

        clock.advance(Duration::from_millis(20));
        assert_eq!(cache.get("short"), None);
        assert_eq!(cache.get("long"), Some("2".to_string()));
    }
}
