use std::collections::HashMap;
use std::hash::Hash;
use std::sync::{Arc, MutexGuard, PoisonError};

/// A mutex that recovers the data of a poisoned lock instead of failing.
#[derive(Default)]
pub struct Mutex<T>(std::sync::Mutex<T>);

impl<T> Mutex<T> {
    pub const fn new(value: T) -> Self {
        Self(std::sync::Mutex::new(value))
    }

    pub fn lock(&self) -> MutexGuard<'_, T> {
        self.0.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// One lock per key, created on first use and dropped once no caller holds
/// or waits on it.
///
/// Holders of the same key run one at a time; different keys never contend
/// beyond the brief registry lookup.
pub struct KeyedLocks<K> {
    locks: Mutex<HashMap<K, Arc<Mutex<()>>>>,
}

impl<K: Eq + Hash + Copy> KeyedLocks<K> {
    pub fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Runs `f` while holding the lock for `key`.
    pub fn with<R>(&self, key: K, f: impl FnOnce() -> R) -> R {
        let lock = Arc::clone(self.locks.lock().entry(key).or_default());
        let result = {
            let _guard = lock.lock();
            f()
        };

        // Waiters clone under the registry lock, so the count is stable here.
        let mut locks = self.locks.lock();
        drop(lock);
        if locks.get(&key).is_some_and(|l| Arc::strong_count(l) == 1) {
            locks.remove(&key);
        }
        drop(locks);

        result
    }
}

impl<K: Eq + Hash + Copy> Default for KeyedLocks<K> {
    fn default() -> Self {
        Self::new()
    }
}
