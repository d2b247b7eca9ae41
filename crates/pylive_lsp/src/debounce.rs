//! Debouncing utilities for editor events.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::AbortHandle;

/// Default debounce delay in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

struct Pending {
    generation: u64,
    handle: AbortHandle,
}

struct Inner<K> {
    pending: HashMap<K, Pending>,
    next_generation: u64,
}

/// Keeps at most one armed timer per key.
///
/// Scheduling aborts the key's pending timer and arms a new one. Once a
/// timer fires its action is detached from the debouncer, so a later
/// `schedule` never interrupts an action that has already started.
pub struct Debouncer<K> {
    inner: Arc<Mutex<Inner<K>>>,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                pending: HashMap::new(),
                next_generation: 0,
            })),
        }
    }

    /// Arms `action` to run after `delay`, superseding any pending action for `key`.
    pub fn schedule<F>(&self, key: K, delay: Duration, action: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        // Held across the spawn so the timer cannot fire before it is registered.
        let mut inner = self.inner.lock();
        inner.next_generation += 1;
        let generation = inner.next_generation;

        let shared = Arc::clone(&self.inner);
        let timer_key = key.clone();
        let task = tokio::spawn(async move {
            tokio::time::sleep(delay).await;

            {
                let mut inner = shared.lock();
                let is_latest = inner
                    .pending
                    .get(&timer_key)
                    .is_some_and(|p| p.generation == generation);
                if !is_latest {
                    return;
                }
                inner.pending.remove(&timer_key);
            }

            action.await;
        });

        let pending = Pending {
            generation,
            handle: task.abort_handle(),
        };
        if let Some(previous) = inner.pending.insert(key, pending) {
            previous.handle.abort();
        }
    }

    /// Disarms the pending action for `key`, if any.
    pub fn cancel(&self, key: &K) -> bool {
        match self.inner.lock().pending.remove(key) {
            Some(previous) => {
                previous.handle.abort();
                true
            }
            None => false,
        }
    }

    /// Number of armed timers.
    pub fn pending_count(&self) -> usize {
        self.inner.lock().pending.len()
    }
}

impl<K> Default for Debouncer<K>
where
    K: Eq + Hash + Clone + Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
