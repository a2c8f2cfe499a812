//! Keyed debouncing of re-index requests
//!
//! Each key has its own quiet window: a trigger for `a` never cancels a
//! pending action for `b`. Within one key only the latest trigger's arguments
//! are ever passed to the action.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

type Action<K, A> = Arc<dyn Fn(K, A) + Send + Sync>;

struct Pending {
    generation: u64,
    cancel: CancellationToken,
}

type PendingMap<K> = Arc<Mutex<HashMap<K, Pending>>>;

/// Runs `action(key, args)` once `delay` has passed without another trigger
/// for the same key
pub struct Debouncer<K, A> {
    delay: Duration,
    action: Action<K, A>,
    runtime: Handle,
    pending: PendingMap<K>,
    generation: AtomicU64,
}

impl<K, A> Debouncer<K, A>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
    A: Send + 'static,
{
    /// Create a debouncer whose timers run on `runtime`
    pub fn new<F>(delay: Duration, runtime: Handle, action: F) -> Self
    where
        F: Fn(K, A) + Send + Sync + 'static,
    {
        Self {
            delay,
            action: Arc::new(action),
            runtime,
            pending: Arc::new(Mutex::new(HashMap::new())),
            generation: AtomicU64::new(0),
        }
    }

    /// Schedule the action for `key`, replacing any pending run for that key
    ///
    /// Returns immediately; the action runs on the runtime after the delay.
    pub fn trigger(&self, key: K, args: A) {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let cancel = CancellationToken::new();
        let deadline = Instant::now() + self.delay;

        let previous = lock(&self.pending).insert(
            key.clone(),
            Pending {
                generation,
                cancel: cancel.clone(),
            },
        );
        if let Some(previous) = previous {
            previous.cancel.cancel();
        }

        let pending = Arc::clone(&self.pending);
        let action = Arc::clone(&self.action);

        self.runtime.spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => return,
                _ = tokio::time::sleep_until(deadline) => {}
            }

            // A newer trigger may have landed between the timer firing and now
            {
                let mut pending = lock(&pending);
                match pending.get(&key) {
                    Some(current) if current.generation == generation => {
                        pending.remove(&key);
                    }
                    _ => return,
                }
            }

            action(key, args);
        });
    }

    /// Drop the pending run for `key`, if any
    pub fn cancel(&self, key: &K) -> bool {
        match lock(&self.pending).remove(key) {
            Some(pending) => {
                pending.cancel.cancel();
                true
            }
            None => false,
        }
    }

    /// Drop every pending run
    pub fn cancel_all(&self) {
        for (_, pending) in lock(&self.pending).drain() {
            pending.cancel.cancel();
        }
    }

    /// Number of keys with a run scheduled
    pub fn pending(&self) -> usize {
        lock(&self.pending).len()
    }

    pub fn is_pending(&self, key: &K) -> bool {
        lock(&self.pending).contains_key(key)
    }
}

impl<K, A> Drop for Debouncer<K, A> {
    fn drop(&mut self) {
        for pending in lock(&self.pending).values() {
            pending.cancel.cancel();
        }
    }
}

fn lock<K>(pending: &PendingMap<K>) -> MutexGuard<'_, HashMap<K, Pending>> {
    pending.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
