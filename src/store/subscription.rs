use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, Weak};

use crate::error::StoreError;

pub(crate) type Listener = Arc<dyn Fn() + Send + Sync>;

/// The listener registry behind a store.
///
/// Entries live in an `Arc<Vec<_>>` so a notification pass can alias the
/// list as its snapshot with a plain `Arc` clone. While that snapshot is
/// alive, the first subscribe or unsubscribe goes through [`Arc::make_mut`]
/// and copies the vector, leaving the in-flight pass untouched. A pass
/// therefore sees exactly the listeners registered strictly before its
/// transition began.
pub(crate) struct ListenerSet {
    entries: Arc<Vec<(u64, Listener)>>,
    next_id: u64,
}

impl ListenerSet {
    pub(crate) fn new() -> Self {
        Self {
            entries: Arc::new(Vec::new()),
            next_id: 0,
        }
    }

    /// Register a listener, returning its registry id.
    pub(crate) fn insert(&mut self, listener: Listener) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        Arc::make_mut(&mut self.entries).push((id, listener));
        id
    }

    pub(crate) fn contains(&self, id: u64) -> bool {
        self.entries.iter().any(|(entry_id, _)| *entry_id == id)
    }

    pub(crate) fn remove(&mut self, id: u64) {
        Arc::make_mut(&mut self.entries).retain(|(entry_id, _)| *entry_id != id);
    }

    /// Alias the current list for a notification pass.
    pub(crate) fn snapshot(&self) -> Arc<Vec<(u64, Listener)>> {
        Arc::clone(&self.entries)
    }
}

/// Handle returned by [`Store::subscribe`](crate::Store::subscribe).
///
/// Unsubscribing is explicit and idempotent: the second and later calls are
/// no-ops. Dropping the handle does *not* remove the listener; it stays
/// registered for the lifetime of the store.
pub struct Subscription {
    id: u64,
    listeners: Weak<Mutex<ListenerSet>>,
    reducing: Weak<AtomicBool>,
}

impl Subscription {
    pub(crate) fn new(
        id: u64,
        listeners: Weak<Mutex<ListenerSet>>,
        reducing: Weak<AtomicBool>,
    ) -> Self {
        Self {
            id,
            listeners,
            reducing,
        }
    }

    /// Remove the listener this handle was returned for.
    ///
    /// A second call, or a call after the store has been dropped, is a
    /// no-op. Fails with [`StoreError::UnsubscribeInReducer`] only when a
    /// still-registered listener is removed while the reducer is executing.
    pub fn unsubscribe(&self) -> Result<(), StoreError> {
        let Some(listeners) = self.listeners.upgrade() else {
            return Ok(());
        };
        let mut set = listeners.lock().unwrap();
        if !set.contains(self.id) {
            return Ok(());
        }
        if let Some(reducing) = self.reducing.upgrade() {
            if reducing.load(Ordering::SeqCst) {
                return Err(StoreError::UnsubscribeInReducer);
            }
        }
        set.remove(self.id);
        Ok(())
    }
}
