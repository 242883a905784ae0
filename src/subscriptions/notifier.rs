//! Listener registry and synchronous broadcast.

use crate::error::{ListenerError, ListenerResult, Result, StoreError};
use crossbeam_channel::{bounded, Receiver, TrySendError};
use parking_lot::Mutex;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};
use tracing::{trace, warn};

use super::types::{Listener, SubscriptionHandle, SubscriptionId, Unsubscribe};

/// One registration.
struct Entry<T> {
    id: SubscriptionId,
    listener: Listener<T>,
}

impl<T> Clone for Entry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            listener: Arc::clone(&self.listener),
        }
    }
}

/// Ordered listener table, shared with outstanding handles.
struct Registry<T> {
    label: String,
    entries: Mutex<Vec<Entry<T>>>,
}

impl<T> Registry<T> {
    fn snapshot(&self) -> Vec<Entry<T>> {
        self.entries.lock().clone()
    }
}

impl<T> Unsubscribe for Registry<T> {
    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut entries = self.entries.lock();
        match entries.iter().position(|entry| entry.id == id) {
            Some(pos) => {
                entries.remove(pos);
                trace!(notifier = %self.label, subscription = %id, remaining = entries.len(), "unsubscribed");
                true
            }
            None => false,
        }
    }
}

/// Broadcasts values of type `T` to subscribed listeners.
pub struct Notifier<T> {
    registry: Arc<Registry<T>>,
    /// Counter for generating subscription IDs.
    next_id: AtomicU64,
}

impl<T: 'static> Notifier<T> {
    /// Create a notifier. `label` names it in logs and errors.
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            registry: Arc::new(Registry {
                label: label.into(),
                entries: Mutex::new(Vec::new()),
            }),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn label(&self) -> &str {
        &self.registry.label
    }

    /// Append a listener to the end of the broadcast order.
    pub fn subscribe<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&T) + Send + Sync + 'static,
    {
        self.subscribe_fallible(move |value: &T| {
            listener(value);
            Ok(())
        })
    }

    /// Append a listener whose error aborts the broadcast.
    ///
    /// The error reaches whoever called [`Notifier::publish`] (and through
    /// it, `save` or `load` on the store) as [`StoreError::ListenerFailed`].
    pub fn subscribe_fallible<F>(&self, listener: F) -> SubscriptionHandle
    where
        F: Fn(&T) -> ListenerResult + Send + Sync + 'static,
    {
        let id = self.allocate_id();
        self.insert(id, Arc::new(listener))
    }

    /// Subscribe through a bounded channel.
    ///
    /// Each broadcast value is cloned into the channel. If the buffer is full
    /// or the receiver was dropped, the subscription removes itself instead
    /// of holding up the publisher.
    pub fn subscribe_channel(&self, buffer_size: usize) -> (SubscriptionHandle, Receiver<T>)
    where
        T: Clone + Send,
    {
        let id = self.allocate_id();
        let (sender, receiver) = bounded(buffer_size);
        let registry = Arc::downgrade(&self.registry);

        let listener = move |value: &T| {
            let reason = match sender.try_send(value.clone()) {
                Ok(()) => return Ok(()),
                Err(TrySendError::Full(_)) => "buffer overflow",
                Err(TrySendError::Disconnected(_)) => "receiver dropped",
            };
            if let Some(registry) = registry.upgrade() {
                warn!(notifier = %registry.label, subscription = %id, reason, "dropping channel subscriber");
                registry.unsubscribe(id);
            }
            Ok(())
        };

        (self.insert(id, Arc::new(listener)), receiver)
    }

    /// Call every listener, in subscription order, with `value`.
    ///
    /// The listener list is snapshotted first: listeners added or cancelled
    /// while the broadcast runs take effect from the next one. The first
    /// failing listener stops the broadcast and its error is returned.
    pub fn publish(&self, value: &T) -> Result<()> {
        let snapshot = self.registry.snapshot();
        trace!(notifier = %self.label(), listeners = snapshot.len(), "publish");

        for entry in &snapshot {
            if let Err(source) = (entry.listener)(value) {
                warn!(
                    notifier = %self.label(),
                    subscription = %entry.id,
                    error = %source,
                    "listener failed, broadcast aborted"
                );
                return Err(self.failure(source));
            }
        }
        Ok(())
    }

    /// Number of current registrations.
    pub fn listener_count(&self) -> usize {
        self.registry.entries.lock().len()
    }

    fn allocate_id(&self) -> SubscriptionId {
        SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn insert(&self, id: SubscriptionId, listener: Listener<T>) -> SubscriptionHandle {
        let count = {
            let mut entries = self.registry.entries.lock();
            entries.push(Entry { id, listener });
            entries.len()
        };
        trace!(notifier = %self.label(), subscription = %id, listeners = count, "subscribed");

        let weak = Arc::downgrade(&self.registry);
        let registry: Weak<dyn Unsubscribe> = weak;
        SubscriptionHandle::new(id, registry)
    }

    fn failure(&self, source: ListenerError) -> StoreError {
        StoreError::ListenerFailed {
            channel: self.label().to_string(),
            source,
        }
    }
}

impl<T> fmt::Debug for Notifier<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("label", &self.registry.label)
            .field("listeners", &self.registry.entries.lock().len())
            .finish()
    }
}
