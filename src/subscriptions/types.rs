//! Subscription types shared by every notifier.

use crate::error::ListenerResult;
use std::fmt;
use std::sync::{Arc, Weak};

/// Callback invoked with each broadcast value.
pub type Listener<T> = Arc<dyn Fn(&T) -> ListenerResult + Send + Sync>;

/// Unique identifier for one registration on a notifier.
///
/// Registering the same callback twice yields two distinct ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Debug for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SubscriptionId({})", self.0)
    }
}

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Removes a registration by id. Implemented by the notifier's listener table
/// so handles need not carry the notifier's value type.
pub(crate) trait Unsubscribe: Send + Sync {
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

/// Handle to cancel one registration.
///
/// Dropping the handle leaves the listener subscribed.
pub struct SubscriptionHandle {
    pub id: SubscriptionId,
    registry: Weak<dyn Unsubscribe>,
}

impl SubscriptionHandle {
    pub(crate) fn new(id: SubscriptionId, registry: Weak<dyn Unsubscribe>) -> Self {
        Self { id, registry }
    }

    /// Remove this registration from its notifier.
    ///
    /// Returns `true` only for the call that actually removed it. Cancelling
    /// again, or after the notifier is gone, does nothing.
    pub fn cancel(&self) -> bool {
        match self.registry.upgrade() {
            Some(registry) => registry.unsubscribe(self.id),
            None => false,
        }
    }
}

impl fmt::Debug for SubscriptionHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SubscriptionHandle")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}
