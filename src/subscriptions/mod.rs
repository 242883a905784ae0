//! Synchronous publish/subscribe for store events.
//!
//! A [`Notifier`] keeps an ordered list of listeners for one kind of event.
//! Broadcasting calls every listener in subscription order on the caller's
//! thread, over a snapshot of the list taken when the broadcast starts.
//!
//! # Example
//!
//! ```
//! use observable_store::Notifier;
//!
//! let notifier: Notifier<String> = Notifier::new("greetings");
//! let handle = notifier.subscribe(|name: &String| println!("hello, {name}"));
//!
//! notifier.publish(&"world".to_string()).unwrap();
//! handle.cancel();
//! assert_eq!(notifier.listener_count(), 0);
//! ```

mod notifier;
mod types;

pub use notifier::Notifier;
pub use types::{Listener, SubscriptionHandle, SubscriptionId};
