//! # Observable Store
//!
//! An in-memory keyed record store whose saves and loads can be observed.
//!
//! ## Core Concepts
//!
//! - **Records**: any type implementing [`Record`], identified by its `id`
//! - **Store**: save/load by id, plus ordered traversal with `visit`
//! - **Notifiers**: synchronous publish/subscribe channels, one for saves
//!   and one for loads, with cancellable subscriptions
//!
//! ## Example
//!
//! ```
//! use observable_store::{create_in_memory, Record};
//!
//! #[derive(Clone, Debug, PartialEq)]
//! struct Car {
//!     id: String,
//!     hp: u32,
//! }
//!
//! impl Record for Car {
//!     type Id = String;
//!
//!     fn id(&self) -> &String {
//!         &self.id
//!     }
//! }
//!
//! let cars = create_in_memory::<Car>();
//! let handle = cars.on_save().subscribe(|car: &Car| println!("saving {}", car.id));
//!
//! cars.save(Car { id: "bmw 130i".into(), hp: 265 })?;
//! handle.cancel();
//!
//! assert_eq!(cars.load("bmw 130i")?.map(|c| c.hp), Some(265));
//! cars.visit(|car| println!("{car:?}"));
//! # Ok::<(), observable_store::StoreError>(())
//! ```

pub mod error;
pub mod store;
pub mod subscriptions;
pub mod types;

// Re-exports
pub use error::{ListenerError, ListenerResult, Result, StoreError};
pub use store::{create_in_memory, Store, StoreConfig};
pub use subscriptions::{Listener, Notifier, SubscriptionHandle, SubscriptionId};
pub use types::{Database, Record};
