//! Property tests for traversal order and subscription bookkeeping.

use observable_store::{create_in_memory, Notifier, Record};
use parking_lot::Mutex;
use proptest::prelude::*;
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq)]
struct Item {
    id: String,
    v: u8,
}

impl Record for Item {
    type Id = String;

    fn id(&self) -> &String {
        &self.id
    }
}

proptest! {
    /// Visit order is first-insertion order; overwrites keep their slot.
    #[test]
    fn visit_follows_first_insertion(saves in prop::collection::vec(("[a-e]", any::<u8>()), 0..40)) {
        let store = create_in_memory::<Item>();
        let mut expected_order: Vec<String> = Vec::new();
        let mut latest = std::collections::HashMap::new();

        for (id, v) in &saves {
            store.save(Item { id: id.clone(), v: *v }).unwrap();
            if !expected_order.contains(id) {
                expected_order.push(id.clone());
            }
            latest.insert(id.clone(), *v);
        }

        let mut visited = Vec::new();
        store.visit(|item| visited.push(item.clone()));

        let visited_ids: Vec<String> = visited.iter().map(|i| i.id.clone()).collect();
        prop_assert_eq!(visited_ids, expected_order);
        for item in &visited {
            prop_assert_eq!(Some(&item.v), latest.get(&item.id));
        }
    }

    /// Cancelled registrations never fire; the rest fire in subscription order.
    #[test]
    fn cancelled_listeners_stay_silent(cancel in prop::collection::vec(any::<bool>(), 1..12)) {
        let notifier: Notifier<u32> = Notifier::new("prop");
        let log = Arc::new(Mutex::new(Vec::new()));

        let handles: Vec<_> = (0..cancel.len())
            .map(|n| {
                let log = Arc::clone(&log);
                notifier.subscribe(move |_: &u32| log.lock().push(n))
            })
            .collect();

        for (handle, &cancel) in handles.iter().zip(&cancel) {
            if cancel {
                prop_assert!(handle.cancel());
                prop_assert!(!handle.cancel());
            }
        }

        notifier.publish(&0).unwrap();

        let expected: Vec<usize> = (0..cancel.len()).filter(|&n| !cancel[n]).collect();
        prop_assert_eq!(notifier.listener_count(), expected.len());
        prop_assert_eq!(log.lock().clone(), expected);
    }
}
