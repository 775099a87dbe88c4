use std::sync::{Arc, Mutex, Weak};

use super::events::StoreEvent;

type ObserverCallback = Arc<dyn Fn(&StoreEvent) + Send + Sync + 'static>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    entries: Vec<(u64, ObserverCallback)>,
}

/// Observer fan-out in registration order. The entry list is snapshotted
/// before dispatch, so a callback may unsubscribe itself (or anyone else)
/// mid-notification without invalidating the iteration.
#[derive(Clone, Default)]
pub(crate) struct SharedObservers {
    registry: Arc<Mutex<Registry>>,
}

impl SharedObservers {
    pub fn subscribe<F>(&self, callback: F) -> ObserverHandle
    where
        F: Fn(&StoreEvent) + Send + Sync + 'static,
    {
        let mut registry = self.registry.lock().unwrap();
        let id = registry.next_id;
        registry.next_id += 1;
        registry.entries.push((id, Arc::new(callback)));
        ObserverHandle {
            id,
            registry: Arc::downgrade(&self.registry),
        }
    }

    pub fn notify(&self, event: &StoreEvent) {
        let callbacks: Vec<ObserverCallback> = {
            let registry = self.registry.lock().unwrap();
            registry
                .entries
                .iter()
                .map(|(_, callback)| Arc::clone(callback))
                .collect()
        };

        for callback in callbacks {
            callback(event);
        }
    }
}

/// Returned by `subscribe`; dropping it leaves the observer registered.
pub struct ObserverHandle {
    id: u64,
    registry: Weak<Mutex<Registry>>,
}

impl ObserverHandle {
    pub fn unsubscribe(self) {
        if let Some(registry) = self.registry.upgrade() {
            let mut registry = registry.lock().unwrap();
            registry.entries.retain(|(id, _)| *id != self.id);
        }
    }
}
