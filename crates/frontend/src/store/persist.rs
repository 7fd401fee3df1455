//! Load-on-init / save-on-change for stores that survive a reload.
//!
//! Each store names the key it is saved under and the exact subset of its
//! fields that is written, through its `Snapshot` type.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::shared::storage::{Clock, KeyValueStore, LocalStore};

pub trait Persisted {
    const KEY: &'static str;
    type Snapshot: Serialize + DeserializeOwned;

    fn snapshot(&self) -> Self::Snapshot;
    fn restore(&self, snapshot: Self::Snapshot);
}

/// Restore a store from the cache. Returns `false` when nothing was saved.
pub fn load<P, S, C>(store: &P, cache: &LocalStore<S, C>) -> bool
where
    P: Persisted,
    S: KeyValueStore,
    C: Clock,
{
    match cache.get::<P::Snapshot>(P::KEY) {
        Some(snapshot) => {
            store.restore(snapshot);
            true
        }
        None => false,
    }
}

pub fn save<P, S, C>(store: &P, cache: &LocalStore<S, C>)
where
    P: Persisted,
    S: KeyValueStore,
    C: Clock,
{
    if let Err(err) = cache.set(P::KEY, &store.snapshot(), None) {
        log::error!("failed to persist {}: {}", P::KEY, err);
    }
}
