//! Expiring key-value cache on top of `localStorage`.
//!
//! Values are stored as `{value, time, expire}` JSON and then wrapped with a
//! reversible Base64 encoding. The wrapping only keeps values from being
//! readable at a glance in dev tools; it is not encryption.

use std::cell::RefCell;
use std::collections::HashMap;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use web_sys::window;

/// Default lifetime of a cached value: 7 days.
pub const DEFAULT_EXPIRE_SECS: u64 = 60 * 60 * 24 * 7;

const SECRET_PREFIX: &str = "__SecretKey__";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to serialize value: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("stored value is not valid base64: {0}")]
    Encoding(#[from] base64::DecodeError),
    #[error("stored value is not valid UTF-8")]
    Utf8,
    #[error("stored value is missing its prefix")]
    Prefix,
}

/// Raw string storage.
pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
    fn clear(&self);
}

/// Milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}

/// `window.localStorage`, looked up on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn get_local_storage() -> Option<web_sys::Storage> {
    window()?.local_storage().ok()?
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        get_local_storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        if let Some(storage) = get_local_storage() {
            if storage.set_item(key, value).is_err() {
                log::warn!("localStorage rejected key {:?}", key);
            }
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.remove_item(key);
        }
    }

    fn clear(&self) {
        if let Some(storage) = get_local_storage() {
            let _ = storage.clear();
        }
    }
}

/// In-process storage, used off the browser.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl MemoryStorage {
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }

    fn clear(&self) {
        self.items.borrow_mut().clear();
    }
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for std::rc::Rc<T> {
    fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) {
        (**self).remove_item(key)
    }

    fn clear(&self) {
        (**self).clear()
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Entry {
    value: Value,
    time: i64,
    expire: Option<i64>,
}

pub fn encode(plain: &str) -> String {
    STANDARD.encode(format!("{}{}", SECRET_PREFIX, plain))
}

pub fn decode(cipher: &str) -> Result<String, StorageError> {
    let bytes = STANDARD.decode(cipher)?;
    let text = String::from_utf8(bytes).map_err(|_| StorageError::Utf8)?;
    text.strip_prefix(SECRET_PREFIX)
        .map(str::to_string)
        .ok_or(StorageError::Prefix)
}

/// Expiring JSON cache.
#[derive(Debug, Clone, Default)]
pub struct LocalStore<S = BrowserStorage, C = SystemClock> {
    storage: S,
    clock: C,
}

impl LocalStore {
    pub fn browser() -> Self {
        Self::default()
    }
}

impl<S: KeyValueStore, C: Clock> LocalStore<S, C> {
    pub fn new(storage: S, clock: C) -> Self {
        Self { storage, clock }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Store `value` for `expire_secs` seconds; `None`, `0` or a lifetime past
    /// the representable range never expires.
    pub fn set<T: Serialize>(&self, key: &str, value: &T, expire_secs: Option<u64>) -> Result<(), StorageError> {
        let now = self.clock.now_millis();
        let entry = Entry {
            value: serde_json::to_value(value)?,
            time: now,
            expire: expire_secs
                .filter(|secs| *secs > 0)
                .and_then(|secs| i64::try_from(secs).ok())
                .and_then(|secs| secs.checked_mul(1000))
                .and_then(|millis| now.checked_add(millis)),
        };
        let json = serde_json::to_string(&entry)?;
        self.storage.set_item(key, &encode(&json));
        Ok(())
    }

    /// Read a live value. Expired or unreadable entries are removed.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = self.storage.get_item(key)?;
        let entry = decode(&raw)
            .ok()
            .and_then(|json| serde_json::from_str::<Entry>(&json).ok());

        let Some(entry) = entry else {
            log::warn!("dropping unreadable cache entry {:?}", key);
            self.remove(key);
            return None;
        };
        if entry.expire.is_some_and(|expire| expire <= self.clock.now_millis()) {
            self.remove(key);
            return None;
        }
        match serde_json::from_value(entry.value) {
            Ok(value) => Some(value),
            Err(err) => {
                log::warn!("cache entry {:?} has unexpected shape: {}", key, err);
                None
            }
        }
    }

    pub fn remove(&self, key: &str) {
        self.storage.remove_item(key);
    }

    pub fn clear(&self) {
        self.storage.clear();
    }
}

#[cfg(test)]
pub mod testing {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::Clock;

    /// Clock advanced by hand.
    #[derive(Debug, Clone, Default)]
    pub struct ManualClock(Rc<Cell<i64>>);

    impl ManualClock {
        pub fn advance_secs(&self, secs: i64) {
            self.0.set(self.0.get() + secs * 1000);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> i64 {
            self.0.get()
        }
    }
}
