//! Key-value persistence port.
//!
//! The page keeps a handful of string values across reloads (login flag,
//! username, theme, coupon balance). Everything above this module talks to
//! [`KeyValueStore`]; the browser's `localStorage` is only one adapter.

use std::collections::HashMap;

pub const KEY_LOGGED_IN: &str = "isLoggedIn";
pub const KEY_USERNAME: &str = "username";
pub const KEY_THEME: &str = "farmTheme";
pub const KEY_COUPONS: &str = "globalCouponCount";

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);
}

/// In-memory store for native builds and tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populated store, e.g. to simulate a returning visitor.
    #[cfg(test)]
    pub fn with(entries: &[(&str, &str)]) -> Self {
        let values = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self { values }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.values.remove(key);
    }
}

/// `window.localStorage`. A missing or blocked storage (private browsing,
/// quota) degrades to "nothing persisted" with a console warning.
#[cfg(target_arch = "wasm32")]
pub struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            web_sys::console::warn_1(&"無法使用 localStorage，設定將不會被保存。".into());
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage.as_ref()?.get_item(key).ok().flatten()
    }

    fn set(&mut self, key: &str, value: &str) {
        let Some(storage) = self.storage.as_ref() else {
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            web_sys::console::warn_1(&format!("localStorage 寫入失敗 ({key}): {e:?}").into());
        }
    }

    fn remove(&mut self, key: &str) {
        if let Some(storage) = self.storage.as_ref() {
            let _ = storage.remove_item(key);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn memory_store_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get(KEY_COUPONS), None);

        store.set(KEY_COUPONS, "2");
        assert_eq!(store.get(KEY_COUPONS).as_deref(), Some("2"));

        store.set(KEY_COUPONS, "3");
        assert_eq!(store.get(KEY_COUPONS).as_deref(), Some("3"));

        store.remove(KEY_COUPONS);
        assert_eq!(store.get(KEY_COUPONS), None);
    }

    #[test]
    fn prepopulated_store() {
        let store = MemoryStore::with(&[(KEY_THEME, "night"), (KEY_USERNAME, "admin")]);
        assert_eq!(store.get(KEY_THEME).as_deref(), Some("night"));
        assert_eq!(store.get(KEY_USERNAME).as_deref(), Some("admin"));
    }
}
