//! `localStorage`-backed key/value store.
//!
//! Values are stored as plain strings under the bare key names so sessions
//! written by earlier builds of the site keep working.

use crate::core::storage::KeyValueStore;
use gloo::console;
use gloo::storage::{LocalStorage, Storage};

#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct BrowserStorage;

impl KeyValueStore for BrowserStorage {
    fn get(&self, key: &str) -> Option<String> {
        LocalStorage::raw().get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) {
        if let Err(err) = LocalStorage::raw().set_item(key, value) {
            log_storage_error("set", key, &format!("{err:?}"));
        }
    }

    fn delete(&self, key: &str) {
        if let Err(err) = LocalStorage::raw().remove_item(key) {
            log_storage_error("delete", key, &format!("{err:?}"));
        }
    }
}

fn log_storage_error(operation: &'static str, key: &str, detail: &str) {
    console::error!("storage operation failed", operation, key, detail);
}
