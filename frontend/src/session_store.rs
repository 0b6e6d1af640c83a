//! `window.sessionStorage` as the view-state backing store.

use shared::{KeyValueStore, StoreError};

use crate::utils::js_error_message;

/// Looks the storage up on every access, so it holds no JS handle and can
/// live inside Actors.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStore;

impl SessionStore {
    fn storage() -> Result<web_sys::Storage, StoreError> {
        let window = web_sys::window()
            .ok_or_else(|| StoreError::Unavailable("no window object".to_string()))?;
        window
            .session_storage()
            .map_err(|error| StoreError::Unavailable(js_error_message(&error)))?
            .ok_or_else(|| StoreError::Unavailable("sessionStorage is disabled".to_string()))
    }
}

fn log_store_error(error: &StoreError) {
    zoon::eprintln!("💾 VIEW STATE: {error}, keeping the value in memory");
}

impl KeyValueStore for SessionStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Self::storage()
            .and_then(|storage| {
                storage.get_item(key).map_err(|error| StoreError::Read {
                    key: key.to_string(),
                    reason: js_error_message(&error),
                })
            })
            .inspect_err(log_store_error)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        Self::storage()
            .and_then(|storage| {
                storage.set_item(key, value).map_err(|error| StoreError::Write {
                    key: key.to_string(),
                    reason: js_error_message(&error),
                })
            })
            .inspect_err(log_store_error)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        Self::storage()
            .and_then(|storage| {
                storage.remove_item(key).map_err(|error| StoreError::Write {
                    key: key.to_string(),
                    reason: js_error_message(&error),
                })
            })
            .inspect_err(log_store_error)
    }
}
