//! Session-scoped view state persistence
//!
//! The selected tag and the list scroll offset live in a string key/value
//! store (the browser's `sessionStorage` in production, [`MemoryStore`] in
//! tests). Losing this state is cosmetic, so [`ViewStateStore`] never fails
//! its caller: a failing backing store degrades to an in-memory overlay that
//! lasts as long as the store value itself.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::filter::TagSelection;

/// Raw tag string; absent means "all tags".
pub const SELECTED_TAG_KEY: &str = "selectedTag";
/// Decimal integer string.
pub const SCROLL_POSITION_KEY: &str = "scrollPosition";

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    #[error("storage is not available: {0}")]
    Unavailable(String),
    #[error("failed to read '{key}': {reason}")]
    Read { key: String, reason: String },
    #[error("failed to write '{key}': {reason}")]
    Write { key: String, reason: String },
}

/// String key/value storage backing the view state.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }
}

/// In-process store, used by tests and as a stand-in where no browser storage
/// exists.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, StoreError> {
        self.entries
            .lock()
            .map_err(|error| StoreError::Unavailable(error.to_string()))
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries()?.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries()?.remove(key);
        Ok(())
    }
}

/// Typed access to the persisted selected tag and scroll offset.
#[derive(Debug)]
pub struct ViewStateStore<S> {
    backing: S,
    // Values whose write failed; `None` marks a failed removal.
    overlay: HashMap<&'static str, Option<String>>,
}

impl<S: KeyValueStore> ViewStateStore<S> {
    pub fn new(backing: S) -> Self {
        Self {
            backing,
            overlay: HashMap::new(),
        }
    }

    pub fn get_tag(&self) -> TagSelection {
        self.read(SELECTED_TAG_KEY)
            .map(TagSelection::from_tag)
            .unwrap_or_default()
    }

    pub fn set_tag(&mut self, tag: &TagSelection) {
        match tag {
            TagSelection::All => self.erase(SELECTED_TAG_KEY),
            TagSelection::Tag(tag) => self.write(SELECTED_TAG_KEY, tag.clone()),
        }
    }

    /// `None` when no valid offset was ever persisted.
    pub fn stored_scroll(&self) -> Option<u32> {
        self.read(SCROLL_POSITION_KEY)
            .and_then(|offset| offset.trim().parse().ok())
    }

    pub fn get_scroll(&self) -> u32 {
        self.stored_scroll().unwrap_or(0)
    }

    pub fn set_scroll(&mut self, offset: u32) {
        self.write(SCROLL_POSITION_KEY, offset.to_string());
    }

    fn read(&self, key: &'static str) -> Option<String> {
        if let Some(value) = self.overlay.get(key) {
            return value.clone();
        }
        self.backing.get(key).ok().flatten()
    }

    fn write(&mut self, key: &'static str, value: String) {
        match self.backing.set(key, &value) {
            Ok(()) => {
                self.overlay.remove(key);
            }
            Err(_) => {
                self.overlay.insert(key, Some(value));
            }
        }
    }

    fn erase(&mut self, key: &'static str) {
        match self.backing.remove(key) {
            Ok(()) => {
                self.overlay.remove(key);
            }
            Err(_) => {
                self.overlay.insert(key, None);
            }
        }
    }
}
