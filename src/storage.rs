//! The persisted dataset cache as an injected storage capability.
//!
//! The component keeps one serialized copy of the last dataset under a fixed
//! key. It is written unconditionally on every successful upload, read once
//! when the component mounts, and never explicitly cleared — it lives until
//! overwritten or the browser store is cleared externally.
//!
//! [`DatasetStore`] is the seam: the browser build uses [`LocalStore`] over
//! `localStorage`; tests and native builds substitute [`MemoryStore`].

use crate::error::Result;

#[cfg(target_arch = "wasm32")]
use crate::error::SheetpagerError;

/// Fixed key for the cached dataset in the backing store.
pub const STORAGE_KEY: &str = "sheetpager.dataset";

/// A single named slot holding the serialized dataset.
pub trait DatasetStore {
    /// Read the cached value, if any. `Ok(None)` means nothing cached.
    fn load(&self) -> Result<Option<String>>;

    /// Overwrite the cached value.
    fn save(&mut self, json: &str) -> Result<()>;
}

/// In-memory store for tests and native builds.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slot: Option<String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed the slot, simulating a cache left by a prior session.
    #[must_use]
    pub fn with_cached(json: impl Into<String>) -> Self {
        Self {
            slot: Some(json.into()),
        }
    }

    /// The raw cached value (for assertions).
    #[must_use]
    pub fn cached(&self) -> Option<&str> {
        self.slot.as_deref()
    }
}

impl DatasetStore for MemoryStore {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.slot.clone())
    }

    fn save(&mut self, json: &str) -> Result<()> {
        self.slot = Some(json.to_string());
        Ok(())
    }
}

/// Browser `localStorage` store under [`STORAGE_KEY`].
#[cfg(target_arch = "wasm32")]
#[derive(Debug)]
pub struct LocalStore {
    storage: web_sys::Storage,
}

#[cfg(target_arch = "wasm32")]
impl LocalStore {
    /// Open the window's localStorage. Fails when storage is unavailable
    /// (e.g. blocked by browser settings).
    pub fn open() -> Result<Self> {
        let storage = web_sys::window()
            .ok_or_else(|| SheetpagerError::Storage("no window".to_string()))?
            .local_storage()
            .map_err(|_| SheetpagerError::Storage("localStorage access denied".to_string()))?
            .ok_or_else(|| SheetpagerError::Storage("localStorage unavailable".to_string()))?;
        Ok(Self { storage })
    }
}

#[cfg(target_arch = "wasm32")]
impl DatasetStore for LocalStore {
    fn load(&self) -> Result<Option<String>> {
        self.storage
            .get_item(STORAGE_KEY)
            .map_err(|_| SheetpagerError::Storage("localStorage read failed".to_string()))
    }

    fn save(&mut self, json: &str) -> Result<()> {
        // Can fail when the quota is exhausted; surfaced, not swallowed.
        self.storage
            .set_item(STORAGE_KEY, json)
            .map_err(|_| SheetpagerError::Storage("localStorage write failed".to_string()))
    }
}
