//! `localStorage` / `sessionStorage` behind [`KeyValueStore`]

use crate::error::js_message;
use boxoffice_core::{ClientError, ClientResult, KeyValueStore};
use web_sys::Storage;

/// Handle to one of the window's Web Storage areas
#[derive(Debug, Clone)]
pub struct WebStorage {
    inner: Storage,
}

impl WebStorage {
    /// The window's `localStorage`
    pub fn local() -> ClientResult<Self> {
        let window = web_sys::window().ok_or_else(|| ClientError::storage("no window"))?;
        let storage = window
            .local_storage()
            .map_err(|e| ClientError::storage(js_message(&e)))?
            .ok_or_else(|| ClientError::storage("localStorage unavailable"))?;
        Ok(Self { inner: storage })
    }

    /// The window's `sessionStorage`
    pub fn session() -> ClientResult<Self> {
        let window = web_sys::window().ok_or_else(|| ClientError::storage("no window"))?;
        let storage = window
            .session_storage()
            .map_err(|e| ClientError::storage(js_message(&e)))?
            .ok_or_else(|| ClientError::storage("sessionStorage unavailable"))?;
        Ok(Self { inner: storage })
    }
}

impl KeyValueStore for WebStorage {
    fn get_item(&self, key: &str) -> ClientResult<Option<String>> {
        self.inner
            .get_item(key)
            .map_err(|e| ClientError::storage(js_message(&e)))
    }

    fn set_item(&self, key: &str, value: &str) -> ClientResult<()> {
        self.inner
            .set_item(key, value)
            .map_err(|e| ClientError::storage(js_message(&e)))
    }

    fn remove_item(&self, key: &str) -> ClientResult<()> {
        self.inner
            .remove_item(key)
            .map_err(|e| ClientError::storage(js_message(&e)))
    }

    fn clear(&self) -> ClientResult<()> {
        self.inner
            .clear()
            .map_err(|e| ClientError::storage(js_message(&e)))
    }
}
