//! Durable storage for the bearer token
//!
//! The browser implementation keeps the token under a single localStorage
//! key; absence of the key means "logged out".

use std::sync::{Arc, Mutex};

/// localStorage key holding the bearer token as a plain string
pub const TOKEN_STORAGE_KEY: &str = "token";

/// Synchronous key-value slot for the bearer token
pub trait TokenStorage {
    fn load(&self) -> Option<String>;
    fn store(&self, token: &str);
    fn clear(&self);
}

/// Token storage backed by `window.localStorage`
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserTokenStorage;

#[cfg(not(feature = "ssr"))]
fn local_storage() -> Option<web_sys::Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(not(feature = "ssr"))]
impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        local_storage()?
            .get_item(TOKEN_STORAGE_KEY)
            .ok()?
            .filter(|t| !t.is_empty())
    }

    fn store(&self, token: &str) {
        if let Some(storage) = local_storage()
            && storage.set_item(TOKEN_STORAGE_KEY, token).is_err()
        {
            leptos::logging::warn!("Failed to persist session token");
        }
    }

    fn clear(&self) {
        if let Some(storage) = local_storage() {
            let _ = storage.remove_item(TOKEN_STORAGE_KEY);
        }
    }
}

/// SSR stub: the server never sees the browser's storage
#[cfg(feature = "ssr")]
impl TokenStorage for BrowserTokenStorage {
    fn load(&self) -> Option<String> {
        None
    }

    fn store(&self, _token: &str) {}

    fn clear(&self) {}
}

/// In-memory token storage. Clones share the same slot, which lets a test
/// build a second store over the "same browser" to simulate a reload.
#[derive(Debug, Clone, Default)]
pub struct MemoryTokenStorage {
    slot: Arc<Mutex<Option<String>>>,
}

impl MemoryTokenStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: &str) -> Self {
        let storage = Self::new();
        storage.store(token);
        storage
    }
}

impl TokenStorage for MemoryTokenStorage {
    fn load(&self) -> Option<String> {
        self.slot.lock().ok()?.clone()
    }

    fn store(&self, token: &str) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn clear(&self) {
        if let Ok(mut slot) = self.slot.lock() {
            *slot = None;
        }
    }
}
