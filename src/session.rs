//! Session Storage
//!
//! Key-value session persistence and the session context handed to
//! containers at construction.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::models::SessionUser;

/// Storage key holding the serialized session user
pub const USER_KEY: &str = "user";

/// Synchronous key-value store (`localStorage` shape)
pub trait SessionStorage {
    fn get_item(&self, key: &str) -> Option<String>;
    fn set_item(&self, key: &str, value: &str);
    fn remove_item(&self, key: &str);
}

/// Process-local storage, used when no browser storage is reachable
#[derive(Debug, Default)]
pub struct MemoryStorage {
    items: RefCell<HashMap<String, String>>,
}

impl SessionStorage for MemoryStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    fn set_item(&self, key: &str, value: &str) {
        self.items.borrow_mut().insert(key.to_string(), value.to_string());
    }

    fn remove_item(&self, key: &str) {
        self.items.borrow_mut().remove(key);
    }
}

/// `window.localStorage`
pub struct BrowserStorage {
    storage: web_sys::Storage,
}

impl BrowserStorage {
    pub fn local() -> Option<Self> {
        let storage = web_sys::window()?.local_storage().ok()??;
        Some(Self { storage })
    }
}

impl SessionStorage for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set_item(&self, key: &str, value: &str) {
        report_write(self.storage.set_item(key, value), "set", key);
    }

    fn remove_item(&self, key: &str) {
        report_write(self.storage.remove_item(key), "remove", key);
    }
}

/// Log a refused storage write; `true` when it went through
fn report_write<E>(result: Result<(), E>, action: &str, key: &str) -> bool {
    match result {
        Ok(()) => true,
        Err(_) => {
            log::error!("[SESSION] localStorage could not {} key {}", action, key);
            false
        }
    }
}

/// Session value injected into containers and the router
#[derive(Clone)]
pub struct SessionContext {
    storage: Rc<dyn SessionStorage>,
}

impl SessionContext {
    pub fn new(storage: Rc<dyn SessionStorage>) -> Self {
        Self { storage }
    }

    /// Decoded session user; a corrupt entry reads as signed out
    pub fn user(&self) -> Option<SessionUser> {
        let raw = self.storage.get_item(USER_KEY)?;
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                log::warn!("[SESSION] Ignoring unreadable user entry: {}", e);
                None
            }
        }
    }

    pub fn set_user(&self, user: &SessionUser) -> Result<(), serde_json::Error> {
        let json = serde_json::to_string(user)?;
        self.storage.set_item(USER_KEY, &json);
        Ok(())
    }

    /// Email of the session user, empty when unknown
    pub fn email(&self) -> String {
        self.user().and_then(|u| u.email).unwrap_or_default()
    }
}
