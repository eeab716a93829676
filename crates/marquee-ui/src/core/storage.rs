//! Persistent key/value storage seam.
//!
//! The browser build backs this with `localStorage`; tests use [`MemoryStore`].

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

/// Bearer token issued at login.
pub const TOKEN_KEY: &str = "token";
/// Email of the logged-in user.
pub const USER_EMAIL_KEY: &str = "user_email";
/// Optional display name of the logged-in user.
pub const USER_NICKNAME_KEY: &str = "user_nickname";
/// Last issued verification code.
pub const VERIFY_CODE_KEY: &str = "verify_code";
/// Email the verification code was sent to.
pub const VERIFY_EMAIL_KEY: &str = "verify_email";
/// Millisecond timestamp the verification code was issued at.
pub const VERIFY_ISSUED_AT_KEY: &str = "verify_issued_at";

/// String key/value storage that survives page reloads.
pub trait KeyValueStore {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;
    /// Write a value.
    fn set(&self, key: &str, value: &str);
    /// Remove a value.
    fn delete(&self, key: &str);
}

/// In-memory store; clones share the same entries.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    entries: Rc<RefCell<BTreeMap<String, String>>>,
}

impl MemoryStore {
    /// Whether nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn delete(&self, key: &str) {
        self.entries.borrow_mut().remove(key);
    }
}
