//! Email verification codes for registration.
//!
//! # Design
//! - Codes are six digits, persisted with the target email and issue time.
//! - A code is only accepted for the email it was sent to and within its lifetime.
//! - The backend receives the code again with the register request and may re-check it.

use crate::core::storage::{KeyValueStore, VERIFY_CODE_KEY, VERIFY_EMAIL_KEY, VERIFY_ISSUED_AT_KEY};
use thiserror::Error;

const CODE_FLOOR: u128 = 100_000;
const CODE_SPAN: u128 = 900_000;

/// Six-digit verification code.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Derive a code in `100000..=999999` from caller-supplied entropy.
    #[must_use]
    pub fn from_entropy(entropy: u128) -> Self {
        Self((CODE_FLOOR + entropy % CODE_SPAN).to_string())
    }

    /// Digits of the code.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Why a typed-back code was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum VerifyError {
    /// No code has been issued on this device.
    #[error("no verification code has been issued")]
    NotIssued,
    /// The code was sent to a different address.
    #[error("verification code was issued for a different email")]
    EmailMismatch,
    /// The code outlived its lifetime.
    #[error("verification code has expired")]
    Expired,
    /// The digits do not match.
    #[error("verification code does not match")]
    Mismatch,
}

/// Pending verification persisted in key/value storage.
#[derive(Clone, Debug)]
pub struct PendingVerification<S> {
    store: S,
    ttl_ms: i64,
}

impl<S: KeyValueStore> PendingVerification<S> {
    /// Wrap a store with the given code lifetime.
    pub const fn new(store: S, ttl_ms: i64) -> Self {
        Self { store, ttl_ms }
    }

    /// Issue and persist a fresh code for `email`, replacing any earlier one.
    pub fn issue(&self, email: &str, entropy: u128, now_ms: i64) -> VerificationCode {
        let code = VerificationCode::from_entropy(entropy);
        self.store.set(VERIFY_CODE_KEY, code.as_str());
        self.store.set(VERIFY_EMAIL_KEY, email.trim());
        self.store.set(VERIFY_ISSUED_AT_KEY, &now_ms.to_string());
        code
    }

    /// Check a typed-back code.
    ///
    /// # Errors
    ///
    /// Returns a [`VerifyError`] describing the first failed check.
    pub fn check(&self, email: &str, code: &str, now_ms: i64) -> Result<(), VerifyError> {
        let stored = self.store.get(VERIFY_CODE_KEY).ok_or(VerifyError::NotIssued)?;
        let issued_for = self.store.get(VERIFY_EMAIL_KEY).unwrap_or_default();
        if !issued_for.eq_ignore_ascii_case(email.trim()) {
            return Err(VerifyError::EmailMismatch);
        }
        let issued_at = self
            .store
            .get(VERIFY_ISSUED_AT_KEY)
            .and_then(|raw| raw.parse::<i64>().ok())
            .ok_or(VerifyError::Expired)?;
        if now_ms.saturating_sub(issued_at) > self.ttl_ms {
            return Err(VerifyError::Expired);
        }
        if stored != code.trim() {
            return Err(VerifyError::Mismatch);
        }
        Ok(())
    }

    /// Forget the pending code.
    pub fn clear(&self) {
        for key in [VERIFY_CODE_KEY, VERIFY_EMAIL_KEY, VERIFY_ISSUED_AT_KEY] {
            self.store.delete(key);
        }
    }
}
