//! Authentication primitives shared across the UI.
//!
//! # Design
//! - Persistent storage is the single source of truth; state is re-derived on every read.
//! - A session counts as authenticated only when both token and email are present.
//! - Leave header encoding to transport clients to keep core DOM-free.

use crate::core::storage::{KeyValueStore, TOKEN_KEY, USER_EMAIL_KEY, USER_NICKNAME_KEY};
use marquee_api_models::{LoginRequest, RegisterRequest};
use thiserror::Error;

/// Identity of the logged-in user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    /// Account email.
    pub email: String,
    /// Optional display name.
    pub nickname: Option<String>,
}

impl Identity {
    #[must_use]
    /// Nickname when set, else the email.
    pub fn display_name(&self) -> &str {
        self.nickname.as_deref().unwrap_or(&self.email)
    }
}

/// Derived authentication state.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No usable session.
    #[default]
    Anonymous,
    /// Token and email are both present.
    Authenticated(Identity),
}

impl SessionState {
    #[must_use]
    /// Whether a usable session exists.
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    /// Which auth-dependent elements should be visible.
    pub const fn visibility(&self) -> AuthVisibility {
        let authed = self.is_authenticated();
        AuthVisibility {
            login_button: !authed,
            user_badge: authed,
            review_form: authed,
            login_hint: !authed,
        }
    }
}

/// Visibility of auth-dependent page elements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AuthVisibility {
    /// Navbar login button.
    pub login_button: bool,
    /// Navbar user badge with logout.
    pub user_badge: bool,
    /// Review form on the detail page.
    pub review_form: bool,
    /// "Log in to review" hint on the detail page.
    pub login_hint: bool,
}

/// Session persisted in key/value storage.
#[derive(Clone, Debug)]
pub struct Session<S> {
    store: S,
}

impl<S: KeyValueStore> Session<S> {
    /// Wrap a store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Underlying store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current state, read fresh from storage.
    pub fn state(&self) -> SessionState {
        let token = non_blank(self.store.get(TOKEN_KEY));
        let email = non_blank(self.store.get(USER_EMAIL_KEY));
        match (token, email) {
            (Some(_), Some(email)) => SessionState::Authenticated(Identity {
                email,
                nickname: non_blank(self.store.get(USER_NICKNAME_KEY)),
            }),
            _ => SessionState::Anonymous,
        }
    }

    /// Bearer token, only while the session is complete.
    pub fn token(&self) -> Option<String> {
        if self.state().is_authenticated() {
            non_blank(self.store.get(TOKEN_KEY))
        } else {
            None
        }
    }

    /// Persist a freshly issued session.
    pub fn establish(&self, token: &str, identity: &Identity) {
        self.store.set(TOKEN_KEY, token);
        self.store.set(USER_EMAIL_KEY, &identity.email);
        match identity.nickname.as_deref() {
            Some(nickname) => self.store.set(USER_NICKNAME_KEY, nickname),
            None => self.store.delete(USER_NICKNAME_KEY),
        }
    }

    /// Remove every session key.
    pub fn clear(&self) {
        for key in [TOKEN_KEY, USER_EMAIL_KEY, USER_NICKNAME_KEY] {
            self.store.delete(key);
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

/// Validation failures for the login/register forms.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum AuthFormError {
    /// Email field is empty.
    #[error("email is required")]
    MissingEmail,
    /// One or more required fields are empty.
    #[error("all fields are required")]
    MissingFields,
}

/// Login form contents.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Credentials {
    /// Account email.
    pub email: String,
    /// Password.
    pub password: String,
}

impl Credentials {
    #[must_use]
    /// Whether both fields carry something.
    pub fn has_credentials(&self) -> bool {
        !self.email.trim().is_empty() && !self.password.is_empty()
    }

    /// Build the login request body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFormError::MissingFields`] when either field is empty.
    pub fn validate(&self) -> Result<LoginRequest, AuthFormError> {
        if !self.has_credentials() {
            return Err(AuthFormError::MissingFields);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_string(),
            password: self.password.clone(),
        })
    }
}

/// Registration form contents.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct RegistrationForm {
    /// Account email.
    pub email: String,
    /// Chosen password.
    pub password: String,
    /// Verification code typed back by the user.
    pub code: String,
    /// Optional display name.
    pub nickname: String,
}

impl RegistrationForm {
    /// Build the register request body.
    ///
    /// # Errors
    ///
    /// Returns [`AuthFormError::MissingFields`] when email, password or code is empty.
    pub fn validate(&self) -> Result<RegisterRequest, AuthFormError> {
        let email = self.email.trim();
        let code = self.code.trim();
        if email.is_empty() || self.password.is_empty() || code.is_empty() {
            return Err(AuthFormError::MissingFields);
        }
        let nickname = self.nickname.trim();
        Ok(RegisterRequest {
            email: email.to_string(),
            password: self.password.clone(),
            code: code.to_string(),
            username: (!nickname.is_empty()).then(|| nickname.to_string()),
        })
    }
}

/// Password field reveal state, toggled by press-and-hold.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PasswordVisibility {
    /// Masked.
    #[default]
    Hidden,
    /// Shown while the reveal control is held.
    Revealed,
}

impl PasswordVisibility {
    #[must_use]
    /// Input `type` attribute for this state.
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Hidden => "password",
            Self::Revealed => "text",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::storage::MemoryStore;

    fn identity() -> Identity {
        Identity {
            email: "ann@example.com".to_string(),
            nickname: None,
        }
    }

    #[test]
    fn session_requires_token_and_email() {
        let store = MemoryStore::default();
        let session = Session::new(store.clone());
        assert_eq!(session.state(), SessionState::Anonymous);

        store.set(TOKEN_KEY, "jwt");
        assert_eq!(session.state(), SessionState::Anonymous);
        assert!(session.token().is_none());

        store.set(USER_EMAIL_KEY, "ann@example.com");
        assert_eq!(session.state(), SessionState::Authenticated(identity()));
        assert_eq!(session.token().as_deref(), Some("jwt"));

        store.delete(TOKEN_KEY);
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[test]
    fn establish_then_clear_round_trips_storage() {
        let store = MemoryStore::default();
        let session = Session::new(store.clone());
        let named = Identity {
            nickname: Some("ann".to_string()),
            ..identity()
        };
        session.establish("jwt", &named);
        assert_eq!(session.state(), SessionState::Authenticated(named.clone()));
        assert_eq!(named.display_name(), "ann");

        session.clear();
        assert!(store.is_empty());
        assert_eq!(session.state(), SessionState::Anonymous);
    }

    #[test]
    fn visibility_follows_state() {
        let anon = SessionState::Anonymous.visibility();
        assert!(anon.login_button && anon.login_hint);
        assert!(!anon.user_badge && !anon.review_form);

        let authed = SessionState::Authenticated(identity()).visibility();
        assert!(authed.user_badge && authed.review_form);
        assert!(!authed.login_button && !authed.login_hint);
    }

    #[test]
    fn credentials_require_both_fields() {
        let blank = Credentials {
            email: "  ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(blank.validate(), Err(AuthFormError::MissingFields));
        let ok = Credentials {
            email: " ann@example.com ".to_string(),
            password: "secret".to_string(),
        };
        assert_eq!(
            ok.validate().map(|req| req.email),
            Ok("ann@example.com".to_string())
        );
    }

    #[test]
    fn registration_drops_blank_nickname() {
        let form = RegistrationForm {
            email: "ann@example.com".to_string(),
            password: "secret".to_string(),
            code: " 123456 ".to_string(),
            nickname: " ".to_string(),
        };
        let request = form.validate().expect("valid form");
        assert_eq!(request.code, "123456");
        assert!(request.username.is_none());

        let missing = RegistrationForm {
            code: String::new(),
            ..form
        };
        assert_eq!(missing.validate(), Err(AuthFormError::MissingFields));
    }

    #[test]
    fn password_visibility_maps_to_input_type() {
        assert_eq!(PasswordVisibility::Hidden.input_type(), "password");
        assert_eq!(PasswordVisibility::Revealed.input_type(), "text");
    }
}
