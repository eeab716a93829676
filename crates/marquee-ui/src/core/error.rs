//! Transport error type shared by the backend seam and its controllers.

use thiserror::Error;

/// Failure talking to the catalog backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The backend answered with a non-success status.
    #[error("server responded with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Explanation from the response body, when one was present.
        message: Option<String>,
    },
    /// The body did not match the expected shape.
    #[error("unexpected response body: {0}")]
    Decode(String),
}

impl ApiError {
    /// HTTP status, when the backend responded.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::Transport(_) | Self::Decode(_) => None,
        }
    }

    /// Whether the backend rejected the bearer token.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self.status(), Some(401))
    }

    /// Server-provided explanation, else the error's own description.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Status {
                message: Some(message),
                ..
            } => message.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_message() {
        let err = ApiError::Status {
            status: 409,
            message: Some("Email already registered".to_string()),
        };
        assert_eq!(err.user_message(), "Email already registered");
        assert!(!err.is_unauthorized());

        let bare = ApiError::Status {
            status: 401,
            message: None,
        };
        assert!(bare.is_unauthorized());
        assert_eq!(bare.user_message(), "server responded with status 401");
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::Transport("offline".to_string());
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message(), "request failed: offline");
    }
}
