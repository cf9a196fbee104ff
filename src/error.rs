//! Error types for the Waitless admin client library.

/// Convenience alias used throughout the crate.
pub type Result<T, E = WaitlessError> = core::result::Result<T, E>;

/// A single field-level validation failure returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct FieldError {
    /// Name of the offending request field.
    pub field: String,
    /// Human-readable description of the failure.
    pub message: String,
}

/// All errors that can occur when using the Waitless admin client.
#[derive(Debug, thiserror::Error)]
pub enum WaitlessError {
    /// The request was rejected with 401 even after the one-shot
    /// token refresh and retry.
    #[error("unauthorized: access token was rejected")]
    Unauthorized,

    /// The authenticated user lacks permission (403).
    #[error("forbidden: {message}")]
    Forbidden {
        /// Server-provided or default description.
        message: String,
    },

    /// The requested resource does not exist (404), or a mock-store
    /// operation targeted a missing id.
    #[error("not found: {message}")]
    NotFound {
        /// Server-provided or default description.
        message: String,
    },

    /// The request body failed server-side validation (422).
    #[error("validation failed: {message}")]
    Validation {
        /// Summary message.
        message: String,
        /// Per-field failure details, when the server provides them.
        details: Vec<FieldError>,
    },

    /// The client is being rate limited (429).
    #[error("rate limited: too many requests")]
    RateLimited,

    /// The server failed to process the request (5xx).
    #[error("server error: status {status}")]
    Server {
        /// HTTP status code.
        status: u16,
    },

    /// Any other non-success HTTP status.
    #[error("API error: status {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body or a placeholder when unreadable.
        message: String,
    },

    /// No response was received: connection failure, timeout, or a
    /// malformed request.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// A 401 was received and the token refresh itself failed; the
    /// persisted session has been cleared.
    #[error("session expired: token refresh failed and the session was cleared")]
    SessionExpired,

    /// The client-side store (session or mock data) failed.
    #[error("store error: {0}")]
    Store(Box<dyn core::error::Error + Send + Sync>),
}

impl WaitlessError {
    /// Builds a [`WaitlessError::NotFound`] with the given message.
    #[inline]
    #[must_use]
    pub fn not_found<T: Into<String>>(message: T) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    /// Returns `true` for not-found-class errors.
    ///
    /// Mock-store and real-API not-found failures are the same variant,
    /// so callers can treat both backends identically.
    #[inline]
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        match *self {
            Self::NotFound { .. } => true,
            Self::Unauthorized
            | Self::Forbidden { .. }
            | Self::Validation { .. }
            | Self::RateLimited
            | Self::Server { .. }
            | Self::Api { .. }
            | Self::Network(_)
            | Self::Serialization(_)
            | Self::SessionExpired
            | Self::Store(_) => false,
        }
    }

    /// Classifies a non-success HTTP status into an error variant.
    ///
    /// Only 401 is handled specially by the HTTP layer (refresh and
    /// retry); everything classified here is rethrown to the caller.
    #[must_use]
    pub fn from_status(status: u16, message: String, details: Vec<FieldError>) -> Self {
        match status {
            401 => Self::Unauthorized,
            403 => Self::Forbidden { message },
            404 => Self::NotFound { message },
            422 => Self::Validation { message, details },
            429 => Self::RateLimited,
            500..=599 => Self::Server { status },
            _ => Self::Api { status, message },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_from_serde_json() {
        let serde_err = serde_json::from_str::<String>("not json").unwrap_err();
        let err = WaitlessError::from(serde_err);
        assert!(matches!(err, WaitlessError::Serialization(_)));
        assert!(err.to_string().contains("serialization error"));
    }

    #[test]
    fn error_store_display() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = WaitlessError::Store(Box::new(inner));
        let msg = err.to_string();
        assert!(msg.contains("store error"));
        assert!(msg.contains("file missing"));
    }

    #[test]
    fn classify_unauthorized() {
        let err = WaitlessError::from_status(401, "nope".to_owned(), Vec::new());
        assert!(matches!(err, WaitlessError::Unauthorized));
    }

    #[test]
    fn classify_forbidden() {
        let err = WaitlessError::from_status(403, "admin only".to_owned(), Vec::new());
        assert!(matches!(err, WaitlessError::Forbidden { .. }));
    }

    #[test]
    fn classify_not_found() {
        let err = WaitlessError::from_status(404, "no such shop".to_owned(), Vec::new());
        assert!(err.is_not_found());
        assert!(err.to_string().contains("no such shop"));
    }

    #[test]
    fn classify_validation_carries_details() {
        let details = vec![FieldError {
            field: "phone".to_owned(),
            message: "must not be empty".to_owned(),
        }];
        let err = WaitlessError::from_status(422, "invalid".to_owned(), details);
        match err {
            WaitlessError::Validation { details: got, .. } => {
                assert_eq!(got.len(), 1);
                assert_eq!(got.first().map(|f| f.field.as_str()), Some("phone"));
            }
            WaitlessError::Unauthorized
            | WaitlessError::Forbidden { .. }
            | WaitlessError::NotFound { .. }
            | WaitlessError::RateLimited
            | WaitlessError::Server { .. }
            | WaitlessError::Api { .. }
            | WaitlessError::Network(_)
            | WaitlessError::Serialization(_)
            | WaitlessError::SessionExpired
            | WaitlessError::Store(_) => panic!("expected validation error"),
        }
    }

    #[test]
    fn classify_rate_limited() {
        let err = WaitlessError::from_status(429, String::new(), Vec::new());
        assert!(matches!(err, WaitlessError::RateLimited));
    }

    #[test]
    fn classify_server_range() {
        for status in [500_u16, 502, 599] {
            let err = WaitlessError::from_status(status, String::new(), Vec::new());
            assert!(matches!(err, WaitlessError::Server { .. }));
        }
    }

    #[test]
    fn classify_unknown_status() {
        let err = WaitlessError::from_status(418, "teapot".to_owned(), Vec::new());
        assert!(matches!(err, WaitlessError::Api { status: 418, .. }));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<WaitlessError>();
    }
}
