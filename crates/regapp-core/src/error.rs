//! Unified error handling for regapp-core

use thiserror::Error;

use crate::notify::GENERIC_ERROR_MESSAGE;

/// Core error type for regapp-core
#[derive(Error, Debug)]
pub enum Error {
    /// No response was received (connection refused, DNS, timeout)
    #[error("Network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Http {
        status: u16,
        body: serde_json::Value,
    },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type alias for regapp-core
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a network error
    pub fn network(msg: impl Into<String>) -> Self {
        Error::Network(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Error::Validation(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    /// Status and body of the HTTP response behind this error, if one arrived.
    pub fn response(&self) -> Option<(u16, &serde_json::Value)> {
        match self {
            Error::Http { status, body } => Some((*status, body)),
            _ => None,
        }
    }

    /// Text shown to the user when this error is reported.
    pub fn notification_message(&self) -> String {
        match self {
            Error::Validation(msg) => msg.clone(),
            _ => match self.response() {
                // Value's Display is compact JSON, so string bodies stay quoted
                Some((status, body)) => format!("{}: {}", status, body),
                None => GENERIC_ERROR_MESSAGE.to_string(),
            },
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            Error::Config(err.to_string())
        } else if err.is_timeout() {
            Error::Network("Request timed out".to_string())
        } else if err.is_connect() {
            Error::Network(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Error::Network(format!("Failed to read response: {}", err))
        } else {
            match err.status() {
                Some(status) => Error::Http {
                    status: status.as_u16(),
                    body: serde_json::Value::String(String::new()),
                },
                None => Error::Network(err.to_string()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_display() {
        let err = Error::validation("Passwords do not match.");
        assert_eq!(err.to_string(), "Validation error: Passwords do not match.");
    }

    #[test]
    fn test_http_error_message_uses_compact_json() {
        let err = Error::Http {
            status: 401,
            body: json!({"detail": "Unauthorized"}),
        };
        assert_eq!(err.notification_message(), r#"401: {"detail":"Unauthorized"}"#);
    }

    #[test]
    fn test_http_error_message_with_text_body() {
        let err = Error::Http {
            status: 502,
            body: json!("Bad Gateway"),
        };
        assert_eq!(err.notification_message(), r#"502: "Bad Gateway""#);
    }

    #[test]
    fn test_errors_without_response_are_generic() {
        assert_eq!(
            Error::network("refused").notification_message(),
            "An unexpected error occurred."
        );
        let io = Error::Io(std::io::Error::new(std::io::ErrorKind::Other, "disk full"));
        assert!(io.response().is_none());
        assert_eq!(io.notification_message(), "An unexpected error occurred.");
    }

    #[test]
    fn test_validation_message_is_verbatim() {
        assert_eq!(
            Error::validation("Username and password are required.").notification_message(),
            "Username and password are required."
        );
    }

    #[test]
    fn test_http_error_message_keeps_server_key_order() {
        let err = Error::Http {
            status: 422,
            body: crate::api::parse_body(
                r#"{"type":"missing","loc":["body","user"],"msg":"Field required"}"#,
            ),
        };
        assert_eq!(
            err.notification_message(),
            r#"422: {"type":"missing","loc":["body","user"],"msg":"Field required"}"#
        );
    }

    #[test]
    fn test_http_error_message_with_empty_body() {
        let err = Error::Http {
            status: 500,
            body: crate::api::parse_body(""),
        };
        assert_eq!(err.notification_message(), r#"500: """#);
    }
}
