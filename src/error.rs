//! Error types for the Robokassa client.
//!
//! All errors implement the standard [`std::error::Error`] trait via
//! [`thiserror::Error`]. The signing core raises only
//! [`RobokassaError::MissingField`] and [`RobokassaError::EncodingFailure`];
//! the remaining variants are surfaced by the request builders and the
//! transport layer. Algorithm selection never errors; unknown hash names
//! silently degrade to MD5 (see [`crate::signature::HashAlgorithm`]).

use thiserror::Error;

/// Result type alias for client operations.
pub type Result<T> = std::result::Result<T, RobokassaError>;

/// Errors that can occur while building or sending gateway requests.
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum RobokassaError {
    /// A required request field is absent.
    ///
    /// Raised by the signing core (e.g. `OutSum` missing from payment
    /// parameters) and by request builders validating their inputs.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// JSON encoding of a payload failed.
    ///
    /// Raised when a payload object cannot be serialized to the JSON text
    /// that participates in signing.
    #[error("payload encoding failed: {0}")]
    EncodingFailure(#[from] serde_json::Error),

    /// The gateway returned a body that cannot be interpreted.
    ///
    /// Raised by request builders when a downstream JSON reply cannot be
    /// parsed or lacks the field the flow needs.
    #[error("malformed gateway response: {0}")]
    MalformedResponse(String),

    /// The gateway rejected the request.
    ///
    /// Carries the HTTP status or the gateway's own error body.
    #[error("gateway request failed: {0}")]
    GatewayError(String),

    /// HTTP request failed.
    ///
    /// Wraps [`reqwest::Error`]: timeouts, connection failures, TLS errors.
    /// Retries, if any, belong to the caller; nothing is retried here.
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Client configuration is invalid.
    ///
    /// Raised during facade construction: missing credentials, an unknown
    /// hash algorithm name, or test mode without test passwords.
    #[error("invalid configuration: {0}")]
    ConfigError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let error = RobokassaError::MissingField("OutSum".to_owned());
        assert_eq!(error.to_string(), "missing required field: OutSum");
    }

    #[test]
    fn test_malformed_response_display() {
        let error = RobokassaError::MalformedResponse("no invoiceID".to_owned());
        assert!(error.to_string().contains("malformed gateway response"));
    }

    #[test]
    fn test_encoding_failure_from_serde() {
        let bad = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error = RobokassaError::from(bad);
        assert!(matches!(error, RobokassaError::EncodingFailure(_)));
    }

    #[test]
    fn test_config_error_display() {
        let error = RobokassaError::ConfigError("login is not defined".to_owned());
        assert_eq!(error.to_string(), "invalid configuration: login is not defined");
    }
}
