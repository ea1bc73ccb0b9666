//! HTTP transport abstraction.
//!
//! The signing core produces values; sending them is a collaborator
//! concern. [`HttpTransport`] is the narrow capability the request
//! builders depend on: plain GET and POST returning a status and body.
//! Timeouts and retries live behind this trait, never in the builders.
//!
//! The crate ships a reqwest implementation ([`ReqwestTransport`]); tests
//! and embedders substitute their own (a queue-backed mock, a recording
//! proxy) by implementing the trait.
//!
//! # Examples
//!
//! ```rust,no_run
//! use robokassa_client::transport::{HttpTransport, ReqwestTransport};
//!
//! # async fn example() -> robokassa_client::Result<()> {
//! let transport = ReqwestTransport::new();
//! let response = transport.get("https://auth.robokassa.ru/Merchant/WebService", &[]).await?;
//! println!("status: {}", response.status);
//! # Ok(())
//! # }
//! ```

pub mod http;

use async_trait::async_trait;

use crate::error::Result;

pub use http::ReqwestTransport;

/// Response from a transport operation.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body text.
    pub body: String,
}

impl TransportResponse {
    /// Creates a response; mainly useful for mock transports in tests.
    #[must_use]
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self { status, body: body.into() }
    }
}

/// Pluggable HTTP capability consumed by the request builders.
///
/// Implementations must be shareable across concurrent callers; the
/// builders hold them behind `Arc<dyn HttpTransport>`.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Executes a GET request.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RobokassaError::HttpError`] (or an
    /// implementation-specific variant) if the request cannot complete.
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<TransportResponse>;

    /// Executes a POST request with a text body.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RobokassaError::HttpError`] (or an
    /// implementation-specific variant) if the request cannot complete.
    async fn post(
        &self,
        url: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> Result<TransportResponse>;
}
