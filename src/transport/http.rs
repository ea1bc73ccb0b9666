//! Reqwest-backed transport implementation.

use std::{sync::LazyLock, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use super::{HttpTransport, TransportResponse};
use crate::error::Result;

/// Default HTTP client with connection pooling enabled.
///
/// A singleton avoids recreating the client per transport instance,
/// preserving connection pooling across all default transports.
static DEFAULT_HTTP_CLIENT: LazyLock<Client> = LazyLock::new(|| {
    Client::builder()
        .pool_max_idle_per_host(16)
        .timeout(Duration::from_secs(30))
        .connect_timeout(Duration::from_secs(10))
        .build()
        .expect("failed to create default HTTP client")
});

/// HTTP transport using reqwest.
///
/// Defaults: 30-second request timeout, 10-second connect timeout, shared
/// pooled client. For other settings construct a [`reqwest::Client`]
/// yourself and pass it to [`ReqwestTransport::with_client`].
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl ReqwestTransport {
    /// Creates a transport over the shared pooled client.
    #[must_use]
    pub fn new() -> Self {
        Self { client: DEFAULT_HTTP_CLIENT.clone() }
    }

    /// Creates a transport over a caller-configured client.
    #[must_use]
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, headers))]
    async fn get(&self, url: &str, headers: &[(&str, &str)]) -> Result<TransportResponse> {
        let mut request = self.client.get(url);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }

    #[instrument(skip(self, body, headers))]
    async fn post(
        &self,
        url: &str,
        body: String,
        headers: &[(&str, &str)],
    ) -> Result<TransportResponse> {
        let mut request = self.client.post(url).body(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(TransportResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transport_shares_client() {
        // both handles clone the singleton; construction must not panic
        let _a = ReqwestTransport::new();
        let _b = ReqwestTransport::default();
    }

    #[test]
    fn test_with_client_accepts_custom_configuration() {
        let client = Client::builder().timeout(Duration::from_secs(5)).build().unwrap();
        let _transport = ReqwestTransport::with_client(client);
    }
}
