//! Legacy XML WebService operations.
//!
//! These endpoints predate the JSON interfaces: replies are XML, decoded
//! through the injected [`XmlDecoder`] capability. Only `OpStateExt` is
//! signed, using the status-query scheme and `password2`.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;
use url::form_urlencoded;

use crate::{
    config::Config,
    error::{Result, RobokassaError},
    signature::SignatureService,
    transport::HttpTransport,
    xml::XmlDecoder,
};

/// XML WebService request builder.
#[derive(Clone)]
pub struct WebService {
    transport: Arc<dyn HttpTransport>,
    signer: Arc<SignatureService>,
    config: Arc<Config>,
    decoder: Arc<dyn XmlDecoder>,
}

impl std::fmt::Debug for WebService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebService")
            .field("merchant_login", &self.config.merchant_login)
            .finish_non_exhaustive()
    }
}

impl WebService {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        signer: Arc<SignatureService>,
        config: Arc<Config>,
        decoder: Arc<dyn XmlDecoder>,
    ) -> Self {
        Self { transport, signer, config, decoder }
    }

    /// Fetches the payment methods available to the merchant.
    ///
    /// `language` selects the interface language; `None` (or an empty
    /// string) falls back to `en`.
    ///
    /// # Errors
    ///
    /// - [`RobokassaError::GatewayError`] on a non-200 reply.
    /// - [`RobokassaError::MalformedResponse`] if the XML cannot be
    ///   decoded.
    #[instrument(skip(self))]
    pub async fn payment_methods(&self, language: Option<&str>) -> Result<Value> {
        let language = match language {
            Some(lang) if !lang.is_empty() => lang,
            _ => "en",
        };
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("MerchantLogin", &self.config.merchant_login)
            .append_pair("Language", language)
            .finish();
        self.fetch("GetPaymentMethods", &query).await
    }

    /// Queries the payment state of an invoice (`OpStateExt`).
    ///
    /// # Errors
    ///
    /// - [`RobokassaError::GatewayError`] on a non-200 reply.
    /// - [`RobokassaError::MalformedResponse`] if the XML cannot be
    ///   decoded.
    #[instrument(skip(self))]
    pub async fn op_state(&self, invoice_id: i64) -> Result<Value> {
        let invoice_id = invoice_id.to_string();
        let signature = self.signer.sign_op_state(
            &self.config.merchant_login,
            &invoice_id,
            self.config.effective_password2(),
            Some(&self.config.hash_algorithm),
        );
        let query = form_urlencoded::Serializer::new(String::new())
            .append_pair("MerchantLogin", &self.config.merchant_login)
            .append_pair("InvoiceID", &invoice_id)
            .append_pair("Signature", &signature)
            .finish();
        self.fetch("OpStateExt", &query).await
    }

    async fn fetch(&self, segment: &str, query: &str) -> Result<Value> {
        let url = format!("{}/{segment}?{query}", self.config.endpoints.web_service);
        let response = self.transport.get(&url, &[]).await?;
        if response.status != 200 {
            return Err(RobokassaError::GatewayError(format!(
                "{segment} failed with HTTP {}",
                response.status
            )));
        }
        self.decoder.decode(&response.body)
    }
}
