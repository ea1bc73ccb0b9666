//! Fiscal receipt submission and status lookup (RoboFiscal).
//!
//! Both operations share one body format: the payload JSON is
//! base64url-encoded, signed with the fiscal scheme, and the two parts are
//! joined with a dot: `base64url(json) + "." + signature`.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::{
    config::Config,
    error::{Result, RobokassaError},
    signature::{base64url, SignatureService},
    transport::HttpTransport,
};

/// Fiscal receipt request builder.
#[derive(Clone)]
pub struct ReceiptService {
    transport: Arc<dyn HttpTransport>,
    signer: Arc<SignatureService>,
    config: Arc<Config>,
}

impl std::fmt::Debug for ReceiptService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReceiptService")
            .field("merchant_login", &self.config.merchant_login)
            .finish_non_exhaustive()
    }
}

impl ReceiptService {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        signer: Arc<SignatureService>,
        config: Arc<Config>,
    ) -> Self {
        Self { transport, signer, config }
    }

    /// Builds the signed fiscal request body for `payload`.
    ///
    /// # Errors
    ///
    /// Returns [`RobokassaError::EncodingFailure`] if the payload cannot
    /// be serialized.
    pub fn second_check_body(&self, payload: &Value) -> Result<String> {
        let json = serde_json::to_string(payload)?;
        let encoded = base64url::encode(json.as_bytes());
        let signature = self.signer.sign_fiscal(
            &encoded,
            self.config.effective_password1(),
            Some(&self.config.hash_algorithm),
        );
        Ok(format!("{encoded}.{signature}"))
    }

    /// Submits a second check to RoboFiscal and returns the raw reply body.
    ///
    /// # Errors
    ///
    /// - [`RobokassaError::EncodingFailure`] if the payload cannot be
    ///   serialized.
    /// - [`RobokassaError::HttpError`] if the request cannot complete.
    #[instrument(skip(self, payload))]
    pub async fn send_second_check(&self, payload: &Value) -> Result<String> {
        let body = self.second_check_body(payload)?;
        let response = self
            .transport
            .post(
                &self.config.endpoints.second_check,
                body,
                &[("Content-Type", "application/json")],
            )
            .await?;
        Ok(response.body)
    }

    /// Queries the status of a previously submitted receipt.
    ///
    /// The payload must carry `merchantId` and `id` (the invoice number
    /// the receipt belongs to).
    ///
    /// # Errors
    ///
    /// - [`RobokassaError::MissingField`] if `merchantId` or `id` is
    ///   absent, null or an empty string.
    /// - [`RobokassaError::MalformedResponse`] if the reply is not JSON.
    #[instrument(skip(self, payload))]
    pub async fn check_status(&self, payload: &Value) -> Result<Value> {
        for required in ["merchantId", "id"] {
            let missing = payload.get(required).map_or(true, |value| {
                value.is_null() || value.as_str().is_some_and(str::is_empty)
            });
            if missing {
                return Err(RobokassaError::MissingField(required.to_owned()));
            }
        }

        let body = self.second_check_body(payload)?;
        let response = self
            .transport
            .post(
                &self.config.endpoints.check_status,
                body,
                &[("Content-Type", "application/json; charset=utf-8")],
            )
            .await?;

        serde_json::from_str(&response.body)
            .map_err(|e| RobokassaError::MalformedResponse(e.to_string()))
    }
}
