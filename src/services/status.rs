//! Invoice listing through the JWT interface.

use std::sync::Arc;

use serde_json::Value;
use tracing::instrument;

use crate::{
    config::Config,
    error::{Result, RobokassaError},
    signature::{JwtHeader, Params, SignatureService},
    transport::HttpTransport,
};

/// Filter fields `GetInvoiceInformationList` requires.
const REQUIRED_FILTERS: [&str; 6] =
    ["CurrentPage", "PageSize", "InvoiceStatuses", "DateFrom", "DateTo", "InvoiceTypes"];

/// Invoice listing request builder.
#[derive(Clone)]
pub struct StatusService {
    transport: Arc<dyn HttpTransport>,
    signer: Arc<SignatureService>,
    config: Arc<Config>,
}

impl std::fmt::Debug for StatusService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusService")
            .field("merchant_login", &self.config.merchant_login)
            .finish_non_exhaustive()
    }
}

impl StatusService {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        signer: Arc<SignatureService>,
        config: Arc<Config>,
    ) -> Self {
        Self { transport, signer, config }
    }

    /// Lists invoices and payment links matching `filters`.
    ///
    /// Required filter fields: `CurrentPage`, `PageSize`,
    /// `InvoiceStatuses`, `DateFrom`, `DateTo`, `InvoiceTypes`. Status and
    /// type values are accepted in lower case and normalized to the
    /// casing the gateway documents (`paid` → `Paid`, `onetime` →
    /// `OneTime`, ...).
    ///
    /// # Errors
    ///
    /// - [`RobokassaError::MissingField`] if a required filter is absent.
    /// - [`RobokassaError::MalformedResponse`] if the reply is not JSON.
    #[instrument(skip(self, filters))]
    pub async fn invoice_list(&self, filters: &Params) -> Result<Value> {
        for required in REQUIRED_FILTERS {
            if !filters.contains_key(required) {
                return Err(RobokassaError::MissingField(required.to_owned()));
            }
        }

        let mut payload = Params::new();
        payload
            .insert("MerchantLogin".to_owned(), Value::from(self.config.merchant_login.clone()));
        for (key, value) in filters {
            let value = if key == "InvoiceStatuses" || key == "InvoiceTypes" {
                normalize_list(value)
            } else {
                value.clone()
            };
            payload.insert(key.clone(), value);
        }

        let token = self.signer.jwt_token(
            &JwtHeader::md5(),
            &payload,
            &self.config.merchant_login,
            self.config.effective_password1(),
        )?;

        let body = serde_json::to_string(&token)?;
        let response = self
            .transport
            .post(
                &self.config.endpoints.invoice_list,
                body,
                &[("Content-Type", "application/json")],
            )
            .await?;

        serde_json::from_str(&response.body)
            .map_err(|e| RobokassaError::MalformedResponse(e.to_string()))
    }
}

/// Normalizes status/type lists to the gateway's documented casing.
///
/// Unknown values pass through untouched; non-list values are returned
/// as-is.
fn normalize_list(value: &Value) -> Value {
    let Some(items) = value.as_array() else {
        return value.clone();
    };
    let normalized = items
        .iter()
        .map(|item| match item.as_str().map(str::to_ascii_lowercase).as_deref() {
            Some("paid") => Value::from("Paid"),
            Some("expired") => Value::from("Expired"),
            Some("notpaid") => Value::from("Notpaid"),
            Some("onetime") => Value::from("OneTime"),
            Some("reusable") => Value::from("Reusable"),
            _ => item.clone(),
        })
        .collect();
    Value::Array(normalized)
}
