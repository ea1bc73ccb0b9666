//! Payment link and invoice creation.
//!
//! Two ways to obtain a payment URL:
//!
//! - [`PaymentService::create_link`] is the form flow: urlencoded POST with
//!   a `SignatureValue` computed by the payment signature scheme.
//! - [`PaymentService::create_invoice`] is the JWT flow: an HMAC-MD5 signed
//!   token POSTed as a quoted JSON string.

use std::sync::Arc;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;
use url::form_urlencoded;

use crate::{
    config::Config,
    error::{Result, RobokassaError},
    signature::{canonical, is_custom_field, JwtHeader, Params, SignatureService},
    transport::HttpTransport,
};

/// Core fields the form flow copies into the signature parameter set.
const SIGNED_FORM_FIELDS: [&str; 6] = [
    "OutSum",
    "InvoiceID",
    "Receipt",
    "ResultUrl2",
    "SuccessUrl2",
    "SuccessUrl2Method",
];

/// Parameters for the JWT invoice creation flow.
///
/// `inv_id` and `out_sum` are required by the gateway; everything else is
/// optional. `invoice_type` defaults to `OneTime` and `culture` to `ru`
/// when unset.
#[derive(Debug, Clone)]
pub struct CreateInvoiceParams {
    /// Invoice number, unique per merchant.
    pub inv_id: i64,
    /// Amount to charge.
    pub out_sum: f64,
    /// `OneTime` or `Reusable`.
    pub invoice_type: Option<String>,
    /// Interface language (`ru`, `en`, ...).
    pub culture: Option<String>,
    /// Human-readable purchase description.
    pub description: Option<String>,
    /// Free-form merchant comment.
    pub merchant_comments: Option<String>,
    /// Itemized invoice lines.
    pub invoice_items: Option<Value>,
    /// Merchant-custom (`shp_*`) user fields.
    pub user_fields: Option<Value>,
    /// Success redirect override (`Url` + `Method`).
    pub success_url2_data: Option<Value>,
    /// Failure redirect override (`Url` + `Method`).
    pub fail_url2_data: Option<Value>,
}

impl CreateInvoiceParams {
    /// Creates invoice parameters with the two required fields.
    #[must_use]
    pub fn new(inv_id: i64, out_sum: f64) -> Self {
        Self {
            inv_id,
            out_sum,
            invoice_type: None,
            culture: None,
            description: None,
            merchant_comments: None,
            invoice_items: None,
            user_fields: None,
            success_url2_data: None,
            fail_url2_data: None,
        }
    }
}

/// JWT payload for invoice creation. Field order is the signed byte order.
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct InvoicePayload<'a> {
    merchant_login: &'a str,
    invoice_type: &'a str,
    culture: &'a str,
    inv_id: i64,
    out_sum: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    merchant_comments: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    invoice_items: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    user_fields: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    success_url2_data: Option<&'a Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fail_url2_data: Option<&'a Value>,
}

/// Payment link and invoice request builder.
#[derive(Clone)]
pub struct PaymentService {
    transport: Arc<dyn HttpTransport>,
    signer: Arc<SignatureService>,
    config: Arc<Config>,
}

impl std::fmt::Debug for PaymentService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentService")
            .field("merchant_login", &self.config.merchant_login)
            .finish_non_exhaustive()
    }
}

impl PaymentService {
    pub(crate) fn new(
        transport: Arc<dyn HttpTransport>,
        signer: Arc<SignatureService>,
        config: Arc<Config>,
    ) -> Self {
        Self { transport, signer, config }
    }

    /// Creates a payment link through the form endpoint.
    ///
    /// Requires `OutSum` and `Description` in `params`; `InvoiceID`,
    /// `Receipt` and `Shp_*` fields participate in the signature when
    /// present. Returns the full payment URL for the created invoice.
    ///
    /// # Errors
    ///
    /// - [`RobokassaError::MissingField`] if `OutSum` or `Description` is
    ///   absent.
    /// - [`RobokassaError::GatewayError`] on a non-200 reply.
    /// - [`RobokassaError::MalformedResponse`] if the reply carries no
    ///   invoice id.
    #[instrument(skip(self, params))]
    pub async fn create_link(&self, params: &Params) -> Result<String> {
        for required in ["OutSum", "Description"] {
            if !params.contains_key(required) {
                return Err(RobokassaError::MissingField(required.to_owned()));
            }
        }

        let signature = self.signer.sign_payment(
            &self.signature_params(params),
            self.config.effective_password1(),
            Some(&self.config.hash_algorithm),
        )?;

        let body = self.form_body(params, &signature)?;
        let response = self
            .transport
            .post(
                &self.config.endpoints.payment_json,
                body,
                &[("Content-Type", "application/x-www-form-urlencoded")],
            )
            .await?;

        if response.status != 200 {
            return Err(RobokassaError::GatewayError(format!(
                "payment request failed with HTTP {}",
                response.status
            )));
        }

        let reply: Value = serde_json::from_str(&response.body)
            .map_err(|e| RobokassaError::MalformedResponse(e.to_string()))?;
        match reply.get("invoiceID") {
            Some(id) if !id.is_null() => {
                let id = canonical::render_value(id)?;
                Ok(format!("{}{id}", self.config.endpoints.payment_base))
            }
            _ => Err(RobokassaError::MalformedResponse(
                "invoice id not found in response".to_owned(),
            )),
        }
    }

    /// Creates an invoice through the JWT endpoint and returns its URL.
    ///
    /// # Errors
    ///
    /// - [`RobokassaError::EncodingFailure`] if the payload cannot be
    ///   serialized.
    /// - [`RobokassaError::GatewayError`] if the reply carries no `url`.
    #[instrument(skip(self, params), fields(inv_id = params.inv_id))]
    pub async fn create_invoice(&self, params: &CreateInvoiceParams) -> Result<String> {
        let payload = InvoicePayload {
            merchant_login: &self.config.merchant_login,
            invoice_type: params.invoice_type.as_deref().unwrap_or("OneTime"),
            culture: params.culture.as_deref().unwrap_or("ru"),
            inv_id: params.inv_id,
            out_sum: params.out_sum,
            description: params.description.as_deref(),
            merchant_comments: params.merchant_comments.as_deref(),
            invoice_items: params.invoice_items.as_ref(),
            user_fields: params.user_fields.as_ref(),
            success_url2_data: params.success_url2_data.as_ref(),
            fail_url2_data: params.fail_url2_data.as_ref(),
        };

        let token = self.signer.jwt_token(
            &JwtHeader::md5(),
            &payload,
            &self.config.merchant_login,
            self.config.effective_password1(),
        )?;

        // the transport sends the JWT as a quoted JSON string, not raw
        let body = serde_json::to_string(&token)?;
        let response = self
            .transport
            .post(
                &self.config.endpoints.create_invoice,
                body,
                &[("Content-Type", "application/json")],
            )
            .await?;

        let reply: Value = serde_json::from_str(&response.body)
            .map_err(|e| RobokassaError::MalformedResponse(e.to_string()))?;
        match reply.get("url").and_then(Value::as_str) {
            Some(url) => Ok(url.to_owned()),
            None => Err(RobokassaError::GatewayError(format!(
                "invoice creation failed: {}",
                response.body
            ))),
        }
    }

    /// Assembles the parameter set the payment signature covers.
    fn signature_params(&self, params: &Params) -> Params {
        let mut signed = Params::new();
        signed.insert("MerchantLogin".to_owned(), Value::from(self.config.merchant_login.clone()));
        for field in SIGNED_FORM_FIELDS {
            if let Some(value) = params.get(field) {
                signed.insert(field.to_owned(), value.clone());
            }
        }
        for (key, value) in params {
            if is_custom_field(key) {
                signed.insert(key.clone(), value.clone());
            }
        }
        signed
    }

    /// Builds the urlencoded form body.
    ///
    /// The gateway form-decodes the body once and still expects the
    /// receipt JSON double-encoded and `Shp_*` values single-encoded, so
    /// two (resp. one) percent-encoding passes go in before the form
    /// layer adds its own. Signature inputs stay raw.
    fn form_body(&self, params: &Params, signature: &str) -> Result<String> {
        let mut form = form_urlencoded::Serializer::new(String::new());
        for (key, value) in params {
            if key == "Receipt" {
                let json = serde_json::to_string(value)?;
                let once = utf8_percent_encode(&json, NON_ALPHANUMERIC).to_string();
                let twice = utf8_percent_encode(&once, NON_ALPHANUMERIC).to_string();
                form.append_pair(key, &twice);
            } else if is_custom_field(key) {
                let rendered = canonical::render_value(value)?;
                let encoded = utf8_percent_encode(&rendered, NON_ALPHANUMERIC).to_string();
                form.append_pair(key, &encoded);
            } else {
                form.append_pair(key, &canonical::render_value(value)?);
            }
        }
        form.append_pair("MerchantLogin", &self.config.merchant_login);
        if self.config.is_test {
            form.append_pair("IsTest", "1");
        }
        form.append_pair("SignatureValue", signature);
        Ok(form.finish())
    }
}
