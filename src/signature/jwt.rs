//! JWT envelope construction for the gateway's invoice interfaces.
//!
//! The invoice creation and invoice listing endpoints accept a JWT-like
//! token: `base64url(header JSON) + "." + base64url(payload JSON)`, signed
//! with HMAC-MD5 and the signature appended after a final dot. The JSON
//! byte form is what gets signed, so it must be reproducible: serde_json
//! already emits unescaped unicode and unescaped slashes, and key order is
//! deterministic (declaration order for structs, sorted order for value
//! maps).

use serde::Serialize;

use crate::{
    error::Result,
    signature::base64url,
};

/// Fixed JWT header for the gateway's HMAC-MD5 flows.
#[derive(Debug, Clone, Serialize)]
pub struct JwtHeader {
    /// Signing algorithm label. The gateway expects the literal `MD5`.
    pub alg: &'static str,
    /// Token type, always `JWT`.
    pub typ: &'static str,
}

impl JwtHeader {
    /// The `{"alg":"MD5","typ":"JWT"}` header every gateway JWT carries.
    #[must_use]
    pub const fn md5() -> Self {
        Self { alg: "MD5", typ: "JWT" }
    }
}

/// Encoded JWT parts ready for signing.
///
/// `signing_input` is `encoded_header + "." + encoded_payload`; appending
/// `"." + signature` completes the token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JwtEnvelope {
    /// Base64url-encoded header JSON.
    pub encoded_header: String,
    /// Base64url-encoded payload JSON.
    pub encoded_payload: String,
    /// The exact byte string the signature covers.
    pub signing_input: String,
}

/// Encodes a header and payload into a signable JWT envelope.
///
/// # Errors
///
/// Returns [`crate::RobokassaError::EncodingFailure`] if either object
/// fails JSON serialization.
///
/// # Examples
///
/// ```
/// use robokassa_client::signature::{build_envelope, JwtHeader};
///
/// # fn example() -> robokassa_client::Result<()> {
/// let payload = serde_json::json!({"MerchantLogin": "demo", "InvId": 1});
/// let envelope = build_envelope(&JwtHeader::md5(), &payload)?;
/// assert_eq!(
///     envelope.signing_input,
///     format!("{}.{}", envelope.encoded_header, envelope.encoded_payload),
/// );
/// # Ok(())
/// # }
/// ```
pub fn build_envelope<H: Serialize, P: Serialize>(header: &H, payload: &P) -> Result<JwtEnvelope> {
    let header_json = serde_json::to_string(header)?;
    let payload_json = serde_json::to_string(payload)?;

    let encoded_header = base64url::encode(header_json.as_bytes());
    let encoded_payload = base64url::encode(payload_json.as_bytes());
    let signing_input = format!("{encoded_header}.{encoded_payload}");

    Ok(JwtEnvelope { encoded_header, encoded_payload, signing_input })
}
