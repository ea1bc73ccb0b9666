//! Signature and canonicalization core.
//!
//! Implements the three signing conventions the gateway recognizes, plus
//! the primitives they share:
//!
//! - **Payment scheme** ([`SignatureService::sign_payment`]): canonical
//!   colon-joined field string (see [`canonical`]) digested to hex.
//! - **Fiscal scheme** ([`SignatureService::sign_fiscal`]): hex digest of
//!   `base64url(payload) + secret`, re-encoded as base64url. The hex
//!   *text* is encoded, not decoded back to bytes.
//! - **Status-query scheme** ([`SignatureService::sign_op_state`]): hex
//!   digest of `login:invoice_id:secret`.
//! - **JWT flows** ([`SignatureService::jwt_token`]): envelope from
//!   [`build_envelope`] signed with HMAC-MD5 under `login:password1`.
//!
//! Every operation is a pure function over its inputs. The only state a
//! [`SignatureService`] holds is the immutable default algorithm name, so
//! instances are freely shareable across threads.
//!
//! # Examples
//!
//! ```
//! use robokassa_client::signature::SignatureService;
//!
//! let signer = SignatureService::default();
//! let signature = signer.sign_op_state("login123", "1973546115", "secret2", None);
//! assert_eq!(signature, "5a00debc80b608b85f22b1ae6dd0c16f");
//! ```

pub mod base64url;
pub mod canonical;
pub mod digest;
pub mod hmac;
pub mod jwt;

#[cfg(test)]
mod tests;

use serde::Serialize;

pub use canonical::{is_custom_field, payment_hash_string, Params};
pub use digest::{digest_hex, HashAlgorithm};
pub use hmac::hmac_md5;
pub use jwt::{build_envelope, JwtEnvelope, JwtHeader};

use crate::error::Result;

/// Signing service bound to a default hash algorithm.
///
/// The default is the *request-time* default: a per-call algorithm name,
/// when supplied, takes precedence. Either way, names outside the
/// allow-list degrade silently to MD5 (see [`HashAlgorithm::resolve`]).
#[derive(Debug, Clone)]
pub struct SignatureService {
    default_algorithm: String,
}

impl Default for SignatureService {
    fn default() -> Self {
        Self::new("md5")
    }
}

impl SignatureService {
    /// Creates a signing service with the given default algorithm name.
    ///
    /// The name is kept verbatim; it is resolved (and possibly degraded
    /// to MD5) at each signing call, never up front.
    #[must_use]
    pub fn new(default_algorithm: impl Into<String>) -> Self {
        Self { default_algorithm: default_algorithm.into() }
    }

    /// The configured default algorithm name.
    #[must_use]
    pub fn default_algorithm(&self) -> &str {
        &self.default_algorithm
    }

    fn resolve(&self, algorithm: Option<&str>) -> HashAlgorithm {
        HashAlgorithm::resolve(algorithm, &self.default_algorithm)
    }

    /// Signs a payment request: canonical field string → hex digest.
    ///
    /// See [`payment_hash_string`] for the canonical layout. The result is
    /// transmitted as the `SignatureValue` form field.
    ///
    /// # Errors
    ///
    /// - [`crate::RobokassaError::MissingField`] if `OutSum` is absent.
    /// - [`crate::RobokassaError::EncodingFailure`] if a nested value
    ///   (e.g. `Receipt`) fails JSON serialization.
    pub fn sign_payment(
        &self,
        params: &Params,
        secret: &str,
        algorithm: Option<&str>,
    ) -> Result<String> {
        let hash_string = payment_hash_string(params, secret)?;
        Ok(digest_hex(hash_string.as_bytes(), self.resolve(algorithm)))
    }

    /// Signs a fiscal (second-check / check-status) payload.
    ///
    /// Digests `base64_payload + secret` to hex, then base64url-encodes
    /// the hex text. The caller concatenates
    /// `base64_payload + "." + signature` as the request body.
    #[must_use]
    pub fn sign_fiscal(
        &self,
        base64_payload: &str,
        secret: &str,
        algorithm: Option<&str>,
    ) -> String {
        let mut input = String::with_capacity(base64_payload.len() + secret.len());
        input.push_str(base64_payload);
        input.push_str(secret);
        let hex = digest_hex(input.as_bytes(), self.resolve(algorithm));
        base64url::encode(hex.as_bytes())
    }

    /// Signs an `OpStateExt` status query: `login:invoice_id:secret`.
    #[must_use]
    pub fn sign_op_state(
        &self,
        login: &str,
        invoice_id: &str,
        secret: &str,
        algorithm: Option<&str>,
    ) -> String {
        let input = format!("{login}:{invoice_id}:{secret}");
        digest_hex(input.as_bytes(), self.resolve(algorithm))
    }

    /// Signs a JWT signing input with HMAC-MD5 under `login:password1`.
    ///
    /// Returns the base64url-encoded signature, the final token segment.
    /// The HMAC hash is fixed to MD5 by the gateway regardless of the
    /// configured default.
    #[must_use]
    pub fn jwt_sign(&self, signing_input: &str, merchant_login: &str, password1: &str) -> String {
        let key = format!("{merchant_login}:{password1}");
        let raw = hmac_md5(signing_input.as_bytes(), key.as_bytes());
        base64url::encode(&raw)
    }

    /// Builds and signs a complete gateway JWT.
    ///
    /// Orchestrates [`build_envelope`] and [`Self::jwt_sign`]:
    /// `signing_input + "." + signature`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RobokassaError::EncodingFailure`] if the header or
    /// payload fails JSON serialization.
    ///
    /// # Examples
    ///
    /// ```
    /// use robokassa_client::signature::{JwtHeader, SignatureService};
    ///
    /// # fn example() -> robokassa_client::Result<()> {
    /// let signer = SignatureService::default();
    /// let payload = serde_json::json!({"MerchantLogin": "demo", "InvId": 1, "OutSum": 10.0});
    /// let token = signer.jwt_token(&JwtHeader::md5(), &payload, "demo", "pw1")?;
    /// assert_eq!(token.split('.').count(), 3);
    /// # Ok(())
    /// # }
    /// ```
    pub fn jwt_token<H: Serialize, P: Serialize>(
        &self,
        header: &H,
        payload: &P,
        merchant_login: &str,
        password1: &str,
    ) -> Result<String> {
        let envelope = build_envelope(header, payload)?;
        let signature = self.jwt_sign(&envelope.signing_input, merchant_login, password1);
        Ok(format!("{}.{}", envelope.signing_input, signature))
    }
}
