//! Unpadded URL-safe base64 codec.
//!
//! The gateway requires base64url per RFC 4648 §5 with padding stripped:
//! the standard alphabet with `+`→`-` and `/`→`_`, no trailing `=`.
//! Encoding is total: any byte input maps to a string, empty included.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Encodes bytes as unpadded URL-safe base64.
///
/// # Examples
///
/// ```
/// use robokassa_client::signature::base64url;
///
/// assert_eq!(base64url::encode(b"{\"a\":1}"), "eyJhIjoxfQ");
/// assert_eq!(base64url::encode(b""), "");
/// ```
#[must_use]
pub fn encode(data: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(data)
}

/// Decodes an unpadded URL-safe base64 string.
///
/// The gateway flows are encode-only; decoding exists to validate the
/// alphabet mapping round-trips.
///
/// # Errors
///
/// Returns the underlying [`base64::DecodeError`] for input outside the
/// URL-safe alphabet or with invalid length.
pub fn decode(data: &str) -> std::result::Result<Vec<u8>, base64::DecodeError> {
    URL_SAFE_NO_PAD.decode(data)
}
