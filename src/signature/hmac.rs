//! Keyed HMAC for the gateway's JWT flows.
//!
//! The JWT interfaces sign with HMAC-MD5 only; the algorithm is fixed by
//! the gateway, not configurable. The key is assembled by the caller as
//! `merchant_login:password1`. Output is raw bytes, intended for immediate
//! base64url encoding; it is never rendered as hex.

use hmac::{Hmac, Mac};
use md5::Md5;

type HmacMd5 = Hmac<Md5>;

/// Computes the raw HMAC-MD5 of `message` under `key`.
#[must_use]
pub fn hmac_md5(message: &[u8], key: &[u8]) -> [u8; 16] {
    let mut mac = HmacMd5::new_from_slice(key).expect("HMAC can take key of any size");
    mac.update(message);
    mac.finalize().into_bytes().into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signature::base64url;

    #[test]
    fn test_hmac_md5_known_value() {
        // cross-checked against hash_hmac('md5', 'abc', 'k', true)
        let raw = hmac_md5(b"abc", b"k");
        assert_eq!(base64url::encode(&raw), "dZcsnGVp8vQHdS3bAqx53g");
    }

    #[test]
    fn test_hmac_md5_output_is_16_bytes() {
        assert_eq!(hmac_md5(b"", b"").len(), 16);
    }

    #[test]
    fn test_different_keys_different_macs() {
        assert_ne!(hmac_md5(b"msg", b"key-a"), hmac_md5(b"msg", b"key-b"));
    }

    #[test]
    fn test_long_key_accepted() {
        // keys longer than the MD5 block size are hashed down, not rejected
        let long_key = vec![0x61u8; 200];
        assert_eq!(hmac_md5(b"msg", &long_key).len(), 16);
    }
}
