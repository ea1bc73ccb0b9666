//! Hash algorithm allow-list and hex digest engine.
//!
//! The gateway accepts exactly three algorithms: `md5`, `sha256` and
//! `sha512`. Anything else (unknown names, empty strings) silently
//! degrades to MD5. That degrade is policy, not an error path: the
//! configured default is only the request-time default, while MD5 is the
//! hard fallback-of-last-resort.

use md5::Md5;
use sha2::{Digest, Sha256, Sha512};

/// Hash algorithm accepted by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HashAlgorithm {
    /// MD5 (the gateway default and the hard fallback).
    Md5,
    /// SHA-256.
    Sha256,
    /// SHA-512.
    Sha512,
}

impl HashAlgorithm {
    /// Parses an algorithm name, case-insensitively.
    ///
    /// Returns `None` for names outside the allow-list; callers that need
    /// the gateway's permissive behavior use [`HashAlgorithm::resolve`].
    ///
    /// # Examples
    ///
    /// ```
    /// use robokassa_client::signature::HashAlgorithm;
    ///
    /// assert_eq!(HashAlgorithm::parse("SHA256"), Some(HashAlgorithm::Sha256));
    /// assert_eq!(HashAlgorithm::parse("ripemd160"), None);
    /// ```
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "md5" => Some(Self::Md5),
            "sha256" => Some(Self::Sha256),
            "sha512" => Some(Self::Sha512),
            _ => None,
        }
    }

    /// Resolves the effective algorithm for one signing call.
    ///
    /// Precedence: the per-call `requested` name if given, else the
    /// configured `default` name; the winner is then checked against the
    /// allow-list and degrades to MD5 when it fails. The configured
    /// default is deliberately subject to the same degrade and is never
    /// validated ahead of time here.
    #[must_use]
    pub fn resolve(requested: Option<&str>, default: &str) -> Self {
        let name = requested.unwrap_or(default);
        Self::parse(name).unwrap_or(Self::Md5)
    }

    /// Canonical lower-case name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Md5 => "md5",
            Self::Sha256 => "sha256",
            Self::Sha512 => "sha512",
        }
    }

    /// Digest size in bytes.
    #[must_use]
    pub const fn digest_len(&self) -> usize {
        match self {
            Self::Md5 => 16,
            Self::Sha256 => 32,
            Self::Sha512 => 64,
        }
    }
}

/// Computes the lower-case hex digest of `input` under `algorithm`.
///
/// Total function: every byte input digests, there is no error path.
///
/// # Examples
///
/// ```
/// use robokassa_client::signature::{digest_hex, HashAlgorithm};
///
/// let hex = digest_hex(b"login123:1973546115:secret2", HashAlgorithm::Md5);
/// assert_eq!(hex, "5a00debc80b608b85f22b1ae6dd0c16f");
/// ```
#[must_use]
pub fn digest_hex(input: &[u8], algorithm: HashAlgorithm) -> String {
    match algorithm {
        HashAlgorithm::Md5 => hex::encode(Md5::digest(input)),
        HashAlgorithm::Sha256 => hex::encode(Sha256::digest(input)),
        HashAlgorithm::Sha512 => hex::encode(Sha512::digest(input)),
    }
}
