//! # Signature Algorithms
//!
//! Maps a `(Signature-Method, Signature-Version)` pair to a signing function.
//!
//! Matching is exact and case-sensitive:
//!
//! | method | version | algorithm |
//! |---|---|---|
//! | `md5` | `1.0` | [`SignatureAlgorithm::Md5V1`] |
//! | `HMAC-SHA1` | `1.0` | [`SignatureAlgorithm::HmacSha1V1`] |
//! | `sha1` | `1.0` | [`SignatureAlgorithm::HmacSha1V1`] |
//!
//! Clients and servers must agree byte for byte, so the table is not
//! normalized.

use super::errors::SignError;
use hmac::{Hmac, Mac};
use md5::{Digest, Md5};
use sha1::Sha1;
use std::fmt;
use subtle::ConstantTimeEq;

type HmacSha1 = Hmac<Sha1>;

/// The `(method, version)` pair a caller asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureType<'a> {
    pub method: &'a str,
    pub version: &'a str,
}

impl<'a> SignatureType<'a> {
    pub fn new(method: &'a str, version: &'a str) -> Self {
        Self { method, version }
    }

    /// Resolve to a supported algorithm.
    pub fn algorithm(&self) -> Option<SignatureAlgorithm> {
        SignatureAlgorithm::resolve(self.method, self.version)
    }
}

impl fmt::Display for SignatureType<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.method, self.version)
    }
}

/// Supported signing algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignatureAlgorithm {
    /// `hex(MD5(body ‖ timestamp ‖ nonce ‖ secret))`
    Md5V1,
    /// `hex(HMAC-SHA1(key = secret, body ‖ timestamp ‖ nonce))`
    HmacSha1V1,
}

impl SignatureAlgorithm {
    /// Look up the algorithm for a method/version pair, `None` if unsupported.
    pub fn resolve(method: &str, version: &str) -> Option<Self> {
        match (method, version) {
            ("md5", "1.0") => Some(SignatureAlgorithm::Md5V1),
            ("HMAC-SHA1", "1.0") | ("sha1", "1.0") => Some(SignatureAlgorithm::HmacSha1V1),
            _ => None,
        }
    }

    /// Compute the lowercase hex signature.
    ///
    /// `timestamp` is the raw header text, never re-formatted. The MD5 variant
    /// appends the secret to the signed text; the HMAC variant only keys with it.
    pub fn sign(
        self,
        body: &[u8],
        timestamp: &str,
        nonce: &str,
        secret: &str,
    ) -> Result<String, SignError> {
        match self {
            SignatureAlgorithm::Md5V1 => {
                let mut hasher = Md5::new();
                hasher.update(body);
                hasher.update(timestamp.as_bytes());
                hasher.update(nonce.as_bytes());
                hasher.update(secret.as_bytes());
                Ok(hex::encode(hasher.finalize()))
            }
            SignatureAlgorithm::HmacSha1V1 => {
                let mut mac = HmacSha1::new_from_slice(secret.as_bytes())
                    .map_err(|_| SignError::error())?;
                mac.update(body);
                mac.update(timestamp.as_bytes());
                mac.update(nonce.as_bytes());
                Ok(hex::encode(mac.finalize().into_bytes()))
            }
        }
    }

    /// Canonical `(method, version)` a client should send for this algorithm.
    pub fn signature_type(self) -> SignatureType<'static> {
        match self {
            SignatureAlgorithm::Md5V1 => SignatureType::new("md5", "1.0"),
            SignatureAlgorithm::HmacSha1V1 => SignatureType::new("HMAC-SHA1", "1.0"),
        }
    }
}

/// The text that gets signed, without the secret.
pub fn raw_text(body: &[u8], timestamp: &str, nonce: &str) -> Vec<u8> {
    let mut text = Vec::with_capacity(body.len() + timestamp.len() + nonce.len());
    text.extend_from_slice(body);
    text.extend_from_slice(timestamp.as_bytes());
    text.extend_from_slice(nonce.as_bytes());
    text
}

/// Constant-time string comparison.
///
/// Lengths are compared up front; signatures have a fixed hex width per
/// algorithm. Contents are compared with `subtle` so the running time does
/// not reveal the first differing byte.
pub fn constant_time_eq(a: &str, b: &str) -> bool {
    a.len() == b.len() && bool::from(a.as_bytes().ct_eq(b.as_bytes()))
}
