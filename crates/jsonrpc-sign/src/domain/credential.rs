//! # Caller Credentials
//!
//! A registered caller as the credential store hands it to the verifier.

use serde::Deserialize;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Shared secret of a caller.
///
/// Wiped from memory on drop and redacted from `Debug` output so it never ends
/// up in a log line.
#[derive(Clone, PartialEq, Eq, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(transparent)]
pub struct AppSecret(String);

impl AppSecret {
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AppSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AppSecret(***)")
    }
}

impl From<&str> for AppSecret {
    fn from(secret: &str) -> Self {
        Self::new(secret)
    }
}

impl From<String> for AppSecret {
    fn from(secret: String) -> Self {
        Self(secret)
    }
}

/// A caller registered with the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CallerCredential {
    /// Public identifier, the lookup key
    pub app_id: String,
    /// Shared secret; absent signs with the empty string
    #[serde(default)]
    pub app_secret: Option<AppSecret>,
    /// Allowed clock skew in seconds; `None` uses the verifier default
    #[serde(default)]
    pub sign_timeout_second: Option<u64>,
    /// Only active credentials resolve
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl CallerCredential {
    /// Create an active credential.
    pub fn new(app_id: impl Into<String>, app_secret: impl Into<AppSecret>) -> Self {
        Self {
            app_id: app_id.into(),
            app_secret: Some(app_secret.into()),
            sign_timeout_second: None,
            active: true,
        }
    }

    pub fn with_sign_timeout(mut self, seconds: u64) -> Self {
        self.sign_timeout_second = Some(seconds);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }

    /// Secret used for signing, empty when unset.
    pub fn secret(&self) -> &str {
        self.app_secret.as_ref().map(AppSecret::expose).unwrap_or("")
    }

    /// Skew window for this caller.
    pub fn tolerance_secs(&self, default: u64) -> u64 {
        self.sign_timeout_second.unwrap_or(default)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secret() {
        let credential = CallerCredential::new("app123", "secret123");
        let debug = format!("{credential:?}");
        assert!(debug.contains("app123"));
        assert!(!debug.contains("secret123"));
    }

    #[test]
    fn test_missing_secret_signs_with_empty_string() {
        let mut credential = CallerCredential::new("app123", "secret123");
        credential.app_secret = None;
        assert_eq!(credential.secret(), "");
    }

    #[test]
    fn test_tolerance_falls_back_to_default() {
        let credential = CallerCredential::new("app123", "s");
        assert_eq!(credential.tolerance_secs(180), 180);
        assert_eq!(credential.with_sign_timeout(60).tolerance_secs(180), 60);
    }

    #[test]
    fn test_deserialize_defaults() {
        let credential: CallerCredential =
            serde_json::from_str(r#"{ "app_id": "app123", "app_secret": "s3cr3t" }"#).unwrap();
        assert!(credential.active);
        assert_eq!(credential.secret(), "s3cr3t");
        assert_eq!(credential.sign_timeout_second, None);
    }
}
