//! # Signature Verification Service
//!
//! Application service that implements `SignatureVerificationApi`.
//!
//! ## Pipeline
//!
//! The check is strictly linear. Each stage either passes or ends the whole
//! check with one error:
//!
//! 1. **Caller**: `Signature-AppID` resolves to an active credential
//! 2. **Timestamp**: `Signature-Timestamp` lies within the caller's skew window
//! 3. **Presence**: `Signature` is present
//! 4. **Nonce**: `Signature-Nonce` is present
//! 5. **Algorithm**: `(Signature-Method, Signature-Version)` is supported
//! 6. **Comparison**: the submitted signature equals the computed one
//!
//! ## Security Notes
//!
//! - The timestamp is the caller's wall clock; no clock correction is applied
//! - Comparison is constant-time
//! - The nonce only contributes to the signed text; replays inside the skew
//!   window are not detected here

use crate::adapters::clock::SystemTimeSource;
use crate::domain::algorithm::{constant_time_eq, raw_text, SignatureType};
use crate::domain::config::SignConfig;
use crate::domain::credential::CallerCredential;
use crate::domain::errors::SignError;
use crate::domain::headers;
use crate::domain::request::SignatureRequest;
use crate::ports::inbound::SignatureVerificationApi;
use crate::ports::outbound::{CredentialStore, TimeSource};
use std::sync::Arc;
use tracing::{debug, warn};

const LOG_TARGET: &str = "jsonrpc_sign::verifier";

/// Signature Verification Service.
///
/// Stateless between calls; the store and clock are read-only collaborators.
pub struct SignatureVerifier<S: CredentialStore, T: TimeSource = SystemTimeSource> {
    store: S,
    clock: T,
    default_tolerance_secs: u64,
}

impl<S: CredentialStore> SignatureVerifier<S> {
    /// Create a verifier on the system clock with the default 180 s window.
    pub fn new(store: S) -> Self {
        Self::with_clock(store, SystemTimeSource)
    }
}

impl<S: CredentialStore, T: TimeSource> SignatureVerifier<S, T> {
    /// Create a verifier with a custom clock.
    pub fn with_clock(store: S, clock: T) -> Self {
        Self {
            store,
            clock,
            default_tolerance_secs: headers::DEFAULT_TOLERANCE_SECS,
        }
    }

    /// Create a verifier using the configured default skew window.
    pub fn from_config(store: S, clock: T, config: &SignConfig) -> Self {
        Self::with_clock(store, clock).with_default_tolerance(config.default_tolerance_secs)
    }

    /// Skew window for credentials that do not set their own.
    pub fn with_default_tolerance(mut self, seconds: u64) -> Self {
        self.default_tolerance_secs = seconds;
        self
    }

    pub fn default_tolerance(&self) -> u64 {
        self.default_tolerance_secs
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn resolve_caller(&self, req: &SignatureRequest) -> Result<Arc<CallerCredential>, SignError> {
        let app_id = self.extract_app_id(req)?;
        self.store
            .find_active_credential(app_id)
            .ok_or_else(SignError::app_id_not_found)
    }

    /// Returns the raw timestamp text for signing.
    fn validate_timestamp<'r>(
        &self,
        req: &'r SignatureRequest,
        caller: &CallerCredential,
    ) -> Result<&'r str, SignError> {
        let raw = req
            .non_empty_header(headers::TIMESTAMP)
            .ok_or_else(SignError::timeout)?;

        let timestamp = leading_int(raw);

        let now = i64::try_from(self.clock.now()).unwrap_or(i64::MAX);
        let skew = now.abs_diff(timestamp);
        let tolerance = caller.tolerance_secs(self.default_tolerance_secs);

        if skew > tolerance {
            debug!(
                target: LOG_TARGET,
                app_id = %caller.app_id,
                skew,
                tolerance,
                "Signature timestamp outside skew window"
            );
            return Err(SignError::timeout());
        }

        Ok(raw)
    }

    fn validate_signature(
        &self,
        req: &SignatureRequest,
        caller: &CallerCredential,
        timestamp: &str,
    ) -> Result<(), SignError> {
        let submitted = req
            .non_empty_header(headers::SIGNATURE)
            .ok_or_else(SignError::required)?;

        let nonce = self.extract_nonce(req)?;
        let sign_type = SignatureType::new(self.extract_method(req), self.extract_version(req));

        let algorithm = sign_type.algorithm().ok_or_else(|| {
            debug!(
                target: LOG_TARGET,
                app_id = %caller.app_id,
                sign_type = %sign_type,
                "Unsupported signature type"
            );
            SignError::error().with_data(serde_json::json!({
                "method": sign_type.method,
                "version": sign_type.version,
            }))
        })?;

        let expected = algorithm.sign(req.body(), timestamp, nonce, caller.secret())?;

        if !constant_time_eq(&expected, submitted) {
            let raw = raw_text(req.body(), timestamp, nonce);
            warn!(
                target: LOG_TARGET,
                app_id = %caller.app_id,
                server_sign = %expected,
                submit_sign = %submitted,
                raw_text = %String::from_utf8_lossy(&raw),
                "JSON-RPC signature mismatch"
            );
            return Err(SignError::error());
        }

        Ok(())
    }
}

impl<S: CredentialStore, T: TimeSource> SignatureVerificationApi for SignatureVerifier<S, T> {
    fn check_request(&self, req: &SignatureRequest) -> Result<(), SignError> {
        let caller = self.resolve_caller(req)?;
        let timestamp = self.validate_timestamp(req, &caller)?;
        self.validate_signature(req, &caller, timestamp)?;

        debug!(
            target: LOG_TARGET,
            app_id = %caller.app_id,
            path = req.path(),
            "Signature verified"
        );
        Ok(())
    }
}

/// Integer prefix of a timestamp header, 0 when there is none.
///
/// Leading whitespace and one sign are accepted, trailing text is ignored
/// (`"1700000000.5"` and `"1700000000abc"` both read as 1700000000).
/// Out-of-range values saturate.
fn leading_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start_matches([' ', '\t', '\n', '\r', '\x0b', '\x0c']);
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let value = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, d| {
            acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
        });

    if negative {
        -value
    } else {
        value
    }
}

// =============================================================================
// TESTS
// =============================================================================
