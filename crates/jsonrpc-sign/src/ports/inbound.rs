//! # Inbound Ports (Driving Ports / API)
//!
//! The public API of the verifier.

use crate::domain::errors::SignError;
use crate::domain::headers;
use crate::domain::request::SignatureRequest;

/// Signature Verification API.
///
/// Header extraction comes with default implementations; implementors
/// provide `check_request`. Implementations must be thread-safe
/// (`Send + Sync`).
pub trait SignatureVerificationApi: Send + Sync {
    /// Read `Signature-Nonce`.
    ///
    /// # Errors
    /// * `NonceMissing` - header absent or empty
    fn extract_nonce<'r>(&self, req: &'r SignatureRequest) -> Result<&'r str, SignError> {
        req.non_empty_header(headers::NONCE)
            .ok_or_else(SignError::nonce_missing)
    }

    /// Read `Signature-Method`, `"HMAC-SHA1"` when absent.
    fn extract_method<'r>(&self, req: &'r SignatureRequest) -> &'r str {
        req.header(headers::METHOD)
            .unwrap_or(headers::DEFAULT_METHOD)
    }

    /// Read `Signature-Version`, `"1.0"` when absent.
    fn extract_version<'r>(&self, req: &'r SignatureRequest) -> &'r str {
        req.header(headers::VERSION)
            .unwrap_or(headers::DEFAULT_VERSION)
    }

    /// Read `Signature-AppID`.
    ///
    /// # Errors
    /// * `AppIdMissing` - header absent or empty
    fn extract_app_id<'r>(&self, req: &'r SignatureRequest) -> Result<&'r str, SignError> {
        req.non_empty_header(headers::APP_ID)
            .ok_or_else(SignError::app_id_missing)
    }

    /// Run the full verification pipeline.
    ///
    /// Succeeds with no value, or fails with exactly one [`SignError`]:
    /// caller lookup, then timestamp, then signature presence, then nonce,
    /// then algorithm and comparison.
    fn check_request(&self, req: &SignatureRequest) -> Result<(), SignError>;
}

impl<V: SignatureVerificationApi + ?Sized> SignatureVerificationApi for std::sync::Arc<V> {
    fn extract_nonce<'r>(&self, req: &'r SignatureRequest) -> Result<&'r str, SignError> {
        (**self).extract_nonce(req)
    }

    fn extract_method<'r>(&self, req: &'r SignatureRequest) -> &'r str {
        (**self).extract_method(req)
    }

    fn extract_version<'r>(&self, req: &'r SignatureRequest) -> &'r str {
        (**self).extract_version(req)
    }

    fn extract_app_id<'r>(&self, req: &'r SignatureRequest) -> Result<&'r str, SignError> {
        (**self).extract_app_id(req)
    }

    fn check_request(&self, req: &SignatureRequest) -> Result<(), SignError> {
        (**self).check_request(req)
    }
}
