//! # Signature Errors
//!
//! One error type for every way a signed call can be rejected. Each kind maps
//! to a stable JSON-RPC 2.0 error code so the RPC framework can surface it
//! as-is.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// JSON-RPC 2.0 error codes used by this crate
pub mod codes {
    /// Invalid request - every signature rejection uses this code
    pub const INVALID_REQUEST: i32 = -32600;
    /// Internal error - the environment could not supply a request
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Why a signed call was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignErrorKind {
    /// `Signature-AppID` absent or empty
    AppIdMissing,
    /// No active credential for the app id
    AppIdNotFound,
    /// `Signature-Nonce` absent or empty
    NonceMissing,
    /// `Signature` absent or empty
    Required,
    /// Timestamp absent, unparsable or outside the skew window
    Timeout,
    /// Signature mismatch or unsupported method/version
    Error,
    /// The interceptor found no current request to verify
    RequestNotAvailable,
}

impl SignErrorKind {
    /// JSON-RPC error code for this kind.
    pub const fn code(self) -> i32 {
        match self {
            SignErrorKind::RequestNotAvailable => codes::INTERNAL_ERROR,
            _ => codes::INVALID_REQUEST,
        }
    }

    /// Message used when none is supplied.
    pub const fn default_message(self) -> &'static str {
        match self {
            SignErrorKind::AppIdMissing => "Missing signature app id",
            SignErrorKind::AppIdNotFound => "App id not found",
            SignErrorKind::NonceMissing => "Missing signature nonce",
            SignErrorKind::Required => "Missing signature",
            SignErrorKind::Timeout => "Signature expired",
            SignErrorKind::Error => "Signature error",
            SignErrorKind::RequestNotAvailable => "No request available",
        }
    }
}

/// A rejected signature check.
///
/// Carries the kind, a human message and optional structured data, and
/// serializes as a JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("[{}] {}", .kind.code(), .message)]
pub struct SignError {
    kind: SignErrorKind,
    message: String,
    data: Option<serde_json::Value>,
}

impl SignError {
    /// Create an error with the kind's default message.
    pub fn new(kind: SignErrorKind) -> Self {
        Self::with_message(kind, kind.default_message())
    }

    /// Create an error with a custom message.
    pub fn with_message(kind: SignErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            data: None,
        }
    }

    /// Attach structured data.
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn app_id_missing() -> Self {
        Self::new(SignErrorKind::AppIdMissing)
    }

    pub fn app_id_not_found() -> Self {
        Self::new(SignErrorKind::AppIdNotFound)
    }

    pub fn nonce_missing() -> Self {
        Self::new(SignErrorKind::NonceMissing)
    }

    pub fn required() -> Self {
        Self::new(SignErrorKind::Required)
    }

    pub fn timeout() -> Self {
        Self::new(SignErrorKind::Timeout)
    }

    pub fn error() -> Self {
        Self::new(SignErrorKind::Error)
    }

    pub fn request_not_available() -> Self {
        Self::new(SignErrorKind::RequestNotAvailable)
    }

    pub fn kind(&self) -> SignErrorKind {
        self.kind
    }

    pub fn code(&self) -> i32 {
        self.kind.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn data(&self) -> Option<&serde_json::Value> {
        self.data.as_ref()
    }

    /// True for rejections caused by the request itself, false for
    /// environment faults.
    pub fn is_signature_failure(&self) -> bool {
        self.kind != SignErrorKind::RequestNotAvailable
    }

    /// Split into the `(code, message, data)` triple JSON-RPC servers expect.
    pub fn into_jsonrpc_error(self) -> (i32, String, Option<serde_json::Value>) {
        (self.kind.code(), self.message, self.data)
    }
}

impl From<SignErrorKind> for SignError {
    fn from(kind: SignErrorKind) -> Self {
        Self::new(kind)
    }
}

impl Serialize for SignError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeStruct;
        let len = if self.data.is_some() { 3 } else { 2 };
        let mut state = serializer.serialize_struct("SignError", len)?;
        state.serialize_field("code", &self.kind.code())?;
        state.serialize_field("message", &self.message)?;
        if let Some(ref data) = self.data {
            state.serialize_field("data", data)?;
        }
        state.end()
    }
}
