//! Wire names and defaults of the signature header contract.

/// Caller identity.
pub const APP_ID: &str = "Signature-AppID";

/// Caller-supplied token mixed into the signed text.
pub const NONCE: &str = "Signature-Nonce";

/// Caller wall-clock time in unix seconds.
pub const TIMESTAMP: &str = "Signature-Timestamp";

/// Algorithm selector.
pub const METHOD: &str = "Signature-Method";

/// Algorithm version selector.
pub const VERSION: &str = "Signature-Version";

/// The submitted signature.
pub const SIGNATURE: &str = "Signature";

/// Query parameter carrying the operator bypass token.
pub const IGNORE_SIGN_QUERY: &str = "__ignoreSign";

/// Method used when `Signature-Method` is absent.
pub const DEFAULT_METHOD: &str = "HMAC-SHA1";

/// Version used when `Signature-Version` is absent.
pub const DEFAULT_VERSION: &str = "1.0";

/// Allowed clock skew when the credential does not set its own (3 minutes).
pub const DEFAULT_TOLERANCE_SECS: u64 = 60 * 3;

/// Bypass token shipped as the default. Never keep it in production.
pub const DEFAULT_BYPASS_TOKEN: &str = "god";
