//! Signing configuration with validation.
//!
//! ## Security Requirements
//!
//! - The bypass token MUST be disabled or rotated away from `"god"` in production
//! - All limits have sane defaults with override capability

use super::headers::{DEFAULT_BYPASS_TOKEN, DEFAULT_TOLERANCE_SECS};
use super::methods::MethodRegistry;
use serde::{Deserialize, Serialize};

/// Default cap on a buffered request body (10 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Environment variable overriding the bypass token. Empty disables it.
pub const ENV_BYPASS_TOKEN: &str = "JSON_RPC_GOD_SIGN";

/// Environment variable overriding the default skew window.
pub const ENV_TOLERANCE: &str = "JSON_RPC_SIGN_TOLERANCE";

/// Environment variable listing signature-required methods, comma separated.
pub const ENV_SIGNED_METHODS: &str = "JSON_RPC_SIGNED_METHODS";

/// Signature enforcement configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignConfig {
    /// Query value of `__ignoreSign` that skips verification (None = disabled)
    pub bypass_token: Option<String>,
    /// Skew window for credentials without their own
    pub default_tolerance_secs: u64,
    /// Methods that require a signature
    pub signed_methods: Vec<String>,
    /// Largest body the HTTP layer buffers
    pub max_body_bytes: usize,
}

impl Default for SignConfig {
    fn default() -> Self {
        Self {
            bypass_token: Some(DEFAULT_BYPASS_TOKEN.to_string()),
            default_tolerance_secs: DEFAULT_TOLERANCE_SECS,
            signed_methods: Vec::new(),
            max_body_bytes: DEFAULT_MAX_BODY_BYTES,
        }
    }
}

impl SignConfig {
    /// Create configuration from process environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JSON_RPC_GOD_SIGN`: bypass token (default: god, empty disables)
    /// - `JSON_RPC_SIGN_TOLERANCE`: default skew window in seconds (default: 180)
    /// - `JSON_RPC_SIGNED_METHODS`: comma separated method names
    pub fn from_env() -> Self {
        Self::from_env_source(|key| std::env::var(key).ok())
    }

    /// Same as [`SignConfig::from_env`] with a custom variable lookup.
    pub fn from_env_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(token) = lookup(ENV_BYPASS_TOKEN) {
            config.bypass_token = if token.is_empty() { None } else { Some(token) };
        }

        if let Some(secs) = lookup(ENV_TOLERANCE).and_then(|v| v.trim().parse().ok()) {
            config.default_tolerance_secs = secs;
        }

        if let Some(methods) = lookup(ENV_SIGNED_METHODS) {
            config.signed_methods = methods
                .split(',')
                .map(str::trim)
                .filter(|m| !m.is_empty())
                .map(str::to_string)
                .collect();
        }

        config
    }

    /// Parse a TOML document. `bypass_token = ""` disables the bypass.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let mut config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        if matches!(config.bypass_token.as_deref(), Some("")) {
            config.bypass_token = None;
        }
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_tolerance_secs == 0 {
            return Err(ConfigError::InvalidTolerance);
        }

        if matches!(self.bypass_token.as_deref(), Some("")) {
            return Err(ConfigError::EmptyBypassToken);
        }

        if self.max_body_bytes == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_body_bytes cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Validate configuration for production readiness.
    ///
    /// Rejects everything `validate` rejects, plus the shipped bypass token.
    pub fn validate_for_production(&self) -> Result<(), ConfigError> {
        self.validate()?;

        if self.bypass_token.as_deref() == Some(DEFAULT_BYPASS_TOKEN) {
            return Err(ConfigError::InsecureBypassToken);
        }

        Ok(())
    }

    /// Method registry with every configured method marked as required.
    pub fn method_registry(&self) -> MethodRegistry {
        self.signed_methods.iter().cloned().collect()
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse configuration: {0}")]
    Parse(String),

    #[error("default_tolerance_secs cannot be 0")]
    InvalidTolerance,

    #[error("bypass_token cannot be empty; use None to disable the bypass")]
    EmptyBypassToken,

    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error(
        "SECURITY VIOLATION: bypass token is the shipped default. \
         Set JSON_RPC_GOD_SIGN to a secret value or disable the bypass."
    )]
    InsecureBypassToken,
}
