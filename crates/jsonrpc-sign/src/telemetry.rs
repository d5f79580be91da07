//! Logging setup for services that embed the signature layer.
//!
//! The library itself only emits `tracing` events (targets
//! `jsonrpc_sign::verifier` and `jsonrpc_sign::procedure`); binaries call
//! [`init_tracing`] once at startup to install a subscriber.

use std::env;
use thiserror::Error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log level variable, checked before `RUST_LOG`.
pub const ENV_LOG_LEVEL: &str = "JSON_RPC_SIGN_LOG_LEVEL";
/// Enables JSON formatted logs when `true` or `1`.
pub const ENV_JSON_LOGS: &str = "JSON_RPC_SIGN_JSON_LOGS";

/// Telemetry errors
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),

    #[error("Global subscriber already initialized: {0}")]
    AlreadyInitialized(String),
}

/// Subscriber configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TelemetryConfig {
    /// Filter directives (`info`, `jsonrpc_sign=debug`, ...)
    pub log_level: String,

    /// JSON output for containers instead of human-readable lines
    pub json_logs: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json_logs: false,
        }
    }
}

impl TelemetryConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `JSON_RPC_SIGN_LOG_LEVEL` or `RUST_LOG`: filter (default: info)
    /// - `JSON_RPC_SIGN_JSON_LOGS`: JSON output (default: false)
    pub fn from_env() -> Self {
        Self::from_env_source(|key| env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) with a custom variable lookup.
    pub fn from_env_source<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            log_level: lookup(ENV_LOG_LEVEL)
                .or_else(|| lookup("RUST_LOG"))
                .unwrap_or_else(|| "info".to_string()),

            json_logs: lookup(ENV_JSON_LOGS)
                .map(|v| v.eq_ignore_ascii_case("true") || v == "1")
                .unwrap_or(false),
        }
    }
}

/// Install the global `tracing` subscriber.
///
/// # Errors
/// * `InvalidFilter` - `log_level` is not a valid filter
/// * `AlreadyInitialized` - a global subscriber is already set
pub fn init_tracing(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(&config.log_level)
        .map_err(|e| TelemetryError::InvalidFilter(e.to_string()))?;

    if config.json_logs {
        let json_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(json_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_ansi(true);

        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::AlreadyInitialized(e.to_string()))?;
    }

    tracing::info!(
        log_level = %config.log_level,
        json_logs = config.json_logs,
        "Tracing initialized"
    );
    Ok(())
}
