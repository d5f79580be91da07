//! # Signature Interceptor
//!
//! Runs before every RPC method and gates signature-required methods behind
//! the verifier.
//!
//! ```text
//! method ──▶ registry: required? ──no──▶ Ok
//!                 │yes
//!                 ▼
//!        current request? ──none──▶ RequestNotAvailable
//!                 │
//!                 ▼
//!       __ignoreSign == bypass token? ──yes──▶ Ok (verifier not called)
//!                 │no
//!                 ▼
//!        verifier.check_request ──▶ Ok / SignError (propagated unchanged)
//! ```
//!
//! The bypass token is meant for trusted operators and tests. Disable or
//! rotate it in production (see `SignConfig::validate_for_production`).

use crate::domain::algorithm::constant_time_eq;
use crate::domain::config::SignConfig;
use crate::domain::errors::SignError;
use crate::domain::headers;
use crate::domain::methods::MethodRegistry;
use crate::domain::request::SignatureRequest;
use crate::ports::inbound::SignatureVerificationApi;
use crate::ports::outbound::RequestContext;
use tracing::{debug, info};

/// Per-method signature enforcement.
pub struct CheckSignInterceptor<V: SignatureVerificationApi> {
    registry: MethodRegistry,
    verifier: V,
    bypass_token: Option<String>,
}

impl<V: SignatureVerificationApi> CheckSignInterceptor<V> {
    /// Create an interceptor.
    ///
    /// # Arguments
    /// * `registry` - Which methods require a signature
    /// * `verifier` - Signature checker for those methods
    /// * `bypass_token` - `__ignoreSign` value that skips the check (None = disabled)
    pub fn new(registry: MethodRegistry, verifier: V, bypass_token: Option<String>) -> Self {
        Self {
            registry,
            verifier,
            bypass_token,
        }
    }

    /// Create an interceptor from configuration.
    pub fn from_config(config: &SignConfig, verifier: V) -> Self {
        Self::new(
            config.method_registry(),
            verifier,
            config.bypass_token.clone(),
        )
    }

    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    pub fn verifier(&self) -> &V {
        &self.verifier
    }

    pub fn bypass_enabled(&self) -> bool {
        self.bypass_token.is_some()
    }

    /// Gate a method invocation.
    ///
    /// # Errors
    /// * `RequestNotAvailable` - signing is required but `ctx` has no request
    /// * any verifier error, unchanged
    pub fn before_method_apply<C>(&self, method: &str, ctx: &C) -> Result<(), SignError>
    where
        C: RequestContext + ?Sized,
    {
        if !self.registry.requires_signature(method) {
            return Ok(());
        }

        let request = ctx
            .current_request()
            .ok_or_else(SignError::request_not_available)?;

        if self.is_bypassed(&request) {
            info!(
                target: "jsonrpc_sign::procedure",
                method,
                path = request.path(),
                "Signature check bypassed by operator token"
            );
            return Ok(());
        }

        self.verifier.check_request(&request)?;

        info!(
            target: "jsonrpc_sign::procedure",
            method,
            app_id = request.header(headers::APP_ID).unwrap_or_default(),
            path = request.path(),
            "Signature verified, method call allowed"
        );
        Ok(())
    }

    fn is_bypassed(&self, request: &SignatureRequest) -> bool {
        let (Some(expected), Some(submitted)) = (
            self.bypass_token.as_deref(),
            request.query(headers::IGNORE_SIGN_QUERY),
        ) else {
            return false;
        };

        let bypassed = constant_time_eq(expected, submitted);
        if !bypassed {
            debug!(path = request.path(), "Ignoring wrong bypass token");
        }
        bypassed
    }
}
