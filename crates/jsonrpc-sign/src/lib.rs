//! # JSON-RPC Request Signing
//!
//! Verifies that inbound JSON-RPC calls come from a registered caller and were
//! not tampered with, using a shared-secret HMAC-SHA1 / MD5 signature over the
//! request body, a caller timestamp and a nonce.
//!
//! ## Architecture
//!
//! ```text
//! HTTP ─▶ SignatureLayer ─▶ CheckSignInterceptor ─▶ SignatureVerifier ─▶ CredentialStore
//!          (adapters)          (method policy)         (service)            (port)
//! ```
//!
//! - **Domain Layer** (`domain/`): headers, credentials, algorithms, errors, config
//! - **Ports Layer** (`ports/`): verifier API and the collaborators it needs
//! - **Service Layer** (`service.rs`): the verification pipeline
//! - **Interceptor** (`interceptor.rs`): per-method enforcement and bypass
//! - **Adapters** (`adapters/`): in-memory store, clocks, request slot, tower layer
//!
//! ## Signature Scheme
//!
//! | `Signature-Method` | `Signature-Version` | Expected `Signature` |
//! |---|---|---|
//! | `HMAC-SHA1` (default) or `sha1` | `1.0` | `hex(HMAC-SHA1(secret, body ‖ timestamp ‖ nonce))` |
//! | `md5` | `1.0` | `hex(MD5(body ‖ timestamp ‖ nonce ‖ secret))` |
//!
//! ## Usage
//!
//! ```ignore
//! use jsonrpc_sign::{CheckSignInterceptor, InMemoryCredentialStore, MethodRegistry,
//!     SignConfig, SignatureLayer, SignatureVerifier};
//!
//! let config = SignConfig::from_env();
//! let verifier = SignatureVerifier::from_config(store, SystemTimeSource, &config);
//! let interceptor = CheckSignInterceptor::from_config(&config, verifier);
//! let app = router.layer(SignatureLayer::new(interceptor, config.max_body_bytes));
//! ```

#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod adapters;
pub mod domain;
pub mod interceptor;
pub mod ports;
pub mod service;
pub mod telemetry;

// Re-export public API
pub use adapters::clock::{FixedTimeSource, SystemTimeSource};
pub use adapters::context::RequestSlot;
pub use adapters::http::{SignatureLayer, SignatureService};
pub use adapters::memory::InMemoryCredentialStore;
pub use domain::algorithm::{constant_time_eq, raw_text, SignatureAlgorithm, SignatureType};
pub use domain::config::{ConfigError, SignConfig};
pub use domain::credential::{AppSecret, CallerCredential};
pub use domain::errors::{codes, SignError, SignErrorKind};
pub use domain::headers;
pub use domain::methods::{MethodRegistry, SignPolicy};
pub use domain::request::SignatureRequest;
pub use interceptor::CheckSignInterceptor;
pub use ports::inbound::SignatureVerificationApi;
pub use ports::outbound::{CredentialStore, RequestContext, TimeSource};
pub use service::SignatureVerifier;
