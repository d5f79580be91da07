//! # Adapters Layer
//!
//! Concrete implementations of the ports plus the HTTP transport:
//! - `clock`: system and fixed `TimeSource`s
//! - `context`: `RequestSlot`, a settable `RequestContext`
//! - `http`: tower layer that runs the interceptor on JSON-RPC calls
//! - `memory`: in-memory `CredentialStore`

pub mod clock;
pub mod context;
pub mod http;
pub mod memory;
