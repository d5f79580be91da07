//! # Ports Layer
//!
//! Trait definitions for the hexagonal architecture.
//! - **Inbound (Driving)**: API that the interceptor and other callers use
//! - **Outbound (Driven)**: Collaborators the verifier and interceptor need

pub mod inbound;
pub mod outbound;
