//! # Domain Layer
//!
//! Pure signing logic with no I/O dependencies.

pub mod algorithm;
pub mod config;
pub mod credential;
pub mod errors;
pub mod headers;
pub mod methods;
pub mod request;
