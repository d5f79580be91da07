//! # Outbound Ports (Driven Ports / SPI)
//!
//! Collaborators owned outside this crate: the credential store, the clock
//! and the ambient request context.

use crate::domain::credential::CallerCredential;
use crate::domain::request::SignatureRequest;
use std::sync::Arc;

/// Lookup of registered callers.
///
/// Implementations might:
/// - Query an access-key table
/// - Read a configuration file
/// - Call a key management service
pub trait CredentialStore: Send + Sync {
    /// Return the credential for `app_id` if one exists and is active.
    ///
    /// # Returns
    ///
    /// - `Some(credential)` for an active caller
    /// - `None` if the app id is unknown or inactive (reject the call)
    fn find_active_credential(&self, app_id: &str) -> Option<Arc<CallerCredential>>;
}

impl<T: CredentialStore + ?Sized> CredentialStore for Arc<T> {
    fn find_active_credential(&self, app_id: &str) -> Option<Arc<CallerCredential>> {
        (**self).find_active_credential(app_id)
    }
}

/// Time source trait for testability
pub trait TimeSource: Send + Sync {
    /// Current unix time in seconds.
    fn now(&self) -> u64;
}

impl<T: TimeSource + ?Sized> TimeSource for Arc<T> {
    fn now(&self) -> u64 {
        (**self).now()
    }
}

/// Access to the request currently being dispatched.
pub trait RequestContext {
    /// The current request, `None` outside of a request.
    fn current_request(&self) -> Option<Arc<SignatureRequest>>;
}

impl RequestContext for Option<Arc<SignatureRequest>> {
    fn current_request(&self) -> Option<Arc<SignatureRequest>> {
        self.clone()
    }
}

impl RequestContext for Arc<SignatureRequest> {
    fn current_request(&self) -> Option<Arc<SignatureRequest>> {
        Some(Arc::clone(self))
    }
}
