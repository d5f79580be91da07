//! Request slot implementation of the `RequestContext` port.

use crate::domain::request::SignatureRequest;
use crate::ports::outbound::RequestContext;
use parking_lot::RwLock;
use std::sync::Arc;

/// Holds the request currently being dispatched.
///
/// The transport sets it before handing off to the RPC framework and clears
/// it afterwards; the interceptor reads it through `RequestContext`.
#[derive(Debug, Default)]
pub struct RequestSlot {
    current: RwLock<Option<Arc<SignatureRequest>>>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Slot that already holds `request`.
    pub fn with_request(request: SignatureRequest) -> Self {
        let slot = Self::new();
        slot.set(Arc::new(request));
        slot
    }

    /// Install a request, returning the one it replaced.
    pub fn set(&self, request: Arc<SignatureRequest>) -> Option<Arc<SignatureRequest>> {
        self.current.write().replace(request)
    }

    /// Remove the current request.
    pub fn clear(&self) -> Option<Arc<SignatureRequest>> {
        self.current.write().take()
    }
}

impl RequestContext for RequestSlot {
    fn current_request(&self) -> Option<Arc<SignatureRequest>> {
        self.current.read().clone()
    }
}
