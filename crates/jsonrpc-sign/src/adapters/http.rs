//! Tower middleware enforcing request signatures on JSON-RPC over HTTP.
//!
//! Buffers the body, reads the JSON-RPC method(s) from it and runs the
//! [`CheckSignInterceptor`] for each one before the inner service sees the
//! request. The inner service receives exactly the bytes that were verified.

use crate::adapters::context::RequestSlot;
use crate::domain::errors::{codes, SignError, SignErrorKind};
use crate::domain::request::SignatureRequest;
use crate::interceptor::CheckSignInterceptor;
use crate::ports::inbound::SignatureVerificationApi;
use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, Request, StatusCode},
    response::Response,
};
use http_body_util::LengthLimitError;
use serde_json::Value;
use std::sync::Arc;
use tower::{Layer, Service};
use tracing::{debug, warn};

/// Signature enforcement layer
pub struct SignatureLayer<V: SignatureVerificationApi> {
    interceptor: Arc<CheckSignInterceptor<V>>,
    max_body_bytes: usize,
}

impl<V: SignatureVerificationApi> SignatureLayer<V> {
    pub fn new(interceptor: CheckSignInterceptor<V>, max_body_bytes: usize) -> Self {
        Self::shared(Arc::new(interceptor), max_body_bytes)
    }

    /// Build from an interceptor that is also used elsewhere.
    pub fn shared(interceptor: Arc<CheckSignInterceptor<V>>, max_body_bytes: usize) -> Self {
        Self {
            interceptor,
            max_body_bytes,
        }
    }
}

impl<V: SignatureVerificationApi> Clone for SignatureLayer<V> {
    fn clone(&self) -> Self {
        Self {
            interceptor: Arc::clone(&self.interceptor),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

impl<S, V: SignatureVerificationApi> Layer<S> for SignatureLayer<V> {
    type Service = SignatureService<S, V>;

    fn layer(&self, inner: S) -> Self::Service {
        SignatureService {
            inner,
            interceptor: Arc::clone(&self.interceptor),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

/// Signature enforcement service
pub struct SignatureService<S, V: SignatureVerificationApi> {
    inner: S,
    interceptor: Arc<CheckSignInterceptor<V>>,
    max_body_bytes: usize,
}

impl<S: Clone, V: SignatureVerificationApi> Clone for SignatureService<S, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            interceptor: Arc::clone(&self.interceptor),
            max_body_bytes: self.max_body_bytes,
        }
    }
}

impl<S, V> Service<Request<Body>> for SignatureService<S, V>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
    V: SignatureVerificationApi + 'static,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let interceptor = Arc::clone(&self.interceptor);
        let max_body_bytes = self.max_body_bytes;
        // The clone may not be ready; keep the one that was polled
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);

        Box::pin(async move {
            let (parts, body) = req.into_parts();

            let body_bytes = match axum::body::to_bytes(body, max_body_bytes).await {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, limit = max_body_bytes, "Failed to read request body");
                    return Ok(body_read_error_response(&e));
                }
            };

            let call = JsonRpcCall::parse(&body_bytes);
            if call.methods.is_empty() {
                // Not a JSON-RPC call we can route; the framework rejects it
                debug!("No JSON-RPC method in body, skipping signature check");
                let req = Request::from_parts(parts, Body::from(body_bytes));
                return inner.call(req).await;
            }

            let slot = RequestSlot::with_request(SignatureRequest::from_parts(
                &parts,
                body_bytes.clone(),
            ));

            let outcome = call
                .methods
                .iter()
                .try_for_each(|method| interceptor.before_method_apply(method, &slot));
            slot.clear();

            if let Err(err) = outcome {
                debug!(
                    code = err.code(),
                    error = %err.message(),
                    methods = ?call.methods,
                    "Rejected unsigned or mis-signed request"
                );
                return Ok(sign_error_response(err, call.id));
            }

            let req = Request::from_parts(parts, Body::from(body_bytes));
            inner.call(req).await
        })
    }
}

/// Method names and id read from a JSON-RPC body.
#[derive(Debug, Default, PartialEq)]
struct JsonRpcCall {
    methods: Vec<String>,
    /// Id of a single call; batches answer with `null`.
    id: Value,
}

impl JsonRpcCall {
    fn parse(body: &Bytes) -> Self {
        let Ok(value) = serde_json::from_slice::<Value>(body) else {
            return Self::default();
        };

        match value {
            Value::Object(obj) => Self {
                methods: method_of(&obj).into_iter().collect(),
                id: obj.get("id").cloned().unwrap_or(Value::Null),
            },
            Value::Array(items) => Self {
                methods: items
                    .iter()
                    .filter_map(Value::as_object)
                    .filter_map(method_of)
                    .collect(),
                id: Value::Null,
            },
            _ => Self::default(),
        }
    }
}

fn method_of(obj: &serde_json::Map<String, Value>) -> Option<String> {
    obj.get("method")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn sign_error_response(err: SignError, id: Value) -> Response {
    let status = match err.kind() {
        SignErrorKind::RequestNotAvailable => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::UNAUTHORIZED,
    };
    json_response(status, serde_json::to_value(&err).unwrap_or(Value::Null), id)
}

/// 413 when the body limit was hit, 400 for any other read failure.
fn body_read_error_response(err: &axum::Error) -> Response {
    let (status, message) = if exceeds_limit(err) {
        (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large")
    } else {
        (StatusCode::BAD_REQUEST, "Failed to read request body")
    };

    let error = serde_json::json!({
        "code": codes::INVALID_REQUEST,
        "message": message,
    });
    json_response(status, error, Value::Null)
}

fn exceeds_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.is::<LengthLimitError>() {
            return true;
        }
        source = e.source();
    }
    false
}

fn json_response(status: StatusCode, error: Value, id: Value) -> Response {
    let body = serde_json::json!({
        "jsonrpc": "2.0",
        "error": error,
        "id": id,
    });

    let mut response = Response::new(Body::from(serde_json::to_vec(&body).unwrap_or_default()));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_call() {
        let call = JsonRpcCall::parse(&Bytes::from_static(
            br#"{"jsonrpc":"2.0","method":"Transfer","params":[],"id":7}"#,
        ));
        assert_eq!(call.methods, vec!["Transfer"]);
        assert_eq!(call.id, serde_json::json!(7));
    }

    #[test]
    fn test_parse_batch() {
        let call = JsonRpcCall::parse(&Bytes::from_static(
            br#"[{"method":"Ping","id":1},{"method":"Transfer","id":2},{"id":3},5]"#,
        ));
        assert_eq!(call.methods, vec!["Ping", "Transfer"]);
        assert_eq!(call.id, Value::Null);
    }

    #[test]
    fn test_parse_garbage() {
        assert_eq!(
            JsonRpcCall::parse(&Bytes::from_static(b"not json")),
            JsonRpcCall::default()
        );
        assert!(JsonRpcCall::parse(&Bytes::from_static(b"42")).methods.is_empty());
    }

    #[test]
    fn test_error_status_mapping() {
        let denied = sign_error_response(SignError::timeout(), Value::Null);
        assert_eq!(denied.status(), StatusCode::UNAUTHORIZED);

        let fault = sign_error_response(SignError::request_not_available(), Value::Null);
        assert_eq!(fault.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            fault.headers().get(header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[tokio::test]
    async fn test_limit_error_maps_to_payload_too_large() {
        let err = axum::body::to_bytes(Body::from("0123456789"), 4)
            .await
            .unwrap_err();

        assert!(exceeds_limit(&err));
        assert_eq!(
            body_read_error_response(&err).status(),
            StatusCode::PAYLOAD_TOO_LARGE
        );
    }

    #[test]
    fn test_other_read_error_maps_to_bad_request() {
        let err = axum::Error::new(std::io::Error::new(
            std::io::ErrorKind::ConnectionReset,
            "client went away",
        ));

        assert!(!exceeds_limit(&err));
        assert_eq!(
            body_read_error_response(&err).status(),
            StatusCode::BAD_REQUEST
        );
    }
}
