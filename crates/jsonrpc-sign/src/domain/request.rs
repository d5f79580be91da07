//! # Signature Request
//!
//! Read-only view of an inbound call: the raw body, the headers and the query
//! parameters. Built once per call and dropped after the check.

use bytes::Bytes;
use http::header::{HeaderName, HeaderValue};
use http::HeaderMap;
use std::collections::HashMap;
use tracing::debug;

/// Inbound call as seen by the verifier.
///
/// Header lookups are case-insensitive. A header whose value is not visible
/// ASCII is treated as absent.
#[derive(Debug, Clone, Default)]
pub struct SignatureRequest {
    body: Bytes,
    headers: HeaderMap,
    query: HashMap<String, String>,
    path: String,
}

impl SignatureRequest {
    /// Create a request with the given raw body and nothing else.
    pub fn new(body: impl Into<Bytes>) -> Self {
        Self {
            body: body.into(),
            headers: HeaderMap::new(),
            query: HashMap::new(),
            path: "/".to_string(),
        }
    }

    /// Build from decoded HTTP request parts and the buffered body.
    pub fn from_parts(parts: &http::request::Parts, body: Bytes) -> Self {
        let mut request = Self::new(body);
        request.headers = parts.headers.clone();
        request.path = parts.uri.path().to_string();
        if let Some(query) = parts.uri.query() {
            request = request.with_query_string(query);
        }
        request
    }

    /// Add a header. Names or values that are not valid HTTP are skipped.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        match (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value),
        ) {
            (Ok(name), Ok(value)) => {
                self.headers.insert(name, value);
            }
            _ => debug!(header = name, "Skipping invalid header"),
        }
        self
    }

    /// Add a query parameter.
    pub fn with_query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(name.into(), value.into());
        self
    }

    /// Merge a raw `a=1&b=2` query string, percent-decoded.
    ///
    /// A malformed query string adds nothing.
    pub fn with_query_string(mut self, query: &str) -> Self {
        match serde_urlencoded::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => self.query.extend(pairs),
            Err(e) => debug!(error = %e, "Ignoring malformed query string"),
        }
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// Raw payload, exactly as received.
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Header value as text. Any UTF-8 value is accepted, not only visible ASCII.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(name)
            .and_then(|v| std::str::from_utf8(v.as_bytes()).ok())
    }

    /// Header value as text, `None` when absent or empty.
    pub fn non_empty_header(&self, name: &str) -> Option<&str> {
        self.header(name).filter(|v| !v.is_empty())
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query.get(name).map(String::as_str)
    }

    pub fn path(&self) -> &str {
        &self.path
    }
}
