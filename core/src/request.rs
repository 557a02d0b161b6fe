//! The logical description of one call, before composition.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::query::QueryOptions;

/// What a write request carries.
#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    /// Sent as `application/json`.
    Json(Value),
    /// Sent as raw bytes with the given content type.
    Upload { content_type: String, bytes: Vec<u8> },
}

/// One logical operation: verb, host-relative path, query options, extra
/// headers and an optional payload.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    pub method: HttpMethod,
    pub path: String,
    pub query: QueryOptions,
    /// Non-OData query parameters, appended after the OData ones.
    pub params: Vec<(String, String)>,
    /// Caller headers; these win over the client defaults.
    pub headers: Vec<(String, String)>,
    pub payload: Option<Payload>,
}

impl RequestSpec {
    pub fn new(method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryOptions::default(),
            params: Vec::new(),
            headers: Vec::new(),
            payload: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, path)
    }

    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Patch, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path)
    }

    pub fn query(mut self, query: QueryOptions) -> Self {
        self.query = query;
        self
    }

    pub fn param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((name.into(), value.into()));
        self
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn json(mut self, payload: Value) -> Self {
        self.payload = Some(Payload::Json(payload));
        self
    }

    /// Serialize any `Serialize` value into a JSON payload.
    pub fn json_from<T: Serialize>(self, payload: &T) -> Result<Self, ApiError> {
        let value = serde_json::to_value(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.json(value))
    }

    pub fn upload(mut self, content_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.payload = Some(Payload::Upload {
            content_type: content_type.into(),
            bytes,
        });
        self
    }
}
