//! Request composition and the request/response pipeline.
//!
//! # Design
//! `OutlookClient` splits every call into three stages that can be used on
//! their own: `build_request` turns a `RequestSpec` into an `HttpRequest`,
//! the `Transport` executes it, and `parse_response` classifies the result.
//! `perform_request` chains them and makes exactly one attempt; any retry
//! policy belongs to the caller.
//!
//! The configuration sits behind an `ArcSwap`. Each request reads a single
//! snapshot, so `set_authentication_token` may run while other threads have
//! requests in flight; those requests finish with the token they started
//! with.

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::classify::classify;
use crate::config::ClientConfiguration;
use crate::error::ApiError;
use crate::http::{HttpBody, HttpMethod, HttpRequest, HttpResponse};
use crate::query::encode_query;
use crate::request::{Payload, RequestSpec};
use crate::transport::{Transport, UreqTransport};

pub const CLIENT_REQUEST_ID: &str = "client-request-id";
pub const RETURN_CLIENT_REQUEST_ID: &str = "return-client-request-id";
const JSON_CONTENT_TYPE: &str = "application/json";

pub struct OutlookClient {
    config: ArcSwap<ClientConfiguration>,
    transport: Box<dyn Transport>,
}

impl fmt::Debug for OutlookClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OutlookClient")
            .field("base_url", &self.config.load().base_url())
            .finish_non_exhaustive()
    }
}

impl OutlookClient {
    /// Client over the default `ureq` transport.
    pub fn new(config: ClientConfiguration) -> Result<Self, ApiError> {
        config.validate()?;
        let transport = UreqTransport::new(&config)?;
        Self::with_transport(config, transport)
    }

    pub fn with_transport(
        config: ClientConfiguration,
        transport: impl Transport + 'static,
    ) -> Result<Self, ApiError> {
        config.validate()?;
        Ok(Self {
            config: ArcSwap::from_pointee(config),
            transport: Box::new(transport),
        })
    }

    /// Current configuration snapshot.
    pub fn configuration(&self) -> Arc<ClientConfiguration> {
        self.config.load_full()
    }

    /// Replace the bearer token used by subsequent requests.
    pub fn set_authentication_token(&self, token: impl Into<String>) {
        let token = token.into();
        self.config.rcu(|current| ClientConfiguration {
            authentication_token: Some(token.clone()),
            ..ClientConfiguration::clone(current)
        });
    }

    /// Compose the absolute URL, header set and body for `spec`.
    ///
    /// Defaults are `Authorization`, `Accept`, `User-Agent`, a fresh
    /// `client-request-id` and `return-client-request-id`, plus a
    /// `Content-Type` for write verbs. Caller headers replace defaults with
    /// the same (case-insensitive) name.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<HttpRequest, ApiError> {
        let config = self.config.load();
        let token = config
            .authentication_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::InvalidConfiguration("authentication token is not set".to_string()))?;

        let url = compose_url(&config.base_url(), spec)?;

        let mut headers = vec![
            ("Authorization".to_string(), format!("Bearer {token}")),
            ("Accept".to_string(), JSON_CONTENT_TYPE.to_string()),
            ("User-Agent".to_string(), config.user_agent.clone()),
            (CLIENT_REQUEST_ID.to_string(), Uuid::new_v4().to_string()),
            (RETURN_CLIENT_REQUEST_ID.to_string(), "true".to_string()),
        ];

        let (content_type, body) = compose_body(spec)?;
        if let Some(content_type) = content_type {
            headers.push(("Content-Type".to_string(), content_type));
        }

        for (name, value) in &spec.headers {
            match headers.iter_mut().find(|(k, _)| k.eq_ignore_ascii_case(name)) {
                Some(existing) => *existing = (name.clone(), value.clone()),
                None => headers.push((name.clone(), value.clone())),
            }
        }

        Ok(HttpRequest {
            method: spec.method,
            url,
            headers,
            body,
        })
    }

    pub fn parse_response(&self, request: &HttpRequest, response: HttpResponse) -> Result<Option<Value>, ApiError> {
        classify(request.method, &request.url, response)
    }

    /// Build, dispatch and classify one request.
    ///
    /// Yields the parsed JSON body, `None` for an empty success body, or the
    /// single error the call produced.
    pub fn perform_request(&self, spec: &RequestSpec) -> Result<Option<Value>, ApiError> {
        let request = self.build_request(spec)?;
        let request_id = request.header(CLIENT_REQUEST_ID).unwrap_or_default().to_string();
        debug!(method = %request.method, url = %request.url, %request_id, "dispatching request");

        let response = self.transport.execute(&request).map_err(|source| {
            warn!(method = %request.method, url = %request.url, %request_id, error = %source, "transport failed");
            ApiError::Transport {
                method: request.method,
                url: request.url.clone(),
                source,
            }
        })?;

        let status = response.status;
        let result = self.parse_response(&request, response);
        match &result {
            Err(ApiError::Response(e)) => {
                warn!(
                    method = %e.method,
                    url = %e.url,
                    status = e.status,
                    kind = %e.kind,
                    %request_id,
                    "request failed"
                );
            }
            _ => debug!(status, %request_id, "request completed"),
        }
        result
    }

    /// `perform_request` followed by deserialization into `T`.
    pub fn perform_request_as<T: DeserializeOwned>(&self, spec: &RequestSpec) -> Result<Option<T>, ApiError> {
        self.perform_request(spec)?
            .map(|value| serde_json::from_value(value).map_err(|e| ApiError::Deserialization(e.to_string())))
            .transpose()
    }
}

fn compose_url(base_url: &str, spec: &RequestSpec) -> Result<String, ApiError> {
    if spec.path.contains('?') {
        return Err(ApiError::InvalidArgument(format!(
            "resource path must not carry a query string: {}",
            spec.path
        )));
    }

    let mut url = base_url.to_string();
    if !spec.path.starts_with('/') {
        url.push('/');
    }
    url.push_str(&spec.path);

    let mut params = spec.query.to_params();
    params.extend(spec.params.iter().cloned());
    if !params.is_empty() {
        url.push('?');
        url.push_str(&encode_query(&params));
    }
    Ok(url)
}

/// Content type and body for the verb. GET and DELETE never carry a body.
fn compose_body(spec: &RequestSpec) -> Result<(Option<String>, Option<HttpBody>), ApiError> {
    let payload = match spec.method {
        HttpMethod::Get | HttpMethod::Delete => return Ok((None, None)),
        _ => spec.payload.as_ref(),
    };

    match payload {
        Some(Payload::Json(value)) => {
            let body = serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))?;
            Ok((Some(JSON_CONTENT_TYPE.to_string()), Some(HttpBody::Json(body))))
        }
        Some(Payload::Upload { content_type, bytes }) => {
            Ok((Some(content_type.clone()), Some(HttpBody::Bytes(bytes.clone()))))
        }
        None if spec.method == HttpMethod::Put => Ok((None, None)),
        None => Ok((Some(JSON_CONTENT_TYPE.to_string()), None)),
    }
}
