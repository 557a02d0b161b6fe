//! Executes composed requests.
//!
//! `Transport` is the only place network I/O happens. `UreqTransport` is the
//! production implementation; tests substitute their own. A transport makes
//! exactly one attempt per call and never interprets the status code.

use std::time::Duration;

use tracing::warn;
use ureq::tls::TlsConfig;
use ureq::{Agent, Proxy, RequestBuilder};

use crate::config::ClientConfiguration;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error(transparent)]
    Http(#[from] ureq::Error),

    #[error("{0}")]
    Other(String),
}

pub trait Transport: Send + Sync {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// Largest response body the transport reads before failing.
pub const MAX_RESPONSE_BYTES: u64 = 64 * 1024 * 1024;

/// Synchronous transport backed by a `ureq` agent.
///
/// The agent keeps connections alive between calls. Non-2xx statuses come
/// back as data so the classifier can see them, and redirects are never
/// followed: a 3xx is returned as the response.
///
/// Bodies are read up to [`MAX_RESPONSE_BYTES`]; a larger body is a
/// `TransportError`. Invalid UTF-8 is replaced rather than rejected, so a
/// binary success body reaches the classifier and fails there as
/// `ApiError::Deserialization`.
#[derive(Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new(config: &ClientConfiguration) -> Result<Self, ApiError> {
        let mut builder = Agent::config_builder()
            .http_status_as_error(false)
            .max_redirects(0);

        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout_global(Some(Duration::from_secs(secs)));
        }

        if config.enable_debug_proxy {
            warn!(
                proxy = %config.debug_proxy_url,
                "debug proxy enabled, TLS certificate verification is disabled"
            );
            let proxy = Proxy::new(&config.debug_proxy_url).map_err(|e| {
                ApiError::InvalidConfiguration(format!(
                    "invalid debug proxy URL {}: {e}",
                    config.debug_proxy_url
                ))
            })?;
            builder = builder
                .proxy(Some(proxy))
                .tls_config(TlsConfig::builder().disable_verification(true).build());
        }

        Ok(Self {
            agent: builder.build().new_agent(),
        })
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let url = request.url.as_str();
        let headers = &request.headers;
        let body = request.body.as_ref().map(|b| b.as_bytes());

        let mut response = match (request.method, body) {
            (HttpMethod::Get, _) => with_headers(self.agent.get(url), headers).call(),
            (HttpMethod::Delete, _) => with_headers(self.agent.delete(url), headers).call(),
            (HttpMethod::Post, Some(bytes)) => with_headers(self.agent.post(url), headers).send(bytes),
            (HttpMethod::Post, None) => with_headers(self.agent.post(url), headers).send_empty(),
            (HttpMethod::Patch, Some(bytes)) => {
                with_headers(self.agent.patch(url), headers).send(bytes)
            }
            (HttpMethod::Patch, None) => with_headers(self.agent.patch(url), headers).send_empty(),
            (HttpMethod::Put, Some(bytes)) => with_headers(self.agent.put(url), headers).send(bytes),
            (HttpMethod::Put, None) => with_headers(self.agent.put(url), headers).send_empty(),
        }?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|v| (name.as_str().to_string(), v.to_string()))
            })
            .collect();
        let body = response
            .body_mut()
            .with_config()
            .limit(MAX_RESPONSE_BYTES)
            .lossy_utf8(true)
            .read_to_string()?;

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

fn with_headers<B>(mut builder: RequestBuilder<B>, headers: &[(String, String)]) -> RequestBuilder<B> {
    for (name, value) in headers {
        builder = builder.header(name.as_str(), value.as_str());
    }
    builder
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_without_proxy_by_default() {
        assert!(UreqTransport::new(&ClientConfiguration::default()).is_ok());
    }

    #[test]
    fn agent_does_not_follow_redirects() {
        let transport = UreqTransport::new(&ClientConfiguration::default()).unwrap();
        assert_eq!(transport.agent.config().max_redirects(), 0);
    }

    #[test]
    fn builds_with_debug_proxy_and_timeout() {
        let config = ClientConfiguration {
            enable_debug_proxy: true,
            timeout_secs: Some(5),
            ..ClientConfiguration::default()
        };
        assert!(UreqTransport::new(&config).is_ok());
    }
}
