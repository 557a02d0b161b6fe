//! Client configuration.
//!
//! A `ClientConfiguration` is built once and handed to
//! `OutlookClient::new`. There is no process-wide default configuration to
//! mutate; `default_client()` builds its own from `Default`.

use serde::Deserialize;

use crate::error::ApiError;

pub const DEFAULT_HOST: &str = "https://graph.microsoft.com";
pub const DEFAULT_VERSION: &str = "v1.0";
pub const DEFAULT_ENDPOINT: &str = "/{version}";
pub const DEFAULT_DEBUG_PROXY_URL: &str = "http://127.0.0.1:8888";
pub const DEFAULT_USER_AGENT: &str = concat!("outlook-core/", env!("CARGO_PKG_VERSION"));

const VERSION_PLACEHOLDER: &str = "{version}";

/// Known API families and their host / endpoint / version triples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiFamily {
    /// Microsoft Graph v1.0.
    Graph,
    /// Microsoft Graph beta.
    GraphBeta,
    /// Outlook REST API v2.0.
    OutlookV2,
}

impl ApiFamily {
    fn host(self) -> &'static str {
        match self {
            ApiFamily::Graph | ApiFamily::GraphBeta => DEFAULT_HOST,
            ApiFamily::OutlookV2 => "https://outlook.office365.com",
        }
    }

    fn version(self) -> &'static str {
        match self {
            ApiFamily::Graph => DEFAULT_VERSION,
            ApiFamily::GraphBeta => "beta",
            ApiFamily::OutlookV2 => "v2.0",
        }
    }

    fn endpoint(self) -> &'static str {
        match self {
            ApiFamily::Graph | ApiFamily::GraphBeta => DEFAULT_ENDPOINT,
            ApiFamily::OutlookV2 => "/api/{version}",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ClientConfiguration {
    /// Bearer token sent on every request.
    pub authentication_token: Option<String>,
    /// Route all traffic through `debug_proxy_url` with TLS verification
    /// disabled. Never on unless set explicitly.
    pub enable_debug_proxy: bool,
    pub debug_proxy_url: String,
    /// Host URL template; `{version}` is replaced by `version`.
    pub host: String,
    pub version: String,
    /// Path prefix placed before every resource path; `{version}` is
    /// replaced by `version`.
    pub endpoint: String,
    pub user_agent: String,
    /// Whole-request timeout. `None` waits indefinitely.
    pub timeout_secs: Option<u64>,
}

impl Default for ClientConfiguration {
    fn default() -> Self {
        Self::for_family(ApiFamily::Graph)
    }
}

impl ClientConfiguration {
    pub fn for_family(family: ApiFamily) -> Self {
        Self {
            authentication_token: None,
            enable_debug_proxy: false,
            debug_proxy_url: DEFAULT_DEBUG_PROXY_URL.to_string(),
            host: family.host().to_string(),
            version: family.version().to_string(),
            endpoint: family.endpoint().to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: None,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.authentication_token = Some(token.into());
        self
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Interpolated host followed by the interpolated endpoint, without a
    /// trailing slash.
    pub fn base_url(&self) -> String {
        let host = self.host.replace(VERSION_PLACEHOLDER, &self.version);
        let endpoint = self.endpoint.replace(VERSION_PLACEHOLDER, &self.version);
        let host = host.trim_end_matches('/');
        let endpoint = endpoint.trim_end_matches('/');
        if endpoint.is_empty() {
            host.to_string()
        } else if endpoint.starts_with('/') {
            format!("{host}{endpoint}")
        } else {
            format!("{host}/{endpoint}")
        }
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        let host = self.host.trim();
        if host.is_empty() {
            return Err(ApiError::InvalidConfiguration("host must not be empty".to_string()));
        }
        if !(host.starts_with("https://") || host.starts_with("http://")) {
            return Err(ApiError::InvalidConfiguration(format!(
                "host must be an http(s) URL, got {host}"
            )));
        }
        if self.enable_debug_proxy && self.debug_proxy_url.trim().is_empty() {
            return Err(ApiError::InvalidConfiguration(
                "debug proxy enabled without a proxy URL".to_string(),
            ));
        }
        Ok(())
    }
}
