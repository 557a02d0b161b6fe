//! Error types for the Outlook / Graph REST client.
//!
//! # Design
//! Every non-success HTTP response becomes exactly one `ResponseError`,
//! tagged with an `ErrorKind` picked by `classify`. The error keeps the
//! method, URL, status and raw body so callers can inspect the
//! provider-specific diagnostic code embedded in the JSON error body.
//! Failures that never produced a response (transport, serialization,
//! configuration) are separate `ApiError` variants.

use std::fmt;

use serde_json::Value;

use crate::http::HttpMethod;
use crate::transport::TransportError;

/// Which class of failure a response represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed delta / sync token (400, 405-409, 411-423 with marker).
    BadSyncToken,
    /// Sync state expired or unknown (410 with marker).
    SyncStateInvalid,
    /// Any other 4xx in the client-error ranges, 410 included.
    ClientError,
    /// 401 or 403.
    AuthorizationError,
    /// 404 for a mailbox that is not enabled for the REST API.
    MailboxNotEnabled,
    /// Any other 404.
    RecordNotFound,
    /// 429, the application is throttled.
    RateLimitError,
    /// 500.
    ServerError,
    /// 503.
    ServiceUnavailableError,
    /// 554, mail submission rejected by delivery policy.
    MailSubmissionBlocked,
    /// Any status not covered above.
    GenericError,
}

impl ErrorKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorKind::BadSyncToken => "BadSyncToken",
            ErrorKind::SyncStateInvalid => "SyncStateInvalid",
            ErrorKind::ClientError => "ClientError",
            ErrorKind::AuthorizationError => "AuthorizationError",
            ErrorKind::MailboxNotEnabled => "MailboxNotEnabled",
            ErrorKind::RecordNotFound => "RecordNotFound",
            ErrorKind::RateLimitError => "RateLimitError",
            ErrorKind::ServerError => "ServerError",
            ErrorKind::ServiceUnavailableError => "ServiceUnavailableError",
            ErrorKind::MailSubmissionBlocked => "MailSubmissionBlocked",
            ErrorKind::GenericError => "GenericError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A classified non-success response.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{method} {url}: {status} {body}")]
pub struct ResponseError {
    pub kind: ErrorKind,
    pub method: HttpMethod,
    pub url: String,
    pub status: u16,
    pub body: String,
}

impl ResponseError {
    /// `error.code` from a Graph-shaped JSON error body, e.g.
    /// `ErrorMessageSubmissionBlocked`.
    pub fn graph_error_code(&self) -> Option<String> {
        self.graph_error_field("code")
    }

    /// `error.message` from a Graph-shaped JSON error body.
    pub fn graph_error_message(&self) -> Option<String> {
        self.graph_error_field("message")
    }

    fn graph_error_field(&self, field: &str) -> Option<String> {
        let parsed: Value = serde_json::from_str(&self.body).ok()?;
        parsed
            .get("error")?
            .get(field)?
            .as_str()
            .map(str::to_string)
    }
}

/// Errors returned by `OutlookClient`.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered with a non-success status.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The request never produced a response.
    #[error("{method} {url}: transport failed: {source}")]
    Transport {
        method: HttpMethod,
        url: String,
        #[source]
        source: TransportError,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// A success body was not valid JSON, or did not match the caller's type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The client configuration cannot produce a request.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A caller-supplied argument was rejected before any request was made.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ApiError {
    /// The response classification, when this error came from a response.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            ApiError::Response(e) => Some(e.kind),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Response(e) => Some(e.status),
            _ => None,
        }
    }

    pub fn as_response(&self) -> Option<&ResponseError> {
        match self {
            ApiError::Response(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_error(body: &str) -> ResponseError {
        ResponseError {
            kind: ErrorKind::MailSubmissionBlocked,
            method: HttpMethod::Post,
            url: "https://graph.microsoft.com/v1.0/me/messages/1/send".to_string(),
            status: 554,
            body: body.to_string(),
        }
    }

    #[test]
    fn display_carries_method_url_status_and_body() {
        let err = response_error("blocked");
        assert_eq!(
            err.to_string(),
            "POST https://graph.microsoft.com/v1.0/me/messages/1/send: 554 blocked"
        );
    }

    #[test]
    fn graph_error_code_is_extracted_from_json_body() {
        let err = response_error(
            r#"{"error":{"code":"ErrorMessageSubmissionBlocked","message":"Cannot send mail."}}"#,
        );
        assert_eq!(err.graph_error_code().as_deref(), Some("ErrorMessageSubmissionBlocked"));
        assert_eq!(err.graph_error_message().as_deref(), Some("Cannot send mail."));
    }

    #[test]
    fn graph_error_code_absent_for_plain_body() {
        assert_eq!(response_error("gateway exploded").graph_error_code(), None);
    }

    #[test]
    fn api_error_exposes_kind_and_status() {
        let err: ApiError = response_error("").into();
        assert_eq!(err.kind(), Some(ErrorKind::MailSubmissionBlocked));
        assert_eq!(err.status(), Some(554));
        assert_eq!(ApiError::Serialization("x".to_string()).kind(), None);
    }
}
