//! Maps a raw response onto a parsed body or a typed error.
//!
//! The sub-kinds below are picked by looking for fixed substrings in the raw
//! body, because the provider does not expose a stable discriminator for
//! them. All marker strings live here so a wording change on the provider
//! side is a one-line fix.

use serde_json::Value;

use crate::error::{ApiError, ErrorKind, ResponseError};
use crate::http::{HttpMethod, HttpResponse};

const BAD_SYNC_TOKEN_MARKER: &str = "Badly formed token";
const SYNC_STATE_MARKERS: &[&str] = &["SyncStateInvalid", "SyncStateNotFound"];
const MAILBOX_NOT_ENABLED_MARKER: &str = "MailboxNotEnabledForRESTAPI";

/// Pick the error kind for a non-success status.
///
/// Returns `None` for 200..=399.
pub fn error_kind(status: u16, body: &str) -> Option<ErrorKind> {
    let kind = match status {
        200..=399 => return None,
        400 | 405..=409 | 411..=423 => {
            if body.contains(BAD_SYNC_TOKEN_MARKER) {
                ErrorKind::BadSyncToken
            } else {
                ErrorKind::ClientError
            }
        }
        410 => {
            if SYNC_STATE_MARKERS.iter().any(|m| body.contains(m)) {
                ErrorKind::SyncStateInvalid
            } else {
                ErrorKind::ClientError
            }
        }
        401 | 403 => ErrorKind::AuthorizationError,
        404 => {
            if body.contains(MAILBOX_NOT_ENABLED_MARKER) {
                ErrorKind::MailboxNotEnabled
            } else {
                ErrorKind::RecordNotFound
            }
        }
        429 => ErrorKind::RateLimitError,
        500 => ErrorKind::ServerError,
        503 => ErrorKind::ServiceUnavailableError,
        554 => ErrorKind::MailSubmissionBlocked,
        _ => ErrorKind::GenericError,
    };
    Some(kind)
}

/// Classify a response.
///
/// Success with an empty (or whitespace-only) body yields `Ok(None)`; any
/// other success body is parsed as JSON and returned as-is.
pub fn classify(method: HttpMethod, url: &str, response: HttpResponse) -> Result<Option<Value>, ApiError> {
    match error_kind(response.status, &response.body) {
        None => {
            if response.body.trim().is_empty() {
                return Ok(None);
            }
            serde_json::from_str(&response.body)
                .map(Some)
                .map_err(|e| ApiError::Deserialization(e.to_string()))
        }
        Some(kind) => Err(ApiError::Response(ResponseError {
            kind,
            method,
            url: url.to_string(),
            status: response.status,
            body: response.body,
        })),
    }
}
