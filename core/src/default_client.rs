//! Process-wide client for callers that do not manage their own.

use once_cell::sync::OnceCell;

use crate::config::ClientConfiguration;
use crate::error::ApiError;
use crate::OutlookClient;

/// Environment variable read once when the default client is first built.
pub const TOKEN_ENV: &str = "OUTLOOK_AUTHENTICATION_TOKEN";

static DEFAULT_CLIENT: OnceCell<OutlookClient> = OnceCell::new();

/// The shared client, built on first use from `ClientConfiguration::default()`
/// and `OUTLOOK_AUTHENTICATION_TOKEN`.
///
/// It is an ordinary `OutlookClient`; refresh its token with
/// `set_authentication_token`. Construct a client directly for any other
/// configuration.
pub fn default_client() -> Result<&'static OutlookClient, ApiError> {
    DEFAULT_CLIENT.get_or_try_init(|| {
        let mut config = ClientConfiguration::default();
        if let Ok(token) = std::env::var(TOKEN_ENV) {
            config.authentication_token = Some(token);
        }
        OutlookClient::new(config)
    })
}
