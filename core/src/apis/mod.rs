//! Per-resource convenience calls.
//!
//! Each function fills in a path and options and delegates to
//! `OutlookClient::perform_request`. The `user` argument selects
//! `users/<id>`; `None` targets the signed-in user (`me`).

pub mod calendar;
pub mod contacts;
pub mod files;
pub mod mail;
pub mod tasks;
pub mod teams;

pub use calendar::EventResponse;

pub(crate) const DEFAULT_MAX_PAGE_SIZE: u32 = 50;

pub(crate) fn user_path(user: Option<&str>) -> String {
    match user.filter(|u| !u.is_empty()) {
        Some(user) => format!("users/{user}"),
        None => "me".to_string(),
    }
}

/// `Prefer` header value for delta queries.
pub(crate) fn track_changes(max_page_size: Option<u32>) -> String {
    format!(
        "odata.track-changes, odata.maxpagesize={}",
        max_page_size.unwrap_or(DEFAULT_MAX_PAGE_SIZE)
    )
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_path_defaults_to_me() {
        assert_eq!(user_path(None), "me");
        assert_eq!(user_path(Some("")), "me");
        assert_eq!(user_path(Some("adele@contoso.test")), "users/adele@contoso.test");
    }

    #[test]
    fn track_changes_defaults_page_size() {
        assert_eq!(track_changes(None), "odata.track-changes, odata.maxpagesize=50");
        assert_eq!(track_changes(Some(10)), "odata.track-changes, odata.maxpagesize=10");
    }
}
