use std::str::FromStr;

use serde_json::{Map, Value};

use super::{track_changes, user_path};
use crate::error::ApiError;
use crate::query::QueryOptions;
use crate::request::RequestSpec;
use crate::OutlookClient;

/// How to answer a meeting invitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventResponse {
    Accept,
    TentativelyAccept,
    Decline,
}

impl EventResponse {
    pub fn action(self) -> &'static str {
        match self {
            EventResponse::Accept => "accept",
            EventResponse::TentativelyAccept => "tentativelyAccept",
            EventResponse::Decline => "decline",
        }
    }
}

impl FromStr for EventResponse {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "accept" => Ok(EventResponse::Accept),
            "tentativelyaccept" => Ok(EventResponse::TentativelyAccept),
            "decline" => Ok(EventResponse::Decline),
            _ => Err(ApiError::InvalidArgument(format!(
                "{s} is invalid. Valid actions are accept, tentativelyaccept, or decline."
            ))),
        }
    }
}

fn calendar_segment(calendar_id: Option<&str>) -> String {
    calendar_id.map(|id| format!("/calendars/{id}")).unwrap_or_default()
}

impl OutlookClient {
    pub fn get_calendars(
        &self,
        query: &QueryOptions,
        calendar_group_id: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let group = calendar_group_id
            .map(|g| format!("/calendarGroups/{g}"))
            .unwrap_or_default();
        let spec = RequestSpec::get(format!("/{}{group}/calendars", user_path(user))).query(query.clone());
        self.perform_request(&spec)
    }

    /// Delta query over the calendar view between two ISO 8601 instants.
    pub fn sync_events(
        &self,
        start_date_time: &str,
        end_date_time: &str,
        calendar_id: Option<&str>,
        query: &QueryOptions,
        max_page_size: Option<u32>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}{}/calendarView/delta", user_path(user), calendar_segment(calendar_id));
        let spec = RequestSpec::get(path)
            .query(query.clone())
            .param("startDateTime", start_date_time)
            .param("endDateTime", end_date_time)
            .header("Prefer", track_changes(max_page_size));
        self.perform_request(&spec)
    }

    pub fn get_calendar_view(
        &self,
        start_date_time: &str,
        end_date_time: &str,
        calendar_id: Option<&str>,
        fields: &[&str],
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}{}/calendarView", user_path(user), calendar_segment(calendar_id));
        let spec = RequestSpec::get(path)
            .query(QueryOptions::new().select(fields.iter().copied()))
            .param("startDateTime", start_date_time)
            .param("endDateTime", end_date_time);
        self.perform_request(&spec)
    }

    pub fn get_calendar_attachments_for(
        &self,
        event_id: &str,
        query: &QueryOptions,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/events/{event_id}/attachments", user_path(user)))
            .query(query.clone());
        self.perform_request(&spec)
    }

    pub fn get_event_by_id(&self, event_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/{}/events/{event_id}", user_path(user))))
    }

    pub fn create_event(
        &self,
        payload: Value,
        calendar_id: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}{}/events", user_path(user), calendar_segment(calendar_id));
        self.perform_request(&RequestSpec::post(path).json(payload))
    }

    pub fn update_event(&self, event_id: &str, payload: Value, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::patch(format!("/{}/events/{event_id}", user_path(user))).json(payload);
        self.perform_request(&spec)
    }

    pub fn delete_event(&self, event_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::delete(format!("/{}/events/{event_id}", user_path(user))))
    }

    /// Occurrences of a recurring event between two ISO 8601 instants.
    pub fn get_event_instances(
        &self,
        event_id: &str,
        start_date_time: &str,
        end_date_time: &str,
        query: &QueryOptions,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/events/{event_id}/instances", user_path(user)))
            .query(query.clone())
            .param("startDateTime", start_date_time)
            .param("endDateTime", end_date_time);
        self.perform_request(&spec)
    }

    pub fn respond_to_event(
        &self,
        event_id: &str,
        response: EventResponse,
        comment: Option<&str>,
        send_response: Option<bool>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let mut body = Map::new();
        if let Some(comment) = comment.filter(|c| !c.is_empty()) {
            body.insert("Comment".to_string(), Value::from(comment));
        }
        if let Some(send_response) = send_response {
            body.insert("SendResponse".to_string(), Value::from(send_response));
        }
        let path = format!("/{}/events/{event_id}/{}", user_path(user), response.action());
        let mut spec = RequestSpec::post(path);
        if !body.is_empty() {
            spec = spec.json(Value::Object(body));
        }
        self.perform_request(&spec)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use super::*;
    use crate::apis::testing::{client, path_of};
    use crate::http::HttpBody;

    #[test]
    fn event_response_parses_case_insensitively() {
        assert_eq!("TentativelyAccept".parse::<EventResponse>().unwrap(), EventResponse::TentativelyAccept);
        assert!(matches!("maybe".parse::<EventResponse>(), Err(ApiError::InvalidArgument(_))));
    }

    #[test]
    fn sync_events_adds_window_after_odata_params() {
        let (c, rec) = client();
        let query = QueryOptions::new().skiptoken("s1");
        c.sync_events("2024-01-01T00:00:00Z", "2024-02-01T00:00:00Z", Some("CAL"), &query, None, None)
            .unwrap();
        let req = rec.last();
        assert_eq!(path_of(&req), "/me/calendars/CAL/calendarView/delta");
        assert!(req.url.ends_with(
            "?$skiptoken=s1&startDateTime=2024-01-01T00%3A00%3A00Z&endDateTime=2024-02-01T00%3A00%3A00Z"
        ));
        assert_eq!(req.header("prefer"), Some("odata.track-changes, odata.maxpagesize=50"));
    }

    #[test]
    fn get_calendars_in_group() {
        let (c, rec) = client();
        c.get_calendars(&QueryOptions::new(), Some("G1"), None).unwrap();
        assert_eq!(path_of(&rec.last()), "/me/calendarGroups/G1/calendars");
    }

    #[test]
    fn respond_to_event_posts_optional_fields() {
        let (c, rec) = client();
        c.respond_to_event("E1", EventResponse::Decline, Some("conflict"), Some(true), None)
            .unwrap();
        let req = rec.last();
        assert_eq!(path_of(&req), "/me/events/E1/decline");
        let body: Value = match req.body {
            Some(HttpBody::Json(s)) => serde_json::from_str(&s).unwrap(),
            other => panic!("unexpected body {other:?}"),
        };
        assert_eq!(body, json!({"Comment": "conflict", "SendResponse": true}));
    }

    #[test]
    fn respond_to_event_without_extras_sends_no_body() {
        let (c, rec) = client();
        c.respond_to_event("E1", EventResponse::Accept, Some(""), None, None).unwrap();
        let req = rec.last();
        assert_eq!(path_of(&req), "/me/events/E1/accept");
        assert_eq!(req.body, None);
    }
}
