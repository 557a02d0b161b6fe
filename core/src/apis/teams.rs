use serde_json::Value;

use super::user_path;
use crate::error::ApiError;
use crate::query::QueryOptions;
use crate::request::RequestSpec;
use crate::OutlookClient;

impl OutlookClient {
    pub fn joined_teams(&self, query: &QueryOptions, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/{}/joinedTeams", user_path(user))).query(query.clone()))
    }

    pub fn get_team_members(&self, team_id: &str) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/teams/{team_id}/members")))
    }

    pub fn get_team_member(&self, team_id: &str, member_id: &str) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/teams/{team_id}/members/{member_id}")))
    }

    pub fn get_channels(&self, team_id: &str) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/teams/{team_id}/channels")))
    }

    pub fn create_channel(&self, team_id: &str, payload: Value) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::post(format!("/teams/{team_id}/channels")).json(payload))
    }

    pub fn get_channel_messages(&self, team_id: &str, channel_id: &str) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/teams/{team_id}/channels/{channel_id}/messages")))
    }

    pub fn get_channel_message(&self, team_id: &str, channel_id: &str, message_id: &str) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/teams/{team_id}/channels/{channel_id}/messages/{message_id}"));
        self.perform_request(&spec)
    }

    pub fn send_channel_message(&self, team_id: &str, channel_id: &str, payload: Value) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::post(format!("/teams/{team_id}/channels/{channel_id}/messages")).json(payload);
        self.perform_request(&spec)
    }

    pub fn get_replies(
        &self,
        team_id: &str,
        channel_id: &str,
        message_id: &str,
        query: &QueryOptions,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!(
            "/teams/{team_id}/channels/{channel_id}/messages/{message_id}/replies"
        ))
        .query(query.clone());
        self.perform_request(&spec)
    }

    pub fn send_reply(
        &self,
        team_id: &str,
        channel_id: &str,
        message_id: &str,
        payload: Value,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::post(format!(
            "/teams/{team_id}/channels/{channel_id}/messages/{message_id}/replies"
        ))
        .json(payload);
        self.perform_request(&spec)
    }

    pub fn get_user(&self, user_id: &str) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/users/{user_id}")))
    }
}
