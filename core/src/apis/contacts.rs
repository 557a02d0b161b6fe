use serde_json::Value;

use super::user_path;
use crate::error::ApiError;
use crate::query::QueryOptions;
use crate::request::RequestSpec;
use crate::OutlookClient;

impl OutlookClient {
    pub fn get_contacts(&self, query: &QueryOptions, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/contacts", user_path(user))).query(query.clone());
        self.perform_request(&spec)
    }

    /// `fields` becomes `$select` when non-empty.
    pub fn get_contact_by_id(&self, id: &str, fields: &[&str], user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/contacts/{id}", user_path(user)))
            .query(QueryOptions::new().select(fields.iter().copied()));
        self.perform_request(&spec)
    }

    /// Creates in `folder_id` when given, otherwise in the default contacts
    /// folder.
    pub fn create_contact(
        &self,
        payload: Value,
        folder_id: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let folder = folder_id.map(|f| format!("/contactFolders/{f}")).unwrap_or_default();
        let spec = RequestSpec::post(format!("/{}{folder}/contacts", user_path(user))).json(payload);
        self.perform_request(&spec)
    }

    pub fn update_contact(&self, id: &str, payload: Value, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::patch(format!("/{}/contacts/{id}", user_path(user))).json(payload);
        self.perform_request(&spec)
    }

    pub fn delete_contact(&self, id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::delete(format!("/{}/contacts/{id}", user_path(user))))
    }
}
