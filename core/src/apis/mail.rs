use serde_json::{json, Value};

use super::{track_changes, user_path};
use crate::error::ApiError;
use crate::query::QueryOptions;
use crate::request::RequestSpec;
use crate::OutlookClient;

impl OutlookClient {
    pub fn get_messages(&self, query: &QueryOptions, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/messages", user_path(user))).query(query.clone());
        self.perform_request(&spec)
    }

    /// Same request as [`get_messages`](Self::get_messages); the filter lives
    /// in `query`.
    pub fn get_messages_with_filters(
        &self,
        query: &QueryOptions,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        self.get_messages(query, user)
    }

    pub fn get_attachments_for(
        &self,
        message_id: &str,
        query: &QueryOptions,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/messages/{message_id}/attachments", user_path(user)))
            .query(query.clone());
        self.perform_request(&spec)
    }

    pub fn get_messages_for_folder(
        &self,
        folder_id: &str,
        query: &QueryOptions,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/mailFolders/{folder_id}/messages", user_path(user)))
            .query(query.clone());
        self.perform_request(&spec)
    }

    /// Delta query over one folder. Pass the `skiptoken` / `deltatoken`
    /// from the previous page in `query` to resume.
    pub fn synchronize_messages_for_folder(
        &self,
        folder_id: &str,
        query: &QueryOptions,
        max_page_size: Option<u32>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/mailFolders/{folder_id}/messages/delta", user_path(user)))
            .query(query.clone())
            .header("Prefer", track_changes(max_page_size));
        self.perform_request(&spec)
    }

    pub fn synchronize_mail_folders(
        &self,
        query: &QueryOptions,
        max_page_size: Option<u32>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/mailFolders/delta", user_path(user)))
            .query(query.clone())
            .header("Prefer", track_changes(max_page_size));
        self.perform_request(&spec)
    }

    pub fn get_folders(
        &self,
        query: &QueryOptions,
        max_page_size: Option<u32>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/mailFolders", user_path(user)))
            .query(query.clone())
            .header("Prefer", track_changes(max_page_size));
        self.perform_request(&spec)
    }

    pub fn get_folder_by_id(&self, folder_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/{}/mailFolders/{folder_id}", user_path(user))))
    }

    pub fn get_folder_children_by_id(&self, folder_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/mailFolders/{folder_id}/childFolders", user_path(user)));
        self.perform_request(&spec)
    }

    pub fn get_message_by_id(&self, id: &str, fields: &[&str], user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/messages/{id}", user_path(user)))
            .query(QueryOptions::new().select(fields.iter().copied()));
        self.perform_request(&spec)
    }

    /// Creates a draft, in `folder_id` when given.
    pub fn create_message(
        &self,
        payload: Value,
        folder_id: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let folder = folder_id.map(|f| format!("/mailFolders/{f}")).unwrap_or_default();
        let spec = RequestSpec::post(format!("/{}{folder}/messages", user_path(user))).json(payload);
        self.perform_request(&spec)
    }

    pub fn create_reply_message(&self, id: &str, comment: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::post(format!("/{}/messages/{id}/createReply", user_path(user)))
            .json(json!({ "Comment": comment }));
        self.perform_request(&spec)
    }

    pub fn update_message(&self, id: &str, payload: Value, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::patch(format!("/{}/messages/{id}", user_path(user))).json(payload);
        self.perform_request(&spec)
    }

    pub fn delete_message(&self, id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::delete(format!("/{}/messages/{id}", user_path(user))))
    }

    /// Sends `message` without creating a draft first. The service answers
    /// with an empty body, so success is `Ok(None)`.
    pub fn send_message(
        &self,
        message: Value,
        save_to_sent_items: bool,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::post(format!("/{}/sendMail", user_path(user))).json(json!({
            "Message": message,
            "SaveToSentItems": save_to_sent_items,
        }));
        self.perform_request(&spec)
    }

    pub fn send_draft(&self, message_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::post(format!("/{}/messages/{message_id}/send", user_path(user))))
    }

    /// Quick reply-all; the service does not return the sent message.
    pub fn reply_all(&self, message_id: &str, comment: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::post(format!("/{}/messages/{message_id}/replyAll", user_path(user)))
            .json(json!({ "Comment": comment }));
        self.perform_request(&spec)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Value};

    use crate::apis::testing::{client, path_of};
    use crate::http::{HttpBody, HttpMethod};
    use crate::query::QueryOptions;

    fn json_body(body: Option<HttpBody>) -> Value {
        match body {
            Some(HttpBody::Json(s)) => serde_json::from_str(&s).unwrap(),
            other => panic!("expected JSON body, got {other:?}"),
        }
    }

    #[test]
    fn delta_sync_sets_prefer_header_and_tokens() {
        let (c, rec) = client();
        let query = QueryOptions::new().deltatoken("abc");
        c.synchronize_messages_for_folder("inbox", &query, Some(25), None).unwrap();
        let req = rec.last();
        assert_eq!(req.url, "https://graph.test/v1.0/me/mailFolders/inbox/messages/delta?$deltatoken=abc");
        assert_eq!(req.header("prefer"), Some("odata.track-changes, odata.maxpagesize=25"));
    }

    #[test]
    fn filtered_messages_for_user() {
        let (c, rec) = client();
        let query = QueryOptions::new().filter("isRead eq false").top(5);
        c.get_messages_with_filters(&query, Some("u1")).unwrap();
        assert_eq!(
            rec.last().url,
            "https://graph.test/v1.0/users/u1/messages?$filter=isRead%20eq%20false&$top=5"
        );
    }

    #[test]
    fn folder_listing_uses_default_page_size() {
        let (c, rec) = client();
        c.get_folders(&QueryOptions::new(), None, Some("u1")).unwrap();
        let req = rec.last();
        assert_eq!(path_of(&req), "/users/u1/mailFolders");
        assert_eq!(req.header("prefer"), Some("odata.track-changes, odata.maxpagesize=50"));
    }

    #[test]
    fn send_message_wraps_payload() {
        let (c, rec) = client();
        c.send_message(json!({"Subject": "Hi"}), false, None).unwrap();
        let req = rec.last();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(path_of(&req), "/me/sendMail");
        assert_eq!(json_body(req.body), json!({"Message": {"Subject": "Hi"}, "SaveToSentItems": false}));
    }

    #[test]
    fn reply_all_sends_comment() {
        let (c, rec) = client();
        c.reply_all("M1", "thanks", None).unwrap();
        let req = rec.last();
        assert_eq!(path_of(&req), "/me/messages/M1/replyAll");
        assert_eq!(json_body(req.body), json!({"Comment": "thanks"}));
    }

    #[test]
    fn send_draft_posts_without_body() {
        let (c, rec) = client();
        c.send_draft("M1", None).unwrap();
        let req = rec.last();
        assert_eq!(path_of(&req), "/me/messages/M1/send");
        assert!(req.body.is_none());
    }

    #[test]
    fn create_message_in_folder() {
        let (c, rec) = client();
        c.create_message(json!({"Subject": "Draft"}), Some("drafts"), None).unwrap();
        assert_eq!(path_of(&rec.last()), "/me/mailFolders/drafts/messages");
    }
}
