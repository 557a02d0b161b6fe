use serde_json::Value;

use super::user_path;
use crate::error::ApiError;
use crate::query::QueryOptions;
use crate::request::RequestSpec;
use crate::OutlookClient;

impl OutlookClient {
    pub fn get_drive(&self, query: &QueryOptions, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/{}/drive", user_path(user))).query(query.clone()))
    }

    /// Children of the root folder of `drive_id`.
    pub fn get_items(&self, drive_id: &str, query: &QueryOptions, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/drives/{drive_id}/root/children", user_path(user)))
            .query(query.clone());
        self.perform_request(&spec)
    }

    pub fn get_children_items(
        &self,
        item_id: &str,
        query: &QueryOptions,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/drive/items/{item_id}/children", user_path(user)))
            .query(query.clone());
        self.perform_request(&spec)
    }

    pub fn get_item(&self, item_id: &str, query: &QueryOptions, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/drive/items/{item_id}", user_path(user))).query(query.clone());
        self.perform_request(&spec)
    }

    pub fn delete_item(&self, item_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::delete(format!("/{}/drive/items/{item_id}", user_path(user))))
    }

    /// Uploads `content` as `filename` in the drive root.
    pub fn create_item(
        &self,
        filename: &str,
        content_type: &str,
        content: Vec<u8>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        if filename.is_empty() || filename.contains('/') {
            return Err(ApiError::InvalidArgument(format!("invalid file name: {filename:?}")));
        }
        let path = format!("/{}/drive/items/root:/{filename}:/content", user_path(user));
        self.perform_request(&RequestSpec::put(path).upload(content_type, content))
    }

    /// Replaces the content of an existing item.
    pub fn update_item(
        &self,
        item_id: &str,
        content_type: &str,
        content: Vec<u8>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}/drive/items/{item_id}/content", user_path(user));
        self.perform_request(&RequestSpec::put(path).upload(content_type, content))
    }

    pub fn get_revisions(&self, item_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::get(format!("/{}/drive/items/{item_id}/versions", user_path(user))))
    }

    pub fn get_revision(&self, item_id: &str, revision_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!(
            "/{}/drive/items/{item_id}/versions/{revision_id}",
            user_path(user)
        ));
        self.perform_request(&spec)
    }

    pub fn get_permissions(&self, item_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::get(format!("/{}/drive/items/{item_id}/permissions", user_path(user)));
        self.perform_request(&spec)
    }
}

#[cfg(test)]
mod tests {
    use crate::apis::testing::{client, path_of};
    use crate::error::ApiError;
    use crate::http::{HttpBody, HttpMethod};

    #[test]
    fn create_item_puts_raw_bytes_with_content_type() {
        let (c, rec) = client();
        c.create_item("report.pdf", "application/pdf", b"%PDF".to_vec(), None).unwrap();
        let req = rec.last();
        assert_eq!(req.method, HttpMethod::Put);
        assert_eq!(path_of(&req), "/me/drive/items/root:/report.pdf:/content");
        assert_eq!(req.header("content-type"), Some("application/pdf"));
        assert_eq!(req.body, Some(HttpBody::Bytes(b"%PDF".to_vec())));
    }

    #[test]
    fn create_item_rejects_nested_name() {
        let (c, rec) = client();
        let err = c.create_item("a/b.txt", "text/plain", Vec::new(), None).unwrap_err();
        assert!(matches!(err, ApiError::InvalidArgument(_)));
        assert!(rec.seen.lock().unwrap().is_empty());
    }

    #[test]
    fn revision_paths() {
        let (c, rec) = client();
        c.get_revision("I1", "R2", Some("u")).unwrap();
        assert_eq!(path_of(&rec.last()), "/users/u/drive/items/I1/versions/R2");
        c.get_permissions("I1", None).unwrap();
        assert_eq!(path_of(&rec.last()), "/me/drive/items/I1/permissions");
    }
}
