use serde_json::Value;

use super::user_path;
use crate::error::ApiError;
use crate::query::QueryOptions;
use crate::request::RequestSpec;
use crate::OutlookClient;

fn group_segment(task_group_id: Option<&str>) -> String {
    task_group_id.map(|g| format!("/taskGroups/{g}")).unwrap_or_default()
}

fn folder_segment(task_folder_id: Option<&str>) -> String {
    task_folder_id.map(|f| format!("/taskFolders/{f}")).unwrap_or_default()
}

impl OutlookClient {
    pub fn get_task_folders(&self, task_group_id: Option<&str>, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}{}/taskFolders", user_path(user), group_segment(task_group_id));
        self.perform_request(&RequestSpec::get(path))
    }

    pub fn get_tasks(
        &self,
        query: &QueryOptions,
        task_folder_id: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}{}/tasks", user_path(user), folder_segment(task_folder_id));
        self.perform_request(&RequestSpec::get(path).query(query.clone()))
    }

    pub fn create_task(
        &self,
        payload: Value,
        task_folder_id: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}{}/tasks", user_path(user), folder_segment(task_folder_id));
        self.perform_request(&RequestSpec::post(path).json(payload))
    }

    pub fn update_task(&self, task_id: &str, payload: Value, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::patch(format!("/{}/tasks/{task_id}", user_path(user))).json(payload);
        self.perform_request(&spec)
    }

    pub fn delete_task(&self, task_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        self.perform_request(&RequestSpec::delete(format!("/{}/tasks/{task_id}", user_path(user))))
    }

    pub fn create_task_folder(
        &self,
        payload: Value,
        task_group_id: Option<&str>,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let path = format!("/{}{}/taskFolders", user_path(user), group_segment(task_group_id));
        self.perform_request(&RequestSpec::post(path).json(payload))
    }

    pub fn update_task_folder(
        &self,
        task_folder_id: &str,
        payload: Value,
        user: Option<&str>,
    ) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::patch(format!("/{}/taskFolders/{task_folder_id}", user_path(user))).json(payload);
        self.perform_request(&spec)
    }

    pub fn delete_task_folder(&self, task_folder_id: &str, user: Option<&str>) -> Result<Option<Value>, ApiError> {
        let spec = RequestSpec::delete(format!("/{}/taskFolders/{task_folder_id}", user_path(user)));
        self.perform_request(&spec)
    }
}
