use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use uuid::Uuid;

use crate::config::IdentityConfig;
use crate::database::models::{CreateDataItem, CreateProject, DataItem, Project, UpdateDataItem, UpdateProject, User};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{detail} (HTTP {status})")]
    Api { status: StatusCode, detail: String },
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Http(err) => err.status(),
            ClientError::Api { status, .. } => Some(*status),
        }
    }
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Typed HTTP client for the OGamba API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    identity_header: String,
    user: Option<String>,
}

impl ApiClient {
    /// `user` is sent in the identity header; without it the server falls
    /// back to its placeholder identity.
    pub fn new(base_url: impl Into<String>, user: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            identity_header: IdentityConfig::default().header,
            user,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base_url, path));
        match &self.user {
            Some(user) => builder.header(self.identity_header.as_str(), user.as_str()),
            None => builder,
        }
    }

    async fn send<T: DeserializeOwned>(&self, builder: RequestBuilder) -> ClientResult<T> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<T>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<Value>(&body)
            .ok()
            .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(str::to_string))
            .unwrap_or(body);
        Err(ClientError::Api { status, detail })
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(&self, method: Method, path: &str, body: &B) -> ClientResult<T> {
        self.send(self.request(method, path).json(body)).await
    }

    /// Health is reported even when degraded, so the status is returned
    /// alongside the body instead of as an error.
    pub async fn health(&self) -> ClientResult<(StatusCode, Value)> {
        let response = self.request(Method::GET, "/health").send().await?;
        let status = response.status();
        Ok((status, response.json::<Value>().await?))
    }

    pub async fn whoami(&self) -> ClientResult<User> {
        self.send(self.request(Method::GET, "/users/me")).await
    }

    pub async fn list_projects(&self) -> ClientResult<Vec<Project>> {
        self.send(self.request(Method::GET, "/projects/")).await
    }

    pub async fn create_project(&self, name: &str) -> ClientResult<Project> {
        let body = CreateProject { name: name.to_string() };
        self.send_json(Method::POST, "/projects/", &body).await
    }

    pub async fn get_project(&self, project_id: Uuid) -> ClientResult<Project> {
        self.send(self.request(Method::GET, &format!("/projects/{}", project_id))).await
    }

    pub async fn update_project(&self, project_id: Uuid, update: &UpdateProject) -> ClientResult<Project> {
        self.send_json(Method::PATCH, &format!("/projects/{}", project_id), update).await
    }

    pub async fn list_data_items(&self, project_id: Uuid) -> ClientResult<Vec<DataItem>> {
        self.send(self.request(Method::GET, &format!("/projects/{}/data-items/", project_id)))
            .await
    }

    pub async fn create_data_item(&self, project_id: Uuid, item: &CreateDataItem) -> ClientResult<DataItem> {
        self.send_json(Method::POST, &format!("/projects/{}/data-items/", project_id), item)
            .await
    }

    pub async fn get_data_item(&self, project_id: Uuid, item_id: Uuid) -> ClientResult<DataItem> {
        let path = format!("/projects/{}/data-items/{}", project_id, item_id);
        self.send(self.request(Method::GET, &path)).await
    }

    pub async fn update_data_item(
        &self,
        project_id: Uuid,
        item_id: Uuid,
        update: &UpdateDataItem,
    ) -> ClientResult<DataItem> {
        let path = format!("/projects/{}/data-items/{}", project_id, item_id);
        self.send_json(Method::PATCH, &path, update).await
    }

    /// Soft delete; returns the server's confirmation body
    pub async fn delete_data_item(&self, project_id: Uuid, item_id: Uuid) -> ClientResult<Value> {
        let path = format!("/projects/{}/data-items/{}", project_id, item_id);
        self.send(self.request(Method::DELETE, &path)).await
    }
}
