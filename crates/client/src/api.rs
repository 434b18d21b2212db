//! REST client for the taskboard API.
//!
//! [`TaskboardApi`] is the seam the [`Board`](crate::board::Board) talks
//! through; [`HttpApi`] implements it over [`reqwest`].

use std::time::Duration;

use async_trait::async_trait;
use serde_json::json;
use taskboard_core::types::DbId;

use crate::models::{Category, CategoryMutation, ErrorBody, NewTask, Task, TaskEdit, TaskMutation};

/// Default per-request timeout. Requests are never retried.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors from the client layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (connection refused, timeout, decode).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {}", message.as_deref().unwrap_or("no message"))]
    Api {
        status: u16,
        /// The `message` field of the error body, when there was one.
        message: Option<String>,
    },

    /// Refused locally, before any request was sent.
    #[error("{0}")]
    Invalid(&'static str),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The server-provided message, if the server sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ClientError::Api { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

/// Operations the taskboard API exposes.
#[async_trait]
pub trait TaskboardApi: Send + Sync {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError>;

    async fn create_category(&self, name: &str) -> Result<Category, ClientError>;

    async fn rename_category(&self, id: DbId, name: &str) -> Result<Category, ClientError>;

    async fn delete_category(&self, id: DbId) -> Result<(), ClientError>;

    /// List tasks newest first, optionally only those in `category_id`.
    async fn list_tasks(&self, category_id: Option<DbId>) -> Result<Vec<Task>, ClientError>;

    async fn get_task(&self, id: DbId) -> Result<Task, ClientError>;

    async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError>;

    async fn update_task(&self, id: DbId, edit: &TaskEdit) -> Result<Task, ClientError>;

    async fn delete_task(&self, id: DbId) -> Result<(), ClientError>;
}

/// HTTP client for one taskboard server.
pub struct HttpApi {
    client: reqwest::Client,
    api_url: String,
}

impl HttpApi {
    /// Create a client for the API rooted at `api_url`, e.g.
    /// `http://localhost:8000/api`.
    pub fn new(api_url: impl Into<String>) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self::with_client(client, api_url))
    }

    /// Create a client reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, api_url: impl Into<String>) -> Self {
        let api_url = api_url.into().trim_end_matches('/').to_string();
        Self { client, api_url }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{resource}", self.api_url)
    }

    // ---- private helpers ----

    /// Return the response unchanged on success, or a
    /// [`ClientError::Api`] carrying the server's `message` on failure.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message),
            Err(_) => None,
        };
        tracing::debug!(status = status.as_u16(), ?message, "API request failed");

        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn parse_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }

    async fn check_status(response: reqwest::Response) -> Result<(), ClientError> {
        Self::ensure_success(response).await?;
        Ok(())
    }
}

#[async_trait]
impl TaskboardApi for HttpApi {
    async fn list_categories(&self) -> Result<Vec<Category>, ClientError> {
        let response = self.client.get(self.url("categories")).send().await?;
        Self::parse_response(response).await
    }

    async fn create_category(&self, name: &str) -> Result<Category, ClientError> {
        let response = self
            .client
            .post(self.url("categories"))
            .json(&json!({ "name": name }))
            .send()
            .await?;
        let created: CategoryMutation = Self::parse_response(response).await?;
        Ok(Category {
            id: created.id,
            name: created.name,
        })
    }

    async fn rename_category(&self, id: DbId, name: &str) -> Result<Category, ClientError> {
        let response = self
            .client
            .put(self.url("categories"))
            .json(&json!({ "id": id, "name": name }))
            .send()
            .await?;
        let renamed: CategoryMutation = Self::parse_response(response).await?;
        Ok(Category {
            id: renamed.id,
            name: renamed.name,
        })
    }

    async fn delete_category(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url("categories"))
            .json(&json!({ "id": id }))
            .send()
            .await?;
        Self::check_status(response).await
    }

    async fn list_tasks(&self, category_id: Option<DbId>) -> Result<Vec<Task>, ClientError> {
        let mut request = self.client.get(self.url("tasks"));
        if let Some(category_id) = category_id {
            request = request.query(&[("category_id", category_id)]);
        }
        let response = request.send().await?;
        Self::parse_response(response).await
    }

    async fn get_task(&self, id: DbId) -> Result<Task, ClientError> {
        let response = self
            .client
            .get(self.url("tasks"))
            .query(&[("id", id)])
            .send()
            .await?;
        Self::parse_response(response).await
    }

    async fn create_task(&self, task: &NewTask) -> Result<Task, ClientError> {
        let response = self
            .client
            .post(self.url("tasks"))
            .json(task)
            .send()
            .await?;
        let created: TaskMutation = Self::parse_response(response).await?;
        Ok(created.task)
    }

    async fn update_task(&self, id: DbId, edit: &TaskEdit) -> Result<Task, ClientError> {
        let mut body = serde_json::to_value(edit)
            .map_err(|_| ClientError::Invalid("Task changes could not be encoded"))?;
        body["id"] = json!(id);

        let response = self
            .client
            .put(self.url("tasks"))
            .json(&body)
            .send()
            .await?;
        let updated: TaskMutation = Self::parse_response(response).await?;
        Ok(updated.task)
    }

    async fn delete_task(&self, id: DbId) -> Result<(), ClientError> {
        let response = self
            .client
            .delete(self.url("tasks"))
            .json(&json!({ "id": id }))
            .send()
            .await?;
        Self::check_status(response).await
    }
}
