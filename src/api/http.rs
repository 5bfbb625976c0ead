//! reqwest implementation of [`Backend`].

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{AnswerResult, Task, TaskCreate, TaskUpdate};

use super::{ApiError, Backend};

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerRequest {
    option_id: u64,
}

/// Talks to the worksheet backend over HTTP.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    /// Create a backend rooted at `base_url`, e.g. `http://localhost:8080/api`.
    ///
    /// `timeout` bounds every request so a hanging call ends in a failure
    /// state instead of a permanent spinner.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn execute(&self, path: &str, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::from_reqwest(path, e))?;

        let status = response.status();
        debug!(path = %path, status = %status, "Backend responded");

        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                path: path.to_string(),
            });
        }

        Ok(response)
    }

    async fn fetch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, ApiError> {
        self.execute(path, request)
            .await?
            .json::<T>()
            .await
            .map_err(|e| ApiError::from_reqwest(path, e))
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn fetch_session_token(&self) -> Result<String, ApiError> {
        let path = "/session/token";
        let body: TokenResponse = self.fetch_json(path, self.client.get(self.url(path))).await?;
        Ok(body.token)
    }

    async fn get_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let path = "/tasks";
        self.fetch_json(path, self.client.get(self.url(path))).await
    }

    async fn submit_answer(
        &self,
        task_id: u64,
        option_id: u64,
        token: &str,
    ) -> Result<AnswerResult, ApiError> {
        let path = format!("/tasks/{}/answer", task_id);
        let request = self
            .client
            .post(self.url(&path))
            .bearer_auth(token)
            .json(&AnswerRequest { option_id });

        self.fetch_json(&path, request).await
    }

    async fn admin_get_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let path = "/admin/tasks";
        self.fetch_json(path, self.client.get(self.url(path))).await
    }

    async fn admin_create_task(&self, task: &TaskCreate) -> Result<Task, ApiError> {
        let path = "/admin/tasks";
        self.fetch_json(path, self.client.post(self.url(path)).json(task))
            .await
    }

    async fn admin_update_task(&self, task: &TaskUpdate) -> Result<Task, ApiError> {
        let path = format!("/admin/tasks/{}", task.id);
        let request = self.client.put(self.url(&path)).json(task);
        self.fetch_json(&path, request).await
    }

    async fn admin_delete_task(&self, task_id: u64) -> Result<(), ApiError> {
        let path = format!("/admin/tasks/{}", task_id);
        self.execute(&path, self.client.delete(self.url(&path)))
            .await
            .map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let backend = HttpBackend::new("http://localhost:8080/api/", Duration::from_secs(1)).unwrap();
        assert_eq!(backend.url("/tasks"), "http://localhost:8080/api/tasks");
    }

    #[test]
    fn test_answer_body_shape() {
        let json = serde_json::to_string(&AnswerRequest { option_id: 3 }).unwrap();
        assert_eq!(json, r#"{"optionId":3}"#);
    }
}
