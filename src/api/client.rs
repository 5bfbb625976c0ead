use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::Config;
use crate::models::{AnswerResult, Task, TaskCreate, TaskUpdate};

use super::{ApiError, Backend, HttpBackend, SessionTokenCache};

/// Shared handle the views call into. Cheap to clone.
#[derive(Clone)]
pub struct ApiClient {
    backend: Arc<dyn Backend>,
    session: Arc<SessionTokenCache>,
}

impl ApiClient {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self {
            backend,
            session: Arc::new(SessionTokenCache::new()),
        }
    }

    /// Build an HTTP-backed client from configuration.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let backend = HttpBackend::new(config.api_url.clone(), config.request_timeout)?;
        Ok(Self::new(Arc::new(backend)))
    }

    /// Session token, fetched at most once until invalidated.
    pub async fn session_token(&self) -> Result<String, ApiError> {
        self.session.get_or_fetch(self.backend.as_ref()).await
    }

    /// Forget the cached token.
    pub async fn end_session(&self) {
        self.session.clear().await;
    }

    pub async fn get_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.backend.get_tasks().await
    }

    /// Submit an answer with the session token.
    ///
    /// When the backend rejects the token (401/403) the cache is
    /// invalidated and the submission is repeated once with a fresh token.
    pub async fn submit_answer(&self, task_id: u64, option_id: u64) -> Result<AnswerResult, ApiError> {
        let token = self.session_token().await?;
        debug!(task_id, option_id, "Submitting answer");

        match self.backend.submit_answer(task_id, option_id, &token).await {
            Err(err) if err.is_auth_failure() => {
                warn!(task_id, error = %err, "Session token rejected, fetching a new one");
                self.session.invalidate(&token).await;
                let token = self.session_token().await?;
                self.backend.submit_answer(task_id, option_id, &token).await
            }
            other => other,
        }
    }

    pub async fn admin_get_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.backend.admin_get_tasks().await
    }

    pub async fn admin_create_task(&self, task: &TaskCreate) -> Result<Task, ApiError> {
        self.backend.admin_create_task(task).await
    }

    pub async fn admin_update_task(&self, task: &TaskUpdate) -> Result<Task, ApiError> {
        self.backend.admin_update_task(task).await
    }

    pub async fn admin_delete_task(&self, task_id: u64) -> Result<(), ApiError> {
        self.backend.admin_delete_task(task_id).await
    }
}
