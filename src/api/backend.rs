use async_trait::async_trait;

use crate::models::{AnswerResult, Task, TaskCreate, TaskUpdate};

use super::ApiError;

/// The REST surface the client consumes.
///
/// Every method maps to exactly one HTTP call. Nothing here retries;
/// callers decide what a failure means for the view.
#[async_trait]
pub trait Backend: Send + Sync {
    /// `GET /session/token`
    async fn fetch_session_token(&self) -> Result<String, ApiError>;

    /// `GET /tasks`, options without correctness flags.
    async fn get_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// `POST /tasks/:id/answer` with a bearer token.
    async fn submit_answer(
        &self,
        task_id: u64,
        option_id: u64,
        token: &str,
    ) -> Result<AnswerResult, ApiError>;

    /// `GET /admin/tasks`, options with correctness flags.
    async fn admin_get_tasks(&self) -> Result<Vec<Task>, ApiError>;

    /// `POST /admin/tasks`
    async fn admin_create_task(&self, task: &TaskCreate) -> Result<Task, ApiError>;

    /// `PUT /admin/tasks/:id`
    async fn admin_update_task(&self, task: &TaskUpdate) -> Result<Task, ApiError>;

    /// `DELETE /admin/tasks/:id`
    async fn admin_delete_task(&self, task_id: u64) -> Result<(), ApiError>;
}
