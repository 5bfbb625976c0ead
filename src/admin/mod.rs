//! Admin view: manage tasks through the admin endpoints.

mod draft;
mod manager;

pub use draft::{DraftError, DraftOption, TaskCommand, TaskDraft};
pub use manager::{
    AdminManager, FormField, TaskForm, DELETE_ERROR_MESSAGE, EMPTY_MESSAGE, LOAD_ERROR_MESSAGE,
    SAVE_ERROR_MESSAGE,
};

use crate::api::{ApiClient, ApiError};

/// Send a submitted draft to the backend.
pub async fn run_command(client: &ApiClient, command: &TaskCommand) -> Result<(), ApiError> {
    match command {
        TaskCommand::Create(task) => client.admin_create_task(task).await.map(|_| ()),
        TaskCommand::Update(task) => client.admin_update_task(task).await.map(|_| ()),
    }
}
