//! The end-user task list.

use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{AnswerResult, Task};
use crate::view::ViewState;

use super::card::{SubmitRequest, TaskCard};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load tasks. Please refresh the page.";
pub const EMPTY_MESSAGE: &str = "No tasks available.";

/// Acquire the session token, then fetch the tasks. Both steps run in
/// order; the token must exist before the list is requested.
pub async fn fetch_tasks(client: &ApiClient) -> Result<Vec<Task>, ApiError> {
    client.session_token().await?;
    client.get_tasks().await
}

#[derive(Debug, Default)]
pub struct TaskList {
    cards: ViewState<Vec<TaskCard>>,
    focused: usize,
    mounted: bool,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &ViewState<Vec<TaskCard>> {
        &self.cards
    }

    pub fn focused(&self) -> usize {
        self.focused
    }

    /// Mark the view as mounted. Returns true the first time only, which is
    /// when the caller should start [`fetch_tasks`].
    pub fn mount(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    /// Apply the result of [`fetch_tasks`]. A failure is terminal for this
    /// page load.
    pub fn finish_load(&mut self, outcome: Result<Vec<Task>, ApiError>) {
        self.cards = match outcome {
            Ok(tasks) => {
                info!(count = tasks.len(), "Tasks loaded");
                ViewState::Loaded(tasks.into_iter().map(TaskCard::new).collect())
            }
            Err(err) => {
                warn!(error = %err, "Loading tasks failed");
                ViewState::Failed(LOAD_ERROR_MESSAGE.to_string())
            }
        };
        self.focused = 0;
    }

    pub fn focus_next(&mut self) {
        if let Some(cards) = self.cards.loaded() {
            if !cards.is_empty() {
                self.focused = (self.focused + 1).min(cards.len() - 1);
            }
        }
    }

    pub fn focus_previous(&mut self) {
        self.focused = self.focused.saturating_sub(1);
    }

    pub fn focused_card(&self) -> Option<&TaskCard> {
        self.cards.loaded()?.get(self.focused)
    }

    fn focused_card_mut(&mut self) -> Option<&mut TaskCard> {
        let focused = self.focused;
        self.cards.loaded_mut()?.get_mut(focused)
    }

    pub fn cursor_next(&mut self) {
        if let Some(card) = self.focused_card_mut() {
            card.cursor_next();
        }
    }

    pub fn cursor_previous(&mut self) {
        if let Some(card) = self.focused_card_mut() {
            card.cursor_previous();
        }
    }

    /// Answer the focused card with the option under its cursor.
    pub fn select_focused(&mut self) -> Option<SubmitRequest> {
        self.focused_card_mut()?.select_at_cursor()
    }

    /// Select `option_id` on task `task_id`.
    pub fn select(&mut self, task_id: u64, option_id: u64) -> Option<SubmitRequest> {
        self.card_mut(task_id)?.select(option_id)
    }

    /// Route a submission outcome back to its card.
    pub fn complete(&mut self, request: SubmitRequest, outcome: Result<AnswerResult, ApiError>) {
        if let Some(card) = self.card_mut(request.task_id) {
            card.complete(request.option_id, outcome);
        }
    }

    fn card_mut(&mut self, task_id: u64) -> Option<&mut TaskCard> {
        self.cards
            .loaded_mut()?
            .iter_mut()
            .find(|c| c.task().id == task_id)
    }
}
