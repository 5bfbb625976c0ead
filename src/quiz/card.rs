//! Answer-submission state machine for a single task card.

use tracing::{info, warn};

use crate::api::ApiError;
use crate::models::{AnswerResult, Task, TaskOption};

pub const SUBMIT_ERROR_MESSAGE: &str = "Error submitting answer. Please try again.";

/// Where a card is in its answer lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CardState {
    /// Nothing selected yet.
    #[default]
    Idle,
    /// A submission for `option_id` is in flight.
    Submitting { option_id: u64 },
    /// Backend verdict received. Terminal.
    Answered { option_id: u64, result: AnswerResult },
    /// The submission itself failed; selecting again retries.
    Failed { option_id: u64, message: String },
}

/// How one option should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionMark {
    Plain,
    Pending,
    SelectedCorrect,
    SelectedWrong,
    /// The right answer, revealed after a wrong selection.
    Revealed,
}

/// A submission the caller has to send.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitRequest {
    pub task_id: u64,
    pub option_id: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskCard {
    task: Task,
    state: CardState,
    cursor: usize,
}

impl TaskCard {
    pub fn new(task: Task) -> Self {
        Self {
            task,
            state: CardState::Idle,
            cursor: 0,
        }
    }

    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_locked(&self) -> bool {
        matches!(self.state, CardState::Answered { .. })
    }

    pub fn cursor_next(&mut self) {
        let len = self.task.options.len();
        if len > 0 {
            self.cursor = (self.cursor + 1) % len;
        }
    }

    pub fn cursor_previous(&mut self) {
        let len = self.task.options.len();
        if len > 0 {
            self.cursor = (self.cursor + len - 1) % len;
        }
    }

    /// Select the option under the cursor.
    pub fn select_at_cursor(&mut self) -> Option<SubmitRequest> {
        let option_id = self.task.options.get(self.cursor)?.id;
        self.select(option_id)
    }

    /// Select `option_id`. Returns the request to send, or `None` when the
    /// card is busy, already answered, or the option is not on this task.
    pub fn select(&mut self, option_id: u64) -> Option<SubmitRequest> {
        match self.state {
            CardState::Idle | CardState::Failed { .. } => {}
            CardState::Submitting { .. } | CardState::Answered { .. } => return None,
        }

        let index = self.task.options.iter().position(|o| o.id == option_id)?;
        self.cursor = index;
        self.state = CardState::Submitting { option_id };

        Some(SubmitRequest {
            task_id: self.task.id,
            option_id,
        })
    }

    /// Apply the outcome of a submission. Ignored unless that exact
    /// submission is still in flight.
    pub fn complete(&mut self, option_id: u64, outcome: Result<AnswerResult, ApiError>) {
        if self.state != (CardState::Submitting { option_id }) {
            return;
        }

        self.state = match outcome {
            Ok(result) => {
                info!(
                    task_id = self.task.id,
                    option_id,
                    is_correct = result.is_correct,
                    "Answer recorded"
                );
                CardState::Answered { option_id, result }
            }
            Err(err) => {
                warn!(task_id = self.task.id, option_id, error = %err, "Answer submission failed");
                CardState::Failed {
                    option_id,
                    message: SUBMIT_ERROR_MESSAGE.to_string(),
                }
            }
        };
    }

    /// Visual mark for `option` given the current state.
    pub fn mark(&self, option: &TaskOption) -> OptionMark {
        match &self.state {
            CardState::Idle => OptionMark::Plain,
            CardState::Submitting { option_id } => {
                if *option_id == option.id {
                    OptionMark::Pending
                } else {
                    OptionMark::Plain
                }
            }
            CardState::Answered { option_id, result } => {
                if *option_id == option.id {
                    if result.is_correct {
                        OptionMark::SelectedCorrect
                    } else {
                        OptionMark::SelectedWrong
                    }
                } else if !result.is_correct && option.is_correct == Some(true) {
                    OptionMark::Revealed
                } else {
                    OptionMark::Plain
                }
            }
            CardState::Failed { .. } => OptionMark::Plain,
        }
    }

    /// Feedback line under the options, if any.
    pub fn feedback(&self) -> Option<(&str, bool)> {
        match &self.state {
            CardState::Answered { result, .. } => Some((result.message.as_str(), result.is_correct)),
            CardState::Failed { message, .. } => Some((message.as_str(), false)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use super::*;
    use crate::api::testing::task;

    fn card() -> TaskCard {
        TaskCard::new(task(7, "2+2=?", &[(3, "4", true), (4, "5", false), (5, "22", false)]))
    }

    fn verdict(is_correct: bool, message: &str) -> AnswerResult {
        AnswerResult {
            is_correct,
            message: message.to_string(),
        }
    }

    fn server_error() -> ApiError {
        ApiError::Status {
            status: StatusCode::BAD_GATEWAY,
            path: "/tasks/7/answer".to_string(),
        }
    }

    #[test]
    fn test_select_moves_to_submitting() {
        let mut card = card();
        let request = card.select(3).unwrap();

        assert_eq!(request, SubmitRequest { task_id: 7, option_id: 3 });
        assert_eq!(card.state(), &CardState::Submitting { option_id: 3 });
        assert_eq!(card.mark(&card.task().options[0]), OptionMark::Pending);
    }

    #[test]
    fn test_clicks_while_submitting_are_ignored() {
        let mut card = card();
        card.select(3).unwrap();

        assert!(card.select(4).is_none());
        assert!(card.select(3).is_none());
        assert_eq!(card.state(), &CardState::Submitting { option_id: 3 });
    }

    #[test]
    fn test_answered_card_is_locked() {
        let mut card = card();
        card.select(3).unwrap();
        card.complete(3, Ok(verdict(true, "Correct!")));

        let before = card.state().clone();
        for option in [3, 4, 5] {
            assert!(card.select(option).is_none());
        }
        assert!(card.select_at_cursor().is_none());
        assert_eq!(card.state(), &before);
        assert!(card.is_locked());
        assert_eq!(card.feedback(), Some(("Correct!", true)));
    }

    #[test]
    fn test_wrong_answer_reveals_correct_option() {
        let mut card = card();
        card.select(4).unwrap();
        card.complete(4, Ok(verdict(false, "Wrong.")));

        let options = card.task().options.clone();
        assert_eq!(card.mark(&options[0]), OptionMark::Revealed);
        assert_eq!(card.mark(&options[1]), OptionMark::SelectedWrong);
        assert_eq!(card.mark(&options[2]), OptionMark::Plain);
    }

    #[test]
    fn test_wrong_answer_without_flags_reveals_nothing() {
        let mut card = TaskCard::new(Task {
            id: 1,
            instruction: "q".to_string(),
            options: vec![
                TaskOption {
                    id: 1,
                    text: "a".to_string(),
                    is_correct: None,
                },
                TaskOption {
                    id: 2,
                    text: "b".to_string(),
                    is_correct: None,
                },
            ],
        });
        card.select(2).unwrap();
        card.complete(2, Ok(verdict(false, "Nope")));

        let options = card.task().options.clone();
        assert_eq!(card.mark(&options[0]), OptionMark::Plain);
        assert_eq!(card.mark(&options[1]), OptionMark::SelectedWrong);
    }

    #[test]
    fn test_failure_is_distinct_and_retryable() {
        let mut card = card();
        card.select(3).unwrap();
        card.complete(3, Err(server_error()));

        assert_eq!(
            card.state(),
            &CardState::Failed {
                option_id: 3,
                message: SUBMIT_ERROR_MESSAGE.to_string(),
            }
        );
        assert!(!card.is_locked());
        assert_eq!(card.feedback(), Some((SUBMIT_ERROR_MESSAGE, false)));

        let retry = card.select(4).unwrap();
        assert_eq!(retry.option_id, 4);
        assert_eq!(card.state(), &CardState::Submitting { option_id: 4 });
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let mut card = card();
        card.complete(3, Ok(verdict(true, "Correct!")));
        assert_eq!(card.state(), &CardState::Idle);

        card.select(4).unwrap();
        card.complete(3, Ok(verdict(true, "Correct!")));
        assert_eq!(card.state(), &CardState::Submitting { option_id: 4 });
    }

    #[test]
    fn test_unknown_option_is_rejected() {
        let mut card = card();
        assert!(card.select(99).is_none());
        assert_eq!(card.state(), &CardState::Idle);
    }

    #[test]
    fn test_cursor_wraps() {
        let mut card = card();
        card.cursor_previous();
        assert_eq!(card.cursor(), 2);
        card.cursor_next();
        assert_eq!(card.cursor(), 0);

        card.cursor_next();
        let request = card.select_at_cursor().unwrap();
        assert_eq!(request.option_id, 4);
    }
}
