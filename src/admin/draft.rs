//! Editable draft of a task, converted to a create or update command only
//! when it is submitted.

use thiserror::Error;

use crate::models::{NewOption, OptionUpdate, Task, TaskCreate, TaskUpdate};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DraftError {
    #[error("instruction is empty")]
    EmptyInstruction,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftOption {
    /// Id of the persisted option this row edits, if any.
    pub id: Option<u64>,
    pub text: String,
    pub is_correct: bool,
}

impl DraftOption {
    fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// What a submitted draft asks the backend to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskCommand {
    Create(TaskCreate),
    Update(TaskUpdate),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    editing: Option<u64>,
    pub instruction: String,
    pub options: Vec<DraftOption>,
}

impl TaskDraft {
    /// A blank draft with one empty option row.
    pub fn empty() -> Self {
        Self {
            editing: None,
            instruction: String::new(),
            options: vec![DraftOption::default()],
        }
    }

    /// A draft pre-populated from a persisted task.
    pub fn from_task(task: &Task) -> Self {
        let mut options: Vec<DraftOption> = task
            .options
            .iter()
            .map(|o| DraftOption {
                id: Some(o.id),
                text: o.text.clone(),
                is_correct: o.is_correct.unwrap_or(false),
            })
            .collect();

        if options.is_empty() {
            options.push(DraftOption::default());
        }

        Self {
            editing: Some(task.id),
            instruction: task.instruction.clone(),
            options,
        }
    }

    /// Id of the task being edited, `None` for a new task.
    pub fn editing(&self) -> Option<u64> {
        self.editing
    }

    pub fn add_option(&mut self) {
        self.options.push(DraftOption::default());
    }

    pub fn remove_option(&mut self, index: usize) {
        if index < self.options.len() {
            self.options.remove(index);
        }
    }

    pub fn option_text_mut(&mut self, index: usize) -> Option<&mut String> {
        self.options.get_mut(index).map(|o| &mut o.text)
    }

    pub fn toggle_option_correct(&mut self, index: usize) {
        if let Some(option) = self.options.get_mut(index) {
            option.is_correct = !option.is_correct;
        }
    }

    /// Build the command to send.
    ///
    /// The instruction is trimmed and must not be empty. Option rows whose
    /// trimmed text is empty are dropped; the rest are kept as entered.
    pub fn to_command(&self) -> Result<TaskCommand, DraftError> {
        let instruction = self.instruction.trim();
        if instruction.is_empty() {
            return Err(DraftError::EmptyInstruction);
        }

        let filled = self.options.iter().filter(|o| !o.is_blank());

        let command = match self.editing {
            Some(id) => TaskCommand::Update(TaskUpdate {
                id,
                instruction: instruction.to_string(),
                options: filled
                    .map(|o| OptionUpdate {
                        id: o.id,
                        text: o.text.clone(),
                        is_correct: o.is_correct,
                    })
                    .collect(),
            }),
            None => TaskCommand::Create(TaskCreate {
                instruction: instruction.to_string(),
                options: filled
                    .map(|o| NewOption {
                        text: o.text.clone(),
                        is_correct: o.is_correct,
                    })
                    .collect(),
            }),
        };

        Ok(command)
    }
}
