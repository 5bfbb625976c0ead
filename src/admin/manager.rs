//! Admin view state: task list, error banner, edit form and two-step delete.

use tracing::{debug, info, warn};

use crate::api::ApiError;
use crate::models::Task;
use crate::view::ViewState;

use super::draft::{TaskCommand, TaskDraft};

pub const LOAD_ERROR_MESSAGE: &str = "Failed to load the task list.";
pub const SAVE_ERROR_MESSAGE: &str = "Failed to save the task.";
pub const DELETE_ERROR_MESSAGE: &str = "Failed to delete the task.";
pub const EMPTY_MESSAGE: &str = "No tasks yet. Add the first one.";

/// Which form input has focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Instruction,
    Option(usize),
}

/// The open create/edit form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskForm {
    draft: TaskDraft,
    focus: FormField,
    submitting: bool,
}

impl TaskForm {
    fn new(draft: TaskDraft) -> Self {
        Self {
            draft,
            focus: FormField::Instruction,
            submitting: false,
        }
    }

    pub fn draft(&self) -> &TaskDraft {
        &self.draft
    }

    pub fn focus(&self) -> FormField {
        self.focus
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn title(&self) -> &'static str {
        if self.draft.editing().is_some() {
            "Edit task"
        } else {
            "New task"
        }
    }

    pub fn focus_next(&mut self) {
        let count = self.draft.options.len();
        self.focus = match self.focus {
            FormField::Instruction if count > 0 => FormField::Option(0),
            FormField::Option(i) if i + 1 < count => FormField::Option(i + 1),
            other => other,
        };
    }

    pub fn focus_previous(&mut self) {
        self.focus = match self.focus {
            FormField::Option(0) | FormField::Instruction => FormField::Instruction,
            FormField::Option(i) => FormField::Option(i - 1),
        };
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::Instruction => Some(&mut self.draft.instruction),
            FormField::Option(i) => self.draft.option_text_mut(i),
        }
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn delete_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Toggle the correctness flag of the focused option row.
    pub fn toggle_focused_correct(&mut self) {
        if let FormField::Option(i) = self.focus {
            self.draft.toggle_option_correct(i);
        }
    }

    /// Append a blank option row and focus it.
    pub fn add_option(&mut self) {
        self.draft.add_option();
        self.focus = FormField::Option(self.draft.options.len() - 1);
    }

    /// Remove the focused option row.
    pub fn remove_focused_option(&mut self) {
        let FormField::Option(i) = self.focus else {
            return;
        };
        self.draft.remove_option(i);

        let count = self.draft.options.len();
        self.focus = if count == 0 {
            FormField::Instruction
        } else {
            FormField::Option(i.min(count - 1))
        };
    }
}

#[derive(Debug, Default)]
pub struct AdminManager {
    tasks: ViewState<Vec<Task>>,
    error: Option<String>,
    form: Option<TaskForm>,
    delete_confirm: Option<u64>,
    deleting: bool,
    selected: usize,
    mounted: bool,
}

impl AdminManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &ViewState<Vec<Task>> {
        &self.tasks
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn form(&self) -> Option<&TaskForm> {
        self.form.as_ref()
    }

    pub fn form_mut(&mut self) -> Option<&mut TaskForm> {
        self.form.as_mut()
    }

    pub fn delete_confirm(&self) -> Option<u64> {
        self.delete_confirm
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_task(&self) -> Option<&Task> {
        self.tasks.loaded()?.get(self.selected)
    }

    /// Returns true the first time only; the caller then loads the list.
    pub fn mount(&mut self) -> bool {
        !std::mem::replace(&mut self.mounted, true)
    }

    /// Called as a load starts: clears any standing error. A list that is
    /// not loaded yet goes back to loading.
    pub fn begin_load(&mut self) {
        self.error = None;
        if !matches!(self.tasks, ViewState::Loaded(_)) {
            self.tasks = ViewState::Loading;
        }
    }

    pub fn finish_load(&mut self, outcome: Result<Vec<Task>, ApiError>) {
        match outcome {
            Ok(tasks) => {
                info!(count = tasks.len(), "Admin task list loaded");
                self.selected = self.selected.min(tasks.len().saturating_sub(1));
                self.tasks = ViewState::Loaded(tasks);
            }
            Err(err) => {
                warn!(error = %err, "Loading admin task list failed");
                self.error = Some(LOAD_ERROR_MESSAGE.to_string());
                if !matches!(self.tasks, ViewState::Loaded(_)) {
                    self.tasks = ViewState::Failed(LOAD_ERROR_MESSAGE.to_string());
                }
            }
        }
    }

    pub fn select_next(&mut self) {
        self.delete_confirm = None;
        if let Some(tasks) = self.tasks.loaded() {
            if !tasks.is_empty() {
                self.selected = (self.selected + 1).min(tasks.len() - 1);
            }
        }
    }

    pub fn select_previous(&mut self) {
        self.delete_confirm = None;
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn open_create(&mut self) {
        self.delete_confirm = None;
        self.form = Some(TaskForm::new(TaskDraft::empty()));
    }

    pub fn open_edit(&mut self, task: &Task) {
        self.delete_confirm = None;
        self.form = Some(TaskForm::new(TaskDraft::from_task(task)));
    }

    pub fn open_edit_selected(&mut self) {
        if let Some(task) = self.selected_task().cloned() {
            self.open_edit(&task);
        }
    }

    /// Discard the draft. Ignored while its save is in flight.
    pub fn close_form(&mut self) {
        if self.form.as_ref().is_some_and(|f| f.submitting) {
            return;
        }
        self.form = None;
    }

    /// Turn the draft into a command. `None` means nothing is sent: no form,
    /// a save already in flight, or a blank instruction.
    pub fn begin_submit(&mut self) -> Option<TaskCommand> {
        let form = self.form.as_mut()?;
        if form.submitting {
            return None;
        }

        match form.draft.to_command() {
            Ok(command) => {
                form.submitting = true;
                Some(command)
            }
            Err(err) => {
                debug!(error = %err, "Draft not submitted");
                None
            }
        }
    }

    /// Apply the save outcome. Returns true when the list should be
    /// reloaded. On failure the form stays open with the draft intact.
    pub fn finish_submit(&mut self, outcome: Result<(), ApiError>) -> bool {
        if let Some(form) = self.form.as_mut() {
            form.submitting = false;
        }

        match outcome {
            Ok(()) => {
                info!("Task saved");
                self.form = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "Saving task failed");
                self.error = Some(SAVE_ERROR_MESSAGE.to_string());
                false
            }
        }
    }

    /// Press delete on `task_id`. The first press arms the row, a second
    /// press on the same row returns the id to delete. Pressing another
    /// row moves the armed state there.
    pub fn request_delete(&mut self, task_id: u64) -> Option<u64> {
        if self.form.is_some() || self.deleting {
            return None;
        }

        if self.delete_confirm == Some(task_id) {
            self.deleting = true;
            return Some(task_id);
        }

        self.delete_confirm = Some(task_id);
        None
    }

    pub fn request_delete_selected(&mut self) -> Option<u64> {
        let id = self.selected_task()?.id;
        self.request_delete(id)
    }

    pub fn cancel_delete(&mut self) {
        self.delete_confirm = None;
    }

    /// Apply the delete outcome. Returns true when the list should be
    /// reloaded.
    pub fn finish_delete(&mut self, outcome: Result<(), ApiError>) -> bool {
        self.deleting = false;

        match outcome {
            Ok(()) => {
                info!(task_id = ?self.delete_confirm, "Task deleted");
                self.delete_confirm = None;
                true
            }
            Err(err) => {
                warn!(error = %err, "Deleting task failed");
                self.error = Some(DELETE_ERROR_MESSAGE.to_string());
                false
            }
        }
    }
}
