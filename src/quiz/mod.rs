//! End-user view: the task list and its per-card answer state machines.

mod card;
mod list;

pub use card::{CardState, OptionMark, SubmitRequest, TaskCard, SUBMIT_ERROR_MESSAGE};
pub use list::{fetch_tasks, TaskList, EMPTY_MESSAGE, LOAD_ERROR_MESSAGE};
