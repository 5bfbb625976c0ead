mod task;

pub use task::{AnswerResult, NewOption, OptionUpdate, Task, TaskCreate, TaskOption, TaskUpdate};
