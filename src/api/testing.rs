//! In-memory backend used by unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;
use reqwest::StatusCode;

use crate::models::{AnswerResult, Task, TaskCreate, TaskOption, TaskUpdate};

use super::{ApiError, Backend};

/// One recorded backend call.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    FetchToken,
    GetTasks,
    SubmitAnswer {
        task_id: u64,
        option_id: u64,
        token: String,
    },
    AdminGetTasks,
    Create(TaskCreate),
    Update(TaskUpdate),
    Delete(u64),
}

#[derive(Default)]
struct Inner {
    calls: Vec<Call>,
    tasks: Vec<Task>,
    issued_tokens: usize,
    rejected_tokens: HashSet<String>,
    answer: Option<AnswerResult>,
    fail_token: bool,
    fail_tasks: bool,
    fail_submit: bool,
    fail_admin_load: bool,
    fail_mutation: bool,
    next_id: u64,
}

pub struct FakeBackend {
    inner: Mutex<Inner>,
}

fn failure(path: &str) -> ApiError {
    ApiError::Status {
        status: StatusCode::INTERNAL_SERVER_ERROR,
        path: path.to_string(),
    }
}

/// Strip correctness flags the way the end-user endpoint does.
fn public_view(task: &Task) -> Task {
    Task {
        options: task
            .options
            .iter()
            .map(|o| TaskOption {
                is_correct: None,
                ..o.clone()
            })
            .collect(),
        ..task.clone()
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::with_tasks(Vec::new())
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 100;
        Self {
            inner: Mutex::new(Inner {
                tasks,
                next_id,
                ..Inner::default()
            }),
        }
    }

    fn with<R>(&self, f: impl FnOnce(&mut Inner) -> R) -> R {
        f(&mut self.inner.lock().unwrap())
    }

    pub fn calls(&self) -> Vec<Call> {
        self.with(|s| s.calls.clone())
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.with(|s| s.calls.iter().filter(|c| pred(c)).count())
    }

    pub fn tasks(&self) -> Vec<Task> {
        self.with(|s| s.tasks.clone())
    }

    pub fn set_answer(&self, result: AnswerResult) {
        self.with(|s| s.answer = Some(result));
    }

    pub fn reject_token(&self, token: &str) {
        self.with(|s| {
            s.rejected_tokens.insert(token.to_string());
        });
    }

    pub fn set_fail_token(&self, fail: bool) {
        self.with(|s| s.fail_token = fail);
    }

    pub fn set_fail_tasks(&self, fail: bool) {
        self.with(|s| s.fail_tasks = fail);
    }

    pub fn set_fail_submit(&self, fail: bool) {
        self.with(|s| s.fail_submit = fail);
    }

    pub fn set_fail_admin_load(&self, fail: bool) {
        self.with(|s| s.fail_admin_load = fail);
    }

    pub fn set_fail_mutation(&self, fail: bool) {
        self.with(|s| s.fail_mutation = fail);
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn fetch_session_token(&self) -> Result<String, ApiError> {
        self.with(|s| {
            s.calls.push(Call::FetchToken);
            if s.fail_token {
                return Err(failure("/session/token"));
            }
            s.issued_tokens += 1;
            Ok(format!("token-{}", s.issued_tokens))
        })
    }

    async fn get_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.with(|s| {
            s.calls.push(Call::GetTasks);
            if s.fail_tasks {
                return Err(failure("/tasks"));
            }
            Ok(s.tasks.iter().map(public_view).collect())
        })
    }

    async fn submit_answer(
        &self,
        task_id: u64,
        option_id: u64,
        token: &str,
    ) -> Result<AnswerResult, ApiError> {
        self.with(|s| {
            s.calls.push(Call::SubmitAnswer {
                task_id,
                option_id,
                token: token.to_string(),
            });
            let path = format!("/tasks/{}/answer", task_id);
            if s.rejected_tokens.contains(token) {
                return Err(ApiError::Status {
                    status: StatusCode::UNAUTHORIZED,
                    path,
                });
            }
            if s.fail_submit {
                return Err(failure(&path));
            }
            if let Some(answer) = &s.answer {
                return Ok(answer.clone());
            }
            let is_correct = s
                .tasks
                .iter()
                .find(|t| t.id == task_id)
                .and_then(|t| t.options.iter().find(|o| o.id == option_id))
                .and_then(|o| o.is_correct)
                .unwrap_or(false);
            Ok(AnswerResult {
                is_correct,
                message: if is_correct { "Correct!" } else { "Wrong." }.to_string(),
            })
        })
    }

    async fn admin_get_tasks(&self) -> Result<Vec<Task>, ApiError> {
        self.with(|s| {
            s.calls.push(Call::AdminGetTasks);
            if s.fail_admin_load {
                return Err(failure("/admin/tasks"));
            }
            Ok(s.tasks.clone())
        })
    }

    async fn admin_create_task(&self, task: &TaskCreate) -> Result<Task, ApiError> {
        self.with(|s| {
            s.calls.push(Call::Create(task.clone()));
            if s.fail_mutation {
                return Err(failure("/admin/tasks"));
            }
            let id = s.next_id;
            s.next_id += 1;
            let options = task
                .options
                .iter()
                .enumerate()
                .map(|(i, o)| TaskOption {
                    id: id * 10 + i as u64,
                    text: o.text.clone(),
                    is_correct: Some(o.is_correct),
                })
                .collect();
            let created = Task {
                id,
                instruction: task.instruction.clone(),
                options,
            };
            s.tasks.push(created.clone());
            Ok(created)
        })
    }

    async fn admin_update_task(&self, task: &TaskUpdate) -> Result<Task, ApiError> {
        self.with(|s| {
            s.calls.push(Call::Update(task.clone()));
            let path = format!("/admin/tasks/{}", task.id);
            if s.fail_mutation {
                return Err(failure(&path));
            }
            let mut next_option = s.next_id * 10;
            let updated = Task {
                id: task.id,
                instruction: task.instruction.clone(),
                options: task
                    .options
                    .iter()
                    .map(|o| TaskOption {
                        id: o.id.unwrap_or_else(|| {
                            next_option += 1;
                            next_option
                        }),
                        text: o.text.clone(),
                        is_correct: Some(o.is_correct),
                    })
                    .collect(),
            };
            let Some(slot) = s.tasks.iter_mut().find(|t| t.id == task.id) else {
                return Err(ApiError::Status {
                    status: StatusCode::NOT_FOUND,
                    path,
                });
            };
            *slot = updated.clone();
            Ok(updated)
        })
    }

    async fn admin_delete_task(&self, task_id: u64) -> Result<(), ApiError> {
        self.with(|s| {
            s.calls.push(Call::Delete(task_id));
            if s.fail_mutation {
                return Err(failure(&format!("/admin/tasks/{}", task_id)));
            }
            s.tasks.retain(|t| t.id != task_id);
            Ok(())
        })
    }
}

/// A task whose options are `(id, text, is_correct)`.
pub fn task(id: u64, instruction: &str, options: &[(u64, &str, bool)]) -> Task {
    Task {
        id,
        instruction: instruction.to_string(),
        options: options
            .iter()
            .map(|(oid, text, correct)| TaskOption {
                id: *oid,
                text: text.to_string(),
                is_correct: Some(*correct),
            })
            .collect(),
    }
}
