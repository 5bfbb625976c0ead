use serde::{Deserialize, Deserializer, Serialize};

/// A single worksheet task with its ordered answer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: u64,
    pub instruction: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub options: Vec<TaskOption>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<TaskOption>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<TaskOption>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One selectable answer.
///
/// `is_correct` is only sent by the admin endpoints; the end-user read
/// leaves it out so the answer cannot be seen before submitting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskOption {
    pub id: u64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_correct: Option<bool>,
}

/// Backend verdict for one submitted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerResult {
    pub is_correct: bool,
    pub message: String,
}

/// Body of `POST /admin/tasks`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCreate {
    pub instruction: String,
    pub options: Vec<NewOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOption {
    pub text: String,
    pub is_correct: bool,
}

/// Body of `PUT /admin/tasks/:id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskUpdate {
    pub id: u64,
    pub instruction: String,
    pub options: Vec<OptionUpdate>,
}

/// An option in an update payload. A present `id` updates that option,
/// an absent one asks the backend to create it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OptionUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    pub text: String,
    pub is_correct: bool,
}
