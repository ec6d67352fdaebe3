use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single todo item.
///
/// `id` and `created_at` are assigned by the store on creation and never
/// change; `text` and `completed` are mutable via partial update. Every
/// persisted todo has non-empty `text` (checked at the API boundary).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Input for creating a todo. `completed` always starts false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTodoInput {
    /// Absent field deserializes as empty; the handler's presence check
    /// covers both cases.
    #[serde(default)]
    pub text: String,
}

/// Input for a partial update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTodoInput {
    pub text: Option<String>,
    pub completed: Option<bool>,
}
