use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// A task entity as stored in the database.
///
/// The owner id is kept out of response bodies; clients only ever see their
/// own tasks, so repeating it is noise.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub completed: bool,
    #[serde(skip_serializing)]
    pub user_id: Uuid,
}

/// Input for creating a task. New tasks start uncompleted.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 3))]
    pub title: String,
}

/// Input for updating a task. Both fields are optional; absent fields keep
/// their stored values.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub completed: Option<bool>,
}
