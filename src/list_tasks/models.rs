use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use crate::tasks::models::{Task, TaskResponse};

/// Domain model representing a task list in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ListTask {
    pub id_list_task: i32,
    pub title: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request DTO for creating a task list
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ListTaskRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
}

/// Request DTO for updating a task list; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct ListTaskUpdateRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub description: Option<String>,
}

/// Response DTO for a task list with its tasks embedded
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ListTaskResponse {
    pub id_list_task: i32,
    pub title: String,
    pub description: String,
    pub tasks: Vec<TaskResponse>,
}

impl ListTaskResponse {
    /// Build the response from a list row and its tasks
    pub fn from_parts(list_task: ListTask, tasks: Vec<Task>) -> Self {
        Self {
            id_list_task: list_task.id_list_task,
            title: list_task.title,
            description: list_task.description,
            tasks: tasks.into_iter().map(TaskResponse::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_embeds_empty_task_array() {
        let list = ListTask {
            id_list_task: 1,
            title: "Chores".to_string(),
            description: "Around the house".to_string(),
            created_at: Utc::now(),
            updated_at: None,
        };

        let value = serde_json::to_value(ListTaskResponse::from_parts(list, Vec::new())).unwrap();

        assert_eq!(value["tasks"], serde_json::json!([]));
        assert!(!value.as_object().unwrap().contains_key("created_at"));
    }
}
