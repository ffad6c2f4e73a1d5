use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Task status enum
///
/// Stored and serialized as the display strings, `"In Progress"` with
/// the space included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text")]
pub enum TaskStatus {
    #[serde(rename = "Pending")]
    #[sqlx(rename = "Pending")]
    Pending,
    #[serde(rename = "In Progress")]
    #[sqlx(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    #[sqlx(rename = "Completed")]
    Completed,
}

impl TaskStatus {
    /// Convert status to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "Pending",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Completed => "Completed",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task priority enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text")]
pub enum TaskPriority {
    #[serde(rename = "Low")]
    #[sqlx(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    #[sqlx(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    #[sqlx(rename = "High")]
    High,
}

impl TaskPriority {
    /// Convert priority to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "Low",
            TaskPriority::Medium => "Medium",
            TaskPriority::High => "High",
        }
    }
}

impl std::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Task completeness enum, serialized as percentage strings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "text")]
pub enum TaskCompleteness {
    #[serde(rename = "0%")]
    #[sqlx(rename = "0%")]
    NotStarted,
    #[serde(rename = "50%")]
    #[sqlx(rename = "50%")]
    InProgress,
    #[serde(rename = "100%")]
    #[sqlx(rename = "100%")]
    Completed,
}

impl TaskCompleteness {
    /// Convert completeness to its wire string
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskCompleteness::NotStarted => "0%",
            TaskCompleteness::InProgress => "50%",
            TaskCompleteness::Completed => "100%",
        }
    }
}

impl Default for TaskCompleteness {
    fn default() -> Self {
        TaskCompleteness::NotStarted
    }
}

impl std::fmt::Display for TaskCompleteness {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Domain model representing a task in the database
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Task {
    pub id_task: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completeness: TaskCompleteness,
    pub id_user: Option<i32>,
    pub id_list_task: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Request DTO for creating a task
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct TaskRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,
    #[validate(length(min = 1, max = 255))]
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completeness: TaskCompleteness,
    pub id_list_task: i32,
}

/// Request DTO for updating a task; absent fields keep their stored value
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct TaskUpdateRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 255))]
    pub description: Option<String>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub completeness: Option<TaskCompleteness>,
    pub id_list_task: Option<i32>,
}

/// Request DTO for updating only the status of a task
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TaskUpdateStatusRequest {
    pub status: TaskStatus,
}

/// Request DTO for reassigning a task to another user
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TaskUpdateIdUserRequest {
    pub id_user: i32,
}

/// Filter DTO for tasks within a list; present fields are ANDed together
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct TaskFilterRequest {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub completeness: Option<TaskCompleteness>,
}

impl std::fmt::Display for TaskFilterRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "status={} priority={} completeness={}",
            self.status.map(|s| s.as_str()).unwrap_or("None"),
            self.priority.map(|p| p.as_str()).unwrap_or("None"),
            self.completeness.map(|c| c.as_str()).unwrap_or("None"),
        )
    }
}

/// Response DTO for a task
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TaskResponse {
    pub id_task: i32,
    pub title: String,
    pub description: String,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub completeness: TaskCompleteness,
    pub id_list_task: i32,
    pub id_user: Option<i32>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id_task: task.id_task,
            title: task.title,
            description: task.description,
            status: task.status,
            priority: task.priority,
            completeness: task.completeness,
            id_list_task: task.id_list_task,
            id_user: task.id_user,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_strings() {
        assert_eq!(
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"In Progress\""
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"Pending\"").unwrap(),
            TaskStatus::Pending
        );
        assert_eq!(
            serde_json::from_str::<TaskStatus>("\"In Progress\"").unwrap(),
            TaskStatus::InProgress
        );
        assert!(serde_json::from_str::<TaskStatus>("\"in progress\"").is_err());
        assert!(serde_json::from_str::<TaskStatus>("\"InProgress\"").is_err());
    }

    #[test]
    fn test_priority_wire_strings() {
        assert_eq!(serde_json::to_string(&TaskPriority::High).unwrap(), "\"High\"");
        assert_eq!(
            serde_json::from_str::<TaskPriority>("\"Medium\"").unwrap(),
            TaskPriority::Medium
        );
        assert!(serde_json::from_str::<TaskPriority>("\"urgent\"").is_err());
    }

    #[test]
    fn test_completeness_wire_strings() {
        assert_eq!(
            serde_json::to_string(&TaskCompleteness::NotStarted).unwrap(),
            "\"0%\""
        );
        assert_eq!(
            serde_json::from_str::<TaskCompleteness>("\"50%\"").unwrap(),
            TaskCompleteness::InProgress
        );
        assert_eq!(
            serde_json::from_str::<TaskCompleteness>("\"100%\"").unwrap(),
            TaskCompleteness::Completed
        );
        assert!(serde_json::from_str::<TaskCompleteness>("\"75%\"").is_err());
    }

    #[test]
    fn test_filter_display_shows_missing_fields_as_none() {
        let filter = TaskFilterRequest {
            status: Some(TaskStatus::Pending),
            priority: None,
            completeness: None,
        };

        assert_eq!(
            filter.to_string(),
            "status=Pending priority=None completeness=None"
        );
    }

    #[test]
    fn test_update_request_fields_are_all_optional() {
        let empty: TaskUpdateRequest = serde_json::from_str("{}").unwrap();

        assert!(empty.title.is_none());
        assert!(empty.description.is_none());
        assert!(empty.status.is_none());
        assert!(empty.priority.is_none());
        assert!(empty.completeness.is_none());
        assert!(empty.id_list_task.is_none());
    }

    #[test]
    fn test_update_request_treats_explicit_null_as_absent() {
        // An explicit null skips the field just like leaving it out,
        // so no update can clear a stored value
        let request: TaskUpdateRequest =
            serde_json::from_str(r#"{"title": null, "status": null}"#).unwrap();

        assert!(request.title.is_none());
        assert!(request.status.is_none());
    }

    #[test]
    fn test_response_excludes_timestamps() {
        let task = Task {
            id_task: 7,
            title: "Write report".to_string(),
            description: "Quarterly numbers".to_string(),
            status: TaskStatus::Pending,
            priority: TaskPriority::High,
            completeness: TaskCompleteness::NotStarted,
            id_user: None,
            id_list_task: 3,
            created_at: chrono::Utc::now(),
            updated_at: None,
        };

        let value = serde_json::to_value(TaskResponse::from(task)).unwrap();
        let obj = value.as_object().unwrap();

        assert!(obj.contains_key("id_task"));
        assert!(obj.contains_key("id_user"));
        assert!(!obj.contains_key("created_at"));
        assert!(!obj.contains_key("updated_at"));
        assert_eq!(value["status"], serde_json::json!("Pending"));
        assert_eq!(value["id_user"], serde_json::json!(null));
    }
}
