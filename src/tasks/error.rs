use crate::notifications::NotificationError;

/// Errors surfaced by the task repository and service
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Lookup found nothing; the message carries the repository wording
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Notification error: {0}")]
    NotificationError(String),
}

impl From<sqlx::Error> for TaskError {
    fn from(err: sqlx::Error) -> Self {
        TaskError::DatabaseError(err.to_string())
    }
}

impl From<NotificationError> for TaskError {
    fn from(err: NotificationError) -> Self {
        TaskError::NotificationError(err.to_string())
    }
}
