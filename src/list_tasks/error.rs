/// Errors surfaced by the task list repository and service
#[derive(Debug, thiserror::Error)]
pub enum ListTaskError {
    /// Lookup found nothing; the message carries the repository wording
    #[error("{0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

impl From<sqlx::Error> for ListTaskError {
    fn from(err: sqlx::Error) -> Self {
        ListTaskError::DatabaseError(err.to_string())
    }
}
