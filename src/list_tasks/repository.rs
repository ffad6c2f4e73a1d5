use async_trait::async_trait;
use sqlx::PgPool;

use crate::list_tasks::error::ListTaskError;
use crate::list_tasks::models::{ListTask, ListTaskRequest, ListTaskUpdateRequest};
use crate::tasks::models::Task;
use crate::tasks::repository::TASK_COLUMNS;

const LIST_TASK_COLUMNS: &str = "id_list_task, title, description, created_at, updated_at";

/// Data access contract for task lists
#[async_trait]
pub trait ListTaskRepository: Send + Sync {
    async fn get_list_tasks(&self) -> Result<Vec<ListTask>, ListTaskError>;
    async fn create_list_task(&self, request: &ListTaskRequest) -> Result<ListTask, ListTaskError>;
    async fn update_list_task(
        &self,
        id_list_task: i32,
        request: &ListTaskUpdateRequest,
    ) -> Result<ListTask, ListTaskError>;
    async fn delete_list_task(&self, id_list_task: i32) -> Result<(), ListTaskError>;

    /// Tasks belonging to a list, for embedding in responses.
    /// An empty list is a valid result here.
    async fn get_tasks_for_list(&self, id_list_task: i32) -> Result<Vec<Task>, ListTaskError>;
}

/// PostgreSQL-backed task list repository
#[derive(Clone)]
pub struct PgListTaskRepository {
    pool: PgPool,
}

impl PgListTaskRepository {
    /// Create a new PgListTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ListTaskRepository for PgListTaskRepository {
    async fn get_list_tasks(&self) -> Result<Vec<ListTask>, ListTaskError> {
        let list_tasks = sqlx::query_as::<_, ListTask>(&format!(
            "SELECT {} FROM list_tasks ORDER BY id_list_task",
            LIST_TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        if list_tasks.is_empty() {
            return Err(ListTaskError::NotFound("No list tasks found".to_string()));
        }

        Ok(list_tasks)
    }

    async fn create_list_task(&self, request: &ListTaskRequest) -> Result<ListTask, ListTaskError> {
        let list_task = sqlx::query_as::<_, ListTask>(&format!(
            r#"
            INSERT INTO list_tasks (title, description)
            VALUES ($1, $2)
            RETURNING {}
            "#,
            LIST_TASK_COLUMNS
        ))
        .bind(&request.title)
        .bind(&request.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(list_task)
    }

    async fn update_list_task(
        &self,
        id_list_task: i32,
        request: &ListTaskUpdateRequest,
    ) -> Result<ListTask, ListTaskError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, ListTask>(&format!(
            "SELECT {} FROM list_tasks WHERE id_list_task = $1",
            LIST_TASK_COLUMNS
        ))
        .bind(id_list_task)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            ListTaskError::NotFound(format!("List task with id {} not found", id_list_task))
        })?;

        // Absent fields keep their stored value
        let title = request.title.clone().unwrap_or(existing.title);
        let description = request.description.clone().unwrap_or(existing.description);

        let list_task = sqlx::query_as::<_, ListTask>(&format!(
            r#"
            UPDATE list_tasks
            SET title = $1, description = $2, updated_at = NOW()
            WHERE id_list_task = $3
            RETURNING {}
            "#,
            LIST_TASK_COLUMNS
        ))
        .bind(&title)
        .bind(&description)
        .bind(id_list_task)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(list_task)
    }

    async fn delete_list_task(&self, id_list_task: i32) -> Result<(), ListTaskError> {
        // Tasks under the list go with it via ON DELETE CASCADE
        let result = sqlx::query("DELETE FROM list_tasks WHERE id_list_task = $1")
            .bind(id_list_task)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ListTaskError::NotFound(format!(
                "List task with id {} not found",
                id_list_task
            )));
        }

        Ok(())
    }

    async fn get_tasks_for_list(&self, id_list_task: i32) -> Result<Vec<Task>, ListTaskError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id_list_task = $1 ORDER BY id_task",
            TASK_COLUMNS
        ))
        .bind(id_list_task)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }
}
