use async_trait::async_trait;
use sqlx::PgPool;

use crate::tasks::error::TaskError;
use crate::tasks::models::{
    Task, TaskFilterRequest, TaskRequest, TaskStatus, TaskUpdateRequest,
};

pub(crate) const TASK_COLUMNS: &str =
    "id_task, title, description, status, priority, completeness, id_user, id_list_task, created_at, updated_at";

/// Data access contract for tasks
///
/// Lookups that come back empty are errors here, not empty collections;
/// the messages below are part of the API surface.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn get_tasks(&self) -> Result<Vec<Task>, TaskError>;
    async fn create_task(&self, request: &TaskRequest) -> Result<Task, TaskError>;
    async fn update_task(
        &self,
        id_task: i32,
        request: &TaskUpdateRequest,
    ) -> Result<Task, TaskError>;
    async fn delete_task(&self, id_task: i32) -> Result<(), TaskError>;
    async fn get_task_by_id(&self, id_task: i32) -> Result<Task, TaskError>;
    async fn get_tasks_by_user_id(&self, id_user: i32) -> Result<Vec<Task>, TaskError>;
    async fn get_tasks_by_list_task_id(&self, id_list_task: i32) -> Result<Vec<Task>, TaskError>;
    async fn get_filtered_tasks_by_list_task_id(
        &self,
        id_list_task: i32,
        filter: &TaskFilterRequest,
    ) -> Result<Vec<Task>, TaskError>;
    async fn update_task_status(
        &self,
        id_task: i32,
        status: TaskStatus,
    ) -> Result<Task, TaskError>;
    async fn update_task_id_user(&self, id_task: i32, id_user: i32) -> Result<Task, TaskError>;
}

/// PostgreSQL-backed task repository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn get_tasks(&self) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks ORDER BY id_task",
            TASK_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        if tasks.is_empty() {
            return Err(TaskError::NotFound("No tasks found".to_string()));
        }

        Ok(tasks)
    }

    async fn create_task(&self, request: &TaskRequest) -> Result<Task, TaskError> {
        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            INSERT INTO tasks (title, description, status, priority, completeness, id_list_task)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&request.title)
        .bind(&request.description)
        .bind(request.status)
        .bind(request.priority)
        .bind(request.completeness)
        .bind(request.id_list_task)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // A broken list reference surfaces as a foreign key violation
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return TaskError::NotFound(format!(
                        "List task with id {} not found",
                        request.id_list_task
                    ));
                }
            }
            TaskError::DatabaseError(e.to_string())
        })?;

        Ok(task)
    }

    async fn update_task(
        &self,
        id_task: i32,
        request: &TaskUpdateRequest,
    ) -> Result<Task, TaskError> {
        let mut tx = self.pool.begin().await?;

        let existing = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id_task = $1",
            TASK_COLUMNS
        ))
        .bind(id_task)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| TaskError::NotFound(format!("Task with id {} not found", id_task)))?;

        // Absent fields keep their stored value
        let title = request.title.clone().unwrap_or(existing.title);
        let description = request.description.clone().unwrap_or(existing.description);
        let status = request.status.unwrap_or(existing.status);
        let priority = request.priority.unwrap_or(existing.priority);
        let completeness = request.completeness.unwrap_or(existing.completeness);
        let id_list_task = request.id_list_task.unwrap_or(existing.id_list_task);

        let task = sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET title = $1, description = $2, status = $3, priority = $4,
                completeness = $5, id_list_task = $6, updated_at = NOW()
            WHERE id_task = $7
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(&title)
        .bind(&description)
        .bind(status)
        .bind(priority)
        .bind(completeness)
        .bind(id_list_task)
        .bind(id_task)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return TaskError::NotFound(format!(
                        "List task with id {} not found",
                        id_list_task
                    ));
                }
            }
            TaskError::DatabaseError(e.to_string())
        })?;

        tx.commit().await?;

        Ok(task)
    }

    async fn delete_task(&self, id_task: i32) -> Result<(), TaskError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id_task = $1")
            .bind(id_task)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskError::NotFound(format!(
                "Task with id {} not found",
                id_task
            )));
        }

        Ok(())
    }

    async fn get_task_by_id(&self, id_task: i32) -> Result<Task, TaskError> {
        sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id_task = $1",
            TASK_COLUMNS
        ))
        .bind(id_task)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TaskError::NotFound(format!("Task with id {} not found", id_task)))
    }

    async fn get_tasks_by_user_id(&self, id_user: i32) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id_user = $1 ORDER BY id_task",
            TASK_COLUMNS
        ))
        .bind(id_user)
        .fetch_all(&self.pool)
        .await?;

        if tasks.is_empty() {
            return Err(TaskError::NotFound(format!(
                "No tasks found for user with id {}",
                id_user
            )));
        }

        Ok(tasks)
    }

    async fn get_tasks_by_list_task_id(&self, id_list_task: i32) -> Result<Vec<Task>, TaskError> {
        let tasks = sqlx::query_as::<_, Task>(&format!(
            "SELECT {} FROM tasks WHERE id_list_task = $1 ORDER BY id_task",
            TASK_COLUMNS
        ))
        .bind(id_list_task)
        .fetch_all(&self.pool)
        .await?;

        if tasks.is_empty() {
            return Err(TaskError::NotFound(format!(
                "No tasks found for task list with id {}",
                id_list_task
            )));
        }

        Ok(tasks)
    }

    async fn get_filtered_tasks_by_list_task_id(
        &self,
        id_list_task: i32,
        filter: &TaskFilterRequest,
    ) -> Result<Vec<Task>, TaskError> {
        // Build the WHERE clause from the filters that are present
        let mut sql = format!(
            "SELECT {} FROM tasks WHERE id_list_task = $1",
            TASK_COLUMNS
        );
        let mut params: Vec<&'static str> = Vec::new();

        if let Some(status) = filter.status {
            params.push(status.as_str());
            sql.push_str(&format!(" AND status = ${}", params.len() + 1));
        }
        if let Some(priority) = filter.priority {
            params.push(priority.as_str());
            sql.push_str(&format!(" AND priority = ${}", params.len() + 1));
        }
        if let Some(completeness) = filter.completeness {
            params.push(completeness.as_str());
            sql.push_str(&format!(" AND completeness = ${}", params.len() + 1));
        }
        sql.push_str(" ORDER BY id_task");

        let mut query = sqlx::query_as::<_, Task>(&sql).bind(id_list_task);
        for param in params {
            query = query.bind(param);
        }

        let tasks = query.fetch_all(&self.pool).await?;

        if tasks.is_empty() {
            return Err(TaskError::NotFound(format!(
                "No tasks found for task list with id {} with the filters: {}",
                id_list_task, filter
            )));
        }

        Ok(tasks)
    }

    async fn update_task_status(
        &self,
        id_task: i32,
        status: TaskStatus,
    ) -> Result<Task, TaskError> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET status = $1, updated_at = NOW()
            WHERE id_task = $2
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(status)
        .bind(id_task)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| TaskError::NotFound(format!("Task with id {} not found", id_task)))
    }

    async fn update_task_id_user(&self, id_task: i32, id_user: i32) -> Result<Task, TaskError> {
        sqlx::query_as::<_, Task>(&format!(
            r#"
            UPDATE tasks
            SET id_user = $1, updated_at = NOW()
            WHERE id_task = $2
            RETURNING {}
            "#,
            TASK_COLUMNS
        ))
        .bind(id_user)
        .bind(id_task)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_foreign_key_violation() {
                    return TaskError::NotFound(format!("User with id {} not found", id_user));
                }
            }
            TaskError::DatabaseError(e.to_string())
        })?
        .ok_or_else(|| TaskError::NotFound(format!("Task with id {} not found", id_task)))
    }
}
