// Task service - business logic layer

use std::sync::Arc;
use tracing::{info, warn};

use crate::notifications::Notifier;
use crate::tasks::error::TaskError;
use crate::tasks::models::{Task, TaskFilterRequest, TaskRequest, TaskStatus, TaskUpdateRequest};
use crate::tasks::repository::TaskRepository;

/// Task service coordinating the repository and the notifier
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
    notifier: Arc<dyn Notifier>,
}

impl TaskService {
    /// Create a new TaskService
    pub fn new(repository: Arc<dyn TaskRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            repository,
            notifier,
        }
    }

    pub async fn get_tasks(&self) -> Result<Vec<Task>, TaskError> {
        self.repository.get_tasks().await
    }

    pub async fn create_task(&self, request: &TaskRequest) -> Result<Task, TaskError> {
        let task = self.repository.create_task(request).await?;
        info!("Created task {} in list {}", task.id_task, task.id_list_task);
        Ok(task)
    }

    pub async fn update_task(
        &self,
        id_task: i32,
        request: &TaskUpdateRequest,
    ) -> Result<Task, TaskError> {
        let task = self.repository.update_task(id_task, request).await?;
        info!("Updated task {}", task.id_task);
        Ok(task)
    }

    pub async fn delete_task(&self, id_task: i32) -> Result<(), TaskError> {
        self.repository.delete_task(id_task).await?;
        info!("Deleted task {}", id_task);
        Ok(())
    }

    pub async fn get_task_by_id(&self, id_task: i32) -> Result<Task, TaskError> {
        self.repository.get_task_by_id(id_task).await
    }

    pub async fn get_tasks_by_user_id(&self, id_user: i32) -> Result<Vec<Task>, TaskError> {
        self.repository.get_tasks_by_user_id(id_user).await
    }

    pub async fn get_tasks_by_list_task_id(
        &self,
        id_list_task: i32,
    ) -> Result<Vec<Task>, TaskError> {
        self.repository.get_tasks_by_list_task_id(id_list_task).await
    }

    pub async fn get_filtered_tasks_by_list_task_id(
        &self,
        id_list_task: i32,
        filter: &TaskFilterRequest,
    ) -> Result<Vec<Task>, TaskError> {
        self.repository
            .get_filtered_tasks_by_list_task_id(id_list_task, filter)
            .await
    }

    pub async fn update_task_status(
        &self,
        id_task: i32,
        status: TaskStatus,
    ) -> Result<Task, TaskError> {
        let task = self.repository.update_task_status(id_task, status).await?;
        info!("Updated status of task {} to {}", id_task, task.status);
        Ok(task)
    }

    /// Reassign a task and notify the new assignee by email
    ///
    /// 1. Persist the new assignee on the task
    /// 2. Email the assignee about the task
    ///
    /// The write is not rolled back when the email fails; the caller
    /// sees the notification error while the assignment stays in place.
    pub async fn update_task_id_user(
        &self,
        id_task: i32,
        id_user: i32,
        recipient_email: &str,
    ) -> Result<Task, TaskError> {
        let task = self.repository.update_task_id_user(id_task, id_user).await?;
        info!("Reassigned task {} to user {}", id_task, id_user);

        let html = format!(
            "The task {} has been assigned to you, please check it out.",
            task.title
        );
        if let Err(e) = self
            .notifier
            .send_email(recipient_email, "Task updated", &html)
            .await
        {
            warn!("Task {} was reassigned but the notification failed: {}", id_task, e);
            return Err(TaskError::from(e));
        }

        Ok(task)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{InMemoryStore, MockTaskRepository, RecordingNotifier};

    fn test_service() -> (TaskService, Arc<InMemoryStore>, Arc<RecordingNotifier>) {
        let store = InMemoryStore::new();
        let notifier = Arc::new(RecordingNotifier::new());
        let service = TaskService::new(
            Arc::new(MockTaskRepository::new(store.clone())),
            notifier.clone(),
        );
        (service, store, notifier)
    }

    #[tokio::test]
    async fn test_get_tasks_on_empty_store_is_not_found() {
        let (service, _, _) = test_service();

        let err = service.get_tasks().await.unwrap_err();
        assert_eq!(err.to_string(), "No tasks found");
    }

    #[tokio::test]
    async fn test_update_merges_only_present_fields() {
        let (service, store, _) = test_service();
        let list = store.seed_list("Chores");
        let task = store.seed_task(list.id_list_task, "Mow the lawn");

        let request = TaskUpdateRequest {
            title: Some("Mow the back lawn".to_string()),
            ..Default::default()
        };
        let updated = service.update_task(task.id_task, &request).await.unwrap();

        assert_eq!(updated.title, "Mow the back lawn");
        assert_eq!(updated.description, task.description);
        assert_eq!(updated.status, task.status);
        assert_eq!(updated.priority, task.priority);
        assert_eq!(updated.completeness, task.completeness);
        assert_eq!(updated.id_list_task, task.id_list_task);
    }

    #[tokio::test]
    async fn test_delete_missing_task_reports_the_id() {
        let (service, _, _) = test_service();

        let err = service.delete_task(999).await.unwrap_err();
        assert_eq!(err.to_string(), "Task with id 999 not found");
    }

    #[tokio::test]
    async fn test_filtered_lookup_error_names_the_filters() {
        let (service, store, _) = test_service();
        let list = store.seed_list("Chores");

        let filter = TaskFilterRequest {
            status: Some(TaskStatus::Completed),
            ..Default::default()
        };
        let err = service
            .get_filtered_tasks_by_list_task_id(list.id_list_task, &filter)
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "No tasks found for task list with id {} with the filters: status=Completed priority=None completeness=None",
                list.id_list_task
            )
        );
    }

    #[tokio::test]
    async fn test_reassignment_emails_the_new_assignee() {
        let (service, store, notifier) = test_service();
        let user = store.seed_user("assignee@example.com");
        let list = store.seed_list("Chores");
        let task = store.seed_task(list.id_list_task, "Water the plants");

        service
            .update_task_id_user(task.id_task, user.id_user, &user.email)
            .await
            .unwrap();

        let sent = notifier.sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        let (to, subject, html) = &sent[0];
        assert_eq!(to, "assignee@example.com");
        assert_eq!(subject, "Task updated");
        assert_eq!(
            html,
            "The task Water the plants has been assigned to you, please check it out."
        );
    }

    #[tokio::test]
    async fn test_reassignment_failure_keeps_the_write() {
        let (service, store, notifier) = test_service();
        let user = store.seed_user("assignee@example.com");
        let list = store.seed_list("Chores");
        let task = store.seed_task(list.id_list_task, "Water the plants");

        notifier.fail_next();
        let err = service
            .update_task_id_user(task.id_task, user.id_user, &user.email)
            .await
            .unwrap_err();

        assert!(matches!(err, TaskError::NotificationError(_)));

        // The assignment was persisted before the email failed
        let stored = store.tasks.lock().unwrap();
        let stored_task = stored.iter().find(|t| t.id_task == task.id_task).unwrap();
        assert_eq!(stored_task.id_user, Some(user.id_user));
    }

    #[tokio::test]
    async fn test_status_update_touches_only_the_status() {
        let (service, store, _) = test_service();
        let list = store.seed_list("Chores");
        let task = store.seed_task(list.id_list_task, "Water the plants");

        let updated = service
            .update_task_status(task.id_task, TaskStatus::Completed)
            .await
            .unwrap();

        assert_eq!(updated.status, TaskStatus::Completed);
        assert_eq!(updated.title, task.title);
        assert_eq!(updated.completeness, task.completeness);
    }
}
