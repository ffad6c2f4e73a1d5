// Task list service - business logic layer

use std::sync::Arc;
use tracing::info;

use crate::list_tasks::error::ListTaskError;
use crate::list_tasks::models::{ListTaskRequest, ListTaskResponse, ListTaskUpdateRequest};
use crate::list_tasks::repository::ListTaskRepository;

/// Task list service; responses embed the tasks of each list
#[derive(Clone)]
pub struct ListTaskService {
    repository: Arc<dyn ListTaskRepository>,
}

impl ListTaskService {
    /// Create a new ListTaskService
    pub fn new(repository: Arc<dyn ListTaskRepository>) -> Self {
        Self { repository }
    }

    /// Every task list with its tasks embedded
    ///
    /// A list with no tasks embeds an empty array; only a store with no
    /// lists at all is an error.
    pub async fn get_list_tasks(&self) -> Result<Vec<ListTaskResponse>, ListTaskError> {
        let list_tasks = self.repository.get_list_tasks().await?;

        let mut responses = Vec::with_capacity(list_tasks.len());
        for list_task in list_tasks {
            let tasks = self
                .repository
                .get_tasks_for_list(list_task.id_list_task)
                .await?;
            responses.push(ListTaskResponse::from_parts(list_task, tasks));
        }

        Ok(responses)
    }

    pub async fn create_list_task(
        &self,
        request: &ListTaskRequest,
    ) -> Result<ListTaskResponse, ListTaskError> {
        let list_task = self.repository.create_list_task(request).await?;
        info!("Created task list {}", list_task.id_list_task);

        Ok(ListTaskResponse::from_parts(list_task, Vec::new()))
    }

    pub async fn update_list_task(
        &self,
        id_list_task: i32,
        request: &ListTaskUpdateRequest,
    ) -> Result<ListTaskResponse, ListTaskError> {
        let list_task = self
            .repository
            .update_list_task(id_list_task, request)
            .await?;
        info!("Updated task list {}", id_list_task);

        let tasks = self.repository.get_tasks_for_list(id_list_task).await?;
        Ok(ListTaskResponse::from_parts(list_task, tasks))
    }

    pub async fn delete_list_task(&self, id_list_task: i32) -> Result<(), ListTaskError> {
        self.repository.delete_list_task(id_list_task).await?;
        info!("Deleted task list {}", id_list_task);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{InMemoryStore, MockListTaskRepository};

    fn test_service() -> (ListTaskService, Arc<InMemoryStore>) {
        let store = InMemoryStore::new();
        let service = ListTaskService::new(Arc::new(MockListTaskRepository::new(store.clone())));
        (service, store)
    }

    #[tokio::test]
    async fn test_get_list_tasks_on_empty_store_is_not_found() {
        let (service, _) = test_service();

        let err = service.get_list_tasks().await.unwrap_err();
        assert_eq!(err.to_string(), "No list tasks found");
    }

    #[tokio::test]
    async fn test_lists_embed_their_tasks() {
        let (service, store) = test_service();
        let with_tasks = store.seed_list("Chores");
        let empty = store.seed_list("Someday");
        store.seed_task(with_tasks.id_list_task, "Mow the lawn");
        store.seed_task(with_tasks.id_list_task, "Do the dishes");

        let responses = service.get_list_tasks().await.unwrap();

        assert_eq!(responses.len(), 2);
        let chores = responses
            .iter()
            .find(|r| r.id_list_task == with_tasks.id_list_task)
            .unwrap();
        let someday = responses
            .iter()
            .find(|r| r.id_list_task == empty.id_list_task)
            .unwrap();
        assert_eq!(chores.tasks.len(), 2);
        assert!(someday.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_create_returns_empty_tasks() {
        let (service, _) = test_service();

        let request = ListTaskRequest {
            title: "Groceries".to_string(),
            description: "Weekly shop".to_string(),
        };
        let response = service.create_list_task(&request).await.unwrap();

        assert_eq!(response.title, "Groceries");
        assert!(response.tasks.is_empty());
    }

    #[tokio::test]
    async fn test_update_merges_only_present_fields() {
        let (service, store) = test_service();
        let list = store.seed_list("Chores");

        let request = ListTaskUpdateRequest {
            description: Some("Weekend chores".to_string()),
            ..Default::default()
        };
        let response = service
            .update_list_task(list.id_list_task, &request)
            .await
            .unwrap();

        assert_eq!(response.title, list.title);
        assert_eq!(response.description, "Weekend chores");
    }

    #[tokio::test]
    async fn test_delete_missing_list_reports_the_id() {
        let (service, _) = test_service();

        let err = service.delete_list_task(42).await.unwrap_err();
        assert_eq!(err.to_string(), "List task with id 42 not found");
    }
}
