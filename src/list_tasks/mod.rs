// Task list module
// CRUD for the lists that group tasks; deleting a list cascades to its tasks

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::ListTaskError;
pub use models::{ListTask, ListTaskRequest, ListTaskResponse, ListTaskUpdateRequest};
pub use repository::{ListTaskRepository, PgListTaskRepository};
pub use service::ListTaskService;
