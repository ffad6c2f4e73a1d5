// Task module
// CRUD, filtering, status updates and reassignment with email notification

pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod service;

pub use error::TaskError;
pub use models::{
    Task, TaskCompleteness, TaskFilterRequest, TaskPriority, TaskRequest, TaskResponse,
    TaskStatus, TaskUpdateIdUserRequest, TaskUpdateRequest, TaskUpdateStatusRequest,
};
pub use repository::{PgTaskRepository, TaskRepository};
pub use service::TaskService;
