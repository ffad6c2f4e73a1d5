// HTTP handlers for task endpoints
//
// Every route here requires a bearer token and answers with the
// response envelope: HTTP 200 regardless of outcome, with the result
// carried in the body.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::response::{ApiResponse, ApiResponseError, RouteRejection};
use crate::tasks::models::{
    TaskFilterRequest, TaskRequest, TaskResponse, TaskUpdateIdUserRequest, TaskUpdateRequest,
    TaskUpdateStatusRequest,
};
use crate::AppState;

/// List all tasks
/// GET /tasks/
#[utoipa::path(
    get,
    path = "/tasks/",
    responses(
        (status = 200, description = "Envelope with every task, or a failure envelope when there are none"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn get_tasks(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<ApiResponse<Vec<TaskResponse>>, RouteRejection> {
    let tasks = state.task_service.get_tasks().await?;

    Ok(ApiResponse::new(
        "Tasks retrieved successfully",
        tasks.into_iter().map(TaskResponse::from).collect(),
        200,
    ))
}

/// Create a task
/// POST /tasks/
#[utoipa::path(
    post,
    path = "/tasks/",
    request_body = TaskRequest,
    responses(
        (status = 200, description = "Envelope with the created task and body status 201"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Malformed body"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn create_task(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<TaskRequest>,
) -> Result<ApiResponse<TaskResponse>, RouteRejection> {
    request.validate().map_err(RouteRejection::validation)?;

    let task = state.task_service.create_task(&request).await?;

    Ok(ApiResponse::new(
        "Task created successfully",
        TaskResponse::from(task),
        201,
    ))
}

/// Update a task; absent fields keep their stored value
/// PUT /tasks/{task_id}
#[utoipa::path(
    put,
    path = "/tasks/{task_id}",
    params(("task_id" = i32, Path, description = "Task id")),
    request_body = TaskUpdateRequest,
    responses(
        (status = 200, description = "Envelope with the updated task, or a failure envelope"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Malformed body"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn update_task(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(task_id): Path<i32>,
    Json(request): Json<TaskUpdateRequest>,
) -> Result<ApiResponse<TaskResponse>, RouteRejection> {
    request.validate().map_err(RouteRejection::validation)?;

    let task = state.task_service.update_task(task_id, &request).await?;

    Ok(ApiResponse::new(
        "Task updated successfully",
        TaskResponse::from(task),
        200,
    ))
}

/// Delete a task
/// DELETE /tasks/{task_id}
#[utoipa::path(
    delete,
    path = "/tasks/{task_id}",
    params(("task_id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Envelope with null data, or a failure envelope"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn delete_task(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(task_id): Path<i32>,
) -> Result<ApiResponse<Option<TaskResponse>>, RouteRejection> {
    state.task_service.delete_task(task_id).await?;

    Ok(ApiResponse::new("Task deleted successfully", None, 200))
}

/// Fetch one task by id
/// GET /tasks/{task_id}
#[utoipa::path(
    get,
    path = "/tasks/{task_id}",
    params(("task_id" = i32, Path, description = "Task id")),
    responses(
        (status = 200, description = "Envelope with the task, or a failure envelope"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn get_task_by_id(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(task_id): Path<i32>,
) -> Result<ApiResponse<TaskResponse>, RouteRejection> {
    let task = state.task_service.get_task_by_id(task_id).await?;

    Ok(ApiResponse::new(
        "Task retrieved successfully",
        TaskResponse::from(task),
        200,
    ))
}

/// List the tasks assigned to a user
/// GET /tasks/user/{id}
#[utoipa::path(
    get,
    path = "/tasks/user/{id}",
    params(("id" = i32, Path, description = "User id")),
    responses(
        (status = 200, description = "Envelope with the user's tasks, or a failure envelope when there are none"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn get_tasks_by_user_id(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id_user): Path<i32>,
) -> Result<ApiResponse<Vec<TaskResponse>>, RouteRejection> {
    let tasks = state.task_service.get_tasks_by_user_id(id_user).await?;

    Ok(ApiResponse::new(
        "Tasks retrieved successfully",
        tasks.into_iter().map(TaskResponse::from).collect(),
        200,
    ))
}

/// List the tasks in a task list
/// GET /tasks/list/{id_list_task}
#[utoipa::path(
    get,
    path = "/tasks/list/{id_list_task}",
    params(("id_list_task" = i32, Path, description = "Task list id")),
    responses(
        (status = 200, description = "Envelope with the list's tasks, or a failure envelope when there are none"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn get_tasks_by_list_task_id(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id_list_task): Path<i32>,
) -> Result<ApiResponse<Vec<TaskResponse>>, RouteRejection> {
    let tasks = state
        .task_service
        .get_tasks_by_list_task_id(id_list_task)
        .await?;

    Ok(ApiResponse::new(
        "Tasks retrieved successfully",
        tasks.into_iter().map(TaskResponse::from).collect(),
        200,
    ))
}

/// Filter the tasks in a task list; present filters are ANDed
/// POST /tasks/list/{id_list_task}/filtered
#[utoipa::path(
    post,
    path = "/tasks/list/{id_list_task}/filtered",
    params(("id_list_task" = i32, Path, description = "Task list id")),
    request_body = TaskFilterRequest,
    responses(
        (status = 200, description = "Envelope with the matching tasks, or a failure envelope when nothing matches"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Malformed body"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn get_filtered_tasks_by_list_task_id(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id_list_task): Path<i32>,
    Json(filter): Json<TaskFilterRequest>,
) -> Result<ApiResponse<Vec<TaskResponse>>, RouteRejection> {
    let tasks = state
        .task_service
        .get_filtered_tasks_by_list_task_id(id_list_task, &filter)
        .await?;

    Ok(ApiResponse::new(
        "Tasks retrieved successfully",
        tasks.into_iter().map(TaskResponse::from).collect(),
        200,
    ))
}

/// Update only the status of a task
/// PUT /tasks/{task_id}/status
#[utoipa::path(
    put,
    path = "/tasks/{task_id}/status",
    params(("task_id" = i32, Path, description = "Task id")),
    request_body = TaskUpdateStatusRequest,
    responses(
        (status = 200, description = "Envelope with the updated task, or a failure envelope"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Malformed body"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn update_task_status(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(task_id): Path<i32>,
    Json(request): Json<TaskUpdateStatusRequest>,
) -> Result<ApiResponse<TaskResponse>, RouteRejection> {
    let task = state
        .task_service
        .update_task_status(task_id, request.status)
        .await?;

    Ok(ApiResponse::new(
        "Task status updated successfully",
        TaskResponse::from(task),
        200,
    ))
}

/// Reassign a task to another user and email them
/// PUT /tasks/user/{id}
#[utoipa::path(
    put,
    path = "/tasks/user/{id}",
    params(("id" = i32, Path, description = "Task id")),
    request_body = TaskUpdateIdUserRequest,
    responses(
        (status = 200, description = "Envelope with the reassigned task, or a failure envelope"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Malformed body"),
    ),
    security(("bearer_auth" = [])),
    tag = "tasks"
)]
pub async fn update_task_id_user(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(task_id): Path<i32>,
    Json(request): Json<TaskUpdateIdUserRequest>,
) -> Result<ApiResponse<TaskResponse>, RouteRejection> {
    // The new assignee must resolve before the task row is touched
    let assignee = state
        .auth_service
        .get_user_by_id(request.id_user)
        .await?
        .ok_or_else(|| {
            RouteRejection::Envelope(ApiResponseError::new(format!(
                "User with id {} not found",
                request.id_user
            )))
        })?;

    let task = state
        .task_service
        .update_task_id_user(task_id, request.id_user, &assignee.email)
        .await?;

    Ok(ApiResponse::new(
        "Task id user updated successfully",
        TaskResponse::from(task),
        200,
    ))
}
