// HTTP handlers for task list endpoints
//
// Same envelope contract as the task routes: HTTP 200 either way, the
// body carries success or failure.

use axum::extract::{Path, State};
use axum::Json;
use validator::Validate;

use crate::auth::AuthenticatedUser;
use crate::list_tasks::models::{ListTaskRequest, ListTaskResponse, ListTaskUpdateRequest};
use crate::response::{ApiResponse, RouteRejection};
use crate::AppState;

/// List all task lists with their tasks embedded
/// GET /list_tasks/
#[utoipa::path(
    get,
    path = "/list_tasks/",
    responses(
        (status = 200, description = "Envelope with every task list, or a failure envelope when there are none"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "list_tasks"
)]
pub async fn get_list_tasks(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
) -> Result<ApiResponse<Vec<ListTaskResponse>>, RouteRejection> {
    let list_tasks = state.list_task_service.get_list_tasks().await?;

    Ok(ApiResponse::new(
        "List tasks retrieved successfully",
        list_tasks,
        200,
    ))
}

/// Create a task list
/// POST /list_tasks/
#[utoipa::path(
    post,
    path = "/list_tasks/",
    request_body = ListTaskRequest,
    responses(
        (status = 200, description = "Envelope with the created task list"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Malformed body"),
    ),
    security(("bearer_auth" = [])),
    tag = "list_tasks"
)]
pub async fn create_list_task(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Json(request): Json<ListTaskRequest>,
) -> Result<ApiResponse<ListTaskResponse>, RouteRejection> {
    request.validate().map_err(RouteRejection::validation)?;

    let list_task = state.list_task_service.create_list_task(&request).await?;

    Ok(ApiResponse::new(
        "List task created successfully",
        list_task,
        200,
    ))
}

/// Update a task list; absent fields keep their stored value
/// PUT /list_tasks/{id_list_task}
#[utoipa::path(
    put,
    path = "/list_tasks/{id_list_task}",
    params(("id_list_task" = i32, Path, description = "Task list id")),
    request_body = ListTaskUpdateRequest,
    responses(
        (status = 200, description = "Envelope with the updated task list, or a failure envelope"),
        (status = 401, description = "Missing or invalid bearer token"),
        (status = 422, description = "Malformed body"),
    ),
    security(("bearer_auth" = [])),
    tag = "list_tasks"
)]
pub async fn update_list_task(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id_list_task): Path<i32>,
    Json(request): Json<ListTaskUpdateRequest>,
) -> Result<ApiResponse<ListTaskResponse>, RouteRejection> {
    request.validate().map_err(RouteRejection::validation)?;

    let list_task = state
        .list_task_service
        .update_list_task(id_list_task, &request)
        .await?;

    Ok(ApiResponse::new(
        "List task updated successfully",
        list_task,
        200,
    ))
}

/// Delete a task list and, through the store cascade, its tasks
/// DELETE /list_tasks/{id_list_task}
#[utoipa::path(
    delete,
    path = "/list_tasks/{id_list_task}",
    params(("id_list_task" = i32, Path, description = "Task list id")),
    responses(
        (status = 200, description = "Envelope with null data, or a failure envelope"),
        (status = 401, description = "Missing or invalid bearer token"),
    ),
    security(("bearer_auth" = [])),
    tag = "list_tasks"
)]
pub async fn delete_list_task(
    State(state): State<AppState>,
    _user: AuthenticatedUser,
    Path(id_list_task): Path<i32>,
) -> Result<ApiResponse<Option<ListTaskResponse>>, RouteRejection> {
    state.list_task_service.delete_list_task(id_list_task).await?;

    Ok(ApiResponse::new("List task deleted successfully", None, 200))
}
