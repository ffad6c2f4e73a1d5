use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;

use crate::auth::AuthError;
use crate::list_tasks::ListTaskError;
use crate::tasks::TaskError;

/// Success envelope for the task and list task routes.
///
/// Enveloped routes always answer HTTP 200; clients read the body fields.
/// `status_code` carries the application-level code (201 when a task was
/// created, 200 everywhere else) and `data` carries the payload, `null`
/// for deletions.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: T,
    pub status_code: u16,
}

impl<T> ApiResponse<T> {
    pub fn new(message: impl Into<String>, data: T, status_code: u16) -> Self {
        Self {
            success: true,
            message: message.into(),
            data,
            status_code,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Failure envelope for the task and list task routes.
///
/// Same transport contract as [`ApiResponse`]: the HTTP status stays 200
/// and the body `status_code` is 500 no matter what went wrong, from a
/// missing row to a database outage.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponseError {
    pub success: bool,
    pub error: String,
    pub status_code: u16,
}

impl ApiResponseError {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: error.into(),
            status_code: 500,
        }
    }
}

impl IntoResponse for ApiResponseError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

impl From<TaskError> for ApiResponseError {
    fn from(err: TaskError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<ListTaskError> for ApiResponseError {
    fn from(err: ListTaskError) -> Self {
        Self::new(err.to_string())
    }
}

impl From<AuthError> for ApiResponseError {
    fn from(err: AuthError) -> Self {
        Self::new(err.to_string())
    }
}

/// Failure side of the enveloped route handlers.
///
/// Field validation is rejected before the handler body runs and keeps
/// a real 422 status; everything that fails afterwards folds into the
/// HTTP 200 failure envelope.
#[derive(Debug)]
pub enum RouteRejection {
    Validation(String),
    Envelope(ApiResponseError),
}

impl RouteRejection {
    pub fn validation(err: validator::ValidationErrors) -> Self {
        Self::Validation(err.to_string())
    }
}

impl IntoResponse for RouteRejection {
    fn into_response(self) -> Response {
        match self {
            RouteRejection::Validation(message) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": message })),
            )
                .into_response(),
            RouteRejection::Envelope(envelope) => envelope.into_response(),
        }
    }
}

impl From<TaskError> for RouteRejection {
    fn from(err: TaskError) -> Self {
        Self::Envelope(err.into())
    }
}

impl From<ListTaskError> for RouteRejection {
    fn from(err: ListTaskError) -> Self {
        Self::Envelope(err.into())
    }
}

impl From<AuthError> for RouteRejection {
    fn from(err: AuthError) -> Self {
        Self::Envelope(err.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_envelope_serializes_with_payload() {
        let response = ApiResponse::new("Task retrieved successfully", json!({"id_task": 1}), 200);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(true));
        assert_eq!(value["message"], json!("Task retrieved successfully"));
        assert_eq!(value["data"]["id_task"], json!(1));
        assert_eq!(value["status_code"], json!(200));
    }

    #[test]
    fn delete_envelope_serializes_null_data() {
        let response = ApiResponse::new("Task deleted successfully", None::<i32>, 200);
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["data"], json!(null));
    }

    #[test]
    fn failure_envelope_reports_internal_status() {
        let response = ApiResponseError::from(TaskError::NotFound("No tasks found".to_string()));
        let value = serde_json::to_value(&response).unwrap();

        assert_eq!(value["success"], json!(false));
        assert_eq!(value["error"], json!("No tasks found"));
        assert_eq!(value["status_code"], json!(500));
    }
}
