// HTTP handlers for authentication endpoints

use axum::{extract::State, Json};
use validator::Validate;

use crate::auth::error::AuthError;
use crate::auth::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::AppState;

/// Register a new user
/// POST /auth/register
#[utoipa::path(
    post,
    path = "/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered successfully", body = RegisterResponse),
        (status = 400, description = "Email already registered"),
        (status = 422, description = "Invalid email or password shape"),
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let user = state
        .auth_service
        .register_user(&request.email, &request.password)
        .await?;

    Ok(Json(RegisterResponse {
        message: format!("User {} registered successfully", user.email),
    }))
}

/// Login and obtain a bearer token
/// POST /auth/login
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "User logged in successfully", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Invalid email shape"),
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    request
        .validate()
        .map_err(|e| AuthError::ValidationError(e.to_string()))?;

    let token = state
        .auth_service
        .login_user(&request.email, &request.password)
        .await?;

    Ok(Json(LoginResponse {
        message: "User logged in successfully".to_string(),
        token,
    }))
}
