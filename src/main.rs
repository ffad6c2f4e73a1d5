pub mod auth;
pub mod config;
pub mod db;
pub mod list_tasks;
pub mod notifications;
pub mod response;
pub mod tasks;

use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use auth::{AuthService, PgAuthRepository, TokenService};
use list_tasks::{ListTaskService, PgListTaskRepository};
use notifications::ResendNotifier;
use tasks::{PgTaskRepository, TaskService};

/// OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        auth::handlers::register,
        auth::handlers::login,
        tasks::handlers::get_tasks,
        tasks::handlers::create_task,
        tasks::handlers::get_task_by_id,
        tasks::handlers::update_task,
        tasks::handlers::delete_task,
        tasks::handlers::update_task_status,
        tasks::handlers::get_tasks_by_user_id,
        tasks::handlers::update_task_id_user,
        tasks::handlers::get_tasks_by_list_task_id,
        tasks::handlers::get_filtered_tasks_by_list_task_id,
        list_tasks::handlers::get_list_tasks,
        list_tasks::handlers::create_list_task,
        list_tasks::handlers::update_list_task,
        list_tasks::handlers::delete_list_task,
    ),
    components(
        schemas(
            auth::models::RegisterRequest,
            auth::models::LoginRequest,
            auth::models::RegisterResponse,
            auth::models::LoginResponse,
            tasks::models::TaskStatus,
            tasks::models::TaskPriority,
            tasks::models::TaskCompleteness,
            tasks::models::TaskRequest,
            tasks::models::TaskUpdateRequest,
            tasks::models::TaskUpdateStatusRequest,
            tasks::models::TaskUpdateIdUserRequest,
            tasks::models::TaskFilterRequest,
            tasks::models::TaskResponse,
            list_tasks::models::ListTaskRequest,
            list_tasks::models::ListTaskUpdateRequest,
            list_tasks::models::ListTaskResponse,
            response::ApiResponseError,
        )
    ),
    tags(
        (name = "auth", description = "User registration and login endpoints"),
        (name = "tasks", description = "Task management endpoints"),
        (name = "list_tasks", description = "Task list management endpoints")
    ),
    info(
        title = "Task Manager API",
        version = "1.0.0",
        description = "RESTful API for managing tasks and task lists",
        contact(
            name = "API Support",
            email = "support@taskmanagerapi.com"
        )
    ),
    modifiers(&SecurityAddon)
)]
struct ApiDoc;

/// Registers the bearer token scheme referenced by the protected paths
struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub task_service: TaskService,
    pub list_task_service: ListTaskService,
}

/// Creates and configures the application router
/// Maps all API endpoints to their handlers and adds CORS middleware
pub fn create_router(state: AppState) -> Router {
    use tower_http::cors::{Any, CorsLayer};

    // Configure CORS to allow all origins, methods, and headers
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Authentication routes
        .route("/auth/register", post(auth::handlers::register))
        .route("/auth/login", post(auth::handlers::login))
        // Task routes
        .route("/tasks/", get(tasks::handlers::get_tasks))
        .route("/tasks/", post(tasks::handlers::create_task))
        .route("/tasks/:task_id", get(tasks::handlers::get_task_by_id))
        .route("/tasks/:task_id", put(tasks::handlers::update_task))
        .route("/tasks/:task_id", delete(tasks::handlers::delete_task))
        .route(
            "/tasks/:task_id/status",
            put(tasks::handlers::update_task_status),
        )
        // Both methods share the path so the parameter name must match
        .route(
            "/tasks/user/:id",
            get(tasks::handlers::get_tasks_by_user_id).put(tasks::handlers::update_task_id_user),
        )
        .route(
            "/tasks/list/:id_list_task",
            get(tasks::handlers::get_tasks_by_list_task_id),
        )
        .route(
            "/tasks/list/:id_list_task/filtered",
            post(tasks::handlers::get_filtered_tasks_by_list_task_id),
        )
        // Task list routes
        .route("/list_tasks/", get(list_tasks::handlers::get_list_tasks))
        .route("/list_tasks/", post(list_tasks::handlers::create_list_task))
        .route(
            "/list_tasks/:id_list_task",
            put(list_tasks::handlers::update_list_task),
        )
        .route(
            "/list_tasks/:id_list_task",
            delete(list_tasks::handlers::delete_list_task),
        )
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    // This enables the error!, warn!, info!, debug!, and trace! macros
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    tracing::info!("Task Manager API - Starting...");

    // Get configuration from environment variables
    let settings = config::Settings::from_env().expect("Invalid configuration");

    // Create database connection pool
    tracing::info!("Connecting to database...");
    let db_pool = db::create_pool(&settings.database_url)
        .await
        .expect("Failed to create database pool");

    // Run SQLx migrations on startup
    tracing::info!("Running database migrations...");
    sqlx::migrate!("./migrations")
        .run(&db_pool)
        .await
        .expect("Failed to run database migrations");
    tracing::info!("Migrations completed successfully");

    // Wire the repositories, the token service and the email notifier
    let token_service = Arc::new(TokenService::new(
        settings.jwt_secret.clone(),
        settings.jwt_expiration_minutes,
    ));
    let notifier = Arc::new(ResendNotifier::new(
        settings.resend_api_key.clone(),
        settings.resend_from_email.clone(),
    ));

    let auth_service = AuthService::new(
        Arc::new(PgAuthRepository::new(db_pool.clone())),
        token_service,
    );
    let task_service = TaskService::new(Arc::new(PgTaskRepository::new(db_pool.clone())), notifier);
    let list_task_service =
        ListTaskService::new(Arc::new(PgListTaskRepository::new(db_pool.clone())));

    let state = AppState {
        auth_service,
        task_service,
        list_task_service,
    };

    // Create the application router
    let app = create_router(state);

    // Start the Axum server
    let addr = settings.server_addr();
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("Failed to bind to address");

    tracing::info!("Task Manager API is running on http://{}", addr);
    tracing::info!("Swagger UI available at http://{}/swagger-ui", addr);

    axum::serve(listener, app)
        .await
        .expect("Server error");
}
