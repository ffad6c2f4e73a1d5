// Authentication module
// Provides JWT-based registration, login and bearer-token extraction

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod password;
pub mod repository;
pub mod service;
pub mod token;

// Re-export commonly used types
pub use error::AuthError;
pub use handlers::{login, register};
pub use middleware::AuthenticatedUser;
pub use models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, User};
pub use password::PasswordService;
pub use repository::{AuthRepository, PgAuthRepository};
pub use service::AuthService;
pub use token::{Claims, TokenService};
