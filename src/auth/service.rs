// Authentication service - business logic layer

use std::sync::Arc;
use tracing::{info, warn};

use crate::auth::{
    error::AuthError, models::User, password::PasswordService, repository::AuthRepository,
    token::{Claims, TokenService},
};

/// Authentication service coordinating registration, login and lookups
#[derive(Clone)]
pub struct AuthService {
    repository: Arc<dyn AuthRepository>,
    token_service: Arc<TokenService>,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(repository: Arc<dyn AuthRepository>, token_service: Arc<TokenService>) -> Self {
        Self {
            repository,
            token_service,
        }
    }

    /// Register a new user
    ///
    /// 1. Reject the email if it is already registered
    /// 2. Hash the password
    /// 3. Persist and return the new user
    pub async fn register_user(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if self.repository.get_user_by_email(email).await?.is_some() {
            warn!("Registration rejected, email already in use: {}", email);
            return Err(AuthError::UserAlreadyExists(email.to_string()));
        }

        let hashed_password = PasswordService::hash_password(password)?;
        let user = self.repository.create_user(email, &hashed_password).await?;

        info!("Registered user {}", user.email);
        Ok(user)
    }

    /// Verify credentials and issue a bearer token
    ///
    /// Unknown emails and wrong passwords fail with the same error so a
    /// caller cannot probe which addresses are registered.
    pub async fn login_user(&self, email: &str, password: &str) -> Result<String, AuthError> {
        let user = self.repository.get_user_by_email(email).await?;

        match user {
            Some(user) if PasswordService::verify_password(password, &user.hashed_password) => {
                let token = self.token_service.generate_token(&user.email)?;
                info!("User {} logged in", user.email);
                Ok(token)
            }
            _ => {
                warn!("Failed login attempt for {}", email);
                Err(AuthError::InvalidCredentials(email.to_string()))
            }
        }
    }

    /// Decode a bearer token into its claims
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.token_service.validate_token(token)
    }

    pub async fn get_user_by_email(&self, email: &str) -> Result<Option<User>, AuthError> {
        self.repository.get_user_by_email(email).await
    }

    pub async fn get_user_by_id(&self, id_user: i32) -> Result<Option<User>, AuthError> {
        self.repository.get_user_by_id(id_user).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::{InMemoryStore, MockAuthRepository, TEST_JWT_SECRET};

    fn test_service() -> AuthService {
        let store = InMemoryStore::new();
        AuthService::new(
            Arc::new(MockAuthRepository::new(store)),
            Arc::new(TokenService::new(TEST_JWT_SECRET.to_string(), 60)),
        )
    }

    #[tokio::test]
    async fn test_register_stores_a_hash_not_the_password() {
        let service = test_service();

        let user = service
            .register_user("alice@example.com", "password123")
            .await
            .unwrap();

        assert_eq!(user.email, "alice@example.com");
        assert_ne!(user.hashed_password, "password123");
        assert!(PasswordService::verify_password(
            "password123",
            &user.hashed_password
        ));
    }

    #[tokio::test]
    async fn test_register_duplicate_email_is_rejected() {
        let service = test_service();

        service
            .register_user("taken@example.com", "password123")
            .await
            .unwrap();
        let err = service
            .register_user("taken@example.com", "otherpassword")
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::UserAlreadyExists(_)));
        assert_eq!(
            err.to_string(),
            "User with email taken@example.com already exists"
        );
    }

    #[tokio::test]
    async fn test_login_returns_a_token_for_the_user() {
        let service = test_service();

        service
            .register_user("bob@example.com", "password123")
            .await
            .unwrap();
        let token = service
            .login_user("bob@example.com", "password123")
            .await
            .unwrap();

        let claims = service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "bob@example.com");
    }

    #[tokio::test]
    async fn test_login_failures_are_indistinguishable() {
        let service = test_service();

        service
            .register_user("carol@example.com", "password123")
            .await
            .unwrap();

        // Unknown email and wrong password surface as the same error kind
        let unknown = service
            .login_user("nobody@example.com", "password123")
            .await
            .unwrap_err();
        let wrong = service
            .login_user("carol@example.com", "wrongpassword")
            .await
            .unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials(_)));
        assert!(matches!(wrong, AuthError::InvalidCredentials(_)));
        assert_eq!(unknown.status_code(), wrong.status_code());
    }

    #[tokio::test]
    async fn test_get_user_by_id_for_unknown_user_is_none() {
        let service = test_service();

        let found = service.get_user_by_id(9999).await.unwrap();
        assert!(found.is_none());
    }
}
