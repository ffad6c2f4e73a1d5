// JWT token generation and validation service

use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user email
    pub exp: i64,    // expiration timestamp
}

/// Token service for JWT operations
pub struct TokenService {
    secret: String,
    expiration_minutes: i64,
}

impl TokenService {
    pub fn new(secret: String, expiration_minutes: i64) -> Self {
        Self {
            secret,
            expiration_minutes,
        }
    }

    /// Generate a signed token carrying the user email as subject.
    pub fn generate_token(&self, email: &str) -> Result<String, AuthError> {
        let exp = (Utc::now() + Duration::minutes(self.expiration_minutes)).timestamp();

        let claims = Claims {
            sub: email.to_string(),
            exp,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGenerationError(e.to_string()))
    }

    /// Validate a token signature and expiry, returning its claims.
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // Helper to create a test token service
    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string(), 60)
    }

    #[test]
    fn test_token_roundtrip_preserves_subject() {
        let service = test_token_service();
        let token = service.generate_token("user@example.com").unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.sub, "user@example.com");
    }

    #[test]
    fn test_expiration_matches_configured_minutes() {
        let service = test_token_service();

        let before = Utc::now().timestamp();
        let token = service.generate_token("user@example.com").unwrap();
        let claims = service.validate_token(&token).unwrap();
        let after = Utc::now().timestamp();

        assert!(claims.exp >= before + 60 * 60);
        assert!(claims.exp <= after + 60 * 60);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        // Negative lifetime puts the expiry well past the decoder leeway
        let expired = TokenService::new("test_secret_key_for_testing_purposes".to_string(), -10);
        let token = expired.generate_token("user@example.com").unwrap();

        let service = test_token_service();
        let result = service.validate_token(&token);

        assert!(matches!(result.unwrap_err(), AuthError::ExpiredToken));
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let service1 = TokenService::new("secret1".to_string(), 60);
        let service2 = TokenService::new("secret2".to_string(), 60);

        let token = service1.generate_token("user@example.com").unwrap();

        assert!(service1.validate_token(&token).is_ok());
        assert!(matches!(
            service2.validate_token(&token).unwrap_err(),
            AuthError::InvalidToken
        ));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let service = test_token_service();

        assert!(service.validate_token("").is_err());
        assert!(service.validate_token("not.a.token").is_err());
        assert!(service.validate_token("invalid_token_format").is_err());
        assert!(service
            .validate_token("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.invalid.signature")
            .is_err());
    }

    proptest! {
        #[test]
        fn prop_token_roundtrip(
            email in "[a-z]{3,10}@[a-z]{3,10}\\.(com|org|net)"
        ) {
            let service = test_token_service();
            let token = service.generate_token(&email)?;
            let claims = service.validate_token(&token)?;

            prop_assert_eq!(claims.sub, email);
            prop_assert!(claims.exp > Utc::now().timestamp());
        }

        #[test]
        fn prop_malformed_tokens_rejected(
            malformed in "[a-zA-Z0-9]{10,50}"
        ) {
            let service = test_token_service();

            let result = service.validate_token(&malformed);
            prop_assert!(result.is_err());
        }
    }
}
