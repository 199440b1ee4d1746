use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::fmt;
use uuid::Uuid;

use crate::errors::ForumError;
use crate::types::db::user;
use crate::types::internal::Claims;

const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Manages JWT access token generation and validation
pub struct TokenService {
    jwt_secret: String,
}

impl TokenService {
    pub fn new(jwt_secret: String) -> Self {
        Self { jwt_secret }
    }

    /// Issue an access token for an authenticated user
    ///
    /// # Arguments
    /// * `user` - The freshly loaded account row; id, username and role are
    ///   embedded in the claims
    ///
    /// # Returns
    /// * `Ok(String)` - The encoded JWT
    /// * `Err(ForumError)` - Signing failed
    pub fn issue(&self, user: &user::Model) -> Result<String, ForumError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id,
            username: user.username.clone(),
            role: user.role,
            exp: now + TOKEN_LIFETIME_HOURS * 60 * 60,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ForumError::crypto("issue_token", e.to_string()))
    }

    /// Validate an access token and return its claims. Expiry is part of
    /// validation; callers treat any error as "not authenticated".
    pub fn verify(&self, token: &str) -> Result<Claims, ForumError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| ForumError::crypto("verify_token", e.to_string()))
    }
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("jwt_secret", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::db::Role;

    fn test_user() -> user::Model {
        user::Model {
            id: 7,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            profile_image: None,
            about: None,
            location: None,
            website: None,
            role: Role::Manager,
            reputation: 1,
            views: 0,
            points: 0,
            level: 1,
            is_active: true,
            is_banned: false,
            banned_until: None,
            ban_reason: None,
            email_verified: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn issue_and_verify_round_trip() {
        let service = TokenService::new("test-secret-key-minimum-32-characters".to_string());
        let token = service.issue(&test_user()).unwrap();
        let claims = service.verify(&token).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.role, Role::Manager);
    }

    #[test]
    fn verify_rejects_token_signed_with_other_secret() {
        let issuer = TokenService::new("secret-a-secret-a-secret-a-secret-a".to_string());
        let verifier = TokenService::new("secret-b-secret-b-secret-b-secret-b".to_string());
        let token = issuer.issue(&test_user()).unwrap();
        assert!(verifier.verify(&token).is_err());
    }
}
