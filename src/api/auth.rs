use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::auth::{LoginRequest, RegisterRequest, TokenResponse, WhoAmIResponse};
use crate::types::dto::social::PublicUserResponse;

const TOKEN_EXPIRES_IN_SECONDS: i64 = 24 * 60 * 60;

/// Authentication API endpoints
pub struct AuthApi {
    app: Arc<AppData>,
}

impl AuthApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum AuthTags {
    /// Registration and login
    Authentication,
}

#[OpenApi(prefix_path = "/auth")]
impl AuthApi {
    /// Register a new account
    #[oai(path = "/register", method = "post", tag = "AuthTags::Authentication")]
    async fn register(
        &self,
        body: Json<RegisterRequest>,
    ) -> Result<Json<PublicUserResponse>, ApiError> {
        let body = body.0;
        let user = self
            .app
            .user_service
            .register(body.username, body.email, body.password)
            .await?;
        Ok(Json(user.into()))
    }

    /// Login with username and password to receive an access token
    #[oai(path = "/login", method = "post", tag = "AuthTags::Authentication")]
    async fn login(&self, body: Json<LoginRequest>) -> Result<Json<TokenResponse>, ApiError> {
        let user = self
            .app
            .user_service
            .authenticate(&body.username, &body.password)
            .await?
            .ok_or_else(|| ApiError::unauthorized("Invalid username or password"))?;

        let access_token = self.app.token_service.issue(&user)?;
        Ok(Json(TokenResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: TOKEN_EXPIRES_IN_SECONDS,
        }))
    }

    /// Verify the access token and return the caller's identity
    #[oai(path = "/whoami", method = "get", tag = "AuthTags::Authentication")]
    async fn whoami(&self, auth: BearerAuth) -> Result<Json<WhoAmIResponse>, ApiError> {
        // authenticate() re-checks account state, not just the signature
        authenticate(&self.app, &auth).await?;
        let claims = self
            .app
            .token_service
            .verify(&auth.0.token)
            .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
        Ok(Json(WhoAmIResponse {
            user_id: claims.sub,
            username: claims.username,
            role: claims.role.as_str().to_string(),
            expires_at: claims.exp,
        }))
    }
}
