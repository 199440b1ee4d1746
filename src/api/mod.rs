// API layer - HTTP endpoints
pub mod admin;
pub mod answers;
pub mod auth;
pub mod comments;
pub mod health;
pub mod images;
pub mod moderation;
pub mod questions;
pub mod social;
pub mod tags;

pub use admin::AdminApi;
pub use answers::AnswersApi;
pub use auth::AuthApi;
pub use comments::CommentsApi;
pub use health::HealthApi;
pub use images::ImagesApi;
pub use moderation::ModerationApi;
pub use questions::QuestionsApi;
pub use social::{BadgesApi, GroupsApi, MessagesApi, NotificationsApi, UsersApi};
pub use tags::TagsApi;

use poem_openapi::auth::Bearer;
use poem_openapi::SecurityScheme;

use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::internal::ActingUser;

/// JWT Bearer token authentication
#[derive(SecurityScheme)]
#[oai(
    ty = "bearer",
    key_name = "Authorization",
    key_in = "header",
    bearer_format = "JWT"
)]
pub struct BearerAuth(pub Bearer);

/// Resolve the bearer token into the acting user: validate the JWT, load
/// the account, and refuse deactivated or banned callers. The ban check is
/// the lazy-expiry one, so an expired temporary ban clears here.
pub(crate) async fn authenticate(
    app: &AppData,
    auth: &BearerAuth,
) -> Result<ActingUser, ApiError> {
    let claims = app
        .token_service
        .verify(&auth.0.token)
        .map_err(|_| ApiError::unauthorized("Invalid or expired token"))?;
    let user = app
        .user_service
        .find_by_id(claims.sub)
        .await
        .map_err(|_| ApiError::unauthorized("Unknown user"))?;
    if !user.is_active {
        return Err(ApiError::forbidden("Account is deactivated"));
    }
    if app.user_service.check_ban(user.id).await? {
        return Err(ApiError::forbidden("Account is banned"));
    }
    Ok(ActingUser::new(user.id, user.role))
}

/// Normalize pagination query params: 1-based page, per_page capped at 100.
pub(crate) fn page_params(page: Option<u64>, per_page: Option<u64>) -> (u64, u64) {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(20).clamp(1, 100);
    (page, per_page)
}
