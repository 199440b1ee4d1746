use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};

use crate::errors::ForumError;
use crate::services::crypto;
use crate::stores::UserStore;
use crate::types::db::user::{self, Role};

/// Create an ADMIN account from the command line. Used to bootstrap a fresh
/// installation; fails if the username or email is already taken.
pub async fn create_admin(
    db: &DatabaseConnection,
    username: String,
    email: String,
    password: String,
) -> Result<user::Model, ForumError> {
    let user_store = UserStore::new();

    if user_store.exists_username(db, &username).await? {
        return Err(ForumError::conflict(format!("username '{username}' already exists")));
    }
    if user_store.exists_email(db, &email).await? {
        return Err(ForumError::conflict(format!("email '{email}' already exists")));
    }

    let now = Utc::now();
    let model = user::ActiveModel {
        username: Set(username.clone()),
        email: Set(email),
        password_hash: Set(crypto::hash_password(&password)?),
        profile_image: Set(None),
        about: Set(None),
        location: Set(None),
        website: Set(None),
        role: Set(Role::Admin),
        reputation: Set(1),
        views: Set(0),
        points: Set(0),
        level: Set(1),
        is_active: Set(true),
        is_banned: Set(false),
        banned_until: Set(None),
        ban_reason: Set(None),
        email_verified: Set(true),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    let saved = user_store.insert(db, model).await?;
    tracing::info!(user_id = saved.id, username = %username, "admin account created");
    Ok(saved)
}
