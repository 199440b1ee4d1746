// Test utilities shared across service unit tests.
// Everything runs against an in-memory SQLite database with the full
// migration set applied.

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection, Set};
use std::sync::Arc;

use crate::app_data::AppData;
use crate::config::Settings;
use crate::stores::UserStore;
use crate::types::db::user::{self, Role};
use crate::types::internal::ActingUser;

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

pub fn test_settings() -> Settings {
    Settings {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_secret: "test-secret-key-minimum-32-characters".to_string(),
        upload_dir: std::env::temp_dir().join("devforum-test-uploads"),
        max_upload_bytes: 5 * 1024 * 1024,
    }
}

/// Full application wiring over a fresh in-memory database
pub async fn setup_app() -> Arc<AppData> {
    let db = setup_test_db().await;
    AppData::new(db, &test_settings())
}

/// Register a user through the real registration flow, then force the role
pub async fn create_test_user(app: &AppData, username: &str, role: Role) -> user::Model {
    let user = app
        .user_service
        .register(
            username.to_string(),
            format!("{username}@example.com"),
            "testpass".to_string(),
        )
        .await
        .expect("Failed to register test user");

    if role == Role::User {
        return user;
    }
    let mut model: user::ActiveModel = user.into();
    model.role = Set(role);
    UserStore::new()
        .update(&app.db, model)
        .await
        .expect("Failed to set test user role")
}

pub fn acting(user: &user::Model) -> ActingUser {
    ActingUser::new(user.id, user.role)
}
