// Shared setup for integration tests: full application wiring over an
// in-memory SQLite database with migrations applied.

use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, Set};
use std::path::PathBuf;
use std::sync::Arc;

use devforum_backend::app_data::AppData;
use devforum_backend::config::Settings;
use devforum_backend::stores::UserStore;
use devforum_backend::types::db::user::{self, Role};
use devforum_backend::types::internal::ActingUser;

pub async fn setup_app() -> Arc<AppData> {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to create test database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let settings = Settings {
        database_url: "sqlite::memory:".to_string(),
        bind_addr: "127.0.0.1:0".to_string(),
        jwt_secret: "integration-secret-at-least-32-chars!".to_string(),
        upload_dir: PathBuf::from(std::env::temp_dir()).join("devforum-it-uploads"),
        max_upload_bytes: 5 * 1024 * 1024,
    };
    let app = AppData::new(db, &settings);
    app.badge_service
        .seed_defaults()
        .await
        .expect("Failed to seed badges");
    app
}

pub async fn create_user(app: &AppData, username: &str, role: Role) -> user::Model {
    let user = app
        .user_service
        .register(
            username.to_string(),
            format!("{username}@example.com"),
            "testpass".to_string(),
        )
        .await
        .expect("Failed to register user");

    if role == Role::User {
        return user;
    }
    let mut model: user::ActiveModel = user.into();
    model.role = Set(role);
    UserStore::new()
        .update(&app.db, model)
        .await
        .expect("Failed to set role")
}

pub fn acting(user: &user::Model) -> ActingUser {
    ActingUser::new(user.id, user.role)
}
