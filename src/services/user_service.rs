use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::crypto;
use crate::services::NotificationService;
use crate::stores::UserStore;
use crate::types::db::user::{self, level_for_points, Role};
use crate::types::internal::ActingUser;

const MIN_USERNAME_CHARS: usize = 3;
const MAX_USERNAME_CHARS: usize = 50;
const MIN_PASSWORD_CHARS: usize = 6;

#[derive(Default)]
pub struct ProfileUpdate {
    pub about: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image: Option<String>,
}

/// User registration, credential checks, the lazy ban-expiry check and the
/// follow graph.
pub struct UserService {
    db: DatabaseConnection,
    user_store: Arc<UserStore>,
    notifications: Arc<NotificationService>,
}

impl UserService {
    pub fn new(
        db: DatabaseConnection,
        user_store: Arc<UserStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            db,
            user_store,
            notifications,
        }
    }

    /// Register a new account. Username and email must be unused; the
    /// password is stored as an Argon2id hash. New accounts start as plain
    /// USERs with baseline counters.
    pub async fn register(
        &self,
        username: String,
        email: String,
        password: String,
    ) -> Result<user::Model, ForumError> {
        let username = username.trim().to_string();
        let email = email.trim().to_string();

        let name_chars = username.chars().count();
        if !(MIN_USERNAME_CHARS..=MAX_USERNAME_CHARS).contains(&name_chars) {
            return Err(ForumError::validation(format!(
                "username must be {MIN_USERNAME_CHARS}-{MAX_USERNAME_CHARS} characters"
            )));
        }
        if !email.contains('@') {
            return Err(ForumError::validation("email address is not valid"));
        }
        if password.chars().count() < MIN_PASSWORD_CHARS {
            return Err(ForumError::validation(format!(
                "password must be at least {MIN_PASSWORD_CHARS} characters"
            )));
        }

        if self.user_store.exists_username(&self.db, &username).await? {
            return Err(ForumError::conflict(format!("username '{username}' already exists")));
        }
        if self.user_store.exists_email(&self.db, &email).await? {
            return Err(ForumError::conflict(format!("email '{email}' already exists")));
        }

        let password_hash = crypto::hash_password(&password)?;
        let now = Utc::now();
        let model = user::ActiveModel {
            username: Set(username.clone()),
            email: Set(email),
            password_hash: Set(password_hash),
            profile_image: Set(None),
            about: Set(None),
            location: Set(None),
            website: Set(None),
            role: Set(Role::User),
            reputation: Set(1),
            views: Set(0),
            points: Set(0),
            level: Set(1),
            is_active: Set(true),
            is_banned: Set(false),
            banned_until: Set(None),
            ban_reason: Set(None),
            email_verified: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = self.user_store.insert(&self.db, model).await?;
        tracing::info!(user_id = saved.id, username = %username, "user registered");

        self.notifications
            .notify(saved.id, "Welcome to the forum!", "welcome")
            .await;

        Ok(saved)
    }

    /// Verify credentials. Returns None for an unknown username or a wrong
    /// password so callers present a uniform failure. Banned (after the lazy
    /// expiry check) and deactivated accounts fail with Forbidden.
    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<user::Model>, ForumError> {
        let Some(user) = self.user_store.find_by_username(&self.db, username).await? else {
            return Ok(None);
        };
        if !crypto::verify_password(password, &user.password_hash) {
            return Ok(None);
        }
        if !user.is_active {
            return Err(ForumError::forbidden("account is deactivated"));
        }
        if self.check_ban(user.id).await? {
            return Err(ForumError::forbidden("account is banned"));
        }
        // the ban check may have cleared fields; reload the fresh row
        let user = self.user_store.get(&self.db, user.id).await?;
        Ok(Some(user))
    }

    /// Is the user's ban currently in force? A temporary ban whose
    /// banned_until has passed counts as expired: this call clears the three
    /// ban fields and returns false. The expiry is lazy but lives in a named
    /// check, not hidden inside a getter.
    pub async fn check_ban(&self, user_id: i64) -> Result<bool, ForumError> {
        let user = self.user_store.get(&self.db, user_id).await?;
        if !user.is_banned {
            return Ok(false);
        }
        match user.banned_until {
            Some(until) if until <= Utc::now() => {
                let mut model: user::ActiveModel = user.into();
                model.is_banned = Set(false);
                model.banned_until = Set(None);
                model.ban_reason = Set(None);
                UserStore::touch(&mut model);
                self.user_store.update(&self.db, model).await?;
                tracing::info!(user_id, "temporary ban expired and was cleared");
                Ok(false)
            }
            // permanent (None) or still running
            _ => Ok(true),
        }
    }

    pub async fn find_by_id(&self, id: i64) -> Result<user::Model, ForumError> {
        self.user_store.get(&self.db, id).await
    }

    pub async fn find_by_username(&self, username: &str) -> Result<Option<user::Model>, ForumError> {
        self.user_store.find_by_username(&self.db, username).await
    }

    pub async fn page_by_reputation(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<user::Model>, u64), ForumError> {
        self.user_store.page_by_reputation(&self.db, page, per_page).await
    }

    pub async fn update_profile(
        &self,
        acting: &ActingUser,
        user_id: i64,
        update: ProfileUpdate,
    ) -> Result<user::Model, ForumError> {
        if acting.id != user_id && !acting.is_staff() {
            return Err(ForumError::forbidden("cannot edit another user's profile"));
        }
        let user = self.user_store.get(&self.db, user_id).await?;
        let mut model: user::ActiveModel = user.into();
        if let Some(about) = update.about {
            model.about = Set(Some(about));
        }
        if let Some(location) = update.location {
            model.location = Set(Some(location));
        }
        if let Some(website) = update.website {
            model.website = Set(Some(website));
        }
        if let Some(profile_image) = update.profile_image {
            model.profile_image = Set(Some(profile_image));
        }
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await
    }

    /// Adjust points, recomputing the derived level; points floor at zero.
    pub async fn add_points(&self, user_id: i64, delta: i32) -> Result<user::Model, ForumError> {
        let user = self.user_store.get(&self.db, user_id).await?;
        let points = (user.points + delta).max(0);
        let mut model: user::ActiveModel = user.into();
        model.points = Set(points);
        model.level = Set(level_for_points(points));
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await
    }

    pub async fn add_reputation(&self, user_id: i64, delta: i32) -> Result<user::Model, ForumError> {
        let user = self.user_store.get(&self.db, user_id).await?;
        let reputation = (user.reputation + delta).max(0);
        let mut model: user::ActiveModel = user.into();
        model.reputation = Set(reputation);
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await
    }

    pub async fn increment_profile_views(&self, user_id: i64) -> Result<(), ForumError> {
        let user = self.user_store.get(&self.db, user_id).await?;
        let views = user.views + 1;
        let mut model: user::ActiveModel = user.into();
        model.views = Set(views);
        self.user_store.update(&self.db, model).await?;
        Ok(())
    }

    // ---- follow graph ----

    /// Follow another user. Self-follow is rejected; a duplicate follow is
    /// a no-op returning false.
    pub async fn follow(&self, acting: &ActingUser, target_id: i64) -> Result<bool, ForumError> {
        if acting.id == target_id {
            return Err(ForumError::validation("cannot follow yourself"));
        }
        let target = self.user_store.get(&self.db, target_id).await?;
        let inserted = self
            .user_store
            .insert_follow(&self.db, acting.id, target.id)
            .await?;
        if inserted {
            self.notifications
                .notify(target.id, "You have a new follower", "follow")
                .await;
        }
        Ok(inserted)
    }

    pub async fn unfollow(&self, acting: &ActingUser, target_id: i64) -> Result<bool, ForumError> {
        self.user_store.delete_follow(&self.db, acting.id, target_id).await
    }

    pub async fn followers(&self, user_id: i64) -> Result<Vec<user::Model>, ForumError> {
        let ids = self.user_store.follower_ids(&self.db, user_id).await?;
        self.user_store.find_by_ids(&self.db, ids).await
    }

    pub async fn following(&self, user_id: i64) -> Result<Vec<user::Model>, ForumError> {
        let ids = self.user_store.following_ids(&self.db, user_id).await?;
        self.user_store.find_by_ids(&self.db, ids).await
    }
}
