use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::{
    crypto, ActivityLogService, AnswerService, NotificationService, QuestionService,
};
use crate::stores::{
    ActivityLogStore, AnswerStore, MessageStore, NotificationStore, QuestionStore, ReportStore,
    SettingsStore, UserStore,
};
use sea_orm::prelude::DateTimeUtc;

use crate::types::db::system_setting;
use crate::types::db::user::{self, Role};
use crate::types::internal::ActingUser;

/// Admin account management: bans with lazy expiry, activation, role
/// changes, password resets and the ordered cascading delete of a user and
/// everything they own.
pub struct AdminService {
    db: DatabaseConnection,
    user_store: Arc<UserStore>,
    question_store: Arc<QuestionStore>,
    answer_store: Arc<AnswerStore>,
    report_store: Arc<ReportStore>,
    notification_store: Arc<NotificationStore>,
    activity_log_store: Arc<ActivityLogStore>,
    message_store: Arc<MessageStore>,
    settings_store: Arc<SettingsStore>,
    question_service: Arc<QuestionService>,
    answer_service: Arc<AnswerService>,
    notifications: Arc<NotificationService>,
    activity: Arc<ActivityLogService>,
}

impl AdminService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        user_store: Arc<UserStore>,
        question_store: Arc<QuestionStore>,
        answer_store: Arc<AnswerStore>,
        report_store: Arc<ReportStore>,
        notification_store: Arc<NotificationStore>,
        activity_log_store: Arc<ActivityLogStore>,
        message_store: Arc<MessageStore>,
        settings_store: Arc<SettingsStore>,
        question_service: Arc<QuestionService>,
        answer_service: Arc<AnswerService>,
        notifications: Arc<NotificationService>,
        activity: Arc<ActivityLogService>,
    ) -> Self {
        Self {
            db,
            user_store,
            question_store,
            answer_store,
            report_store,
            notification_store,
            activity_log_store,
            message_store,
            settings_store,
            question_service,
            answer_service,
            notifications,
            activity,
        }
    }

    fn require_staff(acting: &ActingUser) -> Result<(), ForumError> {
        if acting.is_staff() {
            Ok(())
        } else {
            Err(ForumError::forbidden("staff role required"))
        }
    }

    fn require_admin(acting: &ActingUser) -> Result<(), ForumError> {
        if acting.role == Role::Admin {
            Ok(())
        } else {
            Err(ForumError::forbidden("ADMIN role required"))
        }
    }

    // ---- user listing ----

    pub async fn page_users(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<user::Model>, u64), ForumError> {
        Self::require_staff(acting)?;
        self.user_store.page_all(&self.db, page, per_page).await
    }

    pub async fn search_users(
        &self,
        acting: &ActingUser,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<user::Model>, u64), ForumError> {
        Self::require_staff(acting)?;
        self.user_store.search(&self.db, keyword, page, per_page).await
    }

    pub async fn users_by_role(
        &self,
        acting: &ActingUser,
        role: Role,
    ) -> Result<Vec<user::Model>, ForumError> {
        Self::require_staff(acting)?;
        self.user_store.find_by_role(&self.db, role).await
    }

    pub async fn count_active_users(&self) -> Result<u64, ForumError> {
        self.user_store.count_active(&self.db).await
    }

    pub async fn count_banned_users(&self) -> Result<u64, ForumError> {
        self.user_store.count_banned(&self.db).await
    }

    pub async fn count_users_by_role(&self, role: Role) -> Result<u64, ForumError> {
        self.user_store.count_by_role(&self.db, role).await
    }

    // ---- ban lifecycle ----

    /// Ban a user. `until = None` means permanent; a set timestamp makes the
    /// ban temporary, cleared lazily by the next ban check after it passes.
    pub async fn ban_user(
        &self,
        acting: &ActingUser,
        user_id: i64,
        reason: String,
        until: Option<DateTimeUtc>,
    ) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        if acting.id == user_id {
            return Err(ForumError::forbidden("cannot ban yourself"));
        }
        let user = self.user_store.get(&self.db, user_id).await?;
        let mut model: user::ActiveModel = user.into();
        model.is_banned = Set(true);
        model.ban_reason = Set(Some(reason.clone()));
        model.banned_until = Set(until);
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await?;

        tracing::info!(user_id, by = acting.id, permanent = until.is_none(), "user banned");
        self.notifications
            .notify(user_id, format!("Your account was banned: {reason}"), "ban")
            .await;
        self.activity
            .record(acting.id, "user.ban", Some("user"), Some(user_id), Some(reason))
            .await;
        Ok(())
    }

    /// Lift a ban, clearing all three ban fields.
    pub async fn unban_user(&self, acting: &ActingUser, user_id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        let user = self.user_store.get(&self.db, user_id).await?;
        let mut model: user::ActiveModel = user.into();
        model.is_banned = Set(false);
        model.banned_until = Set(None);
        model.ban_reason = Set(None);
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await?;

        self.notifications
            .notify(user_id, "Your account ban was lifted", "ban")
            .await;
        self.activity
            .record(acting.id, "user.unban", Some("user"), Some(user_id), None)
            .await;
        Ok(())
    }

    pub async fn deactivate_user(&self, acting: &ActingUser, user_id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        if acting.id == user_id {
            return Err(ForumError::forbidden("cannot deactivate yourself"));
        }
        self.set_active(acting, user_id, false).await
    }

    pub async fn activate_user(&self, acting: &ActingUser, user_id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        self.set_active(acting, user_id, true).await
    }

    async fn set_active(
        &self,
        acting: &ActingUser,
        user_id: i64,
        active: bool,
    ) -> Result<(), ForumError> {
        let user = self.user_store.get(&self.db, user_id).await?;
        let mut model: user::ActiveModel = user.into();
        model.is_active = Set(active);
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await?;
        self.activity
            .record(
                acting.id,
                if active { "user.activate" } else { "user.deactivate" },
                Some("user"),
                Some(user_id),
                None,
            )
            .await;
        Ok(())
    }

    /// Admin password reset for a user
    pub async fn reset_password(
        &self,
        acting: &ActingUser,
        user_id: i64,
        new_password: &str,
    ) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        if new_password.chars().count() < 6 {
            return Err(ForumError::validation("password must be at least 6 characters"));
        }
        let user = self.user_store.get(&self.db, user_id).await?;
        let mut model: user::ActiveModel = user.into();
        model.password_hash = Set(crypto::hash_password(new_password)?);
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await?;
        tracing::info!(user_id, by = acting.id, "password reset by admin");
        Ok(())
    }

    /// Change a user's role. ADMIN only; self-modification is refused the
    /// same way role handling is guarded elsewhere.
    pub async fn change_role(
        &self,
        acting: &ActingUser,
        user_id: i64,
        role: Role,
    ) -> Result<(), ForumError> {
        Self::require_admin(acting)?;
        if acting.id == user_id {
            return Err(ForumError::forbidden("cannot change your own role"));
        }
        let user = self.user_store.get(&self.db, user_id).await?;
        let mut model: user::ActiveModel = user.into();
        model.role = Set(role);
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await?;

        tracing::info!(user_id, by = acting.id, role = role.as_str(), "role changed");
        self.activity
            .record(
                acting.id,
                "user.change_role",
                Some("user"),
                Some(user_id),
                Some(role.as_str().to_string()),
            )
            .await;
        Ok(())
    }

    pub async fn verify_email(&self, acting: &ActingUser, user_id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        let user = self.user_store.get(&self.db, user_id).await?;
        let mut model: user::ActiveModel = user.into();
        model.email_verified = Set(true);
        UserStore::touch(&mut model);
        self.user_store.update(&self.db, model).await?;
        Ok(())
    }

    /// Delete a user and everything they own, in one transaction. Ordering
    /// matters: side records first, then the user's answers (keeping other
    /// questions' answer_count honest), then each authored question through
    /// the full question-delete procedure, and the user row last. Votes,
    /// follows, badges, group memberships and comments fall to FK cascade.
    pub async fn delete_user(&self, acting: &ActingUser, user_id: i64) -> Result<(), ForumError> {
        Self::require_admin(acting)?;
        if acting.id == user_id {
            return Err(ForumError::forbidden("cannot delete yourself"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("delete_user", e))?;

        let user = self.user_store.get(&txn, user_id).await?;

        self.notification_store.delete_by_user(&txn, user_id).await?;
        self.activity_log_store.delete_by_user(&txn, user_id).await?;
        self.message_store.delete_for_user(&txn, user_id).await?;
        self.report_store.delete_by_reporter(&txn, user_id).await?;
        self.report_store.clear_resolver(&txn, user_id).await?;

        // answers on other people's questions: each goes through the answer
        // delete procedure so answer_count stays consistent
        let answers = self.answer_store.find_by_author(&txn, user_id).await?;
        for answer in &answers {
            self.answer_service.delete_within(&txn, answer).await?;
        }

        let questions = self.question_store.find_by_author(&txn, user_id).await?;
        let question_count = questions.len();
        for question in &questions {
            self.question_service.delete_within(&txn, question).await?;
        }

        self.user_store.delete_by_id(&txn, user_id).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("delete_user", e))?;

        tracing::info!(
            user_id,
            username = %user.username,
            answers = answers.len(),
            questions = question_count,
            by = acting.id,
            "user deleted with owned content"
        );
        self.activity
            .record(acting.id, "user.delete", Some("user"), Some(user_id), Some(user.username))
            .await;
        Ok(())
    }

    // ---- system settings ----

    pub async fn get_setting(
        &self,
        acting: &ActingUser,
        key: &str,
    ) -> Result<Option<system_setting::Model>, ForumError> {
        Self::require_staff(acting)?;
        self.settings_store.get(&self.db, key).await
    }

    pub async fn set_setting(
        &self,
        acting: &ActingUser,
        key: &str,
        value: String,
        description: Option<String>,
        category: Option<String>,
    ) -> Result<system_setting::Model, ForumError> {
        Self::require_staff(acting)?;
        let saved = self
            .settings_store
            .set(&self.db, key, value, description, category)
            .await?;
        self.activity
            .record(acting.id, "settings.set", None, None, Some(key.to_string()))
            .await;
        Ok(saved)
    }

    pub async fn list_settings(
        &self,
        acting: &ActingUser,
    ) -> Result<Vec<system_setting::Model>, ForumError> {
        Self::require_staff(acting)?;
        self.settings_store.find_all(&self.db).await
    }

    pub async fn delete_setting(&self, acting: &ActingUser, key: &str) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        if self.settings_store.get(&self.db, key).await?.is_none() {
            return Err(ForumError::not_found("setting", key));
        }
        self.settings_store.delete(&self.db, key).await
    }
}
