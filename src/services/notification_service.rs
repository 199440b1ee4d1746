use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::errors::ForumError;
use crate::stores::{NotificationStore, UserStore};
use crate::types::db::{notification, Role};
use crate::types::internal::ActingUser;

/// Best-effort notification fan-out. Workflow services call `send_to_user`
/// and friends AFTER their own transaction commits and log failures instead
/// of propagating them; a lost notification never fails the originating
/// operation.
pub struct NotificationService {
    db: DatabaseConnection,
    notification_store: Arc<NotificationStore>,
    user_store: Arc<UserStore>,
}

impl NotificationService {
    pub fn new(
        db: DatabaseConnection,
        notification_store: Arc<NotificationStore>,
        user_store: Arc<UserStore>,
    ) -> Self {
        Self {
            db,
            notification_store,
            user_store,
        }
    }

    pub async fn send_to_user(
        &self,
        user_id: i64,
        message: impl Into<String>,
        kind: &str,
    ) -> Result<notification::Model, ForumError> {
        self.notification_store
            .insert(&self.db, user_id, message.into(), kind.to_string())
            .await
    }

    /// Send to a user, swallowing and logging any failure. The fire-and-forget
    /// entry point used by workflow services.
    pub async fn notify(&self, user_id: i64, message: impl Into<String>, kind: &str) {
        if let Err(e) = self.send_to_user(user_id, message, kind).await {
            tracing::warn!(user_id, kind, "notification fan-out failed: {e}");
        }
    }

    pub async fn broadcast_to_all(
        &self,
        message: &str,
        kind: &str,
    ) -> Result<usize, ForumError> {
        let users = self.user_store.find_all(&self.db).await?;
        let mut count = 0;
        for user in users {
            self.send_to_user(user.id, message, kind).await?;
            count += 1;
        }
        Ok(count)
    }

    pub async fn broadcast_to_role(
        &self,
        role: Role,
        message: &str,
        kind: &str,
    ) -> Result<usize, ForumError> {
        let users = self.user_store.find_by_role(&self.db, role).await?;
        let mut count = 0;
        for user in users {
            self.send_to_user(user.id, message, kind).await?;
            count += 1;
        }
        Ok(count)
    }

    pub async fn notifications_for(
        &self,
        acting: &ActingUser,
    ) -> Result<Vec<notification::Model>, ForumError> {
        self.notification_store.find_by_user(&self.db, acting.id).await
    }

    pub async fn unread_for(
        &self,
        acting: &ActingUser,
    ) -> Result<Vec<notification::Model>, ForumError> {
        self.notification_store
            .find_unread_by_user(&self.db, acting.id)
            .await
    }

    pub async fn mark_read(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let notification = self.notification_store.get(&self.db, id).await?;
        if notification.user_id != acting.id {
            return Err(ForumError::forbidden("not your notification"));
        }
        self.notification_store.mark_read(&self.db, id).await
    }

    pub async fn mark_all_read(&self, acting: &ActingUser) -> Result<u64, ForumError> {
        self.notification_store.mark_all_read(&self.db, acting.id).await
    }

    pub async fn delete(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let notification = self.notification_store.get(&self.db, id).await?;
        if notification.user_id != acting.id && !acting.is_staff() {
            return Err(ForumError::forbidden("not your notification"));
        }
        self.notification_store.delete_by_id(&self.db, id).await
    }

    // ---- admin panel ----

    pub async fn page_all(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<notification::Model>, u64), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        self.notification_store.page_all(&self.db, page, per_page).await
    }

    pub async fn count_all(&self) -> Result<u64, ForumError> {
        self.notification_store.count_all(&self.db).await
    }

    pub async fn count_unread(&self) -> Result<u64, ForumError> {
        self.notification_store.count_unread(&self.db).await
    }
}
