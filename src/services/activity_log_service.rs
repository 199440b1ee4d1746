use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::errors::ForumError;
use crate::stores::ActivityLogStore;
use crate::types::db::activity_log;
use crate::types::internal::ActingUser;

/// Append-only activity trail. Recording is best-effort: workflow services
/// call `record` after commit and a failed append is logged, never raised.
pub struct ActivityLogService {
    db: DatabaseConnection,
    activity_log_store: Arc<ActivityLogStore>,
}

impl ActivityLogService {
    pub fn new(db: DatabaseConnection, activity_log_store: Arc<ActivityLogStore>) -> Self {
        Self {
            db,
            activity_log_store,
        }
    }

    pub async fn record(
        &self,
        user_id: i64,
        action: &str,
        entity_type: Option<&str>,
        entity_id: Option<i64>,
        details: Option<String>,
    ) {
        if let Err(e) = self
            .activity_log_store
            .append(&self.db, user_id, action, entity_type, entity_id, details)
            .await
        {
            tracing::warn!(user_id, action, "activity log append failed: {e}");
        }
    }

    pub async fn page_for_user(
        &self,
        user_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<activity_log::Model>, u64), ForumError> {
        self.activity_log_store
            .page_by_user(&self.db, user_id, page, per_page)
            .await
    }

    pub async fn page_all(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<activity_log::Model>, u64), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        self.activity_log_store.page_all(&self.db, page, per_page).await
    }
}
