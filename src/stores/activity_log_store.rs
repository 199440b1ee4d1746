use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::ForumError;
use crate::types::db::activity_log::{self, Entity as ActivityLog};

pub struct ActivityLogStore;

impl ActivityLogStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn append<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        action: &str,
        entity_type: Option<&str>,
        entity_id: Option<i64>,
        details: Option<String>,
    ) -> Result<(), ForumError> {
        let model = activity_log::ActiveModel {
            user_id: Set(user_id),
            action: Set(action.to_string()),
            entity_type: Set(entity_type.map(str::to_string)),
            entity_id: Set(entity_id),
            details: Set(details),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("append_activity_log", e))?;
        Ok(())
    }

    pub async fn page_by_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<activity_log::Model>, u64), ForumError> {
        let paginator = ActivityLog::find()
            .filter(activity_log::Column::UserId.eq(user_id))
            .order_by_desc(activity_log::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_activity_by_user", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_activity_by_user", e))?;
        Ok((items, total))
    }

    pub async fn page_all<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<activity_log::Model>, u64), ForumError> {
        let paginator = ActivityLog::find()
            .order_by_desc(activity_log::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_activity", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_activity", e))?;
        Ok((items, total))
    }

    pub async fn delete_by_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<u64, ForumError> {
        let result = ActivityLog::delete_many()
            .filter(activity_log::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_activity_by_user", e))?;
        Ok(result.rows_affected)
    }
}
