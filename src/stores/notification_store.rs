use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::ForumError;
use crate::types::db::notification::{self, Entity as Notification};

pub struct NotificationStore;

impl NotificationStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<notification::Model, ForumError> {
        Notification::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_notification_by_id", e))?
            .ok_or_else(|| ForumError::not_found("notification", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        message: String,
        kind: String,
    ) -> Result<notification::Model, ForumError> {
        let model = notification::ActiveModel {
            user_id: Set(user_id),
            message: Set(message),
            kind: Set(kind),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_notification", e))
    }

    pub async fn find_by_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<notification::Model>, ForumError> {
        Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .order_by_desc(notification::Column::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_notifications_by_user", e))
    }

    pub async fn find_unread_by_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<notification::Model>, ForumError> {
        Notification::find()
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .order_by_desc(notification::Column::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_unread_notifications", e))
    }

    pub async fn mark_read<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        let notification = self.get(conn, id).await?;
        let mut model: notification::ActiveModel = notification.into();
        model.is_read = Set(true);
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("mark_notification_read", e))?;
        Ok(())
    }

    pub async fn mark_all_read<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<u64, ForumError> {
        use sea_orm::sea_query::Expr;
        let result = Notification::update_many()
            .col_expr(notification::Column::IsRead, Expr::value(true))
            .filter(notification::Column::UserId.eq(user_id))
            .filter(notification::Column::IsRead.eq(false))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("mark_all_notifications_read", e))?;
        Ok(result.rows_affected)
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        Notification::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_notification", e))?;
        Ok(())
    }

    pub async fn delete_by_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<u64, ForumError> {
        let result = Notification::delete_many()
            .filter(notification::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_notifications_by_user", e))?;
        Ok(result.rows_affected)
    }

    pub async fn page_all<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<notification::Model>, u64), ForumError> {
        let paginator = Notification::find()
            .order_by_desc(notification::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_notifications", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_notifications", e))?;
        Ok((items, total))
    }

    pub async fn count_all<C: ConnectionTrait>(&self, conn: &C) -> Result<u64, ForumError> {
        Notification::find()
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_notifications", e))
    }

    pub async fn count_unread<C: ConnectionTrait>(&self, conn: &C) -> Result<u64, ForumError> {
        Notification::find()
            .filter(notification::Column::IsRead.eq(false))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_unread_notifications", e))
    }
}
