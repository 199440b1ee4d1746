use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

use crate::errors::ForumError;
use crate::types::db::message::{self, Entity as Message};

pub struct MessageStore;

impl MessageStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<message::Model, ForumError> {
        Message::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_message_by_id", e))?
            .ok_or_else(|| ForumError::not_found("message", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        sender_id: i64,
        receiver_id: i64,
        subject: String,
        body: String,
    ) -> Result<message::Model, ForumError> {
        let model = message::ActiveModel {
            sender_id: Set(sender_id),
            receiver_id: Set(receiver_id),
            subject: Set(subject),
            body: Set(body),
            is_read: Set(false),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_message", e))
    }

    pub async fn page_received<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<message::Model>, u64), ForumError> {
        let paginator = Message::find()
            .filter(message::Column::ReceiverId.eq(user_id))
            .order_by_desc(message::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_received_messages", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_received_messages", e))?;
        Ok((items, total))
    }

    pub async fn page_sent<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<message::Model>, u64), ForumError> {
        let paginator = Message::find()
            .filter(message::Column::SenderId.eq(user_id))
            .order_by_desc(message::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_sent_messages", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_sent_messages", e))?;
        Ok((items, total))
    }

    pub async fn find_unread<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<message::Model>, ForumError> {
        Message::find()
            .filter(message::Column::ReceiverId.eq(user_id))
            .filter(message::Column::IsRead.eq(false))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_unread_messages", e))
    }

    pub async fn count_unread<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<u64, ForumError> {
        Message::find()
            .filter(message::Column::ReceiverId.eq(user_id))
            .filter(message::Column::IsRead.eq(false))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_unread_messages", e))
    }

    pub async fn mark_read<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        let message = self.get(conn, id).await?;
        let mut model: message::ActiveModel = message.into();
        model.is_read = Set(true);
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("mark_message_read", e))?;
        Ok(())
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        Message::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_message", e))?;
        Ok(())
    }

    /// Delete every message the user sent or received
    pub async fn delete_for_user<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<u64, ForumError> {
        let result = Message::delete_many()
            .filter(
                Condition::any()
                    .add(message::Column::SenderId.eq(user_id))
                    .add(message::Column::ReceiverId.eq(user_id)),
            )
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_messages_for_user", e))?;
        Ok(result.rows_affected)
    }
}
