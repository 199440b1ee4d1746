use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::NotificationService;
use crate::stores::{MessageStore, UserStore};
use crate::types::db::message;
use crate::types::internal::ActingUser;

/// Private messages between users.
pub struct MessageService {
    db: DatabaseConnection,
    message_store: Arc<MessageStore>,
    user_store: Arc<UserStore>,
    notifications: Arc<NotificationService>,
}

impl MessageService {
    pub fn new(
        db: DatabaseConnection,
        message_store: Arc<MessageStore>,
        user_store: Arc<UserStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            db,
            message_store,
            user_store,
            notifications,
        }
    }

    pub async fn send(
        &self,
        acting: &ActingUser,
        receiver_id: i64,
        subject: String,
        body: String,
    ) -> Result<message::Model, ForumError> {
        if body.trim().is_empty() {
            return Err(ForumError::validation("message body must not be empty"));
        }
        let receiver = self.user_store.get(&self.db, receiver_id).await?;
        let sender = self.user_store.get(&self.db, acting.id).await?;

        let saved = self
            .message_store
            .insert(&self.db, sender.id, receiver.id, subject, body)
            .await?;

        self.notifications
            .notify(
                receiver.id,
                format!("New message from {}", sender.username),
                "message",
            )
            .await;

        Ok(saved)
    }

    /// Fetch one message; only the participants or staff may read it.
    pub async fn get(&self, acting: &ActingUser, id: i64) -> Result<message::Model, ForumError> {
        let message = self.message_store.get(&self.db, id).await?;
        if message.sender_id != acting.id && message.receiver_id != acting.id && !acting.is_staff()
        {
            return Err(ForumError::forbidden("not a participant of this message"));
        }
        Ok(message)
    }

    pub async fn inbox(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<message::Model>, u64), ForumError> {
        self.message_store
            .page_received(&self.db, acting.id, page, per_page)
            .await
    }

    pub async fn outbox(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<message::Model>, u64), ForumError> {
        self.message_store.page_sent(&self.db, acting.id, page, per_page).await
    }

    pub async fn unread(&self, acting: &ActingUser) -> Result<Vec<message::Model>, ForumError> {
        self.message_store.find_unread(&self.db, acting.id).await
    }

    pub async fn count_unread(&self, acting: &ActingUser) -> Result<u64, ForumError> {
        self.message_store.count_unread(&self.db, acting.id).await
    }

    /// Only the receiver marks a message read
    pub async fn mark_read(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let message = self.message_store.get(&self.db, id).await?;
        if message.receiver_id != acting.id {
            return Err(ForumError::forbidden("only the receiver can mark a message read"));
        }
        self.message_store.mark_read(&self.db, id).await
    }

    pub async fn delete(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let message = self.message_store.get(&self.db, id).await?;
        if message.sender_id != acting.id && message.receiver_id != acting.id && !acting.is_staff()
        {
            return Err(ForumError::forbidden("not a participant of this message"));
        }
        self.message_store.delete_by_id(&self.db, id).await
    }
}
