use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::{ActivityLogService, NotificationService};
use crate::stores::{CommentStore, QuestionStore};
use crate::types::db::{comment, question};
use crate::types::internal::ActingUser;

/// The moderation gate for user-authored content. Staff (ADMIN or MANAGER)
/// review pending items and flip the approval flag; the flag itself is the
/// whole audit state, with the activity log as a best-effort side record.
pub struct ModerationService {
    db: DatabaseConnection,
    question_store: Arc<QuestionStore>,
    comment_store: Arc<CommentStore>,
    notifications: Arc<NotificationService>,
    activity: Arc<ActivityLogService>,
}

impl ModerationService {
    pub fn new(
        db: DatabaseConnection,
        question_store: Arc<QuestionStore>,
        comment_store: Arc<CommentStore>,
        notifications: Arc<NotificationService>,
        activity: Arc<ActivityLogService>,
    ) -> Self {
        Self {
            db,
            question_store,
            comment_store,
            notifications,
            activity,
        }
    }

    fn require_staff(acting: &ActingUser) -> Result<(), ForumError> {
        if acting.is_staff() {
            Ok(())
        } else {
            Err(ForumError::forbidden("moderation requires ADMIN or MANAGER role"))
        }
    }

    // ---- questions ----

    pub async fn pending_questions(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        Self::require_staff(acting)?;
        self.question_store.page_by_approved(&self.db, false, page, per_page).await
    }

    pub async fn approved_questions(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        Self::require_staff(acting)?;
        self.question_store.page_by_approved(&self.db, true, page, per_page).await
    }

    pub async fn count_pending_questions(&self) -> Result<u64, ForumError> {
        self.question_store.count_by_approved(&self.db, false).await
    }

    pub async fn count_approved_questions(&self) -> Result<u64, ForumError> {
        self.question_store.count_by_approved(&self.db, true).await
    }

    pub async fn approve_question(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        let question = self.question_store.get(&self.db, id).await?;
        let author_id = question.author_id;
        let title = question.title.clone();

        let mut model: question::ActiveModel = question.into();
        model.is_approved = Set(true);
        model.updated_at = Set(Utc::now());
        self.question_store.update(&self.db, model).await?;

        self.notifications
            .notify(author_id, format!("Your question was approved: {title}"), "moderation")
            .await;
        self.activity
            .record(acting.id, "question.approve", Some("question"), Some(id), None)
            .await;
        Ok(())
    }

    pub async fn reject_question(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        let question = self.question_store.get(&self.db, id).await?;
        let mut model: question::ActiveModel = question.into();
        model.is_approved = Set(false);
        model.updated_at = Set(Utc::now());
        self.question_store.update(&self.db, model).await?;

        self.activity
            .record(acting.id, "question.reject", Some("question"), Some(id), None)
            .await;
        Ok(())
    }

    // ---- comments ----

    pub async fn pending_comments(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        Self::require_staff(acting)?;
        self.comment_store.page_by_approved(&self.db, false, page, per_page).await
    }

    pub async fn approved_comments(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        Self::require_staff(acting)?;
        self.comment_store.page_by_approved(&self.db, true, page, per_page).await
    }

    pub async fn deleted_comments(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        Self::require_staff(acting)?;
        self.comment_store.page_deleted(&self.db, page, per_page).await
    }

    pub async fn count_pending_comments(&self) -> Result<u64, ForumError> {
        self.comment_store.count_by_approved(&self.db, false).await
    }

    pub async fn count_approved_comments(&self) -> Result<u64, ForumError> {
        self.comment_store.count_by_approved(&self.db, true).await
    }

    pub async fn approve_comment(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        let comment = self.comment_store.get(&self.db, id).await?;
        let mut model: comment::ActiveModel = comment.into();
        model.is_approved = Set(true);
        model.updated_at = Set(Utc::now());
        self.comment_store.update(&self.db, model).await?;

        self.activity
            .record(acting.id, "comment.approve", Some("comment"), Some(id), None)
            .await;
        Ok(())
    }

    pub async fn reject_comment(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        Self::require_staff(acting)?;
        let comment = self.comment_store.get(&self.db, id).await?;
        let mut model: comment::ActiveModel = comment.into();
        model.is_approved = Set(false);
        model.updated_at = Set(Utc::now());
        self.comment_store.update(&self.db, model).await?;

        self.activity
            .record(acting.id, "comment.reject", Some("comment"), Some(id), None)
            .await;
        Ok(())
    }
}
