use chrono::Utc;
use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::NotificationService;
use crate::stores::{AnswerStore, CommentStore, QuestionStore};
use crate::types::db::comment;
use crate::types::internal::ActingUser;

const MAX_COMMENT_CHARS: usize = 600;

/// What a comment attaches to: exactly one of a question or an answer.
#[derive(Debug, Clone, Copy)]
pub enum CommentTarget {
    Question(i64),
    Answer(i64),
}

/// Comments are not moderation-gated on creation (is_approved defaults to
/// true); soft delete hides a comment without removing the row.
pub struct CommentService {
    db: DatabaseConnection,
    comment_store: Arc<CommentStore>,
    question_store: Arc<QuestionStore>,
    answer_store: Arc<AnswerStore>,
    notifications: Arc<NotificationService>,
}

impl CommentService {
    pub fn new(
        db: DatabaseConnection,
        comment_store: Arc<CommentStore>,
        question_store: Arc<QuestionStore>,
        answer_store: Arc<AnswerStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            db,
            comment_store,
            question_store,
            answer_store,
            notifications,
        }
    }

    pub async fn create(
        &self,
        acting: &ActingUser,
        target: CommentTarget,
        body: String,
    ) -> Result<comment::Model, ForumError> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(ForumError::validation("comment body must not be empty"));
        }
        if body.chars().count() > MAX_COMMENT_CHARS {
            return Err(ForumError::validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("create_comment", e))?;

        // resolve the target and remember whom to notify
        let (question_id, answer_id, content_author) = match target {
            CommentTarget::Question(id) => {
                let question = self.question_store.get(&txn, id).await?;
                (Some(question.id), None, question.author_id)
            }
            CommentTarget::Answer(id) => {
                let answer = self.answer_store.get(&txn, id).await?;
                (None, Some(answer.id), answer.author_id)
            }
        };

        let now = Utc::now();
        let model = comment::ActiveModel {
            body: Set(body),
            author_id: Set(acting.id),
            question_id: Set(question_id),
            answer_id: Set(answer_id),
            is_approved: Set(true),
            is_deleted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = self.comment_store.insert(&txn, model).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("create_comment", e))?;

        if content_author != acting.id {
            self.notifications
                .notify(content_author, "New comment on your post", "comment")
                .await;
        }

        Ok(saved)
    }

    pub async fn get(&self, id: i64) -> Result<comment::Model, ForumError> {
        self.comment_store.get(&self.db, id).await
    }

    pub async fn comments_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<comment::Model>, ForumError> {
        self.comment_store.find_by_question(&self.db, question_id).await
    }

    pub async fn comments_for_answer(
        &self,
        answer_id: i64,
    ) -> Result<Vec<comment::Model>, ForumError> {
        self.comment_store.find_by_answer(&self.db, answer_id).await
    }

    pub async fn update(
        &self,
        acting: &ActingUser,
        id: i64,
        body: String,
    ) -> Result<comment::Model, ForumError> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(ForumError::validation("comment body must not be empty"));
        }
        if body.chars().count() > MAX_COMMENT_CHARS {
            return Err(ForumError::validation(format!(
                "comment must be at most {MAX_COMMENT_CHARS} characters"
            )));
        }
        let comment = self.comment_store.get(&self.db, id).await?;
        if !acting.can_modify(comment.author_id) {
            return Err(ForumError::forbidden("only the author or staff may edit a comment"));
        }
        let mut model: comment::ActiveModel = comment.into();
        model.body = Set(body);
        model.updated_at = Set(Utc::now());
        self.comment_store.update(&self.db, model).await
    }

    /// Hide a comment without removing the row
    pub async fn soft_delete(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let comment = self.comment_store.get(&self.db, id).await?;
        if !acting.can_modify(comment.author_id) {
            return Err(ForumError::forbidden(
                "only the author or staff may delete a comment",
            ));
        }
        let mut model: comment::ActiveModel = comment.into();
        model.is_deleted = Set(true);
        model.updated_at = Set(Utc::now());
        self.comment_store.update(&self.db, model).await?;
        Ok(())
    }

    /// Permanently remove a comment row (admin panel)
    pub async fn delete(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        self.comment_store.get(&self.db, id).await?;
        self.comment_store.delete_by_id(&self.db, id).await
    }

    // ---- admin panel ----

    pub async fn page_all(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        self.comment_store.page_all(&self.db, page, per_page).await
    }

    pub async fn search(
        &self,
        acting: &ActingUser,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        self.comment_store.search(&self.db, keyword, page, per_page).await
    }

    pub async fn count_all(&self) -> Result<u64, ForumError> {
        self.comment_store.count_all(&self.db).await
    }
}
