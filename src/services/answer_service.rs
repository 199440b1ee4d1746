use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::{ActivityLogService, BadgeService, NotificationService};
use crate::stores::{AnswerStore, QuestionStore, UserStore};
use crate::types::db::{answer, question};
use crate::types::internal::ActingUser;

/// Answer lifecycle: creation and deletion keep the parent question's
/// denormalized answer_count in step; acceptance enforces the
/// at-most-one-accepted-answer rule by unsetting the previous winner first.
pub struct AnswerService {
    db: DatabaseConnection,
    answer_store: Arc<AnswerStore>,
    question_store: Arc<QuestionStore>,
    user_store: Arc<UserStore>,
    notifications: Arc<NotificationService>,
    activity: Arc<ActivityLogService>,
    badges: Arc<BadgeService>,
}

impl AnswerService {
    pub fn new(
        db: DatabaseConnection,
        answer_store: Arc<AnswerStore>,
        question_store: Arc<QuestionStore>,
        user_store: Arc<UserStore>,
        notifications: Arc<NotificationService>,
        activity: Arc<ActivityLogService>,
        badges: Arc<BadgeService>,
    ) -> Self {
        Self {
            db,
            answer_store,
            question_store,
            user_store,
            notifications,
            activity,
            badges,
        }
    }

    pub async fn create(
        &self,
        acting: &ActingUser,
        question_id: i64,
        body: String,
    ) -> Result<answer::Model, ForumError> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(ForumError::validation("answer body must not be empty"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("create_answer", e))?;

        let question = self.question_store.get(&txn, question_id).await?;
        let author = self.user_store.get(&txn, acting.id).await?;

        let now = Utc::now();
        let model = answer::ActiveModel {
            body: Set(body),
            author_id: Set(author.id),
            question_id: Set(question.id),
            votes: Set(0),
            is_accepted: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = self.answer_store.insert(&txn, model).await?;
        self.question_store.bump_answer_count(&txn, question.id, 1).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("create_answer", e))?;

        if question.author_id != acting.id {
            self.notifications
                .notify(
                    question.author_id,
                    format!("New answer on your question: {}", question.title),
                    "answer",
                )
                .await;
        }
        self.activity
            .record(acting.id, "answer.create", Some("answer"), Some(saved.id), None)
            .await;
        if self.answer_store.count_by_author(&self.db, acting.id).await? == 1 {
            self.badges
                .try_award(acting.id, "First Answer", "Posted a first answer")
                .await;
        }

        Ok(saved)
    }

    pub async fn get(&self, id: i64) -> Result<answer::Model, ForumError> {
        self.answer_store.get(&self.db, id).await
    }

    pub async fn answers_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<answer::Model>, ForumError> {
        self.answer_store.find_by_question(&self.db, question_id).await
    }

    pub async fn page_by_author(
        &self,
        author_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<answer::Model>, u64), ForumError> {
        self.answer_store.page_by_author(&self.db, author_id, page, per_page).await
    }

    pub async fn update(
        &self,
        acting: &ActingUser,
        id: i64,
        body: String,
    ) -> Result<answer::Model, ForumError> {
        let body = body.trim().to_string();
        if body.is_empty() {
            return Err(ForumError::validation("answer body must not be empty"));
        }
        let answer = self.answer_store.get(&self.db, id).await?;
        if !acting.can_modify(answer.author_id) {
            return Err(ForumError::forbidden("only the author or staff may edit an answer"));
        }
        let mut model: answer::ActiveModel = answer.into();
        model.body = Set(body);
        model.updated_at = Set(Utc::now());
        self.answer_store.update(&self.db, model).await
    }

    pub async fn delete(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("delete_answer", e))?;

        let answer = self.answer_store.get(&txn, id).await?;
        if !acting.can_modify(answer.author_id) {
            return Err(ForumError::forbidden(
                "only the author or staff may delete an answer",
            ));
        }
        self.delete_within(&txn, &answer).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("delete_answer", e))?;

        self.activity
            .record(acting.id, "answer.delete", Some("answer"), Some(id), None)
            .await;
        Ok(())
    }

    /// The answer-delete procedure, callable from a broader transaction.
    /// Clears the question's accepted-answer reference when the deleted
    /// answer held it, and brings answer_count back down.
    pub(crate) async fn delete_within<C: ConnectionTrait>(
        &self,
        conn: &C,
        answer: &answer::Model,
    ) -> Result<(), ForumError> {
        if answer.is_accepted {
            if let Some(question) = self.question_store.find_by_id(conn, answer.question_id).await? {
                let mut model: question::ActiveModel = question.into();
                model.accepted_answer_id = Set(None);
                self.question_store.update(conn, model).await?;
            }
        }
        self.answer_store.delete_by_id(conn, answer.id).await?;
        self.question_store
            .bump_answer_count(conn, answer.question_id, -1)
            .await?;
        Ok(())
    }

    /// Accept an answer. Only the question's author may accept; a previously
    /// accepted answer is unset first so exactly one answer holds the flag.
    pub async fn accept(&self, acting: &ActingUser, answer_id: i64) -> Result<(), ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("accept_answer", e))?;

        let answer = self.answer_store.get(&txn, answer_id).await?;
        let question = self.question_store.get(&txn, answer.question_id).await?;
        if question.author_id != acting.id {
            return Err(ForumError::forbidden(
                "only the question author can accept an answer",
            ));
        }

        if let Some(previous_id) = question.accepted_answer_id {
            if previous_id == answer.id {
                // already accepted; nothing to change
                txn.commit()
                    .await
                    .map_err(|e| ForumError::transaction("accept_answer", e))?;
                return Ok(());
            }
            self.answer_store.set_accepted(&txn, previous_id, false).await?;
        }

        self.answer_store.set_accepted(&txn, answer.id, true).await?;
        let mut model: question::ActiveModel = question.into();
        model.accepted_answer_id = Set(Some(answer.id));
        model.updated_at = Set(Utc::now());
        self.question_store.update(&txn, model).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("accept_answer", e))?;

        if answer.author_id != acting.id {
            self.notifications
                .notify(answer.author_id, "Your answer was accepted", "accept")
                .await;
        }
        self.badges
            .try_award(answer.author_id, "Accepted", "Had an answer accepted")
            .await;
        self.activity
            .record(acting.id, "answer.accept", Some("answer"), Some(answer_id), None)
            .await;
        Ok(())
    }
}
