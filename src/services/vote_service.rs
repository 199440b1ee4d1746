use sea_orm::{DatabaseConnection, TransactionTrait};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::stores::{AnswerStore, QuestionStore, VoteStore};
use crate::types::internal::ActingUser;

/// Vote ledger with membership semantics: one membership row per
/// (user, item) pair. An upvote that finds an existing membership is a
/// no-op; a downvote retracts an existing membership rather than recording
/// an independent negative vote. Membership row and item counter always
/// change together inside one transaction.
pub struct VoteService {
    db: DatabaseConnection,
    vote_store: Arc<VoteStore>,
    question_store: Arc<QuestionStore>,
    answer_store: Arc<AnswerStore>,
}

impl VoteService {
    pub fn new(
        db: DatabaseConnection,
        vote_store: Arc<VoteStore>,
        question_store: Arc<QuestionStore>,
        answer_store: Arc<AnswerStore>,
    ) -> Self {
        Self {
            db,
            vote_store,
            question_store,
            answer_store,
        }
    }

    /// Returns true when the vote was applied, false for the duplicate no-op.
    pub async fn upvote_question(
        &self,
        acting: &ActingUser,
        question_id: i64,
    ) -> Result<bool, ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("upvote_question", e))?;

        let question = self.question_store.get(&txn, question_id).await?;
        let inserted = self
            .vote_store
            .insert_question_vote(&txn, acting.id, question.id)
            .await?;
        if inserted {
            self.question_store.adjust_votes(&txn, question.id, 1).await?;
        }

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("upvote_question", e))?;
        Ok(inserted)
    }

    /// Retract a previous question vote. Returns false when there was no
    /// membership to retract.
    pub async fn downvote_question(
        &self,
        acting: &ActingUser,
        question_id: i64,
    ) -> Result<bool, ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("downvote_question", e))?;

        let question = self.question_store.get(&txn, question_id).await?;
        let removed = self
            .vote_store
            .delete_question_vote(&txn, acting.id, question.id)
            .await?;
        if removed {
            self.question_store.adjust_votes(&txn, question.id, -1).await?;
        }

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("downvote_question", e))?;
        Ok(removed)
    }

    pub async fn upvote_answer(
        &self,
        acting: &ActingUser,
        answer_id: i64,
    ) -> Result<bool, ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("upvote_answer", e))?;

        let answer = self.answer_store.get(&txn, answer_id).await?;
        let inserted = self
            .vote_store
            .insert_answer_vote(&txn, acting.id, answer.id)
            .await?;
        if inserted {
            self.answer_store.adjust_votes(&txn, answer.id, 1).await?;
        }

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("upvote_answer", e))?;
        Ok(inserted)
    }

    pub async fn downvote_answer(
        &self,
        acting: &ActingUser,
        answer_id: i64,
    ) -> Result<bool, ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("downvote_answer", e))?;

        let answer = self.answer_store.get(&txn, answer_id).await?;
        let removed = self
            .vote_store
            .delete_answer_vote(&txn, acting.id, answer.id)
            .await?;
        if removed {
            self.answer_store.adjust_votes(&txn, answer.id, -1).await?;
        }

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("downvote_answer", e))?;
        Ok(removed)
    }

    pub async fn has_voted_question(
        &self,
        acting: &ActingUser,
        question_id: i64,
    ) -> Result<bool, ForumError> {
        self.vote_store
            .has_question_vote(&self.db, acting.id, question_id)
            .await
    }

    pub async fn has_voted_answer(
        &self,
        acting: &ActingUser,
        answer_id: i64,
    ) -> Result<bool, ForumError> {
        self.vote_store
            .has_answer_vote(&self.db, acting.id, answer_id)
            .await
    }
}
