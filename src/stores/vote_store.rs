use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set, SqlErr,
};

use crate::errors::ForumError;
use crate::types::db::answer_vote::{self, Entity as AnswerVote};
use crate::types::db::question_vote::{self, Entity as QuestionVote};

/// Membership ledger for votes. A row per (user, item) pair; the composite
/// primary key closes the duplicate-vote race at write time, so insertion
/// is attempted first and a unique-key violation reports "already voted"
/// instead of relying on a check-then-act read.
pub struct VoteStore;

impl VoteStore {
    pub fn new() -> Self {
        Self
    }

    /// Record a question vote. Returns false when the membership already
    /// existed (either observed or lost the insert race).
    pub async fn insert_question_vote<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        question_id: i64,
    ) -> Result<bool, ForumError> {
        let model = question_vote::ActiveModel {
            user_id: Set(user_id),
            question_id: Set(question_id),
            created_at: Set(Utc::now()),
        };
        match model.insert(conn).await {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(false),
            Err(e) => Err(ForumError::database("insert_question_vote", e)),
        }
    }

    /// Remove a question vote. Returns false when no membership existed.
    pub async fn delete_question_vote<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        question_id: i64,
    ) -> Result<bool, ForumError> {
        let result = QuestionVote::delete_many()
            .filter(question_vote::Column::UserId.eq(user_id))
            .filter(question_vote::Column::QuestionId.eq(question_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_question_vote", e))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn has_question_vote<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        question_id: i64,
    ) -> Result<bool, ForumError> {
        let count = QuestionVote::find()
            .filter(question_vote::Column::UserId.eq(user_id))
            .filter(question_vote::Column::QuestionId.eq(question_id))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("has_question_vote", e))?;
        Ok(count > 0)
    }

    pub async fn insert_answer_vote<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        answer_id: i64,
    ) -> Result<bool, ForumError> {
        let model = answer_vote::ActiveModel {
            user_id: Set(user_id),
            answer_id: Set(answer_id),
            created_at: Set(Utc::now()),
        };
        match model.insert(conn).await {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(false),
            Err(e) => Err(ForumError::database("insert_answer_vote", e)),
        }
    }

    pub async fn delete_answer_vote<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        answer_id: i64,
    ) -> Result<bool, ForumError> {
        let result = AnswerVote::delete_many()
            .filter(answer_vote::Column::UserId.eq(user_id))
            .filter(answer_vote::Column::AnswerId.eq(answer_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_answer_vote", e))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn has_answer_vote<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        answer_id: i64,
    ) -> Result<bool, ForumError> {
        let count = AnswerVote::find()
            .filter(answer_vote::Column::UserId.eq(user_id))
            .filter(answer_vote::Column::AnswerId.eq(answer_id))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("has_answer_vote", e))?;
        Ok(count > 0)
    }
}
