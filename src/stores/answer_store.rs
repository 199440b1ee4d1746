use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::ForumError;
use crate::types::db::answer::{self, Entity as Answer};

pub struct AnswerStore;

impl AnswerStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<answer::Model>, ForumError> {
        Answer::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_answer_by_id", e))
    }

    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<answer::Model, ForumError> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| ForumError::not_found("answer", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: answer::ActiveModel,
    ) -> Result<answer::Model, ForumError> {
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_answer", e))
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: answer::ActiveModel,
    ) -> Result<answer::Model, ForumError> {
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("update_answer", e))
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        Answer::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_answer", e))?;
        Ok(())
    }

    /// Answers of a question, best-voted first, newest breaking ties
    pub async fn find_by_question<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
    ) -> Result<Vec<answer::Model>, ForumError> {
        Answer::find()
            .filter(answer::Column::QuestionId.eq(question_id))
            .order_by_desc(answer::Column::Votes)
            .order_by_desc(answer::Column::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_answers_by_question", e))
    }

    pub async fn find_by_author<C: ConnectionTrait>(
        &self,
        conn: &C,
        author_id: i64,
    ) -> Result<Vec<answer::Model>, ForumError> {
        Answer::find()
            .filter(answer::Column::AuthorId.eq(author_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_answers_by_author", e))
    }

    pub async fn page_by_author<C: ConnectionTrait>(
        &self,
        conn: &C,
        author_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<answer::Model>, u64), ForumError> {
        let paginator = Answer::find()
            .filter(answer::Column::AuthorId.eq(author_id))
            .order_by_desc(answer::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_answers_by_author", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_answers_by_author", e))?;
        Ok((items, total))
    }

    pub async fn count_by_author<C: ConnectionTrait>(
        &self,
        conn: &C,
        author_id: i64,
    ) -> Result<u64, ForumError> {
        Answer::find()
            .filter(answer::Column::AuthorId.eq(author_id))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_answers_by_author", e))
    }

    pub async fn adjust_votes<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        delta: i32,
    ) -> Result<(), ForumError> {
        Answer::update_many()
            .col_expr(
                answer::Column::Votes,
                Expr::col(answer::Column::Votes).add(delta),
            )
            .filter(answer::Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("adjust_answer_votes", e))?;
        Ok(())
    }

    pub async fn set_accepted<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        accepted: bool,
    ) -> Result<(), ForumError> {
        let answer = self.get(conn, id).await?;
        let mut model: answer::ActiveModel = answer.into();
        model.is_accepted = Set(accepted);
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("set_answer_accepted", e))?;
        Ok(())
    }
}
