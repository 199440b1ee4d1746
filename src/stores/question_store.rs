use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::errors::ForumError;
use crate::types::db::question::{self, Entity as Question};
use crate::types::db::question_tag;

pub struct QuestionStore;

impl QuestionStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<question::Model>, ForumError> {
        Question::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_question_by_id", e))
    }

    /// Load a question or fail with NotFound
    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<question::Model, ForumError> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| ForumError::not_found("question", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: question::ActiveModel,
    ) -> Result<question::Model, ForumError> {
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_question", e))
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: question::ActiveModel,
    ) -> Result<question::Model, ForumError> {
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("update_question", e))
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        Question::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_question", e))?;
        Ok(())
    }

    pub async fn page_newest<C: ConnectionTrait>(
        &self,
        conn: &C,
        approved_only: bool,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        let mut query = Question::find().order_by_desc(question::Column::CreatedAt);
        if approved_only {
            query = query.filter(question::Column::IsApproved.eq(true));
        }
        let paginator = query.paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_questions", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_questions", e))?;
        Ok((items, total))
    }

    pub async fn page_by_votes<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        let paginator = Question::find()
            .filter(question::Column::IsApproved.eq(true))
            .order_by_desc(question::Column::Votes)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_questions_by_votes", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_questions_by_votes", e))?;
        Ok((items, total))
    }

    pub async fn page_by_author<C: ConnectionTrait>(
        &self,
        conn: &C,
        author_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        let paginator = Question::find()
            .filter(question::Column::AuthorId.eq(author_id))
            .order_by_desc(question::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_questions_by_author", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_questions_by_author", e))?;
        Ok((items, total))
    }

    pub async fn page_by_tag<C: ConnectionTrait>(
        &self,
        conn: &C,
        tag_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        let paginator = Question::find()
            .inner_join(question_tag::Entity)
            .filter(question_tag::Column::TagId.eq(tag_id))
            .filter(question::Column::IsApproved.eq(true))
            .order_by_desc(question::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_questions_by_tag", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_questions_by_tag", e))?;
        Ok((items, total))
    }

    /// Substring search over title and body, approved questions only
    pub async fn search<C: ConnectionTrait>(
        &self,
        conn: &C,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        let paginator = Question::find()
            .filter(question::Column::IsApproved.eq(true))
            .filter(
                Condition::any()
                    .add(question::Column::Title.contains(keyword))
                    .add(question::Column::Body.contains(keyword)),
            )
            .order_by_desc(question::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("search_questions", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("search_questions", e))?;
        Ok((items, total))
    }

    pub async fn page_by_approved<C: ConnectionTrait>(
        &self,
        conn: &C,
        approved: bool,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        let paginator = Question::find()
            .filter(question::Column::IsApproved.eq(approved))
            .order_by_desc(question::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_questions_by_approved", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_questions_by_approved", e))?;
        Ok((items, total))
    }

    pub async fn count_by_approved<C: ConnectionTrait>(
        &self,
        conn: &C,
        approved: bool,
    ) -> Result<u64, ForumError> {
        Question::find()
            .filter(question::Column::IsApproved.eq(approved))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_questions_by_approved", e))
    }

    pub async fn count_by_author<C: ConnectionTrait>(
        &self,
        conn: &C,
        author_id: i64,
    ) -> Result<u64, ForumError> {
        Question::find()
            .filter(question::Column::AuthorId.eq(author_id))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_questions_by_author", e))
    }

    pub async fn find_by_author<C: ConnectionTrait>(
        &self,
        conn: &C,
        author_id: i64,
    ) -> Result<Vec<question::Model>, ForumError> {
        Question::find()
            .filter(question::Column::AuthorId.eq(author_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_questions_by_author", e))
    }

    /// Atomic view counter bump; no clamp needed, views only grow
    pub async fn increment_views<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        Question::update_many()
            .col_expr(
                question::Column::Views,
                Expr::col(question::Column::Views).add(1),
            )
            .filter(question::Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("increment_question_views", e))?;
        Ok(())
    }

    /// Atomic vote counter adjustment. Callers only invoke this together
    /// with a successful membership change, inside the same transaction.
    pub async fn adjust_votes<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        delta: i32,
    ) -> Result<(), ForumError> {
        Question::update_many()
            .col_expr(
                question::Column::Votes,
                Expr::col(question::Column::Votes).add(delta),
            )
            .filter(question::Column::Id.eq(id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("adjust_question_votes", e))?;
        Ok(())
    }

    /// The single mutation point for the denormalized answer_count,
    /// clamped at zero on decrement.
    pub async fn bump_answer_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
        delta: i32,
    ) -> Result<(), ForumError> {
        let question = self.get(conn, id).await?;
        let next = (question.answer_count + delta).max(0);
        let mut model: question::ActiveModel = question.into();
        model.answer_count = Set(next);
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("bump_answer_count", e))?;
        Ok(())
    }
}
