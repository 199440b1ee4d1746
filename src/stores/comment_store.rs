use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::errors::ForumError;
use crate::types::db::comment::{self, Entity as Comment};

pub struct CommentStore;

impl CommentStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<comment::Model>, ForumError> {
        Comment::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_comment_by_id", e))
    }

    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<comment::Model, ForumError> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| ForumError::not_found("comment", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: comment::ActiveModel,
    ) -> Result<comment::Model, ForumError> {
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_comment", e))
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: comment::ActiveModel,
    ) -> Result<comment::Model, ForumError> {
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("update_comment", e))
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        Comment::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_comment", e))?;
        Ok(())
    }

    /// Visible comments on a question, oldest first
    pub async fn find_by_question<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
    ) -> Result<Vec<comment::Model>, ForumError> {
        Comment::find()
            .filter(comment::Column::QuestionId.eq(question_id))
            .filter(comment::Column::IsDeleted.eq(false))
            .order_by_asc(comment::Column::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_comments_by_question", e))
    }

    pub async fn find_by_answer<C: ConnectionTrait>(
        &self,
        conn: &C,
        answer_id: i64,
    ) -> Result<Vec<comment::Model>, ForumError> {
        Comment::find()
            .filter(comment::Column::AnswerId.eq(answer_id))
            .filter(comment::Column::IsDeleted.eq(false))
            .order_by_asc(comment::Column::CreatedAt)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_comments_by_answer", e))
    }

    pub async fn page_all<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        let paginator = Comment::find()
            .order_by_desc(comment::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_comments", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_comments", e))?;
        Ok((items, total))
    }

    pub async fn search<C: ConnectionTrait>(
        &self,
        conn: &C,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        let paginator = Comment::find()
            .filter(comment::Column::Body.contains(keyword))
            .order_by_desc(comment::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("search_comments", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("search_comments", e))?;
        Ok((items, total))
    }

    pub async fn page_by_approved<C: ConnectionTrait>(
        &self,
        conn: &C,
        approved: bool,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        let paginator = Comment::find()
            .filter(comment::Column::IsApproved.eq(approved))
            .filter(comment::Column::IsDeleted.eq(false))
            .order_by_desc(comment::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_comments_by_approved", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_comments_by_approved", e))?;
        Ok((items, total))
    }

    pub async fn page_deleted<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<comment::Model>, u64), ForumError> {
        let paginator = Comment::find()
            .filter(comment::Column::IsDeleted.eq(true))
            .order_by_desc(comment::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_deleted_comments", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_deleted_comments", e))?;
        Ok((items, total))
    }

    pub async fn count_by_approved<C: ConnectionTrait>(
        &self,
        conn: &C,
        approved: bool,
    ) -> Result<u64, ForumError> {
        Comment::find()
            .filter(comment::Column::IsApproved.eq(approved))
            .filter(comment::Column::IsDeleted.eq(false))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_comments_by_approved", e))
    }

    pub async fn count_all<C: ConnectionTrait>(&self, conn: &C) -> Result<u64, ForumError> {
        Comment::find()
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_comments", e))
    }
}
