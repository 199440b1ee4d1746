use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::ForumError;
use crate::types::db::question_tag::{self, Entity as QuestionTag};
use crate::types::db::tag::{self, Entity as Tag};

pub struct TagStore;

impl TagStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<tag::Model>, ForumError> {
        Tag::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_tag_by_id", e))
    }

    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<tag::Model, ForumError> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| ForumError::not_found("tag", id))
    }

    pub async fn find_by_name<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Option<tag::Model>, ForumError> {
        Tag::find()
            .filter(tag::Column::Name.eq(name))
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_tag_by_name", e))
    }

    /// Create a tag with a zeroed question counter
    pub async fn create<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: String,
    ) -> Result<tag::Model, ForumError> {
        let model = tag::ActiveModel {
            name: Set(name),
            question_count: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_tag", e))
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        Tag::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_tag", e))?;
        Ok(())
    }

    pub async fn page_by_name<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<tag::Model>, u64), ForumError> {
        let paginator = Tag::find()
            .order_by_asc(tag::Column::Name)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_tags_by_name", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_tags_by_name", e))?;
        Ok((items, total))
    }

    pub async fn page_by_popularity<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<tag::Model>, u64), ForumError> {
        let paginator = Tag::find()
            .order_by_desc(tag::Column::QuestionCount)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_tags_by_popularity", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_tags_by_popularity", e))?;
        Ok((items, total))
    }

    pub async fn search<C: ConnectionTrait>(
        &self,
        conn: &C,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<tag::Model>, u64), ForumError> {
        let paginator = Tag::find()
            .filter(tag::Column::Name.contains(keyword))
            .order_by_asc(tag::Column::Name)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("search_tags", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("search_tags", e))?;
        Ok((items, total))
    }

    /// The single mutation point for the denormalized question_count,
    /// clamped at zero on decrement.
    pub async fn bump_question_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        tag_id: i64,
        delta: i32,
    ) -> Result<(), ForumError> {
        let tag = self.get(conn, tag_id).await?;
        let next = (tag.question_count + delta).max(0);
        let mut model: tag::ActiveModel = tag.into();
        model.question_count = Set(next);
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("bump_tag_question_count", e))?;
        Ok(())
    }

    pub async fn set_question_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        tag_id: i64,
        count: i32,
    ) -> Result<(), ForumError> {
        Tag::update_many()
            .col_expr(tag::Column::QuestionCount, Expr::value(count.max(0)))
            .filter(tag::Column::Id.eq(tag_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("set_tag_question_count", e))?;
        Ok(())
    }

    // ---- question_tags join table ----

    pub async fn link<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
        tag_id: i64,
    ) -> Result<(), ForumError> {
        let model = question_tag::ActiveModel {
            question_id: Set(question_id),
            tag_id: Set(tag_id),
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("link_question_tag", e))?;
        Ok(())
    }

    pub async fn link_exists<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
        tag_id: i64,
    ) -> Result<bool, ForumError> {
        let count = QuestionTag::find()
            .filter(question_tag::Column::QuestionId.eq(question_id))
            .filter(question_tag::Column::TagId.eq(tag_id))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("link_exists", e))?;
        Ok(count > 0)
    }

    pub async fn links_for_question<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
    ) -> Result<Vec<question_tag::Model>, ForumError> {
        QuestionTag::find()
            .filter(question_tag::Column::QuestionId.eq(question_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("links_for_question", e))
    }

    /// The tag rows attached to a question
    pub async fn tags_for_question<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
    ) -> Result<Vec<tag::Model>, ForumError> {
        let links = self.links_for_question(conn, question_id).await?;
        let ids: Vec<i64> = links.into_iter().map(|l| l.tag_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        Tag::find()
            .filter(tag::Column::Id.is_in(ids))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("tags_for_question", e))
    }

    pub async fn links_for_tag<C: ConnectionTrait>(
        &self,
        conn: &C,
        tag_id: i64,
    ) -> Result<Vec<question_tag::Model>, ForumError> {
        QuestionTag::find()
            .filter(question_tag::Column::TagId.eq(tag_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("links_for_tag", e))
    }

    pub async fn unlink<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
        tag_id: i64,
    ) -> Result<(), ForumError> {
        QuestionTag::delete_many()
            .filter(question_tag::Column::QuestionId.eq(question_id))
            .filter(question_tag::Column::TagId.eq(tag_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("unlink_question_tag", e))?;
        Ok(())
    }

    /// Remove every tag association of a question. Runs before the question
    /// row itself is deleted.
    pub async fn unlink_all_for_question<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
    ) -> Result<u64, ForumError> {
        let result = QuestionTag::delete_many()
            .filter(question_tag::Column::QuestionId.eq(question_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("unlink_all_for_question", e))?;
        Ok(result.rows_affected)
    }

    /// Re-point one link from a source tag to a target tag
    pub async fn repoint_link<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
        source_tag_id: i64,
        target_tag_id: i64,
    ) -> Result<(), ForumError> {
        QuestionTag::update_many()
            .col_expr(question_tag::Column::TagId, Expr::value(target_tag_id))
            .filter(question_tag::Column::QuestionId.eq(question_id))
            .filter(question_tag::Column::TagId.eq(source_tag_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("repoint_link", e))?;
        Ok(())
    }
}
