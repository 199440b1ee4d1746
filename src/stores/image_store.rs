use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};

use crate::errors::ForumError;
use crate::types::db::image_attachment::{self, Entity as ImageAttachment};

pub struct ImageStore;

impl ImageStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<image_attachment::Model, ForumError> {
        ImageAttachment::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_image_by_id", e))?
            .ok_or_else(|| ForumError::not_found("image", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: image_attachment::ActiveModel,
    ) -> Result<image_attachment::Model, ForumError> {
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_image", e))
    }

    pub async fn find_by_question<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
    ) -> Result<Vec<image_attachment::Model>, ForumError> {
        ImageAttachment::find()
            .filter(image_attachment::Column::QuestionId.eq(question_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_images_by_question", e))
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        ImageAttachment::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_image", e))?;
        Ok(())
    }
}
