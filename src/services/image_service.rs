use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use std::path::PathBuf;
use std::sync::Arc;
use uuid::Uuid;

use crate::errors::ForumError;
use crate::stores::{ImageStore, QuestionStore};
use crate::types::db::image_attachment;
use crate::types::internal::ActingUser;

/// Image attachment storage: validates content type and size, writes the
/// payload under the upload directory and records the attachment row.
pub struct ImageService {
    db: DatabaseConnection,
    image_store: Arc<ImageStore>,
    question_store: Arc<QuestionStore>,
    upload_dir: PathBuf,
    max_upload_bytes: usize,
}

impl ImageService {
    pub fn new(
        db: DatabaseConnection,
        image_store: Arc<ImageStore>,
        question_store: Arc<QuestionStore>,
        upload_dir: PathBuf,
        max_upload_bytes: usize,
    ) -> Self {
        Self {
            db,
            image_store,
            question_store,
            upload_dir,
            max_upload_bytes,
        }
    }

    pub async fn store(
        &self,
        acting: &ActingUser,
        file_name: String,
        content_type: String,
        data: &[u8],
        question_id: Option<i64>,
    ) -> Result<image_attachment::Model, ForumError> {
        if !content_type.starts_with("image/") {
            return Err(ForumError::validation("only image uploads are accepted"));
        }
        if data.is_empty() {
            return Err(ForumError::validation("upload is empty"));
        }
        if data.len() > self.max_upload_bytes {
            return Err(ForumError::validation(format!(
                "upload exceeds the {} byte limit",
                self.max_upload_bytes
            )));
        }
        if let Some(question_id) = question_id {
            self.question_store.get(&self.db, question_id).await?;
        }

        let extension = file_name.rsplit('.').next().unwrap_or("bin").to_string();
        let storage_name = format!("{}.{extension}", Uuid::new_v4());
        let storage_path = self.upload_dir.join(&storage_name);

        tokio::fs::create_dir_all(&self.upload_dir)
            .await
            .map_err(|e| ForumError::storage("create_upload_dir", e.to_string()))?;
        tokio::fs::write(&storage_path, data)
            .await
            .map_err(|e| ForumError::storage("write_upload", e.to_string()))?;

        let model = image_attachment::ActiveModel {
            question_id: Set(question_id),
            uploaded_by: Set(acting.id),
            file_name: Set(file_name),
            content_type: Set(content_type),
            file_size: Set(data.len() as i64),
            storage_path: Set(storage_path.to_string_lossy().into_owned()),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        self.image_store.insert(&self.db, model).await
    }

    pub async fn get(&self, id: i64) -> Result<image_attachment::Model, ForumError> {
        self.image_store.get(&self.db, id).await
    }

    pub async fn images_for_question(
        &self,
        question_id: i64,
    ) -> Result<Vec<image_attachment::Model>, ForumError> {
        self.image_store.find_by_question(&self.db, question_id).await
    }

    /// Remove the attachment row; the file itself goes best-effort.
    pub async fn delete(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let image = self.image_store.get(&self.db, id).await?;
        if !acting.can_modify(image.uploaded_by) {
            return Err(ForumError::forbidden(
                "only the uploader or staff may delete an image",
            ));
        }
        self.image_store.delete_by_id(&self.db, id).await?;
        if let Err(e) = tokio::fs::remove_file(&image.storage_path).await {
            tracing::warn!(path = %image.storage_path, "stored file removal failed: {e}");
        }
        Ok(())
    }
}
