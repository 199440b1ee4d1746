use poem_openapi::param::{Path, Query};
use poem_openapi::payload::{Binary, Json};
use poem_openapi::{OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::common::OkResponse;
use crate::types::dto::social::ImageResponse;

pub struct ImagesApi {
    app: Arc<AppData>,
}

impl ImagesApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum ImageTags {
    Images,
}

#[OpenApi(prefix_path = "/images")]
impl ImagesApi {
    /// Upload an image (raw bytes; file name and content type as query
    /// params). Non-image content types and payloads over the size ceiling
    /// are rejected.
    #[oai(path = "/", method = "post", tag = "ImageTags::Images")]
    async fn upload(
        &self,
        auth: BearerAuth,
        file_name: Query<String>,
        content_type: Query<String>,
        question_id: Query<Option<i64>>,
        payload: Binary<Vec<u8>>,
    ) -> Result<Json<ImageResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let image = self
            .app
            .image_service
            .store(&acting, file_name.0, content_type.0, &payload.0, question_id.0)
            .await?;
        Ok(Json(image.into()))
    }

    #[oai(path = "/:id", method = "get", tag = "ImageTags::Images")]
    async fn get(&self, id: Path<i64>) -> Result<Json<ImageResponse>, ApiError> {
        let image = self.app.image_service.get(id.0).await?;
        Ok(Json(image.into()))
    }

    /// Remove an image (uploader or staff)
    #[oai(path = "/:id", method = "delete", tag = "ImageTags::Images")]
    async fn delete(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.image_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("image deleted")))
    }
}
