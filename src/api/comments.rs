use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, page_params, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::common::OkResponse;
use crate::types::dto::content::{CommentPage, CommentResponse, UpdateCommentRequest};

pub struct CommentsApi {
    app: Arc<AppData>,
}

impl CommentsApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum CommentTags {
    Comments,
}

#[OpenApi(prefix_path = "/comments")]
impl CommentsApi {
    /// Edit a comment (author or staff)
    #[oai(path = "/:id", method = "put", tag = "CommentTags::Comments")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<UpdateCommentRequest>,
    ) -> Result<Json<CommentResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let comment = self
            .app
            .comment_service
            .update(&acting, id.0, body.0.body)
            .await?;
        Ok(Json(comment.into()))
    }

    /// Soft-delete a comment: hidden, but the row stays (author or staff)
    #[oai(path = "/:id", method = "delete", tag = "CommentTags::Comments")]
    async fn soft_delete(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.comment_service.soft_delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("comment deleted")))
    }

    /// Permanently remove a comment row (staff)
    #[oai(path = "/:id/purge", method = "delete", tag = "CommentTags::Comments")]
    async fn purge(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.comment_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("comment purged")))
    }

    /// Browse or search all comments (staff panel)
    #[oai(path = "/", method = "get", tag = "CommentTags::Comments")]
    async fn list(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
        search: Query<Option<String>>,
    ) -> Result<Json<CommentPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = match search.0.as_deref() {
            Some(keyword) => {
                self.app
                    .comment_service
                    .search(&acting, keyword, page, per_page)
                    .await?
            }
            None => self.app.comment_service.page_all(&acting, page, per_page).await?,
        };
        Ok(Json(CommentPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }
}
