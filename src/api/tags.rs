use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, page_params, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::common::OkResponse;
use crate::types::dto::content::{MergeTagsRequest, QuestionPage, TagPage, TagResponse};

pub struct TagsApi {
    app: Arc<AppData>,
}

impl TagsApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum TagTags {
    Tags,
}

#[OpenApi(prefix_path = "/tags")]
impl TagsApi {
    /// List tags. `sort` is `name` (default) or `popular`; `search` filters
    /// by substring.
    #[oai(path = "/", method = "get", tag = "TagTags::Tags")]
    async fn list(
        &self,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
        sort: Query<Option<String>>,
        search: Query<Option<String>>,
    ) -> Result<Json<TagPage>, ApiError> {
        let (page, per_page) = page_params(page.0, per_page.0);
        let service = &self.app.tag_service;
        let (items, total) = if let Some(keyword) = search.0.as_deref() {
            service.search(keyword, page, per_page).await?
        } else if sort.0.as_deref() == Some("popular") {
            service.page_by_popularity(page, per_page).await?
        } else {
            service.page_by_name(page, per_page).await?
        };
        Ok(Json(TagPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/:id", method = "get", tag = "TagTags::Tags")]
    async fn get(&self, id: Path<i64>) -> Result<Json<TagResponse>, ApiError> {
        let tag = self.app.tag_service.find_by_id(id.0).await?;
        Ok(Json(tag.into()))
    }

    /// Approved questions carrying a tag
    #[oai(path = "/:id/questions", method = "get", tag = "TagTags::Tags")]
    async fn questions(
        &self,
        id: Path<i64>,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<QuestionPage>, ApiError> {
        let (page, per_page) = page_params(page.0, per_page.0);
        // 404 for an unknown tag, not an empty page
        self.app.tag_service.find_by_id(id.0).await?;
        let (items, total) = self
            .app
            .question_service
            .page_by_tag(id.0, page, per_page)
            .await?;
        Ok(Json(QuestionPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    /// Merge one tag into another, moving every question over (staff)
    #[oai(path = "/merge", method = "post", tag = "TagTags::Tags")]
    async fn merge(
        &self,
        auth: BearerAuth,
        body: Json<MergeTagsRequest>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app
            .tag_service
            .merge(&acting, body.0.source_id, body.0.target_id)
            .await?;
        Ok(Json(OkResponse::new("tags merged")))
    }

    /// Delete an unused tag (staff); refused while questions still carry it
    #[oai(path = "/:id", method = "delete", tag = "TagTags::Tags")]
    async fn delete(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.tag_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("tag deleted")))
    }
}
