use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, page_params, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::dto::admin::ModerationCounts;
use crate::types::dto::common::OkResponse;
use crate::types::dto::content::{CommentPage, QuestionPage};

/// The staff review queue: pending content listings and the approve/reject
/// actions.
pub struct ModerationApi {
    app: Arc<AppData>,
}

impl ModerationApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum ModerationTags {
    Moderation,
}

#[OpenApi(prefix_path = "/moderation")]
impl ModerationApi {
    #[oai(path = "/questions/pending", method = "get", tag = "ModerationTags::Moderation")]
    async fn pending_questions(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<QuestionPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .moderation_service
            .pending_questions(&acting, page, per_page)
            .await?;
        Ok(Json(QuestionPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/questions/approved", method = "get", tag = "ModerationTags::Moderation")]
    async fn approved_questions(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<QuestionPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .moderation_service
            .approved_questions(&acting, page, per_page)
            .await?;
        Ok(Json(QuestionPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    /// Approve a pending question, making it publicly visible
    #[oai(path = "/questions/:id/approve", method = "post", tag = "ModerationTags::Moderation")]
    async fn approve_question(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.moderation_service.approve_question(&acting, id.0).await?;
        Ok(Json(OkResponse::new("question approved")))
    }

    /// Send a question back to the pending state
    #[oai(path = "/questions/:id/reject", method = "post", tag = "ModerationTags::Moderation")]
    async fn reject_question(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.moderation_service.reject_question(&acting, id.0).await?;
        Ok(Json(OkResponse::new("question rejected")))
    }

    #[oai(path = "/comments/pending", method = "get", tag = "ModerationTags::Moderation")]
    async fn pending_comments(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<CommentPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .moderation_service
            .pending_comments(&acting, page, per_page)
            .await?;
        Ok(Json(CommentPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/comments/approved", method = "get", tag = "ModerationTags::Moderation")]
    async fn approved_comments(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<CommentPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .moderation_service
            .approved_comments(&acting, page, per_page)
            .await?;
        Ok(Json(CommentPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/comments/deleted", method = "get", tag = "ModerationTags::Moderation")]
    async fn deleted_comments(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<CommentPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .moderation_service
            .deleted_comments(&acting, page, per_page)
            .await?;
        Ok(Json(CommentPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/comments/:id/approve", method = "post", tag = "ModerationTags::Moderation")]
    async fn approve_comment(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.moderation_service.approve_comment(&acting, id.0).await?;
        Ok(Json(OkResponse::new("comment approved")))
    }

    #[oai(path = "/comments/:id/reject", method = "post", tag = "ModerationTags::Moderation")]
    async fn reject_comment(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.moderation_service.reject_comment(&acting, id.0).await?;
        Ok(Json(OkResponse::new("comment rejected")))
    }

    /// Queue sizes for the moderation dashboard
    #[oai(path = "/counts", method = "get", tag = "ModerationTags::Moderation")]
    async fn counts(&self, auth: BearerAuth) -> Result<Json<ModerationCounts>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        if !acting.is_staff() {
            return Err(ApiError::forbidden("staff role required"));
        }
        let moderation = &self.app.moderation_service;
        Ok(Json(ModerationCounts {
            pending_questions: moderation.count_pending_questions().await?,
            approved_questions: moderation.count_approved_questions().await?,
            pending_comments: moderation.count_pending_comments().await?,
            approved_comments: moderation.count_approved_comments().await?,
            pending_reports: self.app.report_service.count_pending().await?,
            resolved_reports: self.app.report_service.count_resolved().await?,
        }))
    }
}
