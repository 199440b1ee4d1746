use poem_openapi::param::Path;
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::CommentTarget;
use crate::types::dto::common::OkResponse;
use crate::types::dto::content::{
    AnswerResponse, CommentResponse, CreateCommentRequest, UpdateAnswerRequest, VoteOutcome,
};

pub struct AnswersApi {
    app: Arc<AppData>,
}

impl AnswersApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum AnswerTags {
    Answers,
}

#[OpenApi(prefix_path = "/answers")]
impl AnswersApi {
    /// Edit an answer (author or staff)
    #[oai(path = "/:id", method = "put", tag = "AnswerTags::Answers")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<UpdateAnswerRequest>,
    ) -> Result<Json<AnswerResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let answer = self
            .app
            .answer_service
            .update(&acting, id.0, body.0.body)
            .await?;
        Ok(Json(answer.into()))
    }

    /// Delete an answer (author or staff); the question's answer count
    /// comes down with it
    #[oai(path = "/:id", method = "delete", tag = "AnswerTags::Answers")]
    async fn delete(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.answer_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("answer deleted")))
    }

    /// Accept an answer (question author only)
    #[oai(path = "/:id/accept", method = "post", tag = "AnswerTags::Answers")]
    async fn accept(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.answer_service.accept(&acting, id.0).await?;
        Ok(Json(OkResponse::new("answer accepted")))
    }

    /// Upvote an answer; voting twice is a no-op
    #[oai(path = "/:id/upvote", method = "post", tag = "AnswerTags::Answers")]
    async fn upvote(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<VoteOutcome>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let changed = self.app.vote_service.upvote_answer(&acting, id.0).await?;
        Ok(Json(VoteOutcome { changed }))
    }

    /// Retract a previous answer upvote
    #[oai(path = "/:id/downvote", method = "post", tag = "AnswerTags::Answers")]
    async fn downvote(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<VoteOutcome>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let changed = self.app.vote_service.downvote_answer(&acting, id.0).await?;
        Ok(Json(VoteOutcome { changed }))
    }

    /// Comment on an answer
    #[oai(path = "/:id/comments", method = "post", tag = "AnswerTags::Answers")]
    async fn create_comment(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<CreateCommentRequest>,
    ) -> Result<Json<CommentResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let comment = self
            .app
            .comment_service
            .create(&acting, CommentTarget::Answer(id.0), body.0.body)
            .await?;
        Ok(Json(comment.into()))
    }

    /// Visible comments on an answer, oldest first
    #[oai(path = "/:id/comments", method = "get", tag = "AnswerTags::Answers")]
    async fn list_comments(&self, id: Path<i64>) -> Result<Json<Vec<CommentResponse>>, ApiError> {
        let comments = self.app.comment_service.comments_for_answer(id.0).await?;
        Ok(Json(comments.into_iter().map(Into::into).collect()))
    }
}
