use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, page_params, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::question_service::{NewQuestion, QuestionUpdate};
use crate::services::CommentTarget;
use crate::types::dto::common::OkResponse;
use crate::types::dto::content::{
    AnswerResponse, CommentResponse, CreateAnswerRequest, CreateCommentRequest,
    CreateQuestionRequest, QuestionDetailResponse, QuestionPage, QuestionResponse,
    UpdateQuestionRequest, VoteOutcome,
};
use crate::types::dto::social::ImageResponse;

pub struct QuestionsApi {
    app: Arc<AppData>,
}

impl QuestionsApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum QuestionTags {
    Questions,
}

#[OpenApi(prefix_path = "/questions")]
impl QuestionsApi {
    /// Ask a question. Staff-authored questions go live immediately;
    /// everyone else's enter the moderation queue.
    #[oai(path = "/", method = "post", tag = "QuestionTags::Questions")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateQuestionRequest>,
    ) -> Result<Json<QuestionResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let question = self
            .app
            .question_service
            .create(
                &acting,
                NewQuestion {
                    title: body.title,
                    body: body.body,
                    tags: body.tags,
                    group_id: body.group_id,
                },
            )
            .await?;
        Ok(Json(question.into()))
    }

    /// List approved questions. `sort` is `newest` (default) or `votes`;
    /// `search`, `tag_id` and `author_id` narrow the listing.
    #[oai(path = "/", method = "get", tag = "QuestionTags::Questions")]
    async fn list(
        &self,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
        sort: Query<Option<String>>,
        search: Query<Option<String>>,
        tag_id: Query<Option<i64>>,
        author_id: Query<Option<i64>>,
    ) -> Result<Json<QuestionPage>, ApiError> {
        let (page, per_page) = page_params(page.0, per_page.0);
        let service = &self.app.question_service;

        let (items, total) = if let Some(keyword) = search.0.as_deref() {
            service.search(keyword, page, per_page).await?
        } else if let Some(tag_id) = tag_id.0 {
            service.page_by_tag(tag_id, page, per_page).await?
        } else if let Some(author_id) = author_id.0 {
            service.page_by_author(author_id, page, per_page).await?
        } else if sort.0.as_deref() == Some("votes") {
            service.page_by_votes(page, per_page).await?
        } else {
            service.page_newest(page, per_page).await?
        };

        Ok(Json(QuestionPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    /// Fetch a question with its tags, answers and comments. Counts a view.
    #[oai(path = "/:id", method = "get", tag = "QuestionTags::Questions")]
    async fn get(&self, id: Path<i64>) -> Result<Json<QuestionDetailResponse>, ApiError> {
        self.app.question_service.increment_views(id.0).await?;
        let question = self.app.question_service.get(id.0).await?;
        let tags = self.app.tag_service.tags_for_question(id.0).await?;
        let answers = self.app.answer_service.answers_for_question(id.0).await?;
        let comments = self.app.comment_service.comments_for_question(id.0).await?;
        Ok(Json(QuestionDetailResponse {
            question: question.into(),
            tags: tags.into_iter().map(Into::into).collect(),
            answers: answers.into_iter().map(Into::into).collect(),
            comments: comments.into_iter().map(Into::into).collect(),
        }))
    }

    /// Edit a question (author or staff)
    #[oai(path = "/:id", method = "put", tag = "QuestionTags::Questions")]
    async fn update(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<UpdateQuestionRequest>,
    ) -> Result<Json<QuestionResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let question = self
            .app
            .question_service
            .update(
                &acting,
                id.0,
                QuestionUpdate {
                    title: body.title,
                    body: body.body,
                    tags: body.tags,
                },
            )
            .await?;
        Ok(Json(question.into()))
    }

    /// Delete a question and everything attached to it (author or staff)
    #[oai(path = "/:id", method = "delete", tag = "QuestionTags::Questions")]
    async fn delete(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.question_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("question deleted")))
    }

    /// Upvote a question; voting twice is a no-op
    #[oai(path = "/:id/upvote", method = "post", tag = "QuestionTags::Questions")]
    async fn upvote(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<VoteOutcome>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let changed = self.app.vote_service.upvote_question(&acting, id.0).await?;
        Ok(Json(VoteOutcome { changed }))
    }

    /// Retract a previous upvote; a no-op without one
    #[oai(path = "/:id/downvote", method = "post", tag = "QuestionTags::Questions")]
    async fn downvote(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<VoteOutcome>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let changed = self.app.vote_service.downvote_question(&acting, id.0).await?;
        Ok(Json(VoteOutcome { changed }))
    }

    /// Pin a question to the top of listings (staff)
    #[oai(path = "/:id/pin", method = "post", tag = "QuestionTags::Questions")]
    async fn pin(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.question_service.set_pinned(&acting, id.0, true).await?;
        Ok(Json(OkResponse::new("question pinned")))
    }

    #[oai(path = "/:id/unpin", method = "post", tag = "QuestionTags::Questions")]
    async fn unpin(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.question_service.set_pinned(&acting, id.0, false).await?;
        Ok(Json(OkResponse::new("question unpinned")))
    }

    /// Lock a question against further activity (staff)
    #[oai(path = "/:id/lock", method = "post", tag = "QuestionTags::Questions")]
    async fn lock(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.question_service.set_locked(&acting, id.0, true).await?;
        Ok(Json(OkResponse::new("question locked")))
    }

    #[oai(path = "/:id/unlock", method = "post", tag = "QuestionTags::Questions")]
    async fn unlock(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.question_service.set_locked(&acting, id.0, false).await?;
        Ok(Json(OkResponse::new("question unlocked")))
    }

    /// Post an answer
    #[oai(path = "/:id/answers", method = "post", tag = "QuestionTags::Questions")]
    async fn create_answer(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<CreateAnswerRequest>,
    ) -> Result<Json<AnswerResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let answer = self
            .app
            .answer_service
            .create(&acting, id.0, body.0.body)
            .await?;
        Ok(Json(answer.into()))
    }

    /// Answers of a question, best-voted first
    #[oai(path = "/:id/answers", method = "get", tag = "QuestionTags::Questions")]
    async fn list_answers(&self, id: Path<i64>) -> Result<Json<Vec<AnswerResponse>>, ApiError> {
        let answers = self.app.answer_service.answers_for_question(id.0).await?;
        Ok(Json(answers.into_iter().map(Into::into).collect()))
    }

    /// Comment on a question
    #[oai(path = "/:id/comments", method = "post", tag = "QuestionTags::Questions")]
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
            .create(&acting, CommentTarget::Question(id.0), body.0.body)
            .await?;
        Ok(Json(comment.into()))
    }

    /// Visible comments on a question, oldest first
    #[oai(path = "/:id/comments", method = "get", tag = "QuestionTags::Questions")]
    async fn list_comments(&self, id: Path<i64>) -> Result<Json<Vec<CommentResponse>>, ApiError> {
        let comments = self.app.comment_service.comments_for_question(id.0).await?;
        Ok(Json(comments.into_iter().map(Into::into).collect()))
    }

    /// Images attached to a question
    #[oai(path = "/:id/images", method = "get", tag = "QuestionTags::Questions")]
    async fn list_images(&self, id: Path<i64>) -> Result<Json<Vec<ImageResponse>>, ApiError> {
        let images = self.app.image_service.images_for_question(id.0).await?;
        Ok(Json(images.into_iter().map(Into::into).collect()))
    }
}
