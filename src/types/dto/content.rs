use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::db::{answer, comment, question, tag};

// ---- questions ----

#[derive(Object, Debug)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub body: String,
    #[oai(default)]
    pub tags: Vec<String>,
    pub group_id: Option<i64>,
}

#[derive(Object, Debug)]
pub struct UpdateQuestionRequest {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

#[derive(Object, Debug)]
pub struct QuestionResponse {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author_id: i64,
    pub views: i32,
    pub votes: i32,
    pub answer_count: i32,
    pub is_pinned: bool,
    pub is_locked: bool,
    pub is_approved: bool,
    pub accepted_answer_id: Option<i64>,
    pub group_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<question::Model> for QuestionResponse {
    fn from(model: question::Model) -> Self {
        Self {
            id: model.id,
            title: model.title,
            body: model.body,
            author_id: model.author_id,
            views: model.views,
            votes: model.votes,
            answer_count: model.answer_count,
            is_pinned: model.is_pinned,
            is_locked: model.is_locked,
            is_approved: model.is_approved,
            accepted_answer_id: model.accepted_answer_id,
            group_id: model.group_id,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct QuestionPage {
    pub items: Vec<QuestionResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

/// A question with its tags, answers and comments for the detail view
#[derive(Object, Debug)]
pub struct QuestionDetailResponse {
    pub question: QuestionResponse,
    pub tags: Vec<TagResponse>,
    pub answers: Vec<AnswerResponse>,
    pub comments: Vec<CommentResponse>,
}

// ---- answers ----

#[derive(Object, Debug)]
pub struct CreateAnswerRequest {
    pub body: String,
}

#[derive(Object, Debug)]
pub struct UpdateAnswerRequest {
    pub body: String,
}

#[derive(Object, Debug)]
pub struct AnswerResponse {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
    pub question_id: i64,
    pub votes: i32,
    pub is_accepted: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<answer::Model> for AnswerResponse {
    fn from(model: answer::Model) -> Self {
        Self {
            id: model.id,
            body: model.body,
            author_id: model.author_id,
            question_id: model.question_id,
            votes: model.votes,
            is_accepted: model.is_accepted,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct AnswerPage {
    pub items: Vec<AnswerResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

// ---- comments ----

#[derive(Object, Debug)]
pub struct CreateCommentRequest {
    pub body: String,
}

#[derive(Object, Debug)]
pub struct UpdateCommentRequest {
    pub body: String,
}

#[derive(Object, Debug)]
pub struct CommentResponse {
    pub id: i64,
    pub body: String,
    pub author_id: i64,
    pub question_id: Option<i64>,
    pub answer_id: Option<i64>,
    pub is_approved: bool,
    pub is_deleted: bool,
    pub created_at: DateTime<Utc>,
}

impl From<comment::Model> for CommentResponse {
    fn from(model: comment::Model) -> Self {
        Self {
            id: model.id,
            body: model.body,
            author_id: model.author_id,
            question_id: model.question_id,
            answer_id: model.answer_id,
            is_approved: model.is_approved,
            is_deleted: model.is_deleted,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct CommentPage {
    pub items: Vec<CommentResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

// ---- tags ----

#[derive(Object, Debug)]
pub struct TagResponse {
    pub id: i64,
    pub name: String,
    pub question_count: i32,
}

impl From<tag::Model> for TagResponse {
    fn from(model: tag::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            question_count: model.question_count,
        }
    }
}

#[derive(Object, Debug)]
pub struct TagPage {
    pub items: Vec<TagResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Object, Debug)]
pub struct MergeTagsRequest {
    pub source_id: i64,
    pub target_id: i64,
}

// ---- votes ----

/// Outcome of a vote call: `changed` is false for the duplicate/absent
/// no-op cases
#[derive(Object, Debug)]
pub struct VoteOutcome {
    pub changed: bool,
}
