use chrono::Utc;
use sea_orm::{ConnectionTrait, DatabaseConnection, Set, TransactionTrait};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::{ActivityLogService, BadgeService, NotificationService, TagService};
use crate::stores::{GroupStore, QuestionStore, TagStore, UserStore};
use crate::types::db::question;
use crate::types::internal::ActingUser;

const MAX_TITLE_CHARS: usize = 255;

pub struct NewQuestion {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub group_id: Option<i64>,
}

#[derive(Default)]
pub struct QuestionUpdate {
    pub title: Option<String>,
    pub body: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Question lifecycle: creation with role-based auto-approval, tag counter
/// bookkeeping, the three independent state axes (approved / pinned /
/// locked) and the cascading delete procedure.
pub struct QuestionService {
    db: DatabaseConnection,
    question_store: Arc<QuestionStore>,
    tag_store: Arc<TagStore>,
    user_store: Arc<UserStore>,
    group_store: Arc<GroupStore>,
    tag_service: Arc<TagService>,
    notifications: Arc<NotificationService>,
    activity: Arc<ActivityLogService>,
    badges: Arc<BadgeService>,
}

impl QuestionService {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        db: DatabaseConnection,
        question_store: Arc<QuestionStore>,
        tag_store: Arc<TagStore>,
        user_store: Arc<UserStore>,
        group_store: Arc<GroupStore>,
        tag_service: Arc<TagService>,
        notifications: Arc<NotificationService>,
        activity: Arc<ActivityLogService>,
        badges: Arc<BadgeService>,
    ) -> Self {
        Self {
            db,
            question_store,
            tag_store,
            user_store,
            group_store,
            tag_service,
            notifications,
            activity,
            badges,
        }
    }

    /// Create a question. Staff-authored questions are approved on the spot;
    /// everyone else's wait for moderation. Each resolved tag's counter goes
    /// up inside the same transaction as the insert.
    pub async fn create(
        &self,
        acting: &ActingUser,
        input: NewQuestion,
    ) -> Result<question::Model, ForumError> {
        let title = input.title.trim().to_string();
        let body = input.body.trim().to_string();
        if title.is_empty() {
            return Err(ForumError::validation("title must not be empty"));
        }
        if title.chars().count() > MAX_TITLE_CHARS {
            return Err(ForumError::validation(format!(
                "title must be at most {MAX_TITLE_CHARS} characters"
            )));
        }
        if body.is_empty() {
            return Err(ForumError::validation("body must not be empty"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("create_question", e))?;

        let author = self.user_store.get(&txn, acting.id).await?;

        if let Some(group_id) = input.group_id {
            self.group_store.get(&txn, group_id).await?;
            if !acting.is_staff() && !self.group_store.is_member(&txn, group_id, acting.id).await? {
                return Err(ForumError::forbidden("not a member of this group"));
            }
        }

        let tags = self.tag_service.get_or_create(&txn, &input.tags).await?;

        let now = Utc::now();
        let model = question::ActiveModel {
            title: Set(title.clone()),
            body: Set(body),
            author_id: Set(author.id),
            views: Set(0),
            votes: Set(0),
            answer_count: Set(0),
            is_pinned: Set(false),
            is_locked: Set(false),
            is_approved: Set(acting.is_staff()),
            accepted_answer_id: Set(None),
            group_id: Set(input.group_id),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        let saved = self.question_store.insert(&txn, model).await?;

        for tag in &tags {
            self.tag_store.link(&txn, saved.id, tag.id).await?;
            self.tag_store.bump_question_count(&txn, tag.id, 1).await?;
        }

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("create_question", e))?;

        self.activity
            .record(acting.id, "question.create", Some("question"), Some(saved.id), None)
            .await;

        if let Some(group_id) = saved.group_id {
            self.notify_group_members(group_id, acting.id, &title).await;
        }

        if self.question_store.count_by_author(&self.db, acting.id).await? == 1 {
            self.badges
                .try_award(acting.id, "First Question", "Asked a first question")
                .await;
        }

        Ok(saved)
    }

    async fn notify_group_members(&self, group_id: i64, author_id: i64, title: &str) {
        let members = match self.group_store.member_ids(&self.db, group_id).await {
            Ok(members) => members,
            Err(e) => {
                tracing::warn!(group_id, "group fan-out failed: {e}");
                return;
            }
        };
        for member_id in members {
            if member_id != author_id {
                self.notifications
                    .notify(member_id, format!("New group question: {title}"), "group_post")
                    .await;
            }
        }
    }

    pub async fn get(&self, id: i64) -> Result<question::Model, ForumError> {
        self.question_store.get(&self.db, id).await
    }

    pub async fn increment_views(&self, id: i64) -> Result<(), ForumError> {
        self.question_store.increment_views(&self.db, id).await
    }

    pub async fn update(
        &self,
        acting: &ActingUser,
        id: i64,
        update: QuestionUpdate,
    ) -> Result<question::Model, ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("update_question", e))?;

        let existing = self.question_store.get(&txn, id).await?;
        if !acting.can_modify(existing.author_id) {
            return Err(ForumError::forbidden("only the author or staff may edit a question"));
        }

        if let Some(tag_names) = &update.tags {
            self.retag(&txn, existing.id, tag_names).await?;
        }

        let mut model: question::ActiveModel = existing.into();
        if let Some(title) = update.title {
            let title = title.trim().to_string();
            if title.is_empty() {
                return Err(ForumError::validation("title must not be empty"));
            }
            if title.chars().count() > MAX_TITLE_CHARS {
                return Err(ForumError::validation(format!(
                    "title must be at most {MAX_TITLE_CHARS} characters"
                )));
            }
            model.title = Set(title);
        }
        if let Some(body) = update.body {
            let body = body.trim().to_string();
            if body.is_empty() {
                return Err(ForumError::validation("body must not be empty"));
            }
            model.body = Set(body);
        }
        model.updated_at = Set(Utc::now());
        let saved = self.question_store.update(&txn, model).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("update_question", e))?;

        self.activity
            .record(acting.id, "question.update", Some("question"), Some(saved.id), None)
            .await;
        Ok(saved)
    }

    /// Replace a question's tag set, adjusting both old and new counters.
    async fn retag<C: ConnectionTrait>(
        &self,
        conn: &C,
        question_id: i64,
        tag_names: &[String],
    ) -> Result<(), ForumError> {
        let new_tags = self.tag_service.get_or_create(conn, tag_names).await?;
        let old_links = self.tag_store.links_for_question(conn, question_id).await?;

        for link in &old_links {
            if !new_tags.iter().any(|t| t.id == link.tag_id) {
                self.tag_store.unlink(conn, question_id, link.tag_id).await?;
                self.tag_store.bump_question_count(conn, link.tag_id, -1).await?;
            }
        }
        for tag in &new_tags {
            if !old_links.iter().any(|l| l.tag_id == tag.id) {
                self.tag_store.link(conn, question_id, tag.id).await?;
                self.tag_store.bump_question_count(conn, tag.id, 1).await?;
            }
        }
        Ok(())
    }

    /// Delete a question: author or staff only. Tag counters come down and
    /// the tag links go away before the row itself; answers, comments,
    /// votes and images follow by cascade.
    pub async fn delete(&self, acting: &ActingUser, id: i64) -> Result<(), ForumError> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("delete_question", e))?;

        let question = self.question_store.get(&txn, id).await?;
        if !acting.can_modify(question.author_id) {
            return Err(ForumError::forbidden(
                "only the author or staff may delete a question",
            ));
        }
        self.delete_within(&txn, &question).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("delete_question", e))?;

        self.activity
            .record(acting.id, "question.delete", Some("question"), Some(id), None)
            .await;
        Ok(())
    }

    /// The question-delete procedure, callable from a broader transaction
    /// (the admin account cascade reuses it per owned question).
    pub(crate) async fn delete_within<C: ConnectionTrait>(
        &self,
        conn: &C,
        question: &question::Model,
    ) -> Result<(), ForumError> {
        let links = self.tag_store.links_for_question(conn, question.id).await?;
        for link in &links {
            self.tag_store.bump_question_count(conn, link.tag_id, -1).await?;
        }
        self.tag_store.unlink_all_for_question(conn, question.id).await?;
        self.question_store.delete_by_id(conn, question.id).await?;
        tracing::debug!(question_id = question.id, tags = links.len(), "question deleted");
        Ok(())
    }

    // ---- admin state axes ----
    // Pinned, locked and approved are independent; none blocks another.

    pub async fn set_pinned(&self, acting: &ActingUser, id: i64, pinned: bool) -> Result<(), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        let question = self.question_store.get(&self.db, id).await?;
        let mut model: question::ActiveModel = question.into();
        model.is_pinned = Set(pinned);
        model.updated_at = Set(Utc::now());
        self.question_store.update(&self.db, model).await?;
        Ok(())
    }

    pub async fn set_locked(&self, acting: &ActingUser, id: i64, locked: bool) -> Result<(), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        let question = self.question_store.get(&self.db, id).await?;
        let mut model: question::ActiveModel = question.into();
        model.is_locked = Set(locked);
        model.updated_at = Set(Utc::now());
        self.question_store.update(&self.db, model).await?;
        Ok(())
    }

    // ---- listings ----

    pub async fn page_newest(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        self.question_store.page_newest(&self.db, true, page, per_page).await
    }

    pub async fn page_by_votes(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        self.question_store.page_by_votes(&self.db, page, per_page).await
    }

    pub async fn page_by_author(
        &self,
        author_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        self.question_store.page_by_author(&self.db, author_id, page, per_page).await
    }

    pub async fn page_by_tag(
        &self,
        tag_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        self.question_store.page_by_tag(&self.db, tag_id, page, per_page).await
    }

    pub async fn search(
        &self,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<question::Model>, u64), ForumError> {
        self.question_store.search(&self.db, keyword, page, per_page).await
    }

    pub async fn count_by_author(&self, author_id: i64) -> Result<u64, ForumError> {
        self.question_store.count_by_author(&self.db, author_id).await
    }
}
