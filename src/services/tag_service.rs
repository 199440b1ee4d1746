use sea_orm::{ConnectionTrait, DatabaseConnection, TransactionTrait};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::stores::TagStore;
use crate::types::db::tag;
use crate::types::internal::ActingUser;

/// Tag registry: normalization, get-or-create, merge and delete with the
/// denormalized question counter kept consistent.
pub struct TagService {
    db: DatabaseConnection,
    tag_store: Arc<TagStore>,
}

impl TagService {
    pub fn new(db: DatabaseConnection, tag_store: Arc<TagStore>) -> Self {
        Self { db, tag_store }
    }

    /// Resolve a set of tag names to tag rows, creating missing ones with a
    /// zeroed counter. Names are trimmed and lowercased; empty strings are
    /// skipped, duplicates collapse to one tag.
    ///
    /// Takes a connection so question workflows can run it inside their own
    /// transaction.
    pub async fn get_or_create<C: ConnectionTrait>(
        &self,
        conn: &C,
        names: &[String],
    ) -> Result<Vec<tag::Model>, ForumError> {
        let mut tags: Vec<tag::Model> = Vec::new();
        for name in names {
            let normalized = name.trim().to_lowercase();
            if normalized.is_empty() {
                continue;
            }
            if tags.iter().any(|t| t.name == normalized) {
                continue;
            }
            let tag = match self.tag_store.find_by_name(conn, &normalized).await? {
                Some(existing) => existing,
                None => self.tag_store.create(conn, normalized).await?,
            };
            tags.push(tag);
        }
        Ok(tags)
    }

    pub async fn find_by_id(&self, id: i64) -> Result<tag::Model, ForumError> {
        self.tag_store.get(&self.db, id).await
    }

    pub async fn tags_for_question(&self, question_id: i64) -> Result<Vec<tag::Model>, ForumError> {
        self.tag_store.tags_for_question(&self.db, question_id).await
    }

    pub async fn find_by_name(&self, name: &str) -> Result<Option<tag::Model>, ForumError> {
        self.tag_store.find_by_name(&self.db, name.trim().to_lowercase().as_str()).await
    }

    pub async fn page_by_name(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<tag::Model>, u64), ForumError> {
        self.tag_store.page_by_name(&self.db, page, per_page).await
    }

    pub async fn page_by_popularity(
        &self,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<tag::Model>, u64), ForumError> {
        self.tag_store.page_by_popularity(&self.db, page, per_page).await
    }

    pub async fn search(
        &self,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<tag::Model>, u64), ForumError> {
        self.tag_store.search(&self.db, keyword, page, per_page).await
    }

    /// Delete a tag. Refused while any question still carries it.
    pub async fn delete(&self, acting: &ActingUser, tag_id: i64) -> Result<(), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        let tag = self.tag_store.get(&self.db, tag_id).await?;
        if tag.question_count > 0 {
            return Err(ForumError::conflict(format!(
                "tag '{}' is in use by {} questions",
                tag.name, tag.question_count
            )));
        }
        self.tag_store.delete_by_id(&self.db, tag_id).await?;
        tracing::info!(tag_id, name = %tag.name, "tag deleted");
        Ok(())
    }

    /// Merge the source tag into the target: every question link moves to
    /// the target (links the question already carries just drop), the
    /// source's counter is added onto the target, and the source row is
    /// deleted. One transaction end to end.
    pub async fn merge(
        &self,
        acting: &ActingUser,
        source_id: i64,
        target_id: i64,
    ) -> Result<(), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        if source_id == target_id {
            return Err(ForumError::validation("cannot merge a tag with itself"));
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("merge_tags", e))?;

        let source = self.tag_store.get(&txn, source_id).await?;
        let target = self.tag_store.get(&txn, target_id).await?;

        let links = self.tag_store.links_for_tag(&txn, source.id).await?;
        for link in &links {
            if self
                .tag_store
                .link_exists(&txn, link.question_id, target.id)
                .await?
            {
                // question already carries the target tag; the source link
                // just goes away
                self.tag_store.unlink(&txn, link.question_id, source.id).await?;
            } else {
                self.tag_store
                    .repoint_link(&txn, link.question_id, source.id, target.id)
                    .await?;
            }
        }

        self.tag_store
            .set_question_count(&txn, target.id, target.question_count + source.question_count)
            .await?;
        self.tag_store.set_question_count(&txn, source.id, 0).await?;
        self.tag_store.delete_by_id(&txn, source.id).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("merge_tags", e))?;

        tracing::info!(
            source = %source.name,
            target = %target.name,
            moved = links.len(),
            "tags merged"
        );
        Ok(())
    }
}
