use chrono::Utc;
use sea_orm::{DatabaseConnection, Set};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::stores::{ReportStore, UserStore};
use crate::types::db::report;
use crate::types::internal::ActingUser;

pub const STATUS_PENDING: &str = "PENDING";
pub const STATUS_RESOLVED: &str = "RESOLVED";
pub const STATUS_REJECTED: &str = "REJECTED";

const REPORTABLE_TYPES: &[&str] = &["QUESTION", "ANSWER", "COMMENT", "USER"];

/// Abuse reports: created by any user, resolved or rejected by staff.
pub struct ReportService {
    db: DatabaseConnection,
    report_store: Arc<ReportStore>,
    user_store: Arc<UserStore>,
}

impl ReportService {
    pub fn new(
        db: DatabaseConnection,
        report_store: Arc<ReportStore>,
        user_store: Arc<UserStore>,
    ) -> Self {
        Self {
            db,
            report_store,
            user_store,
        }
    }

    pub async fn create(
        &self,
        acting: &ActingUser,
        entity_type: String,
        entity_id: i64,
        reason: String,
        description: Option<String>,
    ) -> Result<report::Model, ForumError> {
        let entity_type = entity_type.to_uppercase();
        if !REPORTABLE_TYPES.contains(&entity_type.as_str()) {
            return Err(ForumError::validation(format!(
                "unknown report target type '{entity_type}'"
            )));
        }
        if reason.trim().is_empty() {
            return Err(ForumError::validation("report reason must not be empty"));
        }
        self.user_store.get(&self.db, acting.id).await?;

        let model = report::ActiveModel {
            reporter_id: Set(acting.id),
            entity_type: Set(entity_type),
            entity_id: Set(entity_id),
            reason: Set(reason),
            description: Set(description),
            status: Set(STATUS_PENDING.to_string()),
            resolved_by: Set(None),
            resolution: Set(None),
            created_at: Set(Utc::now()),
            resolved_at: Set(None),
            ..Default::default()
        };
        self.report_store.insert(&self.db, model).await
    }

    pub async fn page_all(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<report::Model>, u64), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        self.report_store.page_all(&self.db, page, per_page).await
    }

    pub async fn page_by_status(
        &self,
        acting: &ActingUser,
        status: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<report::Model>, u64), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        self.report_store
            .page_by_status(&self.db, &status.to_uppercase(), page, per_page)
            .await
    }

    pub async fn page_by_reporter(
        &self,
        acting: &ActingUser,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<report::Model>, u64), ForumError> {
        self.report_store
            .page_by_reporter(&self.db, acting.id, page, per_page)
            .await
    }

    pub async fn resolve(
        &self,
        acting: &ActingUser,
        report_id: i64,
        resolution: String,
    ) -> Result<(), ForumError> {
        self.close(acting, report_id, STATUS_RESOLVED, resolution).await
    }

    pub async fn reject(
        &self,
        acting: &ActingUser,
        report_id: i64,
        reason: String,
    ) -> Result<(), ForumError> {
        self.close(acting, report_id, STATUS_REJECTED, reason).await
    }

    async fn close(
        &self,
        acting: &ActingUser,
        report_id: i64,
        status: &str,
        resolution: String,
    ) -> Result<(), ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        let report = self.report_store.get(&self.db, report_id).await?;
        let mut model: report::ActiveModel = report.into();
        model.status = Set(status.to_string());
        model.resolved_by = Set(Some(acting.id));
        model.resolution = Set(Some(resolution));
        model.resolved_at = Set(Some(Utc::now()));
        self.report_store.update(&self.db, model).await?;
        Ok(())
    }

    pub async fn count_pending(&self) -> Result<u64, ForumError> {
        self.report_store.count_by_status(&self.db, STATUS_PENDING).await
    }

    pub async fn count_resolved(&self) -> Result<u64, ForumError> {
        self.report_store.count_by_status(&self.db, STATUS_RESOLVED).await
    }
}
