use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::db::{activity_log, report, system_setting, user};

#[derive(Object, Debug)]
pub struct UserSummary {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: String,
    pub reputation: i32,
    pub points: i32,
    pub level: i32,
    pub is_active: bool,
    pub is_banned: bool,
    pub banned_until: Option<DateTime<Utc>>,
    pub ban_reason: Option<String>,
    pub email_verified: bool,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for UserSummary {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            email: model.email,
            role: model.role.as_str().to_string(),
            reputation: model.reputation,
            points: model.points,
            level: model.level,
            is_active: model.is_active,
            is_banned: model.is_banned,
            banned_until: model.banned_until,
            ban_reason: model.ban_reason,
            email_verified: model.email_verified,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct UserPage {
    pub items: Vec<UserSummary>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

#[derive(Object, Debug)]
pub struct BanRequest {
    pub reason: String,
    /// Omit for a permanent ban
    pub until: Option<DateTime<Utc>>,
}

#[derive(Object, Debug)]
pub struct ChangeRoleRequest {
    /// USER, MANAGER or ADMIN
    pub role: String,
}

#[derive(Object, Debug)]
pub struct ResetPasswordRequest {
    pub password: String,
}

#[derive(Object, Debug)]
pub struct UserStats {
    pub active: u64,
    pub banned: u64,
    pub admins: u64,
    pub managers: u64,
}

#[derive(Object, Debug)]
pub struct ModerationCounts {
    pub pending_questions: u64,
    pub approved_questions: u64,
    pub pending_comments: u64,
    pub approved_comments: u64,
    pub pending_reports: u64,
    pub resolved_reports: u64,
}

/// Staff announcement to one role or to everyone
#[derive(Object, Debug)]
pub struct BroadcastRequest {
    pub message: String,
    /// Notification kind label; defaults to "announcement"
    pub kind: Option<String>,
    /// Restrict to USER, MANAGER or ADMIN; omit to reach everyone
    pub role: Option<String>,
}

#[derive(Object, Debug)]
pub struct NotificationStats {
    pub total: u64,
    pub unread: u64,
}

// ---- reports ----

#[derive(Object, Debug)]
pub struct CreateReportRequest {
    /// QUESTION, ANSWER, COMMENT or USER
    pub entity_type: String,
    pub entity_id: i64,
    pub reason: String,
    pub description: Option<String>,
}

#[derive(Object, Debug)]
pub struct ResolveReportRequest {
    pub resolution: String,
}

#[derive(Object, Debug)]
pub struct ReportResponse {
    pub id: i64,
    pub reporter_id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub reason: String,
    pub description: Option<String>,
    pub status: String,
    pub resolved_by: Option<i64>,
    pub resolution: Option<String>,
    pub created_at: DateTime<Utc>,
    pub resolved_at: Option<DateTime<Utc>>,
}

impl From<report::Model> for ReportResponse {
    fn from(model: report::Model) -> Self {
        Self {
            id: model.id,
            reporter_id: model.reporter_id,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            reason: model.reason,
            description: model.description,
            status: model.status,
            resolved_by: model.resolved_by,
            resolution: model.resolution,
            created_at: model.created_at,
            resolved_at: model.resolved_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct ReportPage {
    pub items: Vec<ReportResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

// ---- system settings ----

#[derive(Object, Debug)]
pub struct SettingResponse {
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

impl From<system_setting::Model> for SettingResponse {
    fn from(model: system_setting::Model) -> Self {
        Self {
            key: model.key,
            value: model.value,
            description: model.description,
            category: model.category,
        }
    }
}

#[derive(Object, Debug)]
pub struct SetSettingRequest {
    pub value: String,
    pub description: Option<String>,
    pub category: Option<String>,
}

// ---- activity trail ----

#[derive(Object, Debug)]
pub struct ActivityLogResponse {
    pub id: i64,
    pub user_id: i64,
    pub action: String,
    pub entity_type: Option<String>,
    pub entity_id: Option<i64>,
    pub details: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<activity_log::Model> for ActivityLogResponse {
    fn from(model: activity_log::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            action: model.action,
            entity_type: model.entity_type,
            entity_id: model.entity_id,
            details: model.details,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct ActivityPage {
    pub items: Vec<ActivityLogResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}
