use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, page_params, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::types::db::Role;
use crate::types::dto::admin::{
    ActivityPage, BanRequest, BroadcastRequest, ChangeRoleRequest, CreateReportRequest,
    NotificationStats, ReportPage, ReportResponse, ResetPasswordRequest, ResolveReportRequest,
    SetSettingRequest, SettingResponse, UserPage, UserStats, UserSummary,
};
use crate::types::dto::common::{CountResponse, OkResponse};
use crate::types::dto::social::NotificationPage;

/// Role-gated administration panel: user management, reports and system
/// settings. (Report creation lives here too, open to any signed-in user.)
pub struct AdminApi {
    app: Arc<AppData>,
}

impl AdminApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[derive(Tags)]
enum AdminTags {
    Admin,
    Reports,
}

#[OpenApi(prefix_path = "/admin")]
impl AdminApi {
    /// List or search users (staff)
    #[oai(path = "/users", method = "get", tag = "AdminTags::Admin")]
    async fn users(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
        search: Query<Option<String>>,
    ) -> Result<Json<UserPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = match search.0.as_deref() {
            Some(keyword) => {
                self.app
                    .admin_service
                    .search_users(&acting, keyword, page, per_page)
                    .await?
            }
            None => self.app.admin_service.page_users(&acting, page, per_page).await?,
        };
        Ok(Json(UserPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    /// Account counters for the dashboard (staff)
    #[oai(path = "/users/stats", method = "get", tag = "AdminTags::Admin")]
    async fn user_stats(&self, auth: BearerAuth) -> Result<Json<UserStats>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        if !acting.is_staff() {
            return Err(ApiError::forbidden("staff role required"));
        }
        let admin = &self.app.admin_service;
        Ok(Json(UserStats {
            active: admin.count_active_users().await?,
            banned: admin.count_banned_users().await?,
            admins: admin.count_users_by_role(Role::Admin).await?,
            managers: admin.count_users_by_role(Role::Manager).await?,
        }))
    }

    /// Full account record for one user (staff)
    #[oai(path = "/users/:id", method = "get", tag = "AdminTags::Admin")]
    async fn user(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<UserSummary>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        if !acting.is_staff() {
            return Err(ApiError::forbidden("staff role required"));
        }
        let user = self.app.user_service.find_by_id(id.0).await?;
        Ok(Json(user.into()))
    }

    /// Ban a user; omit `until` for a permanent ban (staff)
    #[oai(path = "/users/:id/ban", method = "post", tag = "AdminTags::Admin")]
    async fn ban(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<BanRequest>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app
            .admin_service
            .ban_user(&acting, id.0, body.0.reason, body.0.until)
            .await?;
        Ok(Json(OkResponse::new("user banned")))
    }

    #[oai(path = "/users/:id/unban", method = "post", tag = "AdminTags::Admin")]
    async fn unban(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.admin_service.unban_user(&acting, id.0).await?;
        Ok(Json(OkResponse::new("user unbanned")))
    }

    #[oai(path = "/users/:id/deactivate", method = "post", tag = "AdminTags::Admin")]
    async fn deactivate(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.admin_service.deactivate_user(&acting, id.0).await?;
        Ok(Json(OkResponse::new("user deactivated")))
    }

    #[oai(path = "/users/:id/activate", method = "post", tag = "AdminTags::Admin")]
    async fn activate(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.admin_service.activate_user(&acting, id.0).await?;
        Ok(Json(OkResponse::new("user activated")))
    }

    /// Change a user's role (ADMIN)
    #[oai(path = "/users/:id/role", method = "post", tag = "AdminTags::Admin")]
    async fn change_role(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<ChangeRoleRequest>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let role: Role = body
            .0
            .role
            .parse()
            .map_err(|e: String| ApiError::bad_request(e))?;
        self.app.admin_service.change_role(&acting, id.0, role).await?;
        Ok(Json(OkResponse::new("role changed")))
    }

    /// Reset a user's password (staff)
    #[oai(path = "/users/:id/reset-password", method = "post", tag = "AdminTags::Admin")]
    async fn reset_password(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<ResetPasswordRequest>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app
            .admin_service
            .reset_password(&acting, id.0, &body.0.password)
            .await?;
        Ok(Json(OkResponse::new("password reset")))
    }

    #[oai(path = "/users/:id/verify-email", method = "post", tag = "AdminTags::Admin")]
    async fn verify_email(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.admin_service.verify_email(&acting, id.0).await?;
        Ok(Json(OkResponse::new("email verified")))
    }

    /// Delete a user and everything they own (ADMIN)
    #[oai(path = "/users/:id", method = "delete", tag = "AdminTags::Admin")]
    async fn delete_user(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.admin_service.delete_user(&acting, id.0).await?;
        Ok(Json(OkResponse::new("user deleted")))
    }

    // ---- reports ----

    /// File an abuse report (any signed-in user)
    #[oai(path = "/reports", method = "post", tag = "AdminTags::Reports")]
    async fn create_report(
        &self,
        auth: BearerAuth,
        body: Json<CreateReportRequest>,
    ) -> Result<Json<ReportResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let report = self
            .app
            .report_service
            .create(
                &acting,
                body.entity_type,
                body.entity_id,
                body.reason,
                body.description,
            )
            .await?;
        Ok(Json(report.into()))
    }

    /// List reports, optionally by status (staff)
    #[oai(path = "/reports", method = "get", tag = "AdminTags::Reports")]
    async fn reports(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
        status: Query<Option<String>>,
    ) -> Result<Json<ReportPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = match status.0.as_deref() {
            Some(status) => {
                self.app
                    .report_service
                    .page_by_status(&acting, status, page, per_page)
                    .await?
            }
            None => self.app.report_service.page_all(&acting, page, per_page).await?,
        };
        Ok(Json(ReportPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    /// The caller's own filed reports
    #[oai(path = "/reports/mine", method = "get", tag = "AdminTags::Reports")]
    async fn my_reports(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<ReportPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .report_service
            .page_by_reporter(&acting, page, per_page)
            .await?;
        Ok(Json(ReportPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/reports/:id/resolve", method = "post", tag = "AdminTags::Reports")]
    async fn resolve_report(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<ResolveReportRequest>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app
            .report_service
            .resolve(&acting, id.0, body.0.resolution)
            .await?;
        Ok(Json(OkResponse::new("report resolved")))
    }

    #[oai(path = "/reports/:id/reject", method = "post", tag = "AdminTags::Reports")]
    async fn reject_report(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<ResolveReportRequest>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app
            .report_service
            .reject(&acting, id.0, body.0.resolution)
            .await?;
        Ok(Json(OkResponse::new("report rejected")))
    }

    // ---- announcements & side records ----

    /// Broadcast a notification to a role, or to every user (staff)
    #[oai(path = "/broadcast", method = "post", tag = "AdminTags::Admin")]
    async fn broadcast(
        &self,
        auth: BearerAuth,
        body: Json<BroadcastRequest>,
    ) -> Result<Json<CountResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        if !acting.is_staff() {
            return Err(ApiError::forbidden("staff role required"));
        }
        let body = body.0;
        let kind = body.kind.unwrap_or_else(|| "announcement".to_string());
        let count = match body.role {
            Some(raw) => {
                let role: Role = raw.parse().map_err(|e: String| ApiError::bad_request(e))?;
                self.app
                    .notification_service
                    .broadcast_to_role(role, &body.message, &kind)
                    .await?
            }
            None => {
                self.app
                    .notification_service
                    .broadcast_to_all(&body.message, &kind)
                    .await?
            }
        };
        Ok(Json(CountResponse {
            count: count as u64,
        }))
    }

    /// Every notification in the system, newest first (staff)
    #[oai(path = "/notifications", method = "get", tag = "AdminTags::Admin")]
    async fn notifications(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<NotificationPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .notification_service
            .page_all(&acting, page, per_page)
            .await?;
        Ok(Json(NotificationPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/notifications/stats", method = "get", tag = "AdminTags::Admin")]
    async fn notification_stats(
        &self,
        auth: BearerAuth,
    ) -> Result<Json<NotificationStats>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        if !acting.is_staff() {
            return Err(ApiError::forbidden("staff role required"));
        }
        Ok(Json(NotificationStats {
            total: self.app.notification_service.count_all().await?,
            unread: self.app.notification_service.count_unread().await?,
        }))
    }

    /// The activity trail across all users (staff)
    #[oai(path = "/activity", method = "get", tag = "AdminTags::Admin")]
    async fn activity(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<ActivityPage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .activity_log_service
            .page_all(&acting, page, per_page)
            .await?;
        Ok(Json(ActivityPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    // ---- system settings ----

    #[oai(path = "/settings", method = "get", tag = "AdminTags::Admin")]
    async fn settings(&self, auth: BearerAuth) -> Result<Json<Vec<SettingResponse>>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let settings = self.app.admin_service.list_settings(&acting).await?;
        Ok(Json(settings.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/settings/:key", method = "put", tag = "AdminTags::Admin")]
    async fn set_setting(
        &self,
        auth: BearerAuth,
        key: Path<String>,
        body: Json<SetSettingRequest>,
    ) -> Result<Json<SettingResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let setting = self
            .app
            .admin_service
            .set_setting(&acting, &key.0, body.value, body.description, body.category)
            .await?;
        Ok(Json(setting.into()))
    }

    #[oai(path = "/settings/:key", method = "delete", tag = "AdminTags::Admin")]
    async fn delete_setting(
        &self,
        auth: BearerAuth,
        key: Path<String>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.admin_service.delete_setting(&acting, &key.0).await?;
        Ok(Json(OkResponse::new("setting deleted")))
    }
}
