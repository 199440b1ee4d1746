use poem_openapi::param::{Path, Query};
use poem_openapi::{payload::Json, OpenApi, Tags};
use std::sync::Arc;

use crate::api::{authenticate, page_params, BearerAuth};
use crate::app_data::AppData;
use crate::errors::ApiError;
use crate::services::user_service::ProfileUpdate;
use crate::types::dto::common::{CountResponse, OkResponse};
use crate::types::dto::content::{AnswerPage, QuestionPage, VoteOutcome};
use crate::types::dto::social::{
    BadgeResponse, CreateBadgeRequest, CreateGroupRequest, GroupMemberRequest, GroupResponse,
    MessagePage, NotificationResponse, PrivateMessageResponse, PublicUserResponse,
    SendMessageRequest, UpdateProfileRequest, UserBadgeResponse,
};

#[derive(Tags)]
enum SocialTags {
    Users,
    Messages,
    Notifications,
    Badges,
    Groups,
}

// ---- users ----

pub struct UsersApi {
    app: Arc<AppData>,
}

impl UsersApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[OpenApi(prefix_path = "/users")]
impl UsersApi {
    /// Public user directory, top reputation first
    #[oai(path = "/", method = "get", tag = "SocialTags::Users")]
    async fn list(
        &self,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<Vec<PublicUserResponse>>, ApiError> {
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, _) = self.app.user_service.page_by_reputation(page, per_page).await?;
        Ok(Json(items.into_iter().map(Into::into).collect()))
    }

    /// Public profile; counts a profile view
    #[oai(path = "/:id", method = "get", tag = "SocialTags::Users")]
    async fn get(&self, id: Path<i64>) -> Result<Json<PublicUserResponse>, ApiError> {
        self.app.user_service.increment_profile_views(id.0).await?;
        let user = self.app.user_service.find_by_id(id.0).await?;
        Ok(Json(user.into()))
    }

    /// Update one's own profile
    #[oai(path = "/:id/profile", method = "put", tag = "SocialTags::Users")]
    async fn update_profile(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<UpdateProfileRequest>,
    ) -> Result<Json<PublicUserResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let user = self
            .app
            .user_service
            .update_profile(
                &acting,
                id.0,
                ProfileUpdate {
                    about: body.about,
                    location: body.location,
                    website: body.website,
                    profile_image: body.profile_image,
                },
            )
            .await?;
        Ok(Json(user.into()))
    }

    /// Follow a user; a duplicate follow is a no-op
    #[oai(path = "/:id/follow", method = "post", tag = "SocialTags::Users")]
    async fn follow(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<VoteOutcome>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let changed = self.app.user_service.follow(&acting, id.0).await?;
        Ok(Json(VoteOutcome { changed }))
    }

    #[oai(path = "/:id/unfollow", method = "post", tag = "SocialTags::Users")]
    async fn unfollow(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<VoteOutcome>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let changed = self.app.user_service.unfollow(&acting, id.0).await?;
        Ok(Json(VoteOutcome { changed }))
    }

    #[oai(path = "/:id/followers", method = "get", tag = "SocialTags::Users")]
    async fn followers(&self, id: Path<i64>) -> Result<Json<Vec<PublicUserResponse>>, ApiError> {
        let users = self.app.user_service.followers(id.0).await?;
        Ok(Json(users.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/:id/following", method = "get", tag = "SocialTags::Users")]
    async fn following(&self, id: Path<i64>) -> Result<Json<Vec<PublicUserResponse>>, ApiError> {
        let users = self.app.user_service.following(id.0).await?;
        Ok(Json(users.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/:id/badges", method = "get", tag = "SocialTags::Users")]
    async fn badges(&self, id: Path<i64>) -> Result<Json<Vec<UserBadgeResponse>>, ApiError> {
        let badges = self.app.badge_service.badges_for_user(id.0).await?;
        Ok(Json(badges.into_iter().map(Into::into).collect()))
    }

    /// Questions authored by a user
    #[oai(path = "/:id/questions", method = "get", tag = "SocialTags::Users")]
    async fn questions(
        &self,
        id: Path<i64>,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<QuestionPage>, ApiError> {
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .question_service
            .page_by_author(id.0, page, per_page)
            .await?;
        Ok(Json(QuestionPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    /// Answers authored by a user
    #[oai(path = "/:id/answers", method = "get", tag = "SocialTags::Users")]
    async fn answers(
        &self,
        id: Path<i64>,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<AnswerPage>, ApiError> {
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self
            .app
            .answer_service
            .page_by_author(id.0, page, per_page)
            .await?;
        Ok(Json(AnswerPage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    /// Look a user up by username
    #[oai(path = "/by-username/:username", method = "get", tag = "SocialTags::Users")]
    async fn by_username(
        &self,
        username: Path<String>,
    ) -> Result<Json<PublicUserResponse>, ApiError> {
        let user = self
            .app
            .user_service
            .find_by_username(&username.0)
            .await?
            .ok_or_else(|| ApiError::not_found(format!("user not found: {}", username.0)))?;
        Ok(Json(user.into()))
    }
}

// ---- private messages ----

pub struct MessagesApi {
    app: Arc<AppData>,
}

impl MessagesApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[OpenApi(prefix_path = "/messages")]
impl MessagesApi {
    /// Send a private message
    #[oai(path = "/", method = "post", tag = "SocialTags::Messages")]
    async fn send(
        &self,
        auth: BearerAuth,
        body: Json<SendMessageRequest>,
    ) -> Result<Json<PrivateMessageResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let message = self
            .app
            .message_service
            .send(&acting, body.receiver_id, body.subject, body.body)
            .await?;
        Ok(Json(message.into()))
    }

    #[oai(path = "/inbox", method = "get", tag = "SocialTags::Messages")]
    async fn inbox(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<MessagePage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self.app.message_service.inbox(&acting, page, per_page).await?;
        Ok(Json(MessagePage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/outbox", method = "get", tag = "SocialTags::Messages")]
    async fn outbox(
        &self,
        auth: BearerAuth,
        page: Query<Option<u64>>,
        per_page: Query<Option<u64>>,
    ) -> Result<Json<MessagePage>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let (page, per_page) = page_params(page.0, per_page.0);
        let (items, total) = self.app.message_service.outbox(&acting, page, per_page).await?;
        Ok(Json(MessagePage {
            items: items.into_iter().map(Into::into).collect(),
            page,
            per_page,
            total,
        }))
    }

    #[oai(path = "/unread", method = "get", tag = "SocialTags::Messages")]
    async fn unread(&self, auth: BearerAuth) -> Result<Json<Vec<PrivateMessageResponse>>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let messages = self.app.message_service.unread(&acting).await?;
        Ok(Json(messages.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/unread/count", method = "get", tag = "SocialTags::Messages")]
    async fn unread_count(&self, auth: BearerAuth) -> Result<Json<CountResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let count = self.app.message_service.count_unread(&acting).await?;
        Ok(Json(CountResponse { count }))
    }

    #[oai(path = "/:id", method = "get", tag = "SocialTags::Messages")]
    async fn get(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<PrivateMessageResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let message = self.app.message_service.get(&acting, id.0).await?;
        Ok(Json(message.into()))
    }

    #[oai(path = "/:id/read", method = "post", tag = "SocialTags::Messages")]
    async fn mark_read(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.message_service.mark_read(&acting, id.0).await?;
        Ok(Json(OkResponse::new("message read")))
    }

    #[oai(path = "/:id", method = "delete", tag = "SocialTags::Messages")]
    async fn delete(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.message_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("message deleted")))
    }
}

// ---- notifications ----

pub struct NotificationsApi {
    app: Arc<AppData>,
}

impl NotificationsApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[OpenApi(prefix_path = "/notifications")]
impl NotificationsApi {
    #[oai(path = "/", method = "get", tag = "SocialTags::Notifications")]
    async fn list(&self, auth: BearerAuth) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let notifications = self.app.notification_service.notifications_for(&acting).await?;
        Ok(Json(notifications.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/unread", method = "get", tag = "SocialTags::Notifications")]
    async fn unread(&self, auth: BearerAuth) -> Result<Json<Vec<NotificationResponse>>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let notifications = self.app.notification_service.unread_for(&acting).await?;
        Ok(Json(notifications.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/:id/read", method = "post", tag = "SocialTags::Notifications")]
    async fn mark_read(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.notification_service.mark_read(&acting, id.0).await?;
        Ok(Json(OkResponse::new("notification read")))
    }

    #[oai(path = "/read-all", method = "post", tag = "SocialTags::Notifications")]
    async fn mark_all_read(&self, auth: BearerAuth) -> Result<Json<CountResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let count = self.app.notification_service.mark_all_read(&acting).await?;
        Ok(Json(CountResponse { count }))
    }

    #[oai(path = "/:id", method = "delete", tag = "SocialTags::Notifications")]
    async fn delete(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.notification_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("notification deleted")))
    }
}

// ---- badges ----

pub struct BadgesApi {
    app: Arc<AppData>,
}

impl BadgesApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[OpenApi(prefix_path = "/badges")]
impl BadgesApi {
    #[oai(path = "/", method = "get", tag = "SocialTags::Badges")]
    async fn list(&self) -> Result<Json<Vec<BadgeResponse>>, ApiError> {
        let badges = self.app.badge_service.all_badges().await?;
        Ok(Json(badges.into_iter().map(Into::into).collect()))
    }

    /// Define a new badge (staff)
    #[oai(path = "/", method = "post", tag = "SocialTags::Badges")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateBadgeRequest>,
    ) -> Result<Json<BadgeResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let badge = self
            .app
            .badge_service
            .create_badge(&acting, body.name, body.description, body.tier)
            .await?;
        Ok(Json(badge.into()))
    }
}

// ---- groups ----

pub struct GroupsApi {
    app: Arc<AppData>,
}

impl GroupsApi {
    pub fn new(app: Arc<AppData>) -> Self {
        Self { app }
    }
}

#[OpenApi(prefix_path = "/groups")]
impl GroupsApi {
    /// Create a group; the creator joins automatically
    #[oai(path = "/", method = "post", tag = "SocialTags::Groups")]
    async fn create(
        &self,
        auth: BearerAuth,
        body: Json<CreateGroupRequest>,
    ) -> Result<Json<GroupResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let body = body.0;
        let group = self
            .app
            .group_service
            .create(&acting, body.name, body.description)
            .await?;
        Ok(Json(group.into()))
    }

    /// Groups the caller belongs to
    #[oai(path = "/mine", method = "get", tag = "SocialTags::Groups")]
    async fn mine(&self, auth: BearerAuth) -> Result<Json<Vec<GroupResponse>>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        let groups = self.app.group_service.groups_for(acting.id).await?;
        Ok(Json(groups.into_iter().map(Into::into).collect()))
    }

    #[oai(path = "/:id", method = "get", tag = "SocialTags::Groups")]
    async fn get(&self, id: Path<i64>) -> Result<Json<GroupResponse>, ApiError> {
        let group = self.app.group_service.get(id.0).await?;
        Ok(Json(group.into()))
    }

    #[oai(path = "/:id/members", method = "get", tag = "SocialTags::Groups")]
    async fn members(&self, id: Path<i64>) -> Result<Json<Vec<PublicUserResponse>>, ApiError> {
        let members = self.app.group_service.members(id.0).await?;
        Ok(Json(members.into_iter().map(Into::into).collect()))
    }

    /// Add a member (group creator or staff)
    #[oai(path = "/:id/members", method = "post", tag = "SocialTags::Groups")]
    async fn add_member(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        body: Json<GroupMemberRequest>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app
            .group_service
            .add_member(&acting, id.0, body.0.user_id)
            .await?;
        Ok(Json(OkResponse::new("member added")))
    }

    /// Remove a member; members may remove themselves
    #[oai(path = "/:id/members/:user_id", method = "delete", tag = "SocialTags::Groups")]
    async fn remove_member(
        &self,
        auth: BearerAuth,
        id: Path<i64>,
        user_id: Path<i64>,
    ) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app
            .group_service
            .remove_member(&acting, id.0, user_id.0)
            .await?;
        Ok(Json(OkResponse::new("member removed")))
    }

    /// Delete a group (creator or staff); members are notified
    #[oai(path = "/:id", method = "delete", tag = "SocialTags::Groups")]
    async fn delete(&self, auth: BearerAuth, id: Path<i64>) -> Result<Json<OkResponse>, ApiError> {
        let acting = authenticate(&self.app, &auth).await?;
        self.app.group_service.delete(&acting, id.0).await?;
        Ok(Json(OkResponse::new("group deleted")))
    }
}
