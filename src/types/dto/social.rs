use chrono::{DateTime, Utc};
use poem_openapi::Object;

use crate::types::db::{
    badge, image_attachment, message, notification, user, user_badge, user_group,
};

/// Public profile view of a user
#[derive(Object, Debug)]
pub struct PublicUserResponse {
    pub id: i64,
    pub username: String,
    pub about: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image: Option<String>,
    pub reputation: i32,
    pub points: i32,
    pub level: i32,
    pub created_at: DateTime<Utc>,
}

impl From<user::Model> for PublicUserResponse {
    fn from(model: user::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            about: model.about,
            location: model.location,
            website: model.website,
            profile_image: model.profile_image,
            reputation: model.reputation,
            points: model.points,
            level: model.level,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct UpdateProfileRequest {
    pub about: Option<String>,
    pub location: Option<String>,
    pub website: Option<String>,
    pub profile_image: Option<String>,
}

// ---- messages ----

#[derive(Object, Debug)]
pub struct SendMessageRequest {
    pub receiver_id: i64,
    pub subject: String,
    pub body: String,
}

#[derive(Object, Debug)]
pub struct PrivateMessageResponse {
    pub id: i64,
    pub sender_id: i64,
    pub receiver_id: i64,
    pub subject: String,
    pub body: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<message::Model> for PrivateMessageResponse {
    fn from(model: message::Model) -> Self {
        Self {
            id: model.id,
            sender_id: model.sender_id,
            receiver_id: model.receiver_id,
            subject: model.subject,
            body: model.body,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct MessagePage {
    pub items: Vec<PrivateMessageResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

// ---- notifications ----

#[derive(Object, Debug)]
pub struct NotificationResponse {
    pub id: i64,
    pub message: String,
    pub kind: String,
    pub is_read: bool,
    pub created_at: DateTime<Utc>,
}

impl From<notification::Model> for NotificationResponse {
    fn from(model: notification::Model) -> Self {
        Self {
            id: model.id,
            message: model.message,
            kind: model.kind,
            is_read: model.is_read,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct NotificationPage {
    pub items: Vec<NotificationResponse>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
}

// ---- badges ----

#[derive(Object, Debug)]
pub struct BadgeResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub tier: String,
    pub earned_count: i32,
}

impl From<badge::Model> for BadgeResponse {
    fn from(model: badge::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            tier: model.tier,
            earned_count: model.earned_count,
        }
    }
}

#[derive(Object, Debug)]
pub struct CreateBadgeRequest {
    pub name: String,
    pub description: String,
    /// GOLD, SILVER, BRONZE or COMMON
    pub tier: String,
}

#[derive(Object, Debug)]
pub struct UserBadgeResponse {
    pub badge_id: i64,
    pub reason: String,
    pub awarded_at: DateTime<Utc>,
}

impl From<user_badge::Model> for UserBadgeResponse {
    fn from(model: user_badge::Model) -> Self {
        Self {
            badge_id: model.badge_id,
            reason: model.reason,
            awarded_at: model.awarded_at,
        }
    }
}

// ---- groups ----

#[derive(Object, Debug)]
pub struct CreateGroupRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Object, Debug)]
pub struct GroupResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub creator_id: i64,
    pub created_at: DateTime<Utc>,
}

impl From<user_group::Model> for GroupResponse {
    fn from(model: user_group::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            creator_id: model.creator_id,
            created_at: model.created_at,
        }
    }
}

#[derive(Object, Debug)]
pub struct GroupMemberRequest {
    pub user_id: i64,
}

// ---- images ----

#[derive(Object, Debug)]
pub struct ImageResponse {
    pub id: i64,
    pub question_id: Option<i64>,
    pub file_name: String,
    pub content_type: String,
    pub file_size: i64,
    pub storage_path: String,
    pub created_at: DateTime<Utc>,
}

impl From<image_attachment::Model> for ImageResponse {
    fn from(model: image_attachment::Model) -> Self {
        Self {
            id: model.id,
            question_id: model.question_id,
            file_name: model.file_name,
            content_type: model.content_type,
            file_size: model.file_size,
            storage_path: model.storage_path,
            created_at: model.created_at,
        }
    }
}
