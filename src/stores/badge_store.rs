use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::ForumError;
use crate::types::db::badge::{self, Entity as Badge};
use crate::types::db::user_badge::{self, Entity as UserBadge};

pub struct BadgeStore;

impl BadgeStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_name<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: &str,
    ) -> Result<Option<badge::Model>, ForumError> {
        Badge::find()
            .filter(badge::Column::Name.eq(name))
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_badge_by_name", e))
    }

    pub async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<badge::Model>, ForumError> {
        Badge::find()
            .order_by_asc(badge::Column::Name)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_all_badges", e))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: String,
        description: String,
        tier: String,
    ) -> Result<badge::Model, ForumError> {
        let model = badge::ActiveModel {
            name: Set(name),
            description: Set(description),
            tier: Set(tier),
            earned_count: Set(0),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_badge", e))
    }

    pub async fn increment_earned_count<C: ConnectionTrait>(
        &self,
        conn: &C,
        badge_id: i64,
    ) -> Result<(), ForumError> {
        Badge::update_many()
            .col_expr(
                badge::Column::EarnedCount,
                Expr::col(badge::Column::EarnedCount).add(1),
            )
            .filter(badge::Column::Id.eq(badge_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("increment_badge_earned_count", e))?;
        Ok(())
    }

    pub async fn user_has_badge<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        badge_id: i64,
    ) -> Result<bool, ForumError> {
        let count = UserBadge::find()
            .filter(user_badge::Column::UserId.eq(user_id))
            .filter(user_badge::Column::BadgeId.eq(badge_id))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("user_has_badge", e))?;
        Ok(count > 0)
    }

    pub async fn award<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
        badge_id: i64,
        reason: String,
    ) -> Result<user_badge::Model, ForumError> {
        let model = user_badge::ActiveModel {
            user_id: Set(user_id),
            badge_id: Set(badge_id),
            reason: Set(reason),
            awarded_at: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("award_badge", e))
    }

    pub async fn find_user_badges<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<user_badge::Model>, ForumError> {
        UserBadge::find()
            .filter(user_badge::Column::UserId.eq(user_id))
            .order_by_desc(user_badge::Column::AwardedAt)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_user_badges", e))
    }
}
