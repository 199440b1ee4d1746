use sea_orm::{DatabaseConnection, Set, TransactionTrait};
use std::sync::Arc;

use crate::errors::ForumError;
use crate::stores::{BadgeStore, UserStore};
use crate::types::db::user::level_for_points;
use crate::types::db::{badge, user, user_badge};
use crate::types::internal::ActingUser;

const DEFAULT_BADGES: &[(&str, &str, &str)] = &[
    ("First Question", "Asked a first question", "BRONZE"),
    ("First Answer", "Posted a first answer", "BRONZE"),
    ("Accepted", "Had an answer accepted", "SILVER"),
    ("Curator", "Had a question approved by moderation", "BRONZE"),
];

/// Badge awarding with idempotence and tier-based point grants.
pub struct BadgeService {
    db: DatabaseConnection,
    badge_store: Arc<BadgeStore>,
    user_store: Arc<UserStore>,
}

impl BadgeService {
    pub fn new(
        db: DatabaseConnection,
        badge_store: Arc<BadgeStore>,
        user_store: Arc<UserStore>,
    ) -> Self {
        Self {
            db,
            badge_store,
            user_store,
        }
    }

    /// Create the built-in badges when missing. Run once at startup.
    pub async fn seed_defaults(&self) -> Result<(), ForumError> {
        for (name, description, tier) in DEFAULT_BADGES {
            if self.badge_store.find_by_name(&self.db, name).await?.is_none() {
                self.badge_store
                    .insert(
                        &self.db,
                        name.to_string(),
                        description.to_string(),
                        tier.to_string(),
                    )
                    .await?;
            }
        }
        Ok(())
    }

    /// Award a badge by name. A missing badge or an already-held badge is a
    /// no-op returning false. Otherwise records the award, bumps the badge's
    /// earned counter and grants tier points, all in one transaction.
    pub async fn award(
        &self,
        user_id: i64,
        badge_name: &str,
        reason: &str,
    ) -> Result<bool, ForumError> {
        let Some(badge) = self.badge_store.find_by_name(&self.db, badge_name).await? else {
            return Ok(false);
        };
        if self
            .badge_store
            .user_has_badge(&self.db, user_id, badge.id)
            .await?
        {
            return Ok(false);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| ForumError::transaction("award_badge", e))?;

        self.badge_store
            .award(&txn, user_id, badge.id, reason.to_string())
            .await?;
        self.badge_store.increment_earned_count(&txn, badge.id).await?;

        let user = self.user_store.get(&txn, user_id).await?;
        let points = user.points + tier_points(&badge.tier);
        let mut model: user::ActiveModel = user.into();
        model.points = Set(points);
        model.level = Set(level_for_points(points));
        UserStore::touch(&mut model);
        self.user_store.update(&txn, model).await?;

        txn.commit()
            .await
            .map_err(|e| ForumError::transaction("award_badge", e))?;

        tracing::info!(user_id, badge = badge_name, "badge awarded");
        Ok(true)
    }

    /// Fire-and-forget awarding used after workflow commits.
    pub async fn try_award(&self, user_id: i64, badge_name: &str, reason: &str) {
        if let Err(e) = self.award(user_id, badge_name, reason).await {
            tracing::warn!(user_id, badge = badge_name, "badge award failed: {e}");
        }
    }

    pub async fn all_badges(&self) -> Result<Vec<badge::Model>, ForumError> {
        self.badge_store.find_all(&self.db).await
    }

    pub async fn badges_for_user(&self, user_id: i64) -> Result<Vec<user_badge::Model>, ForumError> {
        self.badge_store.find_user_badges(&self.db, user_id).await
    }

    /// Admin: define a new badge
    pub async fn create_badge(
        &self,
        acting: &ActingUser,
        name: String,
        description: String,
        tier: String,
    ) -> Result<badge::Model, ForumError> {
        if !acting.is_staff() {
            return Err(ForumError::forbidden("staff role required"));
        }
        if name.trim().is_empty() {
            return Err(ForumError::validation("badge name must not be empty"));
        }
        if self.badge_store.find_by_name(&self.db, &name).await?.is_some() {
            return Err(ForumError::conflict(format!("badge '{name}' already exists")));
        }
        self.badge_store.insert(&self.db, name, description, tier).await
    }
}

fn tier_points(tier: &str) -> i32 {
    match tier.to_uppercase().as_str() {
        "GOLD" => 100,
        "SILVER" => 50,
        "BRONZE" => 25,
        _ => 10,
    }
}
