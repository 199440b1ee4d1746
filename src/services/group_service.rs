use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::errors::ForumError;
use crate::services::NotificationService;
use crate::stores::{GroupStore, UserStore};
use crate::types::db::{user, user_group};
use crate::types::internal::ActingUser;

/// User groups: membership management with notification fan-out on every
/// membership change, mirroring the group announcements of the web UI.
pub struct GroupService {
    db: DatabaseConnection,
    group_store: Arc<GroupStore>,
    user_store: Arc<UserStore>,
    notifications: Arc<NotificationService>,
}

impl GroupService {
    pub fn new(
        db: DatabaseConnection,
        group_store: Arc<GroupStore>,
        user_store: Arc<UserStore>,
        notifications: Arc<NotificationService>,
    ) -> Self {
        Self {
            db,
            group_store,
            user_store,
            notifications,
        }
    }

    pub async fn create(
        &self,
        acting: &ActingUser,
        name: String,
        description: Option<String>,
    ) -> Result<user_group::Model, ForumError> {
        let name = name.trim().to_string();
        if name.is_empty() {
            return Err(ForumError::validation("group name must not be empty"));
        }
        let creator = self.user_store.get(&self.db, acting.id).await?;
        let group = self
            .group_store
            .insert(&self.db, name.clone(), description, creator.id)
            .await?;
        self.group_store.add_member(&self.db, group.id, creator.id).await?;

        self.notifications
            .notify(creator.id, format!("Group '{name}' created"), "group")
            .await;
        Ok(group)
    }

    pub async fn get(&self, id: i64) -> Result<user_group::Model, ForumError> {
        self.group_store.get(&self.db, id).await
    }

    pub async fn add_member(
        &self,
        acting: &ActingUser,
        group_id: i64,
        user_id: i64,
    ) -> Result<(), ForumError> {
        let group = self.group_store.get(&self.db, group_id).await?;
        if group.creator_id != acting.id && !acting.is_staff() {
            return Err(ForumError::forbidden("only the group creator or staff manage members"));
        }
        let user = self.user_store.get(&self.db, user_id).await?;
        if self.group_store.is_member(&self.db, group.id, user.id).await? {
            return Err(ForumError::conflict("user is already a member of this group"));
        }
        self.group_store.add_member(&self.db, group.id, user.id).await?;

        self.notifications
            .notify(
                user.id,
                format!("You have been added to group '{}'", group.name),
                "group",
            )
            .await;
        Ok(())
    }

    pub async fn remove_member(
        &self,
        acting: &ActingUser,
        group_id: i64,
        user_id: i64,
    ) -> Result<(), ForumError> {
        let group = self.group_store.get(&self.db, group_id).await?;
        // members may leave on their own; otherwise creator or staff
        if acting.id != user_id && group.creator_id != acting.id && !acting.is_staff() {
            return Err(ForumError::forbidden("only the group creator or staff manage members"));
        }
        let removed = self.group_store.remove_member(&self.db, group.id, user_id).await?;
        if !removed {
            return Err(ForumError::not_found("group member", user_id));
        }

        self.notifications
            .notify(
                user_id,
                format!("You have been removed from group '{}'", group.name),
                "group",
            )
            .await;
        Ok(())
    }

    pub async fn members(&self, group_id: i64) -> Result<Vec<user::Model>, ForumError> {
        let ids = self.group_store.member_ids(&self.db, group_id).await?;
        self.user_store.find_by_ids(&self.db, ids).await
    }

    pub async fn groups_for(&self, user_id: i64) -> Result<Vec<user_group::Model>, ForumError> {
        self.group_store.groups_for_member(&self.db, user_id).await
    }

    pub async fn delete(&self, acting: &ActingUser, group_id: i64) -> Result<(), ForumError> {
        let group = self.group_store.get(&self.db, group_id).await?;
        if group.creator_id != acting.id && !acting.is_staff() {
            return Err(ForumError::forbidden("only the group creator or staff delete a group"));
        }
        let member_ids = self.group_store.member_ids(&self.db, group.id).await?;
        self.group_store.delete_by_id(&self.db, group.id).await?;

        for member_id in member_ids {
            self.notifications
                .notify(member_id, format!("Group '{}' was deleted", group.name), "group")
                .await;
        }
        Ok(())
    }
}
