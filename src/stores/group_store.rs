use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set,
};

use crate::errors::ForumError;
use crate::types::db::group_member::{self, Entity as GroupMember};
use crate::types::db::user_group::{self, Entity as UserGroup};

pub struct GroupStore;

impl GroupStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<user_group::Model, ForumError> {
        UserGroup::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_group_by_id", e))?
            .ok_or_else(|| ForumError::not_found("group", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        name: String,
        description: Option<String>,
        creator_id: i64,
    ) -> Result<user_group::Model, ForumError> {
        let model = user_group::ActiveModel {
            name: Set(name),
            description: Set(description),
            creator_id: Set(creator_id),
            created_at: Set(Utc::now()),
            ..Default::default()
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_group", e))
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        UserGroup::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_group", e))?;
        Ok(())
    }

    pub async fn add_member<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_id: i64,
        user_id: i64,
    ) -> Result<(), ForumError> {
        let model = group_member::ActiveModel {
            group_id: Set(group_id),
            user_id: Set(user_id),
            joined_at: Set(Utc::now()),
        };
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("add_group_member", e))?;
        Ok(())
    }

    pub async fn remove_member<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_id: i64,
        user_id: i64,
    ) -> Result<bool, ForumError> {
        let result = GroupMember::delete_many()
            .filter(group_member::Column::GroupId.eq(group_id))
            .filter(group_member::Column::UserId.eq(user_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("remove_group_member", e))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn is_member<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_id: i64,
        user_id: i64,
    ) -> Result<bool, ForumError> {
        let count = GroupMember::find()
            .filter(group_member::Column::GroupId.eq(group_id))
            .filter(group_member::Column::UserId.eq(user_id))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("is_group_member", e))?;
        Ok(count > 0)
    }

    pub async fn member_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        group_id: i64,
    ) -> Result<Vec<i64>, ForumError> {
        let members = GroupMember::find()
            .filter(group_member::Column::GroupId.eq(group_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("group_member_ids", e))?;
        Ok(members.into_iter().map(|m| m.user_id).collect())
    }

    pub async fn groups_for_member<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<user_group::Model>, ForumError> {
        let memberships = GroupMember::find()
            .filter(group_member::Column::UserId.eq(user_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("groups_for_member", e))?;
        let ids: Vec<i64> = memberships.into_iter().map(|m| m.group_id).collect();
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        UserGroup::find()
            .filter(user_group::Column::Id.is_in(ids))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("groups_for_member", e))
    }
}
