use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};

use crate::errors::ForumError;
use crate::types::db::user::{self, Entity as User, Role};
use crate::types::db::user_follow::{self, Entity as UserFollow};

pub struct UserStore;

impl UserStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn find_by_id<C: ConnectionTrait>(
        &self,
        conn: &C,
        id: i64,
    ) -> Result<Option<user::Model>, ForumError> {
        User::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_user_by_id", e))
    }

    /// Load a user or fail with NotFound
    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<user::Model, ForumError> {
        self.find_by_id(conn, id)
            .await?
            .ok_or_else(|| ForumError::not_found("user", id))
    }

    pub async fn find_by_username<C: ConnectionTrait>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<Option<user::Model>, ForumError> {
        User::find()
            .filter(user::Column::Username.eq(username))
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_user_by_username", e))
    }

    pub async fn exists_username<C: ConnectionTrait>(
        &self,
        conn: &C,
        username: &str,
    ) -> Result<bool, ForumError> {
        let count = User::find()
            .filter(user::Column::Username.eq(username))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("exists_username", e))?;
        Ok(count > 0)
    }

    pub async fn exists_email<C: ConnectionTrait>(
        &self,
        conn: &C,
        email: &str,
    ) -> Result<bool, ForumError> {
        let count = User::find()
            .filter(user::Column::Email.eq(email))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("exists_email", e))?;
        Ok(count > 0)
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: user::ActiveModel,
    ) -> Result<user::Model, ForumError> {
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_user", e))
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: user::ActiveModel,
    ) -> Result<user::Model, ForumError> {
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("update_user", e))
    }

    pub async fn delete_by_id<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<(), ForumError> {
        User::delete_by_id(id)
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_user", e))?;
        Ok(())
    }

    pub async fn page_all<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<user::Model>, u64), ForumError> {
        let paginator = User::find()
            .order_by_desc(user::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_users", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_users", e))?;
        Ok((items, total))
    }

    pub async fn page_by_reputation<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<user::Model>, u64), ForumError> {
        let paginator = User::find()
            .order_by_desc(user::Column::Reputation)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_users_by_reputation", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_users_by_reputation", e))?;
        Ok((items, total))
    }

    /// Search by username or email substring
    pub async fn search<C: ConnectionTrait>(
        &self,
        conn: &C,
        keyword: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<user::Model>, u64), ForumError> {
        let paginator = User::find()
            .filter(
                Condition::any()
                    .add(user::Column::Username.contains(keyword))
                    .add(user::Column::Email.contains(keyword)),
            )
            .order_by_desc(user::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("search_users", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("search_users", e))?;
        Ok((items, total))
    }

    pub async fn find_by_role<C: ConnectionTrait>(
        &self,
        conn: &C,
        role: Role,
    ) -> Result<Vec<user::Model>, ForumError> {
        User::find()
            .filter(user::Column::Role.eq(role))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_users_by_role", e))
    }

    pub async fn find_all<C: ConnectionTrait>(&self, conn: &C) -> Result<Vec<user::Model>, ForumError> {
        User::find()
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_all_users", e))
    }

    pub async fn count_active<C: ConnectionTrait>(&self, conn: &C) -> Result<u64, ForumError> {
        User::find()
            .filter(user::Column::IsActive.eq(true))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_active_users", e))
    }

    pub async fn count_banned<C: ConnectionTrait>(&self, conn: &C) -> Result<u64, ForumError> {
        User::find()
            .filter(user::Column::IsBanned.eq(true))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_banned_users", e))
    }

    pub async fn count_by_role<C: ConnectionTrait>(
        &self,
        conn: &C,
        role: Role,
    ) -> Result<u64, ForumError> {
        User::find()
            .filter(user::Column::Role.eq(role))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_users_by_role", e))
    }

    /// Touch updated_at together with the given mutation fields
    pub fn touch(model: &mut user::ActiveModel) {
        model.updated_at = Set(Utc::now());
    }

    // ---- follow graph ----

    /// Record a follow edge. Returns false when the edge already existed
    /// (either observed or lost the insert race).
    pub async fn insert_follow<C: ConnectionTrait>(
        &self,
        conn: &C,
        follower_id: i64,
        following_id: i64,
    ) -> Result<bool, ForumError> {
        let model = user_follow::ActiveModel {
            follower_id: Set(follower_id),
            following_id: Set(following_id),
            created_at: Set(Utc::now()),
        };
        match model.insert(conn).await {
            Ok(_) => Ok(true),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => Ok(false),
            Err(e) => Err(ForumError::database("insert_follow", e)),
        }
    }

    pub async fn delete_follow<C: ConnectionTrait>(
        &self,
        conn: &C,
        follower_id: i64,
        following_id: i64,
    ) -> Result<bool, ForumError> {
        let result = UserFollow::delete_many()
            .filter(user_follow::Column::FollowerId.eq(follower_id))
            .filter(user_follow::Column::FollowingId.eq(following_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_follow", e))?;
        Ok(result.rows_affected > 0)
    }

    pub async fn follower_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<i64>, ForumError> {
        let edges = UserFollow::find()
            .filter(user_follow::Column::FollowingId.eq(user_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("follower_ids", e))?;
        Ok(edges.into_iter().map(|e| e.follower_id).collect())
    }

    pub async fn following_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        user_id: i64,
    ) -> Result<Vec<i64>, ForumError> {
        let edges = UserFollow::find()
            .filter(user_follow::Column::FollowerId.eq(user_id))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("following_ids", e))?;
        Ok(edges.into_iter().map(|e| e.following_id).collect())
    }

    pub async fn find_by_ids<C: ConnectionTrait>(
        &self,
        conn: &C,
        ids: Vec<i64>,
    ) -> Result<Vec<user::Model>, ForumError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        User::find()
            .filter(user::Column::Id.is_in(ids))
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_users_by_ids", e))
    }
}
