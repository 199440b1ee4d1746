use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set};

use crate::errors::ForumError;
use crate::types::db::system_setting::{self, Entity as SystemSetting};

/// Key-value system settings, managed from the admin panel.
pub struct SettingsStore;

impl SettingsStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait>(
        &self,
        conn: &C,
        key: &str,
    ) -> Result<Option<system_setting::Model>, ForumError> {
        SystemSetting::find_by_id(key.to_string())
            .one(conn)
            .await
            .map_err(|e| ForumError::database("get_setting", e))
    }

    /// Insert or overwrite a setting
    pub async fn set<C: ConnectionTrait>(
        &self,
        conn: &C,
        key: &str,
        value: String,
        description: Option<String>,
        category: Option<String>,
    ) -> Result<system_setting::Model, ForumError> {
        match self.get(conn, key).await? {
            Some(existing) => {
                let mut model: system_setting::ActiveModel = existing.into();
                model.value = Set(value);
                if description.is_some() {
                    model.description = Set(description);
                }
                if category.is_some() {
                    model.category = Set(category);
                }
                model.updated_at = Set(Utc::now());
                model
                    .update(conn)
                    .await
                    .map_err(|e| ForumError::database("update_setting", e))
            }
            None => {
                let model = system_setting::ActiveModel {
                    key: Set(key.to_string()),
                    value: Set(value),
                    description: Set(description),
                    category: Set(category),
                    updated_at: Set(Utc::now()),
                };
                model
                    .insert(conn)
                    .await
                    .map_err(|e| ForumError::database("insert_setting", e))
            }
        }
    }

    pub async fn find_all<C: ConnectionTrait>(
        &self,
        conn: &C,
    ) -> Result<Vec<system_setting::Model>, ForumError> {
        SystemSetting::find()
            .order_by_asc(system_setting::Column::Key)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_all_settings", e))
    }

    pub async fn find_by_category<C: ConnectionTrait>(
        &self,
        conn: &C,
        category: &str,
    ) -> Result<Vec<system_setting::Model>, ForumError> {
        SystemSetting::find()
            .filter(system_setting::Column::Category.eq(category))
            .order_by_asc(system_setting::Column::Key)
            .all(conn)
            .await
            .map_err(|e| ForumError::database("find_settings_by_category", e))
    }

    pub async fn delete<C: ConnectionTrait>(&self, conn: &C, key: &str) -> Result<(), ForumError> {
        SystemSetting::delete_by_id(key.to_string())
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_setting", e))?;
        Ok(())
    }
}
