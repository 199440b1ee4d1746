use sea_orm::entity::prelude::*;

/// Abuse report against a question, answer, comment or user.
/// Status moves PENDING -> RESOLVED | REJECTED.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "reports")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub reporter_id: i64,
    pub entity_type: String,
    pub entity_id: i64,
    pub reason: String,
    pub description: Option<String>,
    pub status: String,
    pub resolved_by: Option<i64>,
    pub resolution: Option<String>,
    pub created_at: DateTimeUtc,
    pub resolved_at: Option<DateTimeUtc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ReporterId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    Reporter,
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::ResolvedBy",
        to = "super::user::Column::Id",
        on_delete = "SetNull"
    )]
    Resolver,
}

impl ActiveModelBehavior for ActiveModel {}
