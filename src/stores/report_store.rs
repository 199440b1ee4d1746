use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder,
};

use crate::errors::ForumError;
use crate::types::db::report::{self, Entity as Report};

pub struct ReportStore;

impl ReportStore {
    pub fn new() -> Self {
        Self
    }

    pub async fn get<C: ConnectionTrait>(&self, conn: &C, id: i64) -> Result<report::Model, ForumError> {
        Report::find_by_id(id)
            .one(conn)
            .await
            .map_err(|e| ForumError::database("find_report_by_id", e))?
            .ok_or_else(|| ForumError::not_found("report", id))
    }

    pub async fn insert<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: report::ActiveModel,
    ) -> Result<report::Model, ForumError> {
        model
            .insert(conn)
            .await
            .map_err(|e| ForumError::database("insert_report", e))
    }

    pub async fn update<C: ConnectionTrait>(
        &self,
        conn: &C,
        model: report::ActiveModel,
    ) -> Result<report::Model, ForumError> {
        model
            .update(conn)
            .await
            .map_err(|e| ForumError::database("update_report", e))
    }

    pub async fn page_all<C: ConnectionTrait>(
        &self,
        conn: &C,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<report::Model>, u64), ForumError> {
        let paginator = Report::find()
            .order_by_desc(report::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_reports", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_reports", e))?;
        Ok((items, total))
    }

    pub async fn page_by_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        status: &str,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<report::Model>, u64), ForumError> {
        let paginator = Report::find()
            .filter(report::Column::Status.eq(status))
            .order_by_desc(report::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_reports_by_status", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_reports_by_status", e))?;
        Ok((items, total))
    }

    pub async fn page_by_reporter<C: ConnectionTrait>(
        &self,
        conn: &C,
        reporter_id: i64,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<report::Model>, u64), ForumError> {
        let paginator = Report::find()
            .filter(report::Column::ReporterId.eq(reporter_id))
            .order_by_desc(report::Column::CreatedAt)
            .paginate(conn, per_page);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| ForumError::database("page_reports_by_reporter", e))?;
        let items = paginator
            .fetch_page(page.saturating_sub(1))
            .await
            .map_err(|e| ForumError::database("page_reports_by_reporter", e))?;
        Ok((items, total))
    }

    pub async fn count_by_status<C: ConnectionTrait>(
        &self,
        conn: &C,
        status: &str,
    ) -> Result<u64, ForumError> {
        Report::find()
            .filter(report::Column::Status.eq(status))
            .count(conn)
            .await
            .map_err(|e| ForumError::database("count_reports_by_status", e))
    }

    pub async fn delete_by_reporter<C: ConnectionTrait>(
        &self,
        conn: &C,
        reporter_id: i64,
    ) -> Result<u64, ForumError> {
        let result = Report::delete_many()
            .filter(report::Column::ReporterId.eq(reporter_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("delete_reports_by_reporter", e))?;
        Ok(result.rows_affected)
    }

    /// Clear resolver references before a user row is removed
    pub async fn clear_resolver<C: ConnectionTrait>(
        &self,
        conn: &C,
        resolver_id: i64,
    ) -> Result<(), ForumError> {
        use sea_orm::sea_query::Expr;
        Report::update_many()
            .col_expr(report::Column::ResolvedBy, Expr::value(Option::<i64>::None))
            .filter(report::Column::ResolvedBy.eq(resolver_id))
            .exec(conn)
            .await
            .map_err(|e| ForumError::database("clear_report_resolver", e))?;
        Ok(())
    }
}
