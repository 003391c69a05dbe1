//! ORDER BY, pagination and the DELETE switch.

use super::QueryBuilder;
use crate::entity::Entity;
use crate::error::ScribeResult;
use crate::selector::Column;

impl<E: Entity> QueryBuilder<E> {
    /// `ORDER BY table.column ASC`.
    pub fn order_by_asc<T: Entity, V: 'static>(self, column: Column<T, V>) -> ScribeResult<Self> {
        self.push_order(column, "ASC")
    }

    /// `ORDER BY table.column DESC`.
    pub fn order_by_desc<T: Entity, V: 'static>(self, column: Column<T, V>) -> ScribeResult<Self> {
        self.push_order(column, "DESC")
    }

    /// Maximum number of rows. Values below 1 are clamped to 1.
    pub fn set_limit(mut self, limit: i64) -> Self {
        self.limit = Some(clamp_positive(limit));
        self
    }

    /// 1-based page number; only takes effect together with a limit.
    /// Values below 1 are clamped to 1.
    pub fn set_page(mut self, page: i64) -> Self {
        self.page = Some(clamp_positive(page));
        self
    }

    /// Turn the statement into `DELETE FROM <table> [WHERE ...]`.
    pub fn delete(mut self) -> Self {
        self.delete = true;
        self
    }

    fn push_order<T: Entity, V: 'static>(
        mut self,
        column: Column<T, V>,
        direction: &str,
    ) -> ScribeResult<Self> {
        let qualified = self.qualified(&column)?;
        self.order_by.push_item(format!("{qualified} {direction}"));
        Ok(self)
    }
}

fn clamp_positive(n: i64) -> u64 {
    u64::try_from(n.max(1)).unwrap_or(1)
}
