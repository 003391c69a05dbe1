//! Projection and aggregation.

use super::QueryBuilder;
use crate::condition::AggregateFunction;
use crate::entity::Entity;
use crate::error::{ScribeError, ScribeResult};
use crate::selector::{Column, ColumnGroup};
use crate::value::Value;

impl<E: Entity> QueryBuilder<E> {
    /// Project every column (`SELECT *`).
    ///
    /// Replaces any explicit columns registered so far; a later
    /// [`select`](Self::select) switches back to explicit columns.
    pub fn select_all(mut self) -> Self {
        self.select.clear();
        self.select_all = true;
        self
    }

    /// Append `table.column` to the projection.
    pub fn select<T: Entity, V: 'static>(self, column: Column<T, V>) -> ScribeResult<Self> {
        self.push_select(column, None)
    }

    /// Append `table.column AS "alias"` to the projection.
    pub fn select_as<T: Entity, V: 'static>(
        self,
        column: Column<T, V>,
        alias: &str,
    ) -> ScribeResult<Self> {
        if alias.trim().is_empty() {
            return Err(ScribeError::invalid_selector(format!(
                "alias for '{}' must not be empty",
                column.path()
            )));
        }
        self.push_select(column, Some(alias))
    }

    /// Append every member of `group`, in order, honoring per-member aliases.
    pub fn select_group<T: Entity>(mut self, group: ColumnGroup<T>) -> ScribeResult<Self> {
        let columns = self.qualified_group(&group)?;
        self.select_all = false;
        for (qualified, alias) in columns {
            let item = format!("{qualified}{}", self.alias_suffix(alias.as_deref()));
            self.select.push_item(item);
        }
        Ok(self)
    }

    /// Project `source` under the column name of `destination`:
    /// `source_table.source_column AS destination_column`.
    ///
    /// Both selectors share a value type, so the mapping cannot silently
    /// change a column's type.
    pub fn map_select<S: Entity, D: Entity, V: 'static>(
        mut self,
        source: Column<S, V>,
        destination: Column<D, V>,
    ) -> ScribeResult<Self> {
        let source = self.qualified(&source)?;
        let destination = self.column_name(&destination)?;
        self.select_all = false;
        self.select.push_item(format!("{source} AS {destination}"));
        Ok(self)
    }

    /// `COUNT(table.column)`, optionally aliased.
    pub fn count<T: Entity, V: 'static>(
        self,
        column: Column<T, V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self> {
        self.aggregate_fn(AggregateFunction::Count, column, alias)
    }

    /// `MAX(table.column)`, optionally aliased.
    pub fn max<T: Entity, V: 'static>(
        self,
        column: Column<T, V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self> {
        self.aggregate_fn(AggregateFunction::Max, column, alias)
    }

    /// `MIN(table.column)`, optionally aliased.
    pub fn min<T: Entity, V: 'static>(
        self,
        column: Column<T, V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self> {
        self.aggregate_fn(AggregateFunction::Min, column, alias)
    }

    /// `AVG(table.column)`, optionally aliased.
    pub fn avg<T: Entity, V: 'static>(
        self,
        column: Column<T, V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self> {
        self.aggregate_fn(AggregateFunction::Avg, column, alias)
    }

    /// `SUM(table.column)`, optionally aliased.
    pub fn sum<T: Entity, V: 'static>(
        self,
        column: Column<T, V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self> {
        self.aggregate_fn(AggregateFunction::Sum, column, alias)
    }

    /// `COALESCE(SUM(table.column), @paramN)` with `default` bound as a parameter.
    pub fn sum_coalesce<T, V>(
        mut self,
        column: Column<T, V>,
        default: impl Into<V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self>
    where
        T: Entity,
        V: Into<Value> + 'static,
    {
        let qualified = self.qualified(&column)?;
        let default: V = default.into();
        let placeholder = self.binder.bind(default);
        let item = format!(
            "COALESCE(SUM({qualified}), {placeholder}){}",
            self.alias_suffix(alias)
        );
        self.aggregate.push_item(item);
        Ok(self)
    }

    fn push_select<T: Entity, V: 'static>(
        mut self,
        column: Column<T, V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self> {
        let qualified = self.qualified(&column)?;
        self.select_all = false;
        let item = format!("{qualified}{}", self.alias_suffix(alias));
        self.select.push_item(item);
        Ok(self)
    }

    fn aggregate_fn<T: Entity, V: 'static>(
        mut self,
        function: AggregateFunction,
        column: Column<T, V>,
        alias: Option<&str>,
    ) -> ScribeResult<Self> {
        let qualified = self.qualified(&column)?;
        let item = format!("{function}({qualified}){}", self.alias_suffix(alias));
        self.aggregate.push_item(item);
        Ok(self)
    }
}
