//! Linearizes builder state into one statement.

use super::{Clause, QueryBuilder};
use crate::entity::Entity;
use crate::error::{ScribeError, ScribeResult};
use crate::param::{ParamBinder, Parameters};
use crate::vendor::DatabaseVendor;
use serde::Serialize;
use tracing::debug;

/// A compiled statement: SQL text plus its parameters in placeholder order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuiltQuery {
    sql: String,
    params: Parameters,
}

impl BuiltQuery {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Placeholder name -> value, in allocation order.
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    pub fn into_parts(self) -> (String, Parameters) {
        (self.sql, self.params)
    }

    /// Parameters as a JSON object, in placeholder order.
    pub fn params_json(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.params
                .iter()
                .map(|(name, value)| {
                    let value = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                    (name.clone(), value)
                })
                .collect(),
        )
    }
}

impl<E: Entity> QueryBuilder<E> {
    /// Compile the statement, terminated by `;`.
    ///
    /// The builder is left untouched, so repeated builds produce identical
    /// output.
    pub fn build(&self) -> ScribeResult<BuiltQuery> {
        self.compile(false)
    }

    /// Compile the statement without the trailing `;`, for embedding.
    pub fn build_without_semicolon(&self) -> ScribeResult<BuiltQuery> {
        self.compile(true)
    }

    fn compile(&self, exclude_trailing_semicolon: bool) -> ScribeResult<BuiltQuery> {
        let table = self.table_name();
        let mut binder = self.binder.clone();

        let (kind, raw) = if self.delete {
            ("DELETE", self.compile_delete(&table)?)
        } else {
            ("SELECT", self.compile_select(&table, &mut binder)?)
        };

        let mut sql = normalize_whitespace(&raw, self.vendor);
        while sql.ends_with(';') {
            sql.pop();
            sql.truncate(sql.trim_end().len());
        }
        if !exclude_trailing_semicolon {
            sql.push(';');
        }

        debug!(
            target: "sqlscribe.sql",
            statement = kind,
            param_count = binder.len(),
            sql = %sql,
            "built statement"
        );

        Ok(BuiltQuery {
            sql,
            params: binder.into_params(),
        })
    }

    fn compile_delete(&self, table: &str) -> ScribeResult<String> {
        if let Some(clause) = self.delete_conflict() {
            return Err(ScribeError::DeleteConflict(clause));
        }

        let mut sql = format!("DELETE FROM {table}");
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.render_conditions());
        }
        Ok(sql)
    }

    /// First clause that cannot be combined with DELETE, in clause order.
    fn delete_conflict(&self) -> Option<Clause> {
        let checks = [
            (Clause::Select, self.select_all || !self.select.is_empty()),
            (Clause::Aggregate, !self.aggregate.is_empty()),
            (Clause::Join, !self.join.is_empty()),
            (Clause::GroupBy, !self.group_by.is_empty()),
            (Clause::Having, !self.having.is_empty()),
            (Clause::OrderBy, !self.order_by.is_empty()),
            (Clause::Page, self.page.is_some()),
            (Clause::Limit, self.limit.is_some()),
        ];
        checks
            .into_iter()
            .find_map(|(clause, present)| present.then_some(clause))
    }

    fn compile_select(&self, table: &str, binder: &mut ParamBinder) -> ScribeResult<String> {
        let mut columns: Vec<&str> = Vec::with_capacity(self.select.len() + self.aggregate.len() + 1);
        if self.select_all {
            columns.push("*");
        } else {
            columns.extend(self.select.texts());
        }
        columns.extend(self.aggregate.texts());
        if columns.is_empty() {
            return Err(ScribeError::MissingProjection);
        }

        let mut sql = format!("SELECT {} FROM {table}", columns.join(", "));

        if !self.join.is_empty() {
            sql.push(' ');
            sql.push_str(&self.join.join(" "));
        }
        if !self.conditions.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&self.conditions.render_conditions());
        }
        if !self.group_by.is_empty() {
            sql.push_str(" GROUP BY ");
            sql.push_str(&self.group_by.join(", "));
        }
        if !self.having.is_empty() {
            sql.push_str(" HAVING ");
            sql.push_str(&self.having.render_conditions());
        }
        if !self.order_by.is_empty() {
            sql.push_str(" ORDER BY ");
            sql.push_str(&self.order_by.join(", "));
        }

        // Paging binds on the caller's copy of the binder.
        if let Some(limit) = self.limit {
            let limit_param = binder.bind(to_i64(limit));
            sql.push_str(" LIMIT ");
            sql.push_str(&limit_param);

            if let Some(page) = self.page {
                let offset = (page - 1).saturating_mul(limit);
                let offset_param = binder.bind(to_i64(offset));
                sql.push_str(" OFFSET ");
                sql.push_str(&offset_param);
            }
        }

        Ok(sql)
    }
}

fn to_i64(n: u64) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Collapse whitespace runs to one space and trim, leaving text inside the
/// vendor's alias delimiters untouched.
fn normalize_whitespace(sql: &str, vendor: DatabaseVendor) -> String {
    let delimiters = vendor.delimiters();
    let mut out = String::with_capacity(sql.len());
    let mut quoted_until: Option<char> = None;
    let mut pending_space = false;

    let mut chars = sql.chars().peekable();
    while let Some(ch) = chars.next() {
        if let Some(close) = quoted_until {
            out.push(ch);
            if ch == close {
                // A doubled closing delimiter is an escaped character.
                if chars.peek() == Some(&close) {
                    chars.next();
                    out.push(close);
                } else {
                    quoted_until = None;
                }
            }
            continue;
        }

        if ch.is_whitespace() {
            pending_space = !out.is_empty();
            continue;
        }
        if pending_space {
            out.push(' ');
            pending_space = false;
        }
        out.push(ch);
        if let Some((open, close)) = delimiters
            && ch == open
        {
            quoted_until = Some(close);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_runs() {
        assert_eq!(
            normalize_whitespace("  SELECT  *\n\tFROM books  ", DatabaseVendor::PostgreSql),
            "SELECT * FROM books"
        );
    }

    #[test]
    fn normalize_keeps_quoted_aliases() {
        assert_eq!(
            normalize_whitespace(r#"SELECT a AS "two  words"   FROM t"#, DatabaseVendor::PostgreSql),
            r#"SELECT a AS "two  words" FROM t"#
        );
        assert_eq!(
            normalize_whitespace("SELECT a AS [x  y] FROM t", DatabaseVendor::SqlServer),
            "SELECT a AS [x  y] FROM t"
        );
    }

    #[test]
    fn normalize_keeps_escaped_delimiters_inside_aliases() {
        assert_eq!(
            normalize_whitespace("SELECT a AS [a]]  b]   FROM t", DatabaseVendor::SqlServer),
            "SELECT a AS [a]]  b] FROM t"
        );
        assert_eq!(
            normalize_whitespace(r#"SELECT a AS "say ""hi""  now"  FROM t"#, DatabaseVendor::PostgreSql),
            r#"SELECT a AS "say ""hi""  now" FROM t"#
        );
        assert_eq!(
            normalize_whitespace("SELECT a AS `x``  y`  FROM t", DatabaseVendor::MySql),
            "SELECT a AS `x``  y` FROM t"
        );
    }
}
