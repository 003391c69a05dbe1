//! WHERE and HAVING conditions.

use super::queue::TokenKind;
use super::{Clause, Parenthesis, QueryBuilder};
use crate::condition::{AggregateFunction, Condition, HavingCondition, Operator};
use crate::entity::Entity;
use crate::error::ScribeResult;
use crate::selector::{Column, ColumnGroup};
use crate::value::Value;

impl<E: Entity> QueryBuilder<E> {
    /// `table.column OP @paramN`.
    pub fn where_<T, V>(mut self, column: Column<T, V>, op: Operator, value: impl Into<V>) -> ScribeResult<Self>
    where
        T: Entity,
        V: Into<Value> + 'static,
    {
        let qualified = self.qualified(&column)?;
        let value: V = value.into();
        let placeholder = self.binder.bind(value);
        self.conditions
            .push_condition(format!("{qualified} {op} {placeholder}"));
        Ok(self)
    }

    /// `table.column IN (@p1, @p2, ...)`; an empty list matches nothing (`1=0`).
    pub fn where_in<T, V, I>(self, column: Column<T, V>, values: I) -> ScribeResult<Self>
    where
        T: Entity,
        V: Into<Value> + 'static,
        I: IntoIterator,
        I::Item: Into<V>,
    {
        self.push_membership(column, values, false)
    }

    /// `table.column NOT IN (@p1, @p2, ...)`; an empty list matches everything (`1=1`).
    pub fn where_not_in<T, V, I>(self, column: Column<T, V>, values: I) -> ScribeResult<Self>
    where
        T: Entity,
        V: Into<Value> + 'static,
        I: IntoIterator,
        I::Item: Into<V>,
    {
        self.push_membership(column, values, true)
    }

    /// `table.column BETWEEN @pN AND @pM`.
    pub fn where_between<T, V>(
        self,
        column: Column<T, V>,
        low: impl Into<V>,
        high: impl Into<V>,
    ) -> ScribeResult<Self>
    where
        T: Entity,
        V: Into<Value> + 'static,
    {
        let (low, high): (V, V) = (low.into(), high.into());
        self.push_range(column, low.into(), high.into(), false)
    }

    /// `table.column NOT BETWEEN @pN AND @pM`.
    pub fn where_not_between<T, V>(
        self,
        column: Column<T, V>,
        low: impl Into<V>,
        high: impl Into<V>,
    ) -> ScribeResult<Self>
    where
        T: Entity,
        V: Into<Value> + 'static,
    {
        let (low, high): (V, V) = (low.into(), high.into());
        self.push_range(column, low.into(), high.into(), true)
    }

    /// Conditions joined with `AND` as one operand, optionally parenthesized.
    ///
    /// Conditions may reference any entity, e.g. a joined table. An empty list
    /// leaves the builder unchanged.
    pub fn and_where<I>(self, conditions: I, parenthesize: bool) -> ScribeResult<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        self.push_compound(conditions, "AND", parenthesize)
    }

    /// Conditions joined with `OR` as one operand, optionally parenthesized.
    pub fn or_where<I>(self, conditions: I, parenthesize: bool) -> ScribeResult<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        self.push_compound(conditions, "OR", parenthesize)
    }

    /// Append a raw `AND` to the WHERE or HAVING clause.
    pub fn and(mut self, location: Clause) -> ScribeResult<Self> {
        self.boolean_queue(location)?.push(TokenKind::And, "AND");
        Ok(self)
    }

    /// Append a raw `OR` to the WHERE or HAVING clause.
    pub fn or(mut self, location: Clause) -> ScribeResult<Self> {
        self.boolean_queue(location)?.push(TokenKind::Or, "OR");
        Ok(self)
    }

    /// Open or close a parenthesized group in the WHERE or HAVING clause.
    ///
    /// Balancing is the caller's responsibility.
    pub fn add_parenthesis(mut self, parenthesis: Parenthesis, location: Clause) -> ScribeResult<Self> {
        let queue = self.boolean_queue(location)?;
        match parenthesis {
            Parenthesis::Open => queue.push(TokenKind::Open, "("),
            Parenthesis::Close => queue.push(TokenKind::Close, ")"),
        }
        Ok(self)
    }

    /// `GROUP BY table.column`.
    pub fn group_by<T: Entity, V: 'static>(mut self, column: Column<T, V>) -> ScribeResult<Self> {
        let qualified = self.qualified(&column)?;
        self.group_by.push_item(qualified);
        Ok(self)
    }

    /// `GROUP BY` every member of `group`, in order. Aliases are ignored.
    pub fn group_by_group<T: Entity>(mut self, group: ColumnGroup<T>) -> ScribeResult<Self> {
        for (qualified, _) in self.qualified_group(&group)? {
            self.group_by.push_item(qualified);
        }
        Ok(self)
    }

    /// `FUNC(table.column) OP @paramN` in the HAVING clause.
    pub fn having<T: Entity, V: 'static>(
        mut self,
        function: AggregateFunction,
        column: Column<T, V>,
        op: Operator,
        value: impl Into<Value>,
    ) -> ScribeResult<Self> {
        let qualified = self.qualified(&column)?;
        let placeholder = self.binder.bind(value);
        self.having
            .push_condition(format!("{function}({qualified}) {op} {placeholder}"));
        Ok(self)
    }

    /// HAVING conditions joined with `AND` as one operand, optionally parenthesized.
    pub fn and_having<I>(self, conditions: I, parenthesize: bool) -> ScribeResult<Self>
    where
        I: IntoIterator<Item = HavingCondition>,
    {
        self.push_having_compound(conditions, "AND", parenthesize)
    }

    /// HAVING conditions joined with `OR` as one operand, optionally parenthesized.
    pub fn or_having<I>(self, conditions: I, parenthesize: bool) -> ScribeResult<Self>
    where
        I: IntoIterator<Item = HavingCondition>,
    {
        self.push_having_compound(conditions, "OR", parenthesize)
    }

    fn push_membership<T, V, I>(mut self, column: Column<T, V>, values: I, negated: bool) -> ScribeResult<Self>
    where
        T: Entity,
        V: Into<Value> + 'static,
        I: IntoIterator,
        I::Item: Into<V>,
    {
        let qualified = self.qualified(&column)?;
        let values: Vec<Value> = values.into_iter().map(|v| Into::<V>::into(v).into()).collect();

        let condition = if values.is_empty() {
            if negated { "1=1".to_string() } else { "1=0".to_string() }
        } else {
            let list = self.binder.bind_list(values);
            let keyword = if negated { "NOT IN" } else { "IN" };
            format!("{qualified} {keyword} ({list})")
        };
        self.conditions.push_condition(condition);
        Ok(self)
    }

    fn push_range<T: Entity, V: 'static>(
        mut self,
        column: Column<T, V>,
        low: Value,
        high: Value,
        negated: bool,
    ) -> ScribeResult<Self> {
        let qualified = self.qualified(&column)?;
        let low = self.binder.bind(low);
        let high = self.binder.bind(high);
        let keyword = if negated { "NOT BETWEEN" } else { "BETWEEN" };
        self.conditions
            .push_condition(format!("{qualified} {keyword} {low} AND {high}"));
        Ok(self)
    }

    fn push_compound<I>(mut self, conditions: I, connective: &str, parenthesize: bool) -> ScribeResult<Self>
    where
        I: IntoIterator<Item = Condition>,
    {
        let mut parts = Vec::new();
        for condition in conditions {
            let qualified = self.qualified(&condition.column)?;
            let placeholder = self.binder.bind(condition.value);
            parts.push(format!("{qualified} {} {placeholder}", condition.op));
        }
        if let Some(text) = compound(&parts, connective, parenthesize) {
            self.conditions.push_condition(text);
        }
        Ok(self)
    }

    fn push_having_compound<I>(mut self, conditions: I, connective: &str, parenthesize: bool) -> ScribeResult<Self>
    where
        I: IntoIterator<Item = HavingCondition>,
    {
        let mut parts = Vec::new();
        for condition in conditions {
            let qualified = self.qualified(&condition.column)?;
            let placeholder = self.binder.bind(condition.value);
            parts.push(format!(
                "{}({qualified}) {} {placeholder}",
                condition.function, condition.op
            ));
        }
        if let Some(text) = compound(&parts, connective, parenthesize) {
            self.having.push_condition(text);
        }
        Ok(self)
    }
}

fn compound(parts: &[String], connective: &str, parenthesize: bool) -> Option<String> {
    if parts.is_empty() {
        return None;
    }
    let joined = parts.join(&format!(" {connective} "));
    Some(if parenthesize { format!("({joined})") } else { joined })
}
