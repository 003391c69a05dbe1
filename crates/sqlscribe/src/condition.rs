//! Comparison operators, aggregate functions and the composite condition types
//! accepted by the list forms of WHERE and HAVING.

use crate::entity::Entity;
use crate::error::{ScribeError, ScribeResult};
use crate::selector::{Column, ColumnRef};
use crate::value::Value;
use std::fmt;
use std::str::FromStr;

/// Comparison operator of a condition.
///
/// # Example
/// ```ignore
/// use sqlscribe::Operator;
///
/// assert_eq!(Operator::NotEqual.as_sql(), "<>");
/// assert_eq!("like".parse::<Operator>()?, Operator::Like);
/// assert_eq!(">=".parse::<Operator>()?, Operator::GreaterThanOrEqual);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    /// `=`
    Equal,
    /// `>`
    GreaterThan,
    /// `<`
    LessThan,
    /// `>=`
    GreaterThanOrEqual,
    /// `<=`
    LessThanOrEqual,
    /// `<>`
    NotEqual,
    /// `LIKE`
    Like,
}

impl Operator {
    pub fn as_sql(self) -> &'static str {
        match self {
            Operator::Equal => "=",
            Operator::GreaterThan => ">",
            Operator::LessThan => "<",
            Operator::GreaterThanOrEqual => ">=",
            Operator::LessThanOrEqual => "<=",
            Operator::NotEqual => "<>",
            Operator::Like => "LIKE",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for Operator {
    type Err = ScribeError;

    /// Accepts SQL symbols (`=`, `<>`, `!=`, ...) and operator names
    /// (`Equal`, `greater_than_or_equal`, `gte`, ...).
    fn from_str(s: &str) -> ScribeResult<Self> {
        let trimmed = s.trim();
        let by_symbol = match trimmed {
            "=" | "==" => Some(Operator::Equal),
            ">" => Some(Operator::GreaterThan),
            "<" => Some(Operator::LessThan),
            ">=" => Some(Operator::GreaterThanOrEqual),
            "<=" => Some(Operator::LessThanOrEqual),
            "<>" | "!=" => Some(Operator::NotEqual),
            _ => None,
        };
        if let Some(op) = by_symbol {
            return Ok(op);
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match normalized.as_str() {
            "equal" | "equals" | "eq" => Ok(Operator::Equal),
            "greaterthan" | "gt" => Ok(Operator::GreaterThan),
            "lessthan" | "lt" => Ok(Operator::LessThan),
            "greaterthanorequal" | "gte" | "ge" => Ok(Operator::GreaterThanOrEqual),
            "lessthanorequal" | "lte" | "le" => Ok(Operator::LessThanOrEqual),
            "notequal" | "ne" | "neq" => Ok(Operator::NotEqual),
            "like" => Ok(Operator::Like),
            _ => Err(ScribeError::UnsupportedOperator(s.to_string())),
        }
    }
}

/// Aggregate function applied to a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AggregateFunction {
    Count,
    Sum,
    Min,
    Max,
    Avg,
}

impl AggregateFunction {
    pub fn as_sql(self) -> &'static str {
        match self {
            AggregateFunction::Count => "COUNT",
            AggregateFunction::Sum => "SUM",
            AggregateFunction::Min => "MIN",
            AggregateFunction::Max => "MAX",
            AggregateFunction::Avg => "AVG",
        }
    }
}

impl fmt::Display for AggregateFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// One `column OP value` comparison, used by
/// [`and_where`](crate::QueryBuilder::and_where) and
/// [`or_where`](crate::QueryBuilder::or_where).
///
/// The column may belong to any entity, so conditions can reference joined
/// tables.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub(crate) column: ColumnRef,
    pub(crate) op: Operator,
    pub(crate) value: Value,
}

impl Condition {
    pub fn new<E, V>(column: Column<E, V>, op: Operator, value: impl Into<V>) -> Self
    where
        E: Entity,
        V: Into<Value> + 'static,
    {
        let value: V = value.into();
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn eq<E, V>(column: Column<E, V>, value: impl Into<V>) -> Self
    where
        E: Entity,
        V: Into<Value> + 'static,
    {
        Self::new(column, Operator::Equal, value)
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

/// One `FUNC(column) OP value` comparison, used by the HAVING list forms.
#[derive(Debug, Clone, PartialEq)]
pub struct HavingCondition {
    pub(crate) function: AggregateFunction,
    pub(crate) column: ColumnRef,
    pub(crate) op: Operator,
    pub(crate) value: Value,
}

impl HavingCondition {
    /// The value is compared against the aggregate, so it is not tied to the
    /// column's value type (`COUNT(title) > 3`).
    pub fn new<E, V>(
        function: AggregateFunction,
        column: Column<E, V>,
        op: Operator,
        value: impl Into<Value>,
    ) -> Self
    where
        E: Entity,
        V: 'static,
    {
        Self {
            function,
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    pub fn function(&self) -> AggregateFunction {
        self.function
    }

    pub fn column(&self) -> &ColumnRef {
        &self.column
    }

    pub fn op(&self) -> Operator {
        self.op
    }

    pub fn value(&self) -> &Value {
        &self.value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Book;

    impl Entity for Book {
        const ENTITY_NAME: &'static str = "Book";
    }

    impl Book {
        const TITLE: Column<Book, String> = Column::new("title");
        const AUTHOR_ID: Column<Book, Option<i32>> = Column::new("author_id");
    }

    #[test]
    fn operator_sql() {
        let all = [
            (Operator::Equal, "="),
            (Operator::GreaterThan, ">"),
            (Operator::LessThan, "<"),
            (Operator::GreaterThanOrEqual, ">="),
            (Operator::LessThanOrEqual, "<="),
            (Operator::NotEqual, "<>"),
            (Operator::Like, "LIKE"),
        ];
        for (op, sql) in all {
            assert_eq!(op.as_sql(), sql);
            assert_eq!(sql.parse::<Operator>().unwrap(), op);
        }
    }

    #[test]
    fn operator_names_parse() {
        assert_eq!("GreaterThanOrEqual".parse::<Operator>().unwrap(), Operator::GreaterThanOrEqual);
        assert_eq!("not_equal".parse::<Operator>().unwrap(), Operator::NotEqual);
        assert_eq!("!=".parse::<Operator>().unwrap(), Operator::NotEqual);
    }

    #[test]
    fn unknown_operator_is_rejected() {
        let err = "ILIKE".parse::<Operator>().unwrap_err();
        assert_eq!(err, ScribeError::UnsupportedOperator("ILIKE".into()));
    }

    #[test]
    fn condition_converts_value_through_column_type() {
        let c = Condition::new(Book::TITLE, Operator::Like, "%dune%");
        assert_eq!(c.value(), &Value::Text("%dune%".into()));
        assert_eq!(c.column().path(), "title");

        let nullable = Condition::eq(Book::AUTHOR_ID, 3);
        assert_eq!(nullable.value(), &Value::Int(3));
        let null = Condition::eq(Book::AUTHOR_ID, None::<i32>);
        assert!(null.value().is_null());
    }

    #[test]
    fn having_condition_value_is_free() {
        let h = HavingCondition::new(AggregateFunction::Count, Book::TITLE, Operator::GreaterThan, 3);
        assert_eq!(h.function().as_sql(), "COUNT");
        assert_eq!(h.value(), &Value::Int(3));
    }
}
