//! JOIN clauses.

use super::QueryBuilder;
use crate::entity::Entity;
use crate::error::{ScribeError, ScribeResult};
use crate::selector::{Column, Selector};
use std::fmt;
use std::str::FromStr;

/// Kind of join.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
}

impl JoinKind {
    pub fn as_sql(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER JOIN",
            JoinKind::Left => "LEFT JOIN",
            JoinKind::Right => "RIGHT JOIN",
            JoinKind::Full => "FULL JOIN",
        }
    }
}

impl fmt::Display for JoinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

impl FromStr for JoinKind {
    type Err = ScribeError;

    /// Accepts `inner`, `LEFT JOIN`, `left_outer`, `full outer join`, ...
    fn from_str(s: &str) -> ScribeResult<Self> {
        let normalized = s.trim().to_ascii_lowercase().replace(['_', '-'], " ");
        let mut words: Vec<&str> = normalized.split_whitespace().collect();
        if words.last() == Some(&"join") {
            words.pop();
        }
        if words.len() == 2 && words[1] == "outer" && words[0] != "inner" {
            words.pop();
        }

        match words.as_slice() {
            ["inner"] => Ok(JoinKind::Inner),
            ["left"] => Ok(JoinKind::Left),
            ["right"] => Ok(JoinKind::Right),
            ["full"] => Ok(JoinKind::Full),
            _ => Err(ScribeError::InvalidJoinType(s.to_string())),
        }
    }
}

impl<E: Entity> QueryBuilder<E> {
    /// `KIND JOIN to_table ON from_table.from_column = to_table.to_column`.
    pub fn join<A, B, V, W>(
        mut self,
        kind: JoinKind,
        from: Column<A, V>,
        to: Column<B, W>,
    ) -> ScribeResult<Self>
    where
        A: Entity,
        B: Entity,
        V: 'static,
        W: 'static,
    {
        let left = self.qualified(&from)?;
        let right = self.qualified(&to)?;
        let to_table = self.table_of(&to.entity());
        self.join.push_item(format!("{kind} {to_table} ON {left} = {right}"));
        Ok(self)
    }

    pub fn inner_join<A, B, V, W>(self, from: Column<A, V>, to: Column<B, W>) -> ScribeResult<Self>
    where
        A: Entity,
        B: Entity,
        V: 'static,
        W: 'static,
    {
        self.join(JoinKind::Inner, from, to)
    }

    pub fn left_join<A, B, V, W>(self, from: Column<A, V>, to: Column<B, W>) -> ScribeResult<Self>
    where
        A: Entity,
        B: Entity,
        V: 'static,
        W: 'static,
    {
        self.join(JoinKind::Left, from, to)
    }

    pub fn right_join<A, B, V, W>(self, from: Column<A, V>, to: Column<B, W>) -> ScribeResult<Self>
    where
        A: Entity,
        B: Entity,
        V: 'static,
        W: 'static,
    {
        self.join(JoinKind::Right, from, to)
    }

    pub fn full_join<A, B, V, W>(self, from: Column<A, V>, to: Column<B, W>) -> ScribeResult<Self>
    where
        A: Entity,
        B: Entity,
        V: 'static,
        W: 'static,
    {
        self.join(JoinKind::Full, from, to)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_join_kinds() {
        assert_eq!("inner".parse::<JoinKind>().unwrap(), JoinKind::Inner);
        assert_eq!("LEFT JOIN".parse::<JoinKind>().unwrap(), JoinKind::Left);
        assert_eq!("right_outer".parse::<JoinKind>().unwrap(), JoinKind::Right);
        assert_eq!("Full Outer Join".parse::<JoinKind>().unwrap(), JoinKind::Full);
    }

    #[test]
    fn reject_unknown_join_kind() {
        for bad in ["cross", "", "inner outer", "natural join"] {
            let err = bad.parse::<JoinKind>().unwrap_err();
            assert_eq!(err, ScribeError::InvalidJoinType(bad.to_string()));
        }
    }
}
