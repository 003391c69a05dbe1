//! Typed fluent statement builder.
//!
//! [`QueryBuilder<E>`] keeps one ordered token queue per clause category and
//! compiles them into a single parameterized statement on [`build`]:
//!
//! ```ignore
//! use sqlscribe::{Operator, QueryBuilderFactory};
//!
//! let query = factory
//!     .builder::<Book>()
//!     .select(Book::TITLE)?
//!     .where_(Book::PRICE, Operator::GreaterThan, 10.0)?
//!     .order_by_desc(Book::PRICE)?
//!     .set_limit(5)
//!     .build()?;
//!
//! assert_eq!(
//!     query.sql(),
//!     "SELECT books.title FROM books WHERE books.price > @param1 ORDER BY books.price DESC LIMIT @param2;"
//! );
//! ```
//!
//! ## Design
//!
//! - Every column reference goes through the selector resolver, the naming
//!   convention and the process-wide [`MetadataCache`].
//! - Every runtime value becomes a `@paramN` placeholder; values never reach the SQL text.
//! - Queues are append-only. `build` reads them without mutating the builder,
//!   so a builder can be built repeatedly or cloned into variants.
//!
//! [`build`]: QueryBuilder::build

mod compile;
mod filter;
mod join;
mod order;
mod projection;
mod queue;

pub use compile::BuiltQuery;
pub use join::JoinKind;

use crate::cache::MetadataCache;
use crate::entity::{Entity, EntityDescriptor, EntityRef};
use crate::error::{ScribeError, ScribeResult};
use crate::naming::{NamingConvention, pluralize};
use crate::param::ParamBinder;
use crate::selector::{ColumnGroup, Selector};
use crate::vendor::DatabaseVendor;
use queue::ClauseQueue;
use std::any::TypeId;
use std::fmt;
use std::marker::PhantomData;

/// Clause category of a statement.
///
/// Also names the target of [`QueryBuilder::and`], [`QueryBuilder::or`] and
/// [`QueryBuilder::add_parenthesis`], which accept only `Where` and `Having`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Clause {
    Select,
    Aggregate,
    Join,
    Where,
    GroupBy,
    Having,
    OrderBy,
    Page,
    Limit,
}

impl Clause {
    pub fn as_str(self) -> &'static str {
        match self {
            Clause::Select => "SELECT",
            Clause::Aggregate => "aggregate",
            Clause::Join => "JOIN",
            Clause::Where => "WHERE",
            Clause::GroupBy => "GROUP BY",
            Clause::Having => "HAVING",
            Clause::OrderBy => "ORDER BY",
            Clause::Page => "page",
            Clause::Limit => "LIMIT",
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opening or closing parenthesis for [`QueryBuilder::add_parenthesis`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parenthesis {
    Open,
    Close,
}

/// Builder for one statement rooted at entity `E`.
///
/// Created by [`QueryBuilderFactory`](crate::QueryBuilderFactory). Every
/// operation consumes the builder and hands it back, so calls chain; clone it
/// to branch into independent variants.
pub struct QueryBuilder<E> {
    /// Table description of `E` (may be replaced for runtime-named tables)
    descriptor: EntityDescriptor,
    vendor: DatabaseVendor,
    convention: NamingConvention,
    pluralize: bool,
    cache: &'static MetadataCache,
    /// Explicit projection items
    select: ClauseQueue,
    /// Aggregate projection items
    aggregate: ClauseQueue,
    join: ClauseQueue,
    /// WHERE conditions, connectives and parentheses
    conditions: ClauseQueue,
    group_by: ClauseQueue,
    /// HAVING conditions, connectives and parentheses
    having: ClauseQueue,
    order_by: ClauseQueue,
    select_all: bool,
    delete: bool,
    page: Option<u64>,
    limit: Option<u64>,
    binder: ParamBinder,
    _entity: PhantomData<fn() -> E>,
}

impl<E: Entity> QueryBuilder<E> {
    pub(crate) fn new(
        descriptor: EntityDescriptor,
        vendor: DatabaseVendor,
        convention: NamingConvention,
        pluralize: bool,
        cache: &'static MetadataCache,
    ) -> Self {
        Self {
            descriptor,
            vendor,
            convention,
            pluralize,
            cache,
            select: ClauseQueue::default(),
            aggregate: ClauseQueue::default(),
            join: ClauseQueue::default(),
            conditions: ClauseQueue::default(),
            group_by: ClauseQueue::default(),
            having: ClauseQueue::default(),
            order_by: ClauseQueue::default(),
            select_all: false,
            delete: false,
            page: None,
            limit: None,
            binder: ParamBinder::new(),
            _entity: PhantomData,
        }
    }

    pub fn vendor(&self) -> DatabaseVendor {
        self.vendor
    }

    pub fn naming_convention(&self) -> NamingConvention {
        self.convention
    }

    /// Number of parameters bound so far (paging parameters are only added by `build`).
    pub fn param_count(&self) -> usize {
        self.binder.len()
    }

    /// Table name of the root entity.
    pub fn table_name(&self) -> String {
        self.resolve_table(&self.descriptor)
    }

    /// Table name for `entity`; the root entity uses this builder's descriptor.
    fn table_of(&self, entity: &EntityRef) -> String {
        if entity.type_id() == TypeId::of::<E>() {
            self.resolve_table(&self.descriptor)
        } else {
            self.resolve_table(entity.descriptor())
        }
    }

    fn resolve_table(&self, descriptor: &EntityDescriptor) -> String {
        if let Some(table) = descriptor.explicit_table() {
            return table.to_string();
        }
        let converted = if self.pluralize {
            self.cache
                .converted_name(&pluralize(descriptor.name()), self.convention)
        } else {
            self.cache.converted_name(descriptor.name(), self.convention)
        };
        converted.to_string()
    }

    /// Converted column name of a single-member selector.
    fn column_name<S: Selector + ?Sized>(&self, selector: &S) -> ScribeResult<String> {
        let members = self.cache.members(selector)?;
        let member = members
            .first()
            .ok_or_else(|| ScribeError::invalid_selector("selector resolved to no members"))?;
        Ok(self.cache.converted_name(member, self.convention).to_string())
    }

    /// `table.column` for a single-member selector.
    fn qualified<S: Selector + ?Sized>(&self, selector: &S) -> ScribeResult<String> {
        let column = self.column_name(selector)?;
        Ok(format!("{}.{}", self.table_of(&selector.entity()), column))
    }

    /// `table.column` for each member of a group, paired with its alias.
    fn qualified_group<T: Entity>(
        &self,
        group: &ColumnGroup<T>,
    ) -> ScribeResult<Vec<(String, Option<String>)>> {
        let members = self.cache.members(group)?;
        if members.len() != group.len() {
            return Err(ScribeError::invalid_selector(format!(
                "group of {} members resolved to {} columns",
                group.len(),
                members.len()
            )));
        }
        let table = self.table_of(&group.entity());
        Ok(members
            .iter()
            .zip(group.members())
            .map(|(name, member)| {
                let column = self.cache.converted_name(name, self.convention);
                (
                    format!("{table}.{column}"),
                    member.alias().map(str::to_string),
                )
            })
            .collect())
    }

    /// ` AS <quoted alias>` or nothing.
    fn alias_suffix(&self, alias: Option<&str>) -> String {
        match alias.map(str::trim).filter(|a| !a.is_empty()) {
            Some(alias) => format!(" AS {}", self.vendor.quote(alias)),
            None => String::new(),
        }
    }

    /// The queue a connective or parenthesis may target.
    fn boolean_queue(&mut self, location: Clause) -> ScribeResult<&mut ClauseQueue> {
        match location {
            Clause::Where => Ok(&mut self.conditions),
            Clause::Having => Ok(&mut self.having),
            other => Err(ScribeError::InvalidParenthesisLocation(other)),
        }
    }
}

impl<E> Clone for QueryBuilder<E> {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor.clone(),
            vendor: self.vendor,
            convention: self.convention,
            pluralize: self.pluralize,
            cache: self.cache,
            select: self.select.clone(),
            aggregate: self.aggregate.clone(),
            join: self.join.clone(),
            conditions: self.conditions.clone(),
            group_by: self.group_by.clone(),
            having: self.having.clone(),
            order_by: self.order_by.clone(),
            select_all: self.select_all,
            delete: self.delete,
            page: self.page,
            limit: self.limit,
            binder: self.binder.clone(),
            _entity: PhantomData,
        }
    }
}

impl<E> fmt::Debug for QueryBuilder<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueryBuilder")
            .field("entity", &std::any::type_name::<E>())
            .field("descriptor", &self.descriptor)
            .field("vendor", &self.vendor)
            .field("convention", &self.convention)
            .field("pluralize", &self.pluralize)
            .field("select_all", &self.select_all)
            .field("delete", &self.delete)
            .field("page", &self.page)
            .field("limit", &self.limit)
            .field("params", &self.binder.len())
            .finish_non_exhaustive()
    }
}
