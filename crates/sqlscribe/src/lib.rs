//! # sqlscribe
//!
//! A typed, fluent SQL statement builder.
//!
//! ## Features
//!
//! - **Typed selectors**: columns are `Column<Entity, Value>` constants generated by `#[derive(Entity)]`
//! - **Parameterized**: every value becomes an `@paramN` placeholder, never SQL text
//! - **Naming conventions**: snake, upper snake or Pascal case, with optional table pluralization
//! - **Vendor-aware aliases**: `"alias"`, `` `alias` `` or `[alias]`
//! - **Cached metadata**: selector resolution and name conversion are memoized process-wide
//!
//! ## Example
//!
//! ```ignore
//! use sqlscribe::{Entity, Operator, QueryBuilderFactory};
//!
//! #[derive(Entity)]
//! struct Book {
//!     id: i32,
//!     title: String,
//!     price: f64,
//! }
//!
//! let factory = QueryBuilderFactory::default();
//!
//! let query = factory
//!     .builder::<Book>()
//!     .select_all()
//!     .where_(Book::ID, Operator::Equal, 1)?
//!     .build()?;
//!
//! assert_eq!(query.sql(), "SELECT * FROM books WHERE books.id = @param1;");
//!
//! let delete = factory
//!     .builder::<Book>()
//!     .delete()
//!     .where_(Book::ID, Operator::Equal, 5)?
//!     .build()?;
//!
//! assert_eq!(delete.sql(), "DELETE FROM books WHERE books.id = @param1;");
//! ```
//!
//! Execution is up to the caller: hand `query.sql()` and `query.params()` to
//! any driver that binds named parameters.

// Lets derive output (`::sqlscribe::...`) resolve inside this crate's own tests.
extern crate self as sqlscribe;

pub mod builder;
pub mod cache;
pub mod condition;
pub mod config;
pub mod entity;
pub mod error;
pub mod factory;
pub mod naming;
pub mod param;
pub mod selector;
pub mod value;
pub mod vendor;

pub use builder::{BuiltQuery, Clause, JoinKind, Parenthesis, QueryBuilder};
pub use cache::{CacheStats, MetadataCache};
pub use condition::{AggregateFunction, Condition, HavingCondition, Operator};
pub use config::ScribeConfig;
pub use entity::{Entity, EntityDescriptor, EntityRef};
pub use error::{ScribeError, ScribeResult};
pub use factory::QueryBuilderFactory;
pub use naming::NamingConvention;
pub use param::{ParamBinder, Parameters};
pub use selector::{Column, ColumnGroup, ColumnRef, Selector};
pub use value::Value;
pub use vendor::DatabaseVendor;

#[cfg(feature = "derive")]
pub use sqlscribe_derive::Entity;
