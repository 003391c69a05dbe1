//! Typed selectors and their resolution into member names.
//!
//! A selector is a compile-time-checked token naming one or more members of an
//! entity:
//!
//! - [`Column<E, V>`]: a single member of `E` whose value type is `V`
//! - [`ColumnGroup<E>`]: an ordered list of named members of `E`, each optionally aliased
//! - [`ColumnRef`]: a type-erased [`Column`], used inside composite conditions
//!
//! Resolution only accepts direct members. Anything that looks like a nested
//! path, a call, or a computed expression is rejected with
//! [`ScribeError::InvalidSelector`], so every emitted column maps 1:1 to a
//! declared member and a selector's structure alone determines its columns.

use crate::entity::{Entity, EntityRef};
use crate::error::{ScribeError, ScribeResult};
use std::any::TypeId;
use std::borrow::Cow;
use std::fmt;
use std::marker::PhantomData;

/// A single member of entity `E` with value type `V`.
pub struct Column<E, V> {
    path: &'static str,
    _marker: PhantomData<fn(&E) -> V>,
}

impl<E, V> Column<E, V> {
    /// Create a selector for the member named `path`.
    ///
    /// Derived entities get these as associated constants; hand-written ones
    /// are validated when first resolved.
    pub const fn new(path: &'static str) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &'static str {
        self.path
    }

    /// View the same member through one widening conversion (`i32` -> `i64`,
    /// `T` -> `Option<T>`, ...).
    ///
    /// The widened selector resolves to the same column but has its own cache
    /// identity, since its value type differs.
    pub fn widen<W>(self) -> Column<E, W>
    where
        V: Into<W>,
    {
        Column::new(self.path)
    }
}

impl<E, V> Clone for Column<E, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E, V> Copy for Column<E, V> {}

impl<E, V> fmt::Debug for Column<E, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("entity", &std::any::type_name::<E>())
            .field("path", &self.path)
            .field("value", &std::any::type_name::<V>())
            .finish()
    }
}

/// One member of a [`ColumnGroup`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupMember {
    path: &'static str,
    alias: Option<Cow<'static, str>>,
}

impl GroupMember {
    pub fn path(&self) -> &'static str {
        self.path
    }

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }
}

/// An ordered group of named members of entity `E`.
///
/// ```ignore
/// let group = ColumnGroup::new()
///     .with(Book::TITLE)
///     .with_as(Book::PRICE, "cost");
/// // or: columns![Book::TITLE, Book::PRICE]
/// ```
pub struct ColumnGroup<E> {
    members: Vec<GroupMember>,
    _marker: PhantomData<fn(&E)>,
}

impl<E: Entity> ColumnGroup<E> {
    /// Create an empty group.
    pub fn new() -> Self {
        Self {
            members: Vec::new(),
            _marker: PhantomData,
        }
    }

    /// Append a member.
    pub fn with<V>(mut self, column: Column<E, V>) -> Self {
        self.members.push(GroupMember {
            path: column.path,
            alias: None,
        });
        self
    }

    /// Append a member under an alias.
    pub fn with_as<V>(mut self, column: Column<E, V>, alias: impl Into<Cow<'static, str>>) -> Self {
        self.members.push(GroupMember {
            path: column.path,
            alias: Some(alias.into()),
        });
        self
    }

    pub fn members(&self) -> &[GroupMember] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}

impl<E: Entity> Default for ColumnGroup<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for ColumnGroup<E> {
    fn clone(&self) -> Self {
        Self {
            members: self.members.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E> fmt::Debug for ColumnGroup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnGroup")
            .field("entity", &std::any::type_name::<E>())
            .field("members", &self.members)
            .finish()
    }
}

/// Build a [`ColumnGroup`] from a list of columns of the same entity.
///
/// ```ignore
/// let group = sqlscribe::columns![Book::TITLE, Book::PRICE];
/// ```
#[macro_export]
macro_rules! columns {
    ($($col:expr),+ $(,)?) => {
        $crate::ColumnGroup::new()$(.with($col))+
    };
}

/// A type-erased single-member selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ColumnRef {
    entity: EntityRef,
    value: TypeId,
    path: &'static str,
}

impl ColumnRef {
    pub fn path(&self) -> &'static str {
        self.path
    }
}

impl<E: Entity, V: 'static> From<Column<E, V>> for ColumnRef {
    fn from(column: Column<E, V>) -> Self {
        Self {
            entity: EntityRef::of::<E>(),
            value: TypeId::of::<V>(),
            path: column.path,
        }
    }
}

/// Structural identity of a selector: declaring type, value type, and shape.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SelectorKey {
    entity: TypeId,
    value: TypeId,
    shape: KeyShape,
}

/// Member structure of a key, compared element by element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum KeyShape {
    Member(&'static str),
    Group(Vec<GroupMember>),
}

impl SelectorKey {
    pub fn entity(&self) -> TypeId {
        self.entity
    }

    /// Member paths in selector order.
    pub fn paths(&self) -> Vec<&'static str> {
        match &self.shape {
            KeyShape::Member(path) => vec![*path],
            KeyShape::Group(members) => members.iter().map(GroupMember::path).collect(),
        }
    }
}

/// What a selector denotes, before validation.
#[derive(Debug, Clone, Copy)]
pub enum SelectorShape<'a> {
    /// A single member access.
    Member(&'static str),
    /// A group of named members.
    Group(&'a [GroupMember]),
}

/// Anything the builder can resolve into columns.
pub trait Selector {
    /// The entity the selected members belong to.
    fn entity(&self) -> EntityRef;

    /// Structural cache key.
    fn key(&self) -> SelectorKey;

    fn shape(&self) -> SelectorShape<'_>;
}

impl<E: Entity, V: 'static> Selector for Column<E, V> {
    fn entity(&self) -> EntityRef {
        EntityRef::of::<E>()
    }

    fn key(&self) -> SelectorKey {
        SelectorKey {
            entity: TypeId::of::<E>(),
            value: TypeId::of::<V>(),
            shape: KeyShape::Member(self.path),
        }
    }

    fn shape(&self) -> SelectorShape<'_> {
        SelectorShape::Member(self.path)
    }
}

impl Selector for ColumnRef {
    fn entity(&self) -> EntityRef {
        self.entity.clone()
    }

    fn key(&self) -> SelectorKey {
        SelectorKey {
            entity: self.entity.type_id(),
            value: self.value,
            shape: KeyShape::Member(self.path),
        }
    }

    fn shape(&self) -> SelectorShape<'_> {
        SelectorShape::Member(self.path)
    }
}

impl<E: Entity> Selector for ColumnGroup<E> {
    fn entity(&self) -> EntityRef {
        EntityRef::of::<E>()
    }

    fn key(&self) -> SelectorKey {
        SelectorKey {
            entity: TypeId::of::<E>(),
            value: TypeId::of::<ColumnGroup<E>>(),
            shape: KeyShape::Group(self.members.clone()),
        }
    }

    fn shape(&self) -> SelectorShape<'_> {
        SelectorShape::Group(&self.members)
    }
}

/// Resolve a selector shape into its ordered member names.
pub fn resolve(shape: SelectorShape<'_>) -> ScribeResult<Vec<String>> {
    match shape {
        SelectorShape::Member(path) => {
            check_member(path)?;
            Ok(vec![path.to_string()])
        }
        SelectorShape::Group(members) => {
            if members.is_empty() {
                return Err(ScribeError::invalid_selector(
                    "member group must name at least one member",
                ));
            }
            members
                .iter()
                .map(|member| {
                    check_member(member.path)?;
                    if member.alias.as_deref().is_some_and(|a| a.trim().is_empty()) {
                        return Err(ScribeError::invalid_selector(format!(
                            "member '{}' has an empty alias",
                            member.path
                        )));
                    }
                    Ok(member.path.to_string())
                })
                .collect()
        }
    }
}

fn check_member(path: &str) -> ScribeResult<()> {
    if is_member_name(path) {
        return Ok(());
    }

    let reason = if path.is_empty() {
        "member name must not be empty".to_string()
    } else if path.contains('.') {
        format!("'{path}' is a nested member path; only direct members can be selected")
    } else if path.contains('(') || path.contains(')') {
        format!("'{path}' is a call, not a member")
    } else {
        format!("'{path}' is not a member name (expected [A-Za-z_][A-Za-z0-9_]*)")
    };
    Err(ScribeError::InvalidSelector(reason))
}

fn is_member_name(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Book;

    impl Entity for Book {
        const ENTITY_NAME: &'static str = "Book";
    }

    impl Book {
        const ID: Column<Book, i32> = Column::new("id");
        const TITLE: Column<Book, String> = Column::new("title");
        const PRICE: Column<Book, f64> = Column::new("price");
    }

    #[test]
    fn resolve_single_member() {
        assert_eq!(resolve(Book::ID.shape()).unwrap(), vec!["id"]);
        assert_eq!(resolve(Book::TITLE.shape()).unwrap(), vec!["title"]);
    }

    #[test]
    fn resolve_group_in_order() {
        let group = ColumnGroup::new().with(Book::PRICE).with(Book::TITLE);
        assert_eq!(resolve(group.shape()).unwrap(), vec!["price", "title"]);
    }

    #[test]
    fn resolve_rejects_nested_path() {
        let nested: Column<Book, String> = Column::new("author.name");
        let err = resolve(nested.shape()).unwrap_err();
        assert!(err.is_invalid_selector());
    }

    #[test]
    fn resolve_rejects_computed_expressions() {
        for bad in ["", "price * 2", "lower(title)", "1id", "title desc"] {
            let col: Column<Book, String> = Column::new(bad);
            assert!(resolve(col.shape()).unwrap_err().is_invalid_selector(), "{bad}");
        }
    }

    #[test]
    fn resolve_rejects_empty_group_and_alias() {
        let empty: ColumnGroup<Book> = ColumnGroup::new();
        assert!(resolve(empty.shape()).is_err());

        let blank = ColumnGroup::new().with_as(Book::TITLE, " ");
        assert!(resolve(blank.shape()).is_err());
    }

    #[test]
    fn widened_selector_keeps_member_but_not_key() {
        let wide = Book::ID.widen::<i64>();
        assert_eq!(wide.path(), "id");
        assert_eq!(resolve(wide.shape()).unwrap(), vec!["id"]);
        assert_ne!(wide.key(), Book::ID.key());
    }

    #[test]
    fn keys_are_structural() {
        assert_eq!(Book::ID.key(), Column::<Book, i32>::new("id").key());
        assert_eq!(ColumnRef::from(Book::ID).key(), Book::ID.key());

        let a = crate::columns![Book::TITLE, Book::PRICE];
        let b = ColumnGroup::new().with(Book::TITLE).with(Book::PRICE);
        let c = ColumnGroup::new().with(Book::PRICE).with(Book::TITLE);
        assert_eq!(a.key(), b.key());
        assert_ne!(a.key(), c.key());
        assert_eq!(c.key().paths(), ["price", "title"]);
    }

    #[test]
    fn delimiter_characters_in_aliases_do_not_collide() {
        let one = ColumnGroup::new().with_as(Book::ID, "x|title");
        let two = ColumnGroup::new().with_as(Book::ID, "x").with(Book::TITLE);
        let three = ColumnGroup::new().with_as(Book::ID, "x:title");
        let four = ColumnGroup::new().with_as(Book::ID, "x").with_as(Book::TITLE, "");
        assert_ne!(one.key(), two.key());
        assert_ne!(three.key(), two.key());
        assert_ne!(four.key(), two.key());
    }
}
