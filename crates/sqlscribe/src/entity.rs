//! Entity metadata: the types whose members selectors point at.

use std::any::TypeId;
use std::borrow::Cow;

/// A type that maps to one table.
///
/// Usually derived with `#[derive(Entity)]`, which also generates one
/// [`Column`](crate::Column) constant per field:
///
/// ```ignore
/// use sqlscribe::Entity;
///
/// #[derive(Entity)]
/// struct Book {
///     id: i32,
///     title: String,
///     author_id: Option<i32>,
/// }
///
/// // Book::ID: Column<Book, i32>, Book::TITLE: Column<Book, String>, ...
/// ```
pub trait Entity: 'static {
    /// Type name the table name is derived from (pluralized, then converted).
    const ENTITY_NAME: &'static str;

    /// Explicit table name, used verbatim when set.
    const TABLE_NAME: Option<&'static str> = None;

    /// Descriptor for this entity's table.
    fn descriptor() -> EntityDescriptor {
        EntityDescriptor {
            name: Cow::Borrowed(Self::ENTITY_NAME),
            table: Self::TABLE_NAME.map(Cow::Borrowed),
        }
    }
}

/// Runtime description of the table an entity lives in.
///
/// Use [`EntityDescriptor::named`] when the table is only known at runtime;
/// the name goes through the same pluralization and naming convention as a
/// type name would.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityDescriptor {
    name: Cow<'static, str>,
    table: Option<Cow<'static, str>>,
}

impl EntityDescriptor {
    /// Descriptor of a typed entity.
    pub fn of<E: Entity>() -> Self {
        E::descriptor()
    }

    /// Descriptor from a source name, e.g. `"AuditLog"`.
    pub fn named(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            table: None,
        }
    }

    /// Descriptor with a verbatim table name (no pluralization or conversion).
    pub fn table(table: impl Into<Cow<'static, str>>) -> Self {
        let table = table.into();
        Self {
            name: table.clone(),
            table: Some(table),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The verbatim table name, if one was given.
    pub fn explicit_table(&self) -> Option<&str> {
        self.table.as_deref()
    }
}

/// Type identity plus table description of the entity a selector belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntityRef {
    type_id: TypeId,
    descriptor: EntityDescriptor,
}

impl EntityRef {
    pub fn of<E: Entity>() -> Self {
        Self {
            type_id: TypeId::of::<E>(),
            descriptor: E::descriptor(),
        }
    }

    pub fn type_id(&self) -> TypeId {
        self.type_id
    }

    pub fn descriptor(&self) -> &EntityDescriptor {
        &self.descriptor
    }
}
