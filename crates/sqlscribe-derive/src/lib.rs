//! Derive macros for sqlscribe
//!
//! Provides `#[derive(Entity)]`.

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod entity;
mod sql_ident;

/// Derive `Entity` for a struct and generate one typed selector per field.
///
/// # Example
///
/// ```ignore
/// use sqlscribe::Entity;
///
/// #[derive(Entity)]
/// struct Book {
///     id: i32,
///     title: String,
///     author_id: Option<i32>,
///     #[scribe(skip)]
///     cached_rating: f32,
/// }
/// ```
///
/// # Generated
///
/// - `impl Entity for Book` with the type name as the table source name
/// - `Book::ID: Column<Book, i32>`, `Book::TITLE: Column<Book, String>`,
///   `Book::AUTHOR_ID: Column<Book, Option<i32>>`
///
/// # Attributes
///
/// - `#[scribe(table = "name")]` - Use a verbatim table name (no pluralization or case conversion)
/// - `#[scribe(skip)]` - Do not generate a selector for this field
#[proc_macro_derive(Entity, attributes(scribe))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    entity::expand(input)
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
