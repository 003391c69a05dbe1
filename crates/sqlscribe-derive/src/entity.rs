//! Entity derive macro implementation

use crate::sql_ident::parse_table_name;
use heck::ToShoutySnakeCase;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use std::collections::HashMap;
use syn::ext::IdentExt;
use syn::{Data, DeriveInput, Fields, LitStr, Result};

pub fn expand(input: DeriveInput) -> Result<TokenStream> {
    let name = &input.ident;
    let vis = &input.vis;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "Entity cannot be derived for generic structs",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(fields) => &fields.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    &input,
                    "Entity can only be derived for structs with named fields",
                ));
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                &input,
                "Entity can only be derived for structs",
            ));
        }
    };

    let entity_name = name.unraw().to_string();
    let table = get_table_name(&input)?;
    let table_tokens = match &table {
        Some(t) => quote! { ::core::option::Option::Some(#t) },
        None => quote! { ::core::option::Option::None },
    };

    let mut seen: HashMap<String, String> = HashMap::with_capacity(fields.len());
    let mut columns = Vec::with_capacity(fields.len());

    for field in fields {
        if is_skipped(field)? {
            continue;
        }
        let Some(ident) = &field.ident else {
            continue;
        };
        let member = ident.unraw().to_string();
        let const_name = member.to_shouty_snake_case();

        if let Some(previous) = seen.insert(const_name.clone(), member.clone()) {
            return Err(syn::Error::new_spanned(
                ident,
                format!(
                    "fields `{previous}` and `{member}` both map to selector `{const_name}`; mark one #[scribe(skip)]"
                ),
            ));
        }

        let const_ident = format_ident!("{}", const_name);
        let ty = &field.ty;
        let doc = format!("Selector for `{entity_name}::{member}`.");
        columns.push(quote! {
            #[doc = #doc]
            #[allow(dead_code)]
            #vis const #const_ident: ::sqlscribe::Column<Self, #ty> = ::sqlscribe::Column::new(#member);
        });
    }

    Ok(quote! {
        impl ::sqlscribe::Entity for #name {
            const ENTITY_NAME: &'static str = #entity_name;
            const TABLE_NAME: ::core::option::Option<&'static str> = #table_tokens;
        }

        impl #name {
            #(#columns)*
        }
    })
}

/// Struct-level `#[scribe(table = "...")]`.
fn get_table_name(input: &DeriveInput) -> Result<Option<String>> {
    let mut table = None;
    for attr in &input.attrs {
        if !attr.path().is_ident("scribe") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("table") {
                let lit: LitStr = meta.value()?.parse()?;
                table = Some(parse_table_name(&lit)?);
                Ok(())
            } else {
                Err(meta.error("unsupported #[scribe] attribute, expected `table = \"...\"`"))
            }
        })?;
    }
    Ok(table)
}

/// Field-level `#[scribe(skip)]`.
fn is_skipped(field: &syn::Field) -> Result<bool> {
    let mut skip = false;
    for attr in &field.attrs {
        if !attr.path().is_ident("scribe") {
            continue;
        }
        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("skip") {
                skip = true;
                Ok(())
            } else {
                Err(meta.error("unsupported #[scribe] field attribute, expected `skip`"))
            }
        })?;
    }
    Ok(skip)
}
