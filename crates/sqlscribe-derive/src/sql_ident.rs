use proc_macro2::Span;
use syn::{Error, LitStr, Result};

pub(crate) fn is_valid_sql_ident(s: &str) -> bool {
    let mut chars = s.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    if !(first.is_ascii_alphabetic() || first == '_') {
        return false;
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// A table name, optionally schema-qualified (`audit.events`).
pub(crate) fn parse_table_name(lit: &LitStr) -> Result<String> {
    let raw = lit.value();
    let table = raw.trim();
    if table.is_empty() {
        return Err(Error::new(lit.span(), "table name must not be empty"));
    }
    for part in table.split('.') {
        check_ident(part, lit.span(), "table name")?;
    }
    Ok(table.to_string())
}

fn check_ident(s: &str, span: Span, what: &str) -> Result<()> {
    if !is_valid_sql_ident(s) {
        return Err(Error::new(
            span,
            format!("{what} must be a valid SQL identifier (expected [A-Za-z_][A-Za-z0-9_]*), got '{s}'"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_idents() {
        assert!(is_valid_sql_ident("books"));
        assert!(is_valid_sql_ident("_tmp1"));
        assert!(!is_valid_sql_ident("1books"));
        assert!(!is_valid_sql_ident("books;drop"));
        assert!(!is_valid_sql_ident(""));
    }

    #[test]
    fn table_names() {
        let lit = LitStr::new("audit.events", Span::call_site());
        assert_eq!(parse_table_name(&lit).unwrap(), "audit.events");

        let lit = LitStr::new("audit..events", Span::call_site());
        assert!(parse_table_name(&lit).is_err());

        let lit = LitStr::new("  ", Span::call_site());
        assert!(parse_table_name(&lit).is_err());
    }
}
