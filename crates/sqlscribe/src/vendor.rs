//! Database vendor identification and alias quoting.

use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Target database vendor.
///
/// The vendor only affects how explicit aliases are delimited; table and
/// column references are always emitted bare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseVendor {
    #[default]
    #[serde(alias = "postgres")]
    PostgreSql,
    Sqlite,
    #[serde(alias = "mariadb")]
    MySql,
    #[serde(alias = "mssql")]
    SqlServer,
    /// No delimiters are applied.
    Unspecified,
}

impl DatabaseVendor {
    /// Opening and closing delimiter, if the vendor has one.
    pub fn delimiters(self) -> Option<(char, char)> {
        match self {
            DatabaseVendor::PostgreSql | DatabaseVendor::Sqlite => Some(('"', '"')),
            DatabaseVendor::MySql => Some(('`', '`')),
            DatabaseVendor::SqlServer => Some(('[', ']')),
            DatabaseVendor::Unspecified => None,
        }
    }

    /// Wrap `text` in this vendor's delimiters.
    ///
    /// A closing delimiter inside `text` is doubled, so the alias cannot
    /// terminate the quoted identifier early.
    pub fn quote(self, text: &str) -> String {
        let Some((open, close)) = self.delimiters() else {
            return text.to_string();
        };

        let mut out = String::with_capacity(text.len() + 2);
        out.push(open);
        for ch in text.chars() {
            if ch == close {
                out.push(close);
            }
            out.push(ch);
        }
        out.push(close);
        out
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DatabaseVendor::PostgreSql => "postgresql",
            DatabaseVendor::Sqlite => "sqlite",
            DatabaseVendor::MySql => "mysql",
            DatabaseVendor::SqlServer => "sqlserver",
            DatabaseVendor::Unspecified => "unspecified",
        }
    }
}

impl fmt::Display for DatabaseVendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DatabaseVendor {
    type Err = Infallible;

    /// Unknown vendor names map to [`DatabaseVendor::Unspecified`].
    fn from_str(s: &str) -> Result<Self, Infallible> {
        let normalized: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        Ok(match normalized.as_str() {
            "postgres" | "postgresql" | "pg" => DatabaseVendor::PostgreSql,
            "sqlite" | "sqlite3" => DatabaseVendor::Sqlite,
            "mysql" | "mariadb" => DatabaseVendor::MySql,
            "sqlserver" | "mssql" => DatabaseVendor::SqlServer,
            _ => DatabaseVendor::Unspecified,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_per_vendor() {
        assert_eq!(DatabaseVendor::PostgreSql.quote("Title"), r#""Title""#);
        assert_eq!(DatabaseVendor::Sqlite.quote("Title"), r#""Title""#);
        assert_eq!(DatabaseVendor::MySql.quote("Title"), "`Title`");
        assert_eq!(DatabaseVendor::SqlServer.quote("Title"), "[Title]");
        assert_eq!(DatabaseVendor::Unspecified.quote("Title"), "Title");
    }

    #[test]
    fn quote_escapes_closing_delimiter() {
        assert_eq!(DatabaseVendor::PostgreSql.quote(r#"a"b"#), r#""a""b""#);
        assert_eq!(DatabaseVendor::MySql.quote("a`b"), "`a``b`");
        assert_eq!(DatabaseVendor::SqlServer.quote("a]b"), "[a]]b]");
    }

    #[test]
    fn parse_vendor_names() {
        assert_eq!("PostgreSQL".parse::<DatabaseVendor>().unwrap(), DatabaseVendor::PostgreSql);
        assert_eq!("sql_server".parse::<DatabaseVendor>().unwrap(), DatabaseVendor::SqlServer);
        assert_eq!("MySql".parse::<DatabaseVendor>().unwrap(), DatabaseVendor::MySql);
        assert_eq!("oracle".parse::<DatabaseVendor>().unwrap(), DatabaseVendor::Unspecified);
    }
}
