//! Naming conventions for table and column identifiers.
//!
//! Member names (`author_id`) and entity type names (`BookCategory`) are turned
//! into SQL identifiers according to a [`NamingConvention`]. Table names may
//! additionally be pluralized first (`BookCategory` -> `BookCategories` ->
//! `book_categories`).
//!
//! Conversion is a pure function of `(name, convention)`, which is what makes it
//! safe to memoize process-wide (see [`crate::cache::MetadataCache`]).

use crate::error::{ScribeError, ScribeResult};
use heck::{ToShoutySnakeCase, ToSnakeCase, ToUpperCamelCase};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rule mapping member and type names to SQL identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// `AuthorId`
    PascalCase,
    /// `author_id`
    #[default]
    LowerSnakeCase,
    /// `AUTHOR_ID`
    UpperSnakeCase,
}

impl NamingConvention {
    /// Apply this convention to `name`.
    pub fn apply(self, name: &str) -> String {
        convert_name(name, self)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            NamingConvention::PascalCase => "pascal_case",
            NamingConvention::LowerSnakeCase => "lower_snake_case",
            NamingConvention::UpperSnakeCase => "upper_snake_case",
        }
    }
}

impl fmt::Display for NamingConvention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NamingConvention {
    type Err = ScribeError;

    /// Accepts the snake_case config spelling as well as the type-style
    /// spelling (`PascalCase`, `LowerSnakeCase`, `UpperSnakeCase`).
    fn from_str(s: &str) -> ScribeResult<Self> {
        match s.trim().to_snake_case().as_str() {
            "pascal_case" | "pascal" => Ok(NamingConvention::PascalCase),
            "lower_snake_case" | "snake_case" | "lower_snake" => {
                Ok(NamingConvention::LowerSnakeCase)
            }
            "upper_snake_case" | "upper_snake" | "screaming_snake_case" => {
                Ok(NamingConvention::UpperSnakeCase)
            }
            _ => Err(ScribeError::UnsupportedNamingConvention(s.to_string())),
        }
    }
}

/// Convert a member or type name according to `convention`.
///
/// ```ignore
/// use sqlscribe::naming::{convert_name, NamingConvention};
///
/// assert_eq!(convert_name("author_id", NamingConvention::PascalCase), "AuthorId");
/// assert_eq!(convert_name("AuthorId", NamingConvention::LowerSnakeCase), "author_id");
/// assert_eq!(convert_name("AuthorId", NamingConvention::UpperSnakeCase), "AUTHOR_ID");
/// ```
pub fn convert_name(name: &str, convention: NamingConvention) -> String {
    match convention {
        NamingConvention::PascalCase => name.to_upper_camel_case(),
        NamingConvention::LowerSnakeCase => name.to_snake_case(),
        NamingConvention::UpperSnakeCase => name.to_shouty_snake_case(),
    }
}

// (singular, plural), lowercase.
const IRREGULAR: &[(&str, &str)] = &[
    ("person", "people"),
    ("man", "men"),
    ("woman", "women"),
    ("child", "children"),
    ("tooth", "teeth"),
    ("foot", "feet"),
    ("mouse", "mice"),
    ("goose", "geese"),
    ("ox", "oxen"),
    ("leaf", "leaves"),
    ("life", "lives"),
    ("knife", "knives"),
    ("wife", "wives"),
    ("half", "halves"),
    ("shelf", "shelves"),
    ("wolf", "wolves"),
    ("hero", "heroes"),
    ("potato", "potatoes"),
    ("tomato", "tomatoes"),
    ("echo", "echoes"),
    ("index", "indices"),
    ("matrix", "matrices"),
    ("vertex", "vertices"),
    ("criterion", "criteria"),
    ("analysis", "analyses"),
    ("crisis", "crises"),
    ("thesis", "theses"),
    ("datum", "data"),
    ("medium", "media"),
    ("quiz", "quizzes"),
];

const UNCOUNTABLE: &[&str] = &[
    "equipment",
    "information",
    "rice",
    "money",
    "species",
    "series",
    "fish",
    "sheep",
    "deer",
    "news",
    "metadata",
    "data",
    "people",
];

/// Pluralize an English noun, respecting the casing of its last word.
///
/// Only the last word of a compound name is inflected:
/// `BookCategory` -> `BookCategories`, `audit_log` -> `audit_logs`.
pub fn pluralize(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }

    let start = last_word_start(name);
    let (head, word) = name.split_at(start);
    format!("{head}{}", pluralize_word(word))
}

fn last_word_start(name: &str) -> usize {
    let mut start = 0;
    let mut prev: Option<char> = None;
    for (i, c) in name.char_indices() {
        match prev {
            Some('_' | '-' | ' ') => start = i,
            Some(p) if c.is_uppercase() && p.is_lowercase() => start = i,
            _ => {}
        }
        prev = Some(c);
    }
    start
}

fn pluralize_word(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_case(word, plural);
    }

    let shouting = word.chars().any(char::is_alphabetic) && !word.chars().any(char::is_lowercase);
    let suffix_case = |s: &str| {
        if shouting {
            s.to_uppercase()
        } else {
            s.to_string()
        }
    };

    if lower.ends_with('y')
        && lower.len() > 1
        && !matches!(
            lower.chars().nth(lower.chars().count() - 2),
            Some('a' | 'e' | 'i' | 'o' | 'u')
        )
    {
        let stem = &word[..word.len() - 1];
        format!("{stem}{}", suffix_case("ies"))
    } else if lower.ends_with("sis") {
        let stem = &word[..word.len() - 2];
        format!("{stem}{}", suffix_case("es"))
    } else if lower.ends_with('s') && !["ss", "us", "as"].iter().any(|end| lower.ends_with(end)) {
        // Already plural.
        word.to_string()
    } else if lower.ends_with('s')
        || lower.ends_with('x')
        || lower.ends_with('z')
        || lower.ends_with("ch")
        || lower.ends_with("sh")
    {
        format!("{word}{}", suffix_case("es"))
    } else {
        format!("{word}{}", suffix_case("s"))
    }
}

fn match_case(original: &str, replacement: &str) -> String {
    let mut chars = original.chars();
    let first_upper = chars.next().is_some_and(char::is_uppercase);
    let all_upper = original.len() > 1 && !original.chars().any(char::is_lowercase);

    if all_upper {
        replacement.to_uppercase()
    } else if first_upper {
        let mut out = String::with_capacity(replacement.len());
        let mut rc = replacement.chars();
        if let Some(c) = rc.next() {
            out.extend(c.to_uppercase());
        }
        out.push_str(rc.as_str());
        out
    } else {
        replacement.to_string()
    }
}
