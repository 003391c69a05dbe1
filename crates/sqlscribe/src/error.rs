//! Error types for sqlscribe

use crate::builder::Clause;
use thiserror::Error;

/// Result type alias for sqlscribe operations
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Errors raised while composing or compiling a statement.
///
/// Every variant is fatal for the statement being built: the builder does not
/// attempt to recover, the caller fixes the construction sequence instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScribeError {
    /// Selector is not a direct member or a named member group
    #[error("Invalid selector: {0}")]
    InvalidSelector(String),

    /// Operator has no SQL mapping
    #[error("Operator '{0}' is not supported")]
    UnsupportedOperator(String),

    /// Naming convention has no conversion rule
    #[error("Naming convention '{0}' is not supported")]
    UnsupportedNamingConvention(String),

    /// Join kind is not INNER, LEFT, RIGHT or FULL
    #[error("Invalid join type: '{0}'")]
    InvalidJoinType(String),

    /// Parenthesis or connective aimed at a clause that cannot hold one
    #[error("Parenthesis and boolean connectives are not allowed in the {0} clause")]
    InvalidParenthesisLocation(Clause),

    /// SELECT statement without columns, `*` or aggregates
    #[error("No projection configured: call select, select_all or an aggregate before build")]
    MissingProjection,

    /// DELETE statement combined with a clause that only SELECT supports
    #[error("DELETE cannot be combined with a {0} clause")]
    DeleteConflict(Clause),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ScribeError {
    /// Create an invalid selector error
    pub fn invalid_selector(message: impl Into<String>) -> Self {
        Self::InvalidSelector(message.into())
    }

    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Check if this is an invalid selector error
    pub fn is_invalid_selector(&self) -> bool {
        matches!(self, Self::InvalidSelector(_))
    }

    /// Check if this is a missing projection error
    pub fn is_missing_projection(&self) -> bool {
        matches!(self, Self::MissingProjection)
    }

    /// Check if this is a delete conflict error
    pub fn is_delete_conflict(&self) -> bool {
        matches!(self, Self::DeleteConflict(_))
    }
}

impl From<toml::de::Error> for ScribeError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

impl From<std::io::Error> for ScribeError {
    fn from(err: std::io::Error) -> Self {
        Self::Config(err.to_string())
    }
}
