//! Hands out builders sharing one vendor, naming convention and pluralization setting.

use crate::builder::QueryBuilder;
use crate::cache::MetadataCache;
use crate::config::ScribeConfig;
use crate::entity::{Entity, EntityDescriptor};
use crate::naming::NamingConvention;
use crate::vendor::DatabaseVendor;

/// Creates fresh [`QueryBuilder`]s with a fixed configuration.
///
/// # Example
/// ```ignore
/// use sqlscribe::{DatabaseVendor, NamingConvention, QueryBuilderFactory};
///
/// let factory = QueryBuilderFactory::new(DatabaseVendor::PostgreSql, NamingConvention::LowerSnakeCase, true);
/// let query = factory.builder::<Book>().select_all().build()?;
/// assert_eq!(query.sql(), "SELECT * FROM books;");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct QueryBuilderFactory {
    config: ScribeConfig,
    cache: &'static MetadataCache,
}

impl QueryBuilderFactory {
    pub fn new(
        vendor: DatabaseVendor,
        naming_convention: NamingConvention,
        pluralize_table_names: bool,
    ) -> Self {
        Self::from_config(&ScribeConfig {
            vendor,
            naming_convention,
            pluralize_table_names,
        })
    }

    pub fn from_config(config: &ScribeConfig) -> Self {
        Self {
            config: *config,
            cache: MetadataCache::global(),
        }
    }

    /// Use `cache` instead of the process-wide cache.
    pub fn with_cache(mut self, cache: &'static MetadataCache) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &ScribeConfig {
        &self.config
    }

    pub fn cache(&self) -> &'static MetadataCache {
        self.cache
    }

    /// A builder rooted at entity `E`.
    pub fn builder<E: Entity>(&self) -> QueryBuilder<E> {
        self.builder_for::<E>(E::descriptor())
    }

    /// A builder rooted at `E` whose table is described at runtime.
    ///
    /// Selectors of `E` resolve against `descriptor`'s table instead of the
    /// one derived from `E`.
    pub fn builder_for<E: Entity>(&self, descriptor: EntityDescriptor) -> QueryBuilder<E> {
        QueryBuilder::new(
            descriptor,
            self.config.vendor,
            self.config.naming_convention,
            self.config.pluralize_table_names,
            self.cache,
        )
    }
}

impl Default for QueryBuilderFactory {
    fn default() -> Self {
        Self::from_config(&ScribeConfig::default())
    }
}
