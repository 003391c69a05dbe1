//! Process-wide memoization of selector resolution and name conversion.
//!
//! Both tables are keyed structurally and never evicted: a selector's member
//! list depends only on its shape, and a converted name only on
//! `(raw name, convention)`, so an entry computed once stays valid for the
//! life of the process.

use crate::error::ScribeResult;
use crate::naming::{NamingConvention, convert_name};
use crate::selector::{Selector, SelectorKey, resolve};
use dashmap::DashMap;
use std::any::TypeId;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, OnceLock};
use tracing::trace;

static GLOBAL: OnceLock<MetadataCache> = OnceLock::new();

/// Concurrent memo table shared by every builder in the process.
///
/// Lookup-or-compute is atomic per key: under contention a key is resolved
/// exactly once and every caller observes the same value.
#[derive(Debug, Default)]
pub struct MetadataCache {
    members: DashMap<SelectorKey, Arc<[String]>>,
    names: DashMap<(String, NamingConvention), Arc<str>>,
    resolutions: AtomicU64,
}

/// Snapshot of cache sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    /// Distinct selectors resolved.
    pub member_entries: usize,
    /// Distinct `(name, convention)` pairs converted.
    pub name_entries: usize,
    /// Selector resolutions actually computed (cache misses).
    pub resolutions: u64,
}

impl MetadataCache {
    /// An empty, independent cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The lazily-initialised process-wide cache.
    pub fn global() -> &'static MetadataCache {
        GLOBAL.get_or_init(MetadataCache::new)
    }

    /// Ordered member names of `selector`, resolving them on first use.
    ///
    /// Failed resolutions are not cached; the same error is produced again on
    /// the next call.
    pub fn members<S: Selector + ?Sized>(&self, selector: &S) -> ScribeResult<Arc<[String]>> {
        let key = selector.key();
        if let Some(hit) = self.members.get(&key) {
            return Ok(Arc::clone(hit.value()));
        }

        let entry = self.members.entry(key).or_try_insert_with(|| {
            let resolved = resolve(selector.shape())?;
            self.resolutions.fetch_add(1, Ordering::Relaxed);
            trace!(
                target: "sqlscribe.cache",
                members = ?resolved,
                "resolved selector"
            );
            Ok::<_, crate::error::ScribeError>(Arc::from(resolved))
        })?;
        Ok(Arc::clone(entry.value()))
    }

    /// `raw` converted under `convention`, memoized.
    pub fn converted_name(&self, raw: &str, convention: NamingConvention) -> Arc<str> {
        let key = (raw.to_string(), convention);
        if let Some(hit) = self.names.get(&key) {
            return Arc::clone(hit.value());
        }

        let entry = self.names.entry(key).or_insert_with(|| {
            let converted = convert_name(raw, convention);
            trace!(
                target: "sqlscribe.cache",
                raw,
                %convention,
                converted = %converted,
                "converted name"
            );
            Arc::from(converted)
        });
        Arc::clone(entry.value())
    }

    /// Whether `selector` has already been resolved.
    pub fn contains<S: Selector + ?Sized>(&self, selector: &S) -> bool {
        self.members.contains_key(&selector.key())
    }

    /// Number of resolved selectors declared on the entity type `entity`.
    pub fn member_entries_for(&self, entity: TypeId) -> usize {
        self.members
            .iter()
            .filter(|entry| entry.key().entity() == entity)
            .count()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            member_entries: self.members.len(),
            name_entries: self.names.len(),
            resolutions: self.resolutions.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::Entity;
    use crate::selector::{Column, ColumnGroup};
    use std::thread;

    struct Book;

    impl Entity for Book {
        const ENTITY_NAME: &'static str = "Book";
    }

    impl Book {
        const ID: Column<Book, i32> = Column::new("id");
        const TITLE: Column<Book, String> = Column::new("title");
    }

    #[test]
    fn hit_returns_same_members() {
        let cache = MetadataCache::new();
        let first = cache.members(&Book::TITLE).unwrap();
        let second = cache.members(&Book::TITLE).unwrap();
        assert_eq!(&*first, ["title".to_string()]);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.stats().resolutions, 1);
        assert_eq!(cache.stats().member_entries, 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let cache = MetadataCache::new();
        let bad: Column<Book, i32> = Column::new("a.b");
        assert!(cache.members(&bad).is_err());
        assert!(cache.members(&bad).is_err());
        assert!(!cache.contains(&bad));
        assert_eq!(cache.stats().member_entries, 0);
    }

    #[test]
    fn names_are_memoized_per_convention() {
        let cache = MetadataCache::new();
        assert_eq!(&*cache.converted_name("AuthorId", NamingConvention::LowerSnakeCase), "author_id");
        assert_eq!(&*cache.converted_name("AuthorId", NamingConvention::UpperSnakeCase), "AUTHOR_ID");
        assert_eq!(&*cache.converted_name("AuthorId", NamingConvention::LowerSnakeCase), "author_id");
        assert_eq!(cache.stats().name_entries, 2);
    }

    #[test]
    fn concurrent_lookups_resolve_once() {
        let cache = Arc::new(MetadataCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    let group = ColumnGroup::new().with(Book::ID).with(Book::TITLE);
                    cache.members(&group).unwrap()
                })
            })
            .collect();

        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for r in &results {
            assert_eq!(&**r, ["id".to_string(), "title".to_string()]);
        }
        assert_eq!(cache.stats().resolutions, 1);
        assert_eq!(cache.member_entries_for(TypeId::of::<Book>()), 1);
    }
}
