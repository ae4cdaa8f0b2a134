//! Slug-keyed registry built once at startup.
//!
//! Lookups never construct paths at runtime: everything that can be opened is
//! registered up front, and a miss is reported as [`Lookup::NotFound`].

use std::collections::HashMap;

use crate::post::{PostContent, PostSummary};

/// Items addressable by slug.
pub trait Keyed {
    fn key(&self) -> &str;
}

impl Keyed for PostSummary {
    fn key(&self) -> &str {
        &self.slug
    }
}

impl Keyed for PostContent {
    fn key(&self) -> &str {
        &self.slug
    }
}

/// Result of a registry lookup.
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, T> {
    Found(&'a T),
    NotFound,
}

impl<'a, T> Lookup<'a, T> {
    pub fn found(self) -> Option<&'a T> {
        match self {
            Self::Found(item) => Some(item),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }
}

/// Ordered collection with an index by slug.
#[derive(Debug, Clone)]
pub struct Registry<T> {
    items: Vec<T>,
    index: HashMap<String, usize>,
}

impl<T> Default for Registry<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T: Keyed> Registry<T> {
    /// Build a registry, keeping insertion order.
    ///
    /// When two items share a slug the first one wins.
    pub fn new(items: impl IntoIterator<Item = T>) -> Self {
        let mut registry = Self::default();
        for item in items {
            let key = item.key().to_string();
            if registry.index.contains_key(&key) {
                tracing::warn!(slug = %key, "duplicate slug ignored");
                continue;
            }
            registry.index.insert(key, registry.items.len());
            registry.items.push(item);
        }
        registry
    }

    /// Look up an item by slug.
    pub fn lookup(&self, slug: &str) -> Lookup<'_, T> {
        match self.index.get(slug) {
            Some(&i) => Lookup::Found(&self.items[i]),
            None => Lookup::NotFound,
        }
    }

    /// Whether `slug` is registered.
    pub fn contains(&self, slug: &str) -> bool {
        self.index.contains_key(slug)
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T: Keyed> FromIterator<T> for Registry<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::tests::summary;

    #[test]
    fn test_lookup_found_and_missing() {
        let registry = Registry::new(vec![
            summary("hello-world", (2024, 1, 14), &[]),
            summary("second", (2024, 1, 1), &[]),
        ]);

        match registry.lookup("hello-world") {
            Lookup::Found(post) => assert_eq!(post.slug, "hello-world"),
            Lookup::NotFound => panic!("expected hello-world"),
        }
        assert_eq!(registry.lookup("nope"), Lookup::NotFound);
        assert!(registry.contains("second"));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_slug_first_wins() {
        let mut dup = summary("same", (2020, 1, 1), &[]);
        dup.title = "second copy".to_string();

        let registry: Registry<_> = vec![summary("same", (2024, 1, 1), &[]), dup]
            .into_iter()
            .collect();

        assert_eq!(registry.len(), 1);
        let post = registry.lookup("same").found().unwrap();
        assert_eq!(post.title, "same");
    }

    #[test]
    fn test_keeps_order() {
        let registry = Registry::new(vec![
            summary("c", (2024, 1, 3), &[]),
            summary("a", (2024, 1, 1), &[]),
            summary("b", (2024, 1, 2), &[]),
        ]);
        let slugs: Vec<_> = registry.items().iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["c", "a", "b"]);
    }
}
