//! Category and tag filtering of post summaries.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::post::PostSummary;

/// Which field a filter narrows on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Category,
    Tag,
}

impl FilterKind {
    /// Query parameter name carrying this filter.
    pub fn param(&self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Tag => "tag",
        }
    }
}

/// An active filter selection. `None` at the call site means "all posts".
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Filter {
    Category(String),
    Tag(String),
}

impl Filter {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Category(_) => FilterKind::Category,
            Self::Tag(_) => FilterKind::Tag,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            Self::Category(v) | Self::Tag(v) => v,
        }
    }

    /// Whether `post` passes this filter.
    pub fn matches(&self, post: &PostSummary) -> bool {
        match self {
            Self::Category(c) => post.category == *c,
            Self::Tag(t) => post.has_tag(t),
        }
    }

    /// Read a filter from query pairs. `category` takes precedence over `tag`;
    /// empty values are ignored.
    pub fn from_query_pairs<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Option<Self>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut category = None;
        let mut tag = None;

        for (key, value) in pairs {
            let value = value.as_ref().trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "category" if category.is_none() => category = Some(value.to_string()),
                "tag" if tag.is_none() => tag = Some(value.to_string()),
                _ => {}
            }
        }

        category.map(Self::Category).or(tag.map(Self::Tag))
    }

    /// The single `(name, value)` query pair for this filter.
    pub fn query_pair(&self) -> (&'static str, &str) {
        (self.kind().param(), self.value())
    }
}

/// Posts passing `filter`, in their original order.
pub fn apply<'a>(posts: &'a [PostSummary], filter: Option<&Filter>) -> Vec<&'a PostSummary> {
    posts
        .iter()
        .filter(|p| filter.is_none_or(|f| f.matches(p)))
        .collect()
}

/// Selection after clicking `clicked` while `current` is active.
///
/// Clicking the active filter clears it.
pub fn toggle(current: Option<&Filter>, clicked: Filter) -> Option<Filter> {
    if current == Some(&clicked) {
        None
    } else {
        Some(clicked)
    }
}

/// Number of posts per category.
pub fn category_counts(posts: &[PostSummary]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for post in posts {
        *counts.entry(post.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// A tag with the number of posts carrying it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// Tags across all posts, most used first, then alphabetical.
pub fn tag_counts(posts: &[PostSummary]) -> Vec<TagCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for post in posts {
        for tag in &post.tags {
            *counts.entry(tag.as_str()).or_insert(0) += 1;
        }
    }

    let mut tags: Vec<_> = counts
        .into_iter()
        .map(|(tag, count)| TagCount {
            tag: tag.to_string(),
            count,
        })
        .collect();
    tags.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.tag.cmp(&b.tag)));
    tags
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::post::tests::summary;

    fn posts() -> Vec<PostSummary> {
        let mut hello = summary("hello-world", (2024, 3, 1), &["ml", "intro"]);
        hello.category = "technical".to_string();
        let printer = summary("printer", (2024, 2, 1), &["hardware"]);
        let mut graphs = summary("graphs", (2024, 1, 1), &["ml"]);
        graphs.category = "technical".to_string();
        vec![hello, printer, graphs]
    }

    #[test]
    fn test_tag_filter_then_clear() {
        let posts = posts();

        let active = toggle(None, Filter::Tag("ml".to_string()));
        let visible = apply(&posts, active.as_ref());
        let slugs: Vec<_> = visible.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["hello-world", "graphs"]);

        // clicking the same active filter restores the full list
        let cleared = toggle(active.as_ref(), Filter::Tag("ml".to_string()));
        assert!(cleared.is_none());
        assert_eq!(apply(&posts, cleared.as_ref()).len(), 3);
    }

    #[test]
    fn test_toggle_switches_filter() {
        let current = Filter::Tag("ml".to_string());
        let next = toggle(Some(&current), Filter::Category("technical".to_string()));
        assert_eq!(next, Some(Filter::Category("technical".to_string())));
    }

    #[test]
    fn test_category_filter() {
        let posts = posts();
        let filter = Filter::Category("personal".to_string());
        let visible = apply(&posts, Some(&filter));
        assert_eq!(visible.len(), 1);
        assert_eq!(visible[0].slug, "printer");
    }

    #[test]
    fn test_from_query_pairs() {
        assert_eq!(
            Filter::from_query_pairs([("tag", "ml")]),
            Some(Filter::Tag("ml".to_string()))
        );
        assert_eq!(
            Filter::from_query_pairs([("tag", "ml"), ("category", "technical")]),
            Some(Filter::Category("technical".to_string()))
        );
        assert_eq!(Filter::from_query_pairs([("tag", "  ")]), None);
        assert_eq!(Filter::from_query_pairs([("utm_source", "x")]), None);
        assert_eq!(Filter::from_query_pairs(Vec::<(String, String)>::new()), None);
    }

    #[test]
    fn test_query_pair() {
        let filter = Filter::Category("technical".to_string());
        assert_eq!(filter.query_pair(), ("category", "technical"));
    }

    #[test]
    fn test_counts() {
        let posts = posts();

        let categories = category_counts(&posts);
        assert_eq!(categories.get("technical"), Some(&2));
        assert_eq!(categories.get("personal"), Some(&1));

        let tags = tag_counts(&posts);
        assert_eq!(
            tags.first(),
            Some(&TagCount {
                tag: "ml".to_string(),
                count: 2
            })
        );
        let names: Vec<_> = tags.iter().map(|t| t.tag.as_str()).collect();
        assert_eq!(names, vec!["ml", "hardware", "intro"]);
    }
}
