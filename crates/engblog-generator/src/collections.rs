//! Collections built over all content items.

use std::collections::HashSet;

use engblog_core::ContentItem;

use crate::filters::filter_tag_list;

/// Read access to every content item of a build.
#[derive(Debug, Clone, Default)]
pub struct CollectionApi<'a> {
    items: Vec<&'a ContentItem>,
}

impl<'a> CollectionApi<'a> {
    #[must_use]
    pub fn new(items: impl IntoIterator<Item = &'a ContentItem>) -> Self {
        Self {
            items: items.into_iter().collect(),
        }
    }

    /// All items, in collection order.
    pub fn get_all(&self) -> &[&'a ContentItem] {
        &self.items
    }

    /// Items carrying `tag`.
    pub fn get_filtered_by_tag(&self, tag: &str) -> Vec<&'a ContentItem> {
        self.items
            .iter()
            .filter(|item| item.data.tags.iter().any(|t| t == tag))
            .copied()
            .collect()
    }
}

/// Distinct tags across items, in first-seen order.
pub fn tag_set(api: &CollectionApi<'_>) -> Vec<String> {
    let mut seen = HashSet::new();
    api.get_all()
        .iter()
        .flat_map(|item| item.data.tags.iter())
        .filter(|tag| seen.insert(tag.as_str()))
        .cloned()
        .collect()
}

/// Tags shown in navigation: the distinct tags that are site tags.
pub fn tag_list(api: &CollectionApi<'_>) -> Vec<String> {
    filter_tag_list(&tag_set(api))
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use engblog_core::Frontmatter;

    use super::*;

    fn item(name: &str, tags: &[&str]) -> ContentItem {
        ContentItem::new(
            Path::new("src"),
            &Path::new("src/posts").join(format!("{name}.md")),
            Frontmatter {
                tags: tags.iter().map(|t| t.to_string()).collect(),
                ..Default::default()
            },
        )
        .expect("item")
    }

    #[test]
    fn test_tag_set_dedupes_in_order() {
        let items = [
            item("a", &["posts", "rust"]),
            item("b", &["nav", "posts"]),
            item("c", &[]),
            item("d", &["rust", "all"]),
        ];
        let api = CollectionApi::new(&items);
        assert_eq!(tag_set(&api), vec!["posts", "rust", "nav", "all"]);
    }

    #[test]
    fn test_tag_list_keeps_site_tags() {
        let items = [item("a", &["posts", "rust"]), item("b", &["nav", "payments"])];
        let api = CollectionApi::new(&items);
        assert_eq!(tag_list(&api), vec!["posts", "nav"]);
    }

    #[test]
    fn test_tag_list_of_no_items() {
        let api = CollectionApi::default();
        assert!(tag_list(&api).is_empty());
    }

    #[test]
    fn test_filtered_by_tag() {
        let items = [item("a", &["posts", "rust"]), item("b", &["posts"])];
        let api = CollectionApi::new(&items);
        let rust: Vec<_> = api.get_filtered_by_tag("rust").iter().map(|i| i.url.as_str()).collect();
        assert_eq!(rust, vec!["/posts/a/"]);
        assert_eq!(api.get_filtered_by_tag("posts").len(), 2);
    }
}
